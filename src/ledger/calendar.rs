//! Due-date arithmetic for monthly obligations

use chrono::{Datelike, Days, NaiveDate};

/// Tolerance added to the due date before an unpaid obligation is overdue
pub const DEFAULT_GRACE_DAYS: u64 = 3;

/// First day of the month following `(month, year)`
fn first_of_next_month(month: u32, year: i32) -> Option<NaiveDate> {
    if !(1..=12).contains(&month) {
        return None;
    }
    if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
}

/// Last calendar day of `(month, year)`
///
/// Returns `None` only for an invalid month or a year outside chrono's range.
pub fn last_day_of_month(month: u32, year: i32) -> Option<NaiveDate> {
    first_of_next_month(month, year)?.pred_opt()
}

/// Number of days in `(month, year)`, leap years included
pub fn days_in_month(month: u32, year: i32) -> Option<u32> {
    last_day_of_month(month, year).map(|date| date.day())
}

/// Expected payment date for a due day in the given month
///
/// A day past the end of the month is clamped to the month's last day,
/// so day 31 in April is April 30 and day 30 in February 2024 is February 29.
/// Returns `None` for a zero day or an invalid `(month, year)`.
pub fn expected_pay_date(day: u32, month: u32, year: i32) -> Option<NaiveDate> {
    if day == 0 {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day).or_else(|| last_day_of_month(month, year))
}

/// Date after which an unpaid obligation becomes overdue
pub fn grace_deadline(due_date: NaiveDate, grace_days: u64) -> Option<NaiveDate> {
    due_date.checked_add_days(Days::new(grace_days))
}
