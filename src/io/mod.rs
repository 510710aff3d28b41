//! File adapters for schedules, statements and reports

pub mod report;
pub mod schedule;
pub mod statement;

pub use report::*;
pub use schedule::*;
pub use statement::*;
