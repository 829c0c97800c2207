pub mod rate_sheet;
pub mod scenario;
pub mod schedule;
