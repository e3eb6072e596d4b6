//! Reporting periods.

pub mod error;
pub mod period;

pub use error::PeriodError;
pub use period::{Period, PeriodType};
