//! Period error types.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised while constructing or parsing a `Period`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PeriodError {
    /// Start date is after end date.
    #[error("Invalid period: start {start} is after end {end}")]
    InvalidRange {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },

    /// Month outside 1..=12.
    #[error("Month must be between 1 and 12, got {0}")]
    InvalidMonth(u32),

    /// Year cannot be represented as a calendar date.
    #[error("Year {0} is out of the supported date range")]
    DateOutOfRange(i32),

    /// Period text does not match the expected shape.
    #[error("Invalid period format: {0}")]
    InvalidFormat(String),

    /// Period type is neither YEAR nor MONTH.
    #[error("Unknown period type: {0}")]
    UnknownPeriodType(String),
}

impl PeriodError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidRange { .. } => "INVALID_PERIOD_RANGE",
            Self::InvalidMonth(_) => "INVALID_MONTH",
            Self::DateOutOfRange(_) => "DATE_OUT_OF_RANGE",
            Self::InvalidFormat(_) => "INVALID_PERIOD_FORMAT",
            Self::UnknownPeriodType(_) => "UNKNOWN_PERIOD_TYPE",
        }
    }
}
