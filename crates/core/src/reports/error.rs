//! Report error types.

use keelbook_shared::types::{Currency, EntryId};
use thiserror::Error;

use crate::fiscal::PeriodError;

/// Errors that can occur during report generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    /// The requested period is invalid.
    #[error(transparent)]
    Period(#[from] PeriodError),

    /// An entry is not in the report currency.
    #[error("Mixed currencies in report input: expected {expected}, found {found}")]
    MixedCurrencies {
        /// Report currency.
        expected: Currency,
        /// Currency of the offending entry.
        found: Currency,
    },

    /// An entry row has no base-currency amount yet.
    #[error("Entry {0} has no base currency amount")]
    MissingBaseAmount(EntryId),
}

impl ReportError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Period(inner) => inner.error_code(),
            Self::MixedCurrencies { .. } => "MIXED_CURRENCIES",
            Self::MissingBaseAmount(_) => "MISSING_BASE_AMOUNT",
        }
    }
}
