//! Errors raised by the monetary value types.

use rust_decimal::Decimal;
use thiserror::Error;

/// Contract violations raised by `Money` and `Currency`.
///
/// None of these are recoverable locally; they signal bad input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    /// Currency code is not a known ISO 4217 code.
    #[error("Invalid currency code: {0}")]
    InvalidCurrency(String),

    /// Amount text could not be parsed as a decimal.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Amount cannot be negative.
    #[error("Amount cannot be negative: {0}")]
    NegativeAmount(Decimal),

    /// Binary operation between two different currencies.
    #[error("Currency mismatch: {left} vs {right}")]
    CurrencyMismatch {
        /// Currency of the receiver.
        left: String,
        /// Currency of the other operand.
        right: String,
    },

    /// Division by a zero scalar.
    #[error("Cannot divide by zero")]
    DivisionByZero,

    /// Exchange rate must be strictly positive.
    #[error("Exchange rate must be positive, got {0}")]
    InvalidExchangeRate(Decimal),

    /// Result does not fit in a `Decimal`.
    #[error("Arithmetic overflow in {0}")]
    Overflow(&'static str),
}

impl MoneyError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCurrency(_) => "INVALID_CURRENCY",
            Self::InvalidAmount(_) => "INVALID_AMOUNT",
            Self::NegativeAmount(_) => "NEGATIVE_AMOUNT",
            Self::CurrencyMismatch { .. } => "CURRENCY_MISMATCH",
            Self::DivisionByZero => "DIVISION_BY_ZERO",
            Self::InvalidExchangeRate(_) => "INVALID_EXCHANGE_RATE",
            Self::Overflow(_) => "ARITHMETIC_OVERFLOW",
        }
    }
}
