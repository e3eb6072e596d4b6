//! Money type with decimal precision and currency.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! This type wraps `rust_decimal::Decimal` for arbitrary precision and keeps
//! every amount at a fixed scale of two decimals using banker's rounding.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::currency::Currency;
use crate::error::MoneyError;

/// Number of decimal places every amount is stored with.
pub const MONEY_SCALE: u32 = 2;

/// Rounds to the money scale with round-half-to-even, padding to exactly two
/// decimals.
#[must_use]
pub fn round_money(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointNearestEven);
    rounded.rescale(MONEY_SCALE);
    rounded
}

/// A non-negative monetary amount in a single ISO 4217 currency.
///
/// All arithmetic returns a new value; operations between two `Money` values
/// require the same currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "MoneyRepr")]
pub struct Money {
    amount: Decimal,
    currency: Currency,
}

/// Wire shape used to validate `Money` on deserialization.
#[derive(Deserialize)]
struct MoneyRepr {
    amount: Decimal,
    currency: String,
}

impl TryFrom<MoneyRepr> for Money {
    type Error = MoneyError;

    fn try_from(repr: MoneyRepr) -> Result<Self, Self::Error> {
        Self::new(repr.amount, &repr.currency)
    }
}

impl Money {
    /// Creates a new Money from an amount and a currency code.
    ///
    /// Fails if the amount is negative or the code is not ISO 4217.
    pub fn new(amount: Decimal, currency_code: &str) -> Result<Self, MoneyError> {
        let currency = Currency::parse(currency_code)?;
        Self::with_currency(amount, currency)
    }

    /// Creates a new Money in an already validated currency.
    pub fn with_currency(amount: Decimal, currency: Currency) -> Result<Self, MoneyError> {
        if amount < Decimal::ZERO {
            return Err(MoneyError::NegativeAmount(amount));
        }
        Ok(Self {
            amount: round_money(amount),
            currency,
        })
    }

    /// Parses a decimal string such as `"1250.5"`.
    pub fn of(amount: &str, currency_code: &str) -> Result<Self, MoneyError> {
        let parsed: Decimal = amount
            .trim()
            .parse()
            .map_err(|_| MoneyError::InvalidAmount(amount.to_string()))?;
        Self::new(parsed, currency_code)
    }

    /// Creates Money from whole currency units.
    pub fn of_major(units: i64, currency_code: &str) -> Result<Self, MoneyError> {
        Self::new(Decimal::from(units), currency_code)
    }

    /// Creates Money from minor units (cents).
    pub fn of_minor(minor: i64, currency_code: &str) -> Result<Self, MoneyError> {
        Self::new(Decimal::new(minor, MONEY_SCALE), currency_code)
    }

    /// Creates a zero amount in the specified currency.
    #[must_use]
    pub fn zero(currency: Currency) -> Self {
        Self {
            amount: round_money(Decimal::ZERO),
            currency,
        }
    }

    /// The amount, always at scale 2.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.amount
    }

    /// The currency.
    #[must_use]
    pub const fn currency(&self) -> Currency {
        self.currency
    }

    /// Adds another amount in the same currency.
    pub fn add(&self, other: &Self) -> Result<Self, MoneyError> {
        self.ensure_same_currency(other)?;
        let sum = self
            .amount
            .checked_add(other.amount)
            .ok_or(MoneyError::Overflow("add"))?;
        Self::with_currency(sum, self.currency)
    }

    /// Subtracts another amount in the same currency.
    ///
    /// Fails with `NegativeAmount` if the result would drop below zero.
    pub fn subtract(&self, other: &Self) -> Result<Self, MoneyError> {
        self.ensure_same_currency(other)?;
        let difference = self
            .amount
            .checked_sub(other.amount)
            .ok_or(MoneyError::Overflow("subtract"))?;
        Self::with_currency(difference, self.currency)
    }

    /// Multiplies by a scalar, re-rounding half-even.
    pub fn multiply(&self, multiplier: Decimal) -> Result<Self, MoneyError> {
        let product = self
            .amount
            .checked_mul(multiplier)
            .ok_or(MoneyError::Overflow("multiply"))?;
        Self::with_currency(product, self.currency)
    }

    /// Divides by a scalar, re-rounding half-even.
    pub fn divide(&self, divisor: Decimal) -> Result<Self, MoneyError> {
        if divisor.is_zero() {
            return Err(MoneyError::DivisionByZero);
        }
        let quotient = self
            .amount
            .checked_div(divisor)
            .ok_or(MoneyError::Overflow("divide"))?;
        Self::with_currency(quotient, self.currency)
    }

    /// Converts into `target` using `rate` (1 unit of this currency = `rate`
    /// units of the target), rounding the product half-even to 2 decimals.
    pub fn convert_using(&self, rate: Decimal, target: Currency) -> Result<Self, MoneyError> {
        if rate <= Decimal::ZERO {
            return Err(MoneyError::InvalidExchangeRate(rate));
        }
        let converted = self
            .amount
            .checked_mul(rate)
            .ok_or(MoneyError::Overflow("convert"))?;
        Self::with_currency(converted, target)
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Returns true if the amount is strictly positive.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    /// Returns true if the amount is negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.amount < Decimal::ZERO
    }

    /// `self > other`; both must share a currency.
    pub fn is_greater_than(&self, other: &Self) -> Result<bool, MoneyError> {
        self.ensure_same_currency(other)?;
        Ok(self.amount > other.amount)
    }

    /// `self >= other`; both must share a currency.
    pub fn is_greater_than_or_equal(&self, other: &Self) -> Result<bool, MoneyError> {
        self.ensure_same_currency(other)?;
        Ok(self.amount >= other.amount)
    }

    /// `self < other`; both must share a currency.
    pub fn is_less_than(&self, other: &Self) -> Result<bool, MoneyError> {
        self.ensure_same_currency(other)?;
        Ok(self.amount < other.amount)
    }

    /// `self <= other`; both must share a currency.
    pub fn is_less_than_or_equal(&self, other: &Self) -> Result<bool, MoneyError> {
        self.ensure_same_currency(other)?;
        Ok(self.amount <= other.amount)
    }

    /// Returns true if both values use the same currency.
    #[must_use]
    pub fn has_same_currency(&self, other: &Self) -> bool {
        self.currency == other.currency
    }

    /// Returns true if this value is denominated in `code` (case-insensitive).
    #[must_use]
    pub fn is_currency(&self, code: &str) -> bool {
        self.currency.matches(code)
    }

    /// Whole units, truncated toward zero. `None` if out of `i64` range.
    #[must_use]
    pub fn amount_major(&self) -> Option<i64> {
        self.amount.trunc().to_i64()
    }

    /// Minor units (cents). `None` if out of `i64` range.
    #[must_use]
    pub fn amount_minor(&self) -> Option<i64> {
        self.amount
            .checked_mul(Decimal::ONE_HUNDRED)?
            .trunc()
            .to_i64()
    }

    fn ensure_same_currency(&self, other: &Self) -> Result<(), MoneyError> {
        if self.has_same_currency(other) {
            Ok(())
        } else {
            Err(MoneyError::CurrencyMismatch {
                left: self.currency.to_string(),
                right: other.currency.to_string(),
            })
        }
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}
