//! Property-based tests for `Money` arithmetic.

use proptest::prelude::*;
use rust_decimal::{Decimal, RoundingStrategy};

use super::currency::Currency;
use super::money::Money;
use crate::error::MoneyError;

/// Amounts from 0.00 to 1,000,000.00.
fn cents() -> impl Strategy<Value = i64> {
    0i64..100_000_000i64
}

/// Scalars with up to 4 decimals, 0.0001 to 1,000.0000.
fn scalar() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|v| Decimal::new(v, 4))
}

fn other_currency() -> impl Strategy<Value = Currency> {
    prop_oneof![Just(Currency::USD), Just(Currency::GBP), Just(Currency::TRY)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Addition is exact, keeps the currency and the two-decimal scale.
    #[test]
    fn prop_add_preserves_currency_and_scale(a in cents(), b in cents()) {
        let left = Money::of_minor(a, "EUR").unwrap();
        let right = Money::of_minor(b, "EUR").unwrap();

        let sum = left.add(&right).unwrap();

        prop_assert_eq!(sum.currency(), Currency::EUR);
        prop_assert_eq!(sum.amount(), Decimal::new(a + b, 2));
        prop_assert_eq!(sum.amount().scale(), 2);
    }

    /// Subtracting what was added restores the original value.
    #[test]
    fn prop_add_then_subtract_roundtrips(a in cents(), b in cents()) {
        let left = Money::of_minor(a, "EUR").unwrap();
        let right = Money::of_minor(b, "EUR").unwrap();

        let back = left.add(&right).unwrap().subtract(&right).unwrap();
        prop_assert_eq!(back, left);
    }

    /// Multiplication always lands on two decimals, rounded half-even.
    #[test]
    fn prop_multiply_rounds_half_even(a in cents(), factor in scalar()) {
        let money = Money::of_minor(a, "EUR").unwrap();
        let product = money.multiply(factor).unwrap();

        let expected = (Decimal::new(a, 2) * factor)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);
        prop_assert_eq!(product.amount(), expected);
        prop_assert_eq!(product.amount().scale(), 2);
    }

    /// Conversion always produces a two-decimal amount in the target currency.
    #[test]
    fn prop_convert_targets_currency(a in cents(), rate in scalar(), target in other_currency()) {
        let money = Money::of_minor(a, "EUR").unwrap();
        let converted = money.convert_using(rate, target).unwrap();

        prop_assert_eq!(converted.currency(), target);
        prop_assert_eq!(converted.amount().scale(), 2);
    }

    /// Any binary operation across currencies fails with a mismatch.
    #[test]
    fn prop_cross_currency_always_fails(a in cents(), b in cents(), other in other_currency()) {
        let left = Money::of_minor(a, "EUR").unwrap();
        let right = Money::with_currency(Decimal::new(b, 2), other).unwrap();

        let is_mismatch = |r: &Result<Money, MoneyError>| {
            matches!(r, Err(MoneyError::CurrencyMismatch { .. }))
        };
        prop_assert!(is_mismatch(&left.add(&right)));
        prop_assert!(is_mismatch(&left.subtract(&right)));
        let comparison_mismatch = matches!(
            left.is_greater_than(&right),
            Err(MoneyError::CurrencyMismatch { .. })
        );
        prop_assert!(comparison_mismatch);
    }
}
