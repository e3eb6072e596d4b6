//! Category-by-month reports with running balance.

use std::collections::BTreeMap;

use keelbook_shared::types::Currency;
use rust_decimal::Decimal;
use tracing::debug;

use super::error::ReportError;
use super::grouping::{ZERO_AMOUNT, ensure_currency};
use super::types::{AnnualReport, MonthlyBreakdown, MonthlyTotal, PeriodReport, ReportTotals};
use crate::fiscal::Period;
use crate::ledger::{Entry, EntryKind};

type MonthBuckets = [Decimal; 12];

const EMPTY_BUCKETS: MonthBuckets = [ZERO_AMOUNT; 12];

/// Generates annual and period reports.
///
/// Entries are bucketed by month number, so a period spanning more than one
/// year folds equal months of different years into the same bucket.
#[derive(Debug, Clone, Copy)]
pub struct LinearReportGenerator {
    currency: Currency,
}

impl LinearReportGenerator {
    /// Creates a generator for amounts in `currency`.
    #[must_use]
    pub const fn new(currency: Currency) -> Self {
        Self { currency }
    }

    /// Report for the calendar year `year`.
    pub fn generate_annual_report(
        &self,
        entries: &[Entry],
        year: i32,
    ) -> Result<AnnualReport, ReportError> {
        let period = Period::of_year(year)?;
        let report = self.generate_period_report(entries, &period)?;
        Ok(AnnualReport { year, report })
    }

    /// Report for an arbitrary period. Entries outside it are ignored.
    pub fn generate_period_report(
        &self,
        entries: &[Entry],
        period: &Period,
    ) -> Result<PeriodReport, ReportError> {
        let filtered: Vec<&Entry> = entries.iter().filter(|e| period.contains(e.date)).collect();
        ensure_currency(&filtered, self.currency)?;

        let category_breakdowns = category_breakdowns(&filtered);
        let monthly_totals = monthly_totals(&filtered);

        let total_income = monthly_totals
            .iter()
            .fold(ZERO_AMOUNT, |acc, m| acc + m.income);
        let total_expense = monthly_totals
            .iter()
            .fold(ZERO_AMOUNT, |acc, m| acc + m.expense);
        let grand_total = category_breakdowns
            .iter()
            .fold(ZERO_AMOUNT, |acc, b| acc + b.total);

        debug!(
            period = %period,
            entries = filtered.len(),
            categories = category_breakdowns.len(),
            "Period report generated"
        );

        Ok(PeriodReport {
            period: *period,
            currency: self.currency,
            category_breakdowns,
            monthly_totals,
            totals: ReportTotals {
                total_income,
                total_expense,
                grand_total,
                remaining_money: total_income - grand_total,
            },
        })
    }
}

fn bucket(entry: &Entry) -> usize {
    // month() is always 1..=12
    entry.month() as usize - 1
}

fn category_breakdowns(entries: &[&Entry]) -> Vec<MonthlyBreakdown> {
    let mut by_name: BTreeMap<&str, MonthBuckets> = BTreeMap::new();

    for entry in entries.iter().filter(|e| e.is_expense()) {
        let buckets = by_name
            .entry(entry.category_name.as_str())
            .or_insert(EMPTY_BUCKETS);
        buckets[bucket(entry)] += entry.base_amount.amount();
    }

    by_name
        .into_iter()
        .map(|(name, buckets)| MonthlyBreakdown {
            category_name: name.to_string(),
            total: buckets.iter().fold(ZERO_AMOUNT, |acc, v| acc + v),
            monthly_amounts: (1..=12).zip(buckets).collect(),
        })
        .collect()
}

fn monthly_totals(entries: &[&Entry]) -> Vec<MonthlyTotal> {
    let mut income = EMPTY_BUCKETS;
    let mut expense = EMPTY_BUCKETS;

    for entry in entries {
        let slot = bucket(entry);
        match entry.kind {
            EntryKind::Income => income[slot] += entry.base_amount.amount(),
            EntryKind::Expense => expense[slot] += entry.base_amount.amount(),
        }
    }

    let mut cumulative = ZERO_AMOUNT;
    (1..=12)
        .zip(income.into_iter().zip(expense))
        .map(|(month, (month_income, month_expense))| {
            cumulative += month_income - month_expense;
            MonthlyTotal {
                month,
                income: month_income,
                expense: month_expense,
                cumulative,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::test_support::{EntryBuilder, eur};
    use chrono::NaiveDate;
    use keelbook_shared::types::CategoryId;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn generator() -> LinearReportGenerator {
        LinearReportGenerator::new(Currency::EUR)
    }

    fn sample_entries() -> Vec<Entry> {
        let cat_a = CategoryId::new();
        vec![
            EntryBuilder::income(date(2025, 1, 15), dec!(1000)).build(),
            EntryBuilder::expense(date(2025, 1, 20), dec!(500))
                .category(cat_a, "A")
                .build(),
            EntryBuilder::expense(date(2025, 2, 10), dec!(300))
                .category(cat_a, "A")
                .build(),
        ]
    }

    #[test]
    fn test_annual_report_worked_example() {
        let report = generator()
            .generate_annual_report(&sample_entries(), 2025)
            .unwrap();

        assert_eq!(report.year, 2025);
        assert_eq!(report.report.totals.total_income, dec!(1000));
        assert_eq!(report.report.totals.grand_total, dec!(800));
        assert_eq!(report.report.totals.remaining_money, dec!(200));
        assert_eq!(report.total_expense(), dec!(800));
        assert_eq!(report.net_balance(), dec!(200));

        let a = report.report.breakdown("A").unwrap();
        assert_eq!(a.total, dec!(800));
        assert_eq!(a.monthly_amounts[&1], dec!(500));
        assert_eq!(a.monthly_amounts[&2], dec!(300));
        assert_eq!(a.monthly_amounts[&3], dec!(0));

        assert_eq!(report.report.month(1).unwrap().cumulative, dec!(500));
        assert_eq!(report.report.month(2).unwrap().cumulative, dec!(200));
        assert_eq!(report.report.month(12).unwrap().cumulative, dec!(200));
    }

    #[test]
    fn test_empty_input_yields_zero_shaped_report() {
        let report = generator().generate_annual_report(&[], 2025).unwrap();

        assert!(report.report.category_breakdowns.is_empty());
        assert_eq!(report.report.monthly_totals.len(), 12);
        assert!(report.report.monthly_totals.iter().all(|m| {
            m.income.is_zero() && m.expense.is_zero() && m.cumulative.is_zero()
        }));
        assert_eq!(report.report.totals.grand_total, dec!(0));
        assert_eq!(report.report.totals.remaining_money, dec!(0));
    }

    #[test]
    fn test_out_of_period_entries_are_ignored() {
        let mut entries = sample_entries();
        entries.push(EntryBuilder::expense(date(2024, 12, 31), dec!(999)).build());
        entries.push(EntryBuilder::income(date(2026, 1, 1), dec!(999)).build());

        let report = generator().generate_annual_report(&entries, 2025).unwrap();
        assert_eq!(report.report.totals.total_income, dec!(1000));
        assert_eq!(report.report.totals.grand_total, dec!(800));
    }

    #[test]
    fn test_breakdown_groups_by_name_and_sorts() {
        let entries = vec![
            EntryBuilder::expense(date(2025, 3, 1), dec!(10))
                .category(CategoryId::new(), "Fuel")
                .build(),
            EntryBuilder::expense(date(2025, 3, 2), dec!(20))
                .category(CategoryId::new(), "Crew")
                .build(),
            // Different id, same name: merged.
            EntryBuilder::expense(date(2025, 4, 2), dec!(5))
                .category(CategoryId::new(), "Fuel")
                .build(),
        ];

        let report = generator().generate_annual_report(&entries, 2025).unwrap();
        let names: Vec<&str> = report
            .report
            .category_breakdowns
            .iter()
            .map(|b| b.category_name.as_str())
            .collect();
        assert_eq!(names, ["Crew", "Fuel"]);

        let fuel = report.report.breakdown("Fuel").unwrap();
        assert_eq!(fuel.total, dec!(15));
        assert_eq!(fuel.monthly_amounts.len(), 12);
    }

    #[test]
    fn test_income_is_not_in_breakdown() {
        let entries = vec![EntryBuilder::income(date(2025, 5, 1), dec!(100)).build()];
        let report = generator().generate_annual_report(&entries, 2025).unwrap();

        assert!(report.report.category_breakdowns.is_empty());
        assert_eq!(report.report.totals.remaining_money, dec!(100));
    }

    #[test]
    fn test_period_report_spanning_years_merges_months() {
        let entries = vec![
            EntryBuilder::expense(date(2024, 12, 10), dec!(40)).build(),
            EntryBuilder::expense(date(2025, 12, 10), dec!(60)).build(),
        ];
        let period = Period::new(date(2024, 1, 1), date(2025, 12, 31)).unwrap();

        let report = generator().generate_period_report(&entries, &period).unwrap();
        assert_eq!(report.monthly_totals.len(), 12);
        assert_eq!(report.month(12).unwrap().expense, dec!(100));
    }

    #[test]
    fn test_mixed_currency_is_rejected() {
        let entries = vec![
            EntryBuilder::income(date(2025, 1, 1), dec!(10)).build(),
            EntryBuilder::income(date(2025, 1, 2), dec!(10))
                .amount(eur(dec!(10)).convert_using(dec!(1), Currency::USD).unwrap())
                .build(),
        ];

        let err = generator()
            .generate_annual_report(&entries, 2025)
            .unwrap_err();
        assert_eq!(
            err,
            ReportError::MixedCurrencies {
                expected: Currency::EUR,
                found: Currency::USD,
            }
        );
    }

    #[test]
    fn test_invalid_year_is_reported() {
        let err = generator().generate_annual_report(&[], i32::MAX).unwrap_err();
        assert!(matches!(err, ReportError::Period(_)));
    }
}
