//! Income/expense summary for a period.

use keelbook_shared::types::Currency;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::fiscal::Period;
use crate::ledger::{Entry, EntryKind};
use crate::reports::ReportError;
use crate::reports::grouping::{ZERO_AMOUNT, ensure_currency};

/// Headline figures for a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// Summarized period.
    pub period: Period,
    /// Currency of all amounts.
    pub currency: Currency,
    /// Sum of income.
    pub total_income: Decimal,
    /// Sum of expenses.
    pub total_expense: Decimal,
    /// `total_income - total_expense`.
    pub balance: Decimal,
    /// Number of income entries.
    pub income_count: usize,
    /// Number of expense entries.
    pub expense_count: usize,
}

impl DashboardSummary {
    /// Summarizes the entries booked inside `period`.
    pub fn from_entries(
        entries: &[Entry],
        period: &Period,
        currency: Currency,
    ) -> Result<Self, ReportError> {
        let in_period: Vec<&Entry> = entries.iter().filter(|e| period.contains(e.date)).collect();
        ensure_currency(&in_period, currency)?;

        let mut total_income = ZERO_AMOUNT;
        let mut total_expense = ZERO_AMOUNT;
        let mut income_count = 0;
        let mut expense_count = 0;

        for entry in &in_period {
            match entry.kind {
                EntryKind::Income => {
                    total_income += entry.base_amount.amount();
                    income_count += 1;
                }
                EntryKind::Expense => {
                    total_expense += entry.base_amount.amount();
                    expense_count += 1;
                }
            }
        }

        debug!(period = %period, income_count, expense_count, "Dashboard summary computed");

        Ok(Self {
            period: *period,
            currency,
            total_income,
            total_expense,
            balance: total_income - total_expense,
            income_count,
            expense_count,
        })
    }

    /// Income exceeded expenses.
    #[must_use]
    pub fn is_profit(&self) -> bool {
        self.balance > Decimal::ZERO
    }

    /// Expenses exceeded income.
    #[must_use]
    pub fn is_loss(&self) -> bool {
        self.balance < Decimal::ZERO
    }
}
