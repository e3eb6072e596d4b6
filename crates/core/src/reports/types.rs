//! Report data types.

use std::collections::BTreeMap;

use keelbook_shared::types::Currency;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::fiscal::Period;

/// Name of the pivot column holding the row total.
pub const TOTAL_COLUMN: &str = "TOTAL";

// ============================================================================
// Linear reports
// ============================================================================

/// Expense amounts of one category, month by month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyBreakdown {
    /// Category display name.
    pub category_name: String,
    /// Month number (1..=12) to amount. All twelve months are present.
    pub monthly_amounts: BTreeMap<u32, Decimal>,
    /// Sum over all months.
    pub total: Decimal,
}

/// Income and expense of one month with the running balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyTotal {
    /// Month number (1..=12).
    pub month: u32,
    /// Income booked in the month.
    pub income: Decimal,
    /// Expense booked in the month.
    pub expense: Decimal,
    /// Running `income - expense` from January through this month.
    pub cumulative: Decimal,
}

/// Report-level totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportTotals {
    /// Sum of all income.
    pub total_income: Decimal,
    /// Sum of all expenses.
    pub total_expense: Decimal,
    /// Sum of the category breakdown totals.
    pub grand_total: Decimal,
    /// `total_income - grand_total`.
    pub remaining_money: Decimal,
}

/// Category breakdown and monthly totals for an arbitrary period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodReport {
    /// Reported period.
    pub period: Period,
    /// Report currency.
    pub currency: Currency,
    /// Expense breakdown per category, sorted by name.
    pub category_breakdowns: Vec<MonthlyBreakdown>,
    /// Twelve monthly totals, January first.
    pub monthly_totals: Vec<MonthlyTotal>,
    /// Totals.
    pub totals: ReportTotals,
}

impl PeriodReport {
    /// Sum of all expenses.
    #[must_use]
    pub fn total_expense(&self) -> Decimal {
        self.totals.total_expense
    }

    /// Income minus expense.
    #[must_use]
    pub fn net_balance(&self) -> Decimal {
        self.totals.total_income - self.totals.total_expense
    }

    /// Breakdown of the named category, if it has expenses.
    #[must_use]
    pub fn breakdown(&self, category_name: &str) -> Option<&MonthlyBreakdown> {
        self.category_breakdowns
            .iter()
            .find(|b| b.category_name == category_name)
    }

    /// Totals of the given month (1..=12).
    #[must_use]
    pub fn month(&self, month: u32) -> Option<&MonthlyTotal> {
        self.monthly_totals.iter().find(|m| m.month == month)
    }
}

/// A [`PeriodReport`] covering one calendar year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnualReport {
    /// Reported year.
    pub year: i32,
    /// Report body.
    #[serde(flatten)]
    pub report: PeriodReport,
}

impl AnnualReport {
    /// Sum of all expenses.
    #[must_use]
    pub fn total_expense(&self) -> Decimal {
        self.report.total_expense()
    }

    /// Income minus expense.
    #[must_use]
    pub fn net_balance(&self) -> Decimal {
        self.report.net_balance()
    }
}

// ============================================================================
// Tree reports
// ============================================================================

/// Tree level a node belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeType {
    /// Level 1: main-category classification.
    MainCategory,
    /// Level 2: category.
    Category,
    /// Level 3: actor.
    Who,
}

impl NodeType {
    /// Depth in the tree, starting at 1.
    #[must_use]
    pub const fn level(self) -> u8 {
        match self {
            Self::MainCategory => 1,
            Self::Category => 2,
            Self::Who => 3,
        }
    }
}

/// A node of the expense tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    /// Depth (1..=3).
    pub level: u8,
    /// Node type.
    pub node_type: NodeType,
    /// Referenced id; `None` for the unassigned group.
    pub id: Option<String>,
    /// Display name.
    pub name: String,
    /// Sum of the node's expenses.
    pub amount: Decimal,
    /// Share of the parent amount, in percent.
    pub percentage: Decimal,
    /// Technical flag of the referenced row; `None` when unresolved.
    pub is_technical: Option<bool>,
    /// Number of direct children.
    pub child_count: usize,
    /// Children, largest amount first.
    pub children: Vec<TreeNode>,
}

/// Three-level expense tree for a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseTreeReport {
    /// Reported period.
    pub period: Period,
    /// Report currency.
    pub currency: Currency,
    /// Sum of all expenses in the period.
    pub total_amount: Decimal,
    /// Level-1 nodes, largest amount first.
    pub rows: Vec<TreeNode>,
}

/// A node of the pivot tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PivotTreeNode {
    /// Composite row key, unique within the report.
    pub key: String,
    /// Depth (1..=3).
    pub level: u8,
    /// Node type.
    pub node_type: NodeType,
    /// Referenced id; `None` for the unassigned group.
    pub id: Option<String>,
    /// Display name.
    pub name: String,
    /// Technical flag of the referenced row; `None` when unresolved.
    pub is_technical: Option<bool>,
    /// Column (`YYYY-MM` or `TOTAL`) to amount.
    pub monthly_values: BTreeMap<String, Decimal>,
    /// Children, largest total first.
    pub children: Vec<PivotTreeNode>,
}

impl PivotTreeNode {
    /// Value of the `TOTAL` column.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.monthly_values
            .get(TOTAL_COLUMN)
            .copied()
            .unwrap_or_default()
    }
}

/// Month-by-month expense tree for a calendar year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PivotTreeReport {
    /// Reported year.
    pub year: i32,
    /// Report currency.
    pub currency: Currency,
    /// The twelve month columns followed by `TOTAL`.
    pub columns: Vec<String>,
    /// Column totals over all expenses of the year.
    pub column_totals: BTreeMap<String, Decimal>,
    /// Level-1 nodes, largest total first.
    pub rows: Vec<PivotTreeNode>,
}
