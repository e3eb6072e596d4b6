//! Month-by-month pivot of the expense tree.

use std::collections::BTreeMap;

use chrono::Datelike;
use keelbook_shared::types::Currency;
use rust_decimal::Decimal;
use tracing::debug;

use super::error::ReportError;
use super::grouping::{
    ReferenceDimension, ResolvedReferences, ZERO_AMOUNT, ensure_currency, group_by,
    resolve_label,
};
use super::types::{NodeType, PivotTreeNode, PivotTreeReport, TOTAL_COLUMN};
use crate::dimension::{DimensionKey, DimensionLookup};
use crate::fiscal::Period;
use crate::ledger::Entry;

/// Builds [`PivotTreeReport`]s for a calendar year.
///
/// Rows follow the same classification / category / actor hierarchy as the
/// expense tree. Each row carries one column per month plus `TOTAL`, and
/// siblings are ordered by `TOTAL`, largest first.
#[derive(Debug, Clone)]
pub struct PivotTableBuilder<L> {
    lookup: L,
    currency: Currency,
}

impl<L: DimensionLookup> PivotTableBuilder<L> {
    /// Creates a builder resolving names through `lookup`.
    pub const fn new(lookup: L, currency: Currency) -> Self {
        Self { lookup, currency }
    }

    /// Builds the pivot over the expenses booked in `year`.
    pub fn build(&self, entries: &[Entry], year: i32) -> Result<PivotTreeReport, ReportError> {
        let period = Period::of_year(year)?;
        let expenses: Vec<&Entry> = entries
            .iter()
            .filter(|e| e.is_expense() && period.contains(e.date))
            .collect();
        ensure_currency(&expenses, self.currency)?;

        let columns = month_columns(year);
        let column_totals = monthly_values(&expenses, &columns);
        let refs = ResolvedReferences::load(&self.lookup, &expenses);
        let ctx = PivotContext {
            columns: &columns,
            refs: &refs,
        };
        let rows = ctx.main_category_nodes(&expenses);

        debug!(
            year,
            expenses = expenses.len(),
            rows = rows.len(),
            "Pivot tree built"
        );

        Ok(PivotTreeReport {
            year,
            currency: self.currency,
            columns,
            column_totals,
            rows,
        })
    }
}

/// `YYYY-01` through `YYYY-12`, then `TOTAL`.
#[must_use]
pub fn month_columns(year: i32) -> Vec<String> {
    (1..=12)
        .map(|month| column_key(year, month))
        .chain(std::iter::once(TOTAL_COLUMN.to_string()))
        .collect()
}

fn column_key(year: i32, month: u32) -> String {
    format!("{year:04}-{month:02}")
}

fn monthly_values(entries: &[&Entry], columns: &[String]) -> BTreeMap<String, Decimal> {
    let mut values: BTreeMap<String, Decimal> = columns
        .iter()
        .map(|column| (column.clone(), ZERO_AMOUNT))
        .collect();

    for entry in entries {
        let amount = entry.base_amount.amount();
        let month = column_key(entry.date.year(), entry.date.month());
        *values.entry(month).or_insert(ZERO_AMOUNT) += amount;
        *values
            .entry(TOTAL_COLUMN.to_string())
            .or_insert(ZERO_AMOUNT) += amount;
    }

    values
}

struct PivotContext<'a> {
    columns: &'a [String],
    refs: &'a ResolvedReferences,
}

impl PivotContext<'_> {
    fn main_category_nodes(&self, entries: &[&Entry]) -> Vec<PivotTreeNode> {
        let nodes = group_by(entries, |e| DimensionKey::from(e.classification_id))
            .into_iter()
            .map(|(key, group)| {
                let row_key = key.segment();
                let (name, is_technical) = resolve_label(
                    ReferenceDimension::MainCategory,
                    key,
                    &self.refs.classifications,
                );
                let children = self.category_nodes(&group, &row_key);
                self.node(
                    row_key,
                    NodeType::MainCategory,
                    key.id().map(|id| id.to_string()),
                    name,
                    is_technical,
                    &group,
                    children,
                )
            })
            .collect();
        sorted(nodes)
    }

    fn category_nodes(&self, entries: &[&Entry], parent_key: &str) -> Vec<PivotTreeNode> {
        let nodes = group_by(entries, |e| e.category_id)
            .into_iter()
            .map(|(category_id, group)| {
                let row_key = format!("{parent_key}-{category_id}");
                let first = group[0];
                let children = self.who_nodes(&group, &row_key);
                self.node(
                    row_key,
                    NodeType::Category,
                    Some(category_id.to_string()),
                    first.category_name.clone(),
                    Some(first.category_is_technical),
                    &group,
                    children,
                )
            })
            .collect();
        sorted(nodes)
    }

    fn who_nodes(&self, entries: &[&Entry], parent_key: &str) -> Vec<PivotTreeNode> {
        let nodes = group_by(entries, |e| DimensionKey::from(e.actor_id))
            .into_iter()
            .map(|(key, group)| {
                let (name, is_technical) =
                    resolve_label(ReferenceDimension::Who, key, &self.refs.actors);
                self.node(
                    format!("{parent_key}-{}", key.segment()),
                    NodeType::Who,
                    key.id().map(|id| id.to_string()),
                    name,
                    is_technical,
                    &group,
                    Vec::new(),
                )
            })
            .collect();
        sorted(nodes)
    }

    #[allow(clippy::too_many_arguments)]
    fn node(
        &self,
        key: String,
        node_type: NodeType,
        id: Option<String>,
        name: String,
        is_technical: Option<bool>,
        entries: &[&Entry],
        children: Vec<PivotTreeNode>,
    ) -> PivotTreeNode {
        PivotTreeNode {
            key,
            level: node_type.level(),
            node_type,
            id,
            name,
            is_technical,
            monthly_values: monthly_values(entries, self.columns),
            children,
        }
    }
}

fn sorted(mut nodes: Vec<PivotTreeNode>) -> Vec<PivotTreeNode> {
    nodes.sort_by_key(|node| std::cmp::Reverse(node.total()));
    nodes
}
