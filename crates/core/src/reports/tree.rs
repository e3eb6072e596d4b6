//! Three-level expense tree: classification, category, actor.

use keelbook_shared::types::Currency;
use rust_decimal::Decimal;
use tracing::debug;

use super::error::ReportError;
use super::grouping::{
    ReferenceDimension, ResolvedReferences, ensure_currency, group_by, percentage_of,
    resolve_label, sum_amounts,
};
use super::types::{ExpenseTreeReport, NodeType, TreeNode};
use crate::dimension::{DimensionKey, DimensionLookup};
use crate::fiscal::Period;
use crate::ledger::Entry;

/// Builds [`ExpenseTreeReport`]s.
///
/// Every node's percentage is its share of the parent node; level-1 nodes
/// are measured against the period total. Siblings are ordered by amount,
/// largest first, ties keeping the order in which they were first seen.
#[derive(Debug, Clone)]
pub struct HierarchicalTreeBuilder<L> {
    lookup: L,
    currency: Currency,
}

impl<L: DimensionLookup> HierarchicalTreeBuilder<L> {
    /// Creates a builder resolving names through `lookup`.
    pub const fn new(lookup: L, currency: Currency) -> Self {
        Self { lookup, currency }
    }

    /// Builds the tree over the expenses inside `period`.
    pub fn build(
        &self,
        entries: &[Entry],
        period: &Period,
    ) -> Result<ExpenseTreeReport, ReportError> {
        let expenses: Vec<&Entry> = entries
            .iter()
            .filter(|e| e.is_expense() && period.contains(e.date))
            .collect();
        ensure_currency(&expenses, self.currency)?;

        let total_amount = sum_amounts(&expenses);
        let refs = ResolvedReferences::load(&self.lookup, &expenses);
        let rows = main_category_nodes(&expenses, total_amount, &refs);

        debug!(
            period = %period,
            expenses = expenses.len(),
            rows = rows.len(),
            "Expense tree built"
        );

        Ok(ExpenseTreeReport {
            period: *period,
            currency: self.currency,
            total_amount,
            rows,
        })
    }
}

fn main_category_nodes(
    entries: &[&Entry],
    total: Decimal,
    refs: &ResolvedReferences,
) -> Vec<TreeNode> {
    let nodes = group_by(entries, |e| DimensionKey::from(e.classification_id))
        .into_iter()
        .map(|(key, group)| {
            let amount = sum_amounts(&group);
            let (name, is_technical) =
                resolve_label(ReferenceDimension::MainCategory, key, &refs.classifications);
            tree_node(
                NodeType::MainCategory,
                key.id().map(|id| id.to_string()),
                name,
                is_technical,
                amount,
                percentage_of(amount, total),
                category_nodes(&group, amount, refs),
            )
        })
        .collect();
    sorted(nodes)
}

fn category_nodes(entries: &[&Entry], parent: Decimal, refs: &ResolvedReferences) -> Vec<TreeNode> {
    let nodes = group_by(entries, |e| e.category_id)
        .into_iter()
        .map(|(category_id, group)| {
            let amount = sum_amounts(&group);
            let first = group[0];
            tree_node(
                NodeType::Category,
                Some(category_id.to_string()),
                first.category_name.clone(),
                Some(first.category_is_technical),
                amount,
                percentage_of(amount, parent),
                who_nodes(&group, amount, refs),
            )
        })
        .collect();
    sorted(nodes)
}

fn who_nodes(entries: &[&Entry], parent: Decimal, refs: &ResolvedReferences) -> Vec<TreeNode> {
    let nodes = group_by(entries, |e| DimensionKey::from(e.actor_id))
        .into_iter()
        .map(|(key, group)| {
            let amount = sum_amounts(&group);
            let (name, is_technical) = resolve_label(ReferenceDimension::Who, key, &refs.actors);
            tree_node(
                NodeType::Who,
                key.id().map(|id| id.to_string()),
                name,
                is_technical,
                amount,
                percentage_of(amount, parent),
                Vec::new(),
            )
        })
        .collect();
    sorted(nodes)
}

fn tree_node(
    node_type: NodeType,
    id: Option<String>,
    name: String,
    is_technical: Option<bool>,
    amount: Decimal,
    percentage: Decimal,
    children: Vec<TreeNode>,
) -> TreeNode {
    TreeNode {
        level: node_type.level(),
        node_type,
        id,
        name,
        amount,
        percentage,
        is_technical,
        child_count: children.len(),
        children,
    }
}

fn sorted(mut nodes: Vec<TreeNode>) -> Vec<TreeNode> {
    nodes.sort_by(|a, b| b.amount.cmp(&a.amount));
    nodes
}
