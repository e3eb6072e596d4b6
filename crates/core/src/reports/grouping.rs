//! Grouping, labelling and percentage helpers shared by the generators.

use std::collections::{BTreeSet, HashMap};
use std::fmt::Display;
use std::hash::Hash;

use keelbook_shared::types::{ActorId, ClassificationId, Currency, MONEY_SCALE};
use rust_decimal::{Decimal, RoundingStrategy};

use super::error::ReportError;
use crate::dimension::{DimensionKey, DimensionLookup, ReferenceRecord};
use crate::ledger::Entry;

/// Zero at money scale, so empty buckets serialize like filled ones.
pub const ZERO_AMOUNT: Decimal = Decimal::from_parts(0, 0, 0, false, MONEY_SCALE);

/// Label of the level-1 group without a classification.
pub const UNASSIGNED_LABEL: &str = "Unassigned";

/// Label of the level-3 group without an actor.
pub const UNSPECIFIED_LABEL: &str = "Unspecified";

/// The two reference dimensions of the expense tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceDimension {
    /// Level-1 classification.
    MainCategory,
    /// Level-3 actor.
    Who,
}

impl ReferenceDimension {
    /// Name used in unknown-row placeholders.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::MainCategory => "MainCategory",
            Self::Who => "Who",
        }
    }

    /// Label of the group without a reference.
    #[must_use]
    pub const fn absent_label(self) -> &'static str {
        match self {
            Self::MainCategory => UNASSIGNED_LABEL,
            Self::Who => UNSPECIFIED_LABEL,
        }
    }
}

/// Display name and technical flag of a reference group.
///
/// Absent keys get the dimension's fixed label; ids without a loaded row get
/// an `Unknown <Dimension> (ID: x)` placeholder. Neither carries a flag.
pub fn resolve_label<I>(
    dimension: ReferenceDimension,
    key: DimensionKey<I>,
    rows: &HashMap<I, ReferenceRecord>,
) -> (String, Option<bool>)
where
    I: Copy + Eq + Hash + Display,
{
    match key {
        DimensionKey::Absent => (dimension.absent_label().to_string(), None),
        DimensionKey::Present(id) => rows.get(&id).map_or_else(
            || {
                (
                    format!("Unknown {} (ID: {id})", dimension.display_name()),
                    None,
                )
            },
            |row| (row.name.clone(), Some(row.is_technical)),
        ),
    }
}

/// Reference rows resolved for one report run.
#[derive(Debug, Default)]
pub struct ResolvedReferences {
    /// Classification rows by id.
    pub classifications: HashMap<ClassificationId, ReferenceRecord>,
    /// Actor rows by id.
    pub actors: HashMap<ActorId, ReferenceRecord>,
}

impl ResolvedReferences {
    /// Resolves the ids present among `entries`, one batch per dimension.
    ///
    /// A dimension with no ids is not queried at all.
    pub fn load<L: DimensionLookup>(lookup: &L, entries: &[&Entry]) -> Self {
        let classification_ids: BTreeSet<ClassificationId> =
            entries.iter().filter_map(|e| e.classification_id).collect();
        let actor_ids: BTreeSet<ActorId> = entries.iter().filter_map(|e| e.actor_id).collect();

        let classifications = if classification_ids.is_empty() {
            HashMap::new()
        } else {
            lookup.resolve_classifications(&classification_ids)
        };
        let actors = if actor_ids.is_empty() {
            HashMap::new()
        } else {
            lookup.resolve_actors(&actor_ids)
        };

        Self {
            classifications,
            actors,
        }
    }
}

/// Groups entries by `key`, keeping groups in first-seen order.
pub fn group_by<'a, K, F>(entries: &[&'a Entry], key: F) -> Vec<(K, Vec<&'a Entry>)>
where
    K: Eq + Hash + Copy,
    F: Fn(&Entry) -> K,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, Vec<&'a Entry>)> = Vec::new();

    for &entry in entries {
        let k = key(entry);
        if let Some(&slot) = index.get(&k) {
            groups[slot].1.push(entry);
        } else {
            index.insert(k, groups.len());
            groups.push((k, vec![entry]));
        }
    }

    groups
}

/// Sum of the base amounts.
pub fn sum_amounts(entries: &[&Entry]) -> Decimal {
    entries
        .iter()
        .fold(ZERO_AMOUNT, |acc, e| acc + e.base_amount.amount())
}

/// `part / whole * 100`, or zero when `whole` is zero.
///
/// The ratio is rounded half-up to 4 places before scaling, the result
/// half-up to 2 places and padded to exactly 2.
pub fn percentage_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        return ZERO_AMOUNT;
    }
    let ratio = (part / whole).round_dp_with_strategy(4, RoundingStrategy::MidpointAwayFromZero);
    let mut percentage = (ratio * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    percentage.rescale(2);
    percentage
}

/// Fails on the first entry whose base amount is not in `expected`.
pub fn ensure_currency(entries: &[&Entry], expected: Currency) -> Result<(), ReportError> {
    match entries
        .iter()
        .map(|e| e.base_amount.currency())
        .find(|found| *found != expected)
    {
        Some(found) => Err(ReportError::MixedCurrencies { expected, found }),
        None => Ok(()),
    }
}
