//! Financial entries as seen by the reporting engine.

use chrono::{Datelike, NaiveDate};
use keelbook_shared::types::{ActorId, CategoryId, ClassificationId, EntryId, Money};
use serde::{Deserialize, Serialize};

use crate::reports::ReportError;

/// Direction of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntryKind {
    /// Money received.
    Income,
    /// Money spent.
    Expense,
}

/// A single income or expense, already normalized into the base currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Entry ID.
    pub id: EntryId,
    /// Booking date.
    pub date: NaiveDate,
    /// Income or expense.
    pub kind: EntryKind,
    /// Category ID.
    pub category_id: CategoryId,
    /// Category display name.
    pub category_name: String,
    /// Whether the category is a technical (bookkeeping-only) one.
    pub category_is_technical: bool,
    /// Main-category classification, if any.
    pub classification_id: Option<ClassificationId>,
    /// Who the money went to or came from, if known.
    pub actor_id: Option<ActorId>,
    /// Amount in the base currency.
    pub base_amount: Money,
}

impl Entry {
    /// Returns true for income entries.
    #[must_use]
    pub fn is_income(&self) -> bool {
        self.kind == EntryKind::Income
    }

    /// Returns true for expense entries.
    #[must_use]
    pub fn is_expense(&self) -> bool {
        self.kind == EntryKind::Expense
    }

    /// Calendar month (1..=12) of the booking date.
    #[must_use]
    pub fn month(&self) -> u32 {
        self.date.month()
    }
}

/// A stored entry row. The base amount may be missing when the exchange rate
/// was not yet known at import time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryRecord {
    /// Entry ID.
    pub id: EntryId,
    /// Booking date.
    pub date: NaiveDate,
    /// Income or expense.
    pub kind: EntryKind,
    /// Category ID.
    pub category_id: CategoryId,
    /// Category display name.
    pub category_name: String,
    /// Technical category flag.
    #[serde(default)]
    pub category_is_technical: bool,
    /// Main-category classification.
    #[serde(default)]
    pub classification_id: Option<ClassificationId>,
    /// Actor.
    #[serde(default)]
    pub actor_id: Option<ActorId>,
    /// Amount in the base currency.
    #[serde(default)]
    pub base_amount: Option<Money>,
}

impl TryFrom<EntryRecord> for Entry {
    type Error = ReportError;

    fn try_from(record: EntryRecord) -> Result<Self, Self::Error> {
        let base_amount = record
            .base_amount
            .ok_or(ReportError::MissingBaseAmount(record.id))?;

        Ok(Self {
            id: record.id,
            date: record.date,
            kind: record.kind,
            category_id: record.category_id,
            category_name: record.category_name,
            category_is_technical: record.category_is_technical,
            classification_id: record.classification_id,
            actor_id: record.actor_id,
            base_amount,
        })
    }
}
