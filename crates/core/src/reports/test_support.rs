//! Entry fixtures for report tests.

use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;
use keelbook_shared::types::{ActorId, CategoryId, ClassificationId, EntryId, Money};
use rust_decimal::Decimal;

use crate::dimension::{DimensionLookup, InMemoryDimensions, ReferenceRecord};
use crate::ledger::{Entry, EntryKind};

pub fn eur(amount: Decimal) -> Money {
    Money::new(amount, "EUR").unwrap()
}

pub fn reference(id: i64, name: &str, is_technical: bool) -> ReferenceRecord {
    ReferenceRecord {
        id,
        name: name.to_string(),
        is_technical,
    }
}

pub struct EntryBuilder {
    entry: Entry,
}

impl EntryBuilder {
    fn new(kind: EntryKind, date: NaiveDate, amount: Decimal) -> Self {
        Self {
            entry: Entry {
                id: EntryId::new(),
                date,
                kind,
                category_id: CategoryId::new(),
                category_name: "General".to_string(),
                category_is_technical: false,
                classification_id: None,
                actor_id: None,
                base_amount: eur(amount),
            },
        }
    }

    pub fn income(date: NaiveDate, amount: Decimal) -> Self {
        Self::new(EntryKind::Income, date, amount)
    }

    pub fn expense(date: NaiveDate, amount: Decimal) -> Self {
        Self::new(EntryKind::Expense, date, amount)
    }

    pub fn category(mut self, id: CategoryId, name: &str) -> Self {
        self.entry.category_id = id;
        self.entry.category_name = name.to_string();
        self
    }

    pub fn technical(mut self) -> Self {
        self.entry.category_is_technical = true;
        self
    }

    pub fn classification(mut self, id: i64) -> Self {
        self.entry.classification_id = Some(ClassificationId(id));
        self
    }

    pub fn actor(mut self, id: i64) -> Self {
        self.entry.actor_id = Some(ActorId(id));
        self
    }

    pub fn amount(mut self, amount: Money) -> Self {
        self.entry.base_amount = amount;
        self
    }

    pub fn build(self) -> Entry {
        self.entry
    }
}

/// Records every batch it is asked to resolve.
#[derive(Default)]
pub struct RecordingLookup {
    pub rows: InMemoryDimensions,
    pub classification_calls: RefCell<Vec<BTreeSet<ClassificationId>>>,
    pub actor_calls: RefCell<Vec<BTreeSet<ActorId>>>,
}

impl RecordingLookup {
    pub fn new(classifications: Vec<ReferenceRecord>, actors: Vec<ReferenceRecord>) -> Self {
        Self {
            rows: InMemoryDimensions::new(classifications, actors),
            ..Self::default()
        }
    }
}

impl DimensionLookup for RecordingLookup {
    fn resolve_classifications(
        &self,
        ids: &BTreeSet<ClassificationId>,
    ) -> HashMap<ClassificationId, ReferenceRecord> {
        self.classification_calls.borrow_mut().push(ids.clone());
        self.rows.resolve_classifications(ids)
    }

    fn resolve_actors(&self, ids: &BTreeSet<ActorId>) -> HashMap<ActorId, ReferenceRecord> {
        self.actor_calls.borrow_mut().push(ids.clone());
        self.rows.resolve_actors(ids)
    }
}
