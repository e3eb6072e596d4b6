//! Batch resolution of reference rows.

use std::collections::{BTreeSet, HashMap};

use keelbook_shared::types::{ActorId, ClassificationId};
use serde::{Deserialize, Serialize};

/// A row of a reference table (classification or actor).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceRecord {
    /// Row key.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Technical (bookkeeping-only) flag.
    #[serde(default)]
    pub is_technical: bool,
}

/// Source of reference rows for the tree and pivot builders.
///
/// Each method receives exactly the ids present among the entries being
/// reported on and returns whatever rows it knows. Ids missing from the
/// returned map are rendered as unknown placeholders.
pub trait DimensionLookup {
    /// Resolves main-category classifications.
    fn resolve_classifications(
        &self,
        ids: &BTreeSet<ClassificationId>,
    ) -> HashMap<ClassificationId, ReferenceRecord>;

    /// Resolves actors.
    fn resolve_actors(&self, ids: &BTreeSet<ActorId>) -> HashMap<ActorId, ReferenceRecord>;
}

impl<T: DimensionLookup + ?Sized> DimensionLookup for &T {
    fn resolve_classifications(
        &self,
        ids: &BTreeSet<ClassificationId>,
    ) -> HashMap<ClassificationId, ReferenceRecord> {
        (**self).resolve_classifications(ids)
    }

    fn resolve_actors(&self, ids: &BTreeSet<ActorId>) -> HashMap<ActorId, ReferenceRecord> {
        (**self).resolve_actors(ids)
    }
}

/// Reference tables held in memory, e.g. loaded from a snapshot file.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDimensions {
    classifications: HashMap<ClassificationId, ReferenceRecord>,
    actors: HashMap<ActorId, ReferenceRecord>,
}

impl InMemoryDimensions {
    /// Builds the lookup from classification and actor rows.
    #[must_use]
    pub fn new(
        classifications: impl IntoIterator<Item = ReferenceRecord>,
        actors: impl IntoIterator<Item = ReferenceRecord>,
    ) -> Self {
        Self {
            classifications: classifications
                .into_iter()
                .map(|row| (ClassificationId(row.id), row))
                .collect(),
            actors: actors
                .into_iter()
                .map(|row| (ActorId(row.id), row))
                .collect(),
        }
    }

    /// Number of classification rows.
    #[must_use]
    pub fn classification_count(&self) -> usize {
        self.classifications.len()
    }

    /// Number of actor rows.
    #[must_use]
    pub fn actor_count(&self) -> usize {
        self.actors.len()
    }
}

fn pick<K: Copy + Ord + std::hash::Hash>(
    rows: &HashMap<K, ReferenceRecord>,
    ids: &BTreeSet<K>,
) -> HashMap<K, ReferenceRecord> {
    ids.iter()
        .filter_map(|id| rows.get(id).map(|row| (*id, row.clone())))
        .collect()
}

impl DimensionLookup for InMemoryDimensions {
    fn resolve_classifications(
        &self,
        ids: &BTreeSet<ClassificationId>,
    ) -> HashMap<ClassificationId, ReferenceRecord> {
        pick(&self.classifications, ids)
    }

    fn resolve_actors(&self, ids: &BTreeSet<ActorId>) -> HashMap<ActorId, ReferenceRecord> {
        pick(&self.actors, ids)
    }
}
