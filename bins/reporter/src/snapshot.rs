//! JSON snapshot of entries and reference tables.

use std::fs;
use std::path::Path;

use anyhow::Context;
use keelbook_core::dimension::{InMemoryDimensions, ReferenceRecord};
use keelbook_core::ledger::{Entry, EntryRecord};
use keelbook_core::reports::ReportError;
use serde::Deserialize;

/// Entry rows plus the classification and actor tables they point at.
#[derive(Debug, Default, Deserialize)]
pub struct Snapshot {
    /// Entry rows.
    pub entries: Vec<EntryRecord>,
    /// Classification rows.
    #[serde(default)]
    pub classifications: Vec<ReferenceRecord>,
    /// Actor rows.
    #[serde(default)]
    pub actors: Vec<ReferenceRecord>,
}

impl Snapshot {
    /// Reads a snapshot file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse snapshot {}", path.display()))
    }

    /// Converts the rows into report input. Fails on the first entry without
    /// a base amount.
    pub fn into_parts(self) -> Result<(Vec<Entry>, InMemoryDimensions), ReportError> {
        let entries = self
            .entries
            .into_iter()
            .map(Entry::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let dimensions = InMemoryDimensions::new(self.classifications, self.actors);
        Ok((entries, dimensions))
    }
}
