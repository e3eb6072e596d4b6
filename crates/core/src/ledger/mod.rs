//! Ledger entries fed into report generation.

pub mod entry;

pub use entry::{Entry, EntryKind, EntryRecord};
