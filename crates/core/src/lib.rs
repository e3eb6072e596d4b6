//! Core reporting logic for Keelbook.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Entries come in already converted to the base currency; reference names are
//! resolved through the caller-supplied [`dimension::DimensionLookup`].
//!
//! # Modules
//!
//! - `fiscal` - Inclusive reporting periods
//! - `ledger` - Income and expense entries
//! - `dimension` - Classification/actor grouping keys and batch lookup
//! - `reports` - Linear, tree and pivot report generators
//! - `dashboard` - Headline income/expense summary

pub mod dashboard;
pub mod dimension;
pub mod fiscal;
pub mod ledger;
pub mod reports;
