//! Shared value types, errors, and configuration for Keelbook.
//!
//! This crate provides common types used across all other crates:
//! - `Money` with fixed two-decimal precision and ISO 4217 `Currency`
//! - Typed IDs for entries, categories and reference dimensions
//! - `MoneyError` for monetary contract violations
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::MoneyError;
pub use types::{Currency, Money};
