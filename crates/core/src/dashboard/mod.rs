//! Dashboard summary metrics.
//!
//! This module provides the headline numbers shown on the dashboard:
//! - Income and expense totals with their balance
//! - Entry counts per kind

pub mod summary;

pub use summary::DashboardSummary;
