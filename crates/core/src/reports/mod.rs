//! Financial report generation.
//!
//! This module provides pure business logic for generating expense reports:
//! - Annual and period reports (category by month, running balance)
//! - Expense tree (classification / category / actor)
//! - Pivot tree (the expense tree broken down by month)

pub mod error;
pub mod grouping;
pub mod linear;
pub mod pivot;
pub mod tree;
pub mod types;

#[cfg(test)]
mod test_support;

pub use error::ReportError;
pub use linear::LinearReportGenerator;
pub use pivot::PivotTableBuilder;
pub use tree::HierarchicalTreeBuilder;
pub use types::*;
