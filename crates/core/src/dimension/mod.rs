//! Reference dimensions used to group expenses.
//!
//! Entries point at two optional reference tables: the main-category
//! classification (tree level 1) and the actor (tree level 3). Names for
//! both are resolved in batch through [`DimensionLookup`].

pub mod key;
pub mod lookup;

pub use key::DimensionKey;
pub use lookup::{DimensionLookup, InMemoryDimensions, ReferenceRecord};
