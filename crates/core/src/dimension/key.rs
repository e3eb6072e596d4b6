//! Grouping keys for optional foreign keys.

use std::fmt;

/// An optional reference id used as a grouping key.
///
/// Entries without a reference form their own `Absent` group instead of
/// being dropped or mixed into a sentinel id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DimensionKey<I> {
    /// The entry references `I`.
    Present(I),
    /// The entry carries no reference.
    Absent,
}

impl<I: Copy> DimensionKey<I> {
    /// The referenced id, if any.
    #[must_use]
    pub const fn id(&self) -> Option<I> {
        match self {
            Self::Present(id) => Some(*id),
            Self::Absent => None,
        }
    }
}

impl<I> From<Option<I>> for DimensionKey<I> {
    fn from(value: Option<I>) -> Self {
        value.map_or(Self::Absent, Self::Present)
    }
}

impl<I: fmt::Display> DimensionKey<I> {
    /// Segment used in composite row keys; `none` for the absent group.
    #[must_use]
    pub fn segment(&self) -> String {
        match self {
            Self::Present(id) => id.to_string(),
            Self::Absent => "none".to_string(),
        }
    }
}
