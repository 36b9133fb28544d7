//! Identifier types for registered resource classes

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a class within one [`Registry`](super::Registry).
///
/// Ids are assigned in definition order, so a parent's id is always lower
/// than its children's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct ClassId(u32);

impl ClassId {
    /// `None` once the index no longer fits
    pub(crate) fn try_from_index(index: usize) -> Option<Self> {
        u32::try_from(index).ok().map(ClassId)
    }

    /// For indices of classes already defined, bounded by `try_from_index`
    pub(crate) fn from_index(index: usize) -> Self {
        ClassId(index as u32)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }

    pub(crate) fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClassId({})", self.0)
    }
}

/// The (class, URI) pair that equality and hashing of resources are built on
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceIdentity {
    pub class: ClassId,
    pub uri: String,
}

impl fmt::Display for ResourceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}<{}>", self.class, self.uri)
    }
}
