//! Entity reference system for type-safe entity IDs.
//!
//! Blocks and temporaries are referred to by small copyable handles. A block's
//! identity is its handle: reordering the layout never changes which handle
//! refers to which block.

use core::fmt;

/// Base trait for entity references.
///
/// Entities provide O(1) conversion to/from indices while keeping distinct
/// entity kinds from being mixed up.
pub trait EntityRef: Copy + Clone + PartialEq + Eq + core::hash::Hash + fmt::Debug {
    /// Get the index of this entity
    fn index(self) -> usize;

    /// Create an entity from an index
    fn from_index(index: usize) -> Self;
}

/// Block entity reference
///
/// A type-safe identifier for a basic block in a compilation unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Block(u32);

impl Block {
    /// Create a new block entity with the given index
    pub fn new(index: u32) -> Self {
        Block(index)
    }

    /// Get the raw number of this block
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

impl EntityRef for Block {
    fn index(self) -> usize {
        self.0 as usize
    }

    fn from_index(index: usize) -> Self {
        Block(index as u32)
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "block{}", self.0)
    }
}

/// Virtual register reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tmp(u32);

impl Tmp {
    pub fn new(index: u32) -> Self {
        Tmp(index)
    }

    pub fn as_u32(self) -> u32 {
        self.0
    }
}

impl EntityRef for Tmp {
    fn index(self) -> usize {
        self.0 as usize
    }

    fn from_index(index: usize) -> Self {
        Tmp(index as u32)
    }
}

impl fmt::Display for Tmp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "%t{}", self.0)
    }
}
