// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Attribute type for item identifiers.
//!
//! Attributes (items) are numbered from 1 up to the size of the attribute
//! universe, following the usual convention of transactional datasets. The
//! upper bound is a runtime property of the database, so only the lower bound
//! is enforced here; structures that know the universe size check the rest.

use std::fmt;

/// An attribute (item) identifier, numbered from 1.
///
/// This is a newtype wrapper to provide type safety and prevent mixing
/// attribute ids with transaction ids or other integer values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Attribute(u32);

impl Attribute {
    /// Create a new attribute, panicking if the id is zero.
    ///
    /// # Panics
    ///
    /// Panics if `id == 0`; attribute ids start at 1.
    pub fn new(id: u32) -> Self {
        assert!(id >= 1, "Attribute out of range: {}", id);
        Self(id)
    }

    /// Try to create a new attribute, returning None for id zero.
    pub fn try_new(id: u32) -> Option<Self> {
        if id >= 1 {
            Some(Self(id))
        } else {
            None
        }
    }

    /// Get the underlying id.
    pub fn id(self) -> u32 {
        self.0
    }

    /// Zero-based position, for dense table indexing.
    pub fn as_index(self) -> usize {
        (self.0 - 1) as usize
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
