// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! AttributeSet type for representing itemsets as bitsets.
//!
//! An AttributeSet is the intent of a search node: an unordered subset of the
//! attribute universe, stored as a bit vector where bit i represents the
//! presence of attribute i. Bit 0 is unused because attribute ids start at 1.
//!
//! # Examples
//!
//! ```
//! use itemset_search::itemset::{Attribute, AttributeSet};
//!
//! let mut set = AttributeSet::empty();
//! set.insert(Attribute::new(1));
//! set.insert(Attribute::new(3));
//! set.insert(Attribute::new(5));
//!
//! assert_eq!(set.len(), 3);
//! assert_eq!(format!("{}", set), "1 3 5");
//!
//! let sub = AttributeSet::from(&[Attribute::new(1), Attribute::new(5)][..]);
//! assert!(sub.is_subset_of(&set));
//! assert!(!set.is_subset_of(&sub));
//! ```

use crate::itemset::Attribute;
use std::cmp::Ordering;
use std::fmt;

const WORD_BITS: usize = 64;

/// A set of attributes represented as a growable bitset.
///
/// Bit i (counting from LSB of word 0) is set if attribute i is in the set.
/// Words never end in a trailing zero word, so the derived equality and hash
/// are structural.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct AttributeSet {
    words: Vec<u64>,
}

impl AttributeSet {
    /// Create an empty attribute set.
    pub const fn empty() -> Self {
        Self { words: Vec::new() }
    }

    /// Create an attribute set containing a single attribute.
    pub fn singleton(attribute: Attribute) -> Self {
        let mut set = Self::empty();
        set.insert(attribute);
        set
    }

    /// Create an attribute set from a slice of attributes.
    pub fn from_attributes(attributes: &[Attribute]) -> Self {
        let mut set = Self::empty();
        for &attribute in attributes {
            set.insert(attribute);
        }
        set
    }

    /// Check if the set contains a specific attribute.
    pub fn contains(&self, attribute: Attribute) -> bool {
        let bit = attribute.id() as usize;
        match self.words.get(bit / WORD_BITS) {
            Some(word) => (word >> (bit % WORD_BITS)) & 1 != 0,
            None => false,
        }
    }

    /// Insert an attribute into the set.
    pub fn insert(&mut self, attribute: Attribute) {
        let bit = attribute.id() as usize;
        let word = bit / WORD_BITS;
        if word >= self.words.len() {
            self.words.resize(word + 1, 0);
        }
        self.words[word] |= 1 << (bit % WORD_BITS);
    }

    /// Remove an attribute from the set.
    pub fn remove(&mut self, attribute: Attribute) {
        let bit = attribute.id() as usize;
        let word = bit / WORD_BITS;
        if word < self.words.len() {
            self.words[word] &= !(1 << (bit % WORD_BITS));
            // Keep the no-trailing-zero-word invariant for derived equality.
            while self.words.last() == Some(&0) {
                self.words.pop();
            }
        }
    }

    /// Get the number of attributes in the set (population count).
    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Grow this set to the union with `other`.
    pub fn union_with(&mut self, other: &AttributeSet) {
        if other.words.len() > self.words.len() {
            self.words.resize(other.words.len(), 0);
        }
        for (word, &other_word) in self.words.iter_mut().zip(other.words.iter()) {
            *word |= other_word;
        }
    }

    /// Check whether every attribute of this set is also in `other`.
    ///
    /// The empty set is a subset of everything, including itself.
    pub fn is_subset_of(&self, other: &AttributeSet) -> bool {
        if self.words.len() > other.words.len() {
            // A high word is nonzero by invariant, so some bit lies outside.
            return false;
        }
        self.words
            .iter()
            .zip(other.words.iter())
            .all(|(a, b)| a & !b == 0)
    }

    /// Check whether this set is a subset of `other` and not equal to it.
    pub fn is_proper_subset_of(&self, other: &AttributeSet) -> bool {
        self != other && self.is_subset_of(other)
    }

    /// Iterate over all attributes in the set, in ascending id order.
    pub fn iter(&self) -> AttributeSetIter<'_> {
        AttributeSetIter {
            words: &self.words,
            word_index: 0,
            current: self.words.first().copied().unwrap_or(0),
        }
    }
}

/// Iterator over attributes in an AttributeSet.
pub struct AttributeSetIter<'a> {
    words: &'a [u64],
    word_index: usize,
    current: u64,
}

impl Iterator for AttributeSetIter<'_> {
    type Item = Attribute;

    fn next(&mut self) -> Option<Self::Item> {
        while self.current == 0 {
            self.word_index += 1;
            if self.word_index >= self.words.len() {
                return None;
            }
            self.current = self.words[self.word_index];
        }
        let bit = self.current.trailing_zeros() as usize;
        self.current &= self.current - 1;
        Some(Attribute::new((self.word_index * WORD_BITS + bit) as u32))
    }
}

impl Ord for AttributeSet {
    /// Order itemsets lexicographically by their sorted attribute sequences,
    /// so `{1,3} < {1,4} < {2}` and `{1} < {1,2}`.
    ///
    /// The set holding the smallest attribute on which the two differ comes
    /// first, except that a set beats its own extensions. This is the
    /// deterministic tie-break used when sorting sibling containers of equal
    /// support.
    fn cmp(&self, other: &Self) -> Ordering {
        let shared = self.words.len().min(other.words.len());
        for i in 0..shared {
            let difference = self.words[i] ^ other.words[i];
            if difference != 0 {
                let lowest = difference & difference.wrapping_neg();
                let (holder_first, rest) = if self.words[i] & lowest != 0 {
                    (Ordering::Less, other)
                } else {
                    (Ordering::Greater, self)
                };
                // The side without the differing attribute wins only when it
                // is a strict prefix: nothing above that attribute anywhere.
                let above = rest.words[i] & !(lowest | (lowest - 1));
                return if above != 0 || rest.words.len() > i + 1 {
                    holder_first
                } else {
                    holder_first.reverse()
                };
            }
        }
        // Equal through the shared words; the shorter set is a strict prefix.
        self.words.len().cmp(&other.words.len())
    }
}

impl PartialOrd for AttributeSet {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for AttributeSet {
    /// Format an itemset as its space-separated attribute ids, "{}" if empty.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "{{}}");
        }
        let mut first = true;
        for attribute in self.iter() {
            if !first {
                write!(f, " ")?;
            }
            write!(f, "{}", attribute)?;
            first = false;
        }
        Ok(())
    }
}

impl From<&[Attribute]> for AttributeSet {
    fn from(attributes: &[Attribute]) -> Self {
        Self::from_attributes(attributes)
    }
}
