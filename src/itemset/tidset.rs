// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Tidset type for representing the extent of an itemset.
//!
//! A Tidset is the set of transaction ids (0-based row indices) supporting an
//! itemset, stored as a fixed-capacity bit vector. The capacity is the number
//! of transactions in the database and never changes after construction.
//!
//! The set-algebra operations write into a caller-supplied output buffer and
//! return the cardinality of the result, so a search can reuse one scratch
//! buffer for every candidate join instead of allocating per candidate.

use std::fmt;

const WORD_BITS: usize = 64;

/// A set of transaction ids with fixed capacity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tidset {
    words: Vec<u64>,
    transactions: u32,
}

impl Tidset {
    /// Create an empty tidset over a database of `transactions` rows.
    pub fn empty(transactions: u32) -> Self {
        let len = (transactions as usize).div_ceil(WORD_BITS);
        Self {
            words: vec![0; len],
            transactions,
        }
    }

    /// Create an empty tidset with the same capacity as `other`.
    pub fn empty_like(other: &Tidset) -> Self {
        Self::empty(other.transactions)
    }

    /// Create a tidset over `transactions` rows from a slice of tids.
    pub fn from_tids(transactions: u32, tids: &[u32]) -> Self {
        let mut set = Self::empty(transactions);
        for &tid in tids {
            set.insert(tid);
        }
        set
    }

    /// The number of transactions this tidset ranges over.
    pub fn transactions(&self) -> u32 {
        self.transactions
    }

    /// Insert a transaction id.
    ///
    /// # Panics
    ///
    /// Panics if `tid` is outside the capacity fixed at construction.
    pub fn insert(&mut self, tid: u32) {
        assert!(tid < self.transactions, "Tid out of range: {}", tid);
        let bit = tid as usize;
        self.words[bit / WORD_BITS] |= 1 << (bit % WORD_BITS);
    }

    /// Check if the tidset contains a transaction id.
    pub fn contains(&self, tid: u32) -> bool {
        let bit = tid as usize;
        match self.words.get(bit / WORD_BITS) {
            Some(word) => (word >> (bit % WORD_BITS)) & 1 != 0,
            None => false,
        }
    }

    /// The number of transactions in the set (the support when this tidset
    /// is the extent of an itemset).
    pub fn len(&self) -> u32 {
        self.words.iter().map(|w| w.count_ones()).sum()
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Write the intersection of `self` and `other` into `out` and return
    /// its cardinality.
    pub fn intersect_into(&self, other: &Tidset, out: &mut Tidset) -> u32 {
        debug_assert_eq!(self.words.len(), other.words.len());
        debug_assert_eq!(self.words.len(), out.words.len());
        let mut count = 0;
        for i in 0..self.words.len() {
            let word = self.words[i] & other.words[i];
            out.words[i] = word;
            count += word.count_ones();
        }
        count
    }

    /// Write the set difference `self \ other` into `out` and return its
    /// cardinality.
    pub fn difference_into(&self, other: &Tidset, out: &mut Tidset) -> u32 {
        debug_assert_eq!(self.words.len(), other.words.len());
        debug_assert_eq!(self.words.len(), out.words.len());
        let mut count = 0;
        for i in 0..self.words.len() {
            let word = self.words[i] & !other.words[i];
            out.words[i] = word;
            count += word.count_ones();
        }
        count
    }

    /// Sum of the transaction ids in the set.
    ///
    /// Used as a weak signature of the extent: equal extents have equal
    /// sums, so unequal sums prove unequal extents.
    pub fn position_sum(&self) -> u64 {
        let mut sum = 0u64;
        for (index, &word) in self.words.iter().enumerate() {
            let base = (index * WORD_BITS) as u64;
            let mut bits = word;
            while bits != 0 {
                sum += base + bits.trailing_zeros() as u64;
                bits &= bits - 1;
            }
        }
        sum
    }

    /// Iterate over the transaction ids in ascending order.
    pub fn iter(&self) -> TidsetIter<'_> {
        TidsetIter {
            words: &self.words,
            word_index: 0,
            current: self.words.first().copied().unwrap_or(0),
        }
    }
}

/// Iterator over transaction ids in a Tidset.
pub struct TidsetIter<'a> {
    words: &'a [u64],
    word_index: usize,
    current: u64,
}

impl Iterator for TidsetIter<'_> {
    type Item = u32;

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
        Some((self.word_index * WORD_BITS + bit) as u32)
    }
}

impl fmt::Display for Tidset {
    /// Format the tidset as its space-separated transaction ids.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        let mut first = true;
        for tid in self.iter() {
            if !first {
                write!(f, " ")?;
            }
            write!(f, "{}", tid)?;
            first = false;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        let set = Tidset::empty(10);
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
        assert_eq!(set.transactions(), 10);
    }

    #[test]
    fn test_insert_contains() {
        let mut set = Tidset::empty(100);
        set.insert(0);
        set.insert(63);
        set.insert(64);
        set.insert(99);
        assert!(set.contains(0));
        assert!(set.contains(63));
        assert!(set.contains(64));
        assert!(set.contains(99));
        assert!(!set.contains(1));
        assert_eq!(set.len(), 4);
    }

    #[test]
    #[should_panic(expected = "Tid out of range")]
    fn test_insert_out_of_range() {
        let mut set = Tidset::empty(10);
        set.insert(10);
    }

    #[test]
    fn test_intersect_into() {
        let a = Tidset::from_tids(70, &[0, 2, 5, 65]);
        let b = Tidset::from_tids(70, &[2, 3, 65, 69]);
        let mut out = Tidset::empty_like(&a);
        let count = a.intersect_into(&b, &mut out);
        assert_eq!(count, 2);
        assert_eq!(out, Tidset::from_tids(70, &[2, 65]));
    }

    #[test]
    fn test_difference_into() {
        let a = Tidset::from_tids(70, &[0, 2, 5, 65]);
        let b = Tidset::from_tids(70, &[2, 3, 65, 69]);
        let mut out = Tidset::empty_like(&a);
        let count = a.difference_into(&b, &mut out);
        assert_eq!(count, 2);
        assert_eq!(out, Tidset::from_tids(70, &[0, 5]));
    }

    #[test]
    fn test_output_buffer_is_overwritten() {
        let a = Tidset::from_tids(10, &[1, 2]);
        let b = Tidset::from_tids(10, &[2, 3]);
        let mut out = Tidset::from_tids(10, &[7, 8, 9]);
        a.intersect_into(&b, &mut out);
        assert_eq!(out, Tidset::from_tids(10, &[2]));
    }

    #[test]
    fn test_position_sum() {
        assert_eq!(Tidset::from_tids(10, &[0, 3, 5]).position_sum(), 8);
        assert_eq!(Tidset::from_tids(200, &[64, 130]).position_sum(), 194);
        assert_eq!(Tidset::empty(10).position_sum(), 0);
    }

    #[test]
    fn test_iter_ascending() {
        let set = Tidset::from_tids(150, &[130, 0, 64, 63]);
        let tids: Vec<u32> = set.iter().collect();
        assert_eq!(tids, vec![0, 63, 64, 130]);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Tidset::from_tids(10, &[4, 1, 7])), "[1 4 7]");
        assert_eq!(format!("{}", Tidset::empty(10)), "[]");
    }
}
