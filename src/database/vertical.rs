// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Vertical (column-oriented) transaction database.
//!
//! The vertical layout holds one tidset per attribute: `tidset[a]` is the set
//! of transactions containing attribute `a`. This is the representation the
//! search runs on, because the extent of a joined itemset is the intersection
//! of its parents' tidsets.
//!
//! Staging consumes the horizontal database one row at a time, so at no point
//! are two full copies of the data resident. The same pass optionally fills
//! the [`PairSupportMatrix`]. The dual conversion back to horizontal exists
//! for the round-trip guarantee and likewise consumes its source one column
//! at a time.

use crate::database::{HorizontalDatabase, PairSupportMatrix};
use crate::itemset::{Attribute, Tidset};

/// One attribute with its occurrence set.
#[derive(Debug, Clone)]
pub struct AttributeColumn {
    pub attribute: Attribute,
    pub tids: Tidset,
}

/// A transaction database in column-major form.
#[derive(Debug, Clone)]
pub struct VerticalDatabase {
    transactions: u32,
    /// Held in ascending attribute order; attributes absent from every row
    /// have no column.
    columns: Vec<AttributeColumn>,
    pair_supports: Option<PairSupportMatrix>,
}

impl VerticalDatabase {
    /// Convert a horizontal database, consuming it row by row.
    ///
    /// When `with_pairs` is set, the same pass counts the support of every
    /// attribute pair into a [`PairSupportMatrix`], retrievable once via
    /// [`take_pair_supports`](Self::take_pair_supports).
    pub fn stage(horizontal: HorizontalDatabase, with_pairs: bool) -> Self {
        let transactions = horizontal.transaction_count();
        let max_attribute = horizontal.max_attribute();

        let mut slots: Vec<Option<Tidset>> = vec![None; max_attribute as usize];
        let mut pairs = with_pairs.then(|| PairSupportMatrix::new(max_attribute));

        for (tid, row) in horizontal.into_rows().enumerate() {
            let tid = tid as u32;
            for &attribute in &row {
                slots[attribute.as_index()]
                    .get_or_insert_with(|| Tidset::empty(transactions))
                    .insert(tid);
            }
            if let Some(pairs) = pairs.as_mut() {
                // Rows are deduplicated on input, so each pair counts once.
                for (i, &a) in row.iter().enumerate() {
                    for &b in &row[i + 1..] {
                        pairs.increment(a, b);
                    }
                }
            }
        }

        let columns = slots
            .into_iter()
            .enumerate()
            .filter_map(|(index, slot)| {
                slot.map(|tids| AttributeColumn {
                    attribute: Attribute::new(index as u32 + 1),
                    tids,
                })
            })
            .collect();

        Self {
            transactions,
            columns,
            pair_supports: pairs,
        }
    }

    /// The number of transactions.
    pub fn transactions(&self) -> u32 {
        self.transactions
    }

    /// The number of attributes that occur in at least one transaction.
    pub fn attribute_count(&self) -> usize {
        self.columns.len()
    }

    /// The columns, in ascending attribute order.
    pub fn columns(&self) -> &[AttributeColumn] {
        &self.columns
    }

    /// Move the pair-support matrix out, if staging built one.
    pub fn take_pair_supports(&mut self) -> Option<PairSupportMatrix> {
        self.pair_supports.take()
    }

    /// Consume the database, yielding its columns in ascending attribute
    /// order. This is how the search takes ownership of the level-1 tidsets.
    pub fn into_columns(self) -> Vec<AttributeColumn> {
        self.columns
    }

    /// Convert back to the horizontal layout, consuming one column at a time.
    pub fn into_horizontal(self) -> HorizontalDatabase {
        let mut rows: Vec<Vec<u32>> = vec![Vec::new(); self.transactions as usize];
        for column in self.columns {
            for tid in column.tids.iter() {
                rows[tid as usize].push(column.attribute.id());
            }
        }
        let mut horizontal = HorizontalDatabase::new();
        for row in rows {
            horizontal.add_transaction(&row);
        }
        horizontal
    }
}
