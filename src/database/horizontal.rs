// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Horizontal (row-oriented) transaction database.
//!
//! This is the input format: one row per transaction, each row listing the
//! attributes present in that transaction. The miner converts it to the
//! vertical format in a single staging pass before the search starts.
//!
//! # Example
//!
//! ```
//! use itemset_search::database::HorizontalDatabase;
//!
//! let mut db = HorizontalDatabase::new();
//! db.add_transaction(&[1, 3, 4]);
//! db.add_transaction(&[2, 4, 5]);
//! db.add_transaction(&[1, 4]);
//!
//! assert_eq!(db.transaction_count(), 3);
//! assert_eq!(db.max_attribute(), 5);
//! ```

use crate::itemset::Attribute;

/// A transaction database in row-major form.
#[derive(Debug, Clone, Default)]
pub struct HorizontalDatabase {
    rows: Vec<Vec<Attribute>>,
    max_attribute: u32,
}

impl HorizontalDatabase {
    /// Create an empty database.
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            max_attribute: 0,
        }
    }

    /// Create a database from a list of transactions.
    pub fn from_rows(rows: &[&[u32]]) -> Self {
        let mut db = Self::new();
        for row in rows {
            db.add_transaction(row);
        }
        db
    }

    /// Append one transaction.
    ///
    /// The row is stored sorted with duplicate attributes removed, so that
    /// staging can count attribute pairs without double counting.
    ///
    /// # Panics
    ///
    /// Panics if any item id is 0; attribute ids are 1-based.
    pub fn add_transaction(&mut self, items: &[u32]) {
        let mut row: Vec<Attribute> = items.iter().map(|&id| Attribute::new(id)).collect();
        row.sort();
        row.dedup();
        if let Some(last) = row.last() {
            self.max_attribute = self.max_attribute.max(last.id());
        }
        self.rows.push(row);
    }

    /// The number of transactions.
    pub fn transaction_count(&self) -> u32 {
        self.rows.len() as u32
    }

    /// The largest attribute id appearing in any transaction, 0 if none.
    pub fn max_attribute(&self) -> u32 {
        self.max_attribute
    }

    /// Check if the database has no transactions.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Consume the database, yielding its rows in insertion order.
    pub fn into_rows(self) -> impl Iterator<Item = Vec<Attribute>> {
        self.rows.into_iter()
    }
}
