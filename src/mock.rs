//! Provides a replayable source of rows from a vector, used in testing.
use crate::{Row, RowResult, Rows, Table};

/// A table backed by a fixed list of results, errors included, so error
/// pass-through can be exercised. The first `Ok` item is taken to be the
/// header. Restartable like any other table.
pub struct MockTable {
    items: Vec<RowResult>,
}

impl MockTable {
    pub fn new(items: Vec<RowResult>) -> MockTable {
        MockTable { items }
    }

    pub fn from_rows(rows: Vec<Row>) -> MockTable {
        MockTable {
            items: rows.into_iter().map(Ok).collect(),
        }
    }
}

impl Table for MockTable {
    fn rows(&self) -> Rows<'_> {
        Box::new(self.items.iter().cloned())
    }
}
