//! Table node - rows of plain-text cells
//!
//! Cell-level structure is carried only so documents round-trip; the editor
//! does not address below the table itself.

use crate::NodeId;
use serde::{Deserialize, Serialize};

/// A single table cell's text content
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableCell {
    pub text: String,
}

impl TableCell {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// A table row
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
}

impl TableRow {
    pub fn new() -> Self {
        Self::default()
    }
}

/// A table in the document body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    id: NodeId,
    pub rows: Vec<TableRow>,
}

impl Table {
    pub fn new() -> Self {
        Self {
            id: NodeId::new(),
            rows: Vec::new(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn add_row(&mut self, row: TableRow) {
        self.rows.push(row);
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_count() {
        let mut table = Table::new();
        assert_eq!(table.row_count(), 0);
        let mut row = TableRow::new();
        row.cells.push(TableCell::new("a"));
        table.add_row(row);
        table.add_row(TableRow::new());
        assert_eq!(table.row_count(), 2);
    }
}
