//! Table-level schema definition.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use super::column::ColumnSchema;

/// Schema for a table as the store currently declares it.
///
/// An empty column list means the table does not exist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableSchema {
    /// Table name.
    pub table: String,
    /// Schemas for each column, in declared order.
    pub columns: Vec<ColumnSchema>,
}

impl TableSchema {
    /// Create a schema for an absent table.
    pub fn absent(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            columns: Vec::new(),
        }
    }

    /// Create a table schema with the given columns.
    pub fn with_columns(table: impl Into<String>, columns: Vec<ColumnSchema>) -> Self {
        Self {
            table: table.into(),
            columns,
        }
    }

    /// Whether the table exists in the store.
    pub fn exists(&self) -> bool {
        !self.columns.is_empty()
    }

    /// Get a column by name.
    pub fn get_column(&self, name: &str) -> Option<&ColumnSchema> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Get all column names in declared order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Column names as an order-preserving set.
    pub fn name_set(&self) -> IndexSet<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}
