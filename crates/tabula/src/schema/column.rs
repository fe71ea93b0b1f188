//! Column schema definition.

use serde::{Deserialize, Serialize};

use super::types::StorageType;

/// Schema for a single column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSchema {
    /// Column name. Unique within a table.
    pub name: String,
    /// Storage type used for DDL and cell conversion.
    pub storage_type: StorageType,
    /// Zero-based position in the table.
    pub position: usize,
}

impl ColumnSchema {
    /// Create a new column schema.
    pub fn new(name: impl Into<String>, storage_type: StorageType, position: usize) -> Self {
        Self {
            name: name.into(),
            storage_type,
            position,
        }
    }
}
