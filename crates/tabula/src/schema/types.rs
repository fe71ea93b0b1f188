//! Core type definitions for schema representation.

use serde::{Deserialize, Serialize};

/// Storage type generated for a column.
///
/// These are the three SQLite affinities the ingestion path emits in DDL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageType {
    /// Whole numbers within the 64-bit signed range.
    Integer,
    /// Floating-point numbers.
    Real,
    /// Text/string values.
    Text,
}

impl StorageType {
    /// The keyword used in generated DDL.
    pub fn as_sql(&self) -> &'static str {
        match self {
            StorageType::Integer => "INTEGER",
            StorageType::Real => "REAL",
            StorageType::Text => "TEXT",
        }
    }

    /// Returns true if this type is numeric.
    pub fn is_numeric(&self) -> bool {
        matches!(self, StorageType::Integer | StorageType::Real)
    }

    /// Map a declared column type from the store back to a storage type.
    ///
    /// Pre-existing tables may carry declarations tabula never generates
    /// (VARCHAR, NUMERIC, ...); anything that is not clearly integer or
    /// floating-point is treated as text.
    pub fn from_declared(declared: &str) -> Self {
        let upper = declared.to_ascii_uppercase();
        if upper.contains("INT") {
            StorageType::Integer
        } else if upper.contains("REAL") || upper.contains("FLOA") || upper.contains("DOUB") {
            StorageType::Real
        } else {
            StorageType::Text
        }
    }
}

impl Default for StorageType {
    fn default() -> Self {
        StorageType::Text
    }
}

impl std::fmt::Display for StorageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_sql())
    }
}
