//! Column-set comparison between an existing table and incoming data.

use indexmap::IndexSet;

use crate::schema::TableSchema;

/// Result of comparing an existing schema against incoming columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// Fresh table, or the column-name sets match exactly.
    NoConflict,
    /// The column-name sets differ.
    Conflict,
}

/// Collect column names into an order-preserving set.
pub fn name_set<S: AsRef<str>>(names: &[S]) -> IndexSet<String> {
    names.iter().map(|n| n.as_ref().to_string()).collect()
}

/// Compare by column-name set equality only.
///
/// Order is irrelevant, and declared-type differences between same-named
/// columns are not conflicts.
pub fn compare(existing: &TableSchema, incoming: &[String]) -> Comparison {
    if !existing.exists() {
        return Comparison::NoConflict;
    }
    if existing.name_set() == name_set(incoming) {
        Comparison::NoConflict
    } else {
        Comparison::Conflict
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ColumnSchema, StorageType};

    fn existing(names: &[&str]) -> TableSchema {
        TableSchema::with_columns(
            "t",
            names
                .iter()
                .enumerate()
                .map(|(i, n)| ColumnSchema::new(*n, StorageType::Text, i))
                .collect(),
        )
    }

    fn incoming(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_absent_table_never_conflicts() {
        let absent = TableSchema::absent("t");
        assert_eq!(compare(&absent, &incoming(&["a", "b"])), Comparison::NoConflict);
    }

    #[test]
    fn test_same_set_any_order() {
        let schema = existing(&["a", "b", "c"]);
        assert_eq!(compare(&schema, &incoming(&["a", "b", "c"])), Comparison::NoConflict);
        assert_eq!(compare(&schema, &incoming(&["c", "a", "b"])), Comparison::NoConflict);
    }

    #[test]
    fn test_differing_sets_conflict() {
        let schema = existing(&["a", "b"]);
        assert_eq!(compare(&schema, &incoming(&["a", "b", "c"])), Comparison::Conflict);
        assert_eq!(compare(&schema, &incoming(&["a"])), Comparison::Conflict);
        assert_eq!(compare(&schema, &incoming(&["a", "x"])), Comparison::Conflict);
    }
}
