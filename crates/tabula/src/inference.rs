//! Storage-type inference for ingested columns.

use crate::input::DataTable;
use crate::schema::{ColumnSchema, StorageType};

/// How null cells affect an otherwise-integer column.
///
/// Dataframe-style inference widens a null-containing integer column to REAL
/// because the nulls force a float representation; strict per-value
/// classification keeps INTEGER. The rule is named explicitly so the
/// generated DDL is predictable either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NullPolicy {
    /// Nulls are ignored; all-integer non-null values infer INTEGER.
    #[default]
    Preserve,
    /// A null-containing column that would infer INTEGER infers REAL instead.
    WidenToReal,
}

/// Decides a storage type per column from its raw values.
#[derive(Debug, Clone, Default)]
pub struct TypeInferencer {
    null_policy: NullPolicy,
}

impl TypeInferencer {
    /// Create an inferencer with the default null policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an inferencer with an explicit null policy.
    pub fn with_policy(null_policy: NullPolicy) -> Self {
        Self { null_policy }
    }

    /// Infer the storage type for one column's raw cells.
    ///
    /// All non-null values parse as 64-bit integers -> INTEGER; else all
    /// parse as decimals -> REAL; else TEXT. An empty or all-null column
    /// defaults to TEXT.
    pub fn infer<'a, I>(&self, values: I) -> StorageType
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut saw_value = false;
        let mut saw_null = false;
        let mut all_integer = true;
        let mut all_real = true;

        for value in values {
            if DataTable::is_null_value(value) {
                saw_null = true;
                continue;
            }
            saw_value = true;

            let trimmed = value.trim();
            if all_integer && trimmed.parse::<i64>().is_err() {
                all_integer = false;
            }
            if all_real && trimmed.parse::<f64>().is_err() {
                all_real = false;
            }
            if !all_real {
                return StorageType::Text;
            }
        }

        if !saw_value {
            return StorageType::Text;
        }

        if all_integer {
            match self.null_policy {
                NullPolicy::Preserve => StorageType::Integer,
                NullPolicy::WidenToReal if saw_null => StorageType::Real,
                NullPolicy::WidenToReal => StorageType::Integer,
            }
        } else {
            StorageType::Real
        }
    }

    /// Infer a column schema for every column of a dataset.
    pub fn infer_columns(&self, table: &DataTable) -> Vec<ColumnSchema> {
        table
            .headers
            .iter()
            .enumerate()
            .map(|(index, name)| {
                ColumnSchema::new(name, self.infer(table.column_values(index)), index)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn infer(values: &[&str]) -> StorageType {
        TypeInferencer::new().infer(values.iter().copied())
    }

    #[test]
    fn test_all_integers() {
        assert_eq!(infer(&["1", "2", "300"]), StorageType::Integer);
        assert_eq!(infer(&["-5", "0", "9223372036854775807"]), StorageType::Integer);
    }

    #[test]
    fn test_out_of_range_integer_is_real() {
        // Overflows i64 but still parses as a decimal
        assert_eq!(infer(&["9223372036854775808"]), StorageType::Real);
    }

    #[test]
    fn test_mixed_numeric_is_real() {
        assert_eq!(infer(&["1", "2.5", "3"]), StorageType::Real);
        assert_eq!(infer(&["1e3", "2"]), StorageType::Real);
    }

    #[test]
    fn test_non_numeric_is_text() {
        assert_eq!(infer(&["1", "two", "3"]), StorageType::Text);
        assert_eq!(infer(&["alpha", "beta"]), StorageType::Text);
    }

    #[test]
    fn test_empty_and_all_null_default_to_text() {
        assert_eq!(infer(&[]), StorageType::Text);
        assert_eq!(infer(&["", "NA", "null"]), StorageType::Text);
    }

    #[test]
    fn test_nulls_preserved_by_default() {
        assert_eq!(infer(&["1", "NA", "3"]), StorageType::Integer);
    }

    #[test]
    fn test_widen_to_real_policy() {
        let widening = TypeInferencer::with_policy(NullPolicy::WidenToReal);
        assert_eq!(
            widening.infer(["1", "NA", "3"].iter().copied()),
            StorageType::Real
        );
        // No nulls present: stays integer
        assert_eq!(
            widening.infer(["1", "2", "3"].iter().copied()),
            StorageType::Integer
        );
    }

    #[test]
    fn test_infer_columns() {
        let table = DataTable::new(
            vec!["id".into(), "score".into(), "label".into()],
            vec![
                vec!["1".into(), "0.5".into(), "a".into()],
                vec!["2".into(), "0.7".into(), "b".into()],
            ],
        );
        let columns = TypeInferencer::new().infer_columns(&table);
        assert_eq!(columns[0].storage_type, StorageType::Integer);
        assert_eq!(columns[1].storage_type, StorageType::Real);
        assert_eq!(columns[2].storage_type, StorageType::Text);
        assert_eq!(columns[2].position, 2);
    }
}
