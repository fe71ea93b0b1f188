//! Create-or-append orchestration for ingesting datasets.

use rusqlite::types::Value;
use serde::Serialize;

use super::compare::{compare, name_set, Comparison};
use super::conflict::{resolve, ConflictDecision, ConflictPolicy};
use crate::diag::EventLog;
use crate::error::{Result, TabulaError};
use crate::inference::TypeInferencer;
use crate::input::DataTable;
use crate::schema::{StorageType, TableSchema};
use crate::store::Store;

/// What the engine did with the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IngestAction {
    /// A fresh table was created and filled.
    Created,
    /// Rows were appended to a matching table.
    Appended,
    /// The existing table was dropped and re-created.
    Overwritten,
    /// The dataset went into a different table.
    Renamed,
    /// Nothing was written.
    Skipped,
}

/// Result of one ingestion call.
#[derive(Debug, Clone, Serialize)]
pub struct IngestReport {
    /// The table the rows actually went to (or would have).
    pub table: String,
    /// Number of rows written.
    pub rows_inserted: usize,
    /// What happened.
    pub action: IngestAction,
}

/// Orchestrates type inference, schema comparison, and conflict resolution
/// to create-or-append a dataset into a table.
pub struct IngestionEngine<'a> {
    store: &'a Store,
    inferencer: TypeInferencer,
    log: Option<&'a EventLog>,
}

impl<'a> IngestionEngine<'a> {
    /// Create an engine over the given store with default inference.
    pub fn new(store: &'a Store) -> Self {
        Self {
            store,
            inferencer: TypeInferencer::new(),
            log: None,
        }
    }

    /// Use a custom type inferencer.
    pub fn with_inferencer(mut self, inferencer: TypeInferencer) -> Self {
        self.inferencer = inferencer;
        self
    }

    /// Record skip decisions and failures to a diagnostic log.
    pub fn with_log(mut self, log: &'a EventLog) -> Self {
        self.log = Some(log);
        self
    }

    /// Ingest a dataset into `table`, resolving conflicts via `policy`.
    pub fn ingest(
        &self,
        data: &DataTable,
        table: &str,
        policy: &dyn ConflictPolicy,
    ) -> Result<IngestReport> {
        let existing = self.store.table_schema(table)?;

        if !existing.exists() {
            return self.create_and_fill(data, table, IngestAction::Created);
        }

        match compare(&existing, &data.headers) {
            Comparison::NoConflict => self.append(data, &existing),
            Comparison::Conflict => {
                let decision = resolve(&existing.name_set(), &name_set(&data.headers), policy)?;
                match decision {
                    ConflictDecision::Overwrite => {
                        self.store.drop_table(table)?;
                        self.create_and_fill(data, table, IngestAction::Overwritten)
                    }
                    // The rename target goes down the fresh-table path without
                    // re-checking that it is itself conflict-free
                    ConflictDecision::Rename(target) => {
                        self.create_and_fill(data, target.trim(), IngestAction::Renamed)
                    }
                    ConflictDecision::Skip => {
                        self.note(&format!(
                            "skipped ingestion of {} rows into '{}' (schema conflict)",
                            data.row_count(),
                            table
                        ));
                        Ok(IngestReport {
                            table: table.to_string(),
                            rows_inserted: 0,
                            action: IngestAction::Skipped,
                        })
                    }
                }
            }
        }
    }

    /// Fresh-table path: infer types, create, insert everything.
    fn create_and_fill(
        &self,
        data: &DataTable,
        table: &str,
        action: IngestAction,
    ) -> Result<IngestReport> {
        let columns = self.inferencer.infer_columns(data);
        let schema = TableSchema::with_columns(table, columns);
        self.store.create_table(&schema)?;

        let types: Vec<StorageType> = schema.columns.iter().map(|c| c.storage_type).collect();
        let rows_inserted = self.insert(data, &schema.table, &types)?;

        Ok(IngestReport {
            table: schema.table,
            rows_inserted,
            action,
        })
    }

    /// Append path: no DDL, cells converted per the existing declared types.
    fn append(&self, data: &DataTable, existing: &TableSchema) -> Result<IngestReport> {
        let types: Vec<StorageType> = data
            .headers
            .iter()
            .map(|name| {
                existing
                    .get_column(name)
                    .map(|c| c.storage_type)
                    .unwrap_or_default()
            })
            .collect();
        let rows_inserted = self.insert(data, &existing.table, &types)?;

        Ok(IngestReport {
            table: existing.table.clone(),
            rows_inserted,
            action: IngestAction::Appended,
        })
    }

    /// Insert all rows, converting cells to their target storage type.
    ///
    /// The table may keep partial rows when a late row fails; the failure is
    /// surfaced, not rolled back.
    fn insert(&self, data: &DataTable, table: &str, types: &[StorageType]) -> Result<usize> {
        let rows = data
            .rows
            .iter()
            .enumerate()
            .map(|(index, row)| convert_row(row, &data.headers, types, index));

        self.store
            .insert_rows(table, &data.headers, rows)
            .inspect_err(|e| self.note(&format!("ingestion into '{}' failed: {}", table, e)))
    }

    fn note(&self, message: &str) {
        if let Some(log) = self.log {
            log.record(message);
        }
    }
}

/// Convert one raw row into store values, strictly per column type.
fn convert_row(
    row: &[String],
    headers: &[String],
    types: &[StorageType],
    index: usize,
) -> Result<Vec<Value>> {
    let mut values = Vec::with_capacity(types.len());
    for (cell, (name, ty)) in row.iter().zip(headers.iter().zip(types.iter())) {
        values.push(convert_cell(cell, *ty).ok_or_else(|| {
            TabulaError::Storage(format!(
                "row {}: value '{}' is not a valid {} for column '{}'",
                index + 1,
                cell,
                ty.as_sql(),
                name
            ))
        })?);
    }
    Ok(values)
}

/// Convert one raw cell; `None` means the cell does not fit the type.
fn convert_cell(cell: &str, ty: StorageType) -> Option<Value> {
    if DataTable::is_null_value(cell) {
        return Some(Value::Null);
    }
    let trimmed = cell.trim();
    match ty {
        StorageType::Integer => trimmed.parse::<i64>().ok().map(Value::Integer),
        StorageType::Real => trimmed.parse::<f64>().ok().map(Value::Real),
        StorageType::Text => Some(Value::Text(cell.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_cell_null_markers() {
        assert_eq!(convert_cell("NA", StorageType::Integer), Some(Value::Null));
        assert_eq!(convert_cell("", StorageType::Text), Some(Value::Null));
    }

    #[test]
    fn test_convert_cell_strict() {
        assert_eq!(convert_cell("12", StorageType::Integer), Some(Value::Integer(12)));
        assert_eq!(convert_cell("1.5", StorageType::Integer), None);
        assert_eq!(convert_cell("1.5", StorageType::Real), Some(Value::Real(1.5)));
        assert_eq!(
            convert_cell("x", StorageType::Text),
            Some(Value::Text("x".to_string()))
        );
    }
}
