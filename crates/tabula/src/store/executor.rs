//! Bounded, fail-safe execution of user- or model-supplied SQL.

use rusqlite::types::ValueRef;

use super::Store;
use crate::error::Result;

/// Maximum number of result rows reported to the caller.
pub const ROW_LIMIT: usize = 10;

/// One result row with its 1-based position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    /// 1-based position within the result.
    pub position: usize,
    /// Stringified cell values.
    pub values: Vec<String>,
}

/// A bounded result set.
#[derive(Debug, Clone)]
pub struct RowSet {
    /// Result column names; empty for statements that return no rows.
    pub columns: Vec<String>,
    /// Up to [`ROW_LIMIT`] rows.
    pub rows: Vec<ResultRow>,
    /// Whether more rows existed beyond the limit.
    pub truncated: bool,
    /// Rows changed, for statements that return no result rows.
    pub changes: usize,
}

/// Detail of a failed execution.
#[derive(Debug, Clone)]
pub struct ErrorDetail {
    /// Human-readable failure message.
    pub message: String,
}

/// Outcome of executing one statement: always a value, never an error.
#[derive(Debug, Clone)]
pub enum QueryOutcome {
    /// The statement executed; up to [`ROW_LIMIT`] rows follow.
    Rows(RowSet),
    /// The statement failed (syntax error, missing table, type error, ...).
    Failed(ErrorDetail),
}

/// Executes SQL statements against the store with bounded result reporting.
pub struct QueryExecutor<'a> {
    store: &'a Store,
}

impl<'a> QueryExecutor<'a> {
    /// Create an executor over the given store.
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Execute one statement.
    ///
    /// Any failure comes back as [`QueryOutcome::Failed`]; this never
    /// propagates an error past the component boundary.
    pub fn execute(&self, sql: &str) -> QueryOutcome {
        match self.run(sql) {
            Ok(rows) => QueryOutcome::Rows(rows),
            Err(e) => QueryOutcome::Failed(ErrorDetail {
                message: e.to_string(),
            }),
        }
    }

    fn run(&self, sql: &str) -> Result<RowSet> {
        let conn = self.store.connection();
        let mut stmt = conn.prepare(sql)?;
        let columns: Vec<String> = stmt.column_names().iter().map(|s| s.to_string()).collect();

        if columns.is_empty() {
            // DDL or DML: no result rows, report the change count
            let changes = stmt.execute([])?;
            return Ok(RowSet {
                columns,
                rows: Vec::new(),
                truncated: false,
                changes,
            });
        }

        let width = columns.len();
        let mut rows = stmt.query([])?;
        let mut out = Vec::new();
        let mut truncated = false;

        while let Some(row) = rows.next()? {
            if out.len() == ROW_LIMIT {
                truncated = true;
                break;
            }
            let mut values = Vec::with_capacity(width);
            for index in 0..width {
                values.push(render_value(row.get_ref(index)?));
            }
            out.push(ResultRow {
                position: out.len() + 1,
                values,
            });
        }

        Ok(RowSet {
            columns,
            rows: out,
            truncated,
            changes: 0,
        })
    }
}

/// Render a SQLite value for display.
fn render_value(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Null => "NULL".to_string(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(r) => r.to_string(),
        ValueRef::Text(t) => String::from_utf8_lossy(t).into_owned(),
        ValueRef::Blob(b) => format!("<blob {} bytes>", b.len()),
    }
}
