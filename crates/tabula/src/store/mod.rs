//! Embedded SQLite store: connection ownership, DDL/DML, and introspection.

mod executor;
mod ident;

pub use executor::{ErrorDetail, QueryExecutor, QueryOutcome, ResultRow, RowSet, ROW_LIMIT};
pub use ident::quote_ident;

use std::path::Path;

use rusqlite::types::Value;
use rusqlite::{Connection, OptionalExtension};

use crate::error::{Result, TabulaError};
use crate::schema::{ColumnSchema, StorageType, TableSchema};

/// Owner of the single store connection.
///
/// Opened once at the composition point and reused for every ingestion and
/// query; schema reads always go to the store, never to a cache.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open (or create) a database file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        Ok(Self { conn })
    }

    /// Open an in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    pub(crate) fn connection(&self) -> &Connection {
        &self.conn
    }

    /// List all table names, sorted.
    pub fn table_names(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(names)
    }

    /// Read the current schema of a table; absent tables yield empty columns.
    ///
    /// Always a fresh read, so every comparison observes the store's current
    /// state.
    pub fn table_schema(&self, table: &str) -> Result<TableSchema> {
        let exists: Option<String> = self
            .conn
            .query_row(
                "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1",
                [table],
                |row| row.get(0),
            )
            .optional()?;

        if exists.is_none() {
            return Ok(TableSchema::absent(table));
        }

        let sql = format!("PRAGMA table_info({})", quote_ident(table)?);
        let mut stmt = self.conn.prepare(&sql)?;
        // PRAGMA table_info columns: cid, name, type, notnull, dflt_value, pk
        let columns = stmt
            .query_map([], |row| {
                let position: i64 = row.get(0)?;
                let name: String = row.get(1)?;
                let declared: String = row.get(2)?;
                Ok(ColumnSchema::new(
                    name,
                    StorageType::from_declared(&declared),
                    position as usize,
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(TableSchema::with_columns(table, columns))
    }

    /// Read the schema of every table, for the query-translation snapshot.
    pub fn snapshot(&self) -> Result<Vec<TableSchema>> {
        self.table_names()?
            .iter()
            .map(|name| self.table_schema(name))
            .collect()
    }

    /// Create a table from a schema, if it does not already exist.
    pub fn create_table(&self, schema: &TableSchema) -> Result<()> {
        let columns = schema
            .columns
            .iter()
            .map(|c| Ok(format!("{} {}", quote_ident(&c.name)?, c.storage_type.as_sql())))
            .collect::<Result<Vec<_>>>()?
            .join(", ");
        let sql = format!(
            "CREATE TABLE IF NOT EXISTS {} ({})",
            quote_ident(&schema.table)?,
            columns
        );

        self.conn.execute(&sql, []).map_err(|e| {
            TabulaError::Storage(format!("creating table '{}': {}", schema.table, e))
        })?;
        Ok(())
    }

    /// Drop a table if it exists.
    pub fn drop_table(&self, table: &str) -> Result<()> {
        let sql = format!("DROP TABLE IF EXISTS {}", quote_ident(table)?);
        self.conn
            .execute(&sql, [])
            .map_err(|e| TabulaError::Storage(format!("dropping table '{}': {}", table, e)))?;
        Ok(())
    }

    /// Insert rows produced by a converting iterator.
    ///
    /// The statement is prepared once; rows already inserted stay in place
    /// when a later row fails, matching the no-rollback contract.
    pub fn insert_rows<I>(&self, table: &str, columns: &[String], rows: I) -> Result<usize>
    where
        I: IntoIterator<Item = Result<Vec<Value>>>,
    {
        let column_list = columns
            .iter()
            .map(|c| quote_ident(c))
            .collect::<Result<Vec<_>>>()?
            .join(", ");
        let placeholders = vec!["?"; columns.len()].join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            quote_ident(table)?,
            column_list,
            placeholders
        );

        let mut stmt = self.conn.prepare(&sql)?;
        let mut inserted = 0usize;
        for row in rows {
            let values = row?;
            stmt.execute(rusqlite::params_from_iter(values)).map_err(|e| {
                TabulaError::Storage(format!(
                    "inserting row {} into '{}': {}",
                    inserted + 1,
                    table,
                    e
                ))
            })?;
            inserted += 1;
        }
        Ok(inserted)
    }
}
