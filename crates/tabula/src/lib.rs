//! Tabula: CSV-to-SQLite ingestion with schema reconciliation and
//! LLM-assisted querying.
//!
//! Tabula loads delimited files into an embedded SQLite store, inferring a
//! storage type per column and reconciling the incoming columns against any
//! pre-existing table through an explicit conflict policy. A second pipeline
//! turns a natural-language request into SQL via a model service, extracts
//! the statement deterministically from the free-text reply, and executes it
//! with bounded, fail-safe result reporting.
//!
//! # Example
//!
//! ```no_run
//! use tabula::{IngestionEngine, Parser, ScriptedPolicy, Store};
//!
//! # fn main() -> tabula::Result<()> {
//! let store = Store::open("data.db")?;
//! let (table, _meta) = Parser::new().parse_file("people.csv")?;
//!
//! let report = IngestionEngine::new(&store)
//!     .ingest(&table, "people", &ScriptedPolicy::skip())?;
//! println!("{} rows into '{}'", report.rows_inserted, report.table);
//! # Ok(())
//! # }
//! ```

pub mod diag;
pub mod error;
pub mod inference;
pub mod ingest;
pub mod input;
pub mod llm;
pub mod query;
pub mod schema;
pub mod store;

pub use diag::EventLog;
pub use error::{Result, TabulaError};
pub use inference::{NullPolicy, TypeInferencer};
pub use ingest::{
    compare, Comparison, ConflictDecision, ConflictPolicy, IngestAction, IngestReport,
    IngestionEngine, ScriptedPolicy,
};
pub use input::{DataTable, Parser, ParserConfig, SourceMetadata};
pub use llm::{LlmClient, LlmConfig, MockClient, OpenAiClient};
pub use query::{parse, ParseStatus, ParsedQuery, Translator};
pub use schema::{ColumnSchema, StorageType, TableSchema};
pub use store::{ErrorDetail, QueryExecutor, QueryOutcome, ResultRow, RowSet, Store, ROW_LIMIT};
