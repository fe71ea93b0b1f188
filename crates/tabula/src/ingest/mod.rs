//! Dataset ingestion: schema comparison, conflict resolution, and the engine.

mod compare;
mod conflict;
mod engine;

pub use compare::{compare, name_set, Comparison};
pub use conflict::{resolve, ConflictDecision, ConflictPolicy, ScriptedPolicy};
pub use engine::{IngestAction, IngestReport, IngestionEngine};
