//! Load command - batch ingestion without prompts.

use std::path::PathBuf;

use colored::Colorize;
use tabula::{EventLog, IngestAction, IngestionEngine, Parser, ScriptedPolicy};

use crate::cli::OnConflict;

pub fn run(
    db: PathBuf,
    file: PathBuf,
    table: String,
    on_conflict: OnConflict,
    log_path: PathBuf,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let store = tabula::Store::open(&db)?;
    let log = EventLog::new(log_path);

    let (data, meta) = Parser::new().parse_file(&file)?;
    println!(
        "{} {} ({} rows, {} columns, {})",
        "Read".cyan().bold(),
        meta.file.white(),
        meta.row_count,
        meta.column_count,
        meta.format
    );
    if verbose {
        println!("  {}", meta.hash.dimmed());
    }

    let policy = match on_conflict {
        OnConflict::Overwrite => ScriptedPolicy::overwrite(),
        OnConflict::Rename(target) => ScriptedPolicy::rename(target),
        OnConflict::Skip => ScriptedPolicy::skip(),
    };

    let engine = IngestionEngine::new(&store).with_log(&log);
    let report = engine.ingest(&data, &table, &policy)?;

    match report.action {
        IngestAction::Skipped => println!(
            "{} table '{}' has a different schema; nothing imported",
            "Skipped:".yellow().bold(),
            report.table
        ),
        _ => println!(
            "{} {} rows into '{}'",
            "Loaded".green().bold(),
            report.rows_inserted,
            report.table.white()
        ),
    }

    Ok(())
}
