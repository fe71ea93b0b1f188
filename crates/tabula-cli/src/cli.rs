//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Tabula: CSV-to-SQLite loading and LLM-assisted querying
#[derive(Parser)]
#[command(name = "tabula")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open an interactive shell against a database
    Shell {
        /// Path to the SQLite database file (created if missing)
        #[arg(value_name = "DB")]
        db: PathBuf,

        /// Path for the append-only diagnostic log
        #[arg(long, default_value = "tabula.log")]
        log: PathBuf,

        /// Model for the `ask` command (requires OPENAI_API_KEY)
        #[arg(long)]
        model: Option<String>,
    },

    /// Load a delimited file into a table without prompts
    Load {
        /// Path to the SQLite database file (created if missing)
        #[arg(value_name = "DB")]
        db: PathBuf,

        /// Path to the delimited data file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Target table name
        #[arg(value_name = "TABLE")]
        table: String,

        /// What to do when the table exists with a different column set
        #[arg(long, default_value = "skip")]
        on_conflict: OnConflict,

        /// Path for the append-only diagnostic log
        #[arg(long, default_value = "tabula.log")]
        log: PathBuf,
    },
}

/// Scripted conflict answer for non-interactive loads.
#[derive(Clone, Debug, Default)]
pub enum OnConflict {
    Overwrite,
    Rename(String),
    #[default]
    Skip,
}

impl std::str::FromStr for OnConflict {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("overwrite") {
            return Ok(OnConflict::Overwrite);
        }
        if s.eq_ignore_ascii_case("skip") {
            return Ok(OnConflict::Skip);
        }
        // The target keeps its case; only the keyword is case-insensitive
        match s.split_once('=') {
            Some((key, target)) if key.eq_ignore_ascii_case("rename") => {
                if target.trim().is_empty() {
                    Err("rename target must not be blank".to_string())
                } else {
                    Ok(OnConflict::Rename(target.trim().to_string()))
                }
            }
            _ => Err(format!(
                "Unknown conflict mode: {}. Use overwrite, rename=<table>, or skip.",
                s
            )),
        }
    }
}

impl std::fmt::Display for OnConflict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OnConflict::Overwrite => write!(f, "overwrite"),
            OnConflict::Rename(target) => write!(f, "rename={}", target),
            OnConflict::Skip => write!(f, "skip"),
        }
    }
}
