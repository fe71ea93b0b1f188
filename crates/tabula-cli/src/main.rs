//! Tabula CLI - load delimited files into SQLite and query them in plain
//! language.

mod cli;
mod commands;
mod policy;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Shell { db, log, model } => commands::shell::run(db, log, model, cli.verbose),

        Commands::Load {
            db,
            file,
            table,
            on_conflict,
            log,
        } => commands::load::run(db, file, table, on_conflict, log, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
