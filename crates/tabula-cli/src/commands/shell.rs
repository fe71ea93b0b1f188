//! Shell command - interactive loop over one store connection.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use colored::Colorize;
use tabula::{
    EventLog, IngestAction, IngestionEngine, LlmConfig, OpenAiClient, Parser, QueryExecutor,
    QueryOutcome, Result, Store, Translator, ROW_LIMIT,
};

use crate::policy::PromptPolicy;

pub fn run(
    db: PathBuf,
    log_path: PathBuf,
    model: Option<String>,
    verbose: bool,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let store = Store::open(&db)?;
    let log = EventLog::new(log_path);

    // One client handle for the whole session; `ask` degrades gracefully
    // when the credential is missing
    let client = build_client(model);
    if client.is_none() {
        println!(
            "{} OPENAI_API_KEY is not set; the 'ask' command is disabled.",
            "Note:".yellow().bold()
        );
    }

    println!("{} {}", "Connected to".cyan().bold(), db.display());
    println!("Type 'help' for a list of commands.");

    let stdin = io::stdin();
    loop {
        print!("> ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let (verb, rest) = match input.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb.to_lowercase(), rest.trim()),
            None => (input.to_lowercase(), ""),
        };

        if verb == "exit" {
            println!("Exiting.");
            break;
        }

        let result = match verb.as_str() {
            "help" => {
                print_help();
                Ok(())
            }
            "list" => cmd_list(&store, rest),
            "load" => cmd_load(&store, &log, rest, verbose),
            "query" => cmd_query(&store, &log, rest),
            "ask" => cmd_ask(&store, &log, client.as_ref(), rest),
            _ => {
                println!("Unknown command: {}", verb);
                println!("Type 'help' to see available commands.");
                Ok(())
            }
        };

        // No single bad command terminates the session
        if let Err(e) = result {
            log.record(&format!("command '{}' failed: {}", verb, e));
            eprintln!("{} {}", "Error:".red().bold(), e);
        }
    }

    Ok(())
}

fn build_client(model: Option<String>) -> Option<OpenAiClient> {
    let api_key = std::env::var("OPENAI_API_KEY").ok()?;
    let config = match model {
        Some(model) => LlmConfig {
            model,
            ..LlmConfig::default()
        },
        None => LlmConfig::default(),
    };
    OpenAiClient::with_config(api_key, config).ok()
}

fn print_help() {
    println!("Commands:");
    println!("  load <file> <table>   - Load a delimited file into the specified table.");
    println!("  list tables           - List all tables in the current database.");
    println!("  query <SQL statement> - Run a SQL statement directly.");
    println!("  ask <natural language>- Let the model generate SQL and execute it.");
    println!("  help                  - Show this message.");
    println!("  exit                  - Leave the shell.");
}

fn cmd_list(store: &Store, rest: &str) -> Result<()> {
    if !rest.eq_ignore_ascii_case("tables") {
        println!("Usage: list tables");
        return Ok(());
    }

    let names = store.table_names()?;
    if names.is_empty() {
        println!("No tables found in the database.");
    } else {
        println!("Tables in this database:");
        for name in names {
            println!(" - {}", name);
        }
    }
    Ok(())
}

fn cmd_load(store: &Store, log: &EventLog, rest: &str, verbose: bool) -> Result<()> {
    let args: Vec<&str> = rest.split_whitespace().collect();
    let [file, table] = args.as_slice() else {
        println!("Usage: load <file> <table>");
        return Ok(());
    };

    let (data, meta) = Parser::new().parse_file(file)?;
    if verbose {
        println!(
            "Read {} ({} rows, {} columns, {})",
            meta.file, meta.row_count, meta.column_count, meta.format
        );
    }

    let engine = IngestionEngine::new(store).with_log(log);
    let report = engine.ingest(&data, table, &PromptPolicy)?;

    match report.action {
        IngestAction::Created => println!(
            "{} table '{}' with {} rows",
            "Created".green().bold(),
            report.table,
            report.rows_inserted
        ),
        IngestAction::Appended => println!(
            "{} {} rows to '{}'",
            "Appended".green().bold(),
            report.rows_inserted,
            report.table
        ),
        IngestAction::Overwritten => println!(
            "{} '{}' with {} rows",
            "Overwrote".green().bold(),
            report.table,
            report.rows_inserted
        ),
        IngestAction::Renamed => println!(
            "{} into '{}' with {} rows",
            "Imported".green().bold(),
            report.table,
            report.rows_inserted
        ),
        IngestAction::Skipped => println!("{} nothing imported", "Skipped:".yellow().bold()),
    }
    Ok(())
}

fn cmd_query(store: &Store, log: &EventLog, rest: &str) -> Result<()> {
    if rest.is_empty() {
        println!("Usage: query <SQL statement>");
        return Ok(());
    }

    print_outcome(log, QueryExecutor::new(store).execute(rest));
    Ok(())
}

fn cmd_ask(store: &Store, log: &EventLog, client: Option<&OpenAiClient>, rest: &str) -> Result<()> {
    if rest.is_empty() {
        println!("Usage: ask <natural language prompt>");
        return Ok(());
    }
    let Some(client) = client else {
        println!("The 'ask' command needs a model client. Set OPENAI_API_KEY and restart.");
        return Ok(());
    };

    let tables = store.snapshot()?;
    let translator = Translator::new(client).with_log(log);

    let Some(raw) = translator.translate(&tables, rest) else {
        println!("No response from the model. Check the connection and try again.");
        return Ok(());
    };

    let parsed = tabula::parse(&raw);
    if !parsed.is_usable() {
        println!("Could not extract SQL from the model response:");
        println!("{}", raw);
        return Ok(());
    }

    println!();
    println!("{}", "--- Generated SQL ---".cyan().bold());
    println!("{}", parsed.sql);
    println!("{}", "--- Explanation ---".cyan().bold());
    if parsed.explanation.is_empty() {
        println!("No explanation provided.");
    } else {
        println!("{}", parsed.explanation);
    }

    print_outcome(log, QueryExecutor::new(store).execute(&parsed.sql));
    Ok(())
}

fn print_outcome(log: &EventLog, outcome: QueryOutcome) {
    match outcome {
        QueryOutcome::Failed(detail) => {
            log.record(&format!("statement failed: {}", detail.message));
            println!(
                "{} {}",
                "Error executing SQL:".red().bold(),
                detail.message
            );
        }
        QueryOutcome::Rows(set) => {
            if set.columns.is_empty() {
                println!("OK, {} row(s) affected.", set.changes);
            } else if set.rows.is_empty() {
                println!("No rows returned.");
            } else {
                println!();
                println!("Query results (up to {} rows):", ROW_LIMIT);
                println!("    {}", set.columns.join(" | ").bold());
                for row in &set.rows {
                    println!("{:>3}. {}", row.position, row.values.join(" | "));
                }
                if set.truncated {
                    println!("    {}", "(more rows not shown)".dimmed());
                }
            }
        }
    }
}
