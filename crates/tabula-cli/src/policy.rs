//! Interactive conflict resolution at the terminal.

use std::io::{self, BufRead, Write};

use colored::Colorize;
use indexmap::IndexSet;
use tabula::{ConflictDecision, ConflictPolicy};

/// Conflict policy that asks the user at the prompt.
///
/// Anything other than an explicit overwrite or rename answer skips the
/// import, so a stray newline never destroys data.
pub struct PromptPolicy;

impl ConflictPolicy for PromptPolicy {
    fn decide(
        &self,
        existing: &IndexSet<String>,
        incoming: &IndexSet<String>,
    ) -> ConflictDecision {
        println!(
            "{} the table already exists with a different schema.",
            "Conflict:".yellow().bold()
        );
        println!("  Existing columns: {}", join(existing));
        println!("  Incoming columns: {}", join(incoming));
        println!();
        println!("Choose an option:");
        println!("  (O)verwrite existing table (will drop and recreate)");
        println!("  (R)ename new table before import");
        println!("  (S)kip importing this file");

        match read_line("Enter O/R/S: ").to_uppercase().as_str() {
            "O" => ConflictDecision::Overwrite,
            "R" => ConflictDecision::Rename(read_line("Enter a new table name: ")),
            _ => ConflictDecision::Skip,
        }
    }
}

fn join(names: &IndexSet<String>) -> String {
    names.iter().cloned().collect::<Vec<_>>().join(", ")
}

fn read_line(prompt: &str) -> String {
    print!("{}", prompt);
    let _ = io::stdout().flush();

    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(_) => line.trim().to_string(),
        Err(_) => String::new(),
    }
}
