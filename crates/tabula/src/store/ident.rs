//! Identifier validation and quoting for generated SQL.
//!
//! Table and column names originate in file headers and user input, so they
//! are never interpolated bare: every identifier is validated and rendered as
//! a double-quoted SQLite identifier.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Result, TabulaError};

static CONTROL_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\x00-\x1f\x7f]").unwrap());

/// Validate an identifier and render it quoted for SQL text.
///
/// Rejects blank names and names containing control characters; embedded
/// double quotes are escaped by doubling.
pub fn quote_ident(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(TabulaError::Input(
            "identifier must not be blank".to_string(),
        ));
    }
    if CONTROL_CHARS.is_match(trimmed) {
        return Err(TabulaError::Input(format!(
            "identifier '{}' contains control characters",
            trimmed.escape_default()
        )));
    }
    Ok(format!("\"{}\"", trimmed.replace('"', "\"\"")))
}
