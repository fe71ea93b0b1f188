//! Deterministic extraction of a SQL statement and explanation from
//! unstructured model output.

use serde::Serialize;

/// How the reply was interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseStatus {
    /// Both headings were honored and a statement was recovered.
    Structured,
    /// No headings found; the entire cleaned reply is treated as SQL.
    FallbackWholeText,
    /// Headings were found but no statement; the reply is unusable.
    Empty,
}

/// A parsed model reply.
#[derive(Debug, Clone, Serialize)]
pub struct ParsedQuery {
    /// The extracted SQL statement.
    pub sql: String,
    /// The extracted explanation, possibly empty.
    pub explanation: String,
    /// How the reply was interpreted.
    pub status: ParseStatus,
}

impl ParsedQuery {
    /// Whether the caller can execute this reply.
    pub fn is_usable(&self) -> bool {
        self.status != ParseStatus::Empty && !self.sql.is_empty()
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Mode {
    None,
    Sql,
    Explanation,
}

/// Parse a raw model reply.
///
/// Fence-marker lines are dropped wholesale, then lines are routed by the
/// most recent case-insensitive "sql query" / "explanation" heading; heading
/// lines themselves are discarded, as are lines before the first heading.
/// With no headings at all, the whole cleaned text is taken as the statement.
pub fn parse(raw: &str) -> ParsedQuery {
    let cleaned: Vec<&str> = raw.lines().filter(|line| !line.contains("```")).collect();

    let mut sql_lines = Vec::new();
    let mut explanation_lines = Vec::new();
    let mut mode = Mode::None;

    for line in &cleaned {
        let lower = line.to_lowercase();
        if lower.contains("sql query") {
            mode = Mode::Sql;
            continue;
        }
        if lower.contains("explanation") {
            mode = Mode::Explanation;
            continue;
        }
        match mode {
            Mode::Sql => sql_lines.push(*line),
            Mode::Explanation => explanation_lines.push(*line),
            Mode::None => {}
        }
    }

    let sql = sql_lines.join("\n").trim().to_string();
    let explanation = explanation_lines.join("\n").trim().to_string();

    if sql.is_empty() && explanation.is_empty() {
        return ParsedQuery {
            sql: cleaned.join("\n").trim().to_string(),
            explanation: String::new(),
            status: ParseStatus::FallbackWholeText,
        };
    }

    let status = if sql.is_empty() {
        ParseStatus::Empty
    } else {
        ParseStatus::Structured
    };

    ParsedQuery {
        sql,
        explanation,
        status,
    }
}
