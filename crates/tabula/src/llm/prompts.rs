//! Prompt construction for SQL generation.

use crate::schema::TableSchema;

/// Render the schema snapshot for the model: one line per table with its
/// columns and declared types.
pub fn render_schema(tables: &[TableSchema]) -> String {
    if tables.is_empty() {
        return "No tables available.".to_string();
    }

    tables
        .iter()
        .map(|schema| {
            let columns = schema
                .columns
                .iter()
                .map(|c| format!("{} {}", c.name, c.storage_type.as_sql()))
                .collect::<Vec<_>>()
                .join(", ");
            format!("- {} ({})", schema.table, columns)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build the instruction payload for SQL generation.
///
/// The two headings are load-bearing: the response parser keys on them.
pub fn sql_instruction(schema_text: &str) -> String {
    format!(
        r#"You are an assistant that converts user requests into SQL statements.
The database uses SQLite. Here is the current schema:
{}

Requirements:
1. Generate a SQL query that accurately answers the user's question or instruction.
2. Ensure the SQL is valid SQLite syntax.
3. Provide a short comment explaining what the query does.
4. Do NOT wrap the SQL in triple backticks or code fences.

Respond EXACTLY in this format (include the headings verbatim):
SQL Query
<Your SQL statement here>

Explanation
<Short explanation here>"#,
        schema_text
    )
}
