//! Natural-language to SQL translation via the model client.

use crate::diag::EventLog;
use crate::llm::{prompts, LlmClient};
use crate::schema::TableSchema;

/// Builds the schema-aware instruction and invokes the model.
pub struct Translator<'a> {
    client: &'a dyn LlmClient,
    log: Option<&'a EventLog>,
}

impl<'a> Translator<'a> {
    /// Create a translator over the given client.
    pub fn new(client: &'a dyn LlmClient) -> Self {
        Self { client, log: None }
    }

    /// Record translation failures to a diagnostic log.
    pub fn with_log(mut self, log: &'a EventLog) -> Self {
        self.log = Some(log);
        self
    }

    /// Translate a natural-language request into raw model output.
    ///
    /// Returns `None` on any transport or credential failure, or when the
    /// reply is blank; callers treat absence as recoverable and re-prompt.
    pub fn translate(&self, tables: &[TableSchema], request: &str) -> Option<String> {
        let instruction = prompts::sql_instruction(&prompts::render_schema(tables));

        match self.client.complete(&instruction, request) {
            Ok(text) if !text.trim().is_empty() => Some(text),
            Ok(_) => {
                self.note("model returned an empty reply");
                None
            }
            Err(e) => {
                self.note(&format!("translation via '{}' failed: {}", self.client.name(), e));
                None
            }
        }
    }

    fn note(&self, message: &str) {
        if let Some(log) = self.log {
            log.record(message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MockClient;
    use crate::schema::{ColumnSchema, StorageType};

    #[test]
    fn test_translate_passes_schema_and_request() {
        let client = MockClient::replying("SQL Query\nSELECT 1;\nExplanation\nOne.");
        let tables = vec![TableSchema::with_columns(
            "people",
            vec![ColumnSchema::new("id", StorageType::Integer, 0)],
        )];

        let raw = Translator::new(&client).translate(&tables, "how many people?");
        assert!(raw.is_some());

        let exchanges = client.exchanges();
        assert_eq!(exchanges.len(), 1);
        assert!(exchanges[0].0.contains("- people (id INTEGER)"));
        assert_eq!(exchanges[0].1, "how many people?");
    }

    #[test]
    fn test_transport_failure_is_none() {
        let client = MockClient::failing();
        assert!(Translator::new(&client).translate(&[], "anything").is_none());
    }

    #[test]
    fn test_blank_reply_is_none() {
        let client = MockClient::replying("   \n  ");
        assert!(Translator::new(&client).translate(&[], "anything").is_none());
    }
}
