//! Mock model client for testing.

use std::sync::Mutex;

use super::client::{LlmClient, LlmConfig};
use crate::error::{Result, TabulaError};

/// Mock client that returns a canned reply or a scripted failure, recording
/// every exchange it is asked to make.
pub struct MockClient {
    config: LlmConfig,
    reply: Option<String>,
    exchanges: Mutex<Vec<(String, String)>>,
}

impl MockClient {
    /// A client that always answers with the given text.
    pub fn replying(reply: impl Into<String>) -> Self {
        Self {
            config: LlmConfig::default(),
            reply: Some(reply.into()),
            exchanges: Mutex::new(Vec::new()),
        }
    }

    /// A client whose every call fails, simulating an unreachable service.
    pub fn failing() -> Self {
        Self {
            config: LlmConfig::default(),
            reply: None,
            exchanges: Mutex::new(Vec::new()),
        }
    }

    /// The (instruction, request) pairs seen so far.
    pub fn exchanges(&self) -> Vec<(String, String)> {
        self.exchanges.lock().expect("mock lock poisoned").clone()
    }
}

impl LlmClient for MockClient {
    fn complete(&self, instruction: &str, request: &str) -> Result<String> {
        self.exchanges
            .lock()
            .expect("mock lock poisoned")
            .push((instruction.to_string(), request.to_string()));

        match &self.reply {
            Some(reply) => Ok(reply.clone()),
            None => Err(TabulaError::Translation(
                "mock transport failure".to_string(),
            )),
        }
    }

    fn config(&self) -> &LlmConfig {
        &self.config
    }

    fn name(&self) -> &str {
        "mock"
    }
}
