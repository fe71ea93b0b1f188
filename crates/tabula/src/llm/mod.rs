//! Model client integration for natural-language querying.
//!
//! The query pipeline works against the [`LlmClient`] trait; the OpenAI
//! client is the production transport and [`MockClient`] serves tests. The
//! client handle is constructed once at the composition point and passed by
//! reference, never held in process-wide state.

mod client;
mod mock;
mod openai;
pub mod prompts;

pub use client::{LlmClient, LlmConfig};
pub use mock::MockClient;
pub use openai::OpenAiClient;
