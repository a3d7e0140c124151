//! Completion backends.
//!
//! - `openai_api`: OpenAI Chat Completions over HTTP (default)
//! - `mock`: scripted in-memory client for tests

pub mod mock;
pub mod openai_api;

pub use mock::{MockCompletion, MockCompletionClient};
pub use openai_api::{OpenAiClient, OpenAiClientConfig};
