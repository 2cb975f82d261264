//! Completion service clients.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::session::{ContentBlock, Message};

pub mod claude;

pub use claude::ClaudeClient;

/// Wire schema describing one tool to the completion service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

/// A client for an Anthropic-style messages endpoint.
///
/// One request in, one parsed response out; the agent loop owns retrying a
/// turn by appending tool results and calling again.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Request a completion for the conversation so far.
    ///
    /// Returns the assistant's content blocks in emission order. Tool use
    /// blocks in the result mean the caller owes a round of tool results
    /// before the turn can end.
    async fn complete(
        &self,
        system: &str,
        messages: &[Message],
        tools: &[ToolSpec],
    ) -> Result<Vec<ContentBlock>>;
}
