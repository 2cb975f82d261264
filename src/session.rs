//! Conversation state for minicode
//!
//! This module defines the message types shared between the agent loop and
//! the completion service. Messages carry either plain text or an ordered
//! sequence of typed content blocks, mirroring the Anthropic Messages wire
//! format directly so they serialize without conversion.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The role of a message sender in a conversation.
///
/// The completion API only knows `user` and `assistant`; the system prompt
/// travels in a separate request field and tool results are sent as user
/// messages carrying `tool_result` blocks.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Messages from the user (including tool results)
    User,
    /// Messages from the assistant
    Assistant,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// A content block within a message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum ContentBlock {
    /// Text content
    #[serde(rename = "text")]
    Text { text: String },
    /// Tool use (assistant requesting to call a tool)
    #[serde(rename = "tool_use")]
    ToolUse { id: String, name: String, input: Value },
    /// Tool result (user providing result of tool execution)
    #[serde(rename = "tool_result")]
    ToolResult { tool_use_id: String, content: String },
}

impl ContentBlock {
    /// Create a text block.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Create a tool result block keyed to the originating call's id.
    ///
    /// All tool outputs are flattened to text before transmission.
    pub fn tool_result(tool_use_id: &str, content: impl Into<String>) -> Self {
        Self::ToolResult {
            tool_use_id: tool_use_id.to_string(),
            content: content.into(),
        }
    }

    /// Check if this is a tool use block.
    pub fn is_tool_use(&self) -> bool {
        matches!(self, ContentBlock::ToolUse { .. })
    }
}

/// Message content — simple text or an ordered sequence of content blocks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Content {
    /// Simple text content
    Text(String),
    /// Array of content blocks (for tool calls/results)
    Blocks(Vec<ContentBlock>),
}

/// A single message in a conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    /// The role of the message sender
    pub role: Role,
    /// The message content
    pub content: Content,
}

impl Message {
    /// Create a new plain-text user message.
    pub fn user(content: &str) -> Self {
        Self {
            role: Role::User,
            content: Content::Text(content.to_string()),
        }
    }

    /// Create an assistant message from the blocks of a completion response.
    pub fn assistant_blocks(blocks: Vec<ContentBlock>) -> Self {
        Self {
            role: Role::Assistant,
            content: Content::Blocks(blocks),
        }
    }

    /// Create the user message that carries one round of tool results back.
    pub fn tool_results(blocks: Vec<ContentBlock>) -> Self {
        Self {
            role: Role::User,
            content: Content::Blocks(blocks),
        }
    }

    /// The tool use blocks of this message, in emission order.
    pub fn tool_uses(&self) -> Vec<&ContentBlock> {
        match &self.content {
            Content::Blocks(blocks) => blocks.iter().filter(|b| b.is_tool_use()).collect(),
            Content::Text(_) => Vec::new(),
        }
    }
}

/// An append-only ordered sequence of messages.
///
/// Created empty at session start, grows monotonically during a session, and
/// is reset only by the user's clear command. Order is semantically
/// significant: it defines turn causality.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    /// Create a new empty conversation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Reset the conversation to empty.
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// The full message history, oldest first.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Number of messages in the conversation.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Check if the conversation is empty.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// The last message, if any.
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_message_user() {
        let msg = Message::user("Hello");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.content, Content::Text("Hello".to_string()));
        assert!(msg.tool_uses().is_empty());
    }

    #[test]
    fn test_message_tool_uses() {
        let msg = Message::assistant_blocks(vec![
            ContentBlock::text("Let me look."),
            ContentBlock::ToolUse {
                id: "toolu_01".to_string(),
                name: "read".to_string(),
                input: json!({"path": "src/main.rs"}),
            },
        ]);
        let uses = msg.tool_uses();
        assert_eq!(uses.len(), 1);
        assert!(uses[0].is_tool_use());
    }

    #[test]
    fn test_conversation_push_and_clear() {
        let mut conv = Conversation::new();
        assert!(conv.is_empty());

        conv.push(Message::user("Hello"));
        conv.push(Message::assistant_blocks(vec![ContentBlock::text("Hi!")]));
        assert_eq!(conv.len(), 2);
        assert_eq!(conv.last().unwrap().role, Role::Assistant);

        conv.clear();
        assert!(conv.is_empty());
    }

    #[test]
    fn test_role_serialize() {
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), r#""user""#);
        assert_eq!(
            serde_json::to_string(&Role::Assistant).unwrap(),
            r#""assistant""#
        );
    }

    #[test]
    fn test_content_block_serialization() {
        let text_block = ContentBlock::text("Hello");
        let json = serde_json::to_string(&text_block).unwrap();
        assert!(json.contains(r#""type":"text""#));
        assert!(json.contains(r#""text":"Hello""#));

        let tool_use = ContentBlock::ToolUse {
            id: "toolu_01".to_string(),
            name: "grep".to_string(),
            input: json!({"pat": "fn main"}),
        };
        let json = serde_json::to_string(&tool_use).unwrap();
        assert!(json.contains(r#""type":"tool_use""#));
        assert!(json.contains(r#""id":"toolu_01""#));
        assert!(json.contains(r#""name":"grep""#));

        let tool_result = ContentBlock::tool_result("toolu_01", "3 matches");
        let json = serde_json::to_string(&tool_result).unwrap();
        assert!(json.contains(r#""type":"tool_result""#));
        assert!(json.contains(r#""tool_use_id":"toolu_01""#));
    }

    #[test]
    fn test_plain_text_message_serializes_as_string() {
        let msg = Message::user("Hello");
        let json = serde_json::to_string(&msg).unwrap();
        assert_eq!(json, r#"{"role":"user","content":"Hello"}"#);
    }

    #[test]
    fn test_block_message_roundtrip() {
        let msg = Message::tool_results(vec![ContentBlock::tool_result("toolu_01", "Ok")]);
        let json = serde_json::to_string(&msg).unwrap();
        let back: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(back, msg);
    }

    #[test]
    fn test_response_content_deserializes() {
        // Shape of the `content` field of a completion response
        let raw = r#"[
            {"type":"text","text":"Reading the file."},
            {"type":"tool_use","id":"toolu_01","name":"read","input":{"path":"a.txt"}}
        ]"#;
        let blocks: Vec<ContentBlock> = serde_json::from_str(raw).unwrap();
        assert_eq!(blocks.len(), 2);
        assert!(blocks[1].is_tool_use());
    }
}
