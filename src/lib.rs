//! minicode: a minimal terminal coding agent.
//!
//! A REPL relays prompts to an Anthropic-style completion service, executes
//! the tool calls the service requests (file reads, writes, edits, glob and
//! regex search, shell commands), and feeds the results back until the
//! service completes a turn without tools.

pub mod agent;
pub mod cli;
pub mod config;
pub mod error;
pub mod providers;
pub mod session;
pub mod tools;
pub mod ui;

pub use agent::AgentLoop;
pub use config::{Backend, Config};
pub use error::{MiniError, Result};
pub use providers::{ClaudeClient, CompletionClient, ToolSpec};
pub use session::{Content, ContentBlock, Conversation, Message, Role};
pub use tools::{ToolError, ToolKind, ToolRegistry};
