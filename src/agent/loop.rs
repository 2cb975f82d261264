use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::error::{MiniError, Result};
use crate::providers::{CompletionClient, ToolSpec};
use crate::session::{ContentBlock, Conversation, Message};
use crate::tools::ToolRegistry;
use crate::ui::{self, CYAN, DIM, GREEN, RESET};

/// Drives one conversation against a completion client and a tool registry.
///
/// Owns the conversation history; each call to [`AgentLoop::run_turn`]
/// appends the user's message and then alternates completion requests with
/// tool rounds until the assistant produces a turn with no tool calls.
pub struct AgentLoop {
    client: Arc<dyn CompletionClient>,
    registry: ToolRegistry,
    system_prompt: String,
    conversation: Conversation,
    round_limit: Option<usize>,
}

impl AgentLoop {
    pub fn new(client: Arc<dyn CompletionClient>, registry: ToolRegistry) -> Self {
        let cwd = std::env::current_dir()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|_| ".".to_string());
        Self {
            client,
            registry,
            system_prompt: format!("Concise coding assistant. cwd: {}", cwd),
            conversation: Conversation::new(),
            round_limit: None,
        }
    }

    /// Cap the number of tool rounds per turn. Used by tests to keep a
    /// misbehaving scripted client from looping forever; the interactive
    /// loop runs uncapped.
    pub fn with_round_limit(mut self, limit: usize) -> Self {
        self.round_limit = Some(limit);
        self
    }

    /// The conversation so far.
    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Discard the conversation history.
    pub fn clear(&mut self) {
        self.conversation.clear();
        debug!("conversation cleared");
    }

    /// Run one user turn to completion.
    ///
    /// A turn is complete when a completion response contains no tool use
    /// blocks. Tool failures do not end the turn; they are rendered to text
    /// and returned to the service as the tool's result.
    #[instrument(skip_all)]
    pub async fn run_turn(&mut self, input: &str) -> Result<()> {
        self.conversation.push(Message::user(input));
        let specs: Vec<ToolSpec> = self.registry.specs();

        let mut rounds = 0usize;
        loop {
            if let Some(limit) = self.round_limit {
                if rounds >= limit {
                    warn!(rounds, "tool round limit reached");
                    return Err(MiniError::Agent(format!(
                        "tool round limit reached after {} rounds",
                        rounds
                    )));
                }
            }
            rounds += 1;

            let blocks = self
                .client
                .complete(&self.system_prompt, self.conversation.messages(), &specs)
                .await?;

            let mut tool_results = Vec::new();
            for block in &blocks {
                match block {
                    ContentBlock::Text { text } => {
                        println!("\n{CYAN}⏺{RESET} {}", ui::render_md(text));
                    }
                    ContentBlock::ToolUse { id, name, input } => {
                        println!(
                            "\n{GREEN}╭ 🛠️  {}{RESET} {DIM}({}){RESET}",
                            capitalize(name),
                            ui::arg_preview(input)
                        );

                        let content = match self.registry.dispatch(name, input).await {
                            Ok(output) => output,
                            Err(e) => format!("Error: {}", e),
                        };
                        println!(
                            "{GREEN}╰{RESET} {DIM}⟶ {}{RESET}",
                            ui::result_preview(&content)
                        );
                        tool_results.push(ContentBlock::tool_result(id, content));
                    }
                    ContentBlock::ToolResult { .. } => {
                        // Responses never carry tool results; ignore if one appears
                        warn!("unexpected tool_result block in completion response");
                    }
                }
            }

            self.conversation.push(Message::assistant_blocks(blocks));

            if tool_results.is_empty() {
                debug!(rounds, "turn complete");
                return Ok(());
            }
            self.conversation.push(Message::tool_results(tool_results));
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
