//! The agent loop: relay user input, execute tool calls, repeat until the
//! assistant finishes a turn without asking for tools.

mod r#loop;

pub use r#loop::AgentLoop;
