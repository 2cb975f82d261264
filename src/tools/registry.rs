//! Tool registry: schema export and name-keyed dispatch.

use std::time::Instant;

use serde_json::Value;
use tracing::{debug, error, info};

use super::{ToolError, ToolKind};
use crate::providers::ToolSpec;

/// The set of tools advertised to the completion service for one session.
///
/// Dispatch is name-keyed because that is what comes over the wire; the
/// handlers themselves are the exhaustive [`ToolKind`] match.
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    tools: Vec<ToolKind>,
}

impl ToolRegistry {
    /// Create a registry with the full tool set.
    pub fn new() -> Self {
        let registry = Self {
            tools: ToolKind::ALL.to_vec(),
        };
        debug!(count = registry.tools.len(), "tool registry initialized");
        registry
    }

    /// Wire schema for every registered tool, in registration order.
    pub fn specs(&self) -> Vec<ToolSpec> {
        self.tools
            .iter()
            .map(|t| ToolSpec {
                name: t.name().to_string(),
                description: t.description().to_string(),
                input_schema: t.input_schema(),
            })
            .collect()
    }

    /// Execute the named tool with the given arguments.
    pub async fn dispatch(&self, name: &str, args: &Value) -> Result<String, ToolError> {
        let Some(tool) = self.tools.iter().find(|t| t.name() == name) else {
            error!(tool = name, "unknown tool requested");
            return Err(ToolError::UnknownTool(name.to_string()));
        };

        let start = Instant::now();
        match tool.execute(args).await {
            Ok(output) => {
                info!(
                    tool = name,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    bytes = output.len(),
                    "tool executed"
                );
                Ok(output)
            }
            Err(e) => {
                error!(
                    tool = name,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    error = %e,
                    "tool failed"
                );
                Err(e)
            }
        }
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
