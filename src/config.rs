//! Configuration for minicode
//!
//! Credentials, endpoint and model identifier are resolved once at startup
//! from the environment and passed by reference into the agent loop and the
//! completion client — no ambient globals. `OPENROUTER_API_KEY` takes
//! precedence over `ANTHROPIC_API_KEY`; each selects its endpoint and
//! default model, and `MODEL` overrides the model identifier.

use std::env;
use std::fmt;

use crate::error::{MiniError, Result};

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const OPENROUTER_API_URL: &str = "https://openrouter.ai/api/v1/messages";

const ANTHROPIC_DEFAULT_MODEL: &str = "claude-opus-4-5";
const OPENROUTER_DEFAULT_MODEL: &str = "anthropic/claude-opus-4.5";

/// Default max-output-tokens budget sent with every completion request.
pub const DEFAULT_MAX_TOKENS: u32 = 8192;

/// Which completion-service backend the credentials select.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Direct Anthropic API (`x-api-key` auth)
    Anthropic,
    /// OpenRouter's Anthropic-compatible endpoint (`Bearer` auth)
    OpenRouter,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Anthropic => write!(f, "Anthropic"),
            Backend::OpenRouter => write!(f, "OpenRouter"),
        }
    }
}

/// Resolved startup configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Selected backend
    pub backend: Backend,
    /// API key for the selected backend
    pub api_key: String,
    /// Messages endpoint URL
    pub api_url: String,
    /// Model identifier
    pub model: String,
    /// Max-output-tokens budget per request
    pub max_tokens: u32,
}

impl Config {
    /// Resolve configuration from the process environment.
    ///
    /// Fatal if neither credential is present; the caller reports the error
    /// and exits before entering the loop.
    pub fn from_env() -> Result<Self> {
        Self::resolve(
            env::var("OPENROUTER_API_KEY").ok(),
            env::var("ANTHROPIC_API_KEY").ok(),
            env::var("MODEL").ok(),
        )
    }

    /// Pure resolution of credential precedence, endpoint and model.
    pub fn resolve(
        openrouter_key: Option<String>,
        anthropic_key: Option<String>,
        model_override: Option<String>,
    ) -> Result<Self> {
        let (backend, api_key, api_url, default_model) = match (openrouter_key, anthropic_key) {
            (Some(key), _) if !key.is_empty() => (
                Backend::OpenRouter,
                key,
                OPENROUTER_API_URL,
                OPENROUTER_DEFAULT_MODEL,
            ),
            (_, Some(key)) if !key.is_empty() => (
                Backend::Anthropic,
                key,
                ANTHROPIC_API_URL,
                ANTHROPIC_DEFAULT_MODEL,
            ),
            _ => {
                return Err(MiniError::Config(
                    "OPENROUTER_API_KEY or ANTHROPIC_API_KEY not found in environment".to_string(),
                ))
            }
        };

        Ok(Self {
            backend,
            api_key,
            api_url: api_url.to_string(),
            model: model_override
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| default_model.to_string()),
            max_tokens: DEFAULT_MAX_TOKENS,
        })
    }
}
