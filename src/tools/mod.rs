//! Tools for minicode
//!
//! The tool set is a closed enum: every tool the completion service may call
//! is a [`ToolKind`] variant with an exhaustively-matched handler, so a
//! missing implementation is a compile error rather than a runtime surprise.
//! The registry still exposes a name-keyed lookup for the wire schema.

use serde_json::{json, Map, Value};
use thiserror::Error;

pub mod fs;
pub mod registry;
pub mod search;
pub mod shell;

pub use registry::ToolRegistry;

/// A typed tool failure.
///
/// These are recoverable by the completion service reformulating the call,
/// so the agent loop renders them to text and sends them back as a tool
/// result instead of failing the turn.
#[derive(Error, Debug)]
pub enum ToolError {
    /// The service asked for a name absent from the transmitted schema
    #[error("unknown tool: {0}")]
    UnknownTool(String),

    /// A required argument is missing or has the wrong type
    #[error("missing required argument '{0}'")]
    MissingArg(&'static str),

    /// Path does not exist
    #[error("file not found: {0}")]
    NotFound(String),

    /// Path references a directory where a file is required
    #[error("{0} is a directory, not a file")]
    IsADirectory(String),

    /// The edit target string is not present in the file
    #[error("old string not found in {0}")]
    OldStringNotFound(String),

    /// The edit target is ambiguous; the count tells the service how bad
    #[error("old string appears {count} times in {path}, must be unique")]
    NotUnique { path: String, count: usize },

    /// Invalid glob or regex pattern
    #[error("invalid pattern: {0}")]
    BadPattern(String),

    /// Underlying filesystem or process error
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

/// The closed set of tools advertised to the completion service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    Read,
    Write,
    Edit,
    Glob,
    Grep,
    Bash,
}

impl ToolKind {
    /// Every tool, in schema transmission order.
    pub const ALL: [ToolKind; 6] = [
        ToolKind::Read,
        ToolKind::Write,
        ToolKind::Edit,
        ToolKind::Glob,
        ToolKind::Grep,
        ToolKind::Bash,
    ];

    /// The wire name of this tool.
    pub fn name(&self) -> &'static str {
        match self {
            ToolKind::Read => "read",
            ToolKind::Write => "write",
            ToolKind::Edit => "edit",
            ToolKind::Glob => "glob",
            ToolKind::Grep => "grep",
            ToolKind::Bash => "bash",
        }
    }

    /// Look a tool up by wire name.
    pub fn from_name(name: &str) -> Option<ToolKind> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    /// Human-readable description sent to the completion service.
    pub fn description(&self) -> &'static str {
        match self {
            ToolKind::Read => "Read file with line numbers (file path, not directory)",
            ToolKind::Write => "Write content to file",
            ToolKind::Edit => "Replace old with new in file (old must be unique unless all=true)",
            ToolKind::Glob => "Find files by pattern, sorted by mtime",
            ToolKind::Grep => "Search files for regex pattern",
            ToolKind::Bash => "Run shell command",
        }
    }

    /// Ordered parameter declarations as `(name, type)` pairs.
    ///
    /// The type is one of `string`, `integer`, `boolean`; a trailing `?`
    /// marks the parameter optional. `required` is derived from this single
    /// convention at schema-build time.
    pub fn params(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            ToolKind::Read => &[("path", "string"), ("offset", "integer?"), ("limit", "integer?")],
            ToolKind::Write => &[("path", "string"), ("content", "string")],
            ToolKind::Edit => &[
                ("path", "string"),
                ("old", "string"),
                ("new", "string"),
                ("all", "boolean?"),
            ],
            ToolKind::Glob => &[("pat", "string"), ("path", "string?")],
            ToolKind::Grep => &[("pat", "string"), ("path", "string?")],
            ToolKind::Bash => &[("cmd", "string")],
        }
    }

    /// JSON schema object for this tool's parameters.
    pub fn input_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for (name, declared) in self.params() {
            let base_type = declared.trim_end_matches('?');
            properties.insert((*name).to_string(), json!({ "type": base_type }));
            if !declared.ends_with('?') {
                required.push(Value::String((*name).to_string()));
            }
        }

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    /// Execute this tool with the given arguments.
    ///
    /// Tools run one at a time; the only internal concurrency is the bash
    /// tool's child process, bounded by its timeout.
    pub async fn execute(&self, args: &Value) -> Result<String, ToolError> {
        match self {
            ToolKind::Read => fs::read(args),
            ToolKind::Write => fs::write(args),
            ToolKind::Edit => fs::edit(args),
            ToolKind::Glob => search::glob(args),
            ToolKind::Grep => search::grep(args),
            ToolKind::Bash => shell::bash(args).await,
        }
    }
}

/// Extract a required string argument.
pub(crate) fn str_arg<'a>(args: &'a Value, name: &'static str) -> Result<&'a str, ToolError> {
    args.get(name)
        .and_then(|v| v.as_str())
        .ok_or(ToolError::MissingArg(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_names_unique() {
        use std::collections::HashSet;
        let names: HashSet<_> = ToolKind::ALL.iter().map(|t| t.name()).collect();
        assert_eq!(names.len(), ToolKind::ALL.len());
    }

    #[test]
    fn test_from_name() {
        assert_eq!(ToolKind::from_name("bash"), Some(ToolKind::Bash));
        assert_eq!(ToolKind::from_name("read"), Some(ToolKind::Read));
        assert_eq!(ToolKind::from_name("frobnicate"), None);
    }

    #[test]
    fn test_input_schema_required_derivation() {
        let schema = ToolKind::Read.input_schema();
        assert_eq!(schema["type"], "object");
        // `path` required, `offset`/`limit` optional
        let required: Vec<_> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert_eq!(required, vec!["path"]);
        assert!(schema["properties"]["offset"].is_object());
        assert!(schema["properties"]["limit"].is_object());
    }

    #[test]
    fn test_input_schema_numeric_params_are_integers() {
        let schema = ToolKind::Read.input_schema();
        assert_eq!(schema["properties"]["offset"]["type"], "integer");
        assert_eq!(schema["properties"]["limit"]["type"], "integer");
    }

    #[test]
    fn test_input_schema_strips_optionality_marker() {
        let schema = ToolKind::Edit.input_schema();
        assert_eq!(schema["properties"]["all"]["type"], "boolean");
        let required = schema["required"].as_array().unwrap();
        assert_eq!(required.len(), 3);
        assert!(!required.iter().any(|v| v == "all"));
    }

    #[test]
    fn test_bash_schema() {
        let schema = ToolKind::Bash.input_schema();
        assert_eq!(schema["properties"]["cmd"]["type"], "string");
        assert_eq!(schema["required"][0], "cmd");
    }

    #[test]
    fn test_str_arg() {
        let args = serde_json::json!({"path": "a.txt", "offset": 3});
        assert_eq!(str_arg(&args, "path").unwrap(), "a.txt");
        assert!(matches!(
            str_arg(&args, "offset"),
            Err(ToolError::MissingArg("offset"))
        ));
        assert!(matches!(
            str_arg(&args, "missing"),
            Err(ToolError::MissingArg("missing"))
        ));
    }

    #[test]
    fn test_tool_error_display() {
        assert_eq!(
            ToolError::UnknownTool("x".to_string()).to_string(),
            "unknown tool: x"
        );
        assert_eq!(
            ToolError::NotUnique {
                path: "a.txt".to_string(),
                count: 3
            }
            .to_string(),
            "old string appears 3 times in a.txt, must be unique"
        );
    }
}
