//! File reading and mutation tools: read, write, edit.

use std::fs;
use std::path::Path;

use serde_json::Value;

use super::{str_arg, ToolError};

/// Read a file and return its lines, numbered and gutter-aligned.
///
/// `offset` skips that many lines from the top; `limit` caps how many lines
/// are returned. Line numbers stay absolute so a windowed read still shows
/// real positions.
pub fn read(args: &Value) -> Result<String, ToolError> {
    let path = str_arg(args, "path")?;
    let offset = args.get("offset").and_then(|v| v.as_u64()).unwrap_or(0) as usize;
    let limit = args.get("limit").and_then(|v| v.as_u64()).map(|n| n as usize);

    let p = Path::new(path);
    if !p.exists() {
        return Err(ToolError::NotFound(path.to_string()));
    }
    if p.is_dir() {
        return Err(ToolError::IsADirectory(path.to_string()));
    }

    let content = fs::read_to_string(p)?;
    let lines: Vec<String> = content
        .lines()
        .enumerate()
        .skip(offset)
        .take(limit.unwrap_or(usize::MAX))
        .map(|(idx, line)| format!("{:>4} | {}", idx + 1, line))
        .collect();

    Ok(lines.join("\n"))
}

/// Write content to a file, creating parent directories as needed.
pub fn write(args: &Value) -> Result<String, ToolError> {
    let path = str_arg(args, "path")?;
    let content = str_arg(args, "content")?;

    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, content)?;

    Ok("Ok".to_string())
}

/// Replace `old` with `new` in a file.
///
/// Without `all`, `old` must occur exactly once; an ambiguous target is
/// rejected with its occurrence count so the caller can widen the string.
pub fn edit(args: &Value) -> Result<String, ToolError> {
    let path = str_arg(args, "path")?;
    let old = str_arg(args, "old")?;
    let new = str_arg(args, "new")?;
    let all = args.get("all").and_then(|v| v.as_bool()).unwrap_or(false);

    let p = Path::new(path);
    if !p.exists() {
        return Err(ToolError::NotFound(path.to_string()));
    }
    let content = fs::read_to_string(p)?;

    let count = content.matches(old).count();
    if count == 0 {
        return Err(ToolError::OldStringNotFound(path.to_string()));
    }

    let updated = if all {
        content.replace(old, new)
    } else {
        if count > 1 {
            return Err(ToolError::NotUnique {
                path: path.to_string(),
                count,
            });
        }
        content.replacen(old, new, 1)
    };
    fs::write(p, updated)?;

    Ok("Ok".to_string())
}
