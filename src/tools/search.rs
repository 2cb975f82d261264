//! File discovery tools: glob and grep.

use std::fs;
use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::Value;

use super::{str_arg, ToolError};

/// Cap on total grep hits across all files in one call.
const GREP_MAX_HITS: usize = 50;

/// Find files matching a glob pattern, most recently modified first.
pub fn glob(args: &Value) -> Result<String, ToolError> {
    let pat = str_arg(args, "pat")?;
    let path = args.get("path").and_then(|v| v.as_str()).unwrap_or(".");

    let pattern = format!("{}/{}", path, pat).replace("//", "/");
    let entries =
        ::glob::glob(&pattern).map_err(|e| ToolError::BadPattern(e.to_string()))?;

    let mut matches: Vec<(SystemTime, String)> = entries
        .flatten()
        .map(|p| {
            // Non-files sort as if never modified, so they land last
            let mtime = if p.is_file() {
                fs::metadata(&p)
                    .and_then(|m| m.modified())
                    .unwrap_or(UNIX_EPOCH)
            } else {
                UNIX_EPOCH
            };
            (mtime, p.to_string_lossy().to_string())
        })
        .collect();
    matches.sort_by(|a, b| b.0.cmp(&a.0));

    if matches.is_empty() {
        return Ok("None".to_string());
    }
    Ok(matches
        .into_iter()
        .map(|(_, p)| p)
        .collect::<Vec<_>>()
        .join("\n"))
}

/// Search files under a directory for a regex, `path:line:text` per hit.
///
/// The walk is recursive; unreadable and non-UTF-8-clean files are read
/// lossily or skipped. Output is capped at [`GREP_MAX_HITS`] total hits.
pub fn grep(args: &Value) -> Result<String, ToolError> {
    let pat = str_arg(args, "pat")?;
    let path = args.get("path").and_then(|v| v.as_str()).unwrap_or(".");

    let re = regex::Regex::new(pat).map_err(|e| ToolError::BadPattern(e.to_string()))?;
    let walk = ::glob::glob(&format!("{}/**/*", path))
        .map_err(|e| ToolError::BadPattern(e.to_string()))?;

    let mut hits = Vec::new();
    'files: for entry in walk.flatten() {
        if !entry.is_file() {
            continue;
        }
        let bytes = match fs::read(&entry) {
            Ok(b) => b,
            Err(_) => continue,
        };
        let content = String::from_utf8_lossy(&bytes);
        for (idx, line) in content.lines().enumerate() {
            if re.is_match(line) {
                hits.push(format!("{}:{}:{}", entry.display(), idx + 1, line));
                if hits.len() >= GREP_MAX_HITS {
                    break 'files;
                }
            }
        }
    }

    if hits.is_empty() {
        return Ok("None".to_string());
    }
    Ok(hits.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn tree() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("a.rs"), "fn alpha() {}\n").unwrap();
        fs::write(dir.path().join("b.txt"), "beta\n").unwrap();
        fs::write(dir.path().join("sub/c.rs"), "fn gamma() {}\nfn delta() {}\n").unwrap();
        dir
    }

    #[test]
    fn test_glob_matches_pattern() {
        let dir = tree();
        let out = glob(&json!({
            "pat": "**/*.rs",
            "path": dir.path().to_string_lossy()
        }))
        .unwrap();
        assert!(out.contains("a.rs"));
        assert!(out.contains("c.rs"));
        assert!(!out.contains("b.txt"));
    }

    #[test]
    fn test_glob_no_matches_is_none() {
        let dir = tree();
        let out = glob(&json!({
            "pat": "*.py",
            "path": dir.path().to_string_lossy()
        }))
        .unwrap();
        assert_eq!(out, "None");
    }

    #[test]
    fn test_glob_sorts_by_mtime_descending() {
        let dir = TempDir::new().unwrap();
        for (name, secs) in [("old.txt", 1_000), ("mid.txt", 2_000), ("new.txt", 3_000)] {
            let file = fs::File::create(dir.path().join(name)).unwrap();
            file.set_modified(UNIX_EPOCH + std::time::Duration::from_secs(secs))
                .unwrap();
        }
        let out = glob(&json!({
            "pat": "*.txt",
            "path": dir.path().to_string_lossy()
        }))
        .unwrap();
        let names: Vec<_> = out
            .lines()
            .map(|l| l.rsplit('/').next().unwrap())
            .collect();
        assert_eq!(names, vec!["new.txt", "mid.txt", "old.txt"]);
    }

    #[test]
    fn test_glob_directories_sort_last() {
        let dir = TempDir::new().unwrap();
        let file = fs::File::create(dir.path().join("old.txt")).unwrap();
        file.set_modified(UNIX_EPOCH + std::time::Duration::from_secs(1_000))
            .unwrap();
        // A fresh directory matching the pattern must not outrank the file
        fs::create_dir(dir.path().join("newdir.txt")).unwrap();

        let out = glob(&json!({
            "pat": "*.txt",
            "path": dir.path().to_string_lossy()
        }))
        .unwrap();
        let names: Vec<_> = out
            .lines()
            .map(|l| l.rsplit('/').next().unwrap())
            .collect();
        assert_eq!(names, vec!["old.txt", "newdir.txt"]);
    }

    #[test]
    fn test_glob_bad_pattern() {
        let err = glob(&json!({"pat": "***"})).unwrap_err();
        assert!(matches!(err, ToolError::BadPattern(_)));
    }

    #[test]
    fn test_glob_default_path_joins_cleanly() {
        // With the default path the pattern is "./<pat>", never ".//<pat>"
        let out = glob(&json!({"pat": "Cargo.toml"})).unwrap();
        assert!(out.contains("Cargo.toml"));
    }

    #[test]
    fn test_grep_reports_path_line_text() {
        let dir = tree();
        let out = grep(&json!({
            "pat": "fn \\w+",
            "path": dir.path().to_string_lossy()
        }))
        .unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines.iter().any(|l| l.contains("a.rs:1:fn alpha() {}")));
        assert!(lines.iter().any(|l| l.contains("c.rs:2:fn delta() {}")));
    }

    #[test]
    fn test_grep_no_hits_is_none() {
        let dir = tree();
        let out = grep(&json!({
            "pat": "nonexistent_symbol",
            "path": dir.path().to_string_lossy()
        }))
        .unwrap();
        assert_eq!(out, "None");
    }

    #[test]
    fn test_grep_invalid_regex() {
        let err = grep(&json!({"pat": "[unclosed"})).unwrap_err();
        assert!(matches!(err, ToolError::BadPattern(_)));
    }

    #[test]
    fn test_grep_caps_total_hits() {
        let dir = TempDir::new().unwrap();
        let body = "match me\n".repeat(200);
        fs::write(dir.path().join("big.txt"), body).unwrap();
        let out = grep(&json!({
            "pat": "match me",
            "path": dir.path().to_string_lossy()
        }))
        .unwrap();
        assert_eq!(out.lines().count(), GREP_MAX_HITS);
    }
}
