//! Terminal rendering: ANSI styling, lightweight markdown, previews.

use serde_json::Value;

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";
pub const GREEN: &str = "\x1b[32m";
pub const RED: &str = "\x1b[31m";
pub const MAGENTA: &str = "\x1b[35m";

const SEPARATOR_MAX_WIDTH: usize = 100;
const ARG_PREVIEW_CHARS: usize = 50;
const RESULT_PREVIEW_CHARS: usize = 80;

/// A dim horizontal rule sized to the terminal, capped at 100 columns.
pub fn separator() -> String {
    let width = terminal_width().min(SEPARATOR_MAX_WIDTH);
    format!("{}{}{}", DIM, "─".repeat(width), RESET)
}

fn terminal_width() -> usize {
    // Good enough without a terminal-size crate; COLUMNS is set by most shells
    std::env::var("COLUMNS")
        .ok()
        .and_then(|c| c.parse().ok())
        .unwrap_or(80)
}

/// Render a minimal markdown subset to ANSI: inline code, bold, `###` headers.
pub fn render_md(text: &str) -> String {
    let code = regex::Regex::new(r"`([^`]*)`");
    let bold = regex::Regex::new(r"\*\*(.+?)\*\*");
    let header = regex::Regex::new(r"###\s*(.+)");
    let (Ok(code), Ok(bold), Ok(header)) = (code, bold, header) else {
        return text.to_string();
    };

    let text = code.replace_all(text, format!("{CYAN}$1{RESET}"));
    let text = bold.replace_all(&text, format!("{BOLD}$1{RESET}"));
    header
        .replace_all(&text, format!("{BOLD}{MAGENTA}$1{RESET}"))
        .to_string()
}

/// Preview of a tool call's first argument value, truncated for one line.
pub fn arg_preview(input: &Value) -> String {
    let first = input.as_object().and_then(|o| o.values().next());
    let rendered = match first {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    };
    truncate_chars(&rendered, ARG_PREVIEW_CHARS)
}

/// One-line preview of a tool result: first line, truncated, with a count of
/// the lines not shown.
pub fn result_preview(result: &str) -> String {
    let mut lines = result.split('\n');
    let first = lines.next().unwrap_or("");
    let rest = lines.count();

    let mut preview = truncate_chars(first, RESULT_PREVIEW_CHARS);
    if rest > 0 {
        preview.push_str(&format!(" ... +{} lines", rest));
    } else if first.chars().count() > RESULT_PREVIEW_CHARS {
        preview.push_str("...");
    }
    preview
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
