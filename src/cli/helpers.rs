//! Shared helper functions for CLI commands
//!
//! Small formatting utilities used by the list and show renderers.

use crate::cli::OutputFormat;
use crate::core::Config;

/// Truncate a string to max_len characters, adding "..." if truncated
///
/// Counts characters rather than bytes so multi-byte text never splits.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// First non-blank line of a note body, used as its preview in listings
pub fn preview_line(body: &str) -> &str {
    body.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("")
}

/// Resolve `--format auto` against the configured default format
///
/// An explicit `--format` always wins; an unrecognised `default_format`
/// in config falls back to plain text.
pub fn resolve_format(requested: OutputFormat, config: &Config) -> OutputFormat {
    if requested != OutputFormat::Auto {
        return requested;
    }

    config
        .default_format
        .as_deref()
        .and_then(|name| <OutputFormat as clap::ValueEnum>::from_str(name, true).ok())
        .filter(|f| *f != OutputFormat::Auto)
        .unwrap_or(OutputFormat::Tsv)
}
