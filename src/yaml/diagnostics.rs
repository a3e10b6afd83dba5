//! YAML errors that point at the offending spot in the note file

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// A note file that is not valid YAML or does not match the note layout
#[derive(Debug, Error, Diagnostic)]
#[error("could not read note file: {message}")]
#[diagnostic(code(quire::yaml::syntax))]
pub struct YamlSyntaxError {
    #[source_code]
    src: NamedSource<String>,

    #[label("here")]
    span: SourceSpan,

    #[help]
    help: Option<String>,

    message: String,
}

impl YamlSyntaxError {
    /// Build a diagnostic from a serde_yml error and the text it failed on
    pub fn from_serde_error(err: &serde_yml::Error, source: &str, filename: &str) -> Self {
        let offset = err
            .location()
            .map(|loc| byte_offset(source, loc.line(), loc.column()))
            .unwrap_or(0);
        let message = err.to_string();

        Self {
            src: NamedSource::new(filename, source.to_string()),
            span: SourceSpan::from(offset..offset.saturating_add(1).min(source.len().max(1))),
            help: suggest(&message),
            message,
        }
    }
}

/// Any failure while loading a YAML file
#[derive(Debug, Error, Diagnostic)]
pub enum YamlError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(#[from] YamlSyntaxError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Byte offset of a 1-based line/column pair, clamped to the source length
fn byte_offset(source: &str, line: usize, column: usize) -> usize {
    let line_start: usize = source
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();

    let within = source[line_start.min(source.len())..]
        .char_indices()
        .take_while(|(_, c)| *c != '\n')
        .nth(column.saturating_sub(1))
        .map(|(i, _)| i)
        .unwrap_or(0);

    (line_start + within).min(source.len())
}

/// Hints for the mistakes people make when editing note files by hand
fn suggest(message: &str) -> Option<String> {
    let msg = message.to_lowercase();

    if msg.contains("tab") {
        Some("YAML indentation must use spaces, not tabs.".to_string())
    } else if msg.contains("missing field") {
        Some("Note files need `id`, `book`, `body` and `added_on` fields.".to_string())
    } else if msg.contains("mapping values are not allowed") {
        Some("Bodies with colons or several lines need a block scalar: `body: |`".to_string())
    } else {
        None
    }
}
