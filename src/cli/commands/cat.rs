//! Single-note display behind `quire view <id>`

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::commands::view::ShowNote;
use crate::cli::OutputFormat;
use crate::core::{Note, NoteStore};

/// Shows notes from a [`NoteStore`] on stdout
pub struct StoreShower<'a> {
    store: &'a NoteStore,
    format: OutputFormat,
}

impl<'a> StoreShower<'a> {
    pub fn new(store: &'a NoteStore, format: OutputFormat) -> Self {
        Self { store, format }
    }
}

impl ShowNote for StoreShower<'_> {
    fn show(&self, index: u64, content_only: bool) -> Result<()> {
        let note = self.store.find(index)?;
        print!("{}", render_note(&note, content_only, self.format)?);
        Ok(())
    }
}

/// Render one note
///
/// `content_only` prints the bare body in every format but `id`.
pub fn render_note(note: &Note, content_only: bool, format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Id {
        return Ok(format!("{}\n", note.id));
    }
    if content_only {
        return Ok(format!("{}\n", note.body));
    }

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(note).into_diagnostic()?;
            Ok(format!("{}\n", json))
        }
        OutputFormat::Yaml => serde_yml::to_string(note).into_diagnostic(),
        _ => Ok(render_human(note)),
    }
}

fn render_human(note: &Note) -> String {
    let rule = style("─".repeat(40)).dim().to_string();

    let mut lines = vec![
        format!("{}: {}", style("Book").bold(), style(&note.book).cyan()),
        format!("{}: {}", style("Note ID").bold(), note.id),
        format!(
            "{}: {}",
            style("Created").bold(),
            note.added_on.format("%Y-%m-%d %H:%M")
        ),
    ];
    if let Some(edited) = note.edited_on {
        lines.push(format!(
            "{}: {}",
            style("Updated").bold(),
            edited.format("%Y-%m-%d %H:%M")
        ));
    }
    lines.push(rule.clone());
    lines.push(note.body.clone());
    lines.push(rule);

    lines.into_iter().map(|line| line + "\n").collect()
}
