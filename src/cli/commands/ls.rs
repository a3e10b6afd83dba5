//! Book and note listings behind `quire view` and `quire view <book>`

use console::style;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use crate::cli::commands::view::{ListNotes, ListScope};
use crate::cli::helpers::{preview_line, truncate_str};
use crate::cli::OutputFormat;
use crate::core::{BookSummary, Note, NoteStore};

/// Width of the body preview in a book listing
const PREVIEW_WIDTH: usize = 70;

/// Lists books and notes from a [`NoteStore`] to stdout
pub struct StoreLister<'a> {
    store: &'a NoteStore,
    format: OutputFormat,
}

impl<'a> StoreLister<'a> {
    pub fn new(store: &'a NoteStore, format: OutputFormat) -> Self {
        Self { store, format }
    }
}

impl ListNotes for StoreLister<'_> {
    fn list(&self, scope: ListScope, name_only: bool) -> Result<()> {
        let output = match scope {
            ListScope::AllBooks => render_books(&self.store.books()?, name_only, self.format)?,
            ListScope::Book(book) => {
                let notes = self.store.notes_in(&book)?;
                render_notes(&book, &notes, self.format)?
            }
        };
        print!("{}", output);
        Ok(())
    }
}

fn to_structured<T: Serialize + ?Sized>(value: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(value).into_diagnostic()?;
            Ok(format!("{}\n", json))
        }
        _ => serde_yml::to_string(value).into_diagnostic(),
    }
}

/// Join rendered lines, ending each with a newline
fn join_lines(lines: Vec<String>) -> String {
    lines.into_iter().map(|line| line + "\n").collect()
}

/// Render the list of books
///
/// `name_only` drops the note counts so the output can be piped.
pub fn render_books(
    books: &[BookSummary],
    name_only: bool,
    format: OutputFormat,
) -> Result<String> {
    let lines: Vec<String> = match format {
        OutputFormat::Json | OutputFormat::Yaml if name_only => {
            let names: Vec<&str> = books.iter().map(|b| b.name.as_str()).collect();
            return to_structured(&names, format);
        }
        OutputFormat::Json | OutputFormat::Yaml => return to_structured(books, format),
        _ if name_only || format == OutputFormat::Id => {
            books.iter().map(|book| book.name.clone()).collect()
        }
        _ if books.is_empty() => vec![
            "No books found.".to_string(),
            String::new(),
            format!(
                "Add a note with: {}",
                style("quire add <book> --content <text>").yellow()
            ),
        ],
        _ => books
            .iter()
            .map(|book| {
                format!(
                    "  {} {}",
                    style(&book.name).bold(),
                    style(format!("({})", book.note_count)).dim()
                )
            })
            .collect(),
    };

    Ok(join_lines(lines))
}

/// Render the notes of one book, one preview line each
pub fn render_notes(book: &str, notes: &[Note], format: OutputFormat) -> Result<String> {
    let lines: Vec<String> = match format {
        OutputFormat::Json | OutputFormat::Yaml => return to_structured(notes, format),
        OutputFormat::Id => notes.iter().map(|note| note.id.to_string()).collect(),
        _ if notes.is_empty() => vec![format!("No notes in {}.", style(book).cyan())],
        _ => std::iter::once(format!("on book {}", style(book).cyan()))
            .chain(notes.iter().map(|note| {
                format!(
                    "  {} {}",
                    style(format!("({})", note.id)).yellow(),
                    truncate_str(preview_line(&note.body), PREVIEW_WIDTH)
                )
            }))
            .collect(),
    };

    Ok(join_lines(lines))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn book(name: &str, note_count: usize) -> BookSummary {
        BookSummary {
            name: name.to_string(),
            note_count,
        }
    }

    fn note(id: u64, body: &str) -> Note {
        Note {
            id,
            book: "rust".to_string(),
            body: body.to_string(),
            added_on: chrono::Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap(),
            edited_on: None,
        }
    }

    #[test]
    fn test_render_books_with_counts() {
        console::set_colors_enabled(false);
        let books = [book("javascript", 3), book("rust", 1)];
        let out = render_books(&books, false, OutputFormat::Tsv).unwrap();
        assert_eq!(out, "  javascript (3)\n  rust (1)\n");
    }

    #[test]
    fn test_render_books_name_only() {
        let books = [book("javascript", 3), book("rust", 1)];
        let out = render_books(&books, true, OutputFormat::Tsv).unwrap();
        assert_eq!(out, "javascript\nrust\n");

        let json = render_books(&books, true, OutputFormat::Json).unwrap();
        let names: Vec<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(names, vec!["javascript", "rust"]);
    }

    #[test]
    fn test_render_books_empty_hint() {
        let out = render_books(&[], false, OutputFormat::Tsv).unwrap();
        assert!(out.starts_with("No books found."));
    }

    #[test]
    fn test_render_books_json_counts() {
        let json = render_books(&[book("rust", 2)], false, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["name"], "rust");
        assert_eq!(value[0]["note_count"], 2);
    }

    #[test]
    fn test_render_notes_previews_first_line() {
        console::set_colors_enabled(false);
        let long = "x".repeat(100);
        let notes = [note(1, "\nownership rules\nmore detail"), note(4, &long)];
        let out = render_notes("rust", &notes, OutputFormat::Tsv).unwrap();

        insta::assert_snapshot!(out, @r"
        on book rust
          (1) ownership rules
          (4) xxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx...
        ");
    }

    #[test]
    fn test_render_notes_ids() {
        let notes = [note(2, "a"), note(5, "b")];
        let out = render_notes("rust", &notes, OutputFormat::Id).unwrap();
        assert_eq!(out, "2\n5\n");
    }

    #[test]
    fn test_render_notes_empty_book() {
        console::set_colors_enabled(false);
        let out = render_notes("rust", &[], OutputFormat::Tsv).unwrap();
        assert_eq!(out, "No notes in rust.\n");
    }
}
