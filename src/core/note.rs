//! Note and book types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single note, stored as `books/<book>/<id>.note.yaml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Project-wide numeric ID, used by `quire view <id>`
    pub id: u64,

    /// Book the note belongs to
    pub book: String,

    /// Note text
    pub body: String,

    /// When the note was added
    pub added_on: DateTime<Utc>,

    /// Last edit, if the note was changed after it was added
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edited_on: Option<DateTime<Utc>>,
}

impl Note {
    pub fn new(id: u64, book: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id,
            book: book.into(),
            body: body.into(),
            added_on: Utc::now(),
            edited_on: None,
        }
    }

    /// File name of this note inside its book directory
    pub fn file_name(&self) -> String {
        note_file_name(self.id)
    }
}

/// File name for the note with the given ID
pub fn note_file_name(id: u64) -> String {
    format!("{}.note.yaml", id)
}

/// Parse a note ID: a non-empty run of ASCII digits that fits in a `u64`
///
/// Signs, whitespace and decimal points are rejected, unlike `u64::from_str`
/// which accepts a leading `+`.
pub fn parse_note_id(token: &str) -> Option<u64> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}

/// A book and how many notes it holds
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookSummary {
    pub name: String,
    pub note_count: usize,
}
