//! Note storage on the filesystem
//!
//! Every book is a directory under `books/` and every note a YAML file named
//! after its ID:
//!
//! ```text
//! books/
//!   javascript/
//!     1.note.yaml
//!     4.note.yaml
//!   rust/
//!     2.note.yaml
//! ```
//!
//! IDs are unique across the whole project so `quire view <id>` never has to
//! know the book. Directories starting with `.` are not books and are never read.

use miette::Diagnostic;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::core::note::{parse_note_id, BookSummary, Note};
use crate::core::Project;
use crate::yaml::{parse_yaml_file, YamlError};

const NOTE_SUFFIX: &str = ".note.yaml";

/// Errors raised while reading or writing notes
#[derive(Debug, Error, Diagnostic)]
pub enum StoreError {
    #[error("book '{name}' not found")]
    #[diagnostic(
        code(quire::store::book_not_found),
        help("run `quire view` to see all books")
    )]
    BookNotFound { name: String },

    #[error("note {id} not found")]
    #[diagnostic(code(quire::store::note_not_found))]
    NoteNotFound { id: u64 },

    #[error("invalid book name '{name}': {reason}")]
    #[diagnostic(code(quire::store::invalid_book_name))]
    InvalidBookName { name: String, reason: &'static str },

    #[error("note body is empty")]
    #[diagnostic(
        code(quire::store::empty_note),
        help("pass --content or write something in the editor")
    )]
    EmptyNote,

    #[error("no note IDs left after {max}")]
    #[diagnostic(code(quire::store::ids_exhausted))]
    IdsExhausted { max: u64 },

    #[error("{} holds note {found}, expected note {expected}", path.display())]
    #[diagnostic(
        code(quire::store::id_mismatch),
        help("the file name and the `id` field of a note must agree")
    )]
    IdMismatch {
        path: PathBuf,
        expected: u64,
        found: u64,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] YamlError),

    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> StoreError + '_ {
    move |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Note ID encoded in a note file name, if the name is one
fn id_from_file_name(name: &str) -> Option<u64> {
    parse_note_id(name.strip_suffix(NOTE_SUFFIX)?)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

/// Note ID of a walked entry, if it is a note file
fn note_id(entry: &DirEntry) -> Option<u64> {
    if !entry.file_type().is_file() {
        return None;
    }
    id_from_file_name(&entry.file_name().to_string_lossy())
}

/// Parse a note file and check it holds the note its name promises
fn load_note(path: &Path, expected: u64) -> Result<Note, StoreError> {
    let note: Note = parse_yaml_file(path)?;
    if note.id != expected {
        return Err(StoreError::IdMismatch {
            path: path.to_path_buf(),
            expected,
            found: note.id,
        });
    }
    Ok(note)
}

/// Reads and writes notes under a project's `books/` directory
#[derive(Debug, Clone)]
pub struct NoteStore {
    books_dir: PathBuf,
}

impl NoteStore {
    pub fn new(project: &Project) -> Self {
        Self {
            books_dir: project.books_dir(),
        }
    }

    /// Check that a book name can be stored and later viewed
    ///
    /// Names made only of digits are refused: `quire view 12` would show
    /// note 12 instead of listing the book.
    pub fn validate_book_name(name: &str) -> Result<(), StoreError> {
        let reason = if name.trim().is_empty() {
            Some("name is empty")
        } else if name.contains(['/', '\\']) {
            Some("name contains a path separator")
        } else if name.starts_with('.') {
            Some("name starts with '.'")
        } else if parse_note_id(name).is_some() {
            Some("name is a number and would be read as a note ID")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(StoreError::InvalidBookName {
                name: name.to_string(),
                reason,
            }),
            None => Ok(()),
        }
    }

    /// All books with their note counts, sorted by name
    ///
    /// Counts only the notes `notes_in` would list.
    pub fn books(&self) -> Result<Vec<BookSummary>, StoreError> {
        let mut books = Vec::new();

        if !self.books_dir.exists() {
            return Ok(books);
        }

        for entry in fs::read_dir(&self.books_dir).map_err(io_error(&self.books_dir))? {
            let entry = entry.map_err(io_error(&self.books_dir))?;
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }

            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }

            let note_count = Self::load_book(&path).len();
            books.push(BookSummary { name, note_count });
        }

        books.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(books)
    }

    /// Notes in one book, ordered by ID
    ///
    /// Files that fail to parse, or whose ID disagrees with their name, are
    /// skipped with a warning.
    pub fn notes_in(&self, book: &str) -> Result<Vec<Note>, StoreError> {
        let dir = self.book_dir(book);
        if Self::validate_book_name(book).is_err() || !dir.is_dir() {
            return Err(StoreError::BookNotFound {
                name: book.to_string(),
            });
        }

        let mut notes = Self::load_book(&dir);
        notes.sort_by_key(|n| n.id);
        Ok(notes)
    }

    /// Load the note with the given ID from whichever book holds it
    pub fn find(&self, id: u64) -> Result<Note, StoreError> {
        let path = self
            .note_paths()
            .find(|(found, _)| *found == id)
            .map(|(_, path)| path)
            .ok_or(StoreError::NoteNotFound { id })?;

        debug!(id, path = %path.display(), "loading note");
        load_note(&path, id)
    }

    /// Add a note to a book, creating the book if needed
    ///
    /// Never replaces an existing file.
    pub fn add(&self, book: &str, body: &str) -> Result<Note, StoreError> {
        Self::validate_book_name(book)?;

        let body = body.trim_end();
        if body.trim().is_empty() {
            return Err(StoreError::EmptyNote);
        }

        let dir = self.book_dir(book);
        fs::create_dir_all(&dir).map_err(io_error(&dir))?;

        let note = Note::new(self.next_id()?, book, body);
        let path = dir.join(note.file_name());
        let yaml = serde_yml::to_string(&note).map_err(|e| StoreError::Io {
            path: path.clone(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
        })?;

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(io_error(&path))?;
        file.write_all(yaml.as_bytes()).map_err(io_error(&path))?;

        debug!(id = note.id, book, "added note");
        Ok(note)
    }

    /// One past the highest note ID in the project, starting at 1
    pub fn next_id(&self) -> Result<u64, StoreError> {
        match self.note_paths().map(|(id, _)| id).max() {
            None => Ok(1),
            Some(max) => max.checked_add(1).ok_or(StoreError::IdsExhausted { max }),
        }
    }

    fn book_dir(&self, book: &str) -> PathBuf {
        self.books_dir.join(book)
    }

    /// Every note file in every visible book, with its ID
    fn note_paths(&self) -> impl Iterator<Item = (u64, PathBuf)> {
        WalkDir::new(&self.books_dir)
            .min_depth(2)
            .max_depth(2)
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e))
            .filter_map(|e| e.ok())
            .filter_map(|e| Some((note_id(&e)?, e.into_path())))
    }

    /// Readable notes directly inside a book directory, unordered
    fn load_book(dir: &Path) -> Vec<Note> {
        WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter_map(|e| Some((note_id(&e)?, e.into_path())))
            .filter_map(|(id, path)| match load_note(&path, id) {
                Ok(note) => Some(note),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping unreadable note");
                    None
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{tempdir, TempDir};

    fn setup() -> (TempDir, NoteStore) {
        let tmp = tempdir().unwrap();
        let project = Project::init(tmp.path()).unwrap();
        let store = NoteStore::new(&project);
        (tmp, store)
    }

    #[test]
    fn test_add_allocates_sequential_ids_across_books() {
        let (_tmp, store) = setup();

        assert_eq!(store.add("rust", "ownership").unwrap().id, 1);
        assert_eq!(store.add("javascript", "closures").unwrap().id, 2);
        assert_eq!(store.add("rust", "lifetimes").unwrap().id, 3);
        assert_eq!(store.next_id().unwrap(), 4);
    }

    #[test]
    fn test_next_id_starts_at_one() {
        let (_tmp, store) = setup();
        assert_eq!(store.next_id().unwrap(), 1);
    }

    #[test]
    fn test_books_sorted_with_counts() {
        let (_tmp, store) = setup();
        store.add("rust", "a").unwrap();
        store.add("javascript", "b").unwrap();
        store.add("rust", "c").unwrap();

        let books = store.books().unwrap();
        assert_eq!(
            books,
            vec![
                BookSummary {
                    name: "javascript".into(),
                    note_count: 1
                },
                BookSummary {
                    name: "rust".into(),
                    note_count: 2
                },
            ]
        );
    }

    #[test]
    fn test_notes_in_orders_by_id_and_skips_broken_files() {
        let (tmp, store) = setup();
        store.add("rust", "first").unwrap();
        store.add("rust", "second").unwrap();
        fs::write(
            tmp.path().join("books/rust/9.note.yaml"),
            "id: [not valid yaml",
        )
        .unwrap();
        fs::write(tmp.path().join("books/rust/README.md"), "not a note").unwrap();

        let notes = store.notes_in("rust").unwrap();
        let bodies: Vec<_> = notes.iter().map(|n| n.body.as_str()).collect();
        assert_eq!(bodies, vec!["first", "second"]);
    }

    #[test]
    fn test_notes_in_unknown_book() {
        let (_tmp, store) = setup();
        let err = store.notes_in("cooking").unwrap_err();
        assert!(matches!(err, StoreError::BookNotFound { name } if name == "cooking"));
    }

    #[test]
    fn test_notes_in_rejects_path_escape() {
        let (_tmp, store) = setup();
        let err = store.notes_in("../.quire").unwrap_err();
        assert!(matches!(err, StoreError::BookNotFound { .. }));
    }

    #[test]
    fn test_find_note() {
        let (_tmp, store) = setup();
        store.add("rust", "ownership").unwrap();
        let added = store.add("javascript", "closures\nand scope").unwrap();

        let found = store.find(added.id).unwrap();
        assert_eq!(found, added);
    }

    #[test]
    fn test_find_missing_note() {
        let (_tmp, store) = setup();
        let err = store.find(42).unwrap_err();
        assert!(matches!(err, StoreError::NoteNotFound { id: 42 }));
        assert_eq!(err.to_string(), "note 42 not found");
    }

    #[test]
    fn test_find_reports_broken_note() {
        let (tmp, store) = setup();
        fs::create_dir_all(tmp.path().join("books/rust")).unwrap();
        fs::write(tmp.path().join("books/rust/5.note.yaml"), "id: 5\n").unwrap();

        let err = store.find(5).unwrap_err();
        assert!(matches!(err, StoreError::Parse(_)));
    }

    #[test]
    fn test_add_rejects_empty_body() {
        let (_tmp, store) = setup();
        assert!(matches!(store.add("rust", "  \n\t"), Err(StoreError::EmptyNote)));
    }

    #[test]
    fn test_validate_book_name() {
        assert!(NoteStore::validate_book_name("javascript").is_ok());
        assert!(NoteStore::validate_book_name("c++ 17").is_ok());
        assert!(NoteStore::validate_book_name("2024-ideas").is_ok());

        for bad in ["", "  ", "a/b", "a\\b", ".hidden", "42"] {
            assert!(
                matches!(
                    NoteStore::validate_book_name(bad),
                    Err(StoreError::InvalidBookName { .. })
                ),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_id_from_file_name() {
        assert_eq!(id_from_file_name("12.note.yaml"), Some(12));
        assert_eq!(id_from_file_name("x.note.yaml"), None);
        assert_eq!(id_from_file_name("12.yaml"), None);
    }

    fn write_note(tmp: &TempDir, dir: &str, note: &Note) {
        let dir = tmp.path().join("books").join(dir);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(note.file_name()), serde_yml::to_string(note).unwrap()).unwrap();
    }

    #[test]
    fn test_add_refuses_when_ids_run_out() {
        let (tmp, store) = setup();
        write_note(&tmp, "rust", &Note::new(u64::MAX, "rust", "last one"));

        let err = store.add("rust", "one too many").unwrap_err();
        assert!(matches!(err, StoreError::IdsExhausted { max: u64::MAX }));
        assert_eq!(store.find(u64::MAX).unwrap().body, "last one");
    }

    #[test]
    fn test_hidden_directories_are_not_books() {
        let (tmp, store) = setup();
        write_note(&tmp, ".trash", &Note::new(5, ".trash", "deleted"));

        assert!(store.books().unwrap().is_empty());
        assert!(matches!(store.find(5), Err(StoreError::NoteNotFound { id: 5 })));
        assert_eq!(store.next_id().unwrap(), 1);
    }

    #[test]
    fn test_book_count_matches_listed_notes() {
        let (tmp, store) = setup();
        store.add("rust", "first").unwrap();
        store.add("rust", "second").unwrap();
        fs::write(tmp.path().join("books/rust/9.note.yaml"), "id: [broken").unwrap();
        write_note(&tmp, "rust", &Note::new(3, "rust", "misnamed"));
        fs::rename(
            tmp.path().join("books/rust/3.note.yaml"),
            tmp.path().join("books/rust/10.note.yaml"),
        )
        .unwrap();

        let books = store.books().unwrap();
        assert_eq!(books[0].note_count, 2);
        assert_eq!(store.notes_in("rust").unwrap().len(), 2);
    }

    #[test]
    fn test_find_rejects_id_mismatch() {
        let (tmp, store) = setup();
        write_note(&tmp, "rust", &Note::new(3, "rust", "three"));
        fs::rename(
            tmp.path().join("books/rust/3.note.yaml"),
            tmp.path().join("books/rust/7.note.yaml"),
        )
        .unwrap();

        let err = store.find(7).unwrap_err();
        assert!(matches!(
            err,
            StoreError::IdMismatch {
                expected: 7,
                found: 3,
                ..
            }
        ));
    }
}
