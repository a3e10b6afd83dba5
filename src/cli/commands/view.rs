//! `quire view` command - list books, list a book's notes, or show notes
//!
//! `view` decides what to do from the number and shape of its positional
//! arguments:
//!
//! ```text
//! quire view                 # every book
//! quire view javascript      # notes in the "javascript" book
//! quire view 3               # note 3
//! quire view 3 7 2           # notes 3, 7 and 2, in that order
//! ```
//!
//! The listing and showing themselves live behind the [`ListNotes`] and
//! [`ShowNote`] traits so [`dispatch`] only has to route.

use miette::{Diagnostic, Result};
use thiserror::Error;
use tracing::debug;

use crate::cli::commands::{cat::StoreShower, ls::StoreLister};
use crate::cli::helpers::resolve_format;
use crate::cli::GlobalOpts;
use crate::core::note::parse_note_id;
use crate::core::{Config, NoteStore, Project};

#[derive(clap::Args, Debug)]
pub struct ViewArgs {
    /// Book name, or one or more note IDs
    #[arg(value_name = "BOOK|NOTE_ID")]
    pub args: Vec<String>,

    /// Print book names only
    #[arg(long)]
    pub name_only: bool,

    /// Print the note content only
    #[arg(long)]
    pub content_only: bool,
}

/// Flags that shape how `view` output is produced
///
/// Built fresh for every invocation from the parsed arguments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewFlags {
    pub name_only: bool,
    pub content_only: bool,
}

impl From<&ViewArgs> for ViewFlags {
    fn from(args: &ViewArgs) -> Self {
        Self {
            name_only: args.name_only,
            content_only: args.content_only,
        }
    }
}

/// A single positional argument, classified once
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewArg {
    /// A note ID
    Index(u64),
    /// Anything else is taken as a book name
    Book(String),
}

impl ViewArg {
    /// Classify a token as a note ID or a book name
    ///
    /// A note ID is a non-empty run of ASCII digits that fits in a `u64`.
    /// Signs, whitespace and decimal points all make a token a book name.
    pub fn parse(token: &str) -> Self {
        match parse_note_id(token) {
            Some(index) => ViewArg::Index(index),
            None => ViewArg::Book(token.to_string()),
        }
    }
}

/// What a listing covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListScope {
    AllBooks,
    Book(String),
}

/// Lists books, or the notes inside one book
pub trait ListNotes {
    fn list(&self, scope: ListScope, name_only: bool) -> Result<()>;
}

/// Shows a single note
pub trait ShowNote {
    fn show(&self, index: u64, content_only: bool) -> Result<()>;
}

/// Argument errors detected before anything is listed or shown
#[derive(Debug, Error, Diagnostic, PartialEq, Eq)]
pub enum ViewError {
    #[error("--name-only flag is only valid when viewing books")]
    #[diagnostic(
        code(quire::view::flag_conflict),
        help("run `quire view --name-only` without arguments to list book names")
    )]
    FlagConflict,

    #[error("all arguments must be numeric note IDs (got '{arg}')")]
    #[diagnostic(
        code(quire::view::not_numeric),
        help("to list a book's notes, pass the book name on its own")
    )]
    NotNumeric { arg: String },
}

/// Route `view` arguments to the list or show operation
///
/// Errors from `lister` and `shower` are returned untouched. With two or
/// more arguments every one must be a note ID; they are shown one at a time
/// and the first bad token or failed show stops the run. Notes already shown
/// by then stay shown.
pub fn dispatch<L, S>(args: &[String], flags: ViewFlags, lister: &L, shower: &S) -> Result<()>
where
    L: ListNotes + ?Sized,
    S: ShowNote + ?Sized,
{
    match args {
        [] => {
            debug!(name_only = flags.name_only, "listing all books");
            lister.list(ListScope::AllBooks, flags.name_only)
        }
        [single] => {
            if flags.name_only {
                return Err(ViewError::FlagConflict.into());
            }

            match ViewArg::parse(single) {
                ViewArg::Index(index) => {
                    debug!(index, content_only = flags.content_only, "showing note");
                    shower.show(index, flags.content_only)
                }
                // Book listings never honour --name-only
                ViewArg::Book(book) => {
                    debug!(%book, "listing notes in book");
                    lister.list(ListScope::Book(book), false)
                }
            }
        }
        batch => {
            debug!(count = batch.len(), "showing notes in batch");
            for token in batch {
                let index = match ViewArg::parse(token) {
                    ViewArg::Index(index) => index,
                    ViewArg::Book(arg) => return Err(ViewError::NotNumeric { arg }.into()),
                };
                shower.show(index, flags.content_only)?;
            }
            Ok(())
        }
    }
}

pub fn run(args: ViewArgs, global: &GlobalOpts) -> Result<()> {
    let project = match &global.project {
        Some(path) => Project::discover_from(path),
        None => Project::discover(),
    }
    .map_err(|e| miette::miette!("{}", e))?;

    let config = Config::load(Some(&project));
    let format = resolve_format(global.format, &config);
    let store = NoteStore::new(&project);

    let flags = ViewFlags::from(&args);
    let lister = StoreLister::new(&store, format);
    let shower = StoreShower::new(&store, format);

    dispatch(&args.args, flags, &lister, &shower)
}
