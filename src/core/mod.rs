//! Core module - notes, books, project layout and storage

pub mod config;
pub mod note;
pub mod project;
pub mod store;

pub use config::Config;
pub use note::{BookSummary, Note};
pub use project::{Project, ProjectError};
pub use store::{NoteStore, StoreError};
