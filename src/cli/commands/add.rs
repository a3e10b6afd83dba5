//! `quire add` command - write a new note into a book

use console::style;
use miette::{IntoDiagnostic, Result};
use std::fs;

use crate::cli::GlobalOpts;
use crate::core::{Config, NoteStore, Project};

#[derive(clap::Args, Debug)]
pub struct AddArgs {
    /// Book to add the note to (created if missing)
    pub book: String,

    /// Note text (if not provided, opens your editor)
    #[arg(long, short = 'c')]
    pub content: Option<String>,
}

pub fn run(args: AddArgs, global: &GlobalOpts) -> Result<()> {
    let project = match &global.project {
        Some(path) => Project::discover_from(path),
        None => Project::discover(),
    }
    .map_err(|e| miette::miette!("{}", e))?;

    NoteStore::validate_book_name(&args.book)?;

    let body = match args.content {
        Some(content) => content,
        None => compose_in_editor(&project)?,
    };

    let store = NoteStore::new(&project);
    let note = store.add(&args.book, &body)?;

    if global.quiet {
        println!("{}", note.id);
    } else {
        println!(
            "{} Added note {} to {}",
            style("✓").green(),
            style(note.id).yellow(),
            style(&note.book).cyan()
        );
    }

    Ok(())
}

/// Open the configured editor on a scratch file and return what was saved
fn compose_in_editor(project: &Project) -> Result<String> {
    let config = Config::load(Some(project));
    let scratch = project.quire_dir().join("NOTE_EDITMSG");
    fs::write(&scratch, "").into_diagnostic()?;

    let status = config.run_editor(&scratch).into_diagnostic()?;
    if !status.success() {
        return Err(miette::miette!(
            "Editor '{}' exited with {}",
            config.editor(),
            status
        ));
    }

    let body = fs::read_to_string(&scratch).into_diagnostic()?;
    // Scratch file is only a hand-off; a leftover copy is harmless
    let _ = fs::remove_file(&scratch);
    Ok(body)
}
