//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    add::AddArgs, completions::CompletionsArgs, init::InitArgs, view::ViewArgs,
};

#[derive(Parser)]
#[command(name = "quire")]
#[command(author, version, about = "Plain-text notes, grouped into books")]
#[command(
    long_about = "A Unix-style toolkit for keeping notes as plain YAML files grouped into books."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output (debug logging on stderr)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Project root (default: auto-detect by finding .quire/)
    #[arg(long, global = true)]
    pub project: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new notes project
    Init(InitArgs),

    /// Add a note to a book
    Add(AddArgs),

    /// List books, notes or view a note's content
    #[command(visible_alias = "v")]
    View(ViewArgs),

    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text, or the configured default_format
    #[default]
    Auto,
    /// YAML format (full fidelity)
    Yaml,
    /// Plain aligned text (for terminals and piping)
    Tsv,
    /// JSON format (for programming)
    Json,
    /// Just identifiers, one per line
    Id,
}
