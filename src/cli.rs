//! CLI argument definitions.

use std::path::PathBuf;

use clap::Parser;

/// Top-level CLI parser for `htmldown`.
#[derive(Debug, Parser)]
#[command(name = "htmldown", version, about = "Convert HTML documents to Markdown")]
pub struct Cli {
    /// HTML file to convert; reads stdin when omitted.
    pub input: Option<PathBuf>,

    /// Write the result here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Emit the normalized document tree as JSON instead of Markdown.
    #[arg(long)]
    pub ast: bool,

    /// Suppress warnings about skipped elements.
    #[arg(short, long)]
    pub quiet: bool,
}
