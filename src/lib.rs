//! Core library for the `htmldown` CLI.
//!
//! Conversion runs a fixed pipeline: [`tokenize`] lexes the HTML source,
//! [`parse`] builds a document tree, [`restruct`] normalizes tables and
//! adjacent lists, and [`render`] emits Markdown.

pub mod ast;
pub mod cli;
pub mod commands;
pub mod entity;
pub mod parse;
pub mod render;
pub mod restruct;
pub mod tokenize;

use clap::Parser;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Errors produced by the conversion pipeline.
#[derive(Debug, PartialEq, Eq, Error)]
pub enum ConvertError {
    /// The source could not be lexed.
    #[error("tokenize: {0}")]
    Tokenize(#[from] tokenize::TokenizeError),
    /// The token stream was not a well-formed document.
    #[error("parse: {0}")]
    Parse(#[from] parse::ParseError),
}

/// Converts an HTML document to Markdown.
///
/// # Errors
///
/// Returns a [`ConvertError`] when the source cannot be lexed or parsed.
pub fn convert(source: &str) -> Result<String, ConvertError> {
    let document = parse_document(source)?;
    Ok(render::Renderer::new(&document).render())
}

/// Lexes, parses, and normalizes an HTML document without rendering it.
///
/// # Errors
///
/// Returns a [`ConvertError`] when the source cannot be lexed or parsed.
pub fn parse_document(source: &str) -> Result<ast::Node, ConvertError> {
    let tokens = tokenize::Tokenizer::new(source).tokenize()?;
    let document = parse::Parser::new(&tokens).parse()?;
    Ok(restruct::restruct(&document))
}

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or the conversion
/// fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args).map_err(|err| err.to_string())?;
    init_tracing(cli.quiet);
    commands::dispatch(&cli)
}

/// Install the stderr subscriber; a second call is a no-op.
fn init_tracing(quiet: bool) {
    let default = if quiet { "error" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .try_init();
}
