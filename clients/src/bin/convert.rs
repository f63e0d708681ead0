//! `skos-convert`: loads an existing vocabulary from a file or URL and
//! re-serializes it to stdout.
//!
//! **Usage:**
//! ```text
//! skos-convert <SOURCE> [--format <fmt>] [--input-format <fmt>]
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;
use skos_builder::source::Source;
use skos_builder::Format;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Convert an RDF vocabulary between formats.
#[derive(Parser)]
#[command(name = "skos-convert", about = "Convert an RDF vocabulary between formats")]
struct Args {
    /// Path or http(s) URL of the vocabulary.
    source: String,

    /// Output format (ttl, nt, json).
    #[arg(long, default_value = "ttl")]
    format: Format,

    /// Input format, when the extension does not say.
    #[arg(long)]
    input_format: Option<Format>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let source = Source::from_location("input", &args.source, None).with_format(args.input_format);
    let graph = source
        .load()
        .with_context(|| format!("Failed to load {}", args.source))?;
    tracing::info!(triples = graph.len(), format = %args.format, "converting");

    let text = graph
        .serialize(args.format)
        .with_context(|| format!("Failed to serialize as {}", args.format))?;
    std::io::stdout()
        .lock()
        .write_all(text.as_bytes())
        .context("Failed to write to stdout")?;
    Ok(())
}
