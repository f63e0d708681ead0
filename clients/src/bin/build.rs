//! `skos-build`: compiles vocabulary declarations and writes each vocabulary
//! to the output directory.
//!
//! **Outputs**, per vocabulary and requested format:
//! - `<out>/<name>.ttl`: Turtle 1.1
//! - `<out>/<name>.nt`: N-Triples
//! - `<out>/<name>.json`: JSON-LD 1.1
//!
//! **Usage:**
//! ```text
//! skos-build [--decl <file>...] [--builtin] [--out <path>] [--format <fmt>...]
//! ```
//!
//! Log verbosity follows `RUST_LOG` (default `info`).

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use skos_builder::decl::compile_file;
use skos_builder::export::export_all;
use skos_builder::{vocabularies, Format, Vocabulary};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Build SKOS vocabulary artifacts.
#[derive(Parser)]
#[command(name = "skos-build", about = "Build SKOS vocabulary artifacts")]
struct Args {
    /// Vocabulary declaration files (TOML).
    #[arg(long = "decl", value_name = "FILE")]
    decls: Vec<PathBuf>,

    /// Also build the vocabularies bundled with skos-builder.
    #[arg(long)]
    builtin: bool,

    /// Output directory for generated artifacts.
    #[arg(long, default_value = "public")]
    out: PathBuf,

    /// Output formats (ttl, nt, json). Defaults to all three.
    #[arg(long = "format", value_name = "FORMAT")]
    formats: Vec<Format>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing();

    if args.decls.is_empty() && !args.builtin {
        bail!("nothing to build: pass --decl <file> or --builtin");
    }

    let mut vocabs: Vec<Vocabulary> = Vec::new();
    if args.builtin {
        vocabs.extend(vocabularies::all().context("Failed to compile bundled vocabularies")?);
    }
    for path in &args.decls {
        let vocab =
            compile_file(path).with_context(|| format!("Failed to compile {}", path.display()))?;
        vocabs.push(vocab);
    }

    let out = &args.out;
    fs::create_dir_all(out)
        .with_context(|| format!("Failed to create output directory: {}", out.display()))?;

    for vocab in &vocabs {
        println!(
            "{} <{}>: {} triples",
            vocab.identifier(),
            vocab.iri(),
            vocab.graph().len()
        );
    }

    let formats = if args.formats.is_empty() {
        vec![Format::Turtle, Format::NTriples, Format::JsonLd]
    } else {
        args.formats
    };
    for format in formats {
        let written = export_all(&vocabs, out, format)
            .with_context(|| format!("Failed to write {format} output"))?;
        for path in written {
            println!("  Written: {}", path.display());
        }
    }

    println!("Build complete.");
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
