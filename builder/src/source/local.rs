//! Local vocabulary sources read from disk.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::serializer::Format;

use super::parse::parse;

/// A vocabulary stored in a file next to its declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalSource {
    name: String,
    path: PathBuf,
    base_dir: Option<PathBuf>,
    format: Option<Format>,
}

impl LocalSource {
    /// A source for `path`, declared by the vocabulary called `name`.
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            base_dir: None,
            format: None,
        }
    }

    /// Resolves a relative `path` against `dir`, normally the directory of
    /// the declaring file.
    #[must_use]
    pub fn relative_to(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    /// Overrides the format otherwise inferred from the file extension.
    #[must_use]
    pub fn with_format(mut self, format: Format) -> Self {
        self.format = Some(format);
        self
    }

    /// Declaring vocabulary name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The path that [`load`](Self::load) reads.
    #[must_use]
    pub fn resolved_path(&self) -> PathBuf {
        match &self.base_dir {
            Some(dir) if self.path.is_relative() => dir.join(&self.path),
            _ => self.path.clone(),
        }
    }

    /// Format hint, else the file extension, else Turtle.
    #[must_use]
    pub fn format(&self) -> Format {
        self.format
            .or_else(|| Format::from_path(&self.path))
            .unwrap_or(Format::Turtle)
    }

    /// Reads and parses the file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LocalSourceNotFound`] if the resolved path is not a
    /// file, [`Error::Io`] if it cannot be read, and [`Error::Parse`] if its
    /// content is not valid in the chosen format.
    pub fn load(&self) -> Result<Graph> {
        let path = self.resolved_path();
        if !path.is_file() {
            return Err(Error::LocalSourceNotFound {
                name: self.name.clone(),
                path,
            });
        }
        let text = std::fs::read_to_string(&path)?;
        let format = self.format();
        tracing::debug!(name = %self.name, path = %path.display(), %format, "reading local source");
        parse(&text, format, &display(&path))
    }
}

fn display(path: &Path) -> String {
    path.display().to_string()
}
