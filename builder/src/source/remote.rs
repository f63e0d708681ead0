//! Remote vocabulary sources fetched over HTTP.

use std::path::Path;
use std::sync::Arc;
#[cfg(feature = "remote")]
use std::time::Duration;

use crate::error::{BoxError, Error, Result};
use crate::graph::Graph;
use crate::serializer::Format;

use super::cache::SourceCache;
use super::parse::parse;

/// Retrieves the text of a remote document.
///
/// The default implementation is [`HttpFetcher`]; tests and offline callers
/// can supply their own.
pub trait Fetcher: Send + Sync {
    /// Fetches `url`, asking for `format`.
    ///
    /// # Errors
    ///
    /// Returns the underlying transport failure.
    fn fetch(&self, url: &str, format: Format) -> std::result::Result<String, BoxError>;
}

/// Blocking HTTP fetcher backed by `reqwest`.
#[cfg(feature = "remote")]
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    timeout: Duration,
}

#[cfg(feature = "remote")]
impl HttpFetcher {
    /// Request timeout applied when none is given.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// A fetcher with a custom request timeout.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[cfg(feature = "remote")]
impl Default for HttpFetcher {
    fn default() -> Self {
        Self::with_timeout(Self::DEFAULT_TIMEOUT)
    }
}

#[cfg(feature = "remote")]
impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str, format: Format) -> std::result::Result<String, BoxError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("skos-builder/", env!("CARGO_PKG_VERSION")))
            .build()?;
        let body = client
            .get(url)
            .header(reqwest::header::ACCEPT, format.media_type())
            .send()?
            .error_for_status()?
            .text()?;
        Ok(body)
    }
}

/// A vocabulary published at a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteSource {
    name: String,
    url: String,
    format: Option<Format>,
}

impl RemoteSource {
    /// A source for `url`, declared by the vocabulary called `name`.
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            format: None,
        }
    }

    /// Overrides the format otherwise inferred from the URL.
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

    /// The URL as given. Also the cache key.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Format hint, else the URL path's extension, else Turtle.
    #[must_use]
    pub fn format(&self) -> Format {
        self.format
            .or_else(|| {
                let path = self
                    .url
                    .split(|c: char| c == '?' || c == '#')
                    .next()
                    .unwrap_or_default();
                Format::from_path(Path::new(path))
            })
            .unwrap_or(Format::Turtle)
    }

    /// Loads through the process-wide cache with the default HTTP fetcher.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RemoteSource`] if the fetch or the parse fails.
    #[cfg(feature = "remote")]
    pub fn load(&self) -> Result<Arc<Graph>> {
        self.load_with(SourceCache::global(), &HttpFetcher::default())
    }

    /// Loads through `cache`, fetching with `fetcher` on a miss.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RemoteSource`] if the fetch or the parse fails. The
    /// underlying failure is kept as the error's source.
    pub fn load_with(&self, cache: &SourceCache, fetcher: &dyn Fetcher) -> Result<Arc<Graph>> {
        cache
            .get_or_load(&self.url, || {
                let format = self.format();
                tracing::info!(name = %self.name, url = %self.url, %format, "fetching remote source");
                let text = fetcher.fetch(&self.url, format)?;
                let graph = parse(&text, format, &self.url)?;
                Ok::<_, BoxError>(graph)
            })
            .map_err(|source| {
                tracing::warn!(name = %self.name, url = %self.url, error = %source, "remote source failed");
                self.error(source)
            })
    }

    pub(crate) fn error(&self, source: BoxError) -> Error {
        Error::RemoteSource {
            name: self.name.clone(),
            url: self.url.clone(),
            source,
        }
    }
}
