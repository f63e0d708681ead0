//! Loading existing vocabularies from disk or the network.
//!
//! A [`Source`] is either a [`LocalSource`] (a file resolved relative to the
//! declaring location) or a [`RemoteSource`] (a URL, cached process-wide by
//! its literal string). Both produce a [`Graph`] that can be merged into a
//! compiled vocabulary with [`Vocabulary::merge_source`](crate::Vocabulary::merge_source).

pub mod cache;
pub mod local;
pub mod parse;
pub mod remote;

use std::path::Path;
use std::sync::Arc;

use crate::error::Result;
use crate::graph::Graph;
use crate::serializer::Format;

pub use cache::SourceCache;
pub use local::LocalSource;
#[cfg(feature = "remote")]
pub use remote::HttpFetcher;
pub use remote::{Fetcher, RemoteSource};

/// Where a vocabulary's existing graph comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// A file on disk.
    Local(LocalSource),
    /// A document at a URL.
    Remote(RemoteSource),
}

impl Source {
    /// Classifies `location`: `http://` and `https://` locations are remote,
    /// anything else is a path resolved against `base_dir`.
    pub fn from_location(name: &str, location: &str, base_dir: Option<&Path>) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            return Source::Remote(RemoteSource::new(name, location));
        }
        let local = LocalSource::new(name, location);
        Source::Local(match base_dir {
            Some(dir) => local.relative_to(dir),
            None => local,
        })
    }

    /// Applies a parser format hint.
    #[must_use]
    pub fn with_format(self, format: Option<Format>) -> Self {
        match (self, format) {
            (Source::Local(s), Some(f)) => Source::Local(s.with_format(f)),
            (Source::Remote(s), Some(f)) => Source::Remote(s.with_format(f)),
            (source, None) => source,
        }
    }

    /// Format the source will be parsed as.
    #[must_use]
    pub fn format(&self) -> Format {
        match self {
            Source::Local(s) => s.format(),
            Source::Remote(s) => s.format(),
        }
    }

    /// Loads the graph. Remote sources go through [`SourceCache::global`].
    ///
    /// # Errors
    ///
    /// See [`LocalSource::load`] and [`RemoteSource::load`]. Without the
    /// `remote` feature every remote source fails with
    /// [`Error::RemoteSource`](crate::Error::RemoteSource).
    pub fn load(&self) -> Result<Arc<Graph>> {
        match self {
            Source::Local(s) => s.load().map(Arc::new),
            #[cfg(feature = "remote")]
            Source::Remote(s) => s.load(),
            #[cfg(not(feature = "remote"))]
            Source::Remote(s) => Err(s.error("built without the `remote` feature".into())),
        }
    }

    /// Loads the graph, fetching remote sources with `fetcher` through `cache`.
    ///
    /// # Errors
    ///
    /// See [`LocalSource::load`] and [`RemoteSource::load_with`].
    pub fn load_with(&self, cache: &SourceCache, fetcher: &dyn Fetcher) -> Result<Arc<Graph>> {
        match self {
            Source::Local(s) => s.load().map(Arc::new),
            Source::Remote(s) => s.load_with(cache, fetcher),
        }
    }
}

/// Loads `source`. Shorthand for [`Source::load`].
///
/// # Errors
///
/// See [`Source::load`].
pub fn load(source: &Source) -> Result<Arc<Graph>> {
    source.load()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BoxError;

    struct Fixed;

    impl Fetcher for Fixed {
        fn fetch(&self, _url: &str, _format: Format) -> std::result::Result<String, BoxError> {
            Ok("<https://e.org/a> <https://e.org/p> \"x\" .\n".to_owned())
        }
    }

    #[test]
    fn classifies_locations() {
        assert!(matches!(
            Source::from_location("V", "https://e.org/v.ttl", None),
            Source::Remote(_)
        ));
        let local = Source::from_location("V", "v.ttl", Some(Path::new("/data")));
        assert!(matches!(
            local,
            Source::Local(ref s) if s.resolved_path() == Path::new("/data/v.ttl")
        ));
    }

    #[test]
    fn format_hint_overrides_extension() {
        let source = Source::from_location("V", "v.ttl", None).with_format(Some(Format::NTriples));
        assert_eq!(source.format(), Format::NTriples);
        let source = Source::from_location("V", "v.ttl", None).with_format(None);
        assert_eq!(source.format(), Format::Turtle);
    }

    #[test]
    fn remote_loads_through_given_cache() {
        let cache = SourceCache::new();
        let source = Source::from_location("V", "https://e.org/v", None);
        let graph = source.load_with(&cache, &Fixed).unwrap();
        assert_eq!(graph.len(), 1);
        assert!(cache.get("https://e.org/v").is_some());
    }
}
