//! Source loader integration tests: on-disk files, the remote cache, and
//! merging loaded graphs into compiled vocabularies.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use skos_builder::error::BoxError;
use skos_builder::model::iris;
use skos_builder::source::{Fetcher, LocalSource, RemoteSource, Source, SourceCache};
use skos_builder::{Concept, Error, Format, Iri, Object, Subject, Vocabulary};

const ISC: &str = r#"
@prefix skos: <http://www.w3.org/2004/02/skos/core#> .
@prefix isc: <http://resource.geosciml.org/classifier/ics/ischart/> .

isc: a skos:ConceptScheme .
isc:Jurassic a skos:Concept ;
    skos:prefLabel "Jurassic"@en , "Jurassique"@fr ;
    skos:inScheme isc: .
"#;

/// Serves a fixed body and counts requests.
struct CountingFetcher {
    calls: AtomicUsize,
}

impl CountingFetcher {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Fetcher for CountingFetcher {
    fn fetch(&self, _url: &str, format: Format) -> Result<String, BoxError> {
        assert_eq!(format, Format::Turtle);
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(ISC.to_owned())
    }
}

// ============================================================================
// Remote
// ============================================================================

#[test]
fn same_url_is_fetched_once() {
    let cache = SourceCache::new();
    let fetcher = CountingFetcher::new();
    let source = RemoteSource::new("Isc2020", "https://vocabs.example.org/isc2020.ttl");

    let first = source.load_with(&cache, &fetcher).unwrap();
    let second = source.load_with(&cache, &fetcher).unwrap();

    assert_eq!(fetcher.calls(), 1);
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(*first, *second);
}

#[test]
fn different_urls_are_cached_separately() {
    let cache = SourceCache::new();
    let fetcher = CountingFetcher::new();
    RemoteSource::new("A", "https://vocabs.example.org/a.ttl")
        .load_with(&cache, &fetcher)
        .unwrap();
    RemoteSource::new("B", "https://vocabs.example.org/b.ttl")
        .load_with(&cache, &fetcher)
        .unwrap();
    assert_eq!(fetcher.calls(), 2);
    assert_eq!(cache.len(), 2);
}

#[test]
fn concurrent_loads_share_one_fetch() {
    let cache = SourceCache::new();
    let fetcher = CountingFetcher::new();
    let source = RemoteSource::new("Isc2020", "https://vocabs.example.org/isc2020.ttl");
    std::thread::scope(|scope| {
        for _ in 0..6 {
            scope.spawn(|| source.load_with(&cache, &fetcher).unwrap());
        }
    });
    assert_eq!(fetcher.calls(), 1);
}

#[test]
fn invalidated_url_is_fetched_again() {
    let cache = SourceCache::new();
    let fetcher = CountingFetcher::new();
    let source = RemoteSource::new("Isc2020", "https://vocabs.example.org/isc2020.ttl");
    source.load_with(&cache, &fetcher).unwrap();
    assert!(cache.invalidate(source.url()));
    source.load_with(&cache, &fetcher).unwrap();
    assert_eq!(fetcher.calls(), 2);
}

// ============================================================================
// Local
// ============================================================================

#[test]
fn local_source_resolves_next_to_declaration() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("isc.ttl"), ISC).unwrap();

    let source = Source::from_location("Isc2020", "isc.ttl", Some(dir.path()));
    let graph = source.load().unwrap();
    assert_eq!(graph.len(), 5);
}

#[test]
fn missing_local_file_carries_the_name() {
    let dir = tempfile::tempdir().unwrap();
    let err = LocalSource::new("Isc2020", "nowhere.ttl")
        .relative_to(dir.path())
        .load()
        .unwrap_err();
    match err {
        Error::LocalSourceNotFound { name, path } => {
            assert_eq!(name, "Isc2020");
            assert_eq!(path, dir.path().join("nowhere.ttl"));
        }
        other => unreachable!("unexpected error: {other}"),
    }
}

// ============================================================================
// Merging
// ============================================================================

#[test]
fn loaded_graph_merges_into_vocabulary() {
    let cache = SourceCache::new();
    let fetcher = CountingFetcher::new();
    let loaded = RemoteSource::new("Isc2020", "https://vocabs.example.org/isc2020.ttl")
        .load_with(&cache, &fetcher)
        .unwrap();

    let mut vocab = Vocabulary::builder("TimeScale")
        .base_url("https://example.org/")
        .term(
            "late_jurassic",
            Concept::new()
                .with("skos:prefLabel", "Late Jurassic")
                .with(
                    "skos:broader",
                    Iri::new_unchecked("http://resource.geosciml.org/classifier/ics/ischart/Jurassic"),
                ),
        )
        .build()
        .unwrap();
    let before = vocab.graph().len();
    vocab.merge_source(&loaded);

    assert_eq!(vocab.graph().len(), before + loaded.len());
    let jurassic = Subject::Iri(Iri::new_unchecked(
        "http://resource.geosciml.org/classifier/ics/ischart/Jurassic",
    ));
    assert!(vocab.graph().contains(
        &jurassic,
        &Iri::new_unchecked(iris::RDF_TYPE),
        &Object::Iri(Iri::new_unchecked(iris::SKOS_CONCEPT)),
    ));
    // the cached graph is shared, not consumed
    assert_eq!(cache.get("https://vocabs.example.org/isc2020.ttl").unwrap().len(), loaded.len());
}
