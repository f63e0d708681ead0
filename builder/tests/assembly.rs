//! Vocabulary assembly integration tests.
//!
//! Covers slug naming, single-term expansion, configuration failures, and the
//! shape of a fully assembled vocabulary graph.

use skos_builder::model::iris;
use skos_builder::term::ExpandContext;
use skos_builder::{
    reference, slugify, Catalog, Collection, Concept, ConceptScheme, ConfigError, EnglishOnly,
    Error, Format, Graph, Iri, Literal, Object, PrefixTable, Resolver, Separator, SkosTerm,
    Subject, Translations, Translator, Vocabulary,
};

fn iri(s: &str) -> Iri {
    Iri::new_unchecked(s)
}

// ============================================================================
// Naming
// ============================================================================

#[test]
fn simple_lithology_slug() {
    assert_eq!(slugify("SimpleLithology"), "simple-lithology");
}

#[test]
fn namespace_is_base_url_name_and_separator() {
    let hash = Vocabulary::builder("SimpleLithology")
        .base_url("https://example.org/")
        .build()
        .unwrap();
    assert_eq!(hash.iri().as_str(), "https://example.org/simple-lithology");
    assert_eq!(hash.namespace().as_str(), "https://example.org/simple-lithology#");

    let slash = Vocabulary::builder("SimpleLithology")
        .base_url("https://example.org/")
        .namespace_separator(Separator::Slash)
        .build()
        .unwrap();
    assert_eq!(slash.namespace().as_str(), "https://example.org/simple-lithology/");
}

// ============================================================================
// Term expansion
// ============================================================================

#[test]
fn granite_concept_expands_to_two_triples() {
    let prefixes = PrefixTable::default();
    let ctx = ExpandContext::new(Resolver::new(&prefixes), &EnglishOnly);
    let subject = Subject::Iri(iri("http://example.org/v/granite"));
    let mut graph = Graph::new();

    Concept::new()
        .with("skos:prefLabel", "Granite")
        .expand(Some(subject.clone()), &mut graph, &ctx)
        .unwrap();

    let triples: Vec<_> = graph.iter().collect();
    assert_eq!(triples.len(), 2);
    assert_eq!(triples[0].subject, subject);
    assert_eq!(triples[0].predicate, iri(iris::RDF_TYPE));
    assert_eq!(triples[0].object, Object::Iri(iri(iris::SKOS_CONCEPT)));
    assert_eq!(triples[1].predicate, iri(iris::SKOS_PREF_LABEL));
    assert_eq!(
        triples[1].object,
        Object::Literal(Literal::with_language("Granite", "en"))
    );
}

#[test]
fn one_literal_per_distinct_language() {
    let prefixes = PrefixTable::default();
    let catalog = Catalog::new()
        .with("de", "Granite", "Granit")
        .with("fr", "Granite", "Granit")
        .with("it", "Granite", "Granite");
    let ctx = ExpandContext::new(Resolver::new(&prefixes), &catalog);
    let mut graph = Graph::new();
    let subject = Concept::new()
        .with("skos:prefLabel", "Granite")
        .expand(None, &mut graph, &ctx)
        .unwrap();

    // "it" matches the source text and adds nothing
    let labels = graph
        .objects(&subject, &iri(iris::SKOS_PREF_LABEL))
        .count();
    assert_eq!(labels, 3);
}

/// Looks messages up in a fixed French table, the way a gettext catalog would.
struct FrenchTable;

impl Translator for FrenchTable {
    fn translations(&self, text: &str) -> Translations {
        let translations = Translations::english(text);
        match text {
            "Granite" => translations.with("fr", "Granit"),
            _ => translations,
        }
    }
}

#[test]
fn custom_translator_feeds_term_expansion() {
    let vocab = Vocabulary::builder("Rocks")
        .base_url("https://example.org/")
        .translator(FrenchTable)
        .term("granite", Concept::new().with("skos:prefLabel", "Granite"))
        .build()
        .unwrap();
    let granite = Subject::Iri(iri("https://example.org/rocks#granite"));
    let pref_label = iri(iris::SKOS_PREF_LABEL);
    let labels: Vec<&Object> = vocab
        .graph()
        .objects(&granite, &pref_label)
        .collect();
    assert_eq!(
        labels,
        [
            &Object::Literal(Literal::with_language("Granite", "en")),
            &Object::Literal(Literal::with_language("Granit", "fr")),
        ]
    );
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn unknown_option_fails_before_build() {
    let err = Vocabulary::builder("Rocks")
        .base_url("https://example.org/")
        .option("unknown_opt", 1_i64)
        .term("granite", Concept::new())
        .build()
        .unwrap_err();
    match err {
        Error::Config(ConfigError::UnknownOption(key)) => assert_eq!(key, "unknown_opt"),
        other => unreachable!("unexpected error: {other}"),
    }
}

#[test]
fn empty_name_is_treated_as_unset() {
    let vocab = Vocabulary::builder("SimpleLithology")
        .name("")
        .base_url("https://example.org/")
        .build()
        .unwrap();
    assert_eq!(vocab.name(), "simple-lithology");

    let vocab = Vocabulary::builder("SimpleLithology")
        .option("name", "")
        .base_url("https://example.org/")
        .build()
        .unwrap();
    assert_eq!(vocab.iri().as_str(), "https://example.org/simple-lithology");
}

#[test]
fn invalid_separator_is_a_config_error() {
    let err = Vocabulary::builder("Rocks")
        .base_url("https://example.org/")
        .option("namespace_separator", "|")
        .build()
        .unwrap_err();
    assert_eq!(
        err.as_config(),
        Some(&ConfigError::InvalidSeparator("|".to_owned()))
    );
}

#[test]
fn unknown_prefix_names_the_prefix() {
    let err = Vocabulary::builder("Rocks")
        .base_url("https://example.org/")
        .term("granite", Concept::new().with("nope:label", "Granite"))
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::UnknownPrefix(ref p) if p == "nope"));
}

// ============================================================================
// Whole vocabularies
// ============================================================================

fn lithology() -> Vocabulary {
    Vocabulary::builder("SimpleLithology")
        .prefix("lith")
        .base_url("https://example.org/")
        .namespace_separator(Separator::Slash)
        .scheme(ConceptScheme::new().with("skos:prefLabel", "Simple Lithology"))
        .term("igneous", Concept::new().with("skos:prefLabel", "Igneous"))
        .term(
            "granite",
            Concept::new()
                .with("skos:prefLabel", "Granite")
                .with("skos:broader", reference("igneous")),
        )
        .term(
            "fine grained",
            Concept::new().with("skos:prefLabel", "Fine grained"),
        )
        .term(
            "igneous_rocks",
            Collection::new()
                .ordered(true)
                .with("skos:member", vec![reference("igneous"), reference("granite")]),
        )
        .build()
        .unwrap()
}

#[test]
fn scheme_uses_bare_vocabulary_iri() {
    let vocab = lithology();
    let scheme = Subject::Iri(iri("https://example.org/simple-lithology"));
    assert!(vocab.graph().contains(
        &scheme,
        &iri(iris::RDF_TYPE),
        &Object::Iri(iri(iris::SKOS_CONCEPT_SCHEME)),
    ));
}

#[test]
fn spaces_in_names_are_percent_encoded() {
    let vocab = lithology();
    let subject = Subject::Iri(iri("https://example.org/simple-lithology/fine%20grained"));
    assert_eq!(vocab.graph().about(&subject).count(), 2);
}

#[test]
fn turtle_uses_the_vocabulary_prefix() {
    let turtle = lithology().serialize(Format::Turtle).unwrap();
    assert!(turtle.contains("@prefix lith: <https://example.org/simple-lithology/> ."));
    assert!(turtle.contains("lith:granite\n  a skos:Concept ;\n"));
    assert!(turtle.contains("skos:broader lith:igneous"));
    assert!(turtle.contains("skos:member lith:igneous , lith:granite"));
}

#[test]
fn json_ld_has_one_node_per_subject() {
    let json: serde_json::Value =
        serde_json::from_str(&lithology().serialize(Format::JsonLd).unwrap()).unwrap();
    let nodes = json["@graph"].as_array().unwrap();
    assert_eq!(nodes.len(), 5);
    assert_eq!(json["@context"]["lith"], "https://example.org/simple-lithology/");
}

#[test]
fn building_twice_is_deterministic() {
    assert_eq!(lithology().graph(), lithology().graph());
    assert_eq!(
        lithology().serialize(Format::NTriples).unwrap(),
        lithology().serialize(Format::NTriples).unwrap()
    );
}
