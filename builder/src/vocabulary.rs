//! Vocabulary assembly.
//!
//! A [`Vocabulary`] is compiled from an identifier, a configuration block,
//! and an ordered list of named terms:
//!
//! ```
//! use skos_builder::{Concept, ConceptScheme, Separator, Vocabulary};
//!
//! let vocab = Vocabulary::builder("SimpleLithology")
//!     .prefix("sl")
//!     .base_url("https://example.org/")
//!     .namespace_separator(Separator::Slash)
//!     .scheme(ConceptScheme::new().with("skos:prefLabel", "Simple Lithology"))
//!     .term("granite", Concept::new().with("skos:prefLabel", "Granite"))
//!     .build()
//!     .unwrap();
//! assert_eq!(vocab.name(), "simple-lithology");
//! assert_eq!(vocab.namespace().as_str(), "https://example.org/simple-lithology/");
//! ```

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::error::{ConfigError, Error, Result};
use crate::graph::Graph;
use crate::model::{Iri, Subject};
use crate::options::{OptionValue, Options, Separator};
use crate::prefix::PrefixTable;
use crate::resolver::{Identifier, Resolver};
use crate::serializer::Format;
use crate::term::{Collection, ConceptScheme, ExpandContext, SkosTerm, Term};
use crate::translate::{EnglishOnly, Translator};

/// Characters left unescaped in local names: alphanumerics and `_.-~/`.
const LOCAL_NAME: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'~')
    .remove(b'/');

/// Splits a PascalCase or camelCase identifier into lower-cased words joined
/// by hyphens: `"SimpleLithology"` → `"simple-lithology"`.
///
/// Words are an optional capital followed by lower-case letters, or a run of
/// capitals that ends at another capital or at the end of the input. Anything
/// else (digits, punctuation, non-ASCII) separates words and is dropped.
#[must_use]
pub fn slugify(identifier: &str) -> String {
    let bytes = identifier.as_bytes();
    let mut words: Vec<&str> = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        match word_at(bytes, i) {
            Some(end) => {
                words.push(&identifier[i..end]);
                i = end;
            }
            None => i += 1,
        }
    }
    words.join("-").to_ascii_lowercase()
}

/// End of the word starting at `start`, if one starts there.
fn word_at(bytes: &[u8], start: usize) -> Option<usize> {
    let lower_run = |from: usize| {
        bytes[from..]
            .iter()
            .take_while(|b| b.is_ascii_lowercase())
            .count()
    };

    // Capitalised or lower-case word.
    let capital = usize::from(bytes[start].is_ascii_uppercase());
    let lowers = if start + capital < bytes.len() {
        lower_run(start + capital)
    } else {
        0
    };
    if lowers > 0 {
        return Some(start + capital + lowers);
    }

    // Acronym: capitals followed by another capital or the end of input.
    let caps = bytes[start..]
        .iter()
        .take_while(|b| b.is_ascii_uppercase())
        .count();
    if caps == 0 {
        None
    } else if start + caps == bytes.len() {
        Some(start + caps)
    } else if caps >= 2 {
        Some(start + caps - 1)
    } else {
        None
    }
}

/// Escapes a declared name for use as a local name. Only names containing a
/// space are escaped.
fn local_name(name: &str) -> String {
    if name.contains(' ') {
        utf8_percent_encode(name, LOCAL_NAME).to_string()
    } else {
        name.to_owned()
    }
}

/// Fluent declaration of a vocabulary. Configuration errors are held until
/// [`build`](Self::build), which reports the first one before doing any
/// other work.
#[derive(Clone)]
pub struct VocabularyBuilder {
    identifier: String,
    options: Options,
    terms: Vec<(String, Term)>,
    prefixes: PrefixTable,
    translator: Arc<dyn Translator>,
    error: Option<ConfigError>,
}

impl std::fmt::Debug for VocabularyBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VocabularyBuilder")
            .field("identifier", &self.identifier)
            .field("options", &self.options)
            .field("terms", &self.terms.len())
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl VocabularyBuilder {
    fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            options: Options::default(),
            terms: Vec::new(),
            prefixes: PrefixTable::default(),
            translator: Arc::new(EnglishOnly),
            error: None,
        }
    }

    /// Sets an option by key, as a configuration block would.
    #[must_use]
    pub fn option(mut self, key: &str, value: impl Into<OptionValue>) -> Self {
        if self.error.is_none() {
            if let Err(e) = self.options.set(key, value.into()) {
                self.error = Some(e);
            }
        }
        self
    }

    /// Explicit URL-safe name. An empty name leaves the derived one in place.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.options.name = Some(name.into()).filter(|n: &String| !n.is_empty());
        self
    }

    /// Prefix bound to the vocabulary namespace.
    #[must_use]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.options.prefix = prefix.into();
        self
    }

    /// Root IRI.
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.options.base_url = base_url.into();
        self
    }

    /// Namespace separator.
    #[must_use]
    pub fn namespace_separator(mut self, separator: Separator) -> Self {
        self.options.namespace_separator = separator;
        self
    }

    /// Scheme describing the vocabulary.
    #[must_use]
    pub fn scheme(mut self, scheme: ConceptScheme) -> Self {
        self.options.scheme = scheme;
        self
    }

    /// Adds an auxiliary collection to the configuration.
    #[must_use]
    pub fn collection(mut self, collection: Collection) -> Self {
        self.options.collections.push(collection);
        self
    }

    /// Replaces the whole configuration block.
    #[must_use]
    pub fn options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Declares a term under `name`.
    #[must_use]
    pub fn term(mut self, name: impl Into<String>, term: impl Into<Term>) -> Self {
        self.terms.push((name.into(), term.into()));
        self
    }

    /// Declares several terms in order.
    #[must_use]
    pub fn terms<I, N, T>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = (N, T)>,
        N: Into<String>,
        T: Into<Term>,
    {
        self.terms
            .extend(terms.into_iter().map(|(n, t)| (n.into(), t.into())));
        self
    }

    /// Prefix table used to expand CURIEs. Defaults to
    /// [`PrefixTable::default`].
    #[must_use]
    pub fn prefixes(mut self, prefixes: PrefixTable) -> Self {
        self.prefixes = prefixes;
        self
    }

    /// Translator for text values. Defaults to [`EnglishOnly`].
    #[must_use]
    pub fn translator(mut self, translator: impl Translator + 'static) -> Self {
        self.translator = Arc::new(translator);
        self
    }

    /// Shared translator for text values.
    #[must_use]
    pub fn shared_translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.translator = translator;
        self
    }

    /// Compiles the declaration into a graph.
    ///
    /// # Errors
    ///
    /// - [`Error::Config`] for any configuration problem; nothing else has
    ///   been done at that point.
    /// - [`Error::DuplicateTerm`] if two terms resolve to the same IRI.
    /// - Resolution errors from term expansion.
    pub fn build(self) -> Result<Vocabulary> {
        if let Some(e) = self.error {
            return Err(e.into());
        }
        self.options.validate()?;

        let name = match self.options.name.as_deref().filter(|n| !n.is_empty()) {
            Some(name) => name.to_owned(),
            None => slugify(&self.identifier),
        };
        if name.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "name".to_owned(),
                expected: "an identifier containing at least one word",
            }
            .into());
        }
        let iri = Iri::new(format!("{}{}", self.options.base_url, name))?;
        let namespace = Iri::new(format!(
            "{}{}",
            iri,
            self.options.namespace_separator.as_str()
        ))?;
        tracing::debug!(vocabulary = %name, namespace = %namespace, terms = self.terms.len(), "assembling vocabulary");

        let subjects = self.subjects(&namespace)?;

        let mut graph = Graph::new();
        let resolver = Resolver::with_namespace(&self.prefixes, &namespace);
        let ctx = ExpandContext::new(resolver, self.translator.as_ref());
        for ((declared, term), subject) in self.terms.iter().zip(subjects) {
            tracing::debug!(term = %declared, subject = %subject, "expanding declared term");
            term.expand(Some(Subject::Iri(subject)), &mut graph, &ctx)?;
        }

        graph.bind(&self.options.prefix, namespace.clone());
        self.options
            .scheme
            .expand(Some(Subject::Iri(iri.clone())), &mut graph, &ctx)?;

        tracing::debug!(vocabulary = %name, triples = graph.len(), "vocabulary assembled");
        Ok(Vocabulary {
            identifier: self.identifier,
            name,
            iri,
            namespace,
            options: self.options,
            graph,
        })
    }

    /// Subject IRI of every declared term, rejecting collisions.
    fn subjects(&self, namespace: &Iri) -> Result<Vec<Iri>> {
        let mut seen: HashMap<Iri, &str> = HashMap::new();
        let mut out = Vec::with_capacity(self.terms.len());
        for (declared, term) in &self.terms {
            let (label, subject) = match term.name() {
                Some(Identifier::Iri(iri)) => (iri.as_str(), iri.clone()),
                Some(Identifier::Name(name)) => (name.as_str(), namespace.join(&local_name(name))?),
                None => (declared.as_str(), namespace.join(&local_name(declared))?),
            };
            if seen.insert(subject.clone(), label).is_some() {
                return Err(Error::DuplicateTerm {
                    name: label.to_owned(),
                    iri: subject.to_string(),
                });
            }
            out.push(subject);
        }
        Ok(out)
    }
}

/// A compiled vocabulary: its identity plus the graph of all its triples.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    identifier: String,
    name: String,
    iri: Iri,
    namespace: Iri,
    options: Options,
    graph: Graph,
}

impl Vocabulary {
    /// Starts declaring a vocabulary. `identifier` is slugified into the
    /// vocabulary name unless an explicit name is configured.
    #[must_use]
    pub fn builder(identifier: impl Into<String>) -> VocabularyBuilder {
        VocabularyBuilder::new(identifier)
    }

    /// The identifier given to [`builder`](Self::builder).
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// URL-safe name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bare vocabulary IRI (`base_url + name`), the concept scheme's subject.
    #[must_use]
    pub fn iri(&self) -> &Iri {
        &self.iri
    }

    /// Namespace every term lives in (`base_url + name + separator`).
    #[must_use]
    pub fn namespace(&self) -> &Iri {
        &self.namespace
    }

    /// Configured prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.options.prefix
    }

    /// Configuration the vocabulary was built with.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The compiled graph.
    #[must_use]
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Consumes the vocabulary, returning its graph.
    #[must_use]
    pub fn into_graph(self) -> Graph {
        self.graph
    }

    /// IRI of the term with local name `local`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIri`] if the result is not a valid IRI.
    pub fn term_iri(&self, local: &str) -> Result<Iri> {
        self.namespace.join(&local_name(local))
    }

    /// Merges a separately loaded graph (for example from a
    /// [`Source`](crate::source::Source)) into this vocabulary's graph.
    pub fn merge_source(&mut self, source: &Graph) {
        tracing::debug!(vocabulary = %self.name, triples = source.len(), "merging source graph");
        self.graph.merge(source);
    }

    /// Serializes the graph in `format`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if JSON-LD rendering fails.
    pub fn serialize(&self, format: Format) -> Result<String> {
        self.graph.serialize(format)
    }

    /// Serializes the graph into `destination`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn write(&self, format: Format, destination: &Path) -> Result<()> {
        self.graph.write(format, destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{iris, Literal, Object};
    use crate::term::Concept;
    use proptest::prelude::*;

    #[test]
    fn slugify_pascal_case() {
        assert_eq!(slugify("SimpleLithology"), "simple-lithology");
    }

    #[test]
    fn slugify_camel_case_and_acronyms() {
        assert_eq!(slugify("sampleType"), "sample-type");
        assert_eq!(slugify("HTTPServer"), "http-server");
        assert_eq!(slugify("ISO"), "iso");
        assert_eq!(slugify("GeoSPARQL"), "geo-sparql");
    }

    #[test]
    fn slugify_drops_non_letters() {
        assert_eq!(slugify("Rock_Type"), "rock-type");
        assert_eq!(slugify("Vocab2020"), "vocab");
        assert_eq!(slugify("ISC2020"), "is");
        assert_eq!(slugify("1234"), "");
    }

    #[test]
    fn local_names_with_spaces_are_escaped() {
        assert_eq!(local_name("fine grained"), "fine%20grained");
        assert_eq!(local_name("a/b c"), "a/b%20c");
        assert_eq!(local_name("granite"), "granite");
    }

    #[test]
    fn scheme_sits_on_bare_vocabulary_iri() {
        let vocab = Vocabulary::builder("SimpleLithology")
            .base_url("https://example.org/")
            .scheme(ConceptScheme::new().with("skos:prefLabel", "Simple Lithology"))
            .build()
            .unwrap();
        let subject = Subject::Iri(Iri::new_unchecked("https://example.org/simple-lithology"));
        assert!(vocab.graph().contains(
            &subject,
            &Iri::new_unchecked(iris::RDF_TYPE),
            &Object::Iri(Iri::new_unchecked(iris::SKOS_CONCEPT_SCHEME)),
        ));
        assert!(vocab.graph().contains(
            &subject,
            &Iri::new_unchecked(iris::SKOS_PREF_LABEL),
            &Object::Literal(Literal::with_language("Simple Lithology", "en")),
        ));
    }

    #[test]
    fn explicit_name_and_iri_names() {
        let vocab = Vocabulary::builder("Ignored")
            .name("rocks")
            .base_url("https://example.org/")
            .term("a", Concept::new().named("alpha"))
            .term(
                "b",
                Concept::new().named(Iri::new_unchecked("https://other.org/beta")),
            )
            .build()
            .unwrap();
        let subjects: Vec<String> = vocab.graph().subjects().iter().map(|s| s.to_string()).collect();
        assert_eq!(
            subjects,
            [
                "<https://example.org/rocks#alpha>",
                "<https://other.org/beta>",
                "<https://example.org/rocks>",
            ]
        );
    }

    #[test]
    fn duplicate_local_names_are_rejected() {
        let err = Vocabulary::builder("Rocks")
            .base_url("https://example.org/")
            .term("granite", Concept::new())
            .term("other", Concept::new().named("granite"))
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateTerm { ref name, .. } if name == "granite"));
    }

    #[test]
    fn first_config_error_wins() {
        let err = Vocabulary::builder("Rocks")
            .option("unknown_opt", 1_i64)
            .option("namespace_separator", ":")
            .build()
            .unwrap_err();
        assert_eq!(
            err.as_config(),
            Some(&ConfigError::UnknownOption("unknown_opt".to_owned()))
        );
    }

    #[test]
    fn identifier_without_words_needs_explicit_name() {
        let err = Vocabulary::builder("2020")
            .base_url("https://example.org/")
            .build()
            .unwrap_err();
        assert!(matches!(err.as_config(), Some(ConfigError::InvalidValue { .. })));
    }

    proptest! {
        #[test]
        fn slugify_is_idempotent_on_slugs(slug in "[a-z]{1,8}(-[a-z]{1,8}){0,3}") {
            prop_assert_eq!(slugify(&slug), slug.clone());
            prop_assert_eq!(slugify(&slugify(&slug)), slug);
        }

        #[test]
        fn slugify_output_is_lowercase_words(input in "[A-Za-z0-9 _]{0,24}") {
            let slug = slugify(&input);
            prop_assert!(slug.chars().all(|c| c.is_ascii_lowercase() || c == '-'));
            prop_assert!(!slug.starts_with('-') && !slug.ends_with('-'));
            prop_assert_eq!(slugify(&slug), slug.clone());
        }
    }
}
