//! SKOS terms: concepts, collections, and concept schemes.
//!
//! A term is an ordered map from predicate to [`Value`]. Each term kind seeds
//! its map with an `rdf:type` default; attributes supplied afterwards extend
//! the map or override the default when they resolve to the same predicate.
//! [`SkosTerm::expand`] turns the map into triples about one subject.

use crate::error::Result;
use crate::graph::Graph;
use crate::model::{iris, Iri, Literal, Object, Subject};
use crate::resolver::{Identifier, Resolver};
use crate::translate::Translator;

/// The object side of an attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Another resource; resolved like any identifier.
    Ref(Identifier),
    /// Translatable text; expands to one language-tagged literal per
    /// available translation.
    Text(String),
    /// Repeated predicate: each element is expanded under the same predicate.
    List(Vec<Value>),
}

/// Shorthand for [`Value::Ref`].
#[must_use]
pub fn reference(target: impl Into<Identifier>) -> Value {
    Value::Ref(target.into())
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Text(text.to_owned())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Text(text)
    }
}

impl From<Iri> for Value {
    fn from(iri: Iri) -> Self {
        Value::Ref(Identifier::Iri(iri))
    }
}

impl<V: Into<Value>> From<Vec<V>> for Value {
    fn from(items: Vec<V>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

/// What expansion needs from its surroundings.
#[derive(Clone, Copy)]
pub struct ExpandContext<'a> {
    /// Resolves predicates and references.
    pub resolver: Resolver<'a>,
    /// Expands text values into per-language literals.
    pub translator: &'a dyn Translator,
}

impl<'a> ExpandContext<'a> {
    /// Bundles a resolver and a translator.
    #[must_use]
    pub fn new(resolver: Resolver<'a>, translator: &'a dyn Translator) -> Self {
        Self {
            resolver,
            translator,
        }
    }
}

impl std::fmt::Debug for ExpandContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpandContext")
            .field("resolver", &self.resolver)
            .finish_non_exhaustive()
    }
}

/// Ordered predicate → value map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: Vec<(Identifier, Value)>,
}

impl Attributes {
    /// An empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `predicate` to `value`. A predicate written identically replaces
    /// the earlier value in place.
    pub fn insert(&mut self, predicate: impl Into<Identifier>, value: impl Into<Value>) {
        let predicate = predicate.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(p, _)| *p == predicate) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((predicate, value)),
        }
    }

    /// Entries as declared, before resolution.
    pub fn iter(&self) -> impl Iterator<Item = (&Identifier, &Value)> {
        self.entries.iter().map(|(p, v)| (p, v))
    }

    /// Number of declared entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entries are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolves every predicate and merges entries that resolve to the same
    /// IRI. The later entry wins and keeps the position of the first.
    ///
    /// # Errors
    ///
    /// Returns the first resolution error.
    pub fn resolved(&self, resolver: &Resolver<'_>) -> Result<Vec<(Iri, &Value)>> {
        let mut merged: Vec<(Iri, &Value)> = Vec::with_capacity(self.entries.len());
        for (predicate, value) in &self.entries {
            let predicate = resolver.resolve(predicate)?;
            match merged.iter_mut().find(|(p, _)| *p == predicate) {
                Some(entry) => entry.1 = value,
                None => merged.push((predicate, value)),
            }
        }
        Ok(merged)
    }

    /// Value for `predicate` after resolution and merging.
    ///
    /// # Errors
    ///
    /// Returns the first resolution error.
    pub fn get(&self, predicate: &Iri, resolver: &Resolver<'_>) -> Result<Option<&Value>> {
        Ok(self
            .resolved(resolver)?
            .into_iter()
            .find(|(p, _)| p == predicate)
            .map(|(_, v)| v))
    }

    /// Expands into `graph` under `subject`, minting a fresh blank node when
    /// `subject` is `None`. Returns the subject used.
    ///
    /// Every triple is computed before any is inserted, so a failed expansion
    /// leaves `graph` untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if a predicate or reference fails to resolve.
    pub fn expand(
        &self,
        subject: Option<Subject>,
        graph: &mut Graph,
        ctx: &ExpandContext<'_>,
    ) -> Result<Subject> {
        let mut pending: Vec<(Iri, Object)> = Vec::new();
        for (predicate, value) in self.resolved(&ctx.resolver)? {
            collect_objects(&predicate, value, ctx, &mut pending)?;
        }
        let subject = subject.unwrap_or_else(|| Subject::Blank(graph.fresh_blank_node()));
        tracing::trace!(%subject, triples = pending.len(), "expanding term");
        for (predicate, object) in pending {
            graph.insert(subject.clone(), predicate, object);
        }
        Ok(subject)
    }
}

impl IntoIterator for Attributes {
    type Item = (Identifier, Value);
    type IntoIter = std::vec::IntoIter<(Identifier, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

fn collect_objects(
    predicate: &Iri,
    value: &Value,
    ctx: &ExpandContext<'_>,
    out: &mut Vec<(Iri, Object)>,
) -> Result<()> {
    match value {
        Value::Ref(target) => {
            out.push((predicate.clone(), Object::Iri(ctx.resolver.resolve(target)?)));
        }
        Value::List(items) => {
            for item in items {
                collect_objects(predicate, item, ctx, out)?;
            }
        }
        Value::Text(text) => {
            for (language, rendered) in ctx.translator.translations(text).iter() {
                out.push((
                    predicate.clone(),
                    Object::Literal(Literal::with_language(rendered, language)),
                ));
            }
        }
    }
    Ok(())
}

/// Behaviour shared by the three SKOS term kinds.
pub trait SkosTerm {
    /// The `rdf:type` every instance starts with.
    const DEFAULT_TYPE: &'static str;

    /// The merged attribute map, defaults included.
    fn attributes(&self) -> &Attributes;

    /// Explicit name overriding the declared one, if set.
    fn name(&self) -> Option<&Identifier>;

    /// Appends this term's triples to `graph`. See [`Attributes::expand`].
    ///
    /// # Errors
    ///
    /// Returns an error if a predicate or reference fails to resolve.
    fn expand(
        &self,
        subject: Option<Subject>,
        graph: &mut Graph,
        ctx: &ExpandContext<'_>,
    ) -> Result<Subject> {
        self.attributes().expand(subject, graph, ctx)
    }
}

fn seeded(default_type: &str) -> Attributes {
    let mut attributes = Attributes::new();
    attributes.insert(
        Iri::new_unchecked(iris::RDF_TYPE),
        Iri::new_unchecked(default_type),
    );
    attributes
}

macro_rules! skos_term {
    ($ty:ident, $default:expr) => {
        impl $ty {
            /// A term holding only its `rdf:type` default.
            #[must_use]
            pub fn new() -> Self {
                Self::default()
            }

            /// Builds a term from `(predicate, value)` pairs applied over the
            /// defaults.
            #[must_use]
            pub fn from_attributes<I, P, V>(attributes: I) -> Self
            where
                I: IntoIterator<Item = (P, V)>,
                P: Into<Identifier>,
                V: Into<Value>,
            {
                attributes
                    .into_iter()
                    .fold(Self::new(), |term, (p, v)| term.with(p, v))
            }

            /// Sets an attribute.
            #[must_use]
            pub fn with(mut self, predicate: impl Into<Identifier>, value: impl Into<Value>) -> Self {
                self.attributes.insert(predicate, value);
                self
            }

            /// Overrides the local name this term is published under. An
            /// [`Iri`] is used as the subject verbatim.
            #[must_use]
            pub fn named(mut self, name: impl Into<Identifier>) -> Self {
                self.name = Some(name.into());
                self
            }
        }

        impl SkosTerm for $ty {
            const DEFAULT_TYPE: &'static str = $default;

            fn attributes(&self) -> &Attributes {
                &self.attributes
            }

            fn name(&self) -> Option<&Identifier> {
                self.name.as_ref()
            }
        }
    };
}

/// A `skos:Concept`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Concept {
    name: Option<Identifier>,
    attributes: Attributes,
}

impl Default for Concept {
    fn default() -> Self {
        Self {
            name: None,
            attributes: seeded(Self::DEFAULT_TYPE),
        }
    }
}

skos_term!(Concept, iris::SKOS_CONCEPT);

/// A `skos:Collection`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection {
    name: Option<Identifier>,
    attributes: Attributes,
    ordered: bool,
}

impl Default for Collection {
    fn default() -> Self {
        Self {
            name: None,
            attributes: seeded(Self::DEFAULT_TYPE),
            ordered: false,
        }
    }
}

skos_term!(Collection, iris::SKOS_COLLECTION);

impl Collection {
    /// Marks the collection as ordered. Stored only; expansion does not emit
    /// an ordered-collection encoding.
    #[must_use]
    pub fn ordered(mut self, ordered: bool) -> Self {
        self.ordered = ordered;
        self
    }

    /// Whether the collection was marked ordered.
    #[must_use]
    pub fn is_ordered(&self) -> bool {
        self.ordered
    }
}

/// A `skos:ConceptScheme`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConceptScheme {
    name: Option<Identifier>,
    attributes: Attributes,
}

impl Default for ConceptScheme {
    fn default() -> Self {
        Self {
            name: None,
            attributes: seeded(Self::DEFAULT_TYPE),
        }
    }
}

skos_term!(ConceptScheme, iris::SKOS_CONCEPT_SCHEME);

/// Any declarable term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    /// A concept.
    Concept(Concept),
    /// A collection.
    Collection(Collection),
    /// A concept scheme.
    Scheme(ConceptScheme),
}

impl Term {
    /// Explicit name override, if any.
    #[must_use]
    pub fn name(&self) -> Option<&Identifier> {
        match self {
            Term::Concept(t) => t.name(),
            Term::Collection(t) => t.name(),
            Term::Scheme(t) => t.name(),
        }
    }

    /// Attribute map of the wrapped term.
    #[must_use]
    pub fn attributes(&self) -> &Attributes {
        match self {
            Term::Concept(t) => t.attributes(),
            Term::Collection(t) => t.attributes(),
            Term::Scheme(t) => t.attributes(),
        }
    }

    /// See [`SkosTerm::expand`].
    ///
    /// # Errors
    ///
    /// Returns an error if a predicate or reference fails to resolve.
    pub fn expand(
        &self,
        subject: Option<Subject>,
        graph: &mut Graph,
        ctx: &ExpandContext<'_>,
    ) -> Result<Subject> {
        self.attributes().expand(subject, graph, ctx)
    }
}

impl From<Concept> for Term {
    fn from(t: Concept) -> Self {
        Term::Concept(t)
    }
}

impl From<Collection> for Term {
    fn from(t: Collection) -> Self {
        Term::Collection(t)
    }
}

impl From<ConceptScheme> for Term {
    fn from(t: ConceptScheme) -> Self {
        Term::Scheme(t)
    }
}
