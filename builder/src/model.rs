//! Core RDF term types.
//!
//! These are the nodes that make up a [`Graph`](crate::Graph): absolute IRIs,
//! graph-scoped blank nodes, and literals carrying an optional language tag.

use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};

/// An absolute, immutable IRI reference.
///
/// Equality is value equality on the string. Cloning is cheap.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Iri(Arc<str>);

impl Iri {
    /// Wraps `value` as an IRI after checking it contains no characters that
    /// are forbidden inside `<...>` in Turtle and N-Triples.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIri`] if `value` is empty or contains
    /// whitespace, control characters, or any of `<>"{}|^` and backtick.
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if value.is_empty() || value.chars().any(is_forbidden) {
            return Err(Error::InvalidIri(value));
        }
        Ok(Self(value.into()))
    }

    /// Wraps a string known to be a valid IRI (used for the constants below).
    #[must_use]
    pub fn new_unchecked(value: &str) -> Self {
        Self(value.into())
    }

    /// The IRI as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Appends `local` to this IRI, treating it as a namespace.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIri`] if the concatenation is not a valid IRI.
    pub fn join(&self, local: &str) -> Result<Self> {
        Self::new(format!("{}{}", self.0, local))
    }
}

fn is_forbidden(c: char) -> bool {
    c.is_whitespace()
        || c.is_control()
        || matches!(c, '<' | '>' | '"' | '{' | '}' | '|' | '^' | '`' | '\\')
}

impl fmt::Display for Iri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Iri {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// An anonymous node. Identifiers are minted by the owning
/// [`Graph`](crate::Graph) and are only meaningful inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlankNode(u64);

impl BlankNode {
    pub(crate) fn from_id(id: u64) -> Self {
        Self(id)
    }

    /// Numeric identifier within the owning graph.
    #[must_use]
    pub fn id(self) -> u64 {
        self.0
    }
}

impl fmt::Display for BlankNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "_:b{}", self.0)
    }
}

/// A literal value: lexical form plus an optional language tag or datatype.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Literal {
    lexical: String,
    language: Option<String>,
    datatype: Option<Iri>,
}

impl Literal {
    /// A plain `xsd:string` literal.
    #[must_use]
    pub fn plain(lexical: impl Into<String>) -> Self {
        Self {
            lexical: lexical.into(),
            language: None,
            datatype: None,
        }
    }

    /// A language-tagged string.
    #[must_use]
    pub fn with_language(lexical: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            lexical: lexical.into(),
            language: Some(language.into()),
            datatype: None,
        }
    }

    /// A literal with an explicit datatype.
    #[must_use]
    pub fn typed(lexical: impl Into<String>, datatype: Iri) -> Self {
        Self {
            lexical: lexical.into(),
            language: None,
            datatype: Some(datatype),
        }
    }

    /// Lexical form.
    #[must_use]
    pub fn lexical(&self) -> &str {
        &self.lexical
    }

    /// Language tag, if any.
    #[must_use]
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Datatype IRI for typed literals. `None` for plain and language-tagged
    /// strings.
    #[must_use]
    pub fn datatype(&self) -> Option<&Iri> {
        self.datatype.as_ref()
    }
}

/// Subject position: an IRI or a blank node.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Subject {
    /// Named resource.
    Iri(Iri),
    /// Anonymous resource.
    Blank(BlankNode),
}

impl From<Iri> for Subject {
    fn from(iri: Iri) -> Self {
        Subject::Iri(iri)
    }
}

impl From<BlankNode> for Subject {
    fn from(node: BlankNode) -> Self {
        Subject::Blank(node)
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subject::Iri(iri) => write!(f, "<{iri}>"),
            Subject::Blank(node) => node.fmt(f),
        }
    }
}

/// Object position: an IRI, a blank node, or a literal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Object {
    /// Named resource.
    Iri(Iri),
    /// Anonymous resource.
    Blank(BlankNode),
    /// Literal value.
    Literal(Literal),
}

impl Object {
    /// Returns the literal if this object is one.
    #[must_use]
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Object::Literal(lit) => Some(lit),
            _ => None,
        }
    }

    /// Returns the IRI if this object is one.
    #[must_use]
    pub fn as_iri(&self) -> Option<&Iri> {
        match self {
            Object::Iri(iri) => Some(iri),
            _ => None,
        }
    }
}

impl From<Iri> for Object {
    fn from(iri: Iri) -> Self {
        Object::Iri(iri)
    }
}

impl From<BlankNode> for Object {
    fn from(node: BlankNode) -> Self {
        Object::Blank(node)
    }
}

impl From<Literal> for Object {
    fn from(lit: Literal) -> Self {
        Object::Literal(lit)
    }
}

impl From<Subject> for Object {
    fn from(subject: Subject) -> Self {
        match subject {
            Subject::Iri(iri) => Object::Iri(iri),
            Subject::Blank(node) => Object::Blank(node),
        }
    }
}

/// Standard IRI constants.
pub mod iris {
    /// RDF namespace.
    pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
    /// RDFS namespace.
    pub const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
    /// OWL namespace.
    pub const OWL: &str = "http://www.w3.org/2002/07/owl#";
    /// XSD namespace.
    pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";
    /// SKOS namespace.
    pub const SKOS: &str = "http://www.w3.org/2004/02/skos/core#";

    /// `rdf:type`.
    pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
    /// `xsd:string`.
    pub const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";

    /// `skos:Concept`.
    pub const SKOS_CONCEPT: &str = "http://www.w3.org/2004/02/skos/core#Concept";
    /// `skos:Collection`.
    pub const SKOS_COLLECTION: &str = "http://www.w3.org/2004/02/skos/core#Collection";
    /// `skos:ConceptScheme`.
    pub const SKOS_CONCEPT_SCHEME: &str = "http://www.w3.org/2004/02/skos/core#ConceptScheme";
    /// `skos:prefLabel`.
    pub const SKOS_PREF_LABEL: &str = "http://www.w3.org/2004/02/skos/core#prefLabel";
    /// `skos:broader`.
    pub const SKOS_BROADER: &str = "http://www.w3.org/2004/02/skos/core#broader";
    /// `skos:member`.
    pub const SKOS_MEMBER: &str = "http://www.w3.org/2004/02/skos/core#member";
}
