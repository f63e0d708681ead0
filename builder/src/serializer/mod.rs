//! Serializers for compiled graphs.
//!
//! Three serialization formats are supported:
//! - **Turtle** ([`turtle`]): prefixed, grouped by subject
//! - **N-Triples** ([`ntriples`]): one triple per line, absolute IRIs
//! - **JSON-LD** ([`jsonld`]): `@context` plus a flat `@graph` array

pub mod jsonld;
pub mod ntriples;
pub mod turtle;

use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::model::{iris, Iri, Object, Subject};
use crate::prefix::{is_valid_prefix, PrefixTable};

/// An RDF text format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// Turtle 1.1.
    Turtle,
    /// N-Triples.
    NTriples,
    /// JSON-LD 1.1.
    JsonLd,
}

impl Format {
    /// File extension used when writing this format.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Format::Turtle => "ttl",
            Format::NTriples => "nt",
            Format::JsonLd => "json",
        }
    }

    /// Media type, used as the `Accept` header for remote sources.
    #[must_use]
    pub fn media_type(self) -> &'static str {
        match self {
            Format::Turtle => "text/turtle",
            Format::NTriples => "application/n-triples",
            Format::JsonLd => "application/ld+json",
        }
    }

    /// Infers a format from a path or URL's extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "ttl" | "turtle" => Ok(Format::Turtle),
            "nt" | "ntriples" | "n-triples" => Ok(Format::NTriples),
            "json" | "jsonld" | "json-ld" => Ok(Format::JsonLd),
            _ => Err(Error::UnsupportedFormat(s.to_owned())),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Format::Turtle => "turtle",
            Format::NTriples => "ntriples",
            Format::JsonLd => "json-ld",
        })
    }
}

/// Serializes `graph` in `format`.
///
/// # Errors
///
/// Returns [`Error::Json`] if JSON-LD rendering fails.
pub fn serialize(graph: &Graph, format: Format) -> Result<String> {
    match format {
        Format::Turtle => Ok(turtle::to_turtle(graph)),
        Format::NTriples => Ok(ntriples::to_ntriples(graph)),
        Format::JsonLd => Ok(serde_json::to_string_pretty(&jsonld::to_json_ld(graph))?),
    }
}

/// Shortens IRIs to `prefix:local` form using the graph's own bindings first
/// and the default prefix table after.
pub(crate) struct Abbreviator {
    prefixes: Vec<(String, Iri)>,
}

impl Abbreviator {
    pub(crate) fn new(graph: &Graph) -> Self {
        let mut prefixes: Vec<(String, Iri)> = graph
            .prefixes()
            .filter(|(p, _)| is_valid_prefix(p))
            .map(|(p, ns)| (p.to_owned(), ns.clone()))
            .collect();
        for (prefix, namespace) in PrefixTable::default().iter() {
            let taken = prefixes
                .iter()
                .any(|(p, ns)| p == prefix || ns == namespace);
            if !taken {
                prefixes.push((prefix.to_owned(), namespace.clone()));
            }
        }
        Self { prefixes }
    }

    /// Drops the empty (default) prefix. JSON-LD has no `:local` form.
    pub(crate) fn without_empty_prefix(mut self) -> Self {
        self.prefixes.retain(|(p, _)| !p.is_empty());
        self
    }

    /// Compact form of `iri`, preferring the longest matching namespace.
    pub(crate) fn compact(&self, iri: &Iri) -> Option<String> {
        self.split(iri)
            .map(|(prefix, local)| format!("{prefix}:{local}"))
    }

    fn split<'s, 'i>(&'s self, iri: &'i Iri) -> Option<(&'s str, &'i str)> {
        self.prefixes
            .iter()
            .filter_map(|(prefix, ns)| {
                iri.as_str()
                    .strip_prefix(ns.as_str())
                    .filter(|local| is_valid_local(local))
                    .map(|local| (prefix.as_str(), ns.as_str().len(), local))
            })
            .max_by_key(|(_, len, _)| *len)
            .map(|(prefix, _, local)| (prefix, local))
    }

    /// Prefixes that [`compact`](Self::compact) would use for some IRI in
    /// `graph`, sorted by prefix.
    pub(crate) fn used(&self, graph: &Graph) -> Vec<(&str, &Iri)> {
        let mut used: BTreeSet<&str> = BTreeSet::new();
        let mut note = |iri: &Iri| {
            if let Some((prefix, _)) = self.split(iri) {
                used.insert(prefix);
            }
        };
        for triple in graph {
            if let Subject::Iri(iri) = &triple.subject {
                note(iri);
            }
            // `a` in Turtle, `@type` in JSON-LD
            let typed = triple.predicate.as_str() == iris::RDF_TYPE
                && matches!(triple.object, Object::Iri(_));
            if !typed {
                note(&triple.predicate);
            }
            match &triple.object {
                Object::Iri(iri) => note(iri),
                Object::Literal(lit) => {
                    if let Some(dt) = lit.datatype() {
                        note(dt);
                    }
                }
                Object::Blank(_) => {}
            }
        }
        let mut out: Vec<(&str, &Iri)> = self
            .prefixes
            .iter()
            .filter(|(p, _)| used.contains(p.as_str()))
            .map(|(p, ns)| (p.as_str(), ns))
            .collect();
        out.sort_by_key(|(p, _)| *p);
        out
    }
}

/// A conservative subset of Turtle's `PN_LOCAL`.
fn is_valid_local(local: &str) -> bool {
    let mut chars = local.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphanumeric() || first == '_' => {
            !local.ends_with('.')
                && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
        }
        _ => false,
    }
}

/// Escapes a string for a double-quoted Turtle / N-Triples literal.
pub(crate) fn escape_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out
}
