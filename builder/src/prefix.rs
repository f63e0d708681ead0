//! Prefix table used to expand CURIEs.
//!
//! [`PrefixTable::default`] carries the core RDF prefixes plus a library set
//! of widely used vocabularies. Tables are built once and then only read while
//! vocabularies are compiled.

use std::collections::BTreeMap;

use crate::error::{ConfigError, Result};
use crate::model::{iris, Iri};

/// Prefixes every table starts with.
pub const CORE_PREFIXES: &[(&str, &str)] = &[
    ("owl", iris::OWL),
    ("rdf", iris::RDF),
    ("rdfs", iris::RDFS),
    ("xsd", iris::XSD),
    ("xml", "http://www.w3.org/XML/1998/namespace"),
];

/// Well-known vocabularies registered alongside [`CORE_PREFIXES`].
pub const LIBRARY_PREFIXES: &[(&str, &str)] = &[
    ("brick", "https://brickschema.org/schema/Brick#"),
    ("csvw", "http://www.w3.org/ns/csvw#"),
    ("dc", "http://purl.org/dc/elements/1.1/"),
    ("dcat", "http://www.w3.org/ns/dcat#"),
    ("dcmitype", "http://purl.org/dc/dcmitype/"),
    ("dcterms", "http://purl.org/dc/terms/"),
    ("dcam", "http://purl.org/dc/dcam/"),
    ("doap", "http://usefulinc.com/ns/doap#"),
    ("foaf", "http://xmlns.com/foaf/0.1/"),
    ("geo", "http://www.opengis.net/ont/geosparql#"),
    ("odrl", "http://www.w3.org/ns/odrl/2/"),
    ("org", "http://www.w3.org/ns/org#"),
    ("prof", "http://www.w3.org/ns/dx/prof/"),
    ("prov", "http://www.w3.org/ns/prov#"),
    ("qb", "http://purl.org/linked-data/cube#"),
    ("schema", "https://schema.org/"),
    ("sh", "http://www.w3.org/ns/shacl#"),
    ("skos", iris::SKOS),
    ("sosa", "http://www.w3.org/ns/sosa/"),
    ("ssn", "http://www.w3.org/ns/ssn/"),
    ("time", "http://www.w3.org/2006/time#"),
    ("vann", "http://purl.org/vocab/vann/"),
    ("void", "http://rdfs.org/ns/void#"),
    ("wgs", "https://www.w3.org/2003/01/geo/wgs84_pos#"),
];

/// Mapping from short prefix to namespace IRI. Prefixes are unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixTable {
    entries: BTreeMap<String, Iri>,
}

impl PrefixTable {
    /// An empty table.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Registers `prefix` → `namespace`.
    ///
    /// Re-registering a prefix with the namespace it already has is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPrefix`] if `prefix` is not a valid CURIE
    /// prefix, or [`ConfigError::ConflictingPrefix`] if it is already bound to
    /// a different namespace.
    pub fn insert(&mut self, prefix: &str, namespace: Iri) -> Result<()> {
        if !is_valid_prefix(prefix) {
            return Err(ConfigError::InvalidPrefix(prefix.to_owned()).into());
        }
        match self.entries.get(prefix) {
            Some(existing) if *existing == namespace => Ok(()),
            Some(existing) => Err(ConfigError::ConflictingPrefix {
                prefix: prefix.to_owned(),
                existing: existing.to_string(),
                requested: namespace.to_string(),
            }
            .into()),
            None => {
                self.entries.insert(prefix.to_owned(), namespace);
                Ok(())
            }
        }
    }

    /// Builder-style [`insert`](Self::insert).
    ///
    /// # Errors
    ///
    /// Same as [`insert`](Self::insert).
    pub fn with(mut self, prefix: &str, namespace: Iri) -> Result<Self> {
        self.insert(prefix, namespace)?;
        Ok(self)
    }

    /// Looks up the namespace bound to `prefix`.
    #[must_use]
    pub fn get(&self, prefix: &str) -> Option<&Iri> {
        self.entries.get(prefix)
    }

    /// Iterates entries in prefix order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Iri)> {
        self.entries.iter().map(|(p, ns)| (p.as_str(), ns))
    }

    /// Number of registered prefixes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for PrefixTable {
    fn default() -> Self {
        let entries = CORE_PREFIXES
            .iter()
            .chain(LIBRARY_PREFIXES)
            .map(|(prefix, ns)| ((*prefix).to_owned(), Iri::new_unchecked(ns)))
            .collect();
        Self { entries }
    }
}

/// A prefix may be empty (the default namespace) or an ASCII letter followed
/// by letters, digits, `-`, `_`, or `.`, not ending in `.`.
pub(crate) fn is_valid_prefix(prefix: &str) -> bool {
    let mut chars = prefix.chars();
    match chars.next() {
        None => true,
        Some(first) if first.is_ascii_alphabetic() => {
            !prefix.ends_with('.')
                && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        }
        Some(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn default_table_has_core_and_library_prefixes() {
        let table = PrefixTable::default();
        assert_eq!(table.len(), CORE_PREFIXES.len() + LIBRARY_PREFIXES.len());
        assert_eq!(
            table.get("skos").map(Iri::as_str),
            Some("http://www.w3.org/2004/02/skos/core#")
        );
        assert!(table.get("rdf").is_some());
    }

    #[test]
    fn core_namespaces_match_term_constants() {
        let table = PrefixTable::default();
        let rdf_type = table.get("rdf").map(|ns| format!("{ns}type"));
        assert_eq!(rdf_type.as_deref(), Some(iris::RDF_TYPE));
        let xsd_string = table.get("xsd").map(|ns| format!("{ns}string"));
        assert_eq!(xsd_string.as_deref(), Some(iris::XSD_STRING));
        assert_eq!(table.get("owl").map(Iri::as_str), Some(iris::OWL));
        assert_eq!(table.get("rdfs").map(Iri::as_str), Some(iris::RDFS));
    }

    #[test]
    fn all_default_prefixes_unique() {
        let mut seen = std::collections::HashSet::new();
        for (prefix, _) in CORE_PREFIXES.iter().chain(LIBRARY_PREFIXES) {
            assert!(seen.insert(*prefix), "Duplicate prefix: {prefix}");
        }
    }

    #[test]
    fn rebinding_to_same_namespace_is_allowed() {
        let mut table = PrefixTable::default();
        let skos = Iri::new_unchecked("http://www.w3.org/2004/02/skos/core#");
        assert!(table.insert("skos", skos).is_ok());
    }

    #[test]
    fn conflicting_rebind_is_rejected() {
        let mut table = PrefixTable::default();
        let err = table
            .insert("skos", Iri::new_unchecked("http://example.org/skos#"))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::ConflictingPrefix { ref prefix, .. }) if prefix == "skos"
        ));
    }

    #[test]
    fn prefix_syntax() {
        assert!(is_valid_prefix(""));
        assert!(is_valid_prefix("sl"));
        assert!(is_valid_prefix("my-vocab_2"));
        assert!(!is_valid_prefix("2vocab"));
        assert!(!is_valid_prefix("a b"));
        assert!(!is_valid_prefix("trailing."));
    }
}
