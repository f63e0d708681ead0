//! Resolution of identifiers (absolute IRIs, CURIEs, local names) to [`Iri`]s.

use std::fmt;

use crate::error::{Error, Result};
use crate::model::Iri;
use crate::prefix::PrefixTable;

/// URI schemes recognised as already-absolute identifiers.
const ABSOLUTE_SCHEMES: &[&str] = &["http://", "https://", "urn:"];

/// An identifier as written in a declaration: either an already-resolved IRI
/// or a string that is an absolute IRI, a `prefix:local` CURIE, or a bare
/// local name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Identifier {
    /// Already resolved.
    Iri(Iri),
    /// Unresolved text.
    Name(String),
}

impl From<Iri> for Identifier {
    fn from(iri: Iri) -> Self {
        Identifier::Iri(iri)
    }
}

impl From<&str> for Identifier {
    fn from(name: &str) -> Self {
        Identifier::Name(name.to_owned())
    }
}

impl From<String> for Identifier {
    fn from(name: String) -> Self {
        Identifier::Name(name)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Iri(iri) => write!(f, "<{iri}>"),
            Identifier::Name(name) => f.write_str(name),
        }
    }
}

/// Returns true if `text` starts with a recognised absolute URI scheme.
#[must_use]
pub fn is_absolute(text: &str) -> bool {
    ABSOLUTE_SCHEMES.iter().any(|scheme| text.starts_with(scheme))
}

/// Resolves identifiers against a prefix table and an optional default
/// namespace for bare local names.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    prefixes: &'a PrefixTable,
    namespace: Option<&'a Iri>,
}

impl<'a> Resolver<'a> {
    /// A resolver with no default namespace; bare local names fail.
    #[must_use]
    pub fn new(prefixes: &'a PrefixTable) -> Self {
        Self {
            prefixes,
            namespace: None,
        }
    }

    /// A resolver that places bare local names inside `namespace`.
    #[must_use]
    pub fn with_namespace(prefixes: &'a PrefixTable, namespace: &'a Iri) -> Self {
        Self {
            prefixes,
            namespace: Some(namespace),
        }
    }

    /// The prefix table in use.
    #[must_use]
    pub fn prefixes(&self) -> &'a PrefixTable {
        self.prefixes
    }

    /// Resolves `identifier`:
    ///
    /// 1. an [`Identifier::Iri`] is returned unchanged;
    /// 2. text starting with `http://`, `https://`, or `urn:` is wrapped as-is;
    /// 3. text containing `:` is expanded as a CURIE;
    /// 4. anything else is a local name in the default namespace.
    ///
    /// # Errors
    ///
    /// - [`Error::MalformedCurie`] if the CURIE lacks a prefix or a local name
    ///   or has more than one `:`.
    /// - [`Error::UnknownPrefix`] if the CURIE prefix is not registered.
    /// - [`Error::UnresolvedName`] for a local name when there is no default
    ///   namespace.
    /// - [`Error::InvalidIri`] if the resulting string is not a valid IRI.
    pub fn resolve(&self, identifier: &Identifier) -> Result<Iri> {
        match identifier {
            Identifier::Iri(iri) => Ok(iri.clone()),
            Identifier::Name(name) => self.resolve_str(name),
        }
    }

    /// [`resolve`](Self::resolve) for a plain string.
    ///
    /// # Errors
    ///
    /// Same as [`resolve`](Self::resolve).
    pub fn resolve_str(&self, name: &str) -> Result<Iri> {
        if is_absolute(name) {
            return Iri::new(name);
        }
        if let Some((prefix, local)) = name.split_once(':') {
            if prefix.is_empty() || local.is_empty() || local.contains(':') {
                return Err(Error::MalformedCurie(name.to_owned()));
            }
            let namespace = self
                .prefixes
                .get(prefix)
                .ok_or_else(|| Error::UnknownPrefix(prefix.to_owned()))?;
            return namespace.join(local);
        }
        match self.namespace {
            Some(namespace) => namespace.join(name),
            None => Err(Error::UnresolvedName(name.to_owned())),
        }
    }
}
