//! Vocabulary declaration files.
//!
//! A declaration is a TOML document describing one vocabulary:
//!
//! ```toml
//! identifier = "SimpleLithology"
//!
//! [vocabulary]
//! prefix = "sl"
//! base_url = "https://example.org/"
//! namespace_separator = "/"
//!
//! [vocabulary.scheme]
//! "skos:prefLabel" = "Simple Lithology"
//!
//! [prefixes]
//! ex = "https://example.org/extra#"
//!
//! [terms.granite]
//! "skos:prefLabel" = "Granite"
//! "skos:broader" = { ref = "igneous" }
//!
//! [terms.igneous]
//! "skos:prefLabel" = "Igneous rock"
//!
//! [translations.fr]
//! "Granite" = "Granit"
//!
//! [source]
//! location = "extra.ttl"
//! ```
//!
//! Keys of `[vocabulary]` go through [`Options::set`](crate::Options::set),
//! so an unknown key fails with the same
//! [`ConfigError::UnknownOption`](crate::ConfigError::UnknownOption) as the
//! programmatic builder. Inside a term table `kind`, `name` and `ordered` are
//! reserved; every other key is a predicate. Values are strings (translatable
//! text), `{ ref = "..." }` tables (references) or arrays of either.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::{ConfigError, Result};
use crate::model::Iri;
use crate::options::{OptionValue, OPTION_KEYS};
use crate::prefix::PrefixTable;
use crate::resolver::{is_absolute, Identifier};
use crate::serializer::Format;
use crate::source::Source;
use crate::term::{Attributes, Collection, Concept, ConceptScheme, Term, Value};
use crate::translate::Catalog;
use crate::vocabulary::{Vocabulary, VocabularyBuilder};

/// Keys of a term table that are not predicates.
const RESERVED_TERM_KEYS: &[&str] = &["kind", "name", "ordered"];

/// A parsed declaration file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Declaration {
    /// Identifier slugified into the vocabulary name. Defaults to the file
    /// stem when loaded from a path.
    #[serde(default)]
    pub identifier: Option<String>,
    /// Configuration block.
    #[serde(default)]
    pub vocabulary: toml::Table,
    /// Extra prefixes on top of [`PrefixTable::default`].
    #[serde(default)]
    pub prefixes: BTreeMap<String, String>,
    /// Terms in declaration order.
    #[serde(default)]
    pub terms: toml::Table,
    /// Per-language message catalogs.
    #[serde(default)]
    pub translations: BTreeMap<String, BTreeMap<String, String>>,
    /// Existing graph merged into the compiled vocabulary.
    #[serde(default)]
    pub source: Option<SourceDecl>,
}

/// The `[source]` table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceDecl {
    /// File path (relative to the declaration) or `http(s)` URL.
    pub location: String,
    /// Parser format; inferred from the location when absent.
    #[serde(default)]
    pub format: Option<String>,
}

impl Declaration {
    /// Parses a declaration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Toml`](crate::Error::Toml) for malformed TOML or an
    /// unknown top-level table.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Turns the declaration into a builder. `fallback_identifier` is used
    /// when the file has no `identifier`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for bad options, prefixes or term
    /// values, and [`Error::InvalidIri`](crate::Error::InvalidIri) for an
    /// unusable prefix namespace or term IRI.
    pub fn builder(&self, fallback_identifier: &str) -> Result<VocabularyBuilder> {
        let identifier = self.identifier.as_deref().unwrap_or(fallback_identifier);
        let mut builder = Vocabulary::builder(identifier)
            .prefixes(self.prefix_table()?)
            .translator(self.catalog());

        for (key, value) in &self.vocabulary {
            if let Some(value) = option_value(key, value)? {
                builder = builder.option(key, value);
            }
        }
        for (name, table) in &self.terms {
            let table = table.as_table().ok_or_else(|| invalid(name, "a table"))?;
            builder = builder.term(name.as_str(), term(name, table)?);
        }
        Ok(builder)
    }

    /// The `[source]` table as a loadable [`Source`], resolved against
    /// `base_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedFormat`](crate::Error::UnsupportedFormat)
    /// for an unknown format name.
    pub fn source(&self, name: &str, base_dir: Option<&Path>) -> Result<Option<Source>> {
        let Some(decl) = &self.source else {
            return Ok(None);
        };
        let format = decl
            .format
            .as_deref()
            .map(str::parse::<Format>)
            .transpose()?;
        Ok(Some(
            Source::from_location(name, &decl.location, base_dir).with_format(format),
        ))
    }

    /// Builds the vocabulary and merges the declared source, if any.
    ///
    /// # Errors
    ///
    /// Any error from [`builder`](Self::builder), the build itself, or loading
    /// the source.
    pub fn compile(&self, fallback_identifier: &str, base_dir: Option<&Path>) -> Result<Vocabulary> {
        let mut vocabulary = self.builder(fallback_identifier)?.build()?;
        if let Some(source) = self.source(vocabulary.identifier(), base_dir)? {
            let graph = source.load()?;
            vocabulary.merge_source(&graph);
        }
        Ok(vocabulary)
    }

    fn prefix_table(&self) -> Result<PrefixTable> {
        let mut table = PrefixTable::default();
        for (prefix, namespace) in &self.prefixes {
            table.insert(prefix, Iri::new(namespace.as_str())?)?;
        }
        Ok(table)
    }

    fn catalog(&self) -> Catalog {
        let mut catalog = Catalog::new();
        for (language, messages) in &self.translations {
            for (source, translated) in messages {
                catalog.insert(language.as_str(), source.as_str(), translated.as_str());
            }
        }
        catalog
    }
}

/// Reads `path` and compiles it. The identifier defaults to the file stem and
/// a relative `[source]` location resolves against the file's directory.
///
/// # Errors
///
/// Returns [`Error::Io`](crate::Error::Io) if the file cannot be read, and
/// anything [`Declaration::compile`] returns.
pub fn compile_file(path: &Path) -> Result<Vocabulary> {
    let text = std::fs::read_to_string(path)?;
    let declaration = Declaration::from_toml_str(&text)?;
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    tracing::debug!(path = %path.display(), terms = declaration.terms.len(), "compiling declaration file");
    declaration.compile(stem, path.parent())
}

fn option_value(key: &str, value: &toml::Value) -> Result<Option<OptionValue>> {
    let value = match (key, value) {
        ("scheme", toml::Value::Table(table)) => {
            OptionValue::Scheme(ConceptScheme::from_attributes(attributes(key, table)?))
        }
        ("collections", toml::Value::Array(items)) => {
            let mut collections = Vec::with_capacity(items.len());
            for item in items {
                let table = item
                    .as_table()
                    .ok_or_else(|| invalid(key, "an array of tables"))?;
                collections.push(collection(key, table)?);
            }
            OptionValue::Collections(collections)
        }
        (_, toml::Value::String(s)) => OptionValue::Str(s.clone()),
        (_, toml::Value::Integer(i)) => OptionValue::Int(*i),
        (_, toml::Value::Boolean(b)) => OptionValue::Bool(*b),
        _ if key.starts_with('_') => return Ok(None),
        _ if !OPTION_KEYS.contains(&key) => {
            return Err(ConfigError::UnknownOption(key.to_owned()).into())
        }
        _ => return Err(invalid(key, "a string").into()),
    };
    Ok(Some(value))
}

/// Builds one term from its table.
fn term(name: &str, table: &toml::Table) -> Result<Term> {
    match table.get("kind") {
        None => concept(name, table).map(Term::from),
        Some(toml::Value::String(kind)) if kind == "concept" => concept(name, table).map(Term::from),
        Some(toml::Value::String(kind)) if kind == "collection" => {
            collection(name, table).map(Term::from)
        }
        Some(_) => Err(invalid(name, "`kind` to be \"concept\" or \"collection\"").into()),
    }
}

fn concept(name: &str, table: &toml::Table) -> Result<Concept> {
    let concept = Concept::from_attributes(attributes(name, table)?);
    Ok(match explicit_name(name, table)? {
        Some(identifier) => concept.named(identifier),
        None => concept,
    })
}

fn collection(name: &str, table: &toml::Table) -> Result<Collection> {
    let ordered = match table.get("ordered") {
        None => false,
        Some(toml::Value::Boolean(b)) => *b,
        Some(_) => return Err(invalid(name, "`ordered` to be a boolean").into()),
    };
    let collection = Collection::from_attributes(attributes(name, table)?).ordered(ordered);
    Ok(match explicit_name(name, table)? {
        Some(identifier) => collection.named(identifier),
        None => collection,
    })
}

/// The reserved `name` key: an absolute IRI is used verbatim, anything else
/// is a local name.
fn explicit_name(name: &str, table: &toml::Table) -> Result<Option<Identifier>> {
    let Some(explicit) = table.get("name") else {
        return Ok(None);
    };
    let explicit = explicit
        .as_str()
        .ok_or_else(|| invalid(name, "`name` to be a string"))?;
    Ok(Some(if is_absolute(explicit) {
        Identifier::Iri(Iri::new(explicit)?)
    } else {
        Identifier::Name(explicit.to_owned())
    }))
}

/// Predicate entries of a term table, in file order.
fn attributes(name: &str, table: &toml::Table) -> Result<Attributes> {
    let mut attrs = Attributes::new();
    for (key, value) in table {
        if RESERVED_TERM_KEYS.contains(&key.as_str()) {
            continue;
        }
        attrs.insert(key.as_str(), value_of(name, value)?);
    }
    Ok(attrs)
}

fn value_of(name: &str, value: &toml::Value) -> Result<Value> {
    match value {
        toml::Value::String(text) => Ok(Value::Text(text.clone())),
        toml::Value::Table(table) => match (table.len(), table.get("ref")) {
            (1, Some(toml::Value::String(target))) => Ok(Value::Ref(target.as_str().into())),
            _ => Err(invalid(name, "a string, { ref = \"...\" } or an array").into()),
        },
        toml::Value::Array(items) => items
            .iter()
            .map(|item| value_of(name, item))
            .collect::<Result<Vec<_>>>()
            .map(Value::List),
        _ => Err(invalid(name, "a string, { ref = \"...\" } or an array").into()),
    }
}

fn invalid(key: &str, expected: &'static str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_owned(),
        expected,
    }
}
