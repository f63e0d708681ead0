//! Vocabulary configuration block.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::prefix::is_valid_prefix;
use crate::resolver::is_absolute;
use crate::term::{Collection, ConceptScheme};

/// Every key the configuration block accepts.
pub const OPTION_KEYS: &[&str] = &[
    "name",
    "prefix",
    "base_url",
    "namespace_separator",
    "scheme",
    "collections",
];

/// Character between the vocabulary IRI and a term's local name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Separator {
    /// `#`
    #[default]
    #[serde(rename = "#")]
    Hash,
    /// `/`
    #[serde(rename = "/")]
    Slash,
}

impl Separator {
    /// The separator as a string.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Separator::Hash => "#",
            Separator::Slash => "/",
        }
    }
}

impl fmt::Display for Separator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Separator {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "#" => Ok(Separator::Hash),
            "/" => Ok(Separator::Slash),
            other => Err(ConfigError::InvalidSeparator(other.to_owned())),
        }
    }
}

/// A loosely typed option value, as supplied through
/// [`Options::set`] or a declaration file.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    /// Text.
    Str(String),
    /// Integer.
    Int(i64),
    /// Boolean.
    Bool(bool),
    /// A concept scheme term.
    Scheme(ConceptScheme),
    /// Collection terms.
    Collections(Vec<Collection>),
}

impl From<&str> for OptionValue {
    fn from(s: &str) -> Self {
        OptionValue::Str(s.to_owned())
    }
}

impl From<String> for OptionValue {
    fn from(s: String) -> Self {
        OptionValue::Str(s)
    }
}

impl From<i64> for OptionValue {
    fn from(i: i64) -> Self {
        OptionValue::Int(i)
    }
}

impl From<bool> for OptionValue {
    fn from(b: bool) -> Self {
        OptionValue::Bool(b)
    }
}

impl From<ConceptScheme> for OptionValue {
    fn from(s: ConceptScheme) -> Self {
        OptionValue::Scheme(s)
    }
}

impl From<Vec<Collection>> for OptionValue {
    fn from(c: Vec<Collection>) -> Self {
        OptionValue::Collections(c)
    }
}

/// Configuration of one vocabulary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options {
    /// URL-safe vocabulary name; derived from the identifier when `None` or
    /// empty.
    pub name: Option<String>,
    /// Prefix bound to the vocabulary namespace.
    pub prefix: String,
    /// Root IRI the vocabulary lives under.
    pub base_url: String,
    /// Separator between the vocabulary IRI and term local names.
    pub namespace_separator: Separator,
    /// Scheme describing the vocabulary as a whole.
    pub scheme: ConceptScheme,
    /// Auxiliary collections. Stored only.
    pub collections: Vec<Collection>,
}

impl Options {
    /// Sets one option by key. Keys starting with `_` are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownOption`] for any other unrecognised key,
    /// [`ConfigError::InvalidSeparator`] for a bad separator, and
    /// [`ConfigError::InvalidValue`] when the value has the wrong shape.
    pub fn set(&mut self, key: &str, value: OptionValue) -> Result<(), ConfigError> {
        if key.starts_with('_') {
            return Ok(());
        }
        match (key, value) {
            ("name", OptionValue::Str(s)) => self.name = Some(s).filter(|n| !n.is_empty()),
            ("prefix", OptionValue::Str(s)) => self.prefix = s,
            ("base_url", OptionValue::Str(s)) => self.base_url = s,
            ("namespace_separator", OptionValue::Str(s)) => self.namespace_separator = s.parse()?,
            ("scheme", OptionValue::Scheme(s)) => self.scheme = s,
            ("collections", OptionValue::Collections(c)) => self.collections = c,
            (key, value) => return Err(wrong_shape(key, &value)),
        }
        Ok(())
    }

    /// Checks the invariants that do not depend on the other options.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if `base_url` is not absolute,
    /// [`ConfigError::InvalidPrefix`] for a malformed prefix, and
    /// [`ConfigError::InvalidValue`] for a name that is not URL-safe.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_absolute(&self.base_url) {
            return Err(ConfigError::InvalidBaseUrl(self.base_url.clone()));
        }
        if !is_valid_prefix(&self.prefix) {
            return Err(ConfigError::InvalidPrefix(self.prefix.clone()));
        }
        if let Some(name) = self.name.as_deref().filter(|n| !n.is_empty()) {
            if !is_url_safe(name) {
                return Err(ConfigError::InvalidValue {
                    key: "name".to_owned(),
                    expected: "a non-empty URL-safe name",
                });
            }
        }
        Ok(())
    }
}

fn wrong_shape(key: &str, value: &OptionValue) -> ConfigError {
    if !OPTION_KEYS.contains(&key) {
        return ConfigError::UnknownOption(key.to_owned());
    }
    let expected = match key {
        "scheme" => "a ConceptScheme",
        "collections" => "a list of Collections",
        "namespace_separator" => "\"#\" or \"/\"",
        _ => "a string",
    };
    tracing::debug!(key, ?value, "option value has the wrong shape");
    ConfigError::InvalidValue {
        key: key.to_owned(),
        expected,
    }
}

fn is_url_safe(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '~'))
}
