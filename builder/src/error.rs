//! Error taxonomy for vocabulary compilation and source loading.

use std::path::PathBuf;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed underlying cause carried by [`Error::RemoteSource`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised while validating a vocabulary's configuration block.
///
/// All of these are fatal and are reported before any graph is created.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The configuration block named a key that is not a vocabulary option.
    #[error("invalid vocabulary option: {0}")]
    UnknownOption(String),
    /// `namespace_separator` was something other than `#` or `/`.
    #[error("invalid namespace separator {0:?}: expected \"#\" or \"/\"")]
    InvalidSeparator(String),
    /// An option was given a value of the wrong shape.
    #[error("invalid value for option `{key}`: expected {expected}")]
    InvalidValue {
        /// Option key.
        key: String,
        /// Description of the accepted shape.
        expected: &'static str,
    },
    /// A namespace prefix contains characters not allowed in a CURIE prefix.
    #[error("invalid namespace prefix {0:?}")]
    InvalidPrefix(String),
    /// A prefix was registered twice with different namespaces.
    #[error("prefix `{prefix}` is already bound to <{existing}>, cannot rebind to <{requested}>")]
    ConflictingPrefix {
        /// The prefix being registered.
        prefix: String,
        /// Namespace it is already bound to.
        existing: String,
        /// Namespace the caller tried to bind.
        requested: String,
    },
    /// `base_url` is empty or not an absolute URI.
    #[error("base_url must be an absolute URI, got {0:?}")]
    InvalidBaseUrl(String),
}

/// Every error surfaced by this crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A CURIE referenced a prefix that is not in the prefix table.
    #[error("unknown namespace prefix `{0}`")]
    UnknownPrefix(String),

    /// A CURIE is missing its prefix or its local name.
    #[error("malformed CURIE {0:?}")]
    MalformedCurie(String),

    /// A string could not be used as an IRI.
    #[error("invalid IRI {0:?}")]
    InvalidIri(String),

    /// A bare local name was resolved without a default namespace.
    #[error("cannot resolve local name {0:?} without a default namespace")]
    UnresolvedName(String),

    /// Two declared terms resolved to the same subject IRI.
    #[error("duplicate term `{name}` resolves to already-declared <{iri}>")]
    DuplicateTerm {
        /// Local name of the second declaration.
        name: String,
        /// Colliding subject IRI.
        iri: String,
    },

    /// A local vocabulary source does not exist on disk.
    #[error("{name} - no source file exists at {}", path.display())]
    LocalSourceNotFound {
        /// Name of the vocabulary that declared the source.
        name: String,
        /// Resolved path that was checked.
        path: PathBuf,
    },

    /// Fetching or parsing a remote source failed.
    #[error("{name} remote source URL <{url}> is not valid")]
    RemoteSource {
        /// Name of the vocabulary that declared the source.
        name: String,
        /// The URL as given.
        url: String,
        /// Underlying transport or parse failure.
        #[source]
        source: BoxError,
    },

    /// An RDF document could not be parsed.
    #[error("failed to parse {location}: {message}")]
    Parse {
        /// File path or URL of the document.
        location: String,
        /// Parser message.
        message: String,
    },

    /// A format name or file extension was not recognised, or the format
    /// cannot be used in the requested direction.
    #[error("unsupported RDF format {0:?}")]
    UnsupportedFormat(String),

    /// Filesystem failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization failure.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Declaration file could not be parsed.
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Returns the configuration error if this is one.
    #[must_use]
    pub fn as_config(&self) -> Option<&ConfigError> {
        match self {
            Error::Config(e) => Some(e),
            _ => None,
        }
    }
}
