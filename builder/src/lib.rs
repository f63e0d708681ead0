//! SKOS vocabularies declared as typed Rust data.
//!
//! The `skos-builder` crate compiles a vocabulary declaration (an identifier,
//! a configuration block and an ordered list of named terms) into an RDF
//! graph, expanding text values into one language-tagged literal per
//! available translation. Graphs serialize to Turtle, N-Triples and JSON-LD,
//! and can be merged with existing vocabularies loaded from disk or the
//! network.
//!
//! # Entry Point
//!
//! ```
//! use skos_builder::{reference, Concept, Vocabulary};
//!
//! let vocab = Vocabulary::builder("Rocks")
//!     .prefix("rocks")
//!     .base_url("https://example.org/")
//!     .term("igneous", Concept::new().with("skos:prefLabel", "Igneous rock"))
//!     .term(
//!         "granite",
//!         Concept::new()
//!             .with("skos:prefLabel", "Granite")
//!             .with("skos:broader", reference("igneous")),
//!     )
//!     .build()
//!     .unwrap();
//! assert_eq!(vocab.namespace().as_str(), "https://example.org/rocks#");
//! ```
//!
//! # Serialization
//!
//! ```
//! # use skos_builder::{Concept, Format, Vocabulary};
//! # let vocab = Vocabulary::builder("Rocks")
//! #     .base_url("https://example.org/")
//! #     .term("granite", Concept::new())
//! #     .build()
//! #     .unwrap();
//! let turtle = vocab.serialize(Format::Turtle).unwrap();
//! assert!(turtle.contains("a skos:Concept"));
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod decl;
pub mod error;
pub mod export;
pub mod graph;
pub mod model;
pub mod options;
pub mod prefix;
pub mod resolver;
pub mod serializer;
pub mod source;
pub mod term;
pub mod translate;
pub mod vocabularies;
pub mod vocabulary;

pub use error::{ConfigError, Error, Result};
pub use graph::{Graph, Triple};
pub use model::{BlankNode, Iri, Literal, Object, Subject};
pub use options::{OptionValue, Options, Separator};
pub use prefix::PrefixTable;
pub use resolver::{Identifier, Resolver};
pub use serializer::Format;
pub use term::{reference, Collection, Concept, ConceptScheme, SkosTerm, Term, Value};
pub use translate::{Catalog, EnglishOnly, Translations, Translator};
pub use vocabulary::{slugify, Vocabulary, VocabularyBuilder};
