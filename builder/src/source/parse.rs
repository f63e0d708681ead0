//! Turtle / N-Triples parsing into a [`Graph`].
//!
//! Parsing is delegated to `sophia_turtle`; each parsed triple is converted to
//! this crate's term model. Blank node labels are mapped to fresh nodes of the
//! target graph, so the same label within one document is one node.

use std::collections::HashMap;

use sophia_api::source::{StreamError, TripleSource};
use sophia_api::term::{Term, TermKind};
use sophia_api::triple::Triple;
use sophia_turtle::parser::{nt, turtle};

use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::model::{iris, BlankNode, Iri, Literal, Object, Subject};
use crate::serializer::Format;

/// Parses `text` as `format`. `location` names the document in errors.
///
/// # Errors
///
/// Returns [`Error::Parse`] on a syntax error or an unsupported term (a
/// variable or quoted triple), and [`Error::UnsupportedFormat`] for JSON-LD,
/// which can be written but not read.
pub fn parse(text: &str, format: Format, location: &str) -> Result<Graph> {
    let mut sink = Sink::new(location);
    let outcome = match format {
        Format::Turtle => turtle::parse_str(text).try_for_each_triple(|t| sink.push(&t)),
        Format::NTriples => nt::parse_str(text).try_for_each_triple(|t| sink.push(&t)),
        Format::JsonLd => return Err(Error::UnsupportedFormat(format.to_string())),
    };
    match outcome {
        Ok(()) => {
            tracing::debug!(location, triples = sink.graph.len(), "parsed source document");
            Ok(sink.graph)
        }
        Err(StreamError::SourceError(e)) => Err(Error::Parse {
            location: location.to_owned(),
            message: e.to_string(),
        }),
        Err(StreamError::SinkError(e)) => Err(e),
    }
}

struct Sink<'l> {
    location: &'l str,
    graph: Graph,
    blanks: HashMap<String, BlankNode>,
}

impl<'l> Sink<'l> {
    fn new(location: &'l str) -> Self {
        Self {
            location,
            graph: Graph::new(),
            blanks: HashMap::new(),
        }
    }

    fn push<T: Triple>(&mut self, t: &T) -> Result<()> {
        let subject = match self.node(t.s())? {
            Object::Iri(iri) => Subject::Iri(iri),
            Object::Blank(node) => Subject::Blank(node),
            Object::Literal(_) => return Err(self.unsupported("literal subject")),
        };
        let predicate = match self.node(t.p())? {
            Object::Iri(iri) => iri,
            _ => return Err(self.unsupported("non-IRI predicate")),
        };
        let object = self.node(t.o())?;
        self.graph.insert(subject, predicate, object);
        Ok(())
    }

    fn node<U: Term>(&mut self, term: U) -> Result<Object> {
        match term.kind() {
            TermKind::Iri => {
                let iri = term.iri().ok_or_else(|| self.unsupported("IRI"))?;
                Ok(Object::Iri(Iri::new(iri.as_str())?))
            }
            TermKind::BlankNode => {
                let label = term
                    .bnode_id()
                    .ok_or_else(|| self.unsupported("blank node"))?;
                Ok(Object::Blank(self.blank(label.as_str())))
            }
            TermKind::Literal => {
                let lexical = term
                    .lexical_form()
                    .ok_or_else(|| self.unsupported("literal"))?;
                let literal = if let Some(tag) = term.language_tag() {
                    Literal::with_language(&*lexical, tag.as_str())
                } else {
                    match term.datatype() {
                        Some(dt) if dt.as_str() != iris::XSD_STRING => {
                            Literal::typed(&*lexical, Iri::new(dt.as_str())?)
                        }
                        _ => Literal::plain(&*lexical),
                    }
                };
                Ok(Object::Literal(literal))
            }
            TermKind::Triple => Err(self.unsupported("quoted triple")),
            TermKind::Variable => Err(self.unsupported("variable")),
        }
    }

    fn blank(&mut self, label: &str) -> BlankNode {
        if let Some(node) = self.blanks.get(label) {
            return *node;
        }
        let node = self.graph.fresh_blank_node();
        self.blanks.insert(label.to_owned(), node);
        node
    }

    fn unsupported(&self, what: &str) -> Error {
        Error::Parse {
            location: self.location.to_owned(),
            message: format!("unsupported term: {what}"),
        }
    }
}
