//! N-Triples serializer.
//!
//! One triple per line with absolute IRIs, in graph insertion order. Suitable
//! for streaming, bulk loading and diff-friendly storage.

use crate::graph::Graph;
use crate::model::{iris, Literal, Object, Subject};

use super::escape_literal;

/// Serializes `graph` to an N-Triples string.
#[must_use]
pub fn to_ntriples(graph: &Graph) -> String {
    let mut out = String::with_capacity(128 * graph.len());
    for t in graph {
        let subject = match &t.subject {
            Subject::Iri(s) => iri(s.as_str()),
            Subject::Blank(node) => node.to_string(),
        };
        let object = match &t.object {
            Object::Iri(o) => iri(o.as_str()),
            Object::Blank(node) => node.to_string(),
            Object::Literal(l) => lit(l),
        };
        triple(&mut out, &subject, t.predicate.as_str(), &object);
    }
    out
}

fn triple(out: &mut String, subj: &str, pred: &str, obj: &str) {
    out.push_str(subj);
    out.push_str(" <");
    out.push_str(pred);
    out.push_str("> ");
    out.push_str(obj);
    out.push_str(" .\n");
}

fn iri(s: &str) -> String {
    format!("<{}>", s)
}

fn lit(l: &Literal) -> String {
    let escaped = escape_literal(l.lexical());
    match (l.language(), l.datatype()) {
        (Some(lang), _) => format!("\"{}\"@{}", escaped, lang),
        (None, Some(dt)) if dt.as_str() != iris::XSD_STRING => {
            format!("\"{}\"^^<{}>", escaped, dt)
        }
        _ => format!("\"{}\"", escaped),
    }
}
