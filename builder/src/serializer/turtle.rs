//! Turtle 1.1 serializer.
//!
//! Produces a Turtle document with `@prefix` declarations for every prefix
//! actually used, followed by one block per subject in order of first
//! appearance. Predicates keep their insertion order; repeated predicates are
//! written once with comma-separated objects.

use crate::graph::{Graph, Triple};
use crate::model::{iris, Iri, Literal, Object, Subject};

use super::{escape_literal, Abbreviator};

/// Serializes `graph` to a Turtle string.
#[must_use]
pub fn to_turtle(graph: &Graph) -> String {
    let abbr = Abbreviator::new(graph);
    let mut out = String::with_capacity(64 * graph.len() + 256);

    // Prefix declarations
    let used = abbr.used(graph);
    for (prefix, namespace) in &used {
        out.push_str(&format!("@prefix {}: <{}> .\n", prefix, namespace));
    }
    if !used.is_empty() {
        out.push('\n');
    }

    for subject in graph.subjects() {
        let triples: Vec<&Triple> = graph.about(subject).collect();
        out.push_str(&subject_to_turtle(subject, &abbr));
        out.push('\n');

        let mut predicates: Vec<&Iri> = Vec::new();
        for t in &triples {
            if !predicates.contains(&&t.predicate) {
                predicates.push(&t.predicate);
            }
        }

        let lines: Vec<String> = predicates
            .iter()
            .map(|predicate| {
                let objects: Vec<String> = triples
                    .iter()
                    .filter(|t| &t.predicate == *predicate)
                    .map(|t| object_to_turtle(&t.object, &abbr))
                    .collect();
                format!(
                    "  {} {}",
                    predicate_to_turtle(predicate, &abbr),
                    objects.join(" , ")
                )
            })
            .collect();
        out.push_str(&lines.join(" ;\n"));
        out.push_str(" .\n\n");
    }

    out
}

fn iri_to_turtle(iri: &Iri, abbr: &Abbreviator) -> String {
    abbr.compact(iri).unwrap_or_else(|| format!("<{}>", iri))
}

fn subject_to_turtle(subject: &Subject, abbr: &Abbreviator) -> String {
    match subject {
        Subject::Iri(iri) => iri_to_turtle(iri, abbr),
        Subject::Blank(node) => node.to_string(),
    }
}

fn predicate_to_turtle(predicate: &Iri, abbr: &Abbreviator) -> String {
    if predicate.as_str() == iris::RDF_TYPE {
        "a".to_owned()
    } else {
        iri_to_turtle(predicate, abbr)
    }
}

fn object_to_turtle(object: &Object, abbr: &Abbreviator) -> String {
    match object {
        Object::Iri(iri) => iri_to_turtle(iri, abbr),
        Object::Blank(node) => node.to_string(),
        Object::Literal(lit) => literal_to_turtle(lit, abbr),
    }
}

fn literal_to_turtle(lit: &Literal, abbr: &Abbreviator) -> String {
    let quoted = format!("\"{}\"", escape_literal(lit.lexical()));
    match (lit.language(), lit.datatype()) {
        (Some(lang), _) => format!("{}@{}", quoted, lang),
        (None, Some(dt)) if dt.as_str() != iris::XSD_STRING => {
            format!("{}^^{}", quoted, iri_to_turtle(dt, abbr))
        }
        _ => quoted,
    }
}
