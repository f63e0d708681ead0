//! JSON-LD 1.1 serializer.
//!
//! Produces a single document with an `@context` holding the prefixes the
//! graph actually uses and a flat `@graph` array with one node object per
//! subject, in order of first appearance.

use serde_json::{json, Map, Value};

use crate::graph::Graph;
use crate::model::{iris, Iri, Literal, Object, Subject};

use super::Abbreviator;

/// Serializes `graph` to a JSON-LD `Value`.
///
/// The returned value can be pretty-printed with [`serde_json::to_string_pretty`].
#[must_use]
pub fn to_json_ld(graph: &Graph) -> Value {
    let abbr = Abbreviator::new(graph).without_empty_prefix();
    let context = build_context(graph, &abbr);
    let nodes: Vec<Value> = graph
        .subjects()
        .into_iter()
        .map(|subject| node_to_json(graph, subject, &abbr))
        .collect();
    json!({
        "@context": context,
        "@graph": nodes
    })
}

fn build_context(graph: &Graph, abbr: &Abbreviator) -> Value {
    let mut ctx = Map::new();
    for (prefix, namespace) in abbr.used(graph) {
        ctx.insert(prefix.to_owned(), json!(namespace.as_str()));
    }
    Value::Object(ctx)
}

fn node_to_json(graph: &Graph, subject: &Subject, abbr: &Abbreviator) -> Value {
    let mut map = Map::new();
    map.insert("@id".to_owned(), json!(subject_id(subject, abbr)));

    for t in graph.about(subject) {
        if t.predicate.as_str() == iris::RDF_TYPE {
            if let Object::Iri(ty) = &t.object {
                push_value(&mut map, "@type".to_owned(), json!(shorten(ty, abbr)));
                continue;
            }
        }
        let value = match &t.object {
            Object::Iri(iri) => json!({ "@id": shorten(iri, abbr) }),
            Object::Blank(node) => json!({ "@id": node.to_string() }),
            Object::Literal(lit) => literal_to_json(lit, abbr),
        };
        push_value(&mut map, shorten(&t.predicate, abbr), value);
    }

    Value::Object(map)
}

/// Inserts `value` under `key`. When the key is already present the entry
/// is promoted to an array rather than overwritten.
fn push_value(map: &mut Map<String, Value>, key: String, value: Value) {
    if let Some(existing) = map.get_mut(&key) {
        let prev = std::mem::replace(existing, Value::Null);
        *existing = match prev {
            Value::Array(mut arr) => {
                arr.push(value);
                Value::Array(arr)
            }
            other => json!([other, value]),
        };
    } else {
        map.insert(key, value);
    }
}

fn literal_to_json(lit: &Literal, abbr: &Abbreviator) -> Value {
    match (lit.language(), lit.datatype()) {
        (Some(lang), _) => json!({ "@value": lit.lexical(), "@language": lang }),
        (None, Some(dt)) if dt.as_str() != iris::XSD_STRING => {
            json!({ "@value": lit.lexical(), "@type": shorten(dt, abbr) })
        }
        _ => json!(lit.lexical()),
    }
}

fn subject_id(subject: &Subject, abbr: &Abbreviator) -> String {
    match subject {
        Subject::Iri(iri) => shorten(iri, abbr),
        Subject::Blank(node) => node.to_string(),
    }
}

fn shorten(iri: &Iri, abbr: &Abbreviator) -> String {
    abbr.compact(iri).unwrap_or_else(|| iri.as_str().to_owned())
}
