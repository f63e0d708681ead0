//! In-memory RDF graph.
//!
//! A [`Graph`] is an insertion-ordered, append-only set of triples plus the
//! prefix bindings used when it is serialized. Blank nodes are minted by the
//! graph itself, so identifiers never collide within one graph.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::error::Result;
use crate::model::{BlankNode, Iri, Object, Subject};
use crate::serializer::Format;

/// One `(subject, predicate, object)` statement.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Triple {
    /// Subject.
    pub subject: Subject,
    /// Predicate.
    pub predicate: Iri,
    /// Object.
    pub object: Object,
}

/// Insertion-ordered set of triples with prefix bindings.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    triples: Vec<Triple>,
    seen: HashSet<Triple>,
    prefixes: Vec<(String, Iri)>,
    next_blank: u64,
}

impl Graph {
    /// An empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a triple. Returns `false` if the identical triple was already
    /// present, in which case the graph is unchanged.
    pub fn insert(
        &mut self,
        subject: impl Into<Subject>,
        predicate: Iri,
        object: impl Into<Object>,
    ) -> bool {
        let triple = Triple {
            subject: subject.into(),
            predicate,
            object: object.into(),
        };
        if self.seen.contains(&triple) {
            return false;
        }
        self.seen.insert(triple.clone());
        self.triples.push(triple);
        true
    }

    /// Mints a blank node that is unused in this graph.
    pub fn fresh_blank_node(&mut self) -> BlankNode {
        let node = BlankNode::from_id(self.next_blank);
        self.next_blank += 1;
        node
    }

    /// Binds `prefix` to `namespace` for serialization, replacing any
    /// previous binding of the same prefix.
    pub fn bind(&mut self, prefix: &str, namespace: Iri) {
        if let Some(entry) = self.prefixes.iter_mut().find(|(p, _)| p == prefix) {
            entry.1 = namespace;
        } else {
            self.prefixes.push((prefix.to_owned(), namespace));
        }
    }

    /// Prefix bindings in the order they were made.
    pub fn prefixes(&self) -> impl Iterator<Item = (&str, &Iri)> {
        self.prefixes.iter().map(|(p, ns)| (p.as_str(), ns))
    }

    /// Triples in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Triple> {
        self.triples.iter()
    }

    /// Number of triples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    /// Whether the graph holds no triples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Whether the exact triple is present.
    #[must_use]
    pub fn contains(&self, subject: &Subject, predicate: &Iri, object: &Object) -> bool {
        self.seen.contains(&Triple {
            subject: subject.clone(),
            predicate: predicate.clone(),
            object: object.clone(),
        })
    }

    /// Triples whose subject is `subject`, in insertion order.
    pub fn about<'a>(&'a self, subject: &'a Subject) -> impl Iterator<Item = &'a Triple> + 'a {
        self.triples.iter().filter(move |t| &t.subject == subject)
    }

    /// Objects of `(subject, predicate, _)`, in insertion order.
    pub fn objects<'a>(
        &'a self,
        subject: &'a Subject,
        predicate: &'a Iri,
    ) -> impl Iterator<Item = &'a Object> + 'a {
        self.about(subject)
            .filter(move |t| &t.predicate == predicate)
            .map(|t| &t.object)
    }

    /// Distinct subjects in order of first appearance.
    #[must_use]
    pub fn subjects(&self) -> Vec<&Subject> {
        let mut seen = HashSet::new();
        self.triples
            .iter()
            .map(|t| &t.subject)
            .filter(|s| seen.insert(*s))
            .collect()
    }

    /// Appends every triple of `other`. Blank nodes from `other` are
    /// relabelled to fresh nodes of this graph. Prefixes from `other` are
    /// adopted unless the prefix is already bound here.
    pub fn merge(&mut self, other: &Graph) {
        let mut relabel: HashMap<BlankNode, BlankNode> = HashMap::new();
        for triple in &other.triples {
            let subject = match &triple.subject {
                Subject::Blank(node) => Subject::Blank(self.relabel(&mut relabel, *node)),
                named => named.clone(),
            };
            let object = match &triple.object {
                Object::Blank(node) => Object::Blank(self.relabel(&mut relabel, *node)),
                other => other.clone(),
            };
            self.insert(subject, triple.predicate.clone(), object);
        }
        for (prefix, namespace) in &other.prefixes {
            if !self.prefixes.iter().any(|(p, _)| p == prefix) {
                self.prefixes.push((prefix.clone(), namespace.clone()));
            }
        }
    }

    fn relabel(&mut self, map: &mut HashMap<BlankNode, BlankNode>, node: BlankNode) -> BlankNode {
        if let Some(mapped) = map.get(&node) {
            return *mapped;
        }
        let fresh = self.fresh_blank_node();
        map.insert(node, fresh);
        fresh
    }

    /// Serializes the graph to text in `format`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`](crate::Error::Json) if JSON-LD rendering fails.
    pub fn serialize(&self, format: Format) -> Result<String> {
        crate::serializer::serialize(self, format)
    }

    /// Serializes the graph and writes it to `destination`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the file write fails.
    pub fn write(&self, format: Format, destination: &Path) -> Result<()> {
        let text = self.serialize(format)?;
        std::fs::write(destination, text)?;
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Graph {
    type Item = &'a Triple;
    type IntoIter = std::slice::Iter<'a, Triple>;

    fn into_iter(self) -> Self::IntoIter {
        self.triples.iter()
    }
}

impl PartialEq for Graph {
    /// Graphs are equal when they hold the same triples in the same order.
    fn eq(&self, other: &Self) -> bool {
        self.triples == other.triples
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Literal;

    fn iri(s: &str) -> Iri {
        Iri::new_unchecked(s)
    }

    #[test]
    fn duplicate_triples_are_ignored() {
        let mut g = Graph::new();
        assert!(g.insert(iri("http://e.org/a"), iri("http://e.org/p"), iri("http://e.org/b")));
        assert!(!g.insert(iri("http://e.org/a"), iri("http://e.org/p"), iri("http://e.org/b")));
        assert_eq!(g.len(), 1);
    }

    #[test]
    fn insertion_order_is_preserved() {
        let mut g = Graph::new();
        g.insert(iri("http://e.org/b"), iri("http://e.org/p"), Literal::plain("1"));
        g.insert(iri("http://e.org/a"), iri("http://e.org/p"), Literal::plain("2"));
        let subjects: Vec<String> = g.subjects().iter().map(|s| s.to_string()).collect();
        assert_eq!(subjects, ["<http://e.org/b>", "<http://e.org/a>"]);
    }

    #[test]
    fn fresh_blank_nodes_are_distinct() {
        let mut g = Graph::new();
        let a = g.fresh_blank_node();
        let b = g.fresh_blank_node();
        assert_ne!(a, b);
    }

    #[test]
    fn merge_relabels_blank_nodes() {
        let mut a = Graph::new();
        let na = a.fresh_blank_node();
        a.insert(na, iri("http://e.org/p"), Literal::plain("a"));

        let mut b = Graph::new();
        let nb = b.fresh_blank_node();
        b.insert(nb, iri("http://e.org/p"), Literal::plain("b"));
        b.insert(nb, iri("http://e.org/q"), Literal::plain("b2"));
        b.bind("ex", iri("http://e.org/"));

        a.merge(&b);
        assert_eq!(a.len(), 3);
        assert_eq!(a.subjects().len(), 2);
        assert!(a.prefixes().any(|(p, _)| p == "ex"));
    }

    #[test]
    fn bind_replaces_existing_prefix() {
        let mut g = Graph::new();
        g.bind("ex", iri("http://e.org/1/"));
        g.bind("ex", iri("http://e.org/2/"));
        let bound: Vec<_> = g.prefixes().collect();
        assert_eq!(bound.len(), 1);
        assert_eq!(bound[0].1.as_str(), "http://e.org/2/");
    }
}
