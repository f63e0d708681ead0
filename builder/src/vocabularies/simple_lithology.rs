//! `simple-lithology` vocabulary: a small rock-type hierarchy.
//!
//! Terms follow the CGI Simple Lithology scheme, trimmed to the top levels of
//! the igneous, sedimentary and metamorphic branches.

use crate::error::Result;
use crate::options::Separator;
use crate::term::{reference, Collection, Concept, ConceptScheme};
use crate::vocabulary::Vocabulary;

/// Base URL every bundled vocabulary is published under.
pub(super) const BASE_URL: &str = "https://w3id.org/skos-builder/vocab/";

/// `(local name, label, definition, broader)`.
const TERMS: &[(&str, &str, &str, Option<&str>)] = &[
    (
        "rock",
        "Rock",
        "Consolidated aggregation of one or more earth materials.",
        None,
    ),
    (
        "igneous_rock",
        "Igneous rock",
        "Rock formed by the solidification of molten material.",
        Some("rock"),
    ),
    (
        "granite",
        "Granite",
        "Phaneritic crystalline rock rich in quartz and alkali feldspar.",
        Some("igneous_rock"),
    ),
    (
        "basalt",
        "Basalt",
        "Fine grained mafic volcanic rock.",
        Some("igneous_rock"),
    ),
    (
        "sedimentary_rock",
        "Sedimentary rock",
        "Rock formed by the accumulation and consolidation of sediment.",
        Some("rock"),
    ),
    (
        "sandstone",
        "Sandstone",
        "Clastic sedimentary rock composed mostly of sand-sized grains.",
        Some("sedimentary_rock"),
    ),
    (
        "metamorphic_rock",
        "Metamorphic rock",
        "Rock transformed by heat, pressure or chemically active fluids.",
        Some("rock"),
    ),
];

/// Builds the vocabulary.
///
/// # Errors
///
/// Returns an error if the static declaration fails to compile.
pub fn vocabulary() -> Result<Vocabulary> {
    let mut builder = Vocabulary::builder("SimpleLithology")
        .prefix("lith")
        .base_url(BASE_URL)
        .namespace_separator(Separator::Slash)
        .scheme(
            ConceptScheme::new()
                .with("skos:prefLabel", "Simple Lithology")
                .with("skos:definition", "A simplified classification of rock types.")
                .with("skos:hasTopConcept", reference("rock")),
        );

    for (name, label, definition, broader) in TERMS {
        let mut concept = Concept::new()
            .with("skos:prefLabel", *label)
            .with("skos:definition", *definition)
            .with("skos:inScheme", reference(BASE_URL.to_owned() + "simple-lithology"));
        if let Some(parent) = broader {
            concept = concept.with("skos:broader", reference(*parent));
        }
        builder = builder.term(*name, concept);
    }

    builder
        .term(
            "igneous_rocks",
            Collection::new()
                .with("skos:prefLabel", "Igneous rocks")
                .with("skos:member", vec![reference("granite"), reference("basalt")]),
        )
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{iris, Iri, Object, Subject};

    #[test]
    fn every_term_is_in_the_graph() {
        let vocab = vocabulary().unwrap();
        for (name, ..) in TERMS {
            let subject = Subject::Iri(vocab.term_iri(name).unwrap());
            assert!(vocab.graph().about(&subject).count() >= 4, "missing {name}");
        }
    }

    #[test]
    fn broader_links_resolve_in_namespace() {
        let vocab = vocabulary().unwrap();
        let granite = Subject::Iri(vocab.term_iri("granite").unwrap());
        assert!(vocab.graph().contains(
            &granite,
            &Iri::new_unchecked(iris::SKOS_BROADER),
            &Object::Iri(vocab.term_iri("igneous_rock").unwrap()),
        ));
    }
}
