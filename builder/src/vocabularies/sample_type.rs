//! `sample-type` vocabulary: kinds of physical samples.

use crate::error::Result;
use crate::term::{reference, Concept, ConceptScheme, Value};
use crate::translate::Catalog;
use crate::vocabulary::Vocabulary;

use super::simple_lithology::BASE_URL;

/// `(local name, label)`.
const TERMS: &[(&str, &str)] = &[
    ("core", "Core"),
    ("grab", "Grab"),
    ("cuttings", "Cuttings"),
    ("thin section", "Thin section"),
];

fn catalog() -> Catalog {
    Catalog::new()
        .with("fr", "Sample type", "Type d'échantillon")
        .with("fr", "Core", "Carotte")
        .with("fr", "Cuttings", "Déblais")
        .with("fr", "Thin section", "Lame mince")
        .with("de", "Sample type", "Probenart")
        .with("de", "Core", "Bohrkern")
}

/// Builds the vocabulary.
///
/// # Errors
///
/// Returns an error if the static declaration fails to compile.
pub fn vocabulary() -> Result<Vocabulary> {
    Vocabulary::builder("SampleType")
        .prefix("st")
        .base_url(BASE_URL)
        .translator(catalog())
        .scheme(ConceptScheme::from_attributes([("skos:prefLabel", "Sample type")]))
        .terms(TERMS.iter().map(|(name, label)| {
            (
                *name,
                Concept::from_attributes([
                    ("skos:prefLabel", Value::from(*label)),
                    ("skos:inScheme", reference(BASE_URL.to_owned() + "sample-type")),
                ]),
            )
        }))
        .build()
}
