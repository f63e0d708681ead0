//! Declaration files and bulk export, end to end on a temporary directory.

use std::fs;

use skos_builder::decl::{compile_file, Declaration};
use skos_builder::export::export_all;
use skos_builder::model::iris;
use skos_builder::{vocabularies, ConfigError, Format, Iri, Literal, Object, Subject};

const ROCKS: &str = r#"
[vocabulary]
prefix = "rk"
base_url = "https://example.org/"

[vocabulary.scheme]
"skos:prefLabel" = "Rocks"

[terms.granite]
"skos:prefLabel" = "Granite"
"skos:broader" = { ref = "igneous" }

[terms.igneous]
"skos:prefLabel" = "Igneous rock"

[translations.es]
"Granite" = "Granito"

[source]
location = "extra/legacy.nt"
"#;

const LEGACY: &str =
    "<https://example.org/rocks#obsidian> <http://www.w3.org/2004/02/skos/core#prefLabel> \"Obsidian\"@en .\n";

#[test]
fn declaration_file_compiles_with_local_source() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("extra")).unwrap();
    fs::write(dir.path().join("extra/legacy.nt"), LEGACY).unwrap();
    let decl_path = dir.path().join("Rocks.toml");
    fs::write(&decl_path, ROCKS).unwrap();

    let vocab = compile_file(&decl_path).unwrap();
    assert_eq!(vocab.identifier(), "Rocks");
    assert_eq!(vocab.name(), "rocks");

    let graph = vocab.graph();
    let granite = Subject::Iri(Iri::new_unchecked("https://example.org/rocks#granite"));
    assert!(graph.contains(
        &granite,
        &Iri::new_unchecked(iris::SKOS_PREF_LABEL),
        &Object::Literal(Literal::with_language("Granito", "es")),
    ));
    let obsidian = Subject::Iri(Iri::new_unchecked("https://example.org/rocks#obsidian"));
    assert_eq!(graph.about(&obsidian).count(), 1);
}

#[test]
fn missing_source_file_fails_the_compile() {
    let dir = tempfile::tempdir().unwrap();
    let decl_path = dir.path().join("Rocks.toml");
    fs::write(&decl_path, ROCKS).unwrap();

    let err = compile_file(&decl_path).unwrap_err();
    assert!(err.to_string().starts_with("Rocks - no source file exists at"));
}

#[test]
fn underscore_options_are_ignored_and_unknown_ones_are_not() {
    let ok = "[vocabulary]\nbase_url = \"https://example.org/\"\n_comment = [1, 2]\n";
    assert!(Declaration::from_toml_str(ok).unwrap().compile("Rocks", None).is_ok());

    let bad = "[vocabulary]\nbase_url = \"https://example.org/\"\nunknown_opt = [1]\n";
    let err = Declaration::from_toml_str(bad)
        .unwrap()
        .compile("Rocks", None)
        .unwrap_err();
    assert_eq!(
        err.as_config(),
        Some(&ConfigError::UnknownOption("unknown_opt".to_owned()))
    );
}

#[test]
fn bundled_vocabularies_export_in_every_format() {
    let dir = tempfile::tempdir().unwrap();
    let vocabs = vocabularies::all().unwrap();
    for format in [Format::Turtle, Format::NTriples, Format::JsonLd] {
        let written = export_all(&vocabs, dir.path(), format).unwrap();
        assert_eq!(written.len(), vocabs.len());
        for (path, vocab) in written.iter().zip(&vocabs) {
            let expected = format!("{}.{}", vocab.name(), format.extension());
            assert_eq!(path.file_name().and_then(|n| n.to_str()), Some(expected.as_str()));
            assert!(!fs::read_to_string(path).unwrap().is_empty());
        }
    }
}

#[test]
fn exported_turtle_reloads_to_the_same_graph() {
    let dir = tempfile::tempdir().unwrap();
    let vocabs = vocabularies::all().unwrap();
    let written = export_all(&vocabs, dir.path(), Format::Turtle).unwrap();
    let reloaded = skos_builder::source::LocalSource::new("SimpleLithology", written[0].clone())
        .load()
        .unwrap();
    assert_eq!(reloaded.len(), vocabs[0].graph().len());
}
