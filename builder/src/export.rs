//! Bulk export of compiled vocabularies.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::serializer::Format;
use crate::vocabulary::Vocabulary;

/// Writes each vocabulary to `<out_dir>/<name>.<ext>`, creating `out_dir`
/// if needed. Returns the written paths in input order.
///
/// # Errors
///
/// Returns [`Error::Io`](crate::Error::Io) if the directory cannot be
/// created or a file cannot be written, and
/// [`Error::Json`](crate::Error::Json) if JSON-LD rendering fails.
pub fn export_all(vocabularies: &[Vocabulary], out_dir: &Path, format: Format) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir)?;
    let mut written = Vec::with_capacity(vocabularies.len());
    for vocabulary in vocabularies {
        let path = out_dir.join(format!("{}.{}", vocabulary.name(), format.extension()));
        vocabulary.write(format, &path)?;
        tracing::info!(vocabulary = vocabulary.name(), path = %path.display(), triples = vocabulary.graph().len(), "exported vocabulary");
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::Concept;

    #[test]
    fn writes_one_file_per_vocabulary() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested/out");
        let vocabs = vec![
            Vocabulary::builder("Rocks")
                .base_url("https://example.org/")
                .term("granite", Concept::new().with("skos:prefLabel", "Granite"))
                .build()
                .unwrap(),
            Vocabulary::builder("Minerals")
                .base_url("https://example.org/")
                .build()
                .unwrap(),
        ];
        let paths = export_all(&vocabs, &out, Format::NTriples).unwrap();
        assert_eq!(paths, [out.join("rocks.nt"), out.join("minerals.nt")]);
        let text = fs::read_to_string(&paths[0]).unwrap();
        assert!(text.contains("<https://example.org/rocks#granite>"));
    }
}
