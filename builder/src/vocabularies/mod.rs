//! Vocabularies bundled with the crate.
//!
//! Each sub-module declares one vocabulary as Rust static data. They double
//! as worked examples of the declaration API and feed `skos-build --builtin`.

pub mod sample_type;
pub mod simple_lithology;

use crate::error::Result;
use crate::vocabulary::Vocabulary;

/// Every bundled vocabulary, compiled, in a stable order.
///
/// # Errors
///
/// Returns the first compilation error.
pub fn all() -> Result<Vec<Vocabulary>> {
    Ok(vec![simple_lithology::vocabulary()?, sample_type::vocabulary()?])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_unique() {
        let vocabs = all().unwrap();
        let mut names: Vec<&str> = vocabs.iter().map(Vocabulary::name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names, ["sample-type", "simple-lithology"]);
    }
}
