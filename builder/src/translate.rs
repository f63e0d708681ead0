//! Translation expansion for literal values.
//!
//! A [`Translator`] maps a source string to its renderings keyed by language
//! tag. English is always present and always carries the untranslated text.

use std::collections::BTreeMap;

/// Language tag that always carries the source text.
pub const BASE_LANGUAGE: &str = "en";

/// Renderings of one source string, English first, then other languages in
/// tag order. Language tags are distinct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translations(Vec<(String, String)>);

impl Translations {
    /// Only the English baseline.
    #[must_use]
    pub fn english(text: &str) -> Self {
        Self(vec![(BASE_LANGUAGE.to_owned(), text.to_owned())])
    }

    /// Adds `text` under `language`, keeping other languages in tag order.
    /// Returns `false`, leaving the set unchanged, when `language` is
    /// [`BASE_LANGUAGE`] or already present.
    pub fn insert(&mut self, language: impl Into<String>, text: impl Into<String>) -> bool {
        let language = language.into();
        if language == BASE_LANGUAGE {
            return false;
        }
        match self.0[1..].binary_search_by(|(lang, _)| lang.as_str().cmp(language.as_str())) {
            Ok(_) => false,
            Err(at) => {
                self.0.insert(at + 1, (language, text.into()));
                true
            }
        }
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, language: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(language, text);
        self
    }

    /// Iterates `(language, text)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(lang, text)| (lang.as_str(), text.as_str()))
    }

    /// Number of languages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; the English baseline is always present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Text for `language`, if present.
    #[must_use]
    pub fn get(&self, language: &str) -> Option<&str> {
        self.iter()
            .find(|(lang, _)| *lang == language)
            .map(|(_, text)| text)
    }
}

/// Source of translations for literal values.
pub trait Translator: Send + Sync {
    /// Returns every available rendering of `text`, always including
    /// [`BASE_LANGUAGE`] mapped to `text` itself.
    fn translations(&self, text: &str) -> Translations;
}

/// A translator with no catalogs: every string is English only.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishOnly;

impl Translator for EnglishOnly {
    fn translations(&self, text: &str) -> Translations {
        Translations::english(text)
    }
}

/// In-memory message catalogs, one per language.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    languages: BTreeMap<String, BTreeMap<String, String>>,
}

impl Catalog {
    /// An empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a translation of `source` into `language`.
    pub fn insert(
        &mut self,
        language: impl Into<String>,
        source: impl Into<String>,
        translated: impl Into<String>,
    ) {
        self.languages
            .entry(language.into())
            .or_default()
            .insert(source.into(), translated.into());
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with(
        mut self,
        language: impl Into<String>,
        source: impl Into<String>,
        translated: impl Into<String>,
    ) -> Self {
        self.insert(language, source, translated);
        self
    }

    /// Languages that have at least one message.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.languages.keys().map(String::as_str)
    }
}

impl Translator for Catalog {
    fn translations(&self, text: &str) -> Translations {
        let mut out = Translations::english(text);
        for (language, messages) in &self.languages {
            if language == BASE_LANGUAGE {
                continue;
            }
            // Untranslated messages fall back to the source; skip them.
            if let Some(translated) = messages.get(text).filter(|t| t.as_str() != text) {
                out.insert(language.as_str(), translated.as_str());
            }
        }
        out
    }
}
