use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Label returned when an entity carries no translations at all.
pub const UNTRANSLATED: &str = "Unnamed";

/// Languages the catalog is published in.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Ukrainian, the primary catalog language.
    #[default]
    Uk,
    /// English.
    En,
}

impl Language {
    /// Language whose translation is mandatory for every entity and drives slugs.
    pub const PRIMARY: Language = Language::Uk;

    /// Two-letter code stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Uk => "uk",
            Language::En => "en",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a stored language code is not one of [`Language`].
#[derive(Debug, Error)]
#[error("unknown language code `{0}`")]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "uk" => Ok(Language::Uk),
            "en" => Ok(Language::En),
            other => Err(UnknownLanguage(other.to_string())),
        }
    }
}

/// Anything that is attached to a single language.
pub trait Localized {
    fn language(&self) -> Language;
}

/// Per-language name and description of a category or product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    pub language: Language,
    pub name: String,
    pub description: Option<String>,
}

impl Translation {
    pub fn new(language: Language, name: impl Into<String>) -> Self {
        Self {
            language,
            name: name.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl Localized for Translation {
    fn language(&self) -> Language {
        self.language
    }
}

/// Pick the translation for `lang`, falling back to the first stored one.
///
/// Returns `None` only for an empty slice.
pub fn resolve<T: Localized>(translations: &[T], lang: Language) -> Option<&T> {
    translations
        .iter()
        .find(|translation| translation.language() == lang)
        .or_else(|| translations.first())
}

/// Name and description chosen for display in a given language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolvedText<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
}

/// Total variant of [`resolve`] that degrades to [`UNTRANSLATED`].
pub fn resolve_text(translations: &[Translation], lang: Language) -> ResolvedText<'_> {
    match resolve(translations, lang) {
        Some(translation) => ResolvedText {
            name: translation.name.as_str(),
            description: translation.description.as_deref(),
        },
        None => ResolvedText {
            name: UNTRANSLATED,
            description: None,
        },
    }
}

/// Return the translation in the primary language, if any.
pub fn primary(translations: &[Translation]) -> Option<&Translation> {
    translations
        .iter()
        .find(|translation| translation.language == Language::PRIMARY)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Translation> {
        vec![
            Translation::new(Language::Uk, "Компресори").with_description("Поршневі"),
            Translation::new(Language::En, "Compressors"),
        ]
    }

    #[test]
    fn resolve_returns_requested_language() {
        let translations = sample();

        let text = resolve_text(&translations, Language::En);

        assert_eq!(text.name, "Compressors");
        assert_eq!(text.description, None);
    }

    #[test]
    fn resolve_falls_back_to_first_translation() {
        let translations = vec![Translation::new(Language::Uk, "Насоси")];

        let text = resolve_text(&translations, Language::En);

        assert_eq!(text.name, "Насоси");
    }

    #[test]
    fn resolve_degrades_to_placeholder_when_empty() {
        let text = resolve_text(&[], Language::Uk);

        assert_eq!(text.name, UNTRANSLATED);
        assert!(text.description.is_none());
        assert!(resolve::<Translation>(&[], Language::Uk).is_none());
    }

    #[test]
    fn language_round_trips_through_storage_code() {
        assert_eq!("en".parse::<Language>().ok(), Some(Language::En));
        assert_eq!(Language::Uk.to_string(), "uk");
        assert!("de".parse::<Language>().is_err());
    }

    #[test]
    fn primary_finds_ukrainian_entry() {
        let mut translations = sample();
        translations.reverse();

        let found = primary(&translations).map(|t| t.name.as_str());

        assert_eq!(found, Some("Компресори"));
    }
}
