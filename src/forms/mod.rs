use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::Validate;

use crate::domain::translation::{Language, Translation};

pub mod brands;
pub mod categories;
pub mod products;

/// Maximum length allowed for a translated name.
const NAME_MAX_LEN: usize = 128;
const NAME_MAX_LEN_VALIDATOR: u64 = NAME_MAX_LEN as u64;

/// Maximum length allowed for a translated description.
const DESCRIPTION_MAX_LEN: usize = 8192;
const DESCRIPTION_MAX_LEN_VALIDATOR: u64 = DESCRIPTION_MAX_LEN as u64;

/// Problems with a submitted translation set.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TranslationError {
    #[error("a `{0}` translation is required")]
    MissingPrimary(Language),
    #[error("language `{0}` appears more than once")]
    DuplicateLanguage(Language),
    #[error("the `{0}` name cannot be empty")]
    EmptyName(Language),
}

/// One entry of a translations array.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TranslationForm {
    pub language: Language,
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    #[validate(length(max = DESCRIPTION_MAX_LEN_VALIDATOR))]
    #[serde(default)]
    pub description: Option<String>,
}

impl TranslationForm {
    pub fn new(language: Language, name: impl Into<String>) -> Self {
        Self {
            language,
            name: name.into(),
            description: None,
        }
    }
}

/// Sanitize a translations array, requiring the primary language exactly once.
pub(crate) fn into_translations(
    forms: Vec<TranslationForm>,
) -> Result<Vec<Translation>, TranslationError> {
    let mut seen = HashSet::new();
    let mut translations = Vec::with_capacity(forms.len());

    for form in forms {
        if !seen.insert(form.language) {
            return Err(TranslationError::DuplicateLanguage(form.language));
        }

        let name = sanitize_inline_text(&form.name);
        if name.is_empty() {
            return Err(TranslationError::EmptyName(form.language));
        }

        let description = form
            .description
            .as_deref()
            .map(sanitize_multiline_text)
            .filter(|value| !value.is_empty());

        translations.push(Translation {
            language: form.language,
            name,
            description,
        });
    }

    if !seen.contains(&Language::PRIMARY) {
        return Err(TranslationError::MissingPrimary(Language::PRIMARY));
    }

    Ok(translations)
}

pub(crate) fn sanitize_inline_text(input: &str) -> String {
    let mut sanitized = String::with_capacity(input.len());
    let mut previous_whitespace = false;

    for ch in input.trim().chars() {
        if ch.is_whitespace() {
            if !previous_whitespace {
                sanitized.push(' ');
                previous_whitespace = true;
            }
        } else if ch.is_control() {
            continue;
        } else {
            sanitized.push(ch);
            previous_whitespace = false;
        }
    }

    sanitized
}

pub(crate) fn sanitize_multiline_text(input: &str) -> String {
    let mut lines: Vec<String> = input.lines().map(sanitize_inline_text).collect();

    while matches!(lines.first(), Some(line) if line.is_empty()) {
        lines.remove(0);
    }

    while matches!(lines.last(), Some(line) if line.is_empty()) {
        lines.pop();
    }

    let mut result = Vec::with_capacity(lines.len());
    let mut previous_empty = false;
    for line in lines {
        let is_empty = line.is_empty();
        if is_empty && previous_empty {
            continue;
        }
        previous_empty = is_empty;
        result.push(line);
    }

    result.join("\n")
}
