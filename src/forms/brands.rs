use std::collections::HashSet;

use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::brand::{BrandDescription, NewBrand, UpdateBrand};
use crate::domain::translation::Language;
use crate::forms::{sanitize_inline_text, sanitize_multiline_text};
use crate::slug::base_slug;

const NAME_MAX_LEN_VALIDATOR: u64 = 128;

/// Slug used when the brand name has no URL-safe characters.
const SLUG_FALLBACK: &str = "brand";

pub type BrandFormResult<T> = Result<T, BrandFormError>;

#[derive(Debug, Error)]
pub enum BrandFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("brand name cannot be empty")]
    EmptyName,
    #[error("brand logo cannot be empty")]
    EmptyLogo,
    #[error("language `{0}` appears more than once")]
    DuplicateLanguage(Language),
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BrandDescriptionForm {
    pub language: Language,
    #[validate(length(min = 1))]
    pub description: String,
}

/// Payload of `brand.createBrand` and `brand.updateBrand`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BrandForm {
    #[validate(length(min = 1))]
    pub logo: String,
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    #[validate(nested)]
    #[serde(default)]
    pub descriptions: Vec<BrandDescriptionForm>,
}

struct BrandFields {
    logo: String,
    name: String,
    descriptions: Vec<BrandDescription>,
}

impl BrandForm {
    pub fn into_new_brand(self) -> BrandFormResult<NewBrand> {
        let fields = self.into_fields()?;
        let slug = base_slug(&fields.name, SLUG_FALLBACK);

        Ok(NewBrand::new(
            slug,
            fields.logo,
            fields.name,
            fields.descriptions,
        ))
    }

    pub fn into_update_brand(self) -> BrandFormResult<UpdateBrand> {
        let fields = self.into_fields()?;

        Ok(UpdateBrand::new(
            fields.logo,
            fields.name,
            fields.descriptions,
        ))
    }

    fn into_fields(self) -> BrandFormResult<BrandFields> {
        self.validate()?;

        let name = sanitize_inline_text(&self.name);
        if name.is_empty() {
            return Err(BrandFormError::EmptyName);
        }

        let logo = self.logo.trim().to_string();
        if logo.is_empty() {
            return Err(BrandFormError::EmptyLogo);
        }

        let mut seen = HashSet::new();
        let mut descriptions = Vec::with_capacity(self.descriptions.len());
        for entry in self.descriptions {
            if !seen.insert(entry.language) {
                return Err(BrandFormError::DuplicateLanguage(entry.language));
            }
            let description = sanitize_multiline_text(&entry.description);
            if description.is_empty() {
                continue;
            }
            descriptions.push(BrandDescription {
                language: entry.language,
                description,
            });
        }

        Ok(BrandFields {
            logo,
            name,
            descriptions,
        })
    }
}
