use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::translation::{Language, Localized, resolve};

/// Per-language description of a brand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandDescription {
    pub language: Language,
    pub description: String,
}

impl Localized for BrandDescription {
    fn language(&self) -> Language {
        self.language
    }
}

/// Manufacturer whose equipment is listed in the catalog.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Brand {
    pub id: i32,
    pub slug: String,
    /// Logo image reference.
    pub logo: String,
    /// Display name, identical in every language.
    pub name: String,
    pub descriptions: Vec<BrandDescription>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Brand {
    pub fn description(&self, lang: Language) -> Option<&str> {
        resolve(&self.descriptions, lang).map(|entry| entry.description.as_str())
    }
}

/// Payload required to insert a new brand.
#[derive(Debug, Clone)]
pub struct NewBrand {
    /// Base slug; the repository appends a suffix on collision.
    pub slug: String,
    pub logo: String,
    pub name: String,
    pub descriptions: Vec<BrandDescription>,
    pub updated_at: NaiveDateTime,
}

impl NewBrand {
    pub fn new(
        slug: impl Into<String>,
        logo: impl Into<String>,
        name: impl Into<String>,
        descriptions: Vec<BrandDescription>,
    ) -> Self {
        Self {
            slug: slug.into(),
            logo: logo.into(),
            name: name.into(),
            descriptions,
            updated_at: Local::now().naive_utc(),
        }
    }
}

/// Replacement data applied when updating a brand. Descriptions are replaced wholesale.
#[derive(Debug, Clone)]
pub struct UpdateBrand {
    pub logo: String,
    pub name: String,
    pub descriptions: Vec<BrandDescription>,
    pub updated_at: NaiveDateTime,
}

impl UpdateBrand {
    pub fn new(
        logo: impl Into<String>,
        name: impl Into<String>,
        descriptions: Vec<BrandDescription>,
    ) -> Self {
        Self {
            logo: logo.into(),
            name: name.into(),
            descriptions,
            updated_at: Local::now().naive_utc(),
        }
    }
}

/// Brand listing entry with its description resolved for one language.
#[derive(Debug, Serialize, Clone)]
pub struct BrandSummary {
    pub id: i32,
    pub slug: String,
    pub logo: String,
    pub name: String,
    pub description: Option<String>,
}

impl BrandSummary {
    pub fn new(brand: &Brand, lang: Language) -> Self {
        Self {
            id: brand.id,
            slug: brand.slug.clone(),
            logo: brand.logo.clone(),
            name: brand.name.clone(),
            description: brand.description(lang).map(str::to_string),
        }
    }
}
