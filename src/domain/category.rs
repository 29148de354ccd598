use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::translation::{Language, Translation, resolve_text};

/// Domain representation of a node in the category forest.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Category {
    /// Unique identifier of the category.
    pub id: i32,
    /// Parent category; `None` for roots.
    pub parent_id: Option<i32>,
    /// Brand associated with the category, inherited by descendants on change.
    pub brand_id: Option<i32>,
    /// Globally unique URL-safe identifier.
    pub slug: String,
    /// Per-language names and descriptions in storage order.
    pub translations: Vec<Translation>,
    /// Timestamp for when the category record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the category record.
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new category.
#[derive(Debug, Clone)]
pub struct NewCategory {
    /// Optional identifier of the parent category.
    pub parent_id: Option<i32>,
    /// Optional brand attached to the category.
    pub brand_id: Option<i32>,
    /// Base slug; the repository appends `-2`, `-3`, ... on collision.
    pub slug: String,
    /// Translations, including the primary language.
    pub translations: Vec<Translation>,
    /// Timestamp captured when the category payload was created.
    pub updated_at: NaiveDateTime,
}

impl NewCategory {
    /// Build a new category payload with the supplied details and current timestamp.
    pub fn new(slug: impl Into<String>, translations: Vec<Translation>) -> Self {
        Self {
            parent_id: None,
            brand_id: None,
            slug: slug.into(),
            translations,
            updated_at: Local::now().naive_utc(),
        }
    }

    /// Attach a parent identifier to the category payload.
    pub fn with_parent_id(mut self, parent_id: i32) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Attach a brand identifier to the category payload.
    pub fn with_brand_id(mut self, brand_id: i32) -> Self {
        self.brand_id = Some(brand_id);
        self
    }
}

/// Replacement data applied when updating an existing category.
///
/// Translations are replaced wholesale, never merged.
#[derive(Debug, Clone)]
pub struct UpdateCategory {
    /// New brand; `None` clears it.
    pub brand_id: Option<i32>,
    /// Full replacement set of translations.
    pub translations: Vec<Translation>,
    /// Timestamp captured when the patch was created.
    pub updated_at: NaiveDateTime,
}

impl UpdateCategory {
    pub fn new(brand_id: Option<i32>, translations: Vec<Translation>) -> Self {
        Self {
            brand_id,
            translations,
            updated_at: Local::now().naive_utc(),
        }
    }
}

/// Result of a category update.
#[derive(Debug, Clone)]
pub struct CategoryUpdated {
    /// Category as read back after the update.
    pub category: Category,
    /// Number of descendants whose brand was overwritten by the cascade.
    pub cascaded: usize,
}

/// One level of the category tree, annotated with its counts.
///
/// Translations are not pre-resolved so a client can switch language without
/// fetching again.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CategoryNode {
    pub id: i32,
    pub parent_id: Option<i32>,
    pub slug: String,
    pub brand_id: Option<i32>,
    /// Brand display name, empty when the category has no brand.
    pub brand_name: String,
    pub translations: Vec<Translation>,
    pub child_count: i64,
    pub product_count: i64,
    /// `true` iff the category has no subcategories.
    pub is_end_category: bool,
    /// Depth in the tree; roots sit at level 0.
    pub level: i32,
}

impl CategoryNode {
    /// A category may only be removed once it holds neither subcategories nor products.
    pub fn is_deletable(&self) -> bool {
        self.child_count == 0 && self.product_count == 0
    }
}

/// Flattened category entry used by parent and product category selectors.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct FlatCategory {
    pub id: i32,
    pub parent_id: Option<i32>,
    pub name: String,
    pub brand_id: Option<i32>,
    pub is_end_category: bool,
}

impl FlatCategory {
    pub fn from_node(node: &CategoryNode, lang: Language) -> Self {
        Self {
            id: node.id,
            parent_id: node.parent_id,
            name: resolve_text(&node.translations, lang).name.to_string(),
            brand_id: node.brand_id,
            is_end_category: node.is_end_category,
        }
    }
}

/// Category together with the texts resolved for a storefront language.
#[derive(Debug, Serialize, Clone)]
pub struct LocalizedCategory {
    pub name: String,
    pub description: Option<String>,
    pub category: Category,
}

impl LocalizedCategory {
    pub fn new(category: Category, lang: Language) -> Self {
        let text = resolve_text(&category.translations, lang);
        Self {
            name: text.name.to_string(),
            description: text.description.map(str::to_string),
            category,
        }
    }
}
