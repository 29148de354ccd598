use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::translation::{Language, Translation, resolve_text};

/// Maximum number of supplementary technical images per product.
pub const MAX_TECHNICAL_IMAGES: usize = 4;

/// Stock status displayed on the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Availability {
    InStock,
    OnOrder,
}

impl Availability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Availability::InStock => "IN_STOCK",
            Availability::OnOrder => "ON_ORDER",
        }
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown availability `{0}`")]
pub struct UnknownAvailability(pub String);

impl FromStr for Availability {
    type Err = UnknownAvailability;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "IN_STOCK" => Ok(Availability::InStock),
            "ON_ORDER" => Ok(Availability::OnOrder),
            other => Err(UnknownAvailability(other.to_string())),
        }
    }
}

/// Domain representation of a catalog product.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Product {
    /// Unique identifier of the product.
    pub id: i32,
    /// End category holding the product.
    pub category_id: i32,
    /// Globally unique URL-safe identifier.
    pub slug: String,
    /// Globally unique stock keeping unit.
    pub sku: String,
    /// Primary image reference.
    pub main_image: String,
    /// Ordered, non-empty list of gallery image references.
    pub gallery: Vec<String>,
    /// Up to four supplementary technical images.
    pub technical_images: Vec<String>,
    /// Base price in minor currency units.
    pub price_cents: i64,
    pub is_discounted: bool,
    /// Discounted price; only meaningful when `is_discounted` is set.
    pub discount_price_cents: Option<i64>,
    pub availability: Availability,
    /// Per-language names and descriptions in storage order.
    pub translations: Vec<Translation>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Product {
    /// Price a customer pays right now.
    pub fn effective_price_cents(&self) -> i64 {
        match (self.is_discounted, self.discount_price_cents) {
            (true, Some(discounted)) => discounted,
            _ => self.price_cents,
        }
    }
}

/// Writable product attributes shared by inserts and updates.
#[derive(Debug, Clone)]
pub struct ProductDetails {
    pub category_id: i32,
    pub sku: String,
    pub main_image: String,
    pub gallery: Vec<String>,
    pub technical_images: Vec<String>,
    pub price_cents: i64,
    pub is_discounted: bool,
    pub discount_price_cents: Option<i64>,
    pub availability: Availability,
    /// Full set of translations; replaces the stored set on update.
    pub translations: Vec<Translation>,
}

/// Payload required to insert a new product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    /// Base slug; the repository appends `-2`, `-3`, ... on collision.
    pub slug: String,
    pub details: ProductDetails,
    /// Timestamp captured when the product payload was created.
    pub updated_at: NaiveDateTime,
}

impl NewProduct {
    pub fn new(slug: impl Into<String>, details: ProductDetails) -> Self {
        Self {
            slug: slug.into(),
            details,
            updated_at: chrono::Local::now().naive_utc(),
        }
    }
}

/// Replacement data applied when updating an existing product.
///
/// The slug is kept stable so published URLs survive a rename.
#[derive(Debug, Clone)]
pub struct UpdateProduct {
    pub details: ProductDetails,
    /// Timestamp captured when the patch was created.
    pub updated_at: NaiveDateTime,
}

impl UpdateProduct {
    pub fn new(details: ProductDetails) -> Self {
        Self {
            details,
            updated_at: chrono::Local::now().naive_utc(),
        }
    }
}

/// Terminal node of the category tree.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ProductNode {
    pub id: i32,
    pub category_id: i32,
    pub slug: String,
    pub sku: String,
    pub translations: Vec<Translation>,
    pub price_cents: i64,
    pub availability: Availability,
    /// Always `true`; products terminate the tree.
    pub is_end_category: bool,
    pub level: i32,
}

/// Product together with the texts resolved for a storefront language.
#[derive(Debug, Serialize, Clone)]
pub struct LocalizedProduct {
    pub name: String,
    pub description: Option<String>,
    pub product: Product,
}

impl LocalizedProduct {
    pub fn new(product: Product, lang: Language) -> Self {
        let text = resolve_text(&product.translations, lang);
        Self {
            name: text.name.to_string(),
            description: text.description.map(str::to_string),
            product,
        }
    }
}
