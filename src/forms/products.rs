use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::product::{
    Availability, MAX_TECHNICAL_IMAGES, NewProduct, ProductDetails, UpdateProduct,
};
use crate::domain::translation::primary;
use crate::forms::{TranslationError, TranslationForm, into_translations, sanitize_inline_text};
use crate::slug::base_slug;

/// Maximum allowed length for a SKU.
const SKU_MAX_LEN: usize = 64;
const SKU_MAX_LEN_VALIDATOR: u64 = SKU_MAX_LEN as u64;

const TECHNICAL_IMAGES_MAX_VALIDATOR: u64 = MAX_TECHNICAL_IMAGES as u64;

/// Slug used when the primary name has no URL-safe characters.
const SLUG_FALLBACK: &str = "product";

/// Result type returned by the product form helpers.
pub type ProductFormResult<T> = Result<T, ProductFormError>;

/// Errors that can occur while processing product forms.
#[derive(Debug, Error)]
pub enum ProductFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error(transparent)]
    Translations(#[from] TranslationError),
    /// The SKU is empty after sanitization.
    #[error("product SKU cannot be empty")]
    EmptySku,
    /// An image reference is blank.
    #[error("image references cannot be empty")]
    EmptyImage,
    /// The discount flag is set without a usable discount price.
    #[error("a discounted product needs a positive discount price")]
    MissingDiscountPrice,
}

/// Payload of `product.createProduct` and `product.updateProduct`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProductForm {
    #[validate(length(min = 1, max = SKU_MAX_LEN_VALIDATOR))]
    pub sku: String,
    #[validate(length(min = 1))]
    pub main_image: String,
    #[validate(length(min = 1))]
    pub gallery: Vec<String>,
    #[validate(length(max = TECHNICAL_IMAGES_MAX_VALIDATOR))]
    #[serde(default)]
    pub technical_images: Vec<String>,
    /// Base price in minor currency units.
    #[validate(range(min = 1))]
    pub price_cents: i64,
    #[serde(default)]
    pub is_discounted: bool,
    #[serde(default)]
    pub discount_price_cents: Option<i64>,
    pub availability: Availability,
    /// Target category; must be an end category.
    #[validate(range(min = 1))]
    pub category_id: i32,
    #[validate(length(min = 1), nested)]
    pub translations: Vec<TranslationForm>,
}

impl ProductForm {
    /// Validates and sanitizes the payload into a domain `NewProduct`.
    pub fn into_new_product(self) -> ProductFormResult<NewProduct> {
        let details = self.into_details()?;

        let slug = primary(&details.translations)
            .map(|translation| base_slug(&translation.name, SLUG_FALLBACK))
            .unwrap_or_else(|| SLUG_FALLBACK.to_string());

        Ok(NewProduct::new(slug, details))
    }

    /// Validates and sanitizes the payload into a domain `UpdateProduct`.
    pub fn into_update_product(self) -> ProductFormResult<UpdateProduct> {
        Ok(UpdateProduct::new(self.into_details()?))
    }

    fn into_details(self) -> ProductFormResult<ProductDetails> {
        self.validate()?;

        let sku = sanitize_sku(&self.sku);
        if sku.is_empty() {
            return Err(ProductFormError::EmptySku);
        }

        let main_image = self.main_image.trim().to_string();
        if main_image.is_empty() {
            return Err(ProductFormError::EmptyImage);
        }
        let gallery = clean_images(self.gallery)?;
        let technical_images = clean_images(self.technical_images)?;

        let discount_price_cents = if self.is_discounted {
            match self.discount_price_cents {
                Some(price) if price > 0 => Some(price),
                _ => return Err(ProductFormError::MissingDiscountPrice),
            }
        } else {
            None
        };

        let translations = into_translations(self.translations)?;

        Ok(ProductDetails {
            category_id: self.category_id,
            sku,
            main_image,
            gallery,
            technical_images,
            price_cents: self.price_cents,
            is_discounted: self.is_discounted,
            discount_price_cents,
            availability: self.availability,
            translations,
        })
    }
}

fn sanitize_sku(input: &str) -> String {
    sanitize_inline_text(input).replace(' ', "")
}

fn clean_images(images: Vec<String>) -> ProductFormResult<Vec<String>> {
    images
        .into_iter()
        .map(|image| {
            let trimmed = image.trim();
            if trimmed.is_empty() {
                Err(ProductFormError::EmptyImage)
            } else {
                Ok(trimmed.to_string())
            }
        })
        .collect()
}
