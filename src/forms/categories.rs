use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::category::{NewCategory, UpdateCategory};
use crate::domain::translation::primary;
use crate::forms::{TranslationError, TranslationForm, into_translations};
use crate::slug::base_slug;

/// Slug used when the primary name has no URL-safe characters.
const SLUG_FALLBACK: &str = "category";

/// Result type returned by the category form helpers.
pub type CategoryFormResult<T> = Result<T, CategoryFormError>;

/// Errors that can occur while processing category forms.
#[derive(Debug, Error)]
pub enum CategoryFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error(transparent)]
    Translations(#[from] TranslationError),
    /// Supplied identifier field is not a positive integer.
    #[error("invalid {field} `{value}`")]
    InvalidIdentifier { field: &'static str, value: i32 },
}

/// Payload of `category.createCategory`.
#[derive(Debug, Deserialize, Validate)]
pub struct AddCategoryForm {
    /// Parent category; omitted for a root category.
    #[serde(default)]
    pub parent_id: Option<i32>,
    #[serde(default)]
    pub brand_id: Option<i32>,
    #[validate(length(min = 1), nested)]
    pub translations: Vec<TranslationForm>,
}

impl AddCategoryForm {
    /// Validates and sanitizes the payload into a domain `NewCategory`.
    pub fn into_new_category(self) -> CategoryFormResult<NewCategory> {
        self.validate()?;

        let parent_id = check_identifier(self.parent_id, "parent category")?;
        let brand_id = check_identifier(self.brand_id, "brand")?;
        let translations = into_translations(self.translations)?;

        let slug = primary(&translations)
            .map(|translation| base_slug(&translation.name, SLUG_FALLBACK))
            .unwrap_or_else(|| SLUG_FALLBACK.to_string());

        let mut new_category = NewCategory::new(slug, translations);
        if let Some(parent_id) = parent_id {
            new_category = new_category.with_parent_id(parent_id);
        }
        if let Some(brand_id) = brand_id {
            new_category = new_category.with_brand_id(brand_id);
        }

        Ok(new_category)
    }
}

/// Payload of `category.updateCategory`.
#[derive(Debug, Deserialize, Validate)]
pub struct EditCategoryForm {
    /// New brand; `null` detaches the category from its brand.
    #[serde(default)]
    pub brand_id: Option<i32>,
    /// Full replacement of the stored translations.
    #[validate(length(min = 1), nested)]
    pub translations: Vec<TranslationForm>,
}

impl EditCategoryForm {
    /// Validates and sanitizes the payload into a domain `UpdateCategory`.
    pub fn into_update_category(self) -> CategoryFormResult<UpdateCategory> {
        self.validate()?;

        let brand_id = check_identifier(self.brand_id, "brand")?;
        let translations = into_translations(self.translations)?;

        Ok(UpdateCategory::new(brand_id, translations))
    }
}

/// Payload of `category.moveCategory`.
#[derive(Debug, Deserialize)]
pub struct MoveCategoryForm {
    /// New parent; `null` turns the category into a root.
    #[serde(default)]
    pub parent_id: Option<i32>,
}

impl MoveCategoryForm {
    pub fn into_parent_id(self) -> CategoryFormResult<Option<i32>> {
        check_identifier(self.parent_id, "parent category")
    }
}

fn check_identifier(value: Option<i32>, field: &'static str) -> CategoryFormResult<Option<i32>> {
    match value {
        Some(id) if id <= 0 => Err(CategoryFormError::InvalidIdentifier { field, value: id }),
        other => Ok(other),
    }
}
