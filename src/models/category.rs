use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::category::{
    Category as DomainCategory, NewCategory as DomainNewCategory,
    UpdateCategory as DomainUpdateCategory,
};
use crate::domain::translation::Translation as DomainTranslation;
use crate::models::RowError;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::categories)]
pub struct Category {
    pub id: i32,
    pub parent_id: Option<i32>,
    pub brand_id: Option<i32>,
    pub slug: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::categories)]
pub struct NewCategory<'a> {
    pub parent_id: Option<i32>,
    pub brand_id: Option<i32>,
    pub slug: &'a str,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::categories)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateCategory {
    pub brand_id: Option<i32>,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::category_translations)]
pub struct CategoryTranslation {
    pub id: i32,
    pub category_id: i32,
    pub language: String,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::category_translations)]
pub struct NewCategoryTranslation<'a> {
    pub category_id: i32,
    pub language: &'a str,
    pub name: &'a str,
    pub description: Option<&'a str>,
}

impl Category {
    /// Combine the row with its already-converted translations.
    pub fn into_domain(self, translations: Vec<DomainTranslation>) -> DomainCategory {
        DomainCategory {
            id: self.id,
            parent_id: self.parent_id,
            brand_id: self.brand_id,
            slug: self.slug,
            translations,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl TryFrom<CategoryTranslation> for DomainTranslation {
    type Error = RowError;

    fn try_from(value: CategoryTranslation) -> Result<Self, Self::Error> {
        Ok(Self {
            language: value.language.parse()?,
            name: value.name,
            description: value.description,
        })
    }
}

impl<'a> NewCategory<'a> {
    /// Build the insertable row; `slug` is the already disambiguated value.
    pub fn from_domain(value: &DomainNewCategory, slug: &'a str) -> Self {
        Self {
            parent_id: value.parent_id,
            brand_id: value.brand_id,
            slug,
            updated_at: value.updated_at,
        }
    }
}

impl From<&DomainUpdateCategory> for UpdateCategory {
    fn from(value: &DomainUpdateCategory) -> Self {
        Self {
            brand_id: value.brand_id,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> NewCategoryTranslation<'a> {
    pub fn from_domain(category_id: i32, value: &'a DomainTranslation) -> Self {
        Self {
            category_id,
            language: value.language.as_str(),
            name: value.name.as_str(),
            description: value.description.as_deref(),
        }
    }
}
