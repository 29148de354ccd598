use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::product::{
    Product as DomainProduct, ProductDetails as DomainProductDetails,
    ProductNode as DomainProductNode,
};
use crate::domain::translation::Translation as DomainTranslation;
use crate::models::RowError;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::products)]
pub struct Product {
    pub id: i32,
    pub category_id: i32,
    pub slug: String,
    pub sku: String,
    pub main_image: String,
    pub gallery: String,
    pub technical_images: String,
    pub price_cents: i64,
    pub is_discounted: bool,
    pub discount_price_cents: Option<i64>,
    pub availability: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::products)]
pub struct NewProduct<'a> {
    pub category_id: i32,
    pub slug: &'a str,
    pub sku: &'a str,
    pub main_image: &'a str,
    pub gallery: String,
    pub technical_images: String,
    pub price_cents: i64,
    pub is_discounted: bool,
    pub discount_price_cents: Option<i64>,
    pub availability: &'a str,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::products)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateProduct<'a> {
    pub category_id: i32,
    pub sku: &'a str,
    pub main_image: &'a str,
    pub gallery: String,
    pub technical_images: String,
    pub price_cents: i64,
    pub is_discounted: bool,
    pub discount_price_cents: Option<i64>,
    pub availability: &'a str,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::product_translations)]
pub struct ProductTranslation {
    pub id: i32,
    pub product_id: i32,
    pub language: String,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::product_translations)]
pub struct NewProductTranslation<'a> {
    pub product_id: i32,
    pub language: &'a str,
    pub name: &'a str,
    pub description: Option<&'a str>,
}

impl Product {
    pub fn into_domain(
        self,
        translations: Vec<DomainTranslation>,
    ) -> Result<DomainProduct, RowError> {
        Ok(DomainProduct {
            id: self.id,
            category_id: self.category_id,
            slug: self.slug,
            sku: self.sku,
            main_image: self.main_image,
            gallery: serde_json::from_str(&self.gallery)?,
            technical_images: serde_json::from_str(&self.technical_images)?,
            price_cents: self.price_cents,
            is_discounted: self.is_discounted,
            discount_price_cents: self.discount_price_cents,
            availability: self.availability.parse()?,
            translations,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }

    pub fn into_node(
        self,
        translations: Vec<DomainTranslation>,
        level: i32,
    ) -> Result<DomainProductNode, RowError> {
        Ok(DomainProductNode {
            id: self.id,
            category_id: self.category_id,
            slug: self.slug,
            sku: self.sku,
            translations,
            price_cents: self.price_cents,
            availability: self.availability.parse()?,
            is_end_category: true,
            level,
        })
    }
}

impl TryFrom<ProductTranslation> for DomainTranslation {
    type Error = RowError;

    fn try_from(value: ProductTranslation) -> Result<Self, Self::Error> {
        Ok(Self {
            language: value.language.parse()?,
            name: value.name,
            description: value.description,
        })
    }
}

impl<'a> NewProduct<'a> {
    pub fn from_domain(
        details: &'a DomainProductDetails,
        slug: &'a str,
        updated_at: NaiveDateTime,
    ) -> Result<Self, RowError> {
        Ok(Self {
            category_id: details.category_id,
            slug,
            sku: details.sku.as_str(),
            main_image: details.main_image.as_str(),
            gallery: serde_json::to_string(&details.gallery)?,
            technical_images: serde_json::to_string(&details.technical_images)?,
            price_cents: details.price_cents,
            is_discounted: details.is_discounted,
            discount_price_cents: details.discount_price_cents,
            availability: details.availability.as_str(),
            updated_at,
        })
    }
}

impl<'a> UpdateProduct<'a> {
    pub fn from_domain(
        details: &'a DomainProductDetails,
        updated_at: NaiveDateTime,
    ) -> Result<Self, RowError> {
        Ok(Self {
            category_id: details.category_id,
            sku: details.sku.as_str(),
            main_image: details.main_image.as_str(),
            gallery: serde_json::to_string(&details.gallery)?,
            technical_images: serde_json::to_string(&details.technical_images)?,
            price_cents: details.price_cents,
            is_discounted: details.is_discounted,
            discount_price_cents: details.discount_price_cents,
            availability: details.availability.as_str(),
            updated_at,
        })
    }
}

impl<'a> NewProductTranslation<'a> {
    pub fn from_domain(product_id: i32, value: &'a DomainTranslation) -> Self {
        Self {
            product_id,
            language: value.language.as_str(),
            name: value.name.as_str(),
            description: value.description.as_deref(),
        }
    }
}
