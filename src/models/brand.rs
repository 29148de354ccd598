use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::brand::{
    Brand as DomainBrand, BrandDescription as DomainBrandDescription, NewBrand as DomainNewBrand,
    UpdateBrand as DomainUpdateBrand,
};
use crate::models::RowError;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::brands)]
pub struct Brand {
    pub id: i32,
    pub slug: String,
    pub logo: String,
    pub name: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::brands)]
pub struct NewBrand<'a> {
    pub slug: &'a str,
    pub logo: &'a str,
    pub name: &'a str,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::brands)]
pub struct UpdateBrand<'a> {
    pub logo: &'a str,
    pub name: &'a str,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::brand_translations)]
pub struct BrandTranslation {
    pub id: i32,
    pub brand_id: i32,
    pub language: String,
    pub description: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::brand_translations)]
pub struct NewBrandTranslation<'a> {
    pub brand_id: i32,
    pub language: &'a str,
    pub description: &'a str,
}

impl Brand {
    pub fn into_domain(self, descriptions: Vec<DomainBrandDescription>) -> DomainBrand {
        DomainBrand {
            id: self.id,
            slug: self.slug,
            logo: self.logo,
            name: self.name,
            descriptions,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl TryFrom<BrandTranslation> for DomainBrandDescription {
    type Error = RowError;

    fn try_from(value: BrandTranslation) -> Result<Self, Self::Error> {
        Ok(Self {
            language: value.language.parse()?,
            description: value.description,
        })
    }
}

impl<'a> NewBrand<'a> {
    pub fn from_domain(value: &'a DomainNewBrand, slug: &'a str) -> Self {
        Self {
            slug,
            logo: value.logo.as_str(),
            name: value.name.as_str(),
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainUpdateBrand> for UpdateBrand<'a> {
    fn from(value: &'a DomainUpdateBrand) -> Self {
        Self {
            logo: value.logo.as_str(),
            name: value.name.as_str(),
            updated_at: value.updated_at,
        }
    }
}

impl<'a> NewBrandTranslation<'a> {
    pub fn from_domain(brand_id: i32, value: &'a DomainBrandDescription) -> Self {
        Self {
            brand_id,
            language: value.language.as_str(),
            description: value.description.as_str(),
        }
    }
}
