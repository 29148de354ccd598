use crate::domain::brand::{Brand, BrandSummary};
use crate::domain::translation::Language;
use crate::forms::brands::BrandForm;
use crate::repository::{BrandReader, BrandWriter};
use crate::services::{ServiceError, ServiceResult};

/// Brands ordered by name, with descriptions resolved for `lang`.
pub fn list_brands<R>(repo: &R, lang: Language) -> ServiceResult<Vec<BrandSummary>>
where
    R: BrandReader + ?Sized,
{
    let brands = repo.list_brands().map_err(ServiceError::from)?;

    Ok(brands
        .iter()
        .map(|brand| BrandSummary::new(brand, lang))
        .collect())
}

pub fn get_brand_by_id<R>(repo: &R, brand_id: i32) -> ServiceResult<Brand>
where
    R: BrandReader + ?Sized,
{
    repo.get_brand_by_id(brand_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)
}

pub fn create_brand<R>(repo: &R, form: BrandForm) -> ServiceResult<Brand>
where
    R: BrandWriter + ?Sized,
{
    let new_brand = form
        .into_new_brand()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.create_brand(&new_brand).map_err(ServiceError::from)
}

pub fn update_brand<R>(repo: &R, brand_id: i32, form: BrandForm) -> ServiceResult<Brand>
where
    R: BrandWriter + ?Sized,
{
    let update = form
        .into_update_brand()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.update_brand(brand_id, &update)
        .map_err(ServiceError::from)
}

pub fn delete_brand<R>(repo: &R, brand_id: i32) -> ServiceResult<()>
where
    R: BrandWriter + ?Sized,
{
    repo.delete_brand(brand_id).map_err(ServiceError::from)
}
