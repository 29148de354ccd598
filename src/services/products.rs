use crate::domain::product::{LocalizedProduct, Product};
use crate::domain::translation::Language;
use crate::forms::products::ProductForm;
use crate::repository::{ProductReader, ProductWriter};
use crate::services::{ServiceError, ServiceResult};

pub fn get_product_by_id<R>(repo: &R, product_id: i32) -> ServiceResult<Product>
where
    R: ProductReader + ?Sized,
{
    repo.get_product_by_id(product_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)
}

pub fn get_product_by_slug<R>(repo: &R, slug: &str, lang: Language) -> ServiceResult<LocalizedProduct>
where
    R: ProductReader + ?Sized,
{
    let product = repo
        .get_product_by_slug(slug)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    Ok(LocalizedProduct::new(product, lang))
}

/// Creates a product in an end category; duplicate SKUs are reported as conflicts.
pub fn create_product<R>(repo: &R, form: ProductForm) -> ServiceResult<Product>
where
    R: ProductWriter + ?Sized,
{
    let new_product = form
        .into_new_product()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let product = repo
        .create_product(&new_product)
        .map_err(ServiceError::from)?;

    log::info!("Created product {} ({})", product.id, product.sku);

    Ok(product)
}

pub fn update_product<R>(repo: &R, product_id: i32, form: ProductForm) -> ServiceResult<Product>
where
    R: ProductWriter + ?Sized,
{
    let update = form
        .into_update_product()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.update_product(product_id, &update)
        .map_err(ServiceError::from)
}

pub fn delete_product<R>(repo: &R, product_id: i32) -> ServiceResult<()>
where
    R: ProductWriter + ?Sized,
{
    repo.delete_product(product_id).map_err(ServiceError::from)
}
