use crate::domain::category::{Category, CategoryNode, FlatCategory, LocalizedCategory};
use crate::domain::product::ProductNode;
use crate::domain::translation::Language;
use crate::forms::categories::{AddCategoryForm, EditCategoryForm, MoveCategoryForm};
use crate::repository::{CategoryReader, CategoryWriter};
use crate::services::{ServiceError, ServiceResult};

/// Root level of the category forest.
pub fn get_root_categories<R>(repo: &R) -> ServiceResult<Vec<CategoryNode>>
where
    R: CategoryReader + ?Sized,
{
    repo.list_root_categories().map_err(ServiceError::from)
}

/// Direct subcategories of `parent_id`; `level` is the parent's own level.
pub fn get_subcategories<R>(repo: &R, parent_id: i32, level: i32) -> ServiceResult<Vec<CategoryNode>>
where
    R: CategoryReader + ?Sized,
{
    repo.list_subcategories(parent_id, level)
        .map_err(ServiceError::from)
}

/// Products held by `category_id`; `level` is the category's own level.
pub fn get_products_by_category_id<R>(
    repo: &R,
    category_id: i32,
    level: i32,
) -> ServiceResult<Vec<ProductNode>>
where
    R: CategoryReader + ?Sized,
{
    repo.list_category_products(category_id, level)
        .map_err(ServiceError::from)
}

/// Categories that may receive subcategories, i.e. those without products.
pub fn get_all_flat_categories<R>(repo: &R, lang: Language) -> ServiceResult<Vec<FlatCategory>>
where
    R: CategoryReader + ?Sized,
{
    let nodes = repo.list_all_categories().map_err(ServiceError::from)?;

    Ok(nodes
        .iter()
        .filter(|node| node.product_count == 0)
        .map(|node| FlatCategory::from_node(node, lang))
        .collect())
}

/// Every category, flagged with whether it may hold products.
pub fn get_all_flat_categories_for_product<R>(
    repo: &R,
    lang: Language,
) -> ServiceResult<Vec<FlatCategory>>
where
    R: CategoryReader + ?Sized,
{
    let nodes = repo.list_all_categories().map_err(ServiceError::from)?;

    Ok(nodes
        .iter()
        .map(|node| FlatCategory::from_node(node, lang))
        .collect())
}

pub fn get_category_by_id<R>(repo: &R, category_id: i32) -> ServiceResult<Option<Category>>
where
    R: CategoryReader + ?Sized,
{
    repo.get_category_by_id(category_id)
        .map_err(ServiceError::from)
}

/// Storefront lookup; missing slugs are reported as not found.
pub fn get_category_by_slug<R>(repo: &R, slug: &str, lang: Language) -> ServiceResult<LocalizedCategory>
where
    R: CategoryReader + ?Sized,
{
    let category = repo
        .get_category_by_slug(slug)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    Ok(LocalizedCategory::new(category, lang))
}

pub fn create_category<R>(repo: &R, form: AddCategoryForm) -> ServiceResult<Category>
where
    R: CategoryWriter + ?Sized,
{
    let new_category = form
        .into_new_category()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let category = repo
        .create_category(&new_category)
        .map_err(ServiceError::from)?;

    log::info!("Created category {} ({})", category.id, category.slug);

    Ok(category)
}

/// Replace translations and brand; a changed brand cascades to every descendant.
pub fn update_category<R>(repo: &R, category_id: i32, form: EditCategoryForm) -> ServiceResult<Category>
where
    R: CategoryWriter + ?Sized,
{
    let update = form
        .into_update_category()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let outcome = repo
        .update_category(category_id, &update)
        .map_err(ServiceError::from)?;

    if outcome.cascaded > 0 {
        log::info!(
            "Brand of category {category_id} cascaded to {} descendants",
            outcome.cascaded
        );
    }

    Ok(outcome.category)
}

pub fn move_category<R>(repo: &R, category_id: i32, form: MoveCategoryForm) -> ServiceResult<Category>
where
    R: CategoryWriter + ?Sized,
{
    let parent_id = form
        .into_parent_id()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.move_category(category_id, parent_id)
        .map_err(ServiceError::from)
}

/// Delete a category that has neither subcategories nor products.
pub fn delete_category<R>(repo: &R, category_id: i32) -> ServiceResult<()>
where
    R: CategoryWriter + ?Sized,
{
    repo.delete_category(category_id)
        .map_err(ServiceError::from)
}
