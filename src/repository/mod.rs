use crate::db::{DbConnection, DbPool};
use crate::domain::brand::{Brand, NewBrand, UpdateBrand};
use crate::domain::category::{
    Category, CategoryNode, CategoryUpdated, NewCategory, UpdateCategory,
};
use crate::domain::product::{NewProduct, Product, ProductNode, UpdateProduct};

pub mod brand;
pub mod category;
pub mod errors;
pub mod product;

#[cfg(test)]
pub mod mock;

pub use errors::{InvariantViolation, RepositoryError, RepositoryResult};

#[derive(Clone)]
/// Diesel-backed repository implementation that wraps an r2d2 pool.
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository using the provided connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Level-by-level read access to the category tree.
///
/// None of these calls recurse; callers expand the tree one level at a time.
pub trait CategoryReader {
    /// Categories without a parent, at level 0.
    fn list_root_categories(&self) -> RepositoryResult<Vec<CategoryNode>>;
    /// Direct children of `parent_id`, tagged with `level + 1`.
    fn list_subcategories(&self, parent_id: i32, level: i32)
    -> RepositoryResult<Vec<CategoryNode>>;
    /// Products held by `category_id`, tagged with `level + 1`.
    fn list_category_products(
        &self,
        category_id: i32,
        level: i32,
    ) -> RepositoryResult<Vec<ProductNode>>;
    /// Every category with its counts; levels are not computed.
    fn list_all_categories(&self) -> RepositoryResult<Vec<CategoryNode>>;
    fn get_category_by_id(&self, category_id: i32) -> RepositoryResult<Option<Category>>;
    fn get_category_by_slug(&self, slug: &str) -> RepositoryResult<Option<Category>>;
}

/// Write operations over the category tree.
pub trait CategoryWriter {
    fn create_category(&self, new_category: &NewCategory) -> RepositoryResult<Category>;
    /// Replace translations and brand; cascades a changed brand to all descendants.
    fn update_category(
        &self,
        category_id: i32,
        updates: &UpdateCategory,
    ) -> RepositoryResult<CategoryUpdated>;
    /// Overwrite the brand of every descendant of `category_id`.
    fn cascade_brand(&self, category_id: i32, brand_id: Option<i32>) -> RepositoryResult<usize>;
    /// Reattach a category under another parent, rejecting cycles.
    fn move_category(&self, category_id: i32, parent_id: Option<i32>)
    -> RepositoryResult<Category>;
    /// Remove a category that has neither subcategories nor products.
    fn delete_category(&self, category_id: i32) -> RepositoryResult<()>;
}

pub trait ProductReader {
    fn get_product_by_id(&self, product_id: i32) -> RepositoryResult<Option<Product>>;
    fn get_product_by_slug(&self, slug: &str) -> RepositoryResult<Option<Product>>;
}

pub trait ProductWriter {
    fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
    fn update_product(
        &self,
        product_id: i32,
        updates: &UpdateProduct,
    ) -> RepositoryResult<Product>;
    fn delete_product(&self, product_id: i32) -> RepositoryResult<()>;
}

pub trait BrandReader {
    fn list_brands(&self) -> RepositoryResult<Vec<Brand>>;
    fn get_brand_by_id(&self, brand_id: i32) -> RepositoryResult<Option<Brand>>;
}

pub trait BrandWriter {
    fn create_brand(&self, new_brand: &NewBrand) -> RepositoryResult<Brand>;
    fn update_brand(&self, brand_id: i32, updates: &UpdateBrand) -> RepositoryResult<Brand>;
    /// Delete a brand, detaching it from every category that referenced it.
    fn delete_brand(&self, brand_id: i32) -> RepositoryResult<()>;
}
