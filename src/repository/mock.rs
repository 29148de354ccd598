use mockall::mock;

use super::{
    BrandReader, BrandWriter, CategoryReader, CategoryWriter, ProductReader, ProductWriter,
    RepositoryResult,
};
use crate::domain::{
    brand::{Brand, NewBrand, UpdateBrand},
    category::{Category, CategoryNode, CategoryUpdated, NewCategory, UpdateCategory},
    product::{NewProduct, Product, ProductNode, UpdateProduct},
};

mock! {
    pub CategoryReader {}

    impl CategoryReader for CategoryReader {
        fn list_root_categories(&self) -> RepositoryResult<Vec<CategoryNode>>;
        fn list_subcategories(&self, parent_id: i32, level: i32) -> RepositoryResult<Vec<CategoryNode>>;
        fn list_category_products(&self, category_id: i32, level: i32) -> RepositoryResult<Vec<ProductNode>>;
        fn list_all_categories(&self) -> RepositoryResult<Vec<CategoryNode>>;
        fn get_category_by_id(&self, category_id: i32) -> RepositoryResult<Option<Category>>;
        fn get_category_by_slug(&self, slug: &str) -> RepositoryResult<Option<Category>>;
    }
}

mock! {
    pub CategoryWriter {}

    impl CategoryWriter for CategoryWriter {
        fn create_category(&self, new_category: &NewCategory) -> RepositoryResult<Category>;
        fn update_category(&self, category_id: i32, updates: &UpdateCategory) -> RepositoryResult<CategoryUpdated>;
        fn cascade_brand(&self, category_id: i32, brand_id: Option<i32>) -> RepositoryResult<usize>;
        fn move_category(&self, category_id: i32, parent_id: Option<i32>) -> RepositoryResult<Category>;
        fn delete_category(&self, category_id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub ProductReader {}

    impl ProductReader for ProductReader {
        fn get_product_by_id(&self, product_id: i32) -> RepositoryResult<Option<Product>>;
        fn get_product_by_slug(&self, slug: &str) -> RepositoryResult<Option<Product>>;
    }
}

mock! {
    pub ProductWriter {}

    impl ProductWriter for ProductWriter {
        fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
        fn update_product(&self, product_id: i32, updates: &UpdateProduct) -> RepositoryResult<Product>;
        fn delete_product(&self, product_id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub BrandReader {}

    impl BrandReader for BrandReader {
        fn list_brands(&self) -> RepositoryResult<Vec<Brand>>;
        fn get_brand_by_id(&self, brand_id: i32) -> RepositoryResult<Option<Brand>>;
    }
}

mock! {
    pub BrandWriter {}

    impl BrandWriter for BrandWriter {
        fn create_brand(&self, new_brand: &NewBrand) -> RepositoryResult<Brand>;
        fn update_brand(&self, brand_id: i32, updates: &UpdateBrand) -> RepositoryResult<Brand>;
        fn delete_brand(&self, brand_id: i32) -> RepositoryResult<()>;
    }
}
