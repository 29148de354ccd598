use actix_web::{HttpResponse, Responder, delete, get, post, put, web};

use crate::forms::categories::{AddCategoryForm, EditCategoryForm, MoveCategoryForm};
use crate::repository::DieselRepository;
use crate::routes::{LangQuery, LevelQuery, error_response, success};
use crate::services::categories as category_service;

#[get("/categories/roots")]
pub async fn get_root_categories(repo: web::Data<DieselRepository>) -> impl Responder {
    match category_service::get_root_categories(repo.get_ref()) {
        Ok(nodes) => HttpResponse::Ok().json(nodes),
        Err(err) => error_response(err),
    }
}

#[get("/categories/{parent_id:\\d+}/subcategories")]
/// Children of one tree row; `level` is the level of the row being expanded.
pub async fn get_subcategories(
    path: web::Path<i32>,
    params: web::Query<LevelQuery>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match category_service::get_subcategories(repo.get_ref(), path.into_inner(), params.level) {
        Ok(nodes) => HttpResponse::Ok().json(nodes),
        Err(err) => error_response(err),
    }
}

#[get("/categories/{category_id:\\d+}/products")]
pub async fn get_products_by_category_id(
    path: web::Path<i32>,
    params: web::Query<LevelQuery>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match category_service::get_products_by_category_id(
        repo.get_ref(),
        path.into_inner(),
        params.level,
    ) {
        Ok(nodes) => HttpResponse::Ok().json(nodes),
        Err(err) => error_response(err),
    }
}

#[get("/categories/flat")]
/// Parent selector: categories that hold no products.
pub async fn get_all_flat_categories(
    params: web::Query<LangQuery>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match category_service::get_all_flat_categories(repo.get_ref(), params.lang) {
        Ok(categories) => HttpResponse::Ok().json(categories),
        Err(err) => error_response(err),
    }
}

#[get("/categories/flat-for-product")]
/// Product category selector: every category with its end-category flag.
pub async fn get_all_flat_categories_for_product(
    params: web::Query<LangQuery>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match category_service::get_all_flat_categories_for_product(repo.get_ref(), params.lang) {
        Ok(categories) => HttpResponse::Ok().json(categories),
        Err(err) => error_response(err),
    }
}

#[get("/categories/{category_id:\\d+}")]
/// Returns the category or JSON `null`.
pub async fn get_category_by_id(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match category_service::get_category_by_id(repo.get_ref(), path.into_inner()) {
        Ok(category) => HttpResponse::Ok().json(category),
        Err(err) => error_response(err),
    }
}

#[get("/categories/by-slug/{slug}")]
pub async fn get_category_by_slug(
    path: web::Path<String>,
    params: web::Query<LangQuery>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match category_service::get_category_by_slug(repo.get_ref(), &path, params.lang) {
        Ok(category) => HttpResponse::Ok().json(category),
        Err(err) => error_response(err),
    }
}

#[post("/categories")]
pub async fn create_category(
    repo: web::Data<DieselRepository>,
    form: web::Json<AddCategoryForm>,
) -> impl Responder {
    match category_service::create_category(repo.get_ref(), form.into_inner()) {
        Ok(category) => HttpResponse::Created().json(category),
        Err(err) => error_response(err),
    }
}

#[put("/categories/{category_id:\\d+}")]
pub async fn update_category(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    form: web::Json<EditCategoryForm>,
) -> impl Responder {
    match category_service::update_category(repo.get_ref(), path.into_inner(), form.into_inner()) {
        Ok(_) => success(),
        Err(err) => error_response(err),
    }
}

#[post("/categories/{category_id:\\d+}/move")]
pub async fn move_category(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    form: web::Json<MoveCategoryForm>,
) -> impl Responder {
    match category_service::move_category(repo.get_ref(), path.into_inner(), form.into_inner()) {
        Ok(category) => HttpResponse::Ok().json(category),
        Err(err) => error_response(err),
    }
}

#[delete("/categories/{category_id:\\d+}")]
pub async fn delete_category(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match category_service::delete_category(repo.get_ref(), path.into_inner()) {
        Ok(()) => success(),
        Err(err) => error_response(err),
    }
}
