use actix_web::{HttpResponse, Responder, delete, get, post, put, web};

use crate::forms::products::ProductForm;
use crate::repository::DieselRepository;
use crate::routes::{LangQuery, error_response, success};
use crate::services::products as product_service;

#[get("/products/{product_id:\\d+}")]
pub async fn get_product_by_id(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match product_service::get_product_by_id(repo.get_ref(), path.into_inner()) {
        Ok(product) => HttpResponse::Ok().json(product),
        Err(err) => error_response(err),
    }
}

#[get("/products/by-slug/{slug}")]
pub async fn get_product_by_slug(
    path: web::Path<String>,
    params: web::Query<LangQuery>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match product_service::get_product_by_slug(repo.get_ref(), &path, params.lang) {
        Ok(product) => HttpResponse::Ok().json(product),
        Err(err) => error_response(err),
    }
}

#[post("/products")]
pub async fn create_product(
    repo: web::Data<DieselRepository>,
    form: web::Json<ProductForm>,
) -> impl Responder {
    match product_service::create_product(repo.get_ref(), form.into_inner()) {
        Ok(product) => HttpResponse::Created().json(product),
        Err(err) => error_response(err),
    }
}

#[put("/products/{product_id:\\d+}")]
pub async fn update_product(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    form: web::Json<ProductForm>,
) -> impl Responder {
    match product_service::update_product(repo.get_ref(), path.into_inner(), form.into_inner()) {
        Ok(product) => HttpResponse::Ok().json(product),
        Err(err) => error_response(err),
    }
}

#[delete("/products/{product_id:\\d+}")]
pub async fn delete_product(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match product_service::delete_product(repo.get_ref(), path.into_inner()) {
        Ok(()) => success(),
        Err(err) => error_response(err),
    }
}
