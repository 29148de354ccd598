use actix_web::{HttpResponse, Responder, delete, get, post, put, web};

use crate::forms::brands::BrandForm;
use crate::repository::DieselRepository;
use crate::routes::{LangQuery, error_response, success};
use crate::services::brands as brand_service;

#[get("/brands")]
pub async fn list_brands(
    params: web::Query<LangQuery>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match brand_service::list_brands(repo.get_ref(), params.lang) {
        Ok(brands) => HttpResponse::Ok().json(brands),
        Err(err) => error_response(err),
    }
}

#[get("/brands/{brand_id:\\d+}")]
pub async fn get_brand_by_id(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match brand_service::get_brand_by_id(repo.get_ref(), path.into_inner()) {
        Ok(brand) => HttpResponse::Ok().json(brand),
        Err(err) => error_response(err),
    }
}

#[post("/brands")]
pub async fn create_brand(
    repo: web::Data<DieselRepository>,
    form: web::Json<BrandForm>,
) -> impl Responder {
    match brand_service::create_brand(repo.get_ref(), form.into_inner()) {
        Ok(brand) => HttpResponse::Created().json(brand),
        Err(err) => error_response(err),
    }
}

#[put("/brands/{brand_id:\\d+}")]
pub async fn update_brand(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    form: web::Json<BrandForm>,
) -> impl Responder {
    match brand_service::update_brand(repo.get_ref(), path.into_inner(), form.into_inner()) {
        Ok(brand) => HttpResponse::Ok().json(brand),
        Err(err) => error_response(err),
    }
}

#[delete("/brands/{brand_id:\\d+}")]
/// Deletes the brand and detaches it from every category that referenced it.
pub async fn delete_brand(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match brand_service::delete_brand(repo.get_ref(), path.into_inner()) {
        Ok(()) => success(),
        Err(err) => error_response(err),
    }
}
