use actix_web::error::{InternalError, JsonPayloadError, QueryPayloadError};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::{Deserialize, Serialize};

use crate::domain::translation::Language;
use crate::services::ServiceError;

pub mod brands;
pub mod categories;
pub mod products;

/// `?lang=` selector; falls back to the primary language.
#[derive(Debug, Default, Deserialize)]
pub struct LangQuery {
    #[serde(default)]
    pub lang: Language,
}

/// `?level=` carried by lazy tree requests; the level of the row being expanded.
#[derive(Debug, Default, Deserialize)]
pub struct LevelQuery {
    #[serde(default)]
    pub level: i32,
}

#[derive(Debug, Serialize)]
pub struct SuccessBody {
    pub success: bool,
}

pub(crate) fn success() -> HttpResponse {
    HttpResponse::Ok().json(SuccessBody { success: true })
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<&'static str>,
    message: String,
}

/// Render a service failure as a typed JSON error.
pub(crate) fn error_response(err: ServiceError) -> HttpResponse {
    let (status, body) = match err {
        ServiceError::Form(message) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            ErrorBody {
                error: "validation",
                field: None,
                message,
            },
        ),
        ServiceError::NotFound => (
            StatusCode::NOT_FOUND,
            ErrorBody {
                error: "not_found",
                field: None,
                message: "record not found".to_string(),
            },
        ),
        ServiceError::Conflict { field, message } => (
            StatusCode::CONFLICT,
            ErrorBody {
                error: "conflict",
                field: Some(field),
                message,
            },
        ),
        ServiceError::Invariant(message) => (
            StatusCode::CONFLICT,
            ErrorBody {
                error: "invariant",
                field: None,
                message,
            },
        ),
        ServiceError::Internal(details) => {
            log::error!("Request failed: {details}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody {
                    error: "internal",
                    field: None,
                    message: "something went wrong, try again".to_string(),
                },
            )
        }
    };

    HttpResponse::build(status).json(body)
}

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = error_response(ServiceError::Form(err.to_string()));
    InternalError::from_response(err, response).into()
}

fn query_error(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = error_response(ServiceError::Form(err.to_string()));
    InternalError::from_response(err, response).into()
}

/// Mount every catalog endpoint under `/api/v1`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .app_data(web::JsonConfig::default().error_handler(json_error))
            .app_data(web::QueryConfig::default().error_handler(query_error))
            .service(categories::get_root_categories)
            .service(categories::get_all_flat_categories)
            .service(categories::get_all_flat_categories_for_product)
            .service(categories::get_category_by_slug)
            .service(categories::get_subcategories)
            .service(categories::get_products_by_category_id)
            .service(categories::get_category_by_id)
            .service(categories::create_category)
            .service(categories::update_category)
            .service(categories::move_category)
            .service(categories::delete_category)
            .service(products::get_product_by_slug)
            .service(products::get_product_by_id)
            .service(products::create_product)
            .service(products::update_product)
            .service(products::delete_product)
            .service(brands::list_brands)
            .service(brands::get_brand_by_id)
            .service(brands::create_brand)
            .service(brands::update_brand)
            .service(brands::delete_brand),
    );
}
