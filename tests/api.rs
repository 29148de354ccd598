use actix_web::{App, http::StatusCode, test, web};
use serde_json::{Value, json};

use frostline_catalog::routes;

mod common;

#[actix_web::test]
async fn category_and_product_endpoints_report_typed_errors() {
    let test_db = common::TestDb::new("api_typed_errors.db");
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(test_db.repo()))
            .configure(routes::configure),
    )
    .await;

    let request = test::TestRequest::post()
        .uri("/api/v1/categories")
        .set_json(json!({"translations": [{"language": "uk", "name": "Насоси"}]}))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let category: Value = test::read_body_json(response).await;
    assert_eq!(category["slug"], "nasosi");
    let category_id = category["id"].as_i64().expect("category id");

    let product = json!({
        "sku": "P-100",
        "main_image": "img/main.jpg",
        "gallery": ["img/1.jpg"],
        "price_cents": 49900,
        "availability": "IN_STOCK",
        "category_id": category_id,
        "translations": [{"language": "uk", "name": "Насос"}]
    });

    let request = test::TestRequest::post()
        .uri("/api/v1/products")
        .set_json(&product)
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let request = test::TestRequest::post()
        .uri("/api/v1/products")
        .set_json(&product)
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["error"], "conflict");
    assert_eq!(body["field"], "sku");

    let request = test::TestRequest::delete()
        .uri(&format!("/api/v1/categories/{category_id}"))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["error"], "invariant");

    let request = test::TestRequest::get()
        .uri("/api/v1/products/4242")
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let request = test::TestRequest::post()
        .uri("/api/v1/categories")
        .set_json(json!({"translations": [{"language": "en", "name": "Pumps"}]}))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[actix_web::test]
async fn tree_endpoints_return_levels() {
    let test_db = common::TestDb::new("api_tree_levels.db");
    let repo = test_db.repo();
    let root = common::category(&repo, "Обладнання", None);
    common::category(&repo, "Компресори", Some(root.id));

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(repo))
            .configure(routes::configure),
    )
    .await;

    let request = test::TestRequest::get()
        .uri("/api/v1/categories/roots")
        .to_request();
    let roots: Value = test::call_and_read_body_json(&app, request).await;
    assert_eq!(roots[0]["child_count"], 1);
    assert_eq!(roots[0]["level"], 0);

    let request = test::TestRequest::get()
        .uri(&format!("/api/v1/categories/{}/subcategories?level=0", root.id))
        .to_request();
    let children: Value = test::call_and_read_body_json(&app, request).await;
    assert_eq!(children[0]["level"], 1);
    assert_eq!(children[0]["is_end_category"], true);

    let request = test::TestRequest::get()
        .uri("/api/v1/categories/flat?lang=en")
        .to_request();
    let flat: Value = test::call_and_read_body_json(&app, request).await;
    assert_eq!(flat.as_array().map(Vec::len), Some(2));

    let request = test::TestRequest::get()
        .uri("/api/v1/categories/999")
        .to_request();
    let missing: Value = test::call_and_read_body_json(&app, request).await;
    assert!(missing.is_null());
}

#[actix_web::test]
async fn malformed_payloads_are_validation_errors() {
    let test_db = common::TestDb::new("api_malformed_payloads.db");
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(test_db.repo()))
            .configure(routes::configure),
    )
    .await;

    let request = test::TestRequest::post()
        .uri("/api/v1/categories")
        .set_json(json!({"translations": [{"language": "de", "name": "Pumpen"}]}))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["error"], "validation");
    assert!(body["message"].is_string());

    let request = test::TestRequest::post()
        .uri("/api/v1/products")
        .set_json(json!({"sku": "P-1", "availability": "SOMETIMES"}))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let request = test::TestRequest::get()
        .uri("/api/v1/categories/flat?lang=de")
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["error"], "validation");
}
