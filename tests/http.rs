mod common;

use actix_web::http::{StatusCode, header};
use actix_web::{App, test};
use common::*;
use perfume_admin::entities::OrderStatus;
use perfume_admin::handlers;
use perfume_admin::middlewares::AuthMiddleware;
use perfume_admin::services::ViewCache;
use perfume_admin::swagger::swagger_config;
use perfume_admin::utils::JwtService;
use serde_json::Value;

const SECRET: &str = "integration-secret";

fn jwt() -> JwtService {
    JwtService::new(SECRET, 3600)
}

fn bearer(role: &str) -> (header::HeaderName, String) {
    let token = jwt()
        .issue_admin_token("1", "admin@example.com", role)
        .unwrap();
    (header::AUTHORIZATION, format!("Bearer {token}"))
}

macro_rules! admin_app {
    ($services:expr) => {
        test::init_service(
            App::new()
                .wrap(AuthMiddleware::new(jwt(), "/login"))
                .configure(|cfg| $services.app_data(cfg))
                .configure(swagger_config)
                .configure(handlers::api_config),
        )
        .await
    };
}

#[actix_web::test]
async fn test_missing_token_is_unauthorized() {
    let (services, _db) = services().await;
    let app = admin_app!(services);

    let req = test::TestRequest::get().uri("/api/orders").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "AUTH_ERROR");
}

#[actix_web::test]
async fn test_browser_is_redirected_to_login() {
    let (services, _db) = services().await;
    let app = admin_app!(services);

    let req = test::TestRequest::get()
        .uri("/api/dashboard")
        .insert_header((header::ACCEPT, "text/html,application/xhtml+xml"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/login");
}

#[actix_web::test]
async fn test_non_admin_role_is_forbidden() {
    let (services, _db) = services().await;
    let app = admin_app!(services);

    let req = test::TestRequest::get()
        .uri("/api/users")
        .insert_header(bearer("customer"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_api_docs_are_public() {
    let (services, _db) = services().await;
    let app = admin_app!(services);

    let req = test::TestRequest::get()
        .uri("/api-docs/openapi.json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_dashboard_envelope() {
    let (services, db) = services().await;
    seed_order(&db, "Aziza", OrderStatus::Paid, vec![], 150_000).await;
    let app = admin_app!(services);

    let req = test::TestRequest::get()
        .uri("/api/dashboard")
        .insert_header(bearer("superadmin"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["orders"]["totalOrders"], 1);
    assert_eq!(body["data"]["orders"]["totalRevenue"], 150_000);
    assert_eq!(body["data"]["users"]["totalUsers"], 0);
}

#[actix_web::test]
async fn test_invalid_product_form_is_rejected_without_write() {
    let (services, db) = services().await;
    let category = seed_category(&db, "Floral").await;
    let app = admin_app!(services);

    let category_id = category.id.to_string();
    let req = test::TestRequest::post()
        .uri("/api/products")
        .insert_header(bearer("admin"))
        .set_form([
            ("name", ""),
            ("description", "Soft rose"),
            ("price", "250000"),
            ("imageUrl", "https://cdn.example.com/rose.jpg"),
            ("category", category_id.as_str()),
            ("brand", "Maison"),
            ("volume", "50ml"),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["fieldErrors"]["name"][0], "Name is required");

    let req = test::TestRequest::get()
        .uri("/api/products")
        .insert_header(bearer("admin"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["pagination"]["total"], 0);
}

#[actix_web::test]
async fn test_create_product_flags() {
    let (services, db) = services().await;
    let category = seed_category(&db, "Woody").await;
    let app = admin_app!(services);

    let category_id = category.id.to_string();
    let req = test::TestRequest::post()
        .uri("/api/products")
        .insert_header(bearer("admin"))
        .set_form([
            ("name", "Cedar"),
            ("description", "Dry cedar"),
            ("price", "410000"),
            ("imageUrl", "https://cdn.example.com/cedar.jpg"),
            ("category", category_id.as_str()),
            ("brand", "Maison"),
            ("volume", "100ml"),
            ("inStock", "true"),
            ("featured", "on"),
        ])
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["price"], 410_000);
    assert_eq!(body["data"]["inStock"], true);
    assert_eq!(body["data"]["featured"], false);
    assert_eq!(body["data"]["category"]["name"], "Woody");
}

#[actix_web::test]
async fn test_update_writes_to_route_id_only() {
    let (services, db) = services().await;
    let target = seed_category(&db, "Citrus").await;
    let other = seed_category(&db, "Amber").await;
    let app = admin_app!(services);

    let other_id = other.id.to_string();
    let req = test::TestRequest::put()
        .uri(&format!("/api/categories/{}", target.id))
        .insert_header(bearer("admin"))
        .set_form([("name", "Citrus Fresh"), ("id", other_id.as_str())])
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["id"], target.id);
    assert_eq!(body["data"]["name"], "Citrus Fresh");

    let req = test::TestRequest::get()
        .uri(&format!("/api/categories/{}", other.id))
        .insert_header(bearer("admin"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["name"], "Amber");
}

#[actix_web::test]
async fn test_referenced_category_delete_conflicts() {
    let (services, db) = services().await;
    let category = seed_category(&db, "Floral").await;
    seed_product(&db, "Rose", Some(category.id)).await;
    let app = admin_app!(services);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/categories/{}", category.id))
        .insert_header(bearer("admin"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["error"]["message"],
        "Cannot delete category. It is used in 1 products."
    );
}

#[actix_web::test]
async fn test_missing_and_malformed_ids() {
    let (services, _db) = services().await;
    let app = admin_app!(services);

    let req = test::TestRequest::get()
        .uri("/api/categories/999")
        .insert_header(bearer("admin"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get()
        .uri("/api/products/abc")
        .insert_header(bearer("admin"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["message"], "Failed to fetch product");
    assert!(!body.to_string().contains("abc"));
}

#[actix_web::test]
async fn test_mutation_invalidates_cached_views() {
    let (services, db) = services_with_cache(ViewCache::new(60)).await;
    seed_category(&db, "Citrus").await;
    let app = admin_app!(services);

    let list = || {
        test::TestRequest::get()
            .uri("/api/categories?page=1")
            .insert_header(bearer("admin"))
            .to_request()
    };

    let body: Value = test::call_and_read_body_json(&app, list()).await;
    assert_eq!(body["data"]["pagination"]["total"], 1);

    // categories are only written through this service, so a row inserted
    // directly stays hidden until the next mutation
    seed_category(&db, "Amber").await;
    let body: Value = test::call_and_read_body_json(&app, list()).await;
    assert_eq!(body["data"]["pagination"]["total"], 1);

    let req = test::TestRequest::post()
        .uri("/api/categories")
        .insert_header(bearer("admin"))
        .set_form([("name", "Oud")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::call_and_read_body_json(&app, list()).await;
    assert_eq!(body["data"]["pagination"]["total"], 3);
}

#[actix_web::test]
async fn test_bot_written_orders_are_never_cached() {
    let (services, db) = services_with_cache(ViewCache::new(60)).await;
    let app = admin_app!(services);

    let get = |uri: &str| {
        test::TestRequest::get()
            .uri(uri)
            .insert_header(bearer("admin"))
            .to_request()
    };

    let body: Value = test::call_and_read_body_json(&app, get("/api/orders")).await;
    assert_eq!(body["data"]["pagination"]["total"], 0);
    let body: Value = test::call_and_read_body_json(&app, get("/api/orders/stats")).await;
    assert_eq!(body["data"]["unreadOrders"], 0);
    let body: Value = test::call_and_read_body_json(&app, get("/api/dashboard")).await;
    assert_eq!(body["data"]["orders"]["totalOrders"], 0);

    // the bot inserts orders straight into the database
    seed_order(&db, "Aziza", OrderStatus::Pending, vec![], 90_000).await;

    let body: Value = test::call_and_read_body_json(&app, get("/api/orders")).await;
    assert_eq!(body["data"]["pagination"]["total"], 1);
    let body: Value = test::call_and_read_body_json(&app, get("/api/orders/stats")).await;
    assert_eq!(body["data"]["unreadOrders"], 1);
    let body: Value = test::call_and_read_body_json(&app, get("/api/dashboard")).await;
    assert_eq!(body["data"]["orders"]["totalOrders"], 1);
}

#[actix_web::test]
async fn test_rejected_extractors_use_envelope() {
    let (services, _db) = services().await;
    let app = admin_app!(services);

    let req = test::TestRequest::post()
        .uri("/api/categories")
        .insert_header(bearer("admin"))
        .set_json(serde_json::json!({"name": "Oud"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");

    let req = test::TestRequest::get()
        .uri("/api/orders?page=1&page=2")
        .insert_header(bearer("admin"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[actix_web::test]
async fn test_order_status_form() {
    let (services, db) = services().await;
    let order = seed_order(&db, "Aziza", OrderStatus::Pending, vec![], 0).await;
    let app = admin_app!(services);
    let uri = format!("/api/orders/{}/status", order.id);

    let req = test::TestRequest::patch()
        .uri(&uri)
        .insert_header(bearer("admin"))
        .set_form([("status", "shipped")])
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["status"], "shipped");

    let req = test::TestRequest::patch()
        .uri(&uri)
        .insert_header(bearer("admin"))
        .set_form([("status", "lost")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["fieldErrors"]["status"].is_array());

    let req = test::TestRequest::post()
        .uri(&format!("/api/orders/{}/read", order.id))
        .insert_header(bearer("admin"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["isRead"], true);
    assert_eq!(body["data"]["status"], "shipped");
}

#[actix_web::test]
async fn test_payout_form() {
    let (services, db) = services().await;
    seed_user(&db, "4242", "referrer", Some("8600 0000 0000 0001"), 75_000).await;
    let app = admin_app!(services);

    let req = test::TestRequest::post()
        .uri("/api/payouts/4242")
        .insert_header(bearer("admin"))
        .set_form([("imageUrl", "https://cdn.example.com/receipt.jpg")])
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["user"]["referralBonus"], 0);
    assert_eq!(body["data"]["check"]["name"], "image.jpg");

    let req = test::TestRequest::get()
        .uri("/api/checks?chatId=4242")
        .insert_header(bearer("admin"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["pagination"]["total"], 1);

    let req = test::TestRequest::post()
        .uri("/api/payouts/9999")
        .insert_header(bearer("admin"))
        .set_form([("imageUrl", "https://cdn.example.com/receipt.jpg")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
