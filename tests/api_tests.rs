//! HTTP API integration tests
//!
//! Spins up an in-memory actix app with the real services wired against a
//! temporary SQLite database, asserting on the response envelopes.

use std::sync::{Arc, Once};
use std::time::Duration as StdDuration;

use actix_web::http::StatusCode;
use actix_web::middleware::from_fn;
use actix_web::test::{self, TestRequest};
use actix_web::{web, App};
use serde_json::{json, Value};
use tempfile::TempDir;

use mylinks::analytics::CounterManager;
use mylinks::api::jwt::get_jwt_service;
use mylinks::api::middleware::AuthMiddleware;
use mylinks::api::services::{AnalyticsApi, PageApi};
use mylinks::config::init_config;
use mylinks::services::{AnalyticsService, PageService, TrackerService};
use mylinks::storage::SeaOrmStorage;

static INIT: Once = Once::new();

struct TestApp {
    _dir: TempDir,
    storage: Arc<SeaOrmStorage>,
    pages: web::Data<PageService>,
    analytics: web::Data<AnalyticsService>,
    tracker: web::Data<TrackerService>,
}

async fn test_app() -> TestApp {
    INIT.call_once(init_config);
    let dir = TempDir::new().expect("temp dir");
    let db_path = dir.path().join("api_test.db");
    let url = format!("sqlite://{}?mode=rwc", db_path.display());
    let storage = Arc::new(SeaOrmStorage::new(&url, "sqlite").await.expect("storage"));

    let counters = CounterManager::new(
        storage.as_counter_sink(),
        StdDuration::from_secs(3600),
        10_000,
    );
    let tracker = Arc::new(TrackerService::new(Arc::clone(&storage), counters.clone()));
    let pages = web::Data::new(PageService::new(Arc::clone(&storage), Arc::clone(&tracker)));
    let analytics = web::Data::new(AnalyticsService::new(Arc::clone(&storage), counters));
    let tracker = web::Data::from(tracker);

    TestApp {
        _dir: dir,
        storage,
        pages,
        analytics,
        tracker,
    }
}

macro_rules! init_routes {
    ($app:expr) => {
        test::init_service(
            App::new()
                .app_data($app.pages.clone())
                .app_data($app.analytics.clone())
                .app_data($app.tracker.clone())
                .service(
                    web::scope("/api/pages")
                        .route("/themes", web::get().to(PageApi::get_themes))
                        .service(
                            web::scope("/my-page")
                                .wrap(from_fn(AuthMiddleware::require_auth))
                                .route("", web::get().to(PageApi::my_page))
                                .route("", web::put().to(PageApi::update_page))
                                .route("/links", web::post().to(PageApi::add_link))
                                .route("/links/reorder", web::put().to(PageApi::reorder_links))
                                .route("/links/{id}", web::put().to(PageApi::update_link))
                                .route("/links/{id}", web::delete().to(PageApi::delete_link)),
                        )
                        .route("/{username}", web::get().to(PageApi::get_public_page))
                        .route(
                            "/{username}/links/{link_id}/click",
                            web::post().to(PageApi::click_link),
                        ),
                )
                .service(
                    web::scope("/api/analytics")
                        .route("/track/{username}", web::post().to(AnalyticsApi::track))
                        .service(
                            web::scope("")
                                .wrap(from_fn(AuthMiddleware::require_auth))
                                .route("/summary", web::get().to(AnalyticsApi::summary))
                                .route("/detailed", web::get().to(AnalyticsApi::detailed))
                                .route("/reconcile", web::post().to(AnalyticsApi::reconcile)),
                        ),
                ),
        )
        .await
    };
}

async fn fixture_user(app: &TestApp, username: &str) -> (i64, String) {
    let user = app
        .storage
        .create_user(
            &format!("{}@example.com", username),
            username,
            "hash",
            username,
        )
        .await
        .expect("user");
    app.storage
        .create_page(user.id, username)
        .await
        .expect("page");
    let token = get_jwt_service()
        .generate_access_token(user.id)
        .expect("token");
    (user.id, token)
}

#[actix_rt::test]
async fn public_page_round_trip() {
    let app = test_app().await;
    fixture_user(&app, "alice").await;
    let service = init_routes!(app);

    let req = TestRequest::get()
        .uri("/api/pages/alice")
        .insert_header(("User-Agent", "Mozilla/5.0 (Windows NT 10.0)"))
        .to_request();
    let resp = test::call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 0);
    assert_eq!(body["data"]["username"], "alice");
    assert!(body["data"]["style"]["background"].is_string());

    let req = TestRequest::get().uri("/api/pages/nobody").to_request();
    let resp = test::call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 404);
}

#[actix_rt::test]
async fn themes_listing_is_public() {
    let app = test_app().await;
    let service = init_routes!(app);

    let req = TestRequest::get().uri("/api/pages/themes").to_request();
    let resp = test::call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 0);
    assert_eq!(body["data"].as_array().expect("array").len(), 9);
}

#[actix_rt::test]
async fn editor_requires_bearer_token() {
    let app = test_app().await;
    let (_, token) = fixture_user(&app, "bob").await;
    let service = init_routes!(app);

    let req = TestRequest::get().uri("/api/pages/my-page").to_request();
    let resp = test::call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = TestRequest::get()
        .uri("/api/pages/my-page")
        .insert_header(("Authorization", "Bearer not-a-token"))
        .to_request();
    let resp = test::call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = TestRequest::get()
        .uri("/api/pages/my-page")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 0);
    assert_eq!(body["data"]["page"]["username"], "bob");
}

#[actix_rt::test]
async fn link_management_over_http() {
    let app = test_app().await;
    let (_, token) = fixture_user(&app, "carol").await;
    let service = init_routes!(app);
    let auth = ("Authorization", format!("Bearer {}", token));

    // Create two links
    let mut ids = Vec::new();
    for title in ["First", "Second"] {
        let req = TestRequest::post()
            .uri("/api/pages/my-page/links")
            .insert_header(auth.clone())
            .set_json(json!({ "title": title, "url": "https://example.com" }))
            .to_request();
        let resp = test::call_service(&service, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        ids.push(body["data"]["id"].as_i64().expect("id"));
    }

    // Invalid URLs are rejected with a validation error
    let req = TestRequest::post()
        .uri("/api/pages/my-page/links")
        .insert_header(auth.clone())
        .set_json(json!({ "title": "bad", "url": "javascript:alert(1)" }))
        .to_request();
    let resp = test::call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Reorder; the literal segment must win over /links/{id}
    let req = TestRequest::put()
        .uri("/api/pages/my-page/links/reorder")
        .insert_header(auth.clone())
        .set_json(json!({ "link_ids": [ids[1], ids[0]] }))
        .to_request();
    let resp = test::call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"][0]["id"].as_i64(), Some(ids[1]));

    // Delete one
    let req = TestRequest::delete()
        .uri(&format!("/api/pages/my-page/links/{}", ids[0]))
        .insert_header(auth.clone())
        .to_request();
    let resp = test::call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["deleted"], true);
}

#[actix_rt::test]
async fn track_and_analytics_endpoints() {
    let app = test_app().await;
    let (_, token) = fixture_user(&app, "dave").await;
    let service = init_routes!(app);
    let auth = ("Authorization", format!("Bearer {}", token));

    let req = TestRequest::post()
        .uri("/api/analytics/track/dave")
        .insert_header(("User-Agent", "Mozilla/5.0 (iPhone) Mobile/15E148"))
        .set_json(json!({ "type": "view", "referrer": "https://t.co" }))
        .to_request();
    let resp = test::call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["tracked"], true);

    // Unknown event types are rejected
    let req = TestRequest::post()
        .uri("/api/analytics/track/dave")
        .set_json(json!({ "type": "hover" }))
        .to_request();
    let resp = test::call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Reconcile flushes the buffered counter into the summary
    let req = TestRequest::post()
        .uri("/api/analytics/reconcile")
        .insert_header(auth.clone())
        .to_request();
    let resp = test::call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = TestRequest::get()
        .uri("/api/analytics/summary")
        .insert_header(auth.clone())
        .to_request();
    let resp = test::call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["total_views"], 1);

    let req = TestRequest::get()
        .uri("/api/analytics/detailed?days=30")
        .insert_header(auth)
        .to_request();
    let resp = test::call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["device_breakdown"]["mobile"], 1);
    assert_eq!(body["data"]["top_referrers"][0]["referrer"], "https://t.co");
}
