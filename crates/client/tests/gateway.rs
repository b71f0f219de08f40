//! Integration tests for the API gateway using wiremock HTTP mocks.
//!
//! Covers credential injection (bearer and init-data fallback), the
//! one-shot 401 refresh-and-retry, error normalization, and catalog
//! caching.

use blossom_client::api::{ApiClient, ProductsFilter};
use blossom_client::config::normalize_base_url;
use blossom_client::storage::Storage;
use blossom_client::stores::SessionStore;
use blossom_client::telegram::TelegramEnv;
use blossom_core::{AuthTokens, ShopUser, TelegramId, UserId};
use secrecy::SecretString;
use wiremock::matchers::{body_json, header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_user() -> ShopUser {
    ShopUser {
        id: UserId::new(1),
        telegram_id: TelegramId::new(99),
        first_name: "Anna".to_string(),
        last_name: None,
        username: Some("anna".to_string()),
    }
}

fn test_tokens() -> AuthTokens {
    AuthTokens {
        access: "access-1".to_string(),
        refresh: "refresh-1".to_string(),
    }
}

fn sample_product(id: i64) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "title": format!("Bouquet {id}"),
        "slug": format!("bouquet-{id}"),
        "price": 150_000,
        "price_display": "1 500 ₽",
        "has_discount": false,
        "is_unlimited": true,
        "is_available": true
    })
}

fn product_page(products: &[serde_json::Value]) -> serde_json::Value {
    serde_json::json!({
        "count": products.len(),
        "next": null,
        "previous": null,
        "results": products
    })
}

fn sample_order_page() -> serde_json::Value {
    serde_json::json!({
        "count": 1,
        "next": null,
        "previous": null,
        "results": [{
            "id": 7,
            "status": "new",
            "status_display": "Новый",
            "payment_method": "link_after_order",
            "payment_method_display": "Ссылка после заказа",
            "total": 405_000,
            "total_display": "4 050 ₽",
            "items_count": 3,
            "customer_name": "Anna",
            "created_at": "2025-05-01T10:00:00Z"
        }]
    })
}

struct TestApp {
    client: ApiClient,
    session: SessionStore,
    _dir: tempfile::TempDir,
}

fn test_app(server_uri: &str, telegram: TelegramEnv) -> TestApp {
    let dir = tempfile::tempdir().expect("tempdir");
    let base = normalize_base_url(&format!("{server_uri}/api/v1")).expect("valid base url");
    let storage = Storage::open(dir.path()).expect("open storage");
    let session =
        SessionStore::new(reqwest::Client::new(), &base, storage).expect("session store");
    let client = ApiClient::new(reqwest::Client::new(), base, session.clone(), telegram);
    TestApp {
        client,
        session,
        _dir: dir,
    }
}

#[tokio::test]
async fn unauthenticated_request_sends_no_auth_headers() {
    let server = MockServer::start().await;

    // Any request carrying auth headers is a contract violation.
    Mock::given(method("GET"))
        .and(path("/api/v1/orders/"))
        .and(header_exists("Authorization"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/orders/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_order_page()))
        .mount(&server)
        .await;

    let app = test_app(&server.uri(), TelegramEnv::detached());
    let page = app.client.orders().await.expect("orders");
    assert_eq!(page.count, 1);
    assert_eq!(page.results[0].customer_name, "Anna");
}

#[tokio::test]
async fn embedded_unauthenticated_request_falls_back_to_init_data_header() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/orders/"))
        .and(header("X-Telegram-Init-Data", "auth_date=1&hash=abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_order_page()))
        .expect(1)
        .mount(&server)
        .await;

    let telegram = TelegramEnv::embedded(SecretString::from("auth_date=1&hash=abc"), None);
    let app = test_app(&server.uri(), telegram);
    app.client.orders().await.expect("orders");
}

#[tokio::test]
async fn bearer_credential_wins_over_init_data_fallback() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/orders/"))
        .and(header("Authorization", "Bearer access-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_order_page()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/orders/"))
        .and(header_exists("X-Telegram-Init-Data"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let telegram = TelegramEnv::embedded(SecretString::from("auth_date=1&hash=abc"), None);
    let app = test_app(&server.uri(), telegram);
    app.session.set_auth(test_user(), test_tokens());
    app.client.orders().await.expect("orders");
}

#[tokio::test]
async fn expired_token_is_refreshed_and_call_retried_transparently() {
    let server = MockServer::start().await;

    // Stale token: rejected.
    Mock::given(method("GET"))
        .and(path("/api/v1/orders/"))
        .and(header("Authorization", "Bearer access-1"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    // Refresh endpoint issues a new access token.
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/refresh/"))
        .and(body_json(serde_json::json!({ "refresh": "refresh-1" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "access": "access-2" })),
        )
        .expect(1)
        .mount(&server)
        .await;
    // Fresh token: accepted.
    Mock::given(method("GET"))
        .and(path("/api/v1/orders/"))
        .and(header("Authorization", "Bearer access-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_order_page()))
        .expect(1)
        .mount(&server)
        .await;

    let app = test_app(&server.uri(), TelegramEnv::detached());
    app.session.set_auth(test_user(), test_tokens());

    // The caller sees the successful result exactly as if no retry happened.
    let page = app.client.orders().await.expect("orders after refresh");
    assert_eq!(page.count, 1);
    assert_eq!(app.session.access_token().as_deref(), Some("access-2"));
    assert!(app.session.is_authenticated());
}

#[tokio::test]
async fn failed_refresh_surfaces_original_401_and_logs_out() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/orders/"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/refresh/"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let app = test_app(&server.uri(), TelegramEnv::detached());
    app.session.set_auth(test_user(), test_tokens());

    let err = app.client.orders().await.expect_err("should fail");
    assert_eq!(err.status(), Some(401));
    assert!(!app.session.is_authenticated());
}

#[tokio::test]
async fn error_body_is_parsed_best_effort() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/orders/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "customer_phone": ["Введите корректный номер"]
        })))
        .mount(&server)
        .await;

    let app = test_app(&server.uri(), TelegramEnv::detached());
    let request = blossom_core::CheckoutRequest {
        customer_name: "Anna".to_string(),
        customer_phone: "bad".to_string(),
        delivery_address: "Arbat 12, apt 5".to_string(),
        delivery_comment: None,
        delivery_date: None,
        delivery_time_from: None,
        delivery_time_to: None,
        payment_method: blossom_core::PaymentMethod::LinkAfterOrder,
        items: Vec::new(),
    };

    let err = app
        .client
        .create_order(&request)
        .await
        .expect_err("should fail");
    match err {
        blossom_client::api::ApiError::Status { status, body, .. } => {
            assert_eq!(status, 400);
            assert!(body.get("customer_phone").is_some());
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn non_json_error_body_becomes_null_payload() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/orders/"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
        .mount(&server)
        .await;

    let app = test_app(&server.uri(), TelegramEnv::detached());
    let err = app.client.orders().await.expect_err("should fail");
    match err {
        blossom_client::api::ApiError::Status { status, body, .. } => {
            assert_eq!(status, 502);
            assert_eq!(body, serde_json::Value::Null);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn product_list_is_served_from_cache_within_ttl() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/products/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(product_page(&[sample_product(1)])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let app = test_app(&server.uri(), TelegramEnv::detached());
    let filter = ProductsFilter::default();

    let first = app.client.products(&filter).await.expect("first fetch");
    let second = app.client.products(&filter).await.expect("cached fetch");
    assert_eq!(first, second);
    assert_eq!(first.results[0].title, "Bouquet 1");
}

#[tokio::test]
async fn distinct_filters_bypass_each_others_cache_entries() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/products/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(product_page(&[sample_product(1)])),
        )
        .expect(2)
        .mount(&server)
        .await;

    let app = test_app(&server.uri(), TelegramEnv::detached());
    app.client
        .products(&ProductsFilter::default())
        .await
        .expect("all products");
    app.client
        .products(&ProductsFilter {
            in_stock: true,
            ..ProductsFilter::default()
        })
        .await
        .expect("in-stock products");
}

#[tokio::test]
async fn init_auth_exchanges_init_data_for_session() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/telegram/"))
        .and(body_json(
            serde_json::json!({ "init_data": "auth_date=1&hash=abc" }),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "user": {
                "id": 1,
                "telegram_id": 99,
                "first_name": "Anna",
                "username": "anna"
            },
            "tokens": { "access": "access-1", "refresh": "refresh-1" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let telegram = TelegramEnv::embedded(SecretString::from("auth_date=1&hash=abc"), None);
    let app = test_app(&server.uri(), telegram);

    app.client.init_auth().await;
    assert!(app.session.is_authenticated());
    assert_eq!(app.session.access_token().as_deref(), Some("access-1"));
    assert_eq!(app.session.user().map(|u| u.first_name), Some("Anna".to_string()));
}

#[tokio::test]
async fn init_auth_failure_degrades_to_unauthenticated() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/telegram/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let telegram = TelegramEnv::embedded(SecretString::from("auth_date=1&hash=abc"), None);
    let app = test_app(&server.uri(), telegram);

    app.client.init_auth().await;
    assert!(!app.session.is_authenticated());
}

#[tokio::test]
async fn init_auth_is_a_noop_when_already_authenticated() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/telegram/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let telegram = TelegramEnv::embedded(SecretString::from("auth_date=1&hash=abc"), None);
    let app = test_app(&server.uri(), telegram);
    app.session.set_auth(test_user(), test_tokens());

    app.client.init_auth().await;
    assert_eq!(app.session.access_token().as_deref(), Some("access-1"));
}
