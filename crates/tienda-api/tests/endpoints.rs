//! End-to-end tests for the HTTP API.
//!
//! Mercado Pago and the published sheet are both stubbed with wiremock, so
//! these tests exercise the full router without leaving the process.

use axum::http::{Method, StatusCode};
use axum_test::TestServer;
use serde_json::{json, Value};
use tienda_api::{create_router, AppConfig, AppState};
use tienda_mercadopago::MercadoPagoConfig;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "TEST-1137-secret";

fn test_config(mercadopago: MercadoPagoConfig, products_csv_url: Option<String>) -> AppConfig {
    AppConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        products_csv_url,
        environment: "test".to_string(),
        mercadopago,
    }
}

fn server_with(config: AppConfig) -> TestServer {
    let state = AppState::new(config).expect("Failed to build application state");
    TestServer::new(create_router(state)).expect("Failed to start test server")
}

#[tokio::test]
async fn health_reports_the_service() {
    let mp = MercadoPagoConfig::new(TOKEN, "https://stimportados.shop");
    let server = server_with(test_config(mp, None));

    let response = server.get("/health").await;

    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "tienda");
}

#[tokio::test]
async fn checkout_returns_the_redirect_urls() {
    let provider = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/checkout/preferences"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "137-abc",
            "init_point": "https://www.mercadopago.com/checkout/v1/redirect?pref_id=137-abc",
            "sandbox_init_point": "https://sandbox.mercadopago.com/checkout/v1/redirect?pref_id=137-abc"
        })))
        .expect(1)
        .mount(&provider)
        .await;

    let mp = MercadoPagoConfig::new(TOKEN, "https://stimportados.shop")
        .with_api_base_url(provider.uri());
    let server = server_with(test_config(mp, None));

    let response = server
        .post("/api/v1/checkout")
        .json(&json!({
            "items": [{"title": "Oud Real", "quantity": 2, "unit_price": 45000.0}]
        }))
        .await;

    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["id"], "137-abc");
    assert_eq!(
        body["init_point"],
        "https://www.mercadopago.com/checkout/v1/redirect?pref_id=137-abc"
    );
    assert_eq!(
        body["sandbox_init_point"],
        "https://sandbox.mercadopago.com/checkout/v1/redirect?pref_id=137-abc"
    );
}

#[tokio::test]
async fn empty_cart_is_rejected_before_the_provider_is_called() {
    let provider = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&provider)
        .await;

    let mp = MercadoPagoConfig::new(TOKEN, "https://stimportados.shop")
        .with_api_base_url(provider.uri());
    let server = server_with(test_config(mp, None));

    let response = server.post("/api/v1/checkout").json(&json!({"items": []})).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .contains("items"));
}

#[tokio::test]
async fn missing_credential_is_a_configuration_error() {
    let mut mp = MercadoPagoConfig::new(TOKEN, "https://stimportados.shop");
    mp.access_token = None;
    let server = server_with(test_config(mp, None));

    let response = server
        .post("/api/v1/checkout")
        .json(&json!({
            "items": [{"title": "Oud Real", "quantity": 1, "unit_price": 45000.0}]
        }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .contains("MP_ACCESS_TOKEN"));
}

#[tokio::test]
async fn provider_rejection_keeps_the_credential_out_of_the_response() {
    let provider = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/checkout/preferences"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "message": "invalid back_urls",
            "status": 400
        })))
        .expect(1)
        .mount(&provider)
        .await;

    let mp = MercadoPagoConfig::new(TOKEN, "https://stimportados.shop")
        .with_api_base_url(provider.uri());
    let server = server_with(test_config(mp, None));

    let response = server
        .post("/api/v1/checkout")
        .json(&json!({
            "items": [{"title": "Oud Real", "quantity": 1, "unit_price": 45000.0}]
        }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let raw = response.text();
    assert!(!raw.contains(TOKEN), "credential leaked into the response");
    let body: Value = serde_json::from_str(&raw).expect("JSON error body");
    assert_eq!(body["details"], "invalid back_urls");
}

#[tokio::test]
async fn malformed_body_is_answered_with_a_json_error() {
    let mp = MercadoPagoConfig::new(TOKEN, "https://stimportados.shop");
    let server = server_with(test_config(mp, None));

    let response = server.post("/api/v1/checkout").text("{not json").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .contains("JSON object"));
}

#[tokio::test]
async fn wrong_method_on_checkout_is_rejected() {
    let mp = MercadoPagoConfig::new(TOKEN, "https://stimportados.shop");
    let server = server_with(test_config(mp, None));

    let response = server.get("/api/v1/checkout").await;

    response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn preflight_is_answered_for_browser_clients() {
    let mp = MercadoPagoConfig::new(TOKEN, "https://stimportados.shop");
    let server = server_with(test_config(mp, None));

    let response = server.method(Method::OPTIONS, "/api/v1/checkout").await;

    response.assert_status(StatusCode::NO_CONTENT);
    assert!(response
        .maybe_header("access-control-allow-origin")
        .is_some());
}

#[tokio::test]
async fn products_lists_the_sheet_in_order() {
    let sheet = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/catalog.csv"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "\
nombre,precio,marca
Oud Real,\"45.000\",Lattafa
Ameer Oud,38000,Fragrance World
",
        ))
        .expect(1)
        .mount(&sheet)
        .await;

    let mp = MercadoPagoConfig::new(TOKEN, "https://stimportados.shop");
    let config = test_config(mp, Some(format!("{}/catalog.csv", sheet.uri())));
    let server = server_with(config);

    let response = server.get("/api/v1/products").await;

    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["count"], 2);
    assert_eq!(body["products"][0]["name"], "Oud Real");
    assert_eq!(body["products"][0]["price"], 45000.0);
    assert_eq!(body["products"][1]["name"], "Ameer Oud");
    assert_eq!(body["products"][1]["brand"], "Fragrance World");
}

#[tokio::test]
async fn products_without_a_source_is_a_configuration_error() {
    let mp = MercadoPagoConfig::new(TOKEN, "https://stimportados.shop");
    let server = server_with(test_config(mp, None));

    let response = server.get("/api/v1/products").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .contains("PRODUCTS_CSV_URL"));
}

#[tokio::test]
async fn failing_sheet_is_a_bad_gateway() {
    let sheet = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/catalog.csv"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&sheet)
        .await;

    let mp = MercadoPagoConfig::new(TOKEN, "https://stimportados.shop");
    let config = test_config(mp, Some(format!("{}/catalog.csv", sheet.uri())));
    let server = server_with(config);

    let response = server.get("/api/v1/products").await;

    response.assert_status(StatusCode::BAD_GATEWAY);
}
