//! # Routes
//!
//! Axum router configuration for the payment API.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - POST /api/paypal/create-order - Price a product and create a PayPal order
/// - POST /api/paypal/capture-order - Capture an approved order
/// - POST /api/paypal/webhook - PayPal webhook (logs, always 200 "ok")
/// - GET  /api/products - Catalog with size prices
/// - GET  /health - Health check
///
/// Anything else falls through to the storefront's static files when a
/// public directory is configured.
pub fn create_router(state: AppState) -> Router {
    // The storefront may be served from another origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let paypal_routes = Router::new()
        .route("/create-order", post(handlers::create_order))
        .route("/capture-order", post(handlers::capture_order))
        .route("/webhook", post(handlers::paypal_webhook));

    let api_routes = Router::new()
        .route("/products", get(handlers::list_products))
        .nest("/paypal", paypal_routes);

    let router = Router::new()
        .route("/health", get(handlers::health))
        .nest("/api", api_routes);

    let router = match state.config.public_dir.clone() {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    };

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppConfig;
    use axum::body::Bytes;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use pay_core::ProductCatalog;
    use pay_paypal::{PayPalCheckoutStrategy, PayPalConfig, PayPalEnvironment};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config() -> AppConfig {
        AppConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            public_dir: None,
            catalog_path: None,
        }
    }

    fn server_for(api_base_url: &str) -> TestServer {
        let paypal = PayPalConfig::new("client-id", "client-secret", PayPalEnvironment::Sandbox)
            .with_api_base_url(api_base_url);
        let strategy = PayPalCheckoutStrategy::new(paypal).unwrap();
        let state =
            AppState::with_strategy(test_config(), ProductCatalog::builtin(), Arc::new(strategy));
        TestServer::new(create_router(state)).unwrap()
    }

    async fn mount_token(paypal: &MockServer) {
        Mock::given(method("POST"))
            .and(path("/v1/oauth2/token"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"access_token": "tok-123"})),
            )
            .expect(1)
            .mount(paypal)
            .await;
    }

    async fn forbid_provider_calls(paypal: &MockServer) {
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(paypal)
            .await;
    }

    async fn mount_token_failure(paypal: &MockServer) {
        Mock::given(method("POST"))
            .and(path("/v1/oauth2/token"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": "invalid_client",
                "error_description": "Client Authentication failed"
            })))
            .mount(paypal)
            .await;
    }

    #[tokio::test]
    async fn test_health() {
        let paypal = MockServer::start().await;
        let server = server_for(&paypal.uri());

        let response = server.get("/health").await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["status"], "healthy");
    }

    #[tokio::test]
    async fn test_list_products() {
        let paypal = MockServer::start().await;
        let server = server_for(&paypal.uri());

        let body = server.get("/api/products").await.json::<Value>();
        assert_eq!(body["count"], 1);
        assert_eq!(body["currency"], "EUR");
        assert_eq!(body["products"][0]["id"], "cloudrest-cozy-dog-bed");
        assert_eq!(body["products"][0]["prices"]["L"], "59.99");
    }

    #[tokio::test]
    async fn test_create_order_returns_only_order_id() {
        let paypal = MockServer::start().await;
        mount_token(&paypal).await;

        Mock::given(method("POST"))
            .and(path("/v2/checkout/orders"))
            .and(header("authorization", "Bearer tok-123"))
            .and(body_partial_json(json!({
                "intent": "CAPTURE",
                "purchase_units": [{
                    "amount": {"currency_code": "EUR", "value": "119.98"},
                    "description": "CloudRest Cozy Dog Bed (L)"
                }]
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": "5O190127TN364715T",
                "status": "CREATED",
                "links": []
            })))
            .expect(1)
            .mount(&paypal)
            .await;

        let server = server_for(&paypal.uri());
        let response = server
            .post("/api/paypal/create-order")
            .json(&json!({"productId": "cloudrest-cozy-dog-bed", "size": "L", "qty": 2}))
            .await;

        response.assert_status_ok();
        assert_eq!(
            response.json::<Value>(),
            json!({"orderID": "5O190127TN364715T"})
        );
    }

    #[tokio::test]
    async fn test_create_order_defaults_and_size_fallback() {
        let paypal = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/oauth2/token"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"access_token": "tok-123"})),
            )
            .expect(2)
            .mount(&paypal)
            .await;
        Mock::given(method("POST"))
            .and(path("/v2/checkout/orders"))
            .and(body_partial_json(json!({
                "purchase_units": [{
                    "amount": {"currency_code": "EUR", "value": "49.99"},
                    "description": "CloudRest Cozy Dog Bed (M)"
                }]
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "ORDER-M"})))
            .expect(1)
            .mount(&paypal)
            .await;
        Mock::given(method("POST"))
            .and(path("/v2/checkout/orders"))
            .and(body_partial_json(json!({
                "purchase_units": [{
                    "amount": {"currency_code": "EUR", "value": "49.99"},
                    "description": "CloudRest Cozy Dog Bed (XXL)"
                }]
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "ORDER-XXL"})))
            .expect(1)
            .mount(&paypal)
            .await;

        let server = server_for(&paypal.uri());

        let response = server
            .post("/api/paypal/create-order")
            .json(&json!({"productId": "cloudrest-cozy-dog-bed"}))
            .await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["orderID"], "ORDER-M");

        let response = server
            .post("/api/paypal/create-order")
            .json(&json!({"productId": "cloudrest-cozy-dog-bed", "size": "XXL", "qty": "1"}))
            .await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["orderID"], "ORDER-XXL");
    }

    #[tokio::test]
    async fn test_create_order_unknown_product() {
        let paypal = MockServer::start().await;
        forbid_provider_calls(&paypal).await;
        let server = server_for(&paypal.uri());

        let response = server
            .post("/api/paypal/create-order")
            .json(&json!({"productId": "mystery-box", "qty": 1}))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>(), json!({"error": "Invalid product"}));

        let response = server
            .post("/api/paypal/create-order")
            .json(&json!({"size": "L"}))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["error"], "Invalid product");
    }

    #[tokio::test]
    async fn test_create_order_bad_quantity() {
        let paypal = MockServer::start().await;
        forbid_provider_calls(&paypal).await;
        let server = server_for(&paypal.uri());

        let response = server
            .post("/api/paypal/create-order")
            .json(&json!({"productId": "cloudrest-cozy-dog-bed", "qty": 0}))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let response = server
            .post("/api/paypal/create-order")
            .json(&json!({"productId": "cloudrest-cozy-dog-bed", "qty": "lots"}))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["error"], "Invalid request body");
    }

    #[tokio::test]
    async fn test_create_order_malformed_body() {
        let paypal = MockServer::start().await;
        forbid_provider_calls(&paypal).await;
        let server = server_for(&paypal.uri());

        let response = server
            .post("/api/paypal/create-order")
            .bytes(Bytes::from_static(b"{not json"))
            .content_type("application/json")
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["error"], "Invalid request body");
    }

    #[tokio::test]
    async fn test_create_order_provider_failure() {
        let paypal = MockServer::start().await;
        mount_token(&paypal).await;

        Mock::given(method("POST"))
            .and(path("/v2/checkout/orders"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "name": "INVALID_REQUEST",
                "message": "Request is not well-formed"
            })))
            .mount(&paypal)
            .await;

        let server = server_for(&paypal.uri());
        let response = server
            .post("/api/paypal/create-order")
            .json(&json!({"productId": "cloudrest-cozy-dog-bed"}))
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.json::<Value>(),
            json!({
                "error": "PayPal create failed",
                "details": {"name": "INVALID_REQUEST", "message": "Request is not well-formed"}
            })
        );
    }

    #[tokio::test]
    async fn test_auth_failure_surfaces_on_create_and_capture() {
        let paypal = MockServer::start().await;
        mount_token_failure(&paypal).await;

        Mock::given(method("POST"))
            .and(path("/v2/checkout/orders"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&paypal)
            .await;
        Mock::given(method("POST"))
            .and(path("/v2/checkout/orders/ORDER-1/capture"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&paypal)
            .await;

        let server = server_for(&paypal.uri());

        let response = server
            .post("/api/paypal/create-order")
            .json(&json!({"productId": "cloudrest-cozy-dog-bed"}))
            .await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body = response.json::<Value>();
        assert_eq!(body["error"], "PayPal token error");
        assert_eq!(body["details"]["error"], "invalid_client");

        let response = server
            .post("/api/paypal/capture-order")
            .json(&json!({"orderID": "ORDER-1"}))
            .await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body = response.json::<Value>();
        assert_eq!(body["error"], "PayPal token error");
        assert_eq!(body["details"]["error"], "invalid_client");
    }

    #[tokio::test]
    async fn test_capture_missing_order_id() {
        let paypal = MockServer::start().await;
        forbid_provider_calls(&paypal).await;
        let server = server_for(&paypal.uri());

        let response = server.post("/api/paypal/capture-order").json(&json!({})).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>(), json!({"error": "orderID required"}));

        let response = server
            .post("/api/paypal/capture-order")
            .json(&json!({"orderID": ""}))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_capture_returns_provider_response() {
        let paypal = MockServer::start().await;
        mount_token(&paypal).await;

        let capture = json!({
            "id": "5O190127TN364715T",
            "status": "COMPLETED",
            "purchase_units": [{
                "payments": {"captures": [{"id": "3C679366HH908993F", "status": "COMPLETED"}]}
            }]
        });

        Mock::given(method("POST"))
            .and(path("/v2/checkout/orders/5O190127TN364715T/capture"))
            .and(header("authorization", "Bearer tok-123"))
            .respond_with(ResponseTemplate::new(201).set_body_json(capture.clone()))
            .expect(1)
            .mount(&paypal)
            .await;

        let server = server_for(&paypal.uri());
        let response = server
            .post("/api/paypal/capture-order")
            .json(&json!({"orderID": "5O190127TN364715T"}))
            .await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>(), capture);
    }

    #[tokio::test]
    async fn test_capture_provider_failure() {
        let paypal = MockServer::start().await;
        mount_token(&paypal).await;

        Mock::given(method("POST"))
            .and(path("/v2/checkout/orders/ORDER-1/capture"))
            .respond_with(ResponseTemplate::new(422).set_body_json(json!({
                "name": "UNPROCESSABLE_ENTITY",
                "details": [{"issue": "ORDER_ALREADY_CAPTURED"}]
            })))
            .mount(&paypal)
            .await;

        let server = server_for(&paypal.uri());
        let response = server
            .post("/api/paypal/capture-order")
            .json(&json!({"orderID": "ORDER-1"}))
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body = response.json::<Value>();
        assert_eq!(body["error"], "Capture failed");
        assert_eq!(body["details"]["details"][0]["issue"], "ORDER_ALREADY_CAPTURED");
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_generic_server_error() {
        // Nothing listens on port 1
        let server = server_for("http://127.0.0.1:1");

        let response = server
            .post("/api/paypal/capture-order")
            .json(&json!({"orderID": "ORDER-1"}))
            .await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.json::<Value>(), json!({"error": "Server error"}));
    }

    #[tokio::test]
    async fn test_webhook_always_acknowledges() {
        let paypal = MockServer::start().await;
        forbid_provider_calls(&paypal).await;
        let server = server_for(&paypal.uri());

        let response = server
            .post("/api/paypal/webhook")
            .json(&json!({"event_type": "PAYMENT.CAPTURE.COMPLETED"}))
            .await;
        response.assert_status_ok();
        assert_eq!(response.text(), "ok");

        let response = server
            .post("/api/paypal/webhook")
            .text("definitely not json")
            .await;
        response.assert_status_ok();
        assert_eq!(response.text(), "ok");

        let response = server.post("/api/paypal/webhook").json(&json!([1, 2])).await;
        response.assert_status_ok();

        let response = server.post("/api/paypal/webhook").await;
        response.assert_status_ok();
        assert_eq!(response.text(), "ok");
    }

    #[tokio::test]
    async fn test_webhook_reaches_configured_handler() {
        use pay_paypal::{WebhookEvent, WebhookHandler};
        use std::sync::Mutex;

        #[derive(Default)]
        struct Recorder(Mutex<Vec<String>>);

        impl WebhookHandler for Recorder {
            fn on_event(&self, event: &WebhookEvent) {
                if let Some(kind) = &event.event_type {
                    self.0.lock().unwrap().push(kind.clone());
                }
            }
        }

        let paypal = MockServer::start().await;
        let recorder = Arc::new(Recorder::default());
        let strategy = PayPalCheckoutStrategy::new(
            PayPalConfig::new("client-id", "client-secret", PayPalEnvironment::Sandbox)
                .with_api_base_url(paypal.uri()),
        )
        .unwrap();
        let state =
            AppState::with_strategy(test_config(), ProductCatalog::builtin(), Arc::new(strategy))
                .with_webhook_handler(recorder.clone());
        let server = TestServer::new(create_router(state)).unwrap();

        server
            .post("/api/paypal/webhook")
            .json(&json!({"event_type": "CHECKOUT.ORDER.APPROVED", "resource": {"id": "ORDER-1"}}))
            .await
            .assert_status_ok();

        assert_eq!(*recorder.0.lock().unwrap(), vec!["CHECKOUT.ORDER.APPROVED"]);
    }
}
