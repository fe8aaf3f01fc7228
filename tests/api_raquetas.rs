use std::io::Read;
use std::time::Duration;

use flate2::read::GzDecoder;

use jiff::Timestamp;
use raquetas_rs::AppState;
use raquetas_rs::api::create_router;
use raquetas_rs::api::dto::{ErrorResponse, HealthResponse, HealthStatus, RaquetaResponse};
use reqwest::{Client, StatusCode};
use serde_json::json;
use tokio::net::TcpListener;
use uuid::Uuid;

/// Serves a fresh in-memory app on an ephemeral port and returns its base URL.
async fn spawn_app() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    let router = create_router(AppState::in_memory());

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{}", address)
}

async fn create(client: &Client, base: &str, brand: &str, model: &str, price: f64) -> RaquetaResponse {
    let resp = client
        .post(format!("{}/api/raquetas", base))
        .json(&json!({ "brand": brand, "model": model, "price": price }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    resp.json().await.unwrap()
}

#[tokio::test]
async fn test_raqueta_lifecycle() {
    let base = spawn_app().await;
    let client = Client::new();

    let created = create(&client, &base, "Wilson", "Pro Staff", 199.99).await;
    assert_eq!(created.id, 1);
    assert_eq!(created.brand, "Wilson");
    assert_eq!(created.model, "Pro Staff");
    assert_eq!(created.price, 199.99);
    assert!(created.image_ref.is_none());
    assert_eq!(created.created_at, created.updated_at);

    let resp = client
        .get(format!("{}/api/raquetas/{}", base, created.id))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: RaquetaResponse = resp.json().await.unwrap();
    assert_eq!(fetched, created);

    tokio::time::sleep(Duration::from_millis(5)).await;

    let resp = client
        .put(format!("{}/api/raquetas/{}", base, created.id))
        .json(&json!({ "brand": "ignored", "model": "Pro Staff v2", "price": 149.99 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: RaquetaResponse = resp.json().await.unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.external_id, created.external_id);
    assert_eq!(updated.brand, "Wilson");
    assert_eq!(updated.model, "Pro Staff v2");
    assert_eq!(updated.price, 149.99);
    assert_eq!(updated.created_at, created.created_at);
    let before: Timestamp = created.updated_at.parse().unwrap();
    let after: Timestamp = updated.updated_at.parse().unwrap();
    assert!(after > before);

    let resp = client
        .delete(format!("{}/api/raquetas/{}", base, created.id))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = client
        .get(format!("{}/api/raquetas/{}", base, created.id))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let error: ErrorResponse = resp.json().await.unwrap();
    assert_eq!(error.code, "NOT_FOUND");
}

#[tokio::test]
async fn test_list_filters_by_brand_ignoring_case() {
    let base = spawn_app().await;
    let client = Client::new();

    create(&client, &base, "Wilson", "Blade 98", 219.0).await;
    create(&client, &base, "Babolat", "Pure Drive", 229.0).await;

    for filter in ["wil", "WIL"] {
        let list: Vec<RaquetaResponse> = client
            .get(format!("{}/api/raquetas?brand={}", base, filter))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(list.len(), 1, "filter {}", filter);
        assert_eq!(list[0].brand, "Wilson");
    }

    let all: Vec<RaquetaResponse> = client
        .get(format!("{}/api/raquetas", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let ids: Vec<i64> = all.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[tokio::test]
async fn test_find_by_external_id() {
    let base = spawn_app().await;
    let client = Client::new();
    let created = create(&client, &base, "Head", "Speed MP", 229.0).await;

    let resp = client
        .get(format!("{}/api/raquetas/find/{}", base, created.external_id))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let found: RaquetaResponse = resp.json().await.unwrap();
    assert_eq!(found.id, created.id);

    let resp = client
        .get(format!("{}/api/raquetas/find/{}", base, Uuid::new_v4()))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = client
        .get(format!("{}/api/raquetas/find/not-a-uuid", base))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let error: ErrorResponse = resp.json().await.unwrap();
    assert_eq!(error.code, "BAD_REQUEST");
}

#[tokio::test]
async fn test_validation_errors_list_fields() {
    let base = spawn_app().await;
    let client = Client::new();

    let resp = client
        .post(format!("{}/api/raquetas", base))
        .json(&json!({ "brand": "  ", "model": "Ezone 98", "price": -1.0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let error: ErrorResponse = resp.json().await.unwrap();
    assert_eq!(error.code, "VALIDATION_ERROR");
    let fields: Vec<String> = error
        .errors
        .unwrap_or_default()
        .into_iter()
        .map(|e| e.field)
        .collect();
    assert_eq!(fields, vec!["brand".to_string(), "price".to_string()]);

    let stored: Vec<RaquetaResponse> = client
        .get(format!("{}/api/raquetas", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(stored.is_empty());
}

#[tokio::test]
async fn test_update_and_delete_missing_racket() {
    let base = spawn_app().await;
    let client = Client::new();

    let resp = client
        .put(format!("{}/api/raquetas/99", base))
        .json(&json!({ "brand": "Yonex", "model": "Vcore 100", "price": 199.0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = client
        .delete(format!("{}/api/raquetas/99", base))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = client
        .get(format!("{}/api/raquetas/abc", base))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_health_endpoints() {
    let base = spawn_app().await;
    let client = Client::new();

    let resp = client.get(format!("{}/health", base)).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let health: HealthResponse = resp.json().await.unwrap();
    assert_eq!(health.status, HealthStatus::Healthy);
    assert!(health.checks.contains_key("storage"));

    for path in ["/health/live", "/health/ready"] {
        let resp = client.get(format!("{}{}", base, path)).send().await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK, "{}", path);
    }
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let base = spawn_app().await;
    let client = Client::new();

    let resp = client
        .get(format!("{}/health/live", base))
        .header("x-request-id", "trace-me-42")
        .send()
        .await
        .unwrap();
    assert_eq!(
        resp.headers().get("x-request-id").unwrap().to_str().unwrap(),
        "trace-me-42"
    );

    let resp = client.get(format!("{}/health/live", base)).send().await.unwrap();
    let generated = resp.headers().get("x-request-id").unwrap().to_str().unwrap();
    assert!(Uuid::parse_str(generated).is_ok());
}

#[tokio::test]
async fn test_openapi_document_served() {
    let base = spawn_app().await;
    let client = Client::new();

    let resp = client
        .get(format!("{}/api-docs/openapi.json", base))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let doc: serde_json::Value = resp.json().await.unwrap();
    assert!(doc["paths"]["/api/raquetas/{id}"].is_object());
}

#[tokio::test]
async fn test_gzip_client_gets_readable_error_body() {
    let base = spawn_app().await;
    let client = Client::new();

    let resp = client
        .get(format!("{}/api/raquetas/not-a-number", base))
        .header("accept-encoding", "gzip")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let gzipped = resp
        .headers()
        .get("content-encoding")
        .is_some_and(|v| v.as_bytes() == b"gzip");
    let raw = resp.bytes().await.unwrap();
    let body = if gzipped {
        let mut decoded = Vec::new();
        GzDecoder::new(&raw[..]).read_to_end(&mut decoded).unwrap();
        decoded
    } else {
        raw.to_vec()
    };

    let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(error.code, "BAD_REQUEST");
    assert!(!error.message.contains('\u{1f}'));
}
