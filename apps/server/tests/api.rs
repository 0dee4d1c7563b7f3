use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use pointfolio_server::{api::app_router, build_state, config::Config};
use serde_json::{json, Value};
use tempfile::{tempdir, TempDir};
use tower::ServiceExt;

fn test_config(dir: &TempDir, points_demo: bool) -> Config {
    Config {
        listen_addr: "127.0.0.1:0".parse().unwrap(),
        db_path: dir.path().join("db").join("app.db").to_string_lossy().into_owned(),
        cors_allow: vec!["*".to_string()],
        request_timeout: Duration::from_secs(30),
        wallet_address: "0xabc".to_string(),
        portfolio_api_url: "http://127.0.0.1:9".to_string(),
        // Empty keys keep the providers off the network.
        portfolio_api_key: String::new(),
        points_api_url: "http://127.0.0.1:9".to_string(),
        points_api_key: String::new(),
        points_source_name: "extended".to_string(),
        points_demo,
        points_refresh: None,
    }
}

async fn app(dir: &TempDir, points_demo: bool) -> Router {
    let config = test_config(dir, points_demo);
    let state = build_state(&config).await.unwrap();
    app_router(state, &config)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn test_healthz_works() {
    let tmp = tempdir().unwrap();
    let app = app(&tmp, false).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/healthz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_project_pricing_flows_into_ledger_and_allocation() {
    let tmp = tempdir().unwrap();
    let app = app(&tmp, false).await;

    let (status, asset) = send(
        &app,
        "POST",
        "/api/v1/ledger/assets",
        Some(json!({"name": "extended", "quantity": 8000})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(asset["hasProject"], false);

    let (status, project) = send(
        &app,
        "POST",
        "/api/v1/projects",
        Some(json!({"name": "extended", "fdv": "100", "percent": "10", "totalPoints": "1000"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(project["name"], "extended");

    let (_, assets) = send(&app, "GET", "/api/v1/ledger/assets", None).await;
    assert_eq!(assets[0]["hasProject"], true);
    assert_eq!(assets[0]["quantity"], "8000");

    let (status, series) = send(&app, "GET", "/api/v1/portfolio/allocation", None).await;
    assert_eq!(status, StatusCode::OK);
    let series = series.as_array().unwrap();
    assert_eq!(series.len(), 1);
    assert_eq!(series[0]["displayValue"], "80.00");
    assert_eq!(series[0]["source"], "ledger");

    let (status, summary) = send(&app, "GET", "/api/v1/portfolio/summary", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["address"], "0xabc");
    assert_eq!(summary["networth"], Value::Null);
}

#[tokio::test]
async fn test_rename_and_delete_cascade() {
    let tmp = tempdir().unwrap();
    let app = app(&tmp, false).await;

    send(
        &app,
        "POST",
        "/api/v1/ledger/assets",
        Some(json!({"name": "alpha", "quantity": "50"})),
    )
    .await;
    let (_, project) = send(
        &app,
        "POST",
        "/api/v1/projects",
        Some(json!({"name": "alpha", "fdv": 100, "percent": 10, "totalPoints": 1000})),
    )
    .await;
    let id = project["id"].as_str().unwrap().to_string();

    let (status, renamed) = send(
        &app,
        "PUT",
        &format!("/api/v1/projects/{id}"),
        Some(json!({"name": "beta"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(renamed["name"], "beta");
    let (_, assets) = send(&app, "GET", "/api/v1/ledger/assets", None).await;
    assert_eq!(assets[0]["name"], "beta");
    assert_eq!(assets[0]["hasProject"], true);

    let (status, _) = send(&app, "DELETE", &format!("/api/v1/projects/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    let (_, assets) = send(&app, "GET", "/api/v1/ledger/assets", None).await;
    assert_eq!(assets[0]["hasProject"], false);
    assert_eq!(assets[0]["price"], "0");
    assert_eq!(assets[0]["quantity"], "50");
}

#[tokio::test]
async fn test_invalid_input_is_rejected_with_error_body() {
    let tmp = tempdir().unwrap();
    let app = app(&tmp, false).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/projects",
        Some(json!({"name": "extended", "fdv": "100", "percent": "250", "totalPoints": "1000"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);
    assert!(body["message"].as_str().unwrap().contains("percent"));

    let (_, projects) = send(&app, "GET", "/api/v1/projects", None).await;
    assert_eq!(projects, json!([]));

    let (status, body) = send(&app, "DELETE", "/api/v1/ledger/assets/missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 404);
}

#[tokio::test]
async fn test_points_fall_back_when_upstream_unavailable() {
    let tmp = tempdir().unwrap();
    let app = app(&tmp, false).await;

    let (status, points) = send(&app, "GET", "/api/v1/user-points", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(points, json!([]));

    let (status, summary) = send(&app, "POST", "/api/v1/ledger/reconcile", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["written"], false);
}

#[tokio::test]
async fn test_user_points_reconciles_into_ledger() {
    let tmp = tempdir().unwrap();
    let app = app(&tmp, true).await;

    let (status, points) = send(&app, "GET", "/api/v1/user-points", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(points.as_array().unwrap().len(), 2);

    let (status, assets) = send(&app, "GET", "/api/v1/ledger/assets", None).await;
    assert_eq!(status, StatusCode::OK);
    let mut names: Vec<&str> = assets
        .as_array()
        .unwrap()
        .iter()
        .map(|asset| asset["name"].as_str().unwrap())
        .collect();
    names.sort();
    assert_eq!(names, vec!["backpack", "extended"]);
    assert!(assets
        .as_array()
        .unwrap()
        .iter()
        .all(|asset| asset["hasProject"] == false));

    let (_, summary) = send(&app, "POST", "/api/v1/ledger/reconcile", None).await;
    assert_eq!(summary["created"], 0);
    assert_eq!(summary["written"], false);
}

#[tokio::test]
async fn test_project_created_after_points_prices_snapshot_rows() {
    let tmp = tempdir().unwrap();
    let app = app(&tmp, true).await;
    send(&app, "GET", "/api/v1/user-points", None).await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/projects",
        Some(json!({"name": "backpack", "fdv": 3000, "percent": 5, "totalPoints": 1500})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, assets) = send(&app, "GET", "/api/v1/ledger/assets", None).await;
    let backpack = assets
        .as_array()
        .unwrap()
        .iter()
        .find(|asset| asset["name"] == "backpack")
        .unwrap();
    assert_eq!(backpack["hasProject"], true);
    let price: f64 = backpack["price"].as_str().unwrap().parse().unwrap();
    assert_eq!(price, 0.1);
    assert_eq!(backpack["quantity"], "1500");
}

#[tokio::test]
async fn test_demo_points_reconcile_idempotently() {
    let tmp = tempdir().unwrap();
    let app = app(&tmp, true).await;

    let (_, first) = send(&app, "POST", "/api/v1/ledger/reconcile", None).await;
    assert_eq!(first["created"], 2);
    assert_eq!(first["written"], true);

    let (_, second) = send(&app, "POST", "/api/v1/ledger/reconcile", None).await;
    assert_eq!(second["created"], 0);
    assert_eq!(second["updated"], 0);
    assert_eq!(second["written"], false);
    assert_eq!(first["assets"], second["assets"]);
}
