//! Integration tests for the HTTP API

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use decksynergy::core::{create_router, SynergyEngine};
use pretty_assertions::assert_eq;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

fn create_test_router() -> axum::Router {
    create_router(Arc::new(SynergyEngine::builtin()))
}

async fn body_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn analyze_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/analyze")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Health reports version and catalog size
#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_router();

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["version"], decksynergy::VERSION);
    assert_eq!(json["packages"], 11);
}

/// The catalog is served as an ordered array
#[tokio::test]
async fn test_packages_endpoint() {
    let app = create_test_router();

    let response = app
        .oneshot(Request::builder().uri("/packages").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let packages = json.as_array().unwrap();
    assert_eq!(packages.len(), 11);
    assert_eq!(packages[0]["name"], "aristocrats");
    assert_eq!(packages[1]["components"][0]["min_required"], 10.0);
}

/// A deck posted as JSON comes back as an analysis envelope
#[tokio::test]
async fn test_analyze_deck() {
    let app = create_test_router();

    let deck = r#"{
        "cards": [
            {"name": "Raise the Alarm", "type_line": "Instant", "oracle_text": "Create two 1/1 white Soldier creature tokens.", "cmc": 2},
            {"name": "Intangible Virtue", "type_line": "Enchantment", "oracle_text": "Creature tokens you control get +1/+1 and have vigilance.", "cmc": 1},
            {"name": "Divine Visitation", "type_line": "Enchantment", "oracle_text": "If one or more creature tokens would be created under your control, that many 4/4 white Angel creature tokens with flying are created instead.", "cmc": 5}
        ],
        "quantities": {"Raise the Alarm": 12, "Intangible Virtue": 4}
    }"#;

    let response = app.oneshot(analyze_request(deck)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["deck_digest"].as_str().unwrap().len(), 64);
    assert!(json["analyzed_at"].is_string());

    let report = &json["report"];
    assert_eq!(report["all_packages"].as_array().unwrap().len(), 11);
    assert_eq!(report["tag_totals"]["token_producer"], 12.0);
    assert!(report["per_card"]["Divine Visitation"]["signals"].is_array());
}

/// An empty deck is valid and scores zero
#[tokio::test]
async fn test_analyze_empty_deck() {
    let app = create_test_router();

    let response = app.oneshot(analyze_request(r#"{"cards": []}"#)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["report"]["overall_score"], 0.0);
    assert_eq!(json["report"]["primary_packages"].as_array().unwrap().len(), 0);
}

/// Malformed bodies get a JSON error
#[tokio::test]
async fn test_analyze_bad_json() {
    let app = create_test_router();

    let response = app.oneshot(analyze_request("{not json")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert!(json["error"].is_string());
}

/// A body without a JSON content type is unsupported media
#[tokio::test]
async fn test_analyze_missing_content_type() {
    let app = create_test_router();

    let request = Request::builder()
        .method("POST")
        .uri("/analyze")
        .body(Body::from(r#"{"cards": []}"#))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);

    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("Content-Type"));
}

/// Well-formed JSON of the wrong shape is unprocessable
#[tokio::test]
async fn test_analyze_wrong_shape() {
    let app = create_test_router();

    let response = app.oneshot(analyze_request(r#"{"cards": 5}"#)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_json(response).await["error"].is_string());
}

/// Unknown routes are not found
#[tokio::test]
async fn test_unknown_route() {
    let app = create_test_router();

    let response = app
        .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
