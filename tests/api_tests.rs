mod common;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use common::{FixedSentiment, dealer_json, review_json, test_config};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn spawn_app(upstream: &MockServer) -> Router {
    let config = test_config(
        &format!("{}/dealerships/get", upstream.uri()),
        &format!("{}/api/review", upstream.uri()),
    );

    let state = dealership::api::create_app_state_with_sentiment(
        config,
        Arc::new(FixedSentiment::new(Some("positive"))),
    )
    .await
    .expect("Failed to create app state");
    dealership::api::router(state)
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn send_json(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health_endpoints() {
    let upstream = MockServer::start().await;
    let app = spawn_app(&upstream).await;

    let response = app
        .clone()
        .oneshot(get("/api/system/health/live"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "alive");

    let response = app
        .clone()
        .oneshot(get("/api/system/health/ready"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["ready"], true);
    assert_eq!(json["data"]["checks"]["database"], true);
}

#[tokio::test]
async fn test_metrics_endpoint_without_recorder() {
    let upstream = MockServer::start().await;
    let app = spawn_app(&upstream).await;

    let response = app.oneshot(get("/api/metrics")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_catalog_vocabularies() {
    let upstream = MockServer::start().await;
    let app = spawn_app(&upstream).await;

    let response = app
        .clone()
        .oneshot(get("/api/catalog/body-types"))
        .await
        .unwrap();
    let json = body_json(response).await;
    let types = json["data"].as_array().unwrap();
    assert_eq!(types.len(), 12);
    assert_eq!(types[0], json!({ "value": "Sedan", "label": "Sedan" }));
    assert_eq!(types[1]["value"], "SUV");

    let response = app.oneshot(get("/api/catalog/years")).await.unwrap();
    let json = body_json(response).await;
    assert_eq!(json["data"]["first"], 1969);
    assert_eq!(json["data"]["last"], json["data"]["default"]);
}

#[tokio::test]
async fn test_make_and_model_crud() {
    let upstream = MockServer::start().await;
    let app = spawn_app(&upstream).await;

    let response = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/api/makes",
            &json!({ "name": "Toyota", "description": "Japanese" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let make_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/api/models",
            &json!({ "name": "RAV4", "car_make_id": make_id, "model_type": "SUV", "year": 2019, "dealer_id": 15 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let model = body_json(response).await;
    assert_eq!(model["data"]["model_type"], "SUV");

    let response = app
        .clone()
        .oneshot(get(&format!("/api/makes/{make_id}")))
        .await
        .unwrap();
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Toyota");
    assert_eq!(json["data"]["model_count"], 1);

    let response = app
        .clone()
        .oneshot(get(&format!("/api/models?make_id={make_id}&dealer_id=15")))
        .await
        .unwrap();
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/makes/{make_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get("/api/models")).await.unwrap();
    let json = body_json(response).await;
    assert!(json["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_catalog_validation_and_not_found() {
    let upstream = MockServer::start().await;
    let app = spawn_app(&upstream).await;

    let response = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/api/models",
            &json!({ "name": "Time Machine", "year": 1900 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);

    let response = app.clone().oneshot(get("/api/makes/777")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.oneshot(get("/api/models/0")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_dealer_endpoints() {
    let upstream = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/dealerships/get"))
        .and(query_param("state", "Texas"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "body": { "docs": [dealer_json(1, "Texas", "TX")] }
        })))
        .mount(&upstream)
        .await;

    Mock::given(method("GET"))
        .and(path("/dealerships/get"))
        .and(query_param("dealerId", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "entries": [dealer_json(1, "Texas", "TX")]
        })))
        .mount(&upstream)
        .await;

    Mock::given(method("GET"))
        .and(path("/dealerships/get"))
        .and(query_param("dealerId", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "entries": [] })))
        .mount(&upstream)
        .await;

    let app = spawn_app(&upstream).await;

    let response = app
        .clone()
        .oneshot(get("/api/dealers?state=Texas"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"][0]["st"], "TX");

    let response = app.clone().oneshot(get("/api/dealers/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["id"], 1);

    let response = app.oneshot(get("/api/dealers/2")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_dealer_upstream_failure_is_bad_gateway() {
    let upstream = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&upstream)
        .await;

    let app = spawn_app(&upstream).await;

    let response = app.oneshot(get("/api/dealers")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_review_endpoints() {
    let upstream = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/review"))
        .and(query_param("dealerId", "15"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "entries": [review_json(1, 15, "Fantastic")]
        })))
        .mount(&upstream)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/review"))
        .and(query_param("dealerId", "15"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "abc" })))
        .mount(&upstream)
        .await;

    let app = spawn_app(&upstream).await;

    let response = app
        .clone()
        .oneshot(get("/api/dealers/15/reviews"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"][0]["sentiment"], "positive");
    assert_eq!(json["data"][0]["car_model"], "A6");

    let response = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/api/dealers/15/reviews",
            &json!({ "name": "Ann", "review": "Quick and friendly", "purchase": false }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], 200);
    assert_eq!(json["data"]["body"]["id"], "abc");

    let response = app
        .oneshot(send_json(
            "POST",
            "/api/dealers/15/reviews",
            &json!({ "name": "", "review": "anonymous" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_rejected_review_post_is_bad_gateway() {
    let upstream = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/review"))
        .and(query_param("dealerId", "15"))
        .respond_with(ResponseTemplate::new(422).set_body_string("duplicate review"))
        .expect(1)
        .mount(&upstream)
        .await;

    let app = spawn_app(&upstream).await;

    let response = app
        .oneshot(send_json(
            "POST",
            "/api/dealers/15/reviews",
            &json!({ "name": "Ann", "review": "Quick and friendly", "purchase": false }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert!(json["error"].as_str().unwrap().contains("422"));
}

#[tokio::test]
async fn test_unreachable_review_service_is_bad_gateway() {
    let mut config = test_config("http://127.0.0.1:1/dealerships/get", "http://127.0.0.1:1/api/review");
    config.dealerships.request_timeout_seconds = 2;

    let state = dealership::api::create_app_state_with_sentiment(
        config,
        Arc::new(FixedSentiment::new(None)),
    )
    .await
    .expect("Failed to create app state");
    let app = dealership::api::router(state);

    let response = app
        .oneshot(send_json(
            "POST",
            "/api/dealers/15/reviews",
            &json!({ "name": "Ann", "review": "Hello", "purchase": false }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("500"));
}
