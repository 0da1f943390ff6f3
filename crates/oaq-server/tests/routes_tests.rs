use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use oaq_core::spec;
use oaq_llm::client::{BackendError, ChatBackend};
use oaq_llm::Chooser;
use oaq_server::{AppState, create_router};

const PETSTORE: &str = r##"{
  "openapi": "3.0.3",
  "paths": {
    "/health": {
      "get": {
        "summary": "Health check",
        "operationId": "healthCheck",
        "responses": { "200": { "description": "OK" } }
      }
    },
    "/products": {
      "post": {
        "summary": "Create product",
        "operationId": "createProduct",
        "requestBody": {
          "content": {
            "application/json": {
              "schema": { "$ref": "#/components/schemas/Product" }
            }
          }
        },
        "responses": { "201": { "description": "Created" } }
      }
    }
  },
  "components": {
    "schemas": {
      "Product": {
        "type": "object",
        "properties": { "name": { "type": "string" } }
      }
    }
  }
}"##;

/// Backend with a fixed reply.
struct StubBackend(&'static str);

#[async_trait]
impl ChatBackend for StubBackend {
    async fn chat(&self, _prompt: &str) -> Result<String, BackendError> {
        Ok(self.0.to_string())
    }
}

fn app(reply: &'static str) -> Router {
    let document = spec::from_json(PETSTORE).unwrap();
    let chooser = Chooser::new(Box::new(StubBackend(reply)));
    create_router().with_state(AppState::new(document, chooser))
}

async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap();
    (status, value)
}

#[tokio::test]
async fn health_route_reports_ok() {
    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app("NONE").oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn candidates_returns_a_ranked_list() {
    let (status, body) = post_json(app("NONE"), "/candidates", json!({"q": "create product"})).await;
    assert_eq!(status, StatusCode::OK);

    let candidates = body["candidates"].as_array().unwrap();
    assert_eq!(candidates.len(), 2);
    assert_eq!(candidates[0]["route"], "/products");
    assert_eq!(candidates[0]["method"], "post");
    assert!(candidates[0]["score"].as_f64().unwrap() > 0.0);
}

#[tokio::test]
async fn candidates_honors_top_k() {
    let (_, body) = post_json(
        app("NONE"),
        "/candidates",
        json!({"q": "anything", "top_k": 1}),
    )
    .await;
    assert_eq!(body["candidates"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn empty_question_is_rejected() {
    let (status, body) = post_json(app("NONE"), "/candidates", json!({"q": ""})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing question");

    let (status, _) = post_json(app("NONE"), "/choose", json!({"q": ""})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn choose_confirms_a_backend_pick() {
    let (status, body) = post_json(
        app("/products post"),
        "/choose",
        json!({"q": "how do I create a product?"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["route"], "/products");
    assert_eq!(body["method"], "post");
    assert_eq!(body["operationId"], "createProduct");
    assert_eq!(body["schema_refs"][0], "#/components/schemas/Product");
}

#[tokio::test]
async fn choose_reports_an_explicit_none() {
    let (status, body) = post_json(app("NONE"), "/choose", json!({"q": "launch the rocket"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["error"], "No matching endpoint found");
}

#[tokio::test]
async fn choose_falls_back_when_the_backend_hallucinates() {
    let (status, body) = post_json(
        app("/orders/{id} DELETE"),
        "/choose",
        json!({"q": "product please"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    // Top-scored real candidate, not the invented pair.
    assert_eq!(body["route"], "/products");
    assert_eq!(body["method"], "post");
}

#[tokio::test]
async fn choose_accepts_client_supplied_candidates() {
    let supplied = json!({
        "q": "whatever",
        "candidates": [
            {"route": "/ghost", "method": "get", "score": 9.0}
        ]
    });
    let (status, body) = post_json(app("/ghost get"), "/choose", supplied).await;
    assert_eq!(status, StatusCode::OK);
    // Confirmed against the supplied list, but absent from the document.
    assert_eq!(body["error"], "Chosen endpoint not found in spec");
    assert_eq!(body["route"], "/ghost");
}

#[tokio::test]
async fn operation_summary_artifact() {
    let (status, body) = post_json(
        app("NONE"),
        "/operation/summary",
        json!({"route": "/health", "method": "GET"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["summary"], "Health check");
}

#[tokio::test]
async fn operation_artifacts_for_unknown_operations_are_404() {
    let (status, body) = post_json(
        app("NONE"),
        "/operation/summary",
        json!({"route": "/nope", "method": "get"}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "operation not found");

    // An unparsable method can never name an operation.
    let (status, _) = post_json(
        app("NONE"),
        "/operation/curl",
        json!({"route": "/health", "method": "teapot"}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn operation_schema_and_sample_artifacts() {
    let (status, body) = post_json(
        app("NONE"),
        "/operation/schemas",
        json!({"route": "/products", "method": "post"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["refs"][0], "#/components/schemas/Product");
    assert!(body["schemas"]["Product"].is_object());

    let (status, body) = post_json(
        app("NONE"),
        "/operation/sample",
        json!({"route": "/products", "method": "post"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sample"], json!({"name": "string_example"}));
    assert_eq!(body["content_type"], "application/json");
}

#[tokio::test]
async fn operation_curl_artifact() {
    let (status, body) = post_json(
        app("NONE"),
        "/operation/curl",
        json!({"route": "/health", "method": "get"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["curl"], "curl -X GET \"http://<HOST>/health\"");
}

#[tokio::test]
async fn sample_without_request_body_keeps_the_error_body() {
    let (status, body) = post_json(
        app("NONE"),
        "/operation/sample",
        json!({"route": "/health", "method": "get"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["error"], "no request body schema found");
}
