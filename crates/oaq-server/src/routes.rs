use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::Deserialize;
use serde_json::json;

use oaq_core::error::ResolveError;
use oaq_core::rank::{Candidate, Choice, find_candidates};
use oaq_core::resolve::{curl_command, operation_sample, operation_schemas, operation_summary};
use oaq_core::spec::HttpMethod;

use crate::state::AppState;

const DEFAULT_TOP_K: usize = 10;

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/candidates", post(candidates))
        .route("/choose", post(choose))
        .route("/operation/summary", post(summary))
        .route("/operation/schemas", post(schemas))
        .route("/operation/sample", post(sample))
        .route("/operation/curl", post(curl))
}

#[derive(Debug, Deserialize)]
pub struct CandidatesRequest {
    pub q: String,
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

#[derive(Debug, Deserialize)]
pub struct ChooseRequest {
    pub q: String,
    #[serde(default)]
    pub candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
pub struct OperationRequest {
    pub route: String,
    pub method: String,
}

fn default_top_k() -> usize {
    DEFAULT_TOP_K
}

async fn health() -> Response {
    Json(json!({"status": "ok"})).into_response()
}

async fn candidates(
    State(state): State<AppState>,
    Json(req): Json<CandidatesRequest>,
) -> Response {
    if req.q.is_empty() {
        return missing_question();
    }
    let candidates = find_candidates(&state.document, &req.q, req.top_k);
    Json(json!({"candidates": candidates})).into_response()
}

async fn choose(State(state): State<AppState>, Json(req): Json<ChooseRequest>) -> Response {
    if req.q.is_empty() {
        return missing_question();
    }

    let candidates = match req.candidates {
        Some(candidates) if !candidates.is_empty() => candidates,
        _ => find_candidates(&state.document, &req.q, DEFAULT_TOP_K),
    };

    match state.chooser.choose(&req.q, &candidates).await {
        Choice::NoMatch => Json(json!({"error": "No matching endpoint found"})).into_response(),
        Choice::Operation { route, method } => {
            match operation_summary(&state.document, &route, method) {
                Ok(summary) => Json(summary).into_response(),
                // Client-supplied candidates can name operations the
                // document does not have.
                Err(_) => Json(json!({
                    "error": "Chosen endpoint not found in spec",
                    "route": route,
                    "method": method,
                }))
                .into_response(),
            }
        }
    }
}

async fn summary(State(state): State<AppState>, Json(req): Json<OperationRequest>) -> Response {
    match parse_method(&req.method) {
        Some(method) => match operation_summary(&state.document, &req.route, method) {
            Ok(summary) => Json(summary).into_response(),
            Err(err) => resolve_error(err),
        },
        None => resolve_error(ResolveError::OperationNotFound),
    }
}

async fn schemas(State(state): State<AppState>, Json(req): Json<OperationRequest>) -> Response {
    match parse_method(&req.method) {
        Some(method) => match operation_schemas(&state.document, &req.route, method) {
            Ok(bundle) => Json(bundle).into_response(),
            Err(err) => resolve_error(err),
        },
        None => resolve_error(ResolveError::OperationNotFound),
    }
}

async fn sample(State(state): State<AppState>, Json(req): Json<OperationRequest>) -> Response {
    match parse_method(&req.method) {
        Some(method) => match operation_sample(&state.document, &req.route, method) {
            Ok(payload) => Json(payload).into_response(),
            Err(err) => resolve_error(err),
        },
        None => resolve_error(ResolveError::OperationNotFound),
    }
}

async fn curl(State(state): State<AppState>, Json(req): Json<OperationRequest>) -> Response {
    match parse_method(&req.method) {
        Some(method) => match curl_command(&state.document, &req.route, method) {
            Ok(command) => Json(json!({"curl": command})).into_response(),
            Err(err) => resolve_error(err),
        },
        None => resolve_error(ResolveError::OperationNotFound),
    }
}

fn parse_method(raw: &str) -> Option<HttpMethod> {
    HttpMethod::parse(raw)
}

/// Input errors are rejected, never silently defaulted.
fn missing_question() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({"error": "Missing question"})),
    )
        .into_response()
}

/// Lookup errors stay structured so callers can branch on them. An unknown
/// operation is a 404; a resolvable operation with nothing to sample keeps
/// a 200 with the error body.
fn resolve_error(err: ResolveError) -> Response {
    let status = match err {
        ResolveError::OperationNotFound => StatusCode::NOT_FOUND,
        ResolveError::NoRequestBody => StatusCode::OK,
    };
    (status, Json(json!({"error": err.to_string()}))).into_response()
}
