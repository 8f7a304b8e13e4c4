//! HTTP serving boundary for the delay classifier.
//!
//! This is the only place errors become transport status codes: malformed
//! caller input maps to 400, operational failures (no trained model,
//! persistence faults) map to 500. The core stays free of HTTP concerns.
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::DelayError;
use crate::flights::FlightRecord;
use crate::model::DelayClassifier;
use crate::preprocessing;

/// Shared server state. The classifier sits behind a write lock because the
/// lazy reload inside `predict` mutates the model slot; requests are
/// serialized around the classifier rather than racing on it.
#[derive(Clone)]
pub struct AppState {
    pub classifier: Arc<RwLock<DelayClassifier>>,
}

impl AppState {
    pub fn new(classifier: DelayClassifier) -> Self {
        AppState {
            classifier: Arc::new(RwLock::new(classifier)),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub flights: Vec<FlightRecord>,
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub predict: Vec<i32>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(get_health))
        .route("/predict", post(post_predict))
        .with_state(state)
}

pub async fn get_health() -> Json<Value> {
    Json(json!({ "status": "OK" }))
}

pub async fn post_predict(
    State(state): State<AppState>,
    Json(request): Json<PredictRequest>,
) -> Result<Json<PredictResponse>, (StatusCode, Json<Value>)> {
    if request.flights.is_empty() {
        return Err(bad_request("flights must be a non-empty list"));
    }
    for flight in &request.flights {
        flight
            .validate()
            .map_err(|e| bad_request(&e.to_string()))?;
    }

    let features = preprocessing::encode(&request.flights);
    let predictions = state.classifier.write().predict(&features).map_err(reject)?;

    Ok(Json(PredictResponse {
        predict: predictions,
    }))
}

fn bad_request(detail: &str) -> (StatusCode, Json<Value>) {
    (StatusCode::BAD_REQUEST, Json(json!({ "detail": detail })))
}

fn reject(err: DelayError) -> (StatusCode, Json<Value>) {
    let status = match err {
        DelayError::Validation(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(json!({ "detail": err.to_string() })))
}
