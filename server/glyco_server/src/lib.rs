//! HTTP front end: the HTML form, JSON framing for `/predict` and a liveness
//! probe. All model work is delegated to `glyco_ai`.

pub mod config;
pub mod page;

use axum::{
    extract::{rejection::JsonRejection, Json, State},
    http::{Method, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Router,
};
use glyco_ai::{ArtifactStore, PatientObservation, PredictionError, PredictionResult};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::{Any, CorsLayer};

pub type SharedStore = Arc<ArtifactStore>;

/// Success body of `POST /predict`.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct PredictResponse {
    pub result: String,
    pub message: String,
    pub confidence: String,
}

impl From<PredictionResult> for PredictResponse {
    fn from(r: PredictionResult) -> Self {
        Self {
            result: r.label.as_str().to_string(),
            message: r.message(),
            confidence: r.confidence_text(),
        }
    }
}

/// Failure body shared by every request-level error.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}

/// Request-level failure rendered as `{ "error": ... }` with status 500.
#[derive(Debug)]
pub struct ApiError(PredictionError);

impl From<PredictionError> for ApiError {
    fn from(err: PredictionError) -> Self {
        ApiError(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError(PredictionError::validation(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self.0 {
            PredictionError::Inference(_) => log::error!("prediction failed: {}", self.0),
            _ => log::warn!("prediction rejected: {}", self.0),
        }
        let body = ErrorResponse {
            error: self.0.to_string(),
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

/// Build the application router around a loaded store.
pub fn router(store: SharedStore) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/predict", post(predict))
        .layer(cors)
        .with_state(store)
}

async fn index(State(store): State<SharedStore>) -> Html<String> {
    Html(page::render_form(&store.gender_encoder().display_options()))
}

async fn health() -> &'static str {
    "ok"
}

async fn predict(
    State(store): State<SharedStore>,
    body: Result<Json<PatientObservation>, JsonRejection>,
) -> Result<Json<PredictResponse>, ApiError> {
    let Json(obs) = body?;
    let start = Instant::now();
    let result = glyco_ai::predict(&store, &obs)?;
    log::info!(
        "prediction {} ({}%) in {:?}",
        result.label,
        result.confidence_text(),
        start.elapsed()
    );
    Ok(Json(result.into()))
}
