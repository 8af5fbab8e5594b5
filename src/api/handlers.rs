use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::collections::HashMap;
use std::sync::Arc;

use crate::api::types::*;
use crate::error::AnalyzerError;

use super::router::AppState;

/// Error wrapper for API handlers
pub enum ApiError {
    Analyzer(AnalyzerError),
    BadRequest(String),
    Unprocessable(String),
}

impl From<AnalyzerError> for ApiError {
    fn from(e: AnalyzerError) -> Self {
        ApiError::Analyzer(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            ApiError::Analyzer(e) => {
                let status = match &e {
                    AnalyzerError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
                    AnalyzerError::Validation { .. } => StatusCode::BAD_REQUEST,
                    AnalyzerError::UnparseableQuery(_) => StatusCode::BAD_REQUEST,
                    AnalyzerError::NotFound(_) => StatusCode::NOT_FOUND,
                    AnalyzerError::Conflict(_) => StatusCode::CONFLICT,
                    AnalyzerError::Store(_)
                    | AnalyzerError::Serialization(_)
                    | AnalyzerError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
                };
                let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
                    tracing::error!("request failed: {}", e);
                    "Internal Server Error".to_string()
                } else {
                    e.to_string()
                };
                (status, e.kind(), message)
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            ApiError::Unprocessable(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "unprocessable_query", msg)
            }
        };

        let error_response = ErrorResponse::new(error_type, message);
        (status, Json(error_response)).into_response()
    }
}

/// Plain-text liveness probe
pub async fn root() -> &'static str {
    "String Analyzer API is live"
}

/// Analyze and store a string
pub async fn create_string(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) =
        payload.map_err(|e| ApiError::BadRequest(format!("Invalid JSON body: {}", e.body_text())))?;

    // `null` counts as present so that it is rejected as a non-string.
    let value = body
        .get(CREATE_VALUE_FIELD)
        .ok_or_else(|| ApiError::BadRequest("Missing 'value' field".to_string()))?;

    let record = state.service.create_from_json(value)?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// Get a string by its literal value
pub async fn get_string(
    State(state): State<Arc<AppState>>,
    Path(value): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let record = state.service.get(&value)?;
    Ok(Json(record))
}

/// List strings matching structured query parameters
pub async fn list_strings(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state.service.list_with_params(&params)?;
    Ok(Json(ListResponse::new(result.records, result.filter)))
}

/// List strings matching a free-text query
pub async fn filter_by_natural_language(
    State(state): State<Arc<AppState>>,
    Query(params): Query<NaturalLanguageParams>,
) -> Result<impl IntoResponse, ApiError> {
    let query = params
        .query
        .filter(|q| !q.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Missing 'query' parameter".to_string()))?;

    let result = state.service.natural_language(&query).map_err(|e| {
        if e.is_store_failure() {
            tracing::error!("natural language query failed: {}", e);
            ApiError::Unprocessable("Unable to process natural language query".to_string())
        } else {
            ApiError::Analyzer(e)
        }
    })?;

    Ok(Json(NaturalLanguageResponse::new(
        result.records,
        result.interpreted,
    )))
}

/// Delete a string by its literal value
pub async fn delete_string(
    State(state): State<Arc<AppState>>,
    Path(value): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state.service.delete(&value)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Health check endpoint
pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: crate::VERSION.to_string(),
        total_strings: state.service.total_strings()?,
    }))
}

/// Prometheus metrics endpoint
pub async fn metrics(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    use prometheus::Encoder;
    let encoder = prometheus::TextEncoder::new();
    let metric_families = state.service.metrics().registry().gather();
    let mut buffer = vec![];
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| ApiError::Analyzer(AnalyzerError::Store(e.to_string())))?;

    Ok((
        StatusCode::OK,
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4",
        )],
        buffer,
    ))
}
