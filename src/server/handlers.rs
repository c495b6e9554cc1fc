//! Request handlers for the REST API

use crate::analyzer::AnalysisResult;
use crate::error::Error;
use crate::fetcher::fetch_and_analyze;
use crate::server::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{error, info, warn};
use url::Url;

/// Body of `POST /api/analyze`
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub url: String,
}

/// Error responses of the REST API
#[derive(Debug)]
pub enum ApiError {
    /// The request body or URL failed validation
    InvalidInput(Vec<Value>),

    /// The target page answered with a non-success status
    Upstream(String),

    /// Anything else
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::InvalidInput(errors) => (
                StatusCode::BAD_REQUEST,
                json!({"message": "Invalid input data", "errors": errors}),
            ),
            ApiError::Upstream(message) => (StatusCode::BAD_REQUEST, json!({"message": message})),
            ApiError::Internal(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({"message": "Failed to analyze website", "error": message}),
            ),
        };
        (status, Json(body)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::FetchStatus { .. } => ApiError::Upstream(err.to_string()),
            Error::InvalidUrl(message) => ApiError::InvalidInput(vec![field_error("url", &message)]),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

fn field_error(field: &str, message: &str) -> Value {
    json!({"path": [field], "message": message})
}

/// Only absolute http(s) URLs are accepted
fn validate_url(raw: &str) -> Result<(), ApiError> {
    match Url::parse(raw) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.host_str().is_some() => Ok(()),
        Ok(_) => Err(ApiError::InvalidInput(vec![field_error(
            "url",
            "URL must use http or https",
        )])),
        Err(e) => Err(ApiError::InvalidInput(vec![field_error(
            "url",
            &format!("Invalid url: {}", e),
        )])),
    }
}

pub(crate) async fn analyze_handler(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!("Rejected analyze request: {}", rejection.body_text());
        ApiError::InvalidInput(vec![field_error("body", &rejection.body_text())])
    })?;

    validate_url(&request.url)?;
    info!(url = %request.url, "Analyzing website");

    match fetch_and_analyze(&state.fetcher, &request.url).await {
        Ok(result) => Ok(Json(result)),
        Err(e) => {
            error!("Error analyzing website {}: {}", request.url, e);
            Err(e.into())
        }
    }
}

pub(crate) async fn healthz_handler() -> impl IntoResponse {
    Json(json!({"status": "ok"}))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("https://example.com").is_ok());
        assert!(validate_url("http://localhost:8080/a?b=c").is_ok());
        assert!(matches!(
            validate_url("example.com"),
            Err(ApiError::InvalidInput(_))
        ));
        assert!(matches!(
            validate_url("mailto:someone@example.com"),
            Err(ApiError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_error_mapping() {
        let upstream: ApiError = Error::FetchStatus {
            status_code: 404,
            reason: "Not Found".to_string(),
        }
        .into();
        assert!(matches!(upstream, ApiError::Upstream(ref m) if m == "Failed to fetch website: Not Found"));

        let internal: ApiError = Error::Fetch("connection reset".to_string()).into();
        assert!(matches!(internal, ApiError::Internal(_)));
    }

    #[test]
    fn test_error_status_codes() {
        let invalid = ApiError::InvalidInput(vec![]).into_response();
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);

        let upstream = ApiError::Upstream("x".to_string()).into_response();
        assert_eq!(upstream.status(), StatusCode::BAD_REQUEST);

        let internal = ApiError::Internal("x".to_string()).into_response();
        assert_eq!(internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
