use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

use crate::domain::errors::{DomainError, ValidationIssue};

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    MethodNotAllowed,
    BadRequest(String),
    Conflict(String),
    Validation(Vec<ValidationIssue>),
    ServiceUnavailable(String),
    Internal(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::MethodNotAllowed => write!(f, "Method not allowed"),
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::Validation(issues) => write!(f, "Validation failed: {} issue(s)", issues.len()),
            ApiError::ServiceUnavailable(msg) => write!(f, "Service unavailable: {}", msg),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, json!(msg)),
            ApiError::MethodNotAllowed => {
                (StatusCode::METHOD_NOT_ALLOWED, json!("Method Not Allowed"))
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!(msg)),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, json!(msg)),
            ApiError::Validation(issues) => (StatusCode::UNPROCESSABLE_ENTITY, json!(issues)),
            ApiError::ServiceUnavailable(msg) => {
                tracing::warn!("Giving up on busy database: {}", msg);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    json!("database busy, try again later"),
                )
            }
            ApiError::Internal(msg) => {
                tracing::error!("Request failed: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!("internal server error"),
                )
            }
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

// Convert from domain errors
impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound(_) => ApiError::NotFound(err.to_string()),
            DomainError::Conflict(_) => ApiError::Conflict(err.to_string()),
            DomainError::Validation(issues) => ApiError::Validation(issues),
            DomainError::Busy(msg) => ApiError::ServiceUnavailable(msg),
            DomainError::Internal(msg) => ApiError::Internal(msg),
        }
    }
}

// Convert from sqlx errors
impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        DomainError::from(err).into()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_not_found_uses_detail_string() {
        let response =
            ApiError::from(DomainError::NotFound("author".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await, json!({"detail": "author not found"}));
    }

    #[tokio::test]
    async fn test_conflict_maps_to_409() {
        let response = ApiError::from(DomainError::Conflict("tag".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(body_json(response).await, json!({"detail": "tag exists"}));
    }

    #[tokio::test]
    async fn test_validation_lists_issues() {
        let issue = ValidationIssue::missing(vec!["body".into(), "author".into()]);
        let response = ApiError::Validation(vec![issue]).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = body_json(response).await;
        assert_eq!(body["detail"][0]["type"], "missing");
        assert_eq!(body["detail"][0]["loc"], json!(["body", "author"]));
    }

    #[tokio::test]
    async fn test_internal_error_hides_cause() {
        let response = ApiError::Internal("disk on fire".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await, json!({"detail": "internal server error"}));
    }

    #[test]
    fn test_busy_maps_to_service_unavailable() {
        let err = ApiError::from(DomainError::Busy("database is locked".to_string()));
        assert!(matches!(err, ApiError::ServiceUnavailable(_)));
    }
}
