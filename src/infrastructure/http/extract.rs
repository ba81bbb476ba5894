use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use std::collections::HashMap;

use super::middleware::ApiError;
use crate::domain::errors::{LocSegment, ValidationIssue};
use crate::shared::utils::EntityId;

/// Entity id taken from the route's single path parameter.
///
/// Length is checked before decoding, and failures are reported against
/// `["path", <param name>]`. Runs before any body extractor.
#[derive(Debug, Clone, Copy)]
pub struct EntityIdPath(pub EntityId);

#[async_trait]
impl<S> FromRequestParts<S> for EntityIdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(params) = Path::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;

        let (name, raw) = params
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::Internal("route has no id parameter".to_string()))?;

        raw.parse::<EntityId>().map(EntityIdPath).map_err(|e| {
            let loc = vec![LocSegment::from("path"), LocSegment::Key(name)];
            ApiError::Validation(vec![ValidationIssue::from_entity_id_error(&e, loc, &raw)])
        })
    }
}

/// Request body types that validate themselves from raw JSON, collecting
/// every issue instead of stopping at the first one
pub trait FromPayload: Sized {
    fn from_payload(value: &serde_json::Value) -> Result<Self, Vec<ValidationIssue>>;
}

/// JSON body extractor that answers with 422 issue lists
#[derive(Debug, Clone)]
pub struct Payload<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for Payload<T>
where
    S: Send + Sync,
    T: FromPayload + Send,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;

        if bytes.is_empty() {
            return Err(ApiError::Validation(vec![ValidationIssue::missing(vec![
                "body".into(),
            ])]));
        }

        let value: serde_json::Value = serde_json::from_slice(&bytes)
            .map_err(|e| ApiError::Validation(vec![ValidationIssue::json_invalid(&e.to_string())]))?;

        T::from_payload(&value).map(Payload).map_err(ApiError::Validation)
    }
}
