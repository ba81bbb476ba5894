use crate::{
    domain::entities::{AuthorDetailResponse, AuthorPatch, ItemsResponse},
    infrastructure::http::extract::{EntityIdPath, Payload},
    infrastructure::http::middleware::{ApiResult, AppState},
};
use axum::{extract::State, Json};

pub async fn list_authors(
    State(state): State<AppState>,
) -> ApiResult<Json<ItemsResponse<AuthorDetailResponse>>> {
    let authors = state.author_service.list_authors().await?;
    Ok(Json(ItemsResponse::collect_from(authors)))
}

pub async fn get_author(
    State(state): State<AppState>,
    EntityIdPath(id): EntityIdPath,
) -> ApiResult<Json<AuthorDetailResponse>> {
    let author = state.author_service.get_author(id).await?;
    Ok(Json(AuthorDetailResponse::from(author)))
}

pub async fn patch_author(
    State(state): State<AppState>,
    EntityIdPath(id): EntityIdPath,
    Payload(request): Payload<AuthorPatch>,
) -> ApiResult<Json<AuthorDetailResponse>> {
    let author = state.author_service.patch_author(id, request).await?;
    Ok(Json(AuthorDetailResponse::from(author)))
}
