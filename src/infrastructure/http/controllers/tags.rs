use crate::{
    domain::entities::{ItemsResponse, TagDetailResponse, TagPatch},
    infrastructure::http::extract::{EntityIdPath, Payload},
    infrastructure::http::middleware::{ApiResult, AppState},
};
use axum::{extract::State, Json};

pub async fn list_tags(
    State(state): State<AppState>,
) -> ApiResult<Json<ItemsResponse<TagDetailResponse>>> {
    let tags = state.tag_service.list_tags().await?;
    Ok(Json(ItemsResponse::collect_from(tags)))
}

pub async fn get_tag(
    State(state): State<AppState>,
    EntityIdPath(id): EntityIdPath,
) -> ApiResult<Json<TagDetailResponse>> {
    let tag = state.tag_service.get_tag(id).await?;
    Ok(Json(TagDetailResponse::from(tag)))
}

pub async fn patch_tag(
    State(state): State<AppState>,
    EntityIdPath(id): EntityIdPath,
    Payload(request): Payload<TagPatch>,
) -> ApiResult<Json<TagDetailResponse>> {
    let tag = state.tag_service.patch_tag(id, request).await?;
    Ok(Json(TagDetailResponse::from(tag)))
}
