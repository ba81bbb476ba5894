use crate::{
    domain::entities::{FortunePatch, FortuneResponse, ItemsResponse, NewFortune},
    infrastructure::http::extract::{EntityIdPath, Payload},
    infrastructure::http::middleware::{ApiResult, AppState},
};
use axum::{extract::State, Json};

pub async fn list_fortunes(
    State(state): State<AppState>,
) -> ApiResult<Json<ItemsResponse<FortuneResponse>>> {
    let fortunes = state.fortune_service.list_fortunes().await?;
    Ok(Json(ItemsResponse::collect_from(fortunes)))
}

pub async fn get_fortune(
    State(state): State<AppState>,
    EntityIdPath(id): EntityIdPath,
) -> ApiResult<Json<FortuneResponse>> {
    let fortune = state.fortune_service.get_fortune(id).await?;
    Ok(Json(FortuneResponse::from(fortune)))
}

pub async fn create_fortune(
    State(state): State<AppState>,
    Payload(request): Payload<NewFortune>,
) -> ApiResult<Json<FortuneResponse>> {
    let fortune = state.fortune_service.create_fortune(request).await?;
    Ok(Json(FortuneResponse::from(fortune)))
}

pub async fn patch_fortune(
    State(state): State<AppState>,
    EntityIdPath(id): EntityIdPath,
    Payload(request): Payload<FortunePatch>,
) -> ApiResult<Json<FortuneResponse>> {
    let fortune = state.fortune_service.patch_fortune(id, request).await?;
    Ok(Json(FortuneResponse::from(fortune)))
}
