use crate::infrastructure::http::controllers::{authors, fortunes, health, tags};
use crate::infrastructure::http::middleware::{ApiError, AppState};
use axum::{
    routing::{get, MethodRouter},
    Router,
};
use tower_http::trace::TraceLayer;

pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route(
            "/api/fortunes",
            json_405(get(fortunes::list_fortunes).post(fortunes::create_fortune)),
        )
        .route(
            "/api/fortunes/:fortune_id",
            json_405(get(fortunes::get_fortune).patch(fortunes::patch_fortune)),
        )
        .route("/api/authors", json_405(get(authors::list_authors)))
        .route(
            "/api/authors/:author_id",
            json_405(get(authors::get_author).patch(authors::patch_author)),
        )
        .route("/api/tags", json_405(get(tags::list_tags)))
        .route(
            "/api/tags/:tag_id",
            json_405(get(tags::get_tag).patch(tags::patch_tag)),
        );

    Router::new()
        .route("/health", json_405(get(health::health)))
        .merge(api)
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Answer unrouted methods on a known path with a JSON 405
fn json_405(route: MethodRouter<AppState>) -> MethodRouter<AppState> {
    route.fallback(method_not_allowed)
}

async fn not_found() -> ApiError {
    ApiError::NotFound("Not Found".to_string())
}

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
