use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::{contributors, handler, images};

/// Build the axum router with all rollcall endpoints.
///
/// Request bodies larger than `max_upload_bytes` are refused.
pub fn build_router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/", get(handler::welcome_handler))
        .route("/health", get(handler::health_handler))
        .route(
            "/contributors",
            post(contributors::create).get(contributors::list),
        )
        .route(
            "/contributors/:username",
            get(contributors::show)
                .put(contributors::update)
                .delete(contributors::remove),
        )
        .route("/images", post(images::create))
        .route(
            "/images/:id",
            get(images::retrieve)
                .put(images::update)
                .delete(images::remove),
        )
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
