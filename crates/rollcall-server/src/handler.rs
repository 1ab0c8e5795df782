use axum::extract::State;
use axum::response::{Html, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// Welcome page.
pub async fn welcome_handler(State(state): State<AppState>) -> Html<String> {
    Html(state.welcome().to_owned())
}

/// Health check handler.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
