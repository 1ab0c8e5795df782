//! `/images` handlers.

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Json, Response};
use serde_json::{json, Value};

use crate::error::{ApiError, ApiResult};
use crate::extract::UploadForm;
use crate::state::AppState;

/// Media type of every blended image.
pub const IMAGE_CONTENT_TYPE: &str = "image/bmp";

pub async fn create(State(state): State<AppState>, form: UploadForm) -> ApiResult<Json<Value>> {
    let id = state
        .services
        .images
        .create(&form.username, &form.file)
        .await?;
    Ok(Json(json!({
        "success": true,
        "path": format!("/images/{id}"),
    })))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    form: UploadForm,
) -> ApiResult<Json<Value>> {
    let outcome = state
        .services
        .images
        .update(&id, &form.username, &form.file)
        .await
        .map_err(ApiError::from_image_update)?;
    Ok(Json(json!({
        "success": true,
        "image_changed": outcome.changed,
    })))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    state.services.images.delete(&id).await?;
    Ok(Json(json!({ "success": true })))
}

/// Blend the stored image once more and return the result.
pub async fn retrieve(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Response> {
    let blended = state.services.images.retrieve(&id).await?;
    Ok(([(header::CONTENT_TYPE, IMAGE_CONTENT_TYPE)], blended).into_response())
}
