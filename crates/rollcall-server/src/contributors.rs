//! `/contributors` handlers.

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use rollcall_service::ServiceError;
use rollcall_types::{Contributor, DisplayName, ListQuery, Username};

use crate::error::{ApiError, ApiResult};
use crate::extract::{ValidJson, ValidQuery};
use crate::state::AppState;

/// Body of `POST /contributors`.
#[derive(Debug, Deserialize)]
pub struct NewContributor {
    pub username: Username,
    pub name: DisplayName,
    pub bio: String,
}

/// Body of `PUT /contributors/{username}`.
#[derive(Debug, Deserialize)]
pub struct ContributorChanges {
    pub name: DisplayName,
    pub bio: String,
}

/// Raw listing parameters; validated by [`ListQuery::parse`].
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    pub count: Option<String>,
    pub offset: Option<String>,
}

pub async fn create(
    State(state): State<AppState>,
    ValidJson(body): ValidJson<NewContributor>,
) -> ApiResult<Json<Value>> {
    let outcome = state
        .services
        .contributors
        .upsert(&body.username, body.name, body.bio)
        .await?;
    Ok(Json(json!({
        "success": true,
        "new_user_created": outcome.created,
        "path": format!("/contributors/{}", body.username),
    })))
}

pub async fn show(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> ApiResult<Json<Value>> {
    let record = state.services.contributors.get(&username).await?;
    Ok(Json(json!({ "name": record.name, "bio": record.bio })))
}

pub async fn update(
    State(state): State<AppState>,
    Path(username): Path<String>,
    ValidJson(body): ValidJson<ContributorChanges>,
) -> ApiResult<Json<Value>> {
    state
        .services
        .contributors
        .update(&username, body.name, body.bio)
        .await
        .map_err(|e| ApiError::from(e).with_success_flag())?;
    Ok(Json(json!({ "success": true })))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> ApiResult<Json<Value>> {
    state
        .services
        .contributors
        .delete(&username)
        .await
        .map_err(|e| ApiError::from(e).with_success_flag())?;
    Ok(Json(json!({ "success": true })))
}

pub async fn list(
    State(state): State<AppState>,
    ValidQuery(params): ValidQuery<ListParams>,
) -> ApiResult<Json<Vec<Contributor>>> {
    let query = ListQuery::parse(
        params.sort_by.as_deref(),
        params.count.as_deref(),
        params.offset.as_deref(),
    )
    .map_err(ServiceError::from)?;
    Ok(Json(state.services.contributors.list(&query).await?))
}
