//! Extractors that report malformed requests as `422 VALIDATION_ERROR`.

use axum::async_trait;
use axum::extract::{FromRequest, FromRequestParts, Multipart, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// A JSON body. Unparseable or invalid bodies are rejected with 422.
#[derive(Debug)]
pub struct ValidJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(ApiError::validation(rejection.body_text())),
        }
    }
}

/// A query string. Unparseable query strings are rejected with 422.
#[derive(Debug)]
pub struct ValidQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ValidQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(Self(value)),
            Err(rejection) => Err(ApiError::validation(rejection.body_text())),
        }
    }
}

/// The multipart form used to upload images: a `file` part and a
/// `username` part. Other parts are ignored.
#[derive(Debug)]
pub struct UploadForm {
    pub username: String,
    pub file: Vec<u8>,
}

#[async_trait]
impl<S> FromRequest<S> for UploadForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|r| ApiError::validation(r.body_text()))?;

        let mut username = None;
        let mut file = None;
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::validation(e.body_text()))?
        {
            let name = field.name().map(str::to_owned);
            match name.as_deref() {
                Some("username") => {
                    let text = field
                        .text()
                        .await
                        .map_err(|e| ApiError::validation(e.body_text()))?;
                    username = Some(text);
                }
                Some("file") => {
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| ApiError::validation(e.body_text()))?;
                    file = Some(bytes.to_vec());
                }
                _ => {}
            }
        }

        match (username, file) {
            (Some(username), Some(file)) => Ok(Self { username, file }),
            (None, _) => Err(ApiError::validation("missing form field `username`")),
            (_, None) => Err(ApiError::validation("missing form field `file`")),
        }
    }
}
