//! HTTP server for rollcall.
//!
//! Exposes the contributor directory and the image gallery over HTTP.
//! Every failure is answered with a status code and a JSON body of the form
//! `{"error": CODE}`; see [`ApiError`].

pub mod config;
pub mod contributors;
pub mod error;
pub mod extract;
pub mod handler;
pub mod images;
pub mod router;
pub mod server;
pub mod state;

pub use config::{ServerConfig, StoreBackend};
pub use error::{ApiError, ApiResult, ServerError, ServerResult};
pub use router::build_router;
pub use server::RollcallServer;
pub use state::AppState;

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use axum::response::Response;
    use axum::Router;
    use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage};
    use serde_json::Value;
    use tower::util::ServiceExt;

    use rollcall_blend::{encode_png, Blender};
    use rollcall_service::Services;
    use rollcall_store::InMemoryKvStore;

    use crate::router::build_router;
    use crate::state::AppState;

    const BOUNDARY: &str = "rollcall-test-boundary";

    pub fn test_app() -> Router {
        let services = Services::new(Arc::new(InMemoryKvStore::new()), Blender::builtin());
        build_router(AppState::new(services), 1024 * 1024)
    }

    pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    pub async fn send_request(app: &Router, request: Request<Body>) -> Response {
        app.clone().oneshot(request).await.unwrap()
    }

    pub async fn body_bytes(response: Response) -> Vec<u8> {
        to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }

    pub fn json_body(bytes: &[u8]) -> Value {
        serde_json::from_slice(bytes).unwrap()
    }

    pub async fn send_empty(app: &Router, method: &str, uri: &str) -> (StatusCode, Vec<u8>) {
        let response = send_request(app, empty_request(method, uri)).await;
        (response.status(), body_bytes(response).await)
    }

    pub async fn send_raw(
        app: &Router,
        method: &str,
        uri: &str,
        content_type: &str,
        body: Vec<u8>,
    ) -> (StatusCode, Vec<u8>) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, content_type)
            .body(Body::from(body))
            .unwrap();
        let response = send_request(app, request).await;
        (response.status(), body_bytes(response).await)
    }

    pub async fn send_json(app: &Router, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
        let (status, bytes) = send_raw(
            app,
            method,
            uri,
            "application/json",
            serde_json::to_vec(&body).unwrap(),
        )
        .await;
        (status, json_body(&bytes))
    }

    /// Encode `(name, filename, content)` parts as multipart/form-data.
    pub fn multipart_body(parts: &[(&str, Option<&str>, &[u8])]) -> (String, Vec<u8>) {
        let mut body = Vec::new();
        for (name, filename, content) in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            let disposition = match filename {
                Some(filename) => format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                     Content-Type: application/octet-stream\r\n\r\n"
                ),
                None => format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n"),
            };
            body.extend_from_slice(disposition.as_bytes());
            body.extend_from_slice(content);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        (format!("multipart/form-data; boundary={BOUNDARY}"), body)
    }

    pub async fn send_form(
        app: &Router,
        method: &str,
        uri: &str,
        username: &str,
        file: &[u8],
    ) -> (StatusCode, Vec<u8>) {
        let (content_type, body) = multipart_body(&[
            ("username", None, username.as_bytes()),
            ("file", Some("upload.png"), file),
        ]);
        send_raw(app, method, uri, &content_type, body).await
    }

    pub fn rgb_png(width: u32, height: u32, value: u8) -> Vec<u8> {
        encode_png(&DynamicImage::ImageRgb8(RgbImage::from_pixel(
            width,
            height,
            Rgb([value, value / 2, 255 - value]),
        )))
        .unwrap()
    }

    pub fn gray_png(width: u32, height: u32, value: u8) -> Vec<u8> {
        encode_png(&DynamicImage::ImageLuma8(GrayImage::from_pixel(
            width,
            height,
            Luma([value]),
        )))
        .unwrap()
    }
}
