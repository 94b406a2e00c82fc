//! Request handlers.

use std::time::Instant;

use axum::body::Body;
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::header::{self, HeaderMap, HeaderName, HeaderValue};
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;
use kbfit_core::EncodingResult;
use tracing::info;

use crate::error::ApiError;
use crate::form::UploadForm;
use crate::state::AppState;

/// Build the application router.
pub fn router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/", post(upload))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

/// Resize the uploaded image and fit it to `target_kb`.
async fn upload(State(state): State<AppState>, multipart: Multipart) -> Result<Response, ApiError> {
    let form = UploadForm::from_multipart(multipart).await?;
    let upload_bytes = form.image.len();
    let fitter = state.fitter.clone();
    let started = Instant::now();

    let result = tokio::task::spawn_blocking(move || fitter.fit(&form.request()))
        .await
        .map_err(|e| ApiError::Worker(e.to_string()))??;

    info!(
        outcome = result.outcome.name(),
        quality = result.outcome.quality(),
        upload_bytes,
        output_bytes = result.bytes.len(),
        original_width = result.original.width,
        original_height = result.original.height,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "image fitted"
    );

    fitted_response(result)
}

fn fitted_response(result: EncodingResult) -> Result<Response, ApiError> {
    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("image/jpeg"));
    headers.insert(
        header::CONTENT_DISPOSITION,
        text_value(&format!("attachment; filename=\"{}\"", result.file_name()))?,
    );
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(result.bytes.len()));
    headers.insert(
        HeaderName::from_static("x-original-width"),
        HeaderValue::from(result.original.width),
    );
    headers.insert(
        HeaderName::from_static("x-original-height"),
        HeaderValue::from(result.original.height),
    );
    headers.insert(
        HeaderName::from_static("x-original-size-kb"),
        text_value(&format!("{:.2}", result.original.size_kb))?,
    );
    headers.insert(
        HeaderName::from_static("x-fit-outcome"),
        HeaderValue::from_static(result.outcome.name()),
    );
    if let Some(quality) = result.outcome.quality() {
        headers.insert(
            HeaderName::from_static("x-jpeg-quality"),
            HeaderValue::from(u16::from(quality)),
        );
    }

    let mut response = Response::new(Body::from(result.bytes));
    *response.headers_mut() = headers;
    Ok(response)
}

fn text_value(value: &str) -> Result<HeaderValue, ApiError> {
    HeaderValue::from_str(value).map_err(|e| ApiError::Response(e.to_string()))
}
