//! HTTP error mapping.
//!
//! Every failure is reported as a plain-text body. The status separates
//! malformed requests (4xx) from requests the encoder cannot satisfy (422)
//! and from server faults (5xx).

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kbfit_core::FitError;
use thiserror::Error;
use tracing::{error, warn};

/// Problems with the submitted form itself.
#[derive(Debug, Error)]
pub enum FormError {
    #[error("Malformed form data: {}", .0.body_text())]
    Multipart(#[from] MultipartError),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Field {name} must be a non-negative integer, got {value:?}")]
    InvalidField { name: &'static str, value: String },
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Fit(#[from] FitError),

    #[error("Image processing task failed: {0}")]
    Worker(String),

    #[error("Could not build response: {0}")]
    Response(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Form(FormError::Multipart(e)) => e.status(),
            ApiError::Form(_) => StatusCode::BAD_REQUEST,
            ApiError::Fit(e) => match e {
                FitError::NoFileProvided
                | FitError::InvalidTarget(_)
                | FitError::TargetTooLarge { .. }
                | FitError::DimensionsTooLarge { .. }
                | FitError::Resize(_) => StatusCode::BAD_REQUEST,
                FitError::Decode(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
                FitError::CompressionUnattainable { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                FitError::InvalidConfig(_) | FitError::Encode(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            ApiError::Worker(_) | ApiError::Response(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_http_error(&self) -> (StatusCode, String) {
        (self.status(), self.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.to_http_error();
        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }
        (status, message).into_response()
    }
}
