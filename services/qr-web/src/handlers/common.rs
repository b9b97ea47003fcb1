//! Shared response helpers.

use axum::{
    extract::multipart::MultipartError,
    http::{header, HeaderName, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use qr_common::QrError;
use serde::Serialize;
use tracing::{error, warn};
use uuid::Uuid;

use crate::downloads::DownloadStore;

pub const X_DOWNLOAD_URL: HeaderName = HeaderName::from_static("x-download-url");

// ============================================================================
// Error Responses
// ============================================================================

/// JSON body for every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
}

/// A `QrError` on its way out as an HTTP response.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    error: QrError,
}

impl ApiError {
    pub fn with_status(status: StatusCode, error: QrError) -> Self {
        Self { status, error }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<QrError> for ApiError {
    fn from(error: QrError) -> Self {
        let status = StatusCode::from_u16(error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        Self { status, error }
    }
}

/// Body limit breaches keep their 413; other multipart problems are bad input.
impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        let status = err.status();
        let status = if status.is_client_error() {
            status
        } else {
            StatusCode::BAD_REQUEST
        };
        Self::with_status(status, QrError::Validation(err.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(error = %self.error, "Request failed");
        } else {
            warn!(code = self.error.error_code(), error = %self.error, "Rejected request");
        }

        let body = ErrorBody {
            error: self.error.error_code(),
            message: self.error.to_string(),
        };
        (self.status, Json(body)).into_response()
    }
}

// ============================================================================
// PNG Responses
// ============================================================================

/// Inline PNG preview with a link to the stored download.
pub fn png_response(png: Vec<u8>, id: &Uuid) -> Response {
    let disposition = format!("inline; filename=\"{}\"", DownloadStore::file_name(id));
    let download_url = format!("/download/{}", id.simple());
    (
        [
            (header::CONTENT_TYPE, "image/png".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
            (header::CACHE_CONTROL, "no-store".to_string()),
            (X_DOWNLOAD_URL, download_url),
        ],
        png,
    )
        .into_response()
}

/// PNG served as a file download.
pub fn attachment_response(png: Vec<u8>, id: &Uuid) -> Response {
    let disposition = format!("attachment; filename=\"{}\"", DownloadStore::file_name(id));
    (
        [
            (header::CONTENT_TYPE, "image/png".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        png,
    )
        .into_response()
}
