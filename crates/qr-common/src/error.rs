//! Error types for qr-studio.

use thiserror::Error;

/// Result type alias using QrError.
pub type QrResult<T> = Result<T, QrError>;

/// Primary error type for QR generation.
#[derive(Debug, Error)]
pub enum QrError {
    // === Input Errors ===
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Invalid value for '{param}': {message}")]
    InvalidParameter { param: String, message: String },

    // === Rendering Errors ===
    #[error("QR encoding failed: {0}")]
    Encoding(String),

    #[error("Image error: {0}")]
    Image(String),

    // === Service Errors ===
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl QrError {
    /// Shorthand for a parameter validation failure.
    pub fn invalid(param: impl Into<String>, message: impl Into<String>) -> Self {
        QrError::InvalidParameter {
            param: param.into(),
            message: message.into(),
        }
    }

    /// Error code surfaced to clients.
    pub fn error_code(&self) -> &'static str {
        match self {
            QrError::Validation(_) | QrError::InvalidParameter { .. } => "ValidationError",
            QrError::Encoding(_) => "EncodingError",
            QrError::Image(_) => "ImageError",
            QrError::NotFound(_) => "NotFound",
            QrError::Internal(_) => "InternalError",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            QrError::Validation(_) | QrError::InvalidParameter { .. } => 400,
            QrError::NotFound(_) => 404,
            QrError::Encoding(_) | QrError::Image(_) => 422,
            QrError::Internal(_) => 500,
        }
    }
}

impl From<std::io::Error> for QrError {
    fn from(err: std::io::Error) -> Self {
        QrError::Internal(err.to_string())
    }
}
