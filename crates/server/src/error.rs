use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use imaging::ImagingError;
use pdfkit::PdfError;
use serde::{Deserialize, Serialize};
use text::TextError;

use crate::validation::ValidationError;

pub type ServerResult<T> = Result<T, ServerError>;

const INTERNAL_MESSAGE: &str = "An internal error occurred while processing the request";

/// Server error types
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Text(#[from] TextError),

    #[error(transparent)]
    Image(#[from] ImagingError),

    #[error(transparent)]
    Pdf(#[from] PdfError),

    #[error("The requested resource was not found")]
    NotFound,

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Machine-readable failure category reported as `error.kind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    ValidationError,
    UnsupportedOption,
    PayloadTooLarge,
    DecodeError,
    InvalidImage,
    InvalidDocument,
    WrongPassword,
    NotFound,
    InternalError,
}

impl ErrorKind {
    pub fn status_code(self) -> StatusCode {
        match self {
            ErrorKind::ValidationError | ErrorKind::UnsupportedOption | ErrorKind::DecodeError => {
                StatusCode::BAD_REQUEST
            }
            ErrorKind::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ErrorKind::InvalidImage | ErrorKind::InvalidDocument => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ErrorKind::WrongPassword => StatusCode::FORBIDDEN,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Failure envelope
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub kind: ErrorKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ServerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ServerError::Validation(err) => match err {
                ValidationError::Unsupported { .. } => ErrorKind::UnsupportedOption,
                ValidationError::TooLarge { .. } | ValidationError::BodyTooLarge => {
                    ErrorKind::PayloadTooLarge
                }
                _ => ErrorKind::ValidationError,
            },
            ServerError::Text(err) => match err {
                TextError::Decode { .. } => ErrorKind::DecodeError,
                TextError::UnsupportedAlgorithm(_) | TextError::UnsupportedEncoding(_) => {
                    ErrorKind::UnsupportedOption
                }
                _ => ErrorKind::ValidationError,
            },
            ServerError::Image(err) => match err {
                ImagingError::UnsupportedFormat(_) => ErrorKind::UnsupportedOption,
                ImagingError::InvalidImage(_) => ErrorKind::InvalidImage,
                ImagingError::InvalidDimensions { .. } => ErrorKind::ValidationError,
                _ => ErrorKind::InternalError,
            },
            ServerError::Pdf(err) => match err {
                PdfError::WrongPassword => ErrorKind::WrongPassword,
                PdfError::InvalidDocument(_) => ErrorKind::InvalidDocument,
                _ => ErrorKind::InternalError,
            },
            ServerError::NotFound => ErrorKind::NotFound,
            ServerError::Internal(_) => ErrorKind::InternalError,
        }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        self.kind().status_code()
    }

    /// Request field the error points at, when there is one.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ServerError::Validation(err) => err.field(),
            ServerError::Text(TextError::Decode { .. }) => Some("text"),
            _ => None,
        }
    }

    /// Message safe to return to clients. Internal details stay in the logs.
    pub fn public_message(&self) -> String {
        match self.kind() {
            ErrorKind::InternalError => INTERNAL_MESSAGE.to_string(),
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let kind = self.kind();
        if kind == ErrorKind::InternalError {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, kind = ?kind, "Request rejected");
        }

        let message = self.public_message();
        let body = ErrorResponse {
            success: false,
            message: message.clone(),
            error: ErrorDetail {
                kind,
                message,
                field: self.field().map(str::to_string),
            },
        };

        (kind.status_code(), Json(body)).into_response()
    }
}

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return ValidationError::BodyTooLarge.into();
        }
        ValidationError::Malformed(rejection.body_text()).into()
    }
}

impl From<MultipartRejection> for ServerError {
    fn from(rejection: MultipartRejection) -> Self {
        ValidationError::Malformed(rejection.body_text()).into()
    }
}

impl From<MultipartError> for ServerError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return ValidationError::BodyTooLarge.into();
        }
        ValidationError::Malformed(err.body_text()).into()
    }
}

impl From<tokio::task::JoinError> for ServerError {
    fn from(err: tokio::task::JoinError) -> Self {
        ServerError::Internal(format!("worker task failed: {err}"))
    }
}
