use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

pub const NO_FOLDER_MESSAGE: &str = "No folder uploaded!";
pub const UPLOAD_FAILED_MESSAGE: &str = "Error occurred during folder upload.";
pub const CLEAR_FAILED_MESSAGE: &str = "Error clearing folders.";

/// Request-level failures. Rendered as short plain-text messages; details
/// only go to the log.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("No files uploaded!")]
    NoFolderUploaded,

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Payload Too Large: {0}")]
    PayloadTooLarge(String),

    #[error("Error during folder upload: {0:#}")]
    Upload(#[from] anyhow::Error),

    #[error("Error clearing folders: {0}")]
    Clear(#[source] std::io::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!("{}", self);

        let (status, message) = match self {
            AppError::NoFolderUploaded => (StatusCode::BAD_REQUEST, NO_FOLDER_MESSAGE.to_string()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::PayloadTooLarge(msg) => (StatusCode::PAYLOAD_TOO_LARGE, msg),
            AppError::Upload(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                UPLOAD_FAILED_MESSAGE.to_string(),
            ),
            AppError::Clear(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                CLEAR_FAILED_MESSAGE.to_string(),
            ),
        };

        (status, message).into_response()
    }
}
