use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("No frames available")]
    NoFrames,

    #[error("Not found")]
    NotFound,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<std::io::Error> for ApiError {
    fn from(e: std::io::Error) -> Self {
        if e.kind() == std::io::ErrorKind::NotFound {
            ApiError::NotFound
        } else {
            ApiError::Internal(e.to_string())
        }
    }
}

/// Failure converting a single input file. Always contained to that file.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Resample error: {0}")]
    Resample(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File still changing after {polls} polls: {}", .path.display())]
    Timeout { path: PathBuf, polls: u32 },

    #[error("Worker failed: {0}")]
    Worker(String),
}

impl From<image::ImageError> for ConvertError {
    fn from(e: image::ImageError) -> Self {
        use image::ImageError;
        match e {
            ImageError::IoError(io) => ConvertError::Io(io),
            ImageError::Decoding(_) | ImageError::Unsupported(_) => {
                ConvertError::Decode(e.to_string())
            }
            other => ConvertError::Resample(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::NoFrames => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };

        let body = Json(json!({
            "status": status.as_u16(),
            "error": message,
        }));

        (status, body).into_response()
    }
}
