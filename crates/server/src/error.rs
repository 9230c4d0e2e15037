use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use standings_export::ExportError;
use standings_ocr::PipelineError;
use thiserror::Error;

use crate::pages;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("No file part in the request.")]
    NoFilePart,
    #[error("Malformed upload: {0}")]
    Multipart(#[from] MultipartError),
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
    #[error("Failed to write standings: {0}")]
    Export(#[from] ExportError),
    #[error("No standings have been produced yet.")]
    NoResult,
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<tokio::task::JoinError> for AppError {
    fn from(e: tokio::task::JoinError) -> Self {
        AppError::Internal(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::NoFilePart => {
                tracing::warn!("upload rejected: no file part");
                (StatusCode::BAD_REQUEST, self.to_string()).into_response()
            }
            AppError::Multipart(e) => {
                tracing::warn!("upload rejected: {e}");
                (e.status(), Html(pages::error(&self.to_string()))).into_response()
            }
            AppError::NoResult => (StatusCode::NOT_FOUND, Html(pages::error(&self.to_string()))).into_response(),
            AppError::Pipeline(_) | AppError::Export(_) | AppError::Internal(_) => {
                tracing::error!("ranking run failed: {self}");
                (StatusCode::INTERNAL_SERVER_ERROR, Html(pages::error(&self.to_string()))).into_response()
            }
        }
    }
}
