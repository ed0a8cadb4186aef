use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
};
use serde_json::json;
use axum::Json;
use thiserror::Error;

/// Failures raised by the extraction pipelines.
///
/// Per-field problems never show up here: they are absorbed as absent values.
/// These are the file-level errors that knock a whole input out of a batch.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Failed to open workbook: {0}")]
    Workbook(String),

    #[error("Sheet not found: {name}")]
    MissingSheet { name: String },

    #[error("Line item not found: {label}")]
    MissingLineItem { label: String },

    #[error("Failed to export report: {0}")]
    Export(String),

    #[error("Invalid field catalog: {0}")]
    Catalog(String),

    #[error("Failed to fetch file: {0}")]
    Download(String),

    #[error("File too large: {size} bytes (limit {limit} bytes)")]
    FileTooLarge { size: usize, limit: usize },
}

impl From<rust_xlsxwriter::XlsxError> for ExtractError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        ExtractError::Export(err.to_string())
    }
}

#[derive(Debug)]
pub enum AppError {
    InvalidInput(String),
    IoError(std::io::Error),
    ParseError(String),
    Internal(String),
    HttpError(String),
    FileProcessingError(String),
    DataFrameError(String),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::HttpError(msg) => write!(f, "HTTP Error: {}", msg),
            AppError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            AppError::IoError(err) => write!(f, "IO error: {}", err),
            AppError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
            AppError::FileProcessingError(msg) => write!(f, "File processing error: {}", msg),
            AppError::DataFrameError(msg) => write!(f, "DataFrame error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::ParseError(err.to_string())
    }
}

impl From<polars::error::PolarsError> for AppError {
    fn from(err: polars::error::PolarsError) -> Self {
        AppError::DataFrameError(err.to_string())
    }
}

impl From<ExtractError> for AppError {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::Download(_) => AppError::HttpError(err.to_string()),
            ExtractError::FileTooLarge { .. } | ExtractError::MissingSheet { .. } | ExtractError::MissingLineItem { .. } => {
                AppError::InvalidInput(err.to_string())
            }
            ExtractError::Catalog(_) => AppError::ParseError(err.to_string()),
            ExtractError::Workbook(_) | ExtractError::Export(_) => AppError::FileProcessingError(err.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::HttpError(msg) => (StatusCode::BAD_GATEWAY, msg),
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::IoError(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
            AppError::ParseError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::FileProcessingError(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            AppError::DataFrameError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
