use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::fmt;

use crate::models::ApiResponse;

#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    StorageError(String),
    InvalidRequest(String),
    Unauthorized(String),
    ExternalService(String),
    Configuration(String),
}

impl AppError {
    /// Message shown to clients. Storage details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            AppError::StorageError(_) => "Something went wrong".to_string(),
            AppError::Configuration(_) => "Service is not configured".to_string(),
            AppError::NotFound(msg)
            | AppError::InvalidRequest(msg)
            | AppError::Unauthorized(msg)
            | AppError::ExternalService(msg) => msg.clone(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::StorageError(msg) => write!(f, "Storage error: {}", msg),
            AppError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::ExternalService(msg) => write!(f, "External service error: {}", msg),
            AppError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        AppError::StorageError(err.to_string())
    }
}

impl From<mongodb::bson::ser::Error> for AppError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        AppError::StorageError(err.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::ExternalService(err.to_string())
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::StorageError(_) | AppError::Configuration(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::ExternalService(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ApiResponse::failure(self.public_message()))
    }
}
