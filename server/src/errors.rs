// bookshop_app/src/errors.rs

use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

use bookshop::Error as StoreError;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Validation Error: {0}")]
  Validation(String),

  #[error("Resource Not Found: {0}")]
  NotFound(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("{source}")]
  Store {
    #[from] // Allows conversion from the library's error with `?`
    source: StoreError,
  },

  #[error("Internal Server Error: {0}")]
  Internal(String), // For miscellaneous errors
}

// Allow anyhow::Error to be converted into AppError::Internal for convenience
// in startup code using `?` on functions returning anyhow::Result.
impl From<anyhow::Error> for AppError {
  fn from(err: anyhow::Error) -> Self {
    AppError::Internal(err.to_string())
  }
}

impl ResponseError for AppError {
  fn error_response(&self) -> HttpResponse {
    // Log the full error when it's turned into a response
    tracing::error!(application_error = %self, "Responding with error");
    match self {
      AppError::Validation(m) => HttpResponse::BadRequest().json(json!({"error": m})),
      AppError::NotFound(m) => HttpResponse::NotFound().json(json!({"error": m})),
      AppError::Config(m) => {
        HttpResponse::InternalServerError().json(json!({"error": "Configuration issue", "detail": m}))
      }
      AppError::Store { source } => match source {
        StoreError::NotFound { .. } => HttpResponse::NotFound().json(json!({"error": source.to_string()})),
        StoreError::Validation { .. } => HttpResponse::BadRequest().json(json!({"error": source.to_string()})),
        StoreError::Duplicate { .. } => HttpResponse::Conflict().json(json!({"error": source.to_string()})),
        StoreError::Unavailable { .. } => {
          HttpResponse::ServiceUnavailable().json(json!({"error": "Store unavailable"}))
        }
        StoreError::Internal { .. } => {
          HttpResponse::InternalServerError().json(json!({"error": "Store operation failed"}))
        }
      },
      AppError::Internal(m) => {
        HttpResponse::InternalServerError().json(json!({"error": "An internal error occurred", "detail": m}))
      }
    }
  }
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;
