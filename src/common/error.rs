// src/common/error.rs

use std::collections::HashMap;

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Fallback shown when the backend does not send a `message`.
pub const GENERIC_ERROR_MESSAGE: &str = "An unexpected error occurred.";

// Every error the client side can produce, with `thiserror` for the conversions.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error")]
    ValidationError(#[from] validator::ValidationErrors),

    // Non-2xx answer from the salon backend.
    #[error("Backend answered {status}: {}", .message.as_deref().unwrap_or(GENERIC_ERROR_MESSAGE))]
    Api {
        status: StatusCode,
        message: Option<String>,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Salon data has not been loaded")]
    SalonNotLoaded,

    #[error("Invalid field path: {0}")]
    InvalidFieldPath(String),

    #[error("Booking needs a date, a time and at least one service")]
    DraftIncomplete,

    #[error("{0} not found")]
    NotFound(String),

    #[error("{0} is not available yet")]
    NotImplemented(&'static str),
}

// Error body sent by the backend.
#[derive(Debug, Default, Deserialize)]
pub struct ApiErrorBody {
    pub message: Option<String>,
}

impl AppError {
    /// Text that can be put in front of the user. Detailed causes stay in the logs.
    pub fn user_message(&self) -> String {
        match self {
            AppError::ValidationError(errors) => {
                let field_errors = errors.field_errors();
                let mut fields: Vec<&str> = field_errors.keys().map(|k| k.as_ref()).collect();
                fields.sort_unstable();
                format!("Please fix the errors before saving ({}).", fields.join(", "))
            }
            AppError::Api { message: Some(message), .. } => message.clone(),
            AppError::DraftIncomplete | AppError::NotImplemented(_) | AppError::NotFound(_) => self.to_string(),
            AppError::SalonNotLoaded => "Salon data is still loading.".to_string(),
            e => {
                tracing::error!("Unexpected client error: {}", e);
                GENERIC_ERROR_MESSAGE.to_string()
            }
        }
    }

    /// Per-field messages of a validation failure, keyed by field name.
    pub fn field_messages(&self) -> HashMap<String, Vec<String>> {
        let mut details = HashMap::new();
        if let AppError::ValidationError(errors) = self {
            for (field, field_errors) in errors.field_errors() {
                let messages: Vec<String> = field_errors
                    .iter()
                    .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                    .collect();
                details.insert(field.to_string(), messages);
            }
        }
        details
    }
}

// Convenience `Result` type
pub type AppResult<T> = std::result::Result<T, AppError>;
