use std::fmt;

use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse
};
use serde::Serialize;
use validator::ValidationErrors;

/// Message returned when the business notification could not be delivered.
/// Points the visitor at the phone fallback rather than leaking provider detail.
pub const NOTIFICATION_FAILED_MESSAGE: &str =
    "Failed to send message. Please try again or call us directly.";

#[derive(Debug)]
pub enum AppError {
    ValidationError(Vec<FieldError>),
    RateLimited { retry_after_secs: u64 },
    NotificationFailed,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::ValidationError(errors) => {
                let messages = errors.iter()
                    .map(|e| format!("{}:{}", e.field, e.message))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "validation error: {}", messages)
            }
            AppError::RateLimited { retry_after_secs } => {
                write!(f, "rate limited, retry after {}s", retry_after_secs)
            }
            AppError::NotificationFailed => write!(f, "notification email failed"),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::ValidationError(errors) => {
                serde_json::json!({
                    "error": "Validation failed",
                    "details": errors
                })
            }
            AppError::RateLimited { retry_after_secs } => {
                serde_json::json!({
                    "error": "Too many requests. Please try again later.",
                    "retryAfter": retry_after_secs
                })
            }
            AppError::NotificationFailed => {
                serde_json::json!({ "error": NOTIFICATION_FAILED_MESSAGE })
            }
        };
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            AppError::NotificationFailed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let field_errors = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(|e| FieldError {
                    field: field.to_string(),
                    message: e
                        .message
                        .as_ref()
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| "Invalid value".to_string()),
                })
            })
            .collect();

        AppError::ValidationError(field_errors)
    }
}

#[derive(Debug, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}
