// src/errors.rs
// DOCUMENTATION: Custom error types and HTTP responses
// PURPOSE: Centralized error handling for entire application

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use thiserror::Error;
use validator::ValidationErrors;

/// Application-specific error types
/// DOCUMENTATION: Every variant carries a status tag, a two-digit code and
/// an HTTP status. Handlers return it directly and actix renders it as the
/// standard `{code, msg, data}` envelope.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Review not found with id: {0}")]
    ReviewNotFound(i64),

    #[error("Restroom not found with id: {0}")]
    RestroomNotFound(i64),

    #[error("User not found with id: {0}")]
    UserNotFound(i64),

    #[error("Search history not found: {0}")]
    SearchHistoryNotFound(String),

    #[error("Missing parameter: {0}")]
    MissingParameter(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Malformed JSON body: {0}")]
    JsonParse(String),

    #[error("{0}")]
    ValidationError(String),

    #[error("Only the author of the review may modify it")]
    Forbidden,

    #[error("Invalid authentication token: {0}")]
    Unauthorized(String),

    #[error("Purchase token has already been redeemed")]
    DuplicatePurchase,

    #[error("External API error: {0}")]
    ExternalApiError(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// Status tag and two-digit code reported in the error envelope
    pub fn status_tag(&self) -> (&'static str, &'static str) {
        match self {
            AppError::InternalError(_) | AppError::DatabaseError(_) => {
                ("INTERNAL_SERVER_ERROR", "01")
            }
            AppError::MissingParameter(_) => ("NEED_MORE_PARAMETER", "02"),
            AppError::InvalidParameter(_) => ("INVALID_PARAMETER", "03"),
            AppError::JsonParse(_) => ("JSON_PARSE_EXCEPTION", "04"),
            AppError::Forbidden => ("AUTH_EXCEPTION", "05"),
            AppError::Unauthorized(_) => ("INVALID_TOKEN_EXCEPTION", "06"),
            AppError::UserNotFound(_) => ("USER_NOT_FOUND_EXCEPTION", "08"),
            AppError::ExternalApiError(_) => ("EXTERNAL_API_EXCEPTION", "12"),
            AppError::SearchHistoryNotFound(_) => ("SEARCH_HISTORY_NOT_FOUND", "13"),
            AppError::ReviewNotFound(_) => ("REVIEW_NOT_FOUND", "16"),
            AppError::RestroomNotFound(_) => ("RESTROOM_NOT_FOUND", "17"),
            AppError::DuplicatePurchase => ("DUPLICATE_PURCHASE", "20"),
            AppError::ValidationError(_) => ("VALIDATION_EXCEPTION", "23"),
            AppError::RateLimitExceeded => ("RATE_LIMIT_EXCEEDED", "29"),
        }
    }

    /// Build a validation error from the first failing field
    /// DOCUMENTATION: Fields are visited in name order so the reported
    /// message is stable when several fields fail at once.
    pub fn from_validation(errors: &ValidationErrors) -> Self {
        let field_errors = errors.field_errors();
        let mut fields: Vec<_> = field_errors.iter().collect();
        fields.sort_by_key(|(name, _)| **name);

        let message = fields
            .into_iter()
            .flat_map(|(name, errs)| errs.iter().map(move |e| (name, e)))
            .next()
            .map(|(name, e)| match &e.message {
                Some(msg) => msg.to_string(),
                None => format!("{} is invalid", name),
            })
            .unwrap_or_else(|| errors.to_string());

        AppError::ValidationError(message)
    }
}

/// Convert AppError to HTTP response
/// DOCUMENTATION: Maps error types to HTTP status codes and the error envelope
impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let (status, code) = self.status_tag();

        let body = json!({
            "code": code,
            "msg": "fail",
            "data": {
                "status": status,
                "msg": self.to_string()
            }
        });

        HttpResponse::build(self.status_code()).json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ReviewNotFound(_)
            | AppError::RestroomNotFound(_)
            | AppError::UserNotFound(_)
            | AppError::SearchHistoryNotFound(_) => StatusCode::NOT_FOUND,
            AppError::MissingParameter(_)
            | AppError::InvalidParameter(_)
            | AppError::JsonParse(_)
            | AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::DuplicatePurchase => StatusCode::CONFLICT,
            AppError::ExternalApiError(_) => StatusCode::BAD_GATEWAY,
            AppError::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
            AppError::DatabaseError(_) | AppError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}
