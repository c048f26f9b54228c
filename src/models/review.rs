// src/models/review.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::borrow::Cow;
use validator::{Validate, ValidationError};

use crate::errors::AppError;

/// Highest star rating a review may carry
pub const MAX_RATING: i32 = 5;

/// User-authored restroom review
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Review {
    pub id: i64,
    pub user_id: i64,
    pub restroom_id: i64,
    pub content: String,
    /// Star rating, 0..=5
    pub rating: i32,
    /// Soft delete flag (false = deleted)
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated review ready to be inserted
#[derive(Debug, Clone)]
pub struct NewReview {
    pub user_id: i64,
    pub restroom_id: i64,
    pub content: String,
    pub rating: i32,
}

/// Request body for POST /api/review
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewRequest {
    #[validate(
        required(message = "restroomId is required"),
        range(min = 1, message = "restroomId must be a positive integer")
    )]
    pub restroom_id: Option<i64>,

    #[validate(
        required(message = "reviewContent is required"),
        custom = "not_blank",
        length(max = 1000, message = "reviewContent must be at most 1000 characters")
    )]
    pub review_content: Option<String>,

    #[validate(
        required(message = "rating is required"),
        range(min = 0, max = 5, message = "rating must be between 0 and 5")
    )]
    pub rating: Option<i32>,
}

impl CreateReviewRequest {
    /// Validate and attach the acting user
    pub fn into_new_review(self, user_id: i64) -> Result<NewReview, AppError> {
        self.validate().map_err(|e| AppError::from_validation(&e))?;

        Ok(NewReview {
            user_id,
            restroom_id: self
                .restroom_id
                .ok_or_else(|| AppError::MissingParameter("restroomId".into()))?,
            content: self
                .review_content
                .ok_or_else(|| AppError::MissingParameter("reviewContent".into()))?,
            rating: self
                .rating
                .ok_or_else(|| AppError::MissingParameter("rating".into()))?,
        })
    }
}

/// Request body for PATCH /api/review/{id}
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReviewRequest {
    #[validate(
        required(message = "reviewContent is required"),
        custom = "not_blank",
        length(max = 1000, message = "reviewContent must be at most 1000 characters")
    )]
    pub review_content: Option<String>,

    #[validate(
        required(message = "rating is required"),
        range(min = 0, max = 5, message = "rating must be between 0 and 5")
    )]
    pub rating: Option<i32>,
}

/// Validated review edit
#[derive(Debug, Clone)]
pub struct ReviewEdit {
    pub content: String,
    pub rating: i32,
}

impl UpdateReviewRequest {
    pub fn into_edit(self) -> Result<ReviewEdit, AppError> {
        self.validate().map_err(|e| AppError::from_validation(&e))?;

        Ok(ReviewEdit {
            content: self
                .review_content
                .ok_or_else(|| AppError::MissingParameter("reviewContent".into()))?,
            rating: self
                .rating
                .ok_or_else(|| AppError::MissingParameter("rating".into()))?,
        })
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some(Cow::from("reviewContent must not be blank"));
        return Err(err);
    }
    Ok(())
}

/// Review response DTO exposed via API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponse {
    pub review_id: i64,
    pub user_id: i64,
    pub restroom_id: i64,
    pub review_content: String,
    pub rating: i32,
    pub created_date: DateTime<Utc>,
    pub updated_date: DateTime<Utc>,
}

impl Review {
    /// Convert database Review into API response
    pub fn to_response(&self) -> ReviewResponse {
        ReviewResponse {
            review_id: self.id,
            user_id: self.user_id,
            restroom_id: self.restroom_id,
            review_content: self.content.clone(),
            rating: self.rating,
            created_date: self.created_at,
            updated_date: self.updated_at,
        }
    }
}
