// src/db/review_repository.rs
// DOCUMENTATION: Review database operations
// PURPOSE: Handle CRUD operations for restroom reviews

use super::PgTransaction;
use crate::errors::AppError;
use crate::models::{NewReview, Review, ReviewEdit};
use async_trait::async_trait;

/// Review persistence
/// DOCUMENTATION: Deleted (inactive) reviews are invisible to every read.
/// List queries return reviews in insertion order (ascending id).
#[async_trait]
pub trait ReviewRepository: Send {
    async fn find_review(&mut self, id: i64) -> Result<Option<Review>, AppError>;

    async fn insert_review(&mut self, review: &NewReview) -> Result<Review, AppError>;

    async fn update_review(&mut self, id: i64, edit: &ReviewEdit) -> Result<Review, AppError>;

    /// Soft delete
    async fn deactivate_review(&mut self, id: i64) -> Result<(), AppError>;

    async fn reviews_by_restroom(&mut self, restroom_id: i64) -> Result<Vec<Review>, AppError>;

    async fn reviews_by_user(&mut self, user_id: i64) -> Result<Vec<Review>, AppError>;
}

#[async_trait]
impl ReviewRepository for PgTransaction {
    async fn find_review(&mut self, id: i64) -> Result<Option<Review>, AppError> {
        sqlx::query_as::<_, Review>("SELECT * FROM reviews WHERE id = $1 AND active")
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(|e| {
                log::error!("Failed to fetch review {}: {}", id, e);
                AppError::DatabaseError(format!("Fetch review failed: {}", e))
            })
    }

    async fn insert_review(&mut self, review: &NewReview) -> Result<Review, AppError> {
        sqlx::query_as::<_, Review>(
            r#"
            INSERT INTO reviews (user_id, restroom_id, content, rating)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(review.user_id)
        .bind(review.restroom_id)
        .bind(&review.content)
        .bind(review.rating)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| {
            log::error!("Failed to create review: {}", e);
            AppError::DatabaseError(format!("Create review failed: {}", e))
        })
    }

    async fn update_review(&mut self, id: i64, edit: &ReviewEdit) -> Result<Review, AppError> {
        sqlx::query_as::<_, Review>(
            r#"
            UPDATE reviews
            SET content = $2, rating = $3, updated_at = NOW()
            WHERE id = $1 AND active
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&edit.content)
        .bind(edit.rating)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(|e| {
            log::error!("Failed to update review {}: {}", id, e);
            AppError::DatabaseError(format!("Update review failed: {}", e))
        })?
        .ok_or(AppError::ReviewNotFound(id))
    }

    async fn deactivate_review(&mut self, id: i64) -> Result<(), AppError> {
        let rows = sqlx::query(
            "UPDATE reviews SET active = false, updated_at = NOW() WHERE id = $1 AND active",
        )
        .bind(id)
        .execute(&mut *self.tx)
        .await
        .map_err(|e| {
            log::error!("Delete failed for review {}: {}", id, e);
            AppError::DatabaseError(format!("Delete review failed: {}", e))
        })?
        .rows_affected();

        if rows == 0 {
            return Err(AppError::ReviewNotFound(id));
        }

        Ok(())
    }

    async fn reviews_by_restroom(&mut self, restroom_id: i64) -> Result<Vec<Review>, AppError> {
        sqlx::query_as::<_, Review>(
            r#"
            SELECT * FROM reviews
            WHERE restroom_id = $1 AND active
            ORDER BY id ASC
            "#,
        )
        .bind(restroom_id)
        .fetch_all(&mut *self.tx)
        .await
        .map_err(|e| {
            log::error!("Failed to fetch reviews for restroom {}: {}", restroom_id, e);
            AppError::DatabaseError(format!("Fetch reviews failed: {}", e))
        })
    }

    async fn reviews_by_user(&mut self, user_id: i64) -> Result<Vec<Review>, AppError> {
        sqlx::query_as::<_, Review>(
            r#"
            SELECT * FROM reviews
            WHERE user_id = $1 AND active
            ORDER BY id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&mut *self.tx)
        .await
        .map_err(|e| {
            log::error!("Failed to fetch reviews for user {}: {}", user_id, e);
            AppError::DatabaseError(format!("Fetch reviews failed: {}", e))
        })
    }
}
