// src/services/review_service.rs
// DOCUMENTATION: Business logic for reviews
// PURPOSE: Intermediary between handlers and repositories; owns the
// ownership check and keeps restroom ratings in sync with every write

use crate::db::{Database, RestroomRepository, ReviewRepository, Transaction, UserRepository};
use crate::errors::AppError;
use crate::models::{CreateReviewRequest, Review, ReviewResponse, UpdateReviewRequest};
use crate::services::rating::{refresh_average_rating, sort_reviews, ReviewOrder};

pub struct ReviewService;

impl ReviewService {
    /// Get a single review
    pub async fn get_review<D: Database>(db: &D, id: i64) -> Result<ReviewResponse, AppError> {
        let mut tx = db.begin().await?;
        let review = tx
            .find_review(id)
            .await?
            .ok_or(AppError::ReviewNotFound(id))?;
        tx.commit().await?;

        Ok(review.to_response())
    }

    /// Create a review and refresh the restroom's average
    /// DOCUMENTATION: User and restroom are both checked before the insert,
    /// so a missing restroom leaves nothing behind
    pub async fn create_review<D: Database>(
        db: &D,
        user_id: i64,
        req: CreateReviewRequest,
    ) -> Result<ReviewResponse, AppError> {
        let new_review = req.into_new_review(user_id)?;

        let mut tx = db.begin().await?;

        if tx.find_user(user_id).await?.is_none() {
            return Err(AppError::UserNotFound(user_id));
        }
        if tx.find_restroom_for_update(new_review.restroom_id).await?.is_none() {
            return Err(AppError::RestroomNotFound(new_review.restroom_id));
        }

        let review = tx.insert_review(&new_review).await?;
        refresh_average_rating(&mut tx, review.restroom_id).await?;
        tx.commit().await?;

        log::info!(
            "User {} reviewed restroom {} (review {}, rating {})",
            user_id,
            review.restroom_id,
            review.id,
            review.rating
        );
        Ok(review.to_response())
    }

    /// Edit a review owned by `user_id`
    pub async fn update_review<D: Database>(
        db: &D,
        user_id: i64,
        id: i64,
        req: UpdateReviewRequest,
    ) -> Result<ReviewResponse, AppError> {
        let edit = req.into_edit()?;

        let mut tx = db.begin().await?;
        let existing = Self::owned_review(&mut tx, user_id, id).await?;

        let review = tx.update_review(existing.id, &edit).await?;
        refresh_average_rating(&mut tx, review.restroom_id).await?;
        tx.commit().await?;

        log::info!("User {} updated review {}", user_id, id);
        Ok(review.to_response())
    }

    /// Soft delete a review owned by `user_id`
    pub async fn delete_review<D: Database>(db: &D, user_id: i64, id: i64) -> Result<(), AppError> {
        let mut tx = db.begin().await?;
        let existing = Self::owned_review(&mut tx, user_id, id).await?;

        tx.deactivate_review(existing.id).await?;
        refresh_average_rating(&mut tx, existing.restroom_id).await?;
        tx.commit().await?;

        log::info!("User {} deleted review {}", user_id, id);
        Ok(())
    }

    /// All reviews written by the user, newest first
    pub async fn list_by_user<D: Database>(
        db: &D,
        user_id: i64,
    ) -> Result<Vec<ReviewResponse>, AppError> {
        let mut tx = db.begin().await?;

        if tx.find_user(user_id).await?.is_none() {
            return Err(AppError::UserNotFound(user_id));
        }

        let reviews = tx.reviews_by_user(user_id).await?;
        tx.commit().await?;

        Ok(Self::to_responses(sort_reviews(reviews, ReviewOrder::Latest)))
    }

    /// Reviews of a restroom in the requested order
    pub async fn list_by_restroom<D: Database>(
        db: &D,
        restroom_id: i64,
        order: ReviewOrder,
    ) -> Result<Vec<ReviewResponse>, AppError> {
        let mut tx = db.begin().await?;

        if tx.find_restroom(restroom_id).await?.is_none() {
            return Err(AppError::RestroomNotFound(restroom_id));
        }

        let reviews = tx.reviews_by_restroom(restroom_id).await?;
        tx.commit().await?;

        Ok(Self::to_responses(sort_reviews(reviews, order)))
    }

    async fn owned_review<T: Transaction>(
        tx: &mut T,
        user_id: i64,
        id: i64,
    ) -> Result<Review, AppError> {
        let review = tx
            .find_review(id)
            .await?
            .ok_or(AppError::ReviewNotFound(id))?;

        if review.user_id != user_id {
            log::warn!(
                "User {} attempted to modify review {} owned by {}",
                user_id,
                id,
                review.user_id
            );
            return Err(AppError::Forbidden);
        }

        Ok(review)
    }

    fn to_responses(reviews: Vec<Review>) -> Vec<ReviewResponse> {
        reviews.iter().map(Review::to_response).collect()
    }
}
