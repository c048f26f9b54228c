// src/handlers/reviews.rs
// DOCUMENTATION: HTTP handlers for review operations
// PURPOSE: Parse requests, call services, return enveloped responses

use super::{positive_id, AuthUser};
use crate::db::Database;
use crate::errors::AppError;
use crate::models::{ApiResponse, CreateReviewRequest, UpdateReviewRequest};
use crate::services::{ReviewOrder, ReviewService};
use actix_web::{web, HttpResponse, Responder};

/// GET /api/review/get/{reviewId}
pub async fn get_review<D: Database>(
    db: web::Data<D>,
    path: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let id = positive_id(path.into_inner(), "reviewId")?;
    let review = ReviewService::get_review(db.get_ref(), id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(review)))
}

/// POST /api/review
/// Create a review for a restroom and refresh its average rating
pub async fn create_review<D: Database>(
    db: web::Data<D>,
    user: AuthUser,
    req: web::Json<CreateReviewRequest>,
) -> Result<impl Responder, AppError> {
    let review = ReviewService::create_review(db.get_ref(), user.id(), req.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(review)))
}

/// PATCH /api/review/{reviewId}
pub async fn update_review<D: Database>(
    db: web::Data<D>,
    user: AuthUser,
    path: web::Path<i64>,
    req: web::Json<UpdateReviewRequest>,
) -> Result<impl Responder, AppError> {
    let id = positive_id(path.into_inner(), "reviewId")?;
    let review =
        ReviewService::update_review(db.get_ref(), user.id(), id, req.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(review)))
}

/// DELETE /api/review/{reviewId}
pub async fn delete_review<D: Database>(
    db: web::Data<D>,
    user: AuthUser,
    path: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let id = positive_id(path.into_inner(), "reviewId")?;
    ReviewService::delete_review(db.get_ref(), user.id(), id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Review deleted")))
}

/// GET /api/review/list
/// Reviews written by the caller, newest first
pub async fn list_my_reviews<D: Database>(
    db: web::Data<D>,
    user: AuthUser,
) -> Result<impl Responder, AppError> {
    let reviews = ReviewService::list_by_user(db.get_ref(), user.id()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(reviews)))
}

async fn list_for_restroom<D: Database>(
    db: &D,
    restroom_id: i64,
    order: ReviewOrder,
) -> Result<HttpResponse, AppError> {
    let restroom_id = positive_id(restroom_id, "restroomId")?;
    let reviews = ReviewService::list_by_restroom(db, restroom_id, order).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(reviews)))
}

/// GET /api/review/list/latest/{restroomId}
pub async fn list_latest<D: Database>(
    db: web::Data<D>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    list_for_restroom(db.get_ref(), path.into_inner(), ReviewOrder::Latest).await
}

/// GET /api/review/list/high-rating/{restroomId}
pub async fn list_high_rating<D: Database>(
    db: web::Data<D>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    list_for_restroom(db.get_ref(), path.into_inner(), ReviewOrder::HighRating).await
}

/// GET /api/review/list/low-rating/{restroomId}
pub async fn list_low_rating<D: Database>(
    db: web::Data<D>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    list_for_restroom(db.get_ref(), path.into_inner(), ReviewOrder::LowRating).await
}

/// Configure review routes
pub fn config<D: Database>(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/review")
            .route("", web::post().to(create_review::<D>))
            .route("/get/{review_id}", web::get().to(get_review::<D>))
            .route("/list", web::get().to(list_my_reviews::<D>))
            .route("/list/latest/{restroom_id}", web::get().to(list_latest::<D>))
            .route(
                "/list/high-rating/{restroom_id}",
                web::get().to(list_high_rating::<D>),
            )
            .route(
                "/list/low-rating/{restroom_id}",
                web::get().to(list_low_rating::<D>),
            )
            .route("/{review_id}", web::patch().to(update_review::<D>))
            .route("/{review_id}", web::delete().to(delete_review::<D>)),
    );
}
