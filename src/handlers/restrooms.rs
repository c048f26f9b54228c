// src/handlers/restrooms.rs

use super::positive_id;
use crate::db::Database;
use crate::errors::AppError;
use crate::models::ApiResponse;
use crate::services::RestroomService;
use actix_web::{web, HttpResponse, Responder};

/// GET /api/restroom/{restroomId}
/// Restroom details including its current average rating
pub async fn get_restroom<D: Database>(
    db: web::Data<D>,
    path: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let id = positive_id(path.into_inner(), "restroomId")?;
    let restroom = RestroomService::get_restroom(db.get_ref(), id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(restroom)))
}

pub fn config<D: Database>(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/restroom").route("/{restroom_id}", web::get().to(get_restroom::<D>)),
    );
}
