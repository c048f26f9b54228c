// src/services/restroom_service.rs

use crate::db::{Database, RestroomRepository, Transaction};
use crate::errors::AppError;
use crate::models::RestroomResponse;

pub struct RestroomService;

impl RestroomService {
    /// Get a restroom with its current average rating
    pub async fn get_restroom<D: Database>(db: &D, id: i64) -> Result<RestroomResponse, AppError> {
        let mut tx = db.begin().await?;
        let restroom = tx
            .find_restroom(id)
            .await?
            .ok_or(AppError::RestroomNotFound(id))?;
        tx.commit().await?;

        Ok(restroom.to_response())
    }
}
