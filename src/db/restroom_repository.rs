// src/db/restroom_repository.rs
// DOCUMENTATION: Restroom database operations
// PURPOSE: Restroom lookup and the derived average rating column

use super::PgTransaction;
use crate::errors::AppError;
use crate::models::{NewRestroom, Restroom};
use async_trait::async_trait;

#[async_trait]
pub trait RestroomRepository: Send {
    async fn find_restroom(&mut self, id: i64) -> Result<Option<Restroom>, AppError>;

    /// Like `find_restroom`, but holds the row until the transaction ends so
    /// concurrent review writes on one restroom recompute its average in turn
    async fn find_restroom_for_update(&mut self, id: i64) -> Result<Option<Restroom>, AppError>;

    async fn insert_restroom(&mut self, restroom: &NewRestroom) -> Result<Restroom, AppError>;

    /// Overwrite the stored average; fails with RestroomNotFound if absent
    async fn update_average_rating(&mut self, id: i64, average: f32) -> Result<(), AppError>;
}

#[async_trait]
impl RestroomRepository for PgTransaction {
    async fn find_restroom(&mut self, id: i64) -> Result<Option<Restroom>, AppError> {
        sqlx::query_as::<_, Restroom>("SELECT * FROM restrooms WHERE id = $1 AND active")
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(|e| {
                log::error!("Failed to fetch restroom {}: {}", id, e);
                AppError::DatabaseError(format!("Fetch restroom failed: {}", e))
            })
    }

    async fn find_restroom_for_update(&mut self, id: i64) -> Result<Option<Restroom>, AppError> {
        sqlx::query_as::<_, Restroom>("SELECT * FROM restrooms WHERE id = $1 AND active FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(|e| {
                log::error!("Failed to lock restroom {}: {}", id, e);
                AppError::DatabaseError(format!("Lock restroom failed: {}", e))
            })
    }

    async fn insert_restroom(&mut self, restroom: &NewRestroom) -> Result<Restroom, AppError> {
        sqlx::query_as::<_, Restroom>(
            r#"
            INSERT INTO restrooms (name, road_address, latitude, longitude)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&restroom.name)
        .bind(&restroom.road_address)
        .bind(restroom.latitude)
        .bind(restroom.longitude)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| {
            log::error!("Failed to create restroom: {}", e);
            AppError::DatabaseError(format!("Create restroom failed: {}", e))
        })
    }

    async fn update_average_rating(&mut self, id: i64, average: f32) -> Result<(), AppError> {
        let rows = sqlx::query(
            "UPDATE restrooms SET average_rating = $2, updated_at = NOW() WHERE id = $1 AND active",
        )
        .bind(id)
        .bind(average)
        .execute(&mut *self.tx)
        .await
        .map_err(|e| {
            log::error!("Failed to update rating of restroom {}: {}", id, e);
            AppError::DatabaseError(format!("Update average rating failed: {}", e))
        })?
        .rows_affected();

        if rows == 0 {
            return Err(AppError::RestroomNotFound(id));
        }

        Ok(())
    }
}
