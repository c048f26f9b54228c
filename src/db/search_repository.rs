// src/db/search_repository.rs
// DOCUMENTATION: Search history database operations

use super::PgTransaction;
use crate::errors::AppError;
use crate::models::{AddressResult, SearchHistory};
use async_trait::async_trait;

#[async_trait]
pub trait SearchRepository: Send {
    async fn insert_search(
        &mut self,
        user_id: i64,
        address: &AddressResult,
    ) -> Result<SearchHistory, AppError>;

    /// Mark a history row as picked by the user
    async fn mark_search_clicked(&mut self, id: i64) -> Result<SearchHistory, AppError>;

    /// Most recently clicked search of the user
    async fn latest_clicked_search(
        &mut self,
        user_id: i64,
    ) -> Result<Option<SearchHistory>, AppError>;
}

#[async_trait]
impl SearchRepository for PgTransaction {
    async fn insert_search(
        &mut self,
        user_id: i64,
        address: &AddressResult,
    ) -> Result<SearchHistory, AppError> {
        sqlx::query_as::<_, SearchHistory>(
            r#"
            INSERT INTO search_histories (user_id, name, road_address, land_lot_address)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(&address.name)
        .bind(&address.road_address)
        .bind(&address.land_lot_address)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| {
            log::error!("Failed to record search for user {}: {}", user_id, e);
            AppError::DatabaseError(format!("Record search failed: {}", e))
        })
    }

    async fn mark_search_clicked(&mut self, id: i64) -> Result<SearchHistory, AppError> {
        sqlx::query_as::<_, SearchHistory>(
            r#"
            UPDATE search_histories
            SET clicked = true, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(|e| {
            log::error!("Failed to mark search {} clicked: {}", id, e);
            AppError::DatabaseError(format!("Click search failed: {}", e))
        })?
        .ok_or_else(|| AppError::SearchHistoryNotFound(format!("id {}", id)))
    }

    async fn latest_clicked_search(
        &mut self,
        user_id: i64,
    ) -> Result<Option<SearchHistory>, AppError> {
        sqlx::query_as::<_, SearchHistory>(
            r#"
            SELECT * FROM search_histories
            WHERE user_id = $1 AND clicked
            ORDER BY updated_at DESC, id DESC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(|e| {
            log::error!("Failed to fetch recent search for user {}: {}", user_id, e);
            AppError::DatabaseError(format!("Fetch recent search failed: {}", e))
        })
    }
}
