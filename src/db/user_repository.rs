// src/db/user_repository.rs
// DOCUMENTATION: User database operations
// PURPOSE: Lookups and point balance updates for users

use super::PgTransaction;
use crate::errors::AppError;
use crate::models::{NewUser, User};
use async_trait::async_trait;

#[async_trait]
pub trait UserRepository: Send {
    /// Active user by id
    async fn find_user(&mut self, id: i64) -> Result<Option<User>, AppError>;

    async fn insert_user(&mut self, user: &NewUser) -> Result<User, AppError>;

    /// Add `points` to the user's balance and return the updated record
    async fn add_points(&mut self, id: i64, points: i32) -> Result<User, AppError>;
}

#[async_trait]
impl UserRepository for PgTransaction {
    async fn find_user(&mut self, id: i64) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1 AND active")
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(|e| {
                log::error!("Failed to fetch user {}: {}", id, e);
                AppError::DatabaseError(format!("Fetch user failed: {}", e))
            })
    }

    async fn insert_user(&mut self, user: &NewUser) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (nickname, point)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(&user.nickname)
        .bind(user.point)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| {
            log::error!("Failed to create user: {}", e);
            AppError::DatabaseError(format!("Create user failed: {}", e))
        })
    }

    async fn add_points(&mut self, id: i64, points: i32) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET point = point + $2, updated_at = NOW()
            WHERE id = $1 AND active
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(points)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(|e| {
            log::error!("Failed to add points to user {}: {}", id, e);
            AppError::DatabaseError(format!("Add points failed: {}", e))
        })?
        .ok_or(AppError::UserNotFound(id))
    }
}
