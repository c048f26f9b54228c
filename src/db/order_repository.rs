// src/db/order_repository.rs
// DOCUMENTATION: Purchase order database operations

use super::PgTransaction;
use crate::errors::AppError;
use crate::models::{NewOrder, Order};
use async_trait::async_trait;

#[async_trait]
pub trait OrderRepository: Send {
    async fn find_order_by_token(&mut self, token: &str) -> Result<Option<Order>, AppError>;

    async fn insert_order(&mut self, order: &NewOrder) -> Result<Order, AppError>;
}

#[async_trait]
impl OrderRepository for PgTransaction {
    async fn find_order_by_token(&mut self, token: &str) -> Result<Option<Order>, AppError> {
        sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE purchase_token = $1")
            .bind(token)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(|e| {
                log::error!("Failed to fetch order by token: {}", e);
                AppError::DatabaseError(format!("Fetch order failed: {}", e))
            })
    }

    async fn insert_order(&mut self, order: &NewOrder) -> Result<Order, AppError> {
        sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO orders (user_id, purchase_token, product_id, point)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(order.user_id)
        .bind(&order.purchase_token)
        .bind(&order.product_id)
        .bind(order.point)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| insert_order_error(e, order.user_id))
    }
}

const UNIQUE_VIOLATION: &str = "23505";

/// A concurrent redemption of the same token trips the UNIQUE constraint
fn insert_order_error(e: sqlx::Error, user_id: i64) -> AppError {
    let code = e.as_database_error().and_then(|d| d.code());
    if code.as_deref() == Some(UNIQUE_VIOLATION) {
        log::warn!("User {} lost a race redeeming a purchase token", user_id);
        return AppError::DuplicatePurchase;
    }

    log::error!("Failed to create order for user {}: {}", user_id, e);
    AppError::DatabaseError(format!("Create order failed: {}", e))
}
