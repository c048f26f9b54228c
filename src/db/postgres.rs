// src/db/postgres.rs
// DOCUMENTATION: PostgreSQL implementation of the transaction seam
// PURPOSE: Wrap a sqlx pool; repository impls live next to their traits

use super::{Database, Transaction};
use crate::errors::AppError;
use async_trait::async_trait;
use sqlx::{PgPool, Postgres};

#[derive(Clone)]
pub struct PgDatabase {
    pool: PgPool,
}

impl PgDatabase {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Open PostgreSQL transaction; rolled back on drop unless committed
pub struct PgTransaction {
    pub(super) tx: sqlx::Transaction<'static, Postgres>,
}

#[async_trait]
impl Database for PgDatabase {
    type Tx = PgTransaction;

    async fn begin(&self) -> Result<PgTransaction, AppError> {
        let tx = self.pool.begin().await.map_err(|e| {
            log::error!("Failed to open transaction: {}", e);
            AppError::DatabaseError(format!("Begin transaction failed: {}", e))
        })?;

        Ok(PgTransaction { tx })
    }
}

#[async_trait]
impl Transaction for PgTransaction {
    async fn commit(self) -> Result<(), AppError> {
        self.tx.commit().await.map_err(|e| {
            log::error!("Failed to commit transaction: {}", e);
            AppError::DatabaseError(format!("Commit failed: {}", e))
        })
    }
}
