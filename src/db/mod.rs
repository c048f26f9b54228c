// src/db/mod.rs
// DOCUMENTATION: Database module organization
// PURPOSE: Transaction seam shared by the PostgreSQL and in-memory stores

pub mod memory;
pub mod order_repository;
pub mod postgres;
pub mod restroom_repository;
pub mod review_repository;
pub mod search_repository;
pub mod seed;
pub mod user_repository;

pub use memory::{MemoryDatabase, MemoryTransaction};
pub use order_repository::OrderRepository;
pub use postgres::{PgDatabase, PgTransaction};
pub use restroom_repository::RestroomRepository;
pub use review_repository::ReviewRepository;
pub use search_repository::SearchRepository;
pub use seed::{apply_seed, SeedData, SeedStats};
pub use user_repository::UserRepository;

use crate::errors::AppError;
use async_trait::async_trait;

/// A store that hands out transactions
/// DOCUMENTATION: Every service method calls `begin` once, does all of its
/// reads and writes through the returned handle and then commits. Dropping
/// the handle without committing discards every write made through it.
#[async_trait]
pub trait Database: Send + Sync + 'static {
    type Tx: Transaction;

    async fn begin(&self) -> Result<Self::Tx, AppError>;
}

/// Open unit of work over every repository
#[async_trait]
pub trait Transaction:
    UserRepository
    + RestroomRepository
    + ReviewRepository
    + SearchRepository
    + OrderRepository
    + Send
    + Sized
{
    async fn commit(self) -> Result<(), AppError>;
}
