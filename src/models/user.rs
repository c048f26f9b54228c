// src/models/user.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Application user referenced by reviews, searches and orders
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub nickname: String,
    /// In-app point balance
    pub point: i32,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User record as it appears in a seed file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub nickname: String,
    #[serde(default)]
    pub point: i32,
}
