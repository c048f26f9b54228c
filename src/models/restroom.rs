// src/models/restroom.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Physical restroom that reviews attach to
/// DOCUMENTATION: `average_rating` is derived from the restroom's active
/// reviews and rewritten after every review create/update/delete
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Restroom {
    pub id: i64,
    pub name: String,
    pub road_address: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub average_rating: f32,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Restroom record as it appears in a seed file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRestroom {
    pub name: String,
    pub road_address: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

/// Restroom response DTO exposed via API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RestroomResponse {
    pub restroom_id: i64,
    pub name: String,
    pub road_address: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub average_rating: f32,
}

impl Restroom {
    pub fn to_response(&self) -> RestroomResponse {
        RestroomResponse {
            restroom_id: self.id,
            name: self.name.clone(),
            road_address: self.road_address.clone(),
            latitude: self.latitude,
            longitude: self.longitude,
            average_rating: self.average_rating,
        }
    }
}
