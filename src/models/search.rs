// src/models/search.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One address search result a user was shown
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SearchHistory {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub road_address: String,
    pub land_lot_address: String,
    /// Set once the user picks this result
    pub clicked: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Address returned by the address provider
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AddressResult {
    pub name: String,
    pub road_address: String,
    pub land_lot_address: String,
}

/// Query string for GET /address/search
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub search_word: String,
}

/// Search response DTO exposed via API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub search_id: i64,
    pub name: String,
    pub road_address: String,
    pub land_lot_address: String,
}

impl SearchHistory {
    pub fn to_response(&self) -> SearchResponse {
        SearchResponse {
            search_id: self.id,
            name: self.name.clone(),
            road_address: self.road_address.clone(),
            land_lot_address: self.land_lot_address.clone(),
        }
    }
}
