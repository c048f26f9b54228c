// src/db/seed.rs
// DOCUMENTATION: Bulk loading of users and restrooms
// PURPOSE: Shared by the seed_restrooms binary and STORAGE=memory startup

use super::{Database, RestroomRepository, Transaction, UserRepository};
use crate::errors::AppError;
use crate::models::{NewRestroom, NewUser};
use serde::{Deserialize, Serialize};

/// Contents of a seed file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub users: Vec<NewUser>,
    #[serde(default)]
    pub restrooms: Vec<NewRestroom>,
}

#[derive(Debug, Default, Serialize)]
pub struct SeedStats {
    pub users_created: usize,
    pub restrooms_created: usize,
}

impl SeedData {
    pub fn from_json(raw: &str) -> Result<Self, AppError> {
        serde_json::from_str(raw).map_err(|e| AppError::JsonParse(format!("Seed file: {}", e)))
    }
}

/// Insert every record of `seed` in a single transaction
pub async fn apply_seed<D: Database>(db: &D, seed: &SeedData) -> Result<SeedStats, AppError> {
    let mut tx = db.begin().await?;
    let mut stats = SeedStats::default();

    for user in &seed.users {
        tx.insert_user(user).await?;
        stats.users_created += 1;
    }

    for restroom in &seed.restrooms {
        if restroom.name.trim().is_empty() {
            return Err(AppError::ValidationError(
                "restroom name must not be blank".to_string(),
            ));
        }
        tx.insert_restroom(restroom).await?;
        stats.restrooms_created += 1;
    }

    tx.commit().await?;

    log::info!(
        "Seed applied: {} users, {} restrooms",
        stats.users_created,
        stats.restrooms_created
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryDatabase;

    const SEED: &str = r#"{
        "users": [{"nickname": "alice"}, {"nickname": "bob", "point": 500}],
        "restrooms": [
            {"name": "Sillim Station", "roadAddress": "Gwanak-ro 1", "latitude": 37.484, "longitude": 126.929}
        ]
    }"#;

    #[tokio::test]
    async fn test_apply_seed() {
        let db = MemoryDatabase::new();
        let seed = SeedData::from_json(SEED).unwrap();

        let stats = apply_seed(&db, &seed).await.unwrap();
        assert_eq!(stats.users_created, 2);
        assert_eq!(stats.restrooms_created, 1);

        let mut tx = db.begin().await.unwrap();
        let bob = tx.find_user(2).await.unwrap().unwrap();
        assert_eq!(bob.point, 500);
        let restroom = tx.find_restroom(1).await.unwrap().unwrap();
        assert_eq!(restroom.average_rating, 0.0);
    }

    #[tokio::test]
    async fn test_blank_restroom_aborts_whole_seed() {
        let db = MemoryDatabase::new();
        let seed = SeedData::from_json(
            r#"{"users": [{"nickname": "alice"}], "restrooms": [{"name": " ", "latitude": 0, "longitude": 0}]}"#,
        )
        .unwrap();

        assert!(apply_seed(&db, &seed).await.is_err());

        let mut tx = db.begin().await.unwrap();
        assert!(tx.find_user(1).await.unwrap().is_none());
    }

    #[test]
    fn test_malformed_seed() {
        assert!(matches!(
            SeedData::from_json("{\"users\": 3}"),
            Err(AppError::JsonParse(_))
        ));
    }
}
