// tests/common/mod.rs
// Shared fixtures for the HTTP-level tests

#![allow(dead_code)]

use async_trait::async_trait;
use chamjimayo::config::Config;
use chamjimayo::db::{apply_seed, MemoryDatabase, SeedData};
use chamjimayo::errors::AppError;
use chamjimayo::models::{AddressResult, NewRestroom, NewUser, PurchaseRequest};
use chamjimayo::services::{AddressSearch, ReceiptValidator};

pub const USER_HEADER: &str = "X-User-Id";

/// Address provider answering every keyword with the same results
pub struct StaticProvider(pub Vec<AddressResult>);

#[async_trait]
impl AddressSearch for StaticProvider {
    async fn search(&self, _keyword: &str, _count: u32) -> Result<Vec<AddressResult>, AppError> {
        Ok(self.0.clone())
    }
}

/// Receipt validator that accepts every token except those starting with "bad"
pub struct TokenPrefixValidator;

#[async_trait]
impl ReceiptValidator for TokenPrefixValidator {
    async fn validate(&self, purchase: &PurchaseRequest) -> Result<bool, AppError> {
        Ok(!purchase.purchase_token.starts_with("bad"))
    }
}

pub fn addresses(names: &[&str]) -> Vec<AddressResult> {
    names
        .iter()
        .map(|name| AddressResult {
            name: name.to_string(),
            road_address: format!("{} road", name),
            land_lot_address: format!("{} lot", name),
        })
        .collect()
}

pub fn test_config() -> Config {
    Config::from_lookup(|key| match key {
        "STORAGE" => Some("memory".to_string()),
        "ADDRESS_SEARCH_COUNT" => Some("3".to_string()),
        _ => None,
    })
}

/// Store with users 1 (alice) and 2 (bob) and restrooms 1 and 2
pub async fn seeded_db() -> MemoryDatabase {
    let db = MemoryDatabase::new();
    let seed = SeedData {
        users: vec![
            NewUser {
                nickname: "alice".into(),
                point: 0,
            },
            NewUser {
                nickname: "bob".into(),
                point: 100,
            },
        ],
        restrooms: vec![
            NewRestroom {
                name: "Sillim Station".into(),
                road_address: Some("Gwanak-ro 1".into()),
                latitude: 37.484,
                longitude: 126.929,
            },
            NewRestroom {
                name: "Gangnam Station".into(),
                road_address: None,
                latitude: 37.497,
                longitude: 127.027,
            },
        ],
    };
    apply_seed(&db, &seed).await.unwrap();
    db
}

/// Build an initialized test service over `$db`
macro_rules! test_app {
    ($db:expr) => {
        test_app!($db, common::StaticProvider(common::addresses(&["a", "b", "c", "d"])))
    };
    ($db:expr, $provider:expr) => {{
        let addresses: std::sync::Arc<dyn chamjimayo::services::AddressSearch> =
            std::sync::Arc::new($provider);
        let receipts: std::sync::Arc<dyn chamjimayo::services::ReceiptValidator> =
            std::sync::Arc::new(common::TokenPrefixValidator);

        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($db.clone()))
                .app_data(actix_web::web::Data::new(common::test_config()))
                .app_data(actix_web::web::Data::from(addresses))
                .app_data(actix_web::web::Data::from(receipts))
                .configure(
                    chamjimayo::handlers::app_config::<chamjimayo::db::MemoryDatabase>,
                ),
        )
        .await
    }};
}
