// src/main.rs
// DOCUMENTATION: Application entry point
// PURPOSE: Initialize config, storage and providers, then start HTTP server

use actix_web::{middleware::Logger, web, App, HttpServer};
use chamjimayo::config::{self, Config, StorageBackend};
use chamjimayo::db::{apply_seed, Database, MemoryDatabase, PgDatabase, SeedData};
use chamjimayo::handlers;
use chamjimayo::services::{
    start_cleanup_task, AddressApiClient, AddressCache, AddressSearch, PlayReceiptValidator,
    ReceiptValidator,
};
use dotenv::dotenv;
use std::io;
use std::sync::Arc;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // 1. Load environment variables
    dotenv().ok();

    // 2. Load configuration
    let config = Config::from_env();
    if let Err(e) = config.validate() {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    }

    // 3. Initialize logging
    if std::env::var("RUST_LOG").is_err() {
        let log_level = if !config.log_level.is_empty() {
            &config.log_level
        } else {
            "info,actix_web=info,sqlx=warn"
        };
        std::env::set_var("RUST_LOG", log_level);
    }
    env_logger::init();

    for warning in config.warnings() {
        log::warn!("{}", warning);
    }

    log::info!("Starting chamjimayo service...");
    log::info!("Environment: {}", config.environment);
    log::info!(
        "Server Address: {}:{}",
        config.server_address,
        config.server_port
    );

    // 4. Address provider with its response cache
    let cache = Arc::new(AddressCache::new(config.address_cache_ttl));
    log::info!(
        "Initialized address cache (TTL: {}s)",
        config.address_cache_ttl
    );
    start_cleanup_task(cache.clone(), 300);

    let addresses: Arc<dyn AddressSearch> = Arc::new(AddressApiClient::new(&config, cache));
    let receipts: Arc<dyn ReceiptValidator> = Arc::new(PlayReceiptValidator::new(&config));

    // 5. Storage backend
    let storage = match config.storage() {
        Ok(storage) => storage,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    match storage {
        StorageBackend::Postgres => {
            let pool = match config::init_db_pool(&config).await {
                Ok(pool) => pool,
                Err(e) => {
                    log::error!("Failed to connect to database: {}", e);
                    std::process::exit(1);
                }
            };
            serve(PgDatabase::new(pool), config, addresses, receipts).await
        }
        StorageBackend::Memory => {
            let db = MemoryDatabase::new();
            if let Some(path) = &config.seed_file {
                if let Err(e) = seed_memory(&db, path).await {
                    log::error!("Failed to load seed file {}: {}", path, e);
                    std::process::exit(1);
                }
            }
            log::warn!("Using in-memory storage; data is lost on shutdown");
            serve(db, config, addresses, receipts).await
        }
    }
}

async fn seed_memory(db: &MemoryDatabase, path: &str) -> Result<(), String> {
    let raw = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    let seed = SeedData::from_json(&raw).map_err(|e| e.to_string())?;
    apply_seed(db, &seed).await.map_err(|e| e.to_string())?;
    Ok(())
}

/// Start HTTP server over the chosen store
async fn serve<D: Database>(
    db: D,
    config: Config,
    addresses: Arc<dyn AddressSearch>,
    receipts: Arc<dyn ReceiptValidator>,
) -> io::Result<()> {
    let server_addr = format!("{}:{}", config.server_address, config.server_port);
    let db = web::Data::new(db);
    let config = web::Data::new(config);
    let addresses: web::Data<dyn AddressSearch> = web::Data::from(addresses);
    let receipts: web::Data<dyn ReceiptValidator> = web::Data::from(receipts);

    HttpServer::new(move || {
        App::new()
            // Application state (store, config and external providers)
            .app_data(db.clone())
            .app_data(config.clone())
            .app_data(addresses.clone())
            .app_data(receipts.clone())
            // Middleware
            .wrap(Logger::default())
            .wrap(actix_web::middleware::Compress::default())
            // Routes
            .configure(handlers::app_config::<D>)
    })
    .bind(&server_addr)?
    .run()
    .await
}
