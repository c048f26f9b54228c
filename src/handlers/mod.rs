// src/handlers/mod.rs
// DOCUMENTATION: Handlers module organization
// PURPOSE: Re-export handler components and wire every route

pub mod auth;
pub mod health;
pub mod purchase;
pub mod restrooms;
pub mod reviews;
pub mod search;

pub use auth::AuthUser;
pub use health::config as health_config;
pub use purchase::config as purchase_config;
pub use restrooms::config as restroom_config;
pub use reviews::config as review_config;
pub use search::config as search_config;

use crate::db::Database;
use crate::errors::AppError;
use actix_web::web;

/// Route extractor failures through the error envelope
pub fn extractor_config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::JsonParse(err.to_string()).into()),
    )
    .app_data(
        web::PathConfig::default()
            .error_handler(|err, _req| AppError::InvalidParameter(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| AppError::MissingParameter(err.to_string()).into()),
    );
}

/// Every route of the service over the given store
pub fn app_config<D: Database>(cfg: &mut web::ServiceConfig) {
    extractor_config(cfg);
    health_config(cfg);
    review_config::<D>(cfg);
    restroom_config::<D>(cfg);
    search_config::<D>(cfg);
    purchase_config::<D>(cfg);
}

/// Path ids are positive integers
pub(crate) fn positive_id(id: i64, name: &str) -> Result<i64, AppError> {
    if id < 1 {
        return Err(AppError::ValidationError(format!(
            "{} must be an integer of at least 1",
            name
        )));
    }
    Ok(id)
}
