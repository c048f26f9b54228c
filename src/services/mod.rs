// src/services/mod.rs
// DOCUMENTATION: Services module organization
// PURPOSE: Re-export service components

pub mod address_client;
pub mod cache;
pub mod purchase_service;
pub mod rating;
pub mod receipt_validator;
pub mod restroom_service;
pub mod review_service;
pub mod search_service;

pub use address_client::*;
pub use cache::*;
pub use purchase_service::*;
pub use rating::*;
pub use receipt_validator::*;
pub use restroom_service::*;
pub use review_service::*;
pub use search_service::*;
