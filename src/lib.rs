// src/lib.rs
// DOCUMENTATION: Library root
// PURPOSE: Shared by the server binary, the seed tool and integration tests

pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod services;
