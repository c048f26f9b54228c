// src/models/mod.rs
// DOCUMENTATION: Models module organization
// PURPOSE: Re-export model components

pub mod purchase;
pub mod response;
pub mod restroom;
pub mod review;
pub mod search;
pub mod user;

pub use purchase::*;
pub use response::*;
pub use restroom::*;
pub use review::*;
pub use search::*;
pub use user::*;
