// src/models/response.rs
// DOCUMENTATION: Standard API envelope
// PURPOSE: Every successful response body is `{code, msg, data}`

use serde::Serialize;

pub const SUCCESS_CODE: &str = "00";

/// Success envelope; errors are rendered by `AppError`
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub code: &'static str,
    pub msg: &'static str,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        ApiResponse {
            code: SUCCESS_CODE,
            msg: "success",
            data,
        }
    }
}
