// src/handlers/auth.rs
// DOCUMENTATION: Authenticated principal extractor
// PURPOSE: Read the user id the upstream auth layer attaches to each request

use crate::errors::AppError;
use actix_web::{dev::Payload, FromRequest, HttpRequest};
use std::future::{ready, Ready};

/// Header carrying the authenticated user's id
pub const USER_ID_HEADER: &str = "X-User-Id";

/// The acting user; extraction fails with INVALID_TOKEN_EXCEPTION
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser(pub i64);

impl AuthUser {
    pub fn id(self) -> i64 {
        self.0
    }

    fn from_headers(req: &HttpRequest) -> Result<Self, AppError> {
        let raw = req
            .headers()
            .get(USER_ID_HEADER)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| {
                log::warn!("Request to {} without principal", req.path());
                AppError::Unauthorized("missing principal".to_string())
            })?;

        match raw.trim().parse::<i64>() {
            Ok(id) if id > 0 => Ok(AuthUser(id)),
            _ => {
                log::warn!("Request to {} with malformed principal", req.path());
                Err(AppError::Unauthorized("malformed principal".to_string()))
            }
        }
    }
}

impl FromRequest for AuthUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Self::from_headers(req))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_valid_principal() {
        let req = TestRequest::default()
            .insert_header((USER_ID_HEADER, "42"))
            .to_http_request();
        assert_eq!(AuthUser::from_headers(&req).unwrap(), AuthUser(42));
    }

    #[test]
    fn test_missing_or_bad_principal() {
        let missing = TestRequest::default().to_http_request();
        assert!(matches!(
            AuthUser::from_headers(&missing),
            Err(AppError::Unauthorized(_))
        ));

        for bad in ["abc", "0", "-3"] {
            let req = TestRequest::default()
                .insert_header((USER_ID_HEADER, bad))
                .to_http_request();
            assert!(matches!(AuthUser::from_headers(&req), Err(AppError::Unauthorized(_))));
        }
    }
}
