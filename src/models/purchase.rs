// src/models/purchase.rs
// DOCUMENTATION: In-app purchase models
// PURPOSE: Product catalogue, purchase request and order records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::borrow::Cow;
use validator::{Validate, ValidationError};

/// Point packages sold in the app store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Product {
    Point1000,
    Point3000,
    Point5000,
    Point10000,
}

impl Product {
    pub const ALL: [Product; 4] = [
        Product::Point1000,
        Product::Point3000,
        Product::Point5000,
        Product::Point10000,
    ];

    /// Store product id as registered in the Play console
    pub fn product_id(self) -> &'static str {
        match self {
            Product::Point1000 => "point_1000",
            Product::Point3000 => "point_3000",
            Product::Point5000 => "point_5000",
            Product::Point10000 => "point_10000",
        }
    }

    pub fn points(self) -> i32 {
        match self {
            Product::Point1000 => 1000,
            Product::Point3000 => 3000,
            Product::Point5000 => 5000,
            Product::Point10000 => 10000,
        }
    }

    pub fn from_product_id(product_id: &str) -> Option<Product> {
        Self::ALL
            .into_iter()
            .find(|p| p.product_id() == product_id)
    }
}

/// Request body for POST /api/purchase/verify
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRequest {
    #[validate(length(min = 1, message = "productId is required"))]
    pub product_id: String,

    #[validate(
        length(min = 1, max = 512, message = "purchaseToken is required"),
        custom = "store_token"
    )]
    pub purchase_token: String,
}

/// Store tokens only use `[A-Za-z0-9._-]`; anything else could alias
/// another token once it reaches the store's URL
fn store_token(value: &str) -> Result<(), ValidationError> {
    let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-');
    if !value.chars().all(allowed) {
        let mut err = ValidationError::new("token_charset");
        err.message = Some(Cow::from("purchaseToken contains invalid characters"));
        return Err(err);
    }
    Ok(())
}

/// Completed purchase; one per redeemed purchase token
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Order {
    pub id: i64,
    pub user_id: i64,
    pub purchase_token: String,
    pub product_id: String,
    pub point: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: i64,
    pub purchase_token: String,
    pub product_id: String,
    pub point: i32,
}

/// Points credited by a purchase verification
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PointChangeResponse {
    pub user_id: i64,
    pub point: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_lookup() {
        assert_eq!(Product::from_product_id("point_3000"), Some(Product::Point3000));
        assert_eq!(Product::from_product_id("point_3000").map(Product::points), Some(3000));
        assert_eq!(Product::from_product_id("point_42"), None);
    }

    #[test]
    fn test_purchase_token_charset() {
        let request = |token: &str| PurchaseRequest {
            product_id: "point_1000".into(),
            purchase_token: token.into(),
        };

        assert!(request("opaque-token_1.AO-J1Oy").validate().is_ok());
        for token in ["REAL?x=1", "REAL#a", "x/../REAL", "REAL%2F", "REAL x"] {
            assert!(request(token).validate().is_err(), "{} accepted", token);
        }
    }

    #[test]
    fn test_product_ids_are_unique() {
        for a in Product::ALL {
            let same: Vec<_> = Product::ALL
                .into_iter()
                .filter(|b| b.product_id() == a.product_id())
                .collect();
            assert_eq!(same, vec![a]);
        }
    }
}
