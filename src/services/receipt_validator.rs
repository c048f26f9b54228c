// src/services/receipt_validator.rs
// DOCUMENTATION: In-app purchase receipt validation
// PURPOSE: Ask the Play Developer API whether a purchase token is genuine

use crate::config::Config;
use crate::errors::AppError;
use crate::models::PurchaseRequest;
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;

/// Anything that can confirm a store receipt
#[async_trait]
pub trait ReceiptValidator: Send + Sync {
    /// Ok(false) for a receipt the store rejects; Err only for transport
    /// or provider failures
    async fn validate(&self, purchase: &PurchaseRequest) -> Result<bool, AppError>;
}

/// Google Play `purchases.products.get` client
pub struct PlayReceiptValidator {
    client: Client,
    base_url: String,
    package_name: String,
    access_token: String,
}

/// Subset of the ProductPurchase resource
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPurchase {
    /// 0 purchased, 1 canceled, 2 pending
    pub purchase_state: Option<i32>,
    pub order_id: Option<String>,
}

impl ProductPurchase {
    pub fn is_purchased(&self) -> bool {
        self.purchase_state == Some(0)
    }
}

impl PlayReceiptValidator {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            base_url: config.play_api_url.trim_end_matches('/').to_string(),
            package_name: config.play_package_name.clone(),
            access_token: config.play_access_token.clone(),
        }
    }

    /// `purchases.products.get` URL with every caller-supplied part
    /// percent-encoded as a single path segment
    fn receipt_url(&self, purchase: &PurchaseRequest) -> Result<Url, AppError> {
        let invalid = |e: String| {
            log::error!("Invalid PLAY_API_URL {}: {}", self.base_url, e);
            AppError::ExternalApiError(format!("Invalid receipt API URL: {}", e))
        };

        let mut url = Url::parse(&self.base_url).map_err(|e| invalid(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| invalid("cannot be a base".to_string()))?
            .pop_if_empty()
            .extend([
                "applications",
                self.package_name.as_str(),
                "purchases",
                "products",
                purchase.product_id.as_str(),
                "tokens",
                purchase.purchase_token.as_str(),
            ]);
        Ok(url)
    }
}

#[async_trait]
impl ReceiptValidator for PlayReceiptValidator {
    async fn validate(&self, purchase: &PurchaseRequest) -> Result<bool, AppError> {
        if self.package_name.is_empty() || self.access_token.is_empty() {
            return Err(AppError::ExternalApiError(
                "Receipt validation is not configured".to_string(),
            ));
        }

        let url = self.receipt_url(purchase)?;

        let response = self
            .client
            .get(url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| {
                log::error!("Receipt validation request failed: {}", e);
                AppError::ExternalApiError(format!("Request failed: {}", e))
            })?;

        match response.status() {
            StatusCode::BAD_REQUEST | StatusCode::NOT_FOUND | StatusCode::GONE => {
                log::warn!("Store rejected purchase token for {}", purchase.product_id);
                return Ok(false);
            }
            status if !status.is_success() => {
                let body = response.text().await.unwrap_or_default();
                log::error!("Receipt validation error {}: {}", status, body);
                return Err(AppError::ExternalApiError(format!(
                    "API error {}: {}",
                    status, body
                )));
            }
            _ => {}
        }

        let receipt: ProductPurchase = response.json().await.map_err(|e| {
            log::error!("Failed to parse receipt validation response: {}", e);
            AppError::ExternalApiError(format!("Parse error: {}", e))
        })?;

        log::info!(
            "Receipt {} for {} has purchase state {:?}",
            receipt.order_id.as_deref().unwrap_or("-"),
            purchase.product_id,
            receipt.purchase_state
        );
        Ok(receipt.is_purchased())
    }
}
