// src/services/address_client.rs
// DOCUMENTATION: Address (POI) search provider client
// PURPOSE: Turn a free-text keyword into road and land-lot addresses

use crate::config::Config;
use crate::errors::AppError;
use crate::models::AddressResult;
use crate::services::AddressCache;
use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::num::NonZeroU32;
use std::sync::Arc;

/// Anything that can resolve a keyword to addresses
#[async_trait]
pub trait AddressSearch: Send + Sync {
    async fn search(&self, keyword: &str, count: u32) -> Result<Vec<AddressResult>, AppError>;
}

/// Client for the Tmap POI search API
/// DOCUMENTATION: Responses are cached per keyword and outbound calls are
/// throttled so a burst of searches cannot exhaust the provider quota
pub struct AddressApiClient {
    client: Client,
    api_key: String,
    base_url: String,
    cache: Arc<AddressCache>,
    limiter: DefaultDirectRateLimiter,
}

/// Top-level POI search response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoiSearchResponse {
    pub search_poi_info: Option<SearchPoiInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPoiInfo {
    pub pois: PoiList,
}

#[derive(Debug, Deserialize)]
pub struct PoiList {
    #[serde(default)]
    pub poi: Vec<Poi>,
}

/// Single point of interest
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Poi {
    pub name: String,
    pub upper_addr_name: Option<String>,
    pub middle_addr_name: Option<String>,
    pub lower_addr_name: Option<String>,
    pub detail_addr_name: Option<String>,
    pub first_no: Option<String>,
    pub second_no: Option<String>,
    pub new_address_list: Option<NewAddressList>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAddressList {
    #[serde(default)]
    pub new_address: Vec<NewAddress>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAddress {
    pub full_address_road: Option<String>,
}

impl Poi {
    /// Road address from the first new-address entry, empty if none
    pub fn road_address(&self) -> String {
        self.new_address_list
            .as_ref()
            .and_then(|list| list.new_address.first())
            .and_then(|a| a.full_address_road.clone())
            .unwrap_or_default()
    }

    /// Land-lot (jibun) address, e.g. "Seoul Gwanak-gu Sillim-dong 1433-1"
    pub fn land_lot_address(&self) -> String {
        let lot = match (non_empty(&self.first_no), non_empty(&self.second_no)) {
            (Some(first), Some(second)) if second != "0" => Some(format!("{}-{}", first, second)),
            (Some(first), _) => Some(first.to_string()),
            _ => None,
        };

        [
            non_empty(&self.upper_addr_name).map(str::to_string),
            non_empty(&self.middle_addr_name).map(str::to_string),
            non_empty(&self.lower_addr_name).map(str::to_string),
            non_empty(&self.detail_addr_name).map(str::to_string),
            lot,
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ")
    }

    pub fn to_address(&self) -> AddressResult {
        AddressResult {
            name: self.name.clone(),
            road_address: self.road_address(),
            land_lot_address: self.land_lot_address(),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl PoiSearchResponse {
    pub fn into_addresses(self) -> Vec<AddressResult> {
        self.search_poi_info
            .map(|info| info.pois.poi.iter().map(Poi::to_address).collect())
            .unwrap_or_default()
    }
}

impl AddressApiClient {
    pub fn new(config: &Config, cache: Arc<AddressCache>) -> Self {
        let per_second = NonZeroU32::new(config.address_api_rate_per_sec).unwrap_or(NonZeroU32::MIN);

        Self {
            client: Client::new(),
            api_key: config.address_api_key.clone(),
            base_url: config.address_api_url.trim_end_matches('/').to_string(),
            cache,
            limiter: RateLimiter::direct(Quota::per_second(per_second)),
        }
    }

    async fn fetch(&self, keyword: &str, count: u32) -> Result<Vec<AddressResult>, AppError> {
        if self.limiter.check().is_err() {
            log::warn!("Address search throttled for keyword: {}", keyword);
            return Err(AppError::RateLimitExceeded);
        }

        let url = format!("{}/tmap/pois", self.base_url);
        let count = count.to_string();
        let params = [
            ("version", "1"),
            ("searchKeyword", keyword),
            ("count", count.as_str()),
        ];

        log::debug!("Address search: keyword={}, count={}", keyword, count);

        let response = self
            .client
            .get(&url)
            .header("appKey", self.api_key.as_str())
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                log::error!("Address API request failed: {}", e);
                AppError::ExternalApiError(format!("Request failed: {}", e))
            })?;

        // The provider answers 204 with an empty body when nothing matches
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(Vec::new());
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            log::error!("Address API error {}: {}", status, body);
            return Err(AppError::ExternalApiError(format!(
                "API error {}: {}",
                status, body
            )));
        }

        let parsed: PoiSearchResponse = response.json().await.map_err(|e| {
            log::error!("Failed to parse address API response: {}", e);
            AppError::ExternalApiError(format!("Parse error: {}", e))
        })?;

        let addresses = parsed.into_addresses();
        log::info!(
            "Address search for '{}' returned {} results",
            keyword,
            addresses.len()
        );
        Ok(addresses)
    }
}

#[async_trait]
impl AddressSearch for AddressApiClient {
    async fn search(&self, keyword: &str, count: u32) -> Result<Vec<AddressResult>, AppError> {
        let key = AddressCache::key(keyword, count);
        if let Some(cached) = self.cache.get(&key).await {
            return Ok(cached);
        }

        let addresses = self.fetch(keyword, count).await?;
        self.cache.set(key, addresses.clone()).await;
        Ok(addresses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "searchPoiInfo": {
            "totalCount": "2",
            "count": "2",
            "page": "1",
            "pois": {
                "poi": [
                    {
                        "id": "1",
                        "name": "Starbucks Sillim Station",
                        "upperAddrName": "Seoul",
                        "middleAddrName": "Gwanak-gu",
                        "lowerAddrName": "Sillim-dong",
                        "detailAddrName": "",
                        "firstNo": "1433",
                        "secondNo": "1",
                        "newAddressList": {
                            "newAddress": [
                                {"fullAddressRoad": "Seoul Gwanak-gu Sillim-ro 330"}
                            ]
                        }
                    },
                    {
                        "id": "2",
                        "name": "Sillim Park",
                        "upperAddrName": "Seoul",
                        "middleAddrName": "Gwanak-gu",
                        "lowerAddrName": "Sillim-dong",
                        "firstNo": "200",
                        "secondNo": "0"
                    }
                ]
            }
        }
    }"#;

    #[test]
    fn test_parse_poi_response() {
        let parsed: PoiSearchResponse = serde_json::from_str(SAMPLE).unwrap();
        let addresses = parsed.into_addresses();

        assert_eq!(addresses.len(), 2);
        assert_eq!(addresses[0].name, "Starbucks Sillim Station");
        assert_eq!(addresses[0].road_address, "Seoul Gwanak-gu Sillim-ro 330");
        assert_eq!(addresses[0].land_lot_address, "Seoul Gwanak-gu Sillim-dong 1433-1");
    }

    #[test]
    fn test_missing_road_address_and_zero_second_no() {
        let parsed: PoiSearchResponse = serde_json::from_str(SAMPLE).unwrap();
        let addresses = parsed.into_addresses();

        assert_eq!(addresses[1].road_address, "");
        assert_eq!(addresses[1].land_lot_address, "Seoul Gwanak-gu Sillim-dong 200");
    }

    #[test]
    fn test_empty_response() {
        let parsed: PoiSearchResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.into_addresses().is_empty());
    }

    #[tokio::test]
    async fn test_cached_search_skips_provider() {
        let config = Config::from_lookup(|key| match key {
            // Unroutable: any real request would fail
            "ADDRESS_API_URL" => Some("http://127.0.0.1:9".to_string()),
            _ => None,
        });
        let cache = Arc::new(AddressCache::new(60));
        let expected = vec![AddressResult {
            name: "Sillim Station".into(),
            road_address: "Gwanak-ro 1".into(),
            land_lot_address: "Sillim-dong 1".into(),
        }];
        cache.set(AddressCache::key("sillim", 10), expected.clone()).await;

        let client = AddressApiClient::new(&config, cache);
        assert_eq!(client.search("Sillim", 10).await.unwrap(), expected);
    }
}
