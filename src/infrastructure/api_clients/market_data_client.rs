use async_trait::async_trait;
use reqwest::{header::ACCEPT, Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::{http_client, MarketDataClient};
use crate::config::ApiCfg;
use crate::domain::pool::MarketPool;
use crate::shared::errors::LpError;

/// Meteora DLMM market-data API client
pub struct MeteoraApiClient {
    http_client: Client,
    base_url: String,
}

impl MeteoraApiClient {
    pub fn new(cfg: &ApiCfg) -> Result<Self, LpError> {
        Ok(Self {
            http_client: http_client(cfg.timeout())?,
            base_url: cfg.market_data_url.trim_end_matches('/').to_string(),
        })
    }

    /// Pull the `pairs` listing out of a paginated response body.
    /// Records that do not decode are skipped so one bad pool cannot hide the page.
    fn parse_listing(body: &Value) -> Result<Vec<MarketPool>, LpError> {
        let pairs = body
            .get("pairs")
            .and_then(Value::as_array)
            .ok_or_else(|| LpError::Format("response has no `pairs` listing".to_string()))?;

        let pools = pairs
            .iter()
            .filter_map(|pair| match MarketPool::deserialize(pair) {
                Ok(pool) => Some(pool),
                Err(e) => {
                    let address = pair.get("address").and_then(Value::as_str).unwrap_or("?");
                    warn!("⚠️ Skipping undecodable pool {}: {}", address, e);
                    None
                }
            })
            .collect();
        Ok(pools)
    }
}

#[async_trait]
impl MarketDataClient for MeteoraApiClient {
    async fn fetch_trending_pools(
        &self,
        page: u32,
        limit: u32,
    ) -> Result<Vec<MarketPool>, LpError> {
        let url = format!("{}/pair/all_with_pagination", self.base_url);
        info!("🔍 Fetching trending pools from {} (page={}, limit={})", url, page, limit);

        let response = self
            .http_client
            .get(&url)
            .query(&[("page", page), ("limit", limit)])
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("⚠️ Market data API returned status: {}", status);
            return Err(LpError::Network(format!(
                "market data request failed with status: {}",
                status
            )));
        }

        let body: Value = response.json().await?;
        let pools = Self::parse_listing(&body)?;
        let total = pools.len();

        let filtered: Vec<MarketPool> = pools
            .into_iter()
            .filter(MarketPool::is_quote_denominated)
            .collect();

        debug!("Kept {} of {} pools with a quote-mint second token", filtered.len(), total);
        Ok(filtered)
    }

    async fn get_pool_details(&self, pool_address: &str) -> Result<Option<MarketPool>, LpError> {
        let url = format!("{}/pair/{}", self.base_url, pool_address);
        info!("🔍 Fetching pool details from {}", url);

        let response = self.http_client.get(&url).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(LpError::Network(format!(
                "pool details request failed with status: {}",
                status
            )));
        }

        Ok(Some(response.json::<MarketPool>().await?))
    }
}
