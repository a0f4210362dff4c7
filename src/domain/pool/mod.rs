//! Pool domain - market snapshots of DLMM pools

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::types::QUOTE_MINTS;
use crate::shared::utils::null_as_default;

/// Statistic sampled over several trailing windows
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowedStats {
    #[serde(deserialize_with = "null_as_default")]
    pub min_30: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub hour_1: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub hour_2: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub hour_4: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub hour_12: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub hour_24: f64,
}

/// Read-only snapshot of a pool as reported by the market-data API.
/// Replaced wholesale on every fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketPool {
    pub address: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    pub mint_x: String,
    pub mint_y: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub reserve_x: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub reserve_y: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub reserve_x_amount: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub reserve_y_amount: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub bin_step: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub base_fee_percentage: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub max_fee_percentage: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub protocol_fee_percentage: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub liquidity: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub fees_24h: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub today_fees: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub trade_volume_24h: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub current_price: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub apr: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub apy: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub hide: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_blacklisted: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_verified: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub fees: WindowedStats,
    #[serde(default, deserialize_with = "null_as_default")]
    pub fee_tvl_ratio: WindowedStats,
    #[serde(default, deserialize_with = "null_as_default")]
    pub volume: WindowedStats,
    /// Local time the snapshot was decoded
    #[serde(skip_deserializing, default = "Utc::now")]
    pub fetched_at: DateTime<Utc>,
}

impl MarketPool {
    /// True when the second token is one of the supported quote mints
    pub fn is_quote_denominated(&self) -> bool {
        QUOTE_MINTS.contains(&self.mint_y.as_str())
    }

    /// Liquidity as a number; zero when the API reports something unparseable
    pub fn liquidity_value(&self) -> f64 {
        self.liquidity.parse().unwrap_or(0.0)
    }
}
