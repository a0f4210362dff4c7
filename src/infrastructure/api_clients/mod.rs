pub mod market_data_client;
pub mod tx_builder_client;

pub use market_data_client::MeteoraApiClient;
pub use tx_builder_client::CleopetraApiClient;

use async_trait::async_trait;

use crate::domain::execution::UnsignedTransactionBatch;
use crate::domain::lp::LpConfig;
use crate::domain::pool::MarketPool;
use crate::shared::errors::LpError;

/// Read-only pool listing source
#[async_trait]
pub trait MarketDataClient: Send + Sync {
    /// One page of the trending listing, restricted to quote-denominated pools
    async fn fetch_trending_pools(&self, page: u32, limit: u32) -> Result<Vec<MarketPool>, LpError>;

    /// A single pool; `Ok(None)` when the API does not know the address
    async fn get_pool_details(&self, pool_address: &str) -> Result<Option<MarketPool>, LpError>;
}

/// Remote service that constructs unsigned position transactions
#[async_trait]
pub trait TransactionBuilderClient: Send + Sync {
    async fn build_initialize_position(
        &self,
        token_x_mint: &str,
        token_y_mint: &str,
        user_wallet: &str,
        config: &LpConfig,
    ) -> Result<UnsignedTransactionBatch, LpError>;
}

fn http_client(timeout: std::time::Duration) -> Result<reqwest::Client, LpError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| LpError::Config(format!("failed to build HTTP client: {}", e)))
}
