use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::{http_client, TransactionBuilderClient};
use crate::config::ApiCfg;
use crate::domain::execution::{SwapLeg, UnsignedTransactionBatch};
use crate::domain::lp::{LpConfig, LpMode};
use crate::shared::errors::LpError;
use crate::shared::utils::null_as_default;

const DEFAULT_FAILURE_MESSAGE: &str = "Failed to initialize DLMM position";

#[derive(Debug, Serialize)]
struct InitializeDlmmRequest<'a> {
    token_x_mint: &'a str,
    token_y_mint: &'a str,
    bin_step: i64,
    min_price: &'a str,
    max_price: &'a str,
    mode: LpMode,
    user_wallet: &'a str,
}

#[derive(Debug, Deserialize)]
struct InitializeDlmmResponse {
    success: bool,
    #[serde(default)]
    data: Option<InitializeDlmmData>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct InitializeDlmmData {
    initialize_transaction: String,
    // normal-mode responses send `null` here
    #[serde(default)]
    jupiter_swap_transactions: Option<Vec<JupiterSwapTransaction>>,
    #[serde(default)]
    pool_address: Option<String>,
}

#[derive(Debug, Deserialize)]
struct JupiterSwapTransaction {
    transaction: String,
    #[serde(default, deserialize_with = "null_as_default")]
    input_mint: String,
    #[serde(default, deserialize_with = "null_as_default")]
    output_mint: String,
    #[serde(default, deserialize_with = "null_as_default")]
    input_amount: String,
    #[serde(default, deserialize_with = "null_as_default")]
    output_amount: String,
    #[serde(default, deserialize_with = "null_as_default")]
    slippage_bps: u32,
}

impl JupiterSwapTransaction {
    fn into_parts(self) -> (String, SwapLeg) {
        let leg = SwapLeg {
            input_mint: self.input_mint,
            output_mint: self.output_mint,
            input_amount: self.input_amount,
            output_amount: self.output_amount,
            slippage_bps: self.slippage_bps,
        };
        (self.transaction, leg)
    }
}

/// Client for the Cleopetra transaction-construction service
pub struct CleopetraApiClient {
    http_client: Client,
    base_url: String,
}

impl CleopetraApiClient {
    pub fn new(cfg: &ApiCfg) -> Result<Self, LpError> {
        Ok(Self {
            http_client: http_client(cfg.timeout())?,
            base_url: cfg.tx_builder_url.trim_end_matches('/').to_string(),
        })
    }

    fn into_batch(response: InitializeDlmmResponse) -> Result<UnsignedTransactionBatch, LpError> {
        if !response.success {
            let message = response
                .message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string());
            return Err(LpError::Remote(message));
        }

        let data = response
            .data
            .ok_or_else(|| LpError::Format("successful response carries no data".to_string()))?;

        let mut batch = UnsignedTransactionBatch::new(data.initialize_transaction)
            .with_pool_address(data.pool_address);
        for swap in data.jupiter_swap_transactions.unwrap_or_default() {
            let (transaction, leg) = swap.into_parts();
            batch.push_swap(transaction, leg);
        }
        Ok(batch)
    }
}

#[async_trait]
impl TransactionBuilderClient for CleopetraApiClient {
    async fn build_initialize_position(
        &self,
        token_x_mint: &str,
        token_y_mint: &str,
        user_wallet: &str,
        config: &LpConfig,
    ) -> Result<UnsignedTransactionBatch, LpError> {
        let url = format!("{}/dlmm/initialize", self.base_url);
        let request = InitializeDlmmRequest {
            token_x_mint,
            token_y_mint,
            bin_step: config.bin_step(),
            min_price: config.min_price(),
            max_price: config.max_price(),
            mode: config.mode(),
            user_wallet,
        };
        info!(
            "🧱 Requesting {} position transactions for {}/{} (bin_step={})",
            request.mode, token_x_mint, token_y_mint, request.bin_step
        );

        let response = self.http_client.post(&url).json(&request).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!("⚠️ Transaction builder returned status: {}", status);
            // Error bodies still carry the service's message when it sent one
            return match serde_json::from_str::<InitializeDlmmResponse>(&body) {
                Ok(InitializeDlmmResponse {
                    message: Some(message),
                    ..
                }) if !message.is_empty() => Err(LpError::Remote(message)),
                _ => Err(LpError::Network(format!(
                    "transaction builder request failed with status: {}",
                    status
                ))),
            };
        }

        let parsed: InitializeDlmmResponse = serde_json::from_str(&body)?;
        let batch = Self::into_batch(parsed)?;
        info!("✅ Received {} unsigned transaction(s)", batch.len());
        Ok(batch)
    }
}
