//! Quick-LP use case: validate, build, sign, report

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{info, info_span, warn, Instrument};

use super::in_flight::InFlightRegistry;
use crate::domain::lp::{
    presets, validate_wallet_address, BalanceCheck, LpConfigDraft, LpMode, LpResult,
    PartialLpConfig, QuickLpRequest,
};
use crate::infrastructure::api_clients::TransactionBuilderClient;
use crate::infrastructure::blockchain::SigningService;
use crate::shared::utils;

pub const DEFAULT_REQUIRED_SOL: f64 = 0.1;
const ALREADY_IN_PROGRESS: &str =
    "A position request for this pair and wallet is already in progress";

pub struct LpOrchestrator {
    builder: Arc<dyn TransactionBuilderClient>,
    signer: Arc<dyn SigningService>,
    default_config: LpConfigDraft,
    in_flight: InFlightRegistry,
}

impl LpOrchestrator {
    pub fn new(
        builder: Arc<dyn TransactionBuilderClient>,
        signer: Arc<dyn SigningService>,
    ) -> Self {
        Self {
            builder,
            signer,
            default_config: LpConfigDraft::default(),
            in_flight: InFlightRegistry::new(),
        }
    }

    /// Replace the preset that request overrides are merged over
    pub fn with_default_config(mut self, default_config: LpConfigDraft) -> Self {
        self.default_config = default_config;
        self
    }

    /// Run one quick-LP request end to end. Every failure is reported through
    /// the returned `LpResult`, never as a panic or `Err`.
    pub async fn create_position(&self, request: QuickLpRequest) -> LpResult {
        let span = info_span!(
            "create_position",
            request_id = %utils::generate_id(),
            pair = %format!("{}/{}", request.token_x_mint, request.token_y_mint),
        );
        self.run_request(request).instrument(span).await
    }

    async fn run_request(&self, request: QuickLpRequest) -> LpResult {
        let wallet_check = validate_wallet_address(&request.user_wallet);
        if !wallet_check.is_valid {
            let error = wallet_check.error.unwrap_or_default();
            warn!("❌ Rejected request: {}", error);
            return LpResult::failed(error);
        }

        let draft = match &request.config {
            Some(partial) => self.default_config.merged_with(partial),
            None => self.default_config.clone(),
        };
        let config = match draft.into_config() {
            Ok(config) => config,
            Err(errors) => {
                let error = errors.join(", ");
                warn!("❌ Invalid LP config: {}", error);
                return LpResult::failed(error);
            }
        };

        let Some(_guard) = self.in_flight.try_acquire(
            &request.token_x_mint,
            &request.token_y_mint,
            &request.user_wallet,
        ) else {
            warn!("⏸️ Duplicate request while one is in flight");
            return LpResult::failed(ALREADY_IN_PROGRESS);
        };

        info!(
            "🚀 Creating {} position (bin_step={}, range={}..{})",
            config.mode(),
            config.bin_step(),
            config.min_price(),
            config.max_price()
        );

        let batch = match self
            .builder
            .build_initialize_position(
                &request.token_x_mint,
                &request.token_y_mint,
                &request.user_wallet,
                &config,
            )
            .await
        {
            Ok(batch) => batch,
            Err(e) => {
                warn!("❌ Transaction builder failed ({}): {}", e.kind(), e);
                return LpResult::failed(e.to_string());
            }
        };

        for (i, leg) in batch.swaps().iter().enumerate() {
            info!(
                "🔁 Swap {}: {} {} -> {} {} (slippage {} bps)",
                i + 1,
                leg.input_amount,
                presets::token_display_name(&leg.input_mint),
                leg.output_amount,
                presets::token_display_name(&leg.output_mint),
                leg.slippage_bps
            );
        }

        let pool_address = batch.pool_address().map(str::to_string);
        let transactions = batch.into_transactions();

        match self.signer.sign_and_send_batch(&transactions).await {
            Ok(signatures) => {
                info!("✅ Position created with {} transaction(s)", signatures.len());
                LpResult::ok(signatures, pool_address)
            }
            Err(failure) => {
                warn!(
                    "❌ Batch stopped at transaction {} of {} with {} already submitted",
                    failure.failed_index + 1,
                    transactions.len(),
                    failure.completed_signatures.len()
                );
                LpResult::partial(
                    failure.completed_signatures,
                    pool_address,
                    failure.error.to_string(),
                )
            }
        }
    }

    pub async fn create_zap_position(
        &self,
        token_x_mint: &str,
        token_y_mint: &str,
        user_wallet: &str,
    ) -> LpResult {
        self.create_position(
            QuickLpRequest::new(token_x_mint, token_y_mint, user_wallet)
                .with_config(PartialLpConfig::with_mode(LpMode::Zap)),
        )
        .await
    }

    pub async fn create_normal_position(
        &self,
        token_x_mint: &str,
        token_y_mint: &str,
        user_wallet: &str,
    ) -> LpResult {
        self.create_position(
            QuickLpRequest::new(token_x_mint, token_y_mint, user_wallet)
                .with_config(PartialLpConfig::with_mode(LpMode::Normal)),
        )
        .await
    }

    /// Check that `wallet_address` holds at least `required_sol`
    pub async fn validate_wallet_balance(
        &self,
        wallet_address: &str,
        required_sol: f64,
    ) -> BalanceCheck {
        match self.signer.get_balance(wallet_address).await {
            Ok(balance) if balance >= required_sol => BalanceCheck {
                has_enough_balance: true,
                balance,
                error: None,
            },
            Ok(balance) => BalanceCheck {
                has_enough_balance: false,
                balance,
                error: Some(format!(
                    "Insufficient SOL balance. Required: {}, Available: {}",
                    required_sol, balance
                )),
            },
            Err(e) => {
                warn!("⚠️ Balance check failed for {}: {}", wallet_address, e);
                BalanceCheck {
                    has_enough_balance: false,
                    balance: 0.0,
                    error: Some(e.to_string()),
                }
            }
        }
    }

    pub fn preset_configs(&self) -> BTreeMap<&'static str, LpConfigDraft> {
        presets::preset_configs()
    }
}
