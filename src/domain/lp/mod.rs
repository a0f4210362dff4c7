//! LP domain - position parameters, requests and results

mod address_validator;
mod config_validator;
pub mod presets;

pub use address_validator::{is_solana_address, validate_wallet_address, AddressValidation};
pub use config_validator::{validate_lp_config, ConfigValidation};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::shared::errors::LpError;

/// Position-creation variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LpMode {
    /// Swap held tokens into the pair's required ratio before funding
    Zap,
    Normal,
}

impl LpMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            LpMode::Zap => "zap",
            LpMode::Normal => "normal",
        }
    }
}

impl fmt::Display for LpMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LpMode {
    type Err = LpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "zap" => Ok(LpMode::Zap),
            "normal" => Ok(LpMode::Normal),
            _ => Err(LpError::Validation(format!("Unknown LP mode: {}", s))),
        }
    }
}

/// A validated LP parameter set. Only obtainable through [`LpConfigDraft::into_config`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LpConfig {
    bin_step: i64,
    min_price: String,
    max_price: String,
    mode: LpMode,
}

impl LpConfig {
    pub fn bin_step(&self) -> i64 {
        self.bin_step
    }

    pub fn min_price(&self) -> &str {
        &self.min_price
    }

    pub fn max_price(&self) -> &str {
        &self.max_price
    }

    pub fn mode(&self) -> LpMode {
        self.mode
    }
}

/// Unvalidated LP parameters as supplied by a user or a config file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LpConfigDraft {
    pub bin_step: i64,
    pub min_price: String,
    pub max_price: String,
    pub mode: String,
}

impl Default for LpConfigDraft {
    fn default() -> Self {
        Self::new(25, "0.0001", "1000", LpMode::Normal)
    }
}

impl LpConfigDraft {
    pub fn new(bin_step: i64, min_price: &str, max_price: &str, mode: LpMode) -> Self {
        Self {
            bin_step,
            min_price: min_price.to_string(),
            max_price: max_price.to_string(),
            mode: mode.as_str().to_string(),
        }
    }

    /// Overlay the fields present in `partial` on top of this draft
    pub fn merged_with(&self, partial: &PartialLpConfig) -> Self {
        Self {
            bin_step: partial.bin_step.unwrap_or(self.bin_step),
            min_price: partial
                .min_price
                .clone()
                .unwrap_or_else(|| self.min_price.clone()),
            max_price: partial
                .max_price
                .clone()
                .unwrap_or_else(|| self.max_price.clone()),
            mode: partial.mode.clone().unwrap_or_else(|| self.mode.clone()),
        }
    }

    pub fn validate(&self) -> ConfigValidation {
        validate_lp_config(self)
    }

    /// Validate and convert. On failure returns every collected violation.
    pub fn into_config(self) -> Result<LpConfig, Vec<String>> {
        let validation = validate_lp_config(&self);
        if !validation.is_valid {
            return Err(validation.errors);
        }

        let mode = self.mode.parse::<LpMode>().map_err(|e| vec![e.to_string()])?;
        Ok(LpConfig {
            bin_step: self.bin_step,
            min_price: self.min_price.trim().to_string(),
            max_price: self.max_price.trim().to_string(),
            mode,
        })
    }
}

/// Caller-supplied overrides; absent fields fall back to the default preset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialLpConfig {
    pub bin_step: Option<i64>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub mode: Option<String>,
}

impl PartialLpConfig {
    pub fn with_mode(mode: LpMode) -> Self {
        Self {
            mode: Some(mode.as_str().to_string()),
            ..Default::default()
        }
    }
}

/// One quick-LP intent. Consumed once by the orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickLpRequest {
    pub token_x_mint: String,
    pub token_y_mint: String,
    pub user_wallet: String,
    #[serde(default)]
    pub config: Option<PartialLpConfig>,
}

impl QuickLpRequest {
    pub fn new(token_x_mint: &str, token_y_mint: &str, user_wallet: &str) -> Self {
        Self {
            token_x_mint: token_x_mint.to_string(),
            token_y_mint: token_y_mint.to_string(),
            user_wallet: user_wallet.to_string(),
            config: None,
        }
    }

    pub fn with_config(mut self, config: PartialLpConfig) -> Self {
        self.config = Some(config);
        self
    }
}

/// Terminal outcome of one orchestration call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LpResult {
    pub success: bool,
    /// Confirmed transaction ids in submission order. On a partial batch
    /// failure this holds the ids obtained before the failing transaction.
    pub signatures: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pool_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LpResult {
    pub fn ok(signatures: Vec<String>, pool_address: Option<String>) -> Self {
        Self {
            success: true,
            signatures,
            pool_address,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            signatures: Vec::new(),
            pool_address: None,
            error: Some(error.into()),
        }
    }

    /// Batch stopped part-way. The pool address is only reported once
    /// at least one transaction has landed.
    pub fn partial(
        signatures: Vec<String>,
        pool_address: Option<String>,
        error: impl Into<String>,
    ) -> Self {
        let pool_address = pool_address.filter(|_| !signatures.is_empty());
        Self {
            success: false,
            signatures,
            pool_address,
            error: Some(error.into()),
        }
    }
}

/// Result of a minimum-balance check
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceCheck {
    pub has_enough_balance: bool,
    pub balance: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
