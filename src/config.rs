use anyhow::{Context, Result};
use serde::Deserialize;
use solana_sdk::commitment_config::CommitmentConfig;
use std::{fs, path::Path, time::Duration};

use crate::domain::lp::LpConfigDraft;
use crate::shared::errors::LpError;

pub const DEFAULT_CONFIG_PATH: &str = "QuickLp.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiCfg {
    pub market_data_url: String,
    pub tx_builder_url: String,
    pub timeout_secs: u64,
}

impl Default for ApiCfg {
    fn default() -> Self {
        Self {
            market_data_url: "https://dlmm-api.meteora.ag".to_string(),
            tx_builder_url: "https://cleo-txn-api.up.railway.app".to_string(),
            timeout_secs: 15,
        }
    }
}

impl ApiCfg {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RpcCfg {
    pub url: String,
    pub timeout_secs: u64,
    pub commitment: String,
}

impl Default for RpcCfg {
    fn default() -> Self {
        Self {
            url: "https://api.mainnet-beta.solana.com".to_string(),
            timeout_secs: 30,
            commitment: "confirmed".to_string(),
        }
    }
}

impl RpcCfg {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn commitment_config(&self) -> Result<CommitmentConfig, LpError> {
        match self.commitment.as_str() {
            "processed" => Ok(CommitmentConfig::processed()),
            "confirmed" => Ok(CommitmentConfig::confirmed()),
            "finalized" => Ok(CommitmentConfig::finalized()),
            other => Err(LpError::Config(format!("unknown commitment level: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WalletCfg {
    /// Path to a keypair file used as the signing capability
    pub keypair: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SignerCfg {
    /// Await confirmation for versioned transactions too, not only legacy ones
    pub always_confirm: bool,
    pub confirm_timeout_secs: u64,
    pub poll_interval_ms: u64,
}

impl Default for SignerCfg {
    fn default() -> Self {
        Self {
            always_confirm: false,
            confirm_timeout_secs: 60,
            poll_interval_ms: 500,
        }
    }
}

impl SignerCfg {
    pub fn confirm_timeout(&self) -> Duration {
        Duration::from_secs(self.confirm_timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DefaultsCfg {
    /// Preset every request's partial config is merged over
    pub lp: LpConfigDraft,
    pub required_sol: f64,
    pub page: u32,
    pub limit: u32,
}

impl Default for DefaultsCfg {
    fn default() -> Self {
        Self {
            lp: LpConfigDraft::default(),
            required_sol: 0.1,
            page: 1,
            limit: 50,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiCfg,
    pub rpc: RpcCfg,
    pub wallet: WalletCfg,
    pub signer: SignerCfg,
    pub defaults: DefaultsCfg,
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let s = fs::read_to_string(path.as_ref())
            .with_context(|| format!("read {}", path.as_ref().display()))?;
        Self::from_toml_str(&s)
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        let cfg: Self = toml::from_str(s).context("parse QuickLp.toml")?;
        cfg.rpc.commitment_config()?;
        Ok(cfg)
    }

    /// Load `path` when given, else `QuickLp.toml` when present, else defaults
    pub fn load(path: Option<&str>) -> Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => Self::from_file(DEFAULT_CONFIG_PATH),
            None => Ok(Self::default()),
        }
    }
}
