// src/app.rs
use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use tracing::{info, warn};

use quicklp::config::{Config, WalletCfg};
use quicklp::domain::lp::{
    presets, validate_wallet_address, LpConfigDraft, PartialLpConfig, QuickLpRequest,
};
use quicklp::domain::pool::MarketPool;
use quicklp::infrastructure::api_clients::{
    CleopetraApiClient, MarketDataClient, MeteoraApiClient,
};
use quicklp::infrastructure::blockchain::{
    detect_wallet, Approver, SolanaRpcClient, WalletProvider, WalletSigner,
};
use quicklp::shared::types::mint_for_symbol;
use quicklp::shared::utils::{format_token_amount, parse_decimal};
use quicklp::LpOrchestrator;

/// Effective settings after CLI overrides are applied over the config file
#[derive(Debug, Clone)]
pub struct AppCfg {
    pub config: Config,
    pub assume_yes: bool,
    pub json: bool,
}

impl AppCfg {
    pub fn from_config(config: Config) -> Self {
        Self {
            config,
            assume_yes: false,
            json: false,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Command {
    Pools { page: Option<u32>, limit: Option<u32> },
    Pool { address: String },
    Validate { wallet: Option<String>, overrides: PartialLpConfig },
    Balance { address: String, required_sol: Option<f64> },
    Presets,
    Create {
        token_x: String,
        token_y: String,
        wallet: Option<String>,
        overrides: PartialLpConfig,
        recommended: bool,
        skip_balance_check: bool,
    },
}

pub async fn run(app_cfg: AppCfg, command: Command) -> Result<()> {
    info!("Starting QuickLp");

    match command {
        Command::Pools { page, limit } => {
            let client = MeteoraApiClient::new(&app_cfg.config.api)?;
            let page = page.unwrap_or(app_cfg.config.defaults.page);
            let limit = limit.unwrap_or(app_cfg.config.defaults.limit);
            let pools = client.fetch_trending_pools(page, limit).await?;
            if app_cfg.json {
                println!("{}", serde_json::to_string_pretty(&pools)?);
            } else {
                print_pools(&pools);
            }
        }
        Command::Pool { address } => {
            let client = MeteoraApiClient::new(&app_cfg.config.api)?;
            match client.get_pool_details(&address).await? {
                Some(pool) => println!("{}", serde_json::to_string_pretty(&pool)?),
                None => anyhow::bail!("pool {} not found", address),
            }
        }
        Command::Validate { wallet, overrides } => {
            let draft = app_cfg.config.defaults.lp.merged_with(&overrides);
            let validation = draft.validate();
            println!("{}", serde_json::to_string_pretty(&validation)?);
            if let (Some(min), Some(max)) =
                (parse_decimal(&draft.min_price), parse_decimal(&draft.max_price))
            {
                if validation.is_valid {
                    let suggested = presets::optimal_bin_step(presets::price_range(min, max));
                    if suggested != draft.bin_step {
                        info!("💡 Bin step {} suits this price range better", suggested);
                    }
                }
            }
            if let Some(wallet) = wallet {
                println!("{}", serde_json::to_string_pretty(&validate_wallet_address(&wallet))?);
            }
        }
        Command::Balance { address, required_sol } => {
            let orchestrator = build_orchestrator(&app_cfg, None)?;
            let required = required_sol.unwrap_or(app_cfg.config.defaults.required_sol);
            let check = orchestrator.validate_wallet_balance(&address, required).await;
            println!("{}", serde_json::to_string_pretty(&check)?);
        }
        Command::Presets => {
            let presets = presets::preset_configs();
            println!("{}", serde_json::to_string_pretty(&presets)?);
        }
        Command::Create {
            token_x,
            token_y,
            wallet,
            overrides,
            recommended,
            skip_balance_check,
        } => {
            let token_x = resolve_mint(&token_x);
            let token_y = resolve_mint(&token_y);

            let approver = (!app_cfg.assume_yes).then(stdin_approver);
            let wallet_provider = load_wallet(&app_cfg.config.wallet, approver);
            let user_wallet = match (wallet, &wallet_provider) {
                (Some(address), _) => address,
                (None, Some(provider)) => provider.connect().await?.to_string(),
                (None, None) => anyhow::bail!("no --wallet given and no keypair configured"),
            };

            let orchestrator = build_orchestrator(&app_cfg, wallet_provider)?;

            if !skip_balance_check {
                let check = orchestrator
                    .validate_wallet_balance(&user_wallet, app_cfg.config.defaults.required_sol)
                    .await;
                if !check.has_enough_balance {
                    anyhow::bail!(check
                        .error
                        .unwrap_or_else(|| "insufficient balance".to_string()));
                }
                info!("💰 Wallet balance: {} SOL", format_token_amount(check.balance, 4));
            }

            let overrides = if recommended {
                recommended_overrides(&token_x, &token_y, &overrides)
            } else {
                overrides
            };
            let request =
                QuickLpRequest::new(&token_x, &token_y, &user_wallet).with_config(overrides);
            let result = orchestrator.create_position(request).await;
            println!("{}", serde_json::to_string_pretty(&result)?);
            if !result.success {
                anyhow::bail!("position was not created");
            }
        }
    }

    Ok(())
}

fn build_orchestrator(
    app_cfg: &AppCfg,
    wallet: Option<Arc<dyn WalletProvider>>,
) -> Result<LpOrchestrator> {
    let cfg = &app_cfg.config;
    let rpc = SolanaRpcClient::new(&cfg.rpc, cfg.signer.poll_interval())?;
    let signer = WalletSigner::new(wallet, Arc::new(rpc), cfg.signer.clone());
    let builder = CleopetraApiClient::new(&cfg.api)?;

    Ok(LpOrchestrator::new(Arc::new(builder), Arc::new(signer))
        .with_default_config(cfg.defaults.lp.clone()))
}

fn load_wallet(cfg: &WalletCfg, approver: Option<Approver>) -> Option<Arc<dyn WalletProvider>> {
    let wallet = detect_wallet(cfg)?;
    let wallet = match approver {
        Some(approver) => wallet.with_approver(approver),
        None => wallet,
    };
    Some(Arc::new(wallet))
}

/// Pair preset with user overrides on top, expressed as a full override set
fn recommended_overrides(
    token_x: &str,
    token_y: &str,
    custom: &PartialLpConfig,
) -> PartialLpConfig {
    let LpConfigDraft {
        bin_step,
        min_price,
        max_price,
        mode,
    } = presets::recommended_config(token_x, token_y, Some(custom));
    PartialLpConfig {
        bin_step: Some(bin_step),
        min_price: Some(min_price),
        max_price: Some(max_price),
        mode: Some(mode),
    }
}

fn resolve_mint(token: &str) -> String {
    mint_for_symbol(token)
        .map(str::to_string)
        .unwrap_or_else(|| token.to_string())
}

fn stdin_approver() -> Approver {
    Arc::new(|request: &str| {
        prompt_for_approval(request, &mut io::stdin().lock(), &mut io::stderr())
    })
}

/// Ask on `prompt` (stderr in the binary, keeping stdout for JSON) and read y/N
fn prompt_for_approval(request: &str, input: &mut impl BufRead, prompt: &mut impl Write) -> bool {
    if write!(prompt, "Approve wallet request: {}? [y/N] ", request)
        .and_then(|_| prompt.flush())
        .is_err()
    {
        return false;
    }
    let mut answer = String::new();
    match input.read_line(&mut answer) {
        Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
        Err(e) => {
            warn!("Failed to read approval: {}", e);
            false
        }
    }
}

fn print_pools(pools: &[MarketPool]) {
    if pools.is_empty() {
        println!("No pools found");
        return;
    }

    if let Some(oldest) = pools.iter().map(|p| p.fetched_at).min() {
        println!("Fetched at {}", oldest.to_rfc3339());
    }
    println!(
        "{:<44}  {:<16}  {:>8}  {:>16}  {:>16}  {:>14}  {:>10}",
        "ADDRESS", "PAIR", "BIN STEP", "LIQUIDITY", "VOLUME 24H", "EST. FEES 24H", "APR %"
    );
    for pool in pools {
        let pair = format!(
            "{}/{}",
            presets::token_display_name(&pool.mint_x),
            presets::token_display_name(&pool.mint_y)
        );
        let fees = presets::estimate_lp_fees(pool.bin_step as i64, pool.trade_volume_24h);
        println!(
            "{:<44}  {:<16}  {:>8}  {:>16}  {:>16}  {:>14}  {:>10}",
            pool.address,
            pair,
            pool.bin_step,
            format_token_amount(pool.liquidity_value(), 2),
            format_token_amount(pool.trade_volume_24h, 2),
            format_token_amount(fees.total_fee, 2),
            format_token_amount(pool.apr, 2)
        );
    }
}

/// Reject config files whose LP defaults would fail every request
pub fn check_defaults(cfg: &Config) -> Result<()> {
    let validation = cfg.defaults.lp.validate();
    if !validation.is_valid {
        anyhow::bail!("invalid [defaults.lp]: {}", validation.errors.join(", "));
    }
    Ok(())
}

pub fn load_config(path: Option<&str>) -> Result<Config> {
    let cfg = Config::load(path).context("load configuration")?;
    check_defaults(&cfg)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_prompt_accepts_yes_only() {
        let mut prompt = Vec::new();
        assert!(prompt_for_approval("sign", &mut Cursor::new("Yes\n"), &mut prompt));
        assert_eq!(String::from_utf8(prompt).unwrap(), "Approve wallet request: sign? [y/N] ");

        assert!(!prompt_for_approval("sign", &mut Cursor::new("\n"), &mut Vec::new()));
        assert!(!prompt_for_approval("sign", &mut Cursor::new("nope\n"), &mut Vec::new()));
    }
}
