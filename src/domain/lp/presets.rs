//! Preset LP configurations and sizing heuristics

use std::collections::BTreeMap;

use serde::Serialize;

use super::{LpConfigDraft, LpMode, PartialLpConfig};
use crate::shared::types::{BONK_MINT, COMMON_TOKENS, SOL_MINT, USDC_MINT, USDT_MINT, WIF_MINT};

/// Risk-profile presets offered by the orchestrator
pub fn preset_configs() -> BTreeMap<&'static str, LpConfigDraft> {
    BTreeMap::from([
        ("conservative", LpConfigDraft::new(10, "0.001", "100", LpMode::Normal)),
        ("moderate", LpConfigDraft::new(25, "0.0001", "1000", LpMode::Normal)),
        ("aggressive", LpConfigDraft::new(50, "0.00001", "10000", LpMode::Normal)),
        ("zap", LpConfigDraft::new(25, "0.0001", "1000", LpMode::Zap)),
    ])
}

/// Pair-specific presets keyed by (token_x_mint, token_y_mint) and mode
fn pair_preset(token_x_mint: &str, token_y_mint: &str, mode: LpMode) -> Option<LpConfigDraft> {
    let preset = match (token_x_mint, token_y_mint) {
        (SOL_MINT, USDC_MINT) if mode == LpMode::Zap => {
            LpConfigDraft::new(25, "0.0001", "1000", LpMode::Zap)
        }
        (SOL_MINT, USDC_MINT) => LpConfigDraft::new(25, "0.0001", "1000", LpMode::Normal),
        (SOL_MINT, BONK_MINT) => LpConfigDraft::new(50, "0.00000001", "100000", LpMode::Normal),
        (SOL_MINT, WIF_MINT) => LpConfigDraft::new(25, "0.0001", "1000", LpMode::Normal),
        (USDC_MINT, USDT_MINT) => LpConfigDraft::new(1, "0.9", "1.1", LpMode::Normal),
        _ => return None,
    };
    Some(preset)
}

/// Pair preset (or the default preset) with `custom` overrides applied
pub fn recommended_config(
    token_x_mint: &str,
    token_y_mint: &str,
    custom: Option<&PartialLpConfig>,
) -> LpConfigDraft {
    let mode = custom
        .and_then(|partial| partial.mode.as_deref())
        .and_then(|mode| mode.parse().ok())
        .unwrap_or(LpMode::Normal);
    let base = pair_preset(token_x_mint, token_y_mint, mode).unwrap_or_default();
    match custom {
        Some(partial) => base.merged_with(partial),
        None => base,
    }
}

pub fn price_range(min_price: f64, max_price: f64) -> f64 {
    max_price / min_price
}

/// Bin step suited to a max/min price ratio
pub fn optimal_bin_step(price_range: f64) -> i64 {
    match price_range {
        r if r <= 1.1 => 1,
        r if r <= 1.5 => 5,
        r if r <= 2.0 => 10,
        r if r <= 5.0 => 25,
        r if r <= 10.0 => 50,
        _ => 100,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeeEstimate {
    pub trading_fee: f64,
    pub protocol_fee: f64,
    pub total_fee: f64,
}

/// Rough daily fee income: base fee is bin_step basis points, protocol takes 10%
pub fn estimate_lp_fees(bin_step: i64, volume_24h: f64) -> FeeEstimate {
    let base_fee = bin_step as f64 / 10_000.0;
    let trading_fee = volume_24h * base_fee;
    let protocol_fee = trading_fee * 0.1;
    FeeEstimate {
        trading_fee,
        protocol_fee,
        total_fee: trading_fee + protocol_fee,
    }
}

/// Symbol for well-known mints, otherwise an abbreviated mint
pub fn token_display_name(mint: &str) -> String {
    COMMON_TOKENS
        .iter()
        .find(|(_, m)| *m == mint)
        .map(|(symbol, _)| symbol.to_string())
        .unwrap_or_else(|| format!("{}...", mint.chars().take(8).collect::<String>()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        let presets = preset_configs();
        assert_eq!(presets.len(), 4);
        for (name, draft) in presets {
            assert!(draft.validate().is_valid, "preset {} invalid", name);
        }
        assert_eq!(preset_configs()["zap"].mode, "zap");
    }

    #[test]
    fn test_recommended_config_uses_pair_preset() {
        let config = recommended_config(USDC_MINT, USDT_MINT, None);
        assert_eq!(config.bin_step, 1);
        assert_eq!(config.min_price, "0.9");

        let custom = PartialLpConfig::with_mode(LpMode::Zap);
        let config = recommended_config(SOL_MINT, BONK_MINT, Some(&custom));
        assert_eq!(config.bin_step, 50);
        assert_eq!(config.mode, "zap");
    }

    #[test]
    fn test_recommended_zap_sol_usdc() {
        let custom = PartialLpConfig::with_mode(LpMode::Zap);
        let config = recommended_config(SOL_MINT, USDC_MINT, Some(&custom));
        assert_eq!(config, LpConfigDraft::new(25, "0.0001", "1000", LpMode::Zap));

        let normal = recommended_config(SOL_MINT, USDC_MINT, None);
        assert_eq!(normal.mode, "normal");
    }

    #[test]
    fn test_recommended_config_falls_back_to_default() {
        let config = recommended_config(BONK_MINT, WIF_MINT, None);
        assert_eq!(config, LpConfigDraft::default());
    }

    #[test]
    fn test_optimal_bin_step() {
        assert_eq!(optimal_bin_step(price_range(1.0, 1.05)), 1);
        assert_eq!(optimal_bin_step(1.5), 5);
        assert_eq!(optimal_bin_step(2.0), 10);
        assert_eq!(optimal_bin_step(5.0), 25);
        assert_eq!(optimal_bin_step(10.0), 50);
        assert_eq!(optimal_bin_step(price_range(0.0001, 1000.0)), 100);
    }

    #[test]
    fn test_estimate_lp_fees() {
        let estimate = estimate_lp_fees(25, 1_000_000.0);
        assert!((estimate.trading_fee - 2_500.0).abs() < 1e-9);
        assert!((estimate.protocol_fee - 250.0).abs() < 1e-9);
        assert!((estimate.total_fee - 2_750.0).abs() < 1e-9);
    }

    #[test]
    fn test_token_display_name() {
        assert_eq!(token_display_name(SOL_MINT), "SOL");
        assert_eq!(
            token_display_name("9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin"),
            "9xQeWvG8..."
        );
    }
}
