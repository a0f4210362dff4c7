//! Common types used across the application

use serde::{Deserialize, Serialize};

pub const SOL_MINT: &str = "So11111111111111111111111111111111111111112";
pub const USDC_MINT: &str = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";
pub const USDT_MINT: &str = "Es9vMFrzaCERmJfrF4H2FYD4KCoNkY11McCe8BenwNYB";
pub const BONK_MINT: &str = "DezXAZ8z7PnrnRJjz3wXBoRgixCa6xjnB7YaB1pPB263";
pub const WIF_MINT: &str = "EKpQGSJtjMFqKZ9KQanSqYXRcF8fBopzLHYxdM65zcjm";
pub const RAY_MINT: &str = "4k3Dyjzvzp8eMZWUXbBCjEvwSkkk59S5iCNLY3QrkX6R";
pub const JUP_MINT: &str = "JUPyiwrYJFskUPiHa7hkeR8VUtAeFoSYbKedZNsDvCN";
pub const ORCA_MINT: &str = "orcaEKTdK7LKz57vaAYr9QeNsVEPfiu6QeMU1kektZE";

/// Quote mints the market listing is restricted to
pub const QUOTE_MINTS: [&str; 2] = [USDC_MINT, SOL_MINT];

/// Well-known tokens by symbol
pub const COMMON_TOKENS: [(&str, &str); 8] = [
    ("SOL", SOL_MINT),
    ("USDC", USDC_MINT),
    ("USDT", USDT_MINT),
    ("BONK", BONK_MINT),
    ("WIF", WIF_MINT),
    ("RAY", RAY_MINT),
    ("JUP", JUP_MINT),
    ("ORCA", ORCA_MINT),
];

/// Look up a well-known mint by symbol (case-insensitive)
pub fn mint_for_symbol(symbol: &str) -> Option<&'static str> {
    COMMON_TOKENS
        .iter()
        .find(|(s, _)| s.eq_ignore_ascii_case(symbol))
        .map(|(_, mint)| *mint)
}

/// Amount representation with precision
#[derive(Debug, Clone, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Amount {
    pub value: u64,
    pub decimals: u8,
}

impl Amount {
    pub fn from_lamports(value: u64) -> Self {
        Self { value, decimals: 9 }
    }

    /// Whole-unit value (lamports / 10^9 for SOL)
    pub fn to_ui(&self) -> f64 {
        self.value as f64 / 10_f64.powi(self.decimals as i32)
    }
}
