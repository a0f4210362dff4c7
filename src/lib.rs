//! QuickLp - one-shot Meteora DLMM liquidity positions on Solana
//! Built with Domain-Driven Design principles

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod shared;

// Re-export main types for convenience
pub use application::LpOrchestrator;
pub use config::Config;
pub use domain::lp::{LpConfigDraft, LpMode, LpResult, PartialLpConfig, QuickLpRequest};
pub use infrastructure::api_clients::{CleopetraApiClient, MeteoraApiClient};
pub use infrastructure::blockchain::{KeypairWallet, SolanaRpcClient, WalletSigner};
pub use shared::errors::LpError;
