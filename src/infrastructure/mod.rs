//! Infrastructure layer - HTTP gateways and the Solana signer

pub mod api_clients;
pub mod blockchain;
