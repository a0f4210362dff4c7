//! Error handling for the application

use solana_client::client_error::ClientError;
use thiserror::Error;

/// Errors raised by validators, gateways and the signer adapter
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LpError {
    #[error("{0}")]
    Validation(String),

    #[error("Network error: {0}")]
    Network(String),

    /// The remote service answered but reported a failure; carries its message verbatim
    #[error("{0}")]
    Remote(String),

    #[error("Unexpected response format: {0}")]
    Format(String),

    #[error("User rejected the request: {0}")]
    UserRejected(String),

    #[error("No signing wallet detected")]
    WalletUnavailable,

    #[error("Signing failed: {0}")]
    Signing(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl LpError {
    /// Short machine-readable label used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            LpError::Validation(_) => "validation",
            LpError::Network(_) => "network",
            LpError::Remote(_) => "remote",
            LpError::Format(_) => "format",
            LpError::UserRejected(_) => "user_rejected",
            LpError::WalletUnavailable => "wallet_unavailable",
            LpError::Signing(_) => "signing",
            LpError::Config(_) => "config",
        }
    }
}

/// A batch aborted part-way through.
///
/// Signatures for blobs that were submitted before the failure are kept: the
/// ledger state they produced persists, so callers must be able to see them.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{error}")]
pub struct BatchFailure {
    pub error: LpError,
    pub completed_signatures: Vec<String>,
    pub failed_index: usize,
}

impl From<reqwest::Error> for LpError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LpError::Network(format!("request timed out: {}", err))
        } else if err.is_decode() {
            LpError::Format(err.to_string())
        } else {
            LpError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for LpError {
    fn from(err: serde_json::Error) -> Self {
        LpError::Format(err.to_string())
    }
}

impl From<base64::DecodeError> for LpError {
    fn from(err: base64::DecodeError) -> Self {
        LpError::Format(format!("invalid base64 transaction: {}", err))
    }
}

impl From<bincode::Error> for LpError {
    fn from(err: bincode::Error) -> Self {
        LpError::Format(format!("invalid transaction encoding: {}", err))
    }
}

impl From<ClientError> for LpError {
    fn from(err: ClientError) -> Self {
        LpError::Network(format!("RPC request failed: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_error_displays_message_verbatim() {
        let err = LpError::Remote("pool exists".to_string());
        assert_eq!(err.to_string(), "pool exists");
        assert_eq!(err.kind(), "remote");
    }

    #[test]
    fn test_batch_failure_displays_inner_error() {
        let failure = BatchFailure {
            error: LpError::UserRejected("signature declined".to_string()),
            completed_signatures: vec!["sig1".to_string()],
            failed_index: 1,
        };
        assert_eq!(failure.to_string(), "User rejected the request: signature declined");
    }
}
