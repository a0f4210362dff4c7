//! Solana RPC client for submission, confirmation and balance reads

use std::time::Duration;

use async_trait::async_trait;
use solana_client::{nonblocking::rpc_client::RpcClient, rpc_config::RpcSendTransactionConfig};
use solana_sdk::{commitment_config::CommitmentConfig, pubkey::Pubkey, signature::Signature};
use tracing::{debug, info};

use super::wire_format::WireTransaction;
use crate::config::RpcCfg;
use crate::shared::errors::LpError;

/// Ledger access needed by the signer
#[async_trait]
pub trait TransactionSubmitter: Send + Sync {
    async fn send_transaction(&self, tx: &WireTransaction) -> Result<Signature, LpError>;

    /// Wait until `signature` reaches the configured commitment, or fail after `timeout`
    async fn confirm_transaction(
        &self,
        signature: &Signature,
        timeout: Duration,
    ) -> Result<(), LpError>;

    /// Balance in lamports
    async fn get_balance(&self, pubkey: &Pubkey) -> Result<u64, LpError>;
}

/// Solana RPC client wrapper
pub struct SolanaRpcClient {
    client: RpcClient,
    commitment: CommitmentConfig,
    poll_interval: Duration,
}

impl SolanaRpcClient {
    pub fn new(cfg: &RpcCfg, poll_interval: Duration) -> Result<Self, LpError> {
        let commitment = cfg.commitment_config()?;
        Ok(Self {
            client: RpcClient::new_with_timeout_and_commitment(
                cfg.url.clone(),
                cfg.timeout(),
                commitment,
            ),
            commitment,
            poll_interval,
        })
    }

    fn send_config(&self) -> RpcSendTransactionConfig {
        RpcSendTransactionConfig {
            skip_preflight: false,
            preflight_commitment: Some(self.commitment.commitment),
            ..Default::default()
        }
    }

    async fn poll_status(&self, signature: &Signature) -> Result<(), LpError> {
        loop {
            let status = self
                .client
                .get_signature_status_with_commitment(signature, self.commitment)
                .await?;

            match status {
                Some(Ok(())) => return Ok(()),
                Some(Err(e)) => {
                    return Err(LpError::Network(format!(
                        "transaction {} failed: {}",
                        signature, e
                    )))
                }
                None => {
                    debug!("⏳ {} not yet {:?}", signature, self.commitment.commitment);
                    tokio::time::sleep(self.poll_interval).await;
                }
            }
        }
    }
}

#[async_trait]
impl TransactionSubmitter for SolanaRpcClient {
    async fn send_transaction(&self, tx: &WireTransaction) -> Result<Signature, LpError> {
        let config = self.send_config();
        let signature = match tx {
            WireTransaction::Legacy(tx) => {
                self.client.send_transaction_with_config(tx, config).await?
            }
            WireTransaction::Versioned(tx) => {
                self.client.send_transaction_with_config(tx, config).await?
            }
        };
        info!("🚀 Transaction sent: {}", signature);
        Ok(signature)
    }

    async fn confirm_transaction(
        &self,
        signature: &Signature,
        timeout: Duration,
    ) -> Result<(), LpError> {
        tokio::time::timeout(timeout, self.poll_status(signature))
            .await
            .map_err(|_| {
                LpError::Network(format!(
                    "transaction {} not confirmed within {}s",
                    signature,
                    timeout.as_secs()
                ))
            })??;
        info!("✅ Transaction confirmed: {}", signature);
        Ok(())
    }

    async fn get_balance(&self, pubkey: &Pubkey) -> Result<u64, LpError> {
        Ok(self.client.get_balance(pubkey).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_unknown_commitment() {
        let cfg = RpcCfg {
            commitment: "eventual".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            SolanaRpcClient::new(&cfg, Duration::from_millis(10)),
            Err(LpError::Config(_))
        ));
    }

    #[test]
    fn test_send_config_uses_preflight() {
        let client = SolanaRpcClient::new(&RpcCfg::default(), Duration::from_millis(10)).unwrap();
        let config = client.send_config();
        assert!(!config.skip_preflight);
        assert_eq!(
            config.preflight_commitment,
            Some(CommitmentConfig::confirmed().commitment)
        );
    }

    #[tokio::test]
    async fn test_unreachable_node_is_network_error() {
        let cfg = RpcCfg {
            url: "http://127.0.0.1:1".to_string(),
            timeout_secs: 2,
            ..Default::default()
        };
        let client = SolanaRpcClient::new(&cfg, Duration::from_millis(10)).unwrap();
        let err = client.get_balance(&Pubkey::new_unique()).await.unwrap_err();
        assert!(matches!(err, LpError::Network(_)), "got {:?}", err);
    }
}
