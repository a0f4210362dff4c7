//! Signs builder-produced transaction blobs with the user's wallet and submits
//! them to the ledger.

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use base64::{prelude::BASE64_STANDARD, Engine};
use solana_sdk::pubkey::Pubkey;
use tokio::sync::Mutex;
use tracing::{error, info};

use super::rpc_client::TransactionSubmitter;
use super::wallet::WalletProvider;
use super::wire_format::{ConfirmationPolicy, WireTransaction};
use crate::config::SignerCfg;
use crate::shared::errors::{BatchFailure, LpError};
use crate::shared::types::Amount;

#[async_trait]
pub trait SigningService: Send + Sync {
    /// Sign and submit blobs in order, stopping at the first failure
    async fn sign_and_send_batch(&self, blobs: &[String]) -> Result<Vec<String>, BatchFailure>;

    /// SOL balance of `address`
    async fn get_balance(&self, address: &str) -> Result<f64, LpError>;
}

pub struct WalletSigner {
    wallet: Option<Arc<dyn WalletProvider>>,
    submitter: Arc<dyn TransactionSubmitter>,
    cfg: SignerCfg,
    // held for the whole of a batch so wallet prompts never interleave
    queue: Mutex<()>,
}

impl WalletSigner {
    pub fn new(
        wallet: Option<Arc<dyn WalletProvider>>,
        submitter: Arc<dyn TransactionSubmitter>,
        cfg: SignerCfg,
    ) -> Self {
        Self {
            wallet,
            submitter,
            cfg,
            queue: Mutex::new(()),
        }
    }

    fn wallet(&self) -> Result<&Arc<dyn WalletProvider>, LpError> {
        self.wallet.as_ref().ok_or(LpError::WalletUnavailable)
    }

    pub async fn connect(&self) -> Result<Pubkey, LpError> {
        self.wallet()?.connect().await
    }

    pub async fn sign_and_send(&self, blob: &str) -> Result<String, LpError> {
        let _queued = self.queue.lock().await;
        self.sign_and_send_unqueued(blob).await
    }

    fn policy_for(&self, tx: &WireTransaction) -> ConfirmationPolicy {
        if self.cfg.always_confirm {
            ConfirmationPolicy::AwaitConfirmation
        } else {
            tx.format().confirmation_policy()
        }
    }

    async fn sign_and_send_unqueued(&self, blob: &str) -> Result<String, LpError> {
        let wallet = self.wallet()?;

        let bytes = BASE64_STANDARD.decode(blob.trim())?;
        let tx = WireTransaction::decode(&bytes)?;
        let policy = self.policy_for(&tx);

        if !wallet.is_connected() {
            wallet.connect().await?;
        }

        let signed = wallet.sign_transaction(tx).await?;
        let signature = self.submitter.send_transaction(&signed).await?;

        if policy == ConfirmationPolicy::AwaitConfirmation {
            self.submitter
                .confirm_transaction(&signature, self.cfg.confirm_timeout())
                .await?;
        }

        Ok(signature.to_string())
    }
}

#[async_trait]
impl SigningService for WalletSigner {
    async fn sign_and_send_batch(&self, blobs: &[String]) -> Result<Vec<String>, BatchFailure> {
        let _queued = self.queue.lock().await;
        let mut signatures = Vec::with_capacity(blobs.len());

        for (index, blob) in blobs.iter().enumerate() {
            match self.sign_and_send_unqueued(blob).await {
                Ok(signature) => {
                    info!(
                        "✍️ Transaction {}/{} submitted: {}",
                        index + 1,
                        blobs.len(),
                        signature
                    );
                    signatures.push(signature);
                }
                Err(error) => {
                    error!(
                        "❌ Transaction {}/{} failed ({}): {}",
                        index + 1,
                        blobs.len(),
                        error.kind(),
                        error
                    );
                    return Err(BatchFailure {
                        error,
                        completed_signatures: signatures,
                        failed_index: index,
                    });
                }
            }
        }

        Ok(signatures)
    }

    async fn get_balance(&self, address: &str) -> Result<f64, LpError> {
        let pubkey = Pubkey::from_str(address)
            .map_err(|_| LpError::Validation(format!("Invalid Solana address: {}", address)))?;
        let lamports = self.submitter.get_balance(&pubkey).await?;
        Ok(Amount::from_lamports(lamports).to_ui())
    }
}
