//! Signing capability behind a wallet-shaped interface

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use solana_sdk::{
    pubkey::Pubkey,
    signature::{read_keypair_file, Keypair, Signer},
};
use tracing::{info, warn};

use super::wire_format::WireTransaction;
use crate::config::WalletCfg;
use crate::shared::errors::LpError;

/// Asked before every connect and signature; `false` declines the request
pub type Approver = Arc<dyn Fn(&str) -> bool + Send + Sync>;

#[async_trait]
pub trait WalletProvider: Send + Sync {
    async fn connect(&self) -> Result<Pubkey, LpError>;

    async fn disconnect(&self) -> Result<(), LpError>;

    async fn sign_transaction(&self, tx: WireTransaction) -> Result<WireTransaction, LpError>;

    fn is_connected(&self) -> bool;

    fn public_key(&self) -> Option<Pubkey>;

    fn name(&self) -> &str;
}

/// Wallet backed by a local keypair
pub struct KeypairWallet {
    keypair: Arc<Keypair>,
    approver: Option<Approver>,
    connected: AtomicBool,
}

impl KeypairWallet {
    pub fn new(keypair: Keypair) -> Self {
        Self {
            keypair: Arc::new(keypair),
            approver: None,
            connected: AtomicBool::new(false),
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, LpError> {
        let path = path.as_ref();
        let keypair = read_keypair_file(path).map_err(|e| {
            LpError::Config(format!("failed to load keypair {}: {}", path.display(), e))
        })?;
        Ok(Self::new(keypair))
    }

    pub fn with_approver(mut self, approver: Approver) -> Self {
        self.approver = Some(approver);
        self
    }

    pub fn pubkey(&self) -> Pubkey {
        self.keypair.pubkey()
    }

    async fn approve(&self, request: String) -> Result<(), LpError> {
        let Some(approver) = self.approver.clone() else {
            return Ok(());
        };

        // approvers may block on a terminal prompt
        let prompt = request.clone();
        let approved = tokio::task::spawn_blocking(move || approver(&prompt))
            .await
            .map_err(|e| LpError::Signing(format!("approval prompt failed: {}", e)))?;

        if approved {
            Ok(())
        } else {
            warn!("🚫 Wallet request declined: {}", request);
            Err(LpError::UserRejected(request))
        }
    }
}

#[async_trait]
impl WalletProvider for KeypairWallet {
    async fn connect(&self) -> Result<Pubkey, LpError> {
        let pubkey = self.pubkey();
        if self.is_connected() {
            return Ok(pubkey);
        }

        self.approve(format!("connect {} wallet {}", self.name(), pubkey))
            .await?;
        self.connected.store(true, Ordering::SeqCst);
        info!("🔑 Wallet connected: {}", pubkey);
        Ok(pubkey)
    }

    async fn disconnect(&self) -> Result<(), LpError> {
        self.connected.store(false, Ordering::SeqCst);
        Ok(())
    }

    async fn sign_transaction(&self, tx: WireTransaction) -> Result<WireTransaction, LpError> {
        if !self.is_connected() {
            return Err(LpError::Signing("wallet is not connected".to_string()));
        }

        self.approve(format!("sign {} transaction", tx.format())).await?;
        tx.partial_sign(&self.keypair)
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    fn public_key(&self) -> Option<Pubkey> {
        self.is_connected().then(|| self.pubkey())
    }

    fn name(&self) -> &str {
        "keypair"
    }
}

/// Look for a signing capability; absence is reported as `None`, never an error
pub fn detect_wallet(cfg: &WalletCfg) -> Option<KeypairWallet> {
    let path = cfg.keypair.as_deref()?;
    match KeypairWallet::from_file(path) {
        Ok(wallet) => {
            info!("🔑 Detected keypair wallet {}", wallet.pubkey());
            Some(wallet)
        }
        Err(e) => {
            warn!("⚠️ No usable wallet: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::blockchain::wire_format::test_support::unsigned_legacy;
    use solana_sdk::signature::{write_keypair_file, Signature};
    use std::sync::atomic::AtomicUsize;

    #[tokio::test]
    async fn test_connect_and_sign() {
        let payer = Keypair::new();
        let tx = WireTransaction::Legacy(unsigned_legacy(&payer));
        let wallet = KeypairWallet::new(payer);

        assert!(!wallet.is_connected());
        assert_eq!(wallet.public_key(), None);

        let pubkey = wallet.connect().await.unwrap();
        assert_eq!(wallet.public_key(), Some(pubkey));

        let signed = wallet.sign_transaction(tx).await.unwrap();
        assert_ne!(signed.signature(), Some(&Signature::default()));

        wallet.disconnect().await.unwrap();
        assert!(!wallet.is_connected());
    }

    #[tokio::test]
    async fn test_sign_requires_connection() {
        let payer = Keypair::new();
        let tx = WireTransaction::Legacy(unsigned_legacy(&payer));
        let wallet = KeypairWallet::new(payer);

        let err = wallet.sign_transaction(tx).await.unwrap_err();
        assert!(matches!(err, LpError::Signing(_)));
    }

    #[tokio::test]
    async fn test_declined_signature_is_user_rejection() {
        let payer = Keypair::new();
        let tx = WireTransaction::Legacy(unsigned_legacy(&payer));
        let prompts = Arc::new(AtomicUsize::new(0));
        let seen = prompts.clone();
        // approve the connect prompt, decline everything after it
        let wallet = KeypairWallet::new(payer).with_approver(Arc::new(move |_: &str| {
            seen.fetch_add(1, Ordering::SeqCst) == 0
        }));

        wallet.connect().await.unwrap();
        let err = wallet.sign_transaction(tx).await.unwrap_err();
        assert!(matches!(err, LpError::UserRejected(_)), "got {:?}", err);
        assert_eq!(prompts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_declined_connect() {
        let wallet = KeypairWallet::new(Keypair::new()).with_approver(Arc::new(|_: &str| false));
        assert!(matches!(
            wallet.connect().await,
            Err(LpError::UserRejected(_))
        ));
        assert!(!wallet.is_connected());
    }

    #[test]
    fn test_detect_wallet() {
        assert!(detect_wallet(&WalletCfg::default()).is_none());
        assert!(detect_wallet(&WalletCfg {
            keypair: Some("/nonexistent/quicklp-id.json".to_string()),
        })
        .is_none());

        let keypair = Keypair::new();
        let path = std::env::temp_dir().join(format!("quicklp-{}.json", keypair.pubkey()));
        write_keypair_file(&keypair, &path).unwrap();

        let wallet = detect_wallet(&WalletCfg {
            keypair: Some(path.to_string_lossy().into_owned()),
        })
        .expect("wallet detected");
        assert_eq!(wallet.pubkey(), keypair.pubkey());

        std::fs::remove_file(path).ok();
    }
}
