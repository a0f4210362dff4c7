//! Wallet signing and ledger submission

pub mod rpc_client;
pub mod signer;
pub mod wallet;
pub mod wire_format;

pub use rpc_client::{SolanaRpcClient, TransactionSubmitter};
pub use signer::{SigningService, WalletSigner};
pub use wallet::{detect_wallet, Approver, KeypairWallet, WalletProvider};
pub use wire_format::{sniff_wire_format, ConfirmationPolicy, WireFormat, WireTransaction};
