//! Execution domain - unsigned transaction batches handed to the signer

use serde::{Deserialize, Serialize};

/// Metadata for a rebalancing swap supplied alongside a zap-mode position
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SwapLeg {
    pub input_mint: String,
    pub output_mint: String,
    pub input_amount: String,
    pub output_amount: String,
    pub slippage_bps: u32,
}

/// Ordered base64 transaction blobs for one position request.
///
/// The initialize transaction comes first, followed by any swap transactions
/// in the order the builder returned them. Blobs are submitted in this order.
#[derive(Debug, Clone, PartialEq)]
pub struct UnsignedTransactionBatch {
    transactions: Vec<String>,
    swaps: Vec<SwapLeg>,
    pool_address: Option<String>,
}

impl UnsignedTransactionBatch {
    pub fn new(initialize_transaction: String) -> Self {
        Self {
            transactions: vec![initialize_transaction],
            swaps: Vec::new(),
            pool_address: None,
        }
    }

    pub fn push_swap(&mut self, transaction: String, leg: SwapLeg) {
        self.transactions.push(transaction);
        self.swaps.push(leg);
    }

    pub fn with_pool_address(mut self, pool_address: Option<String>) -> Self {
        self.pool_address = pool_address;
        self
    }

    pub fn transactions(&self) -> &[String] {
        &self.transactions
    }

    pub fn swaps(&self) -> &[SwapLeg] {
        &self.swaps
    }

    pub fn pool_address(&self) -> Option<&str> {
        self.pool_address.as_deref()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn into_transactions(self) -> Vec<String> {
        self.transactions
    }
}
