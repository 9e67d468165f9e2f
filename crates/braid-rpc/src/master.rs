use jsonrpsee::core::async_trait;
use thiserror::Error;

use braid_core::{Address, Branch, Transaction};

#[derive(Debug, Error)]
pub enum MasterError {
    #[error("transaction rejected: {0}")]
    Rejected(String),

    #[error("master service unavailable: {0}")]
    Unavailable(String),
}

/// The master service that executes transactions, tracks balances, and
/// answers count queries. The gateway awaits these calls and owns nothing
/// of the transaction lifecycle beyond them; submission failures propagate
/// to the caller unchanged, with no retry at this layer.
#[async_trait]
pub trait MasterClient: Send + Sync {
    /// Resolve the branch an address lives on and its transaction count.
    async fn get_transaction_count(&self, address: Address) -> Result<(Branch, u64), MasterError>;

    /// Submit a signed transaction for execution on `branch`.
    async fn add_tx(&self, tx: Transaction, branch: Branch) -> Result<(), MasterError>;
}
