use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};

use crate::types::{Quantity, TxHash};

/// A fully-formed, signed transaction as accepted by the master service.
///
/// The gateway only constructs and submits these; execution, balance
/// tracking, and persistence belong to the master service. The transaction
/// hash is Keccak-256 of the canonical bincode serialization of all fields.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Sender's per-branch sequence number.
    pub nonce: Quantity,

    pub gas_price: Quantity,

    pub start_gas: Quantity,

    /// Recipient account, absent for contract creation.
    pub to: Option<[u8; 20]>,

    pub value: Quantity,

    /// Call data / contract init code.
    pub data: Vec<u8>,

    /// Signature components. The gateway requires all three non-zero.
    pub v: Quantity,
    pub r: Quantity,
    pub s: Quantity,

    /// Packed value of the branch this transaction executes on.
    pub branch_value: u32,

    /// Cross-branch withdraw amount (0 when unused).
    pub withdraw: Quantity,

    pub withdraw_sign: i8,

    /// Serialized withdraw recipient address, empty when no withdraw.
    pub withdraw_to: Vec<u8>,
}

impl Transaction {
    /// Canonical bytes covered by the transaction hash.
    pub fn wire_bytes(&self) -> Vec<u8> {
        bincode::serialize(self).expect("transaction serialization is infallible")
    }

    pub fn hash(&self) -> TxHash {
        let digest = Keccak256::digest(self.wire_bytes());
        TxHash(digest.into())
    }
}
