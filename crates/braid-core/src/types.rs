use serde::{Deserialize, Serialize};
use std::fmt;

/// Wire quantity (nonce, gas, value, signature components). u128 covers
/// every quantity this gateway manipulates; larger hex values are rejected
/// at decode time.
pub type Quantity = u128;

// ── Address ──────────────────────────────────────────────────────────────────

/// 24-byte account locator: a 20-byte recipient plus the 4-byte full shard
/// id selecting which branch of the ledger the account lives on.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address {
    pub recipient: [u8; 20],
    pub full_shard_id: u32,
}

impl Address {
    pub fn new(recipient: [u8; 20], full_shard_id: u32) -> Self {
        Self {
            recipient,
            full_shard_id,
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{:08x}",
            hex::encode(self.recipient),
            self.full_shard_id
        )
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({}…)", &hex::encode(self.recipient)[..8])
    }
}

// ── Branch ───────────────────────────────────────────────────────────────────

/// Shard/branch identifier. The value packs the shard count and the shard
/// index: `value = shard_size | shard_id` with `shard_size` a power of two
/// and `shard_id < shard_size`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Branch(pub u32);

impl Branch {
    pub fn value(&self) -> u32 {
        self.0
    }

    /// Number of shards in the ledger this branch belongs to. A zero value
    /// carries no shard bit and reports size 0; the wire codec rejects it.
    pub fn shard_size(&self) -> u32 {
        match self.0.checked_ilog2() {
            Some(bit) => 1 << bit,
            None => 0,
        }
    }

    /// Index of this shard within the ledger.
    pub fn shard_id(&self) -> u32 {
        self.0 ^ self.shard_size()
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.shard_id(), self.shard_size())
    }
}

impl fmt::Debug for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Branch({:#010x})", self.0)
    }
}

// ── TxHash ───────────────────────────────────────────────────────────────────

/// 32-byte transaction hash: Keccak-256 of the canonical serialized tx.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TxHash(pub [u8; 32]);

impl TxHash {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TxHash({}…)", &self.to_hex()[..16])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn branch_splits_into_shard_size_and_id() {
        // 8 shards, shard index 5: value = 0b1000 | 0b101.
        let b = Branch(8 | 5);
        assert_eq!(b.shard_size(), 8);
        assert_eq!(b.shard_id(), 5);
        assert_eq!(b.to_string(), "5/8");
    }

    #[test]
    fn branch_single_shard() {
        let b = Branch(1);
        assert_eq!(b.shard_size(), 1);
        assert_eq!(b.shard_id(), 0);
    }

    #[test]
    fn branch_zero_display_is_defined() {
        let b = Branch(0);
        assert_eq!(b.shard_size(), 0);
        assert_eq!(b.shard_id(), 0);
        assert_eq!(b.to_string(), "0/0");
    }
}
