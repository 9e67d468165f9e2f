use crate::error::WireError;
use crate::types::{Address, Branch};

/// Fixed-format byte codec for domain objects carried over the wire.
///
/// The RPC codec treats these buffers as opaque: it only strips or adds the
/// hex wrapper and delegates the byte layout to this trait.
pub trait WireSerialize: Sized {
    /// Object kind, used in error messages ("address", "branch").
    const KIND: &'static str;

    fn to_wire_bytes(&self) -> Vec<u8>;

    fn from_wire_bytes(bytes: &[u8]) -> Result<Self, WireError>;
}

/// Wire form: recipient (20 bytes) followed by full shard id (4 bytes,
/// big-endian). 24 bytes total.
impl WireSerialize for Address {
    const KIND: &'static str = "address";

    fn to_wire_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(24);
        out.extend_from_slice(&self.recipient);
        out.extend_from_slice(&self.full_shard_id.to_be_bytes());
        out
    }

    fn from_wire_bytes(bytes: &[u8]) -> Result<Self, WireError> {
        if bytes.len() != 24 {
            return Err(WireError::UnexpectedLength {
                kind: Self::KIND,
                expected: 24,
                got: bytes.len(),
            });
        }
        let mut recipient = [0u8; 20];
        recipient.copy_from_slice(&bytes[..20]);
        let mut shard = [0u8; 4];
        shard.copy_from_slice(&bytes[20..]);
        Ok(Address {
            recipient,
            full_shard_id: u32::from_be_bytes(shard),
        })
    }
}

/// Wire form: the packed branch value as 4 big-endian bytes.
impl WireSerialize for Branch {
    const KIND: &'static str = "branch";

    fn to_wire_bytes(&self) -> Vec<u8> {
        self.0.to_be_bytes().to_vec()
    }

    fn from_wire_bytes(bytes: &[u8]) -> Result<Self, WireError> {
        if bytes.len() != 4 {
            return Err(WireError::UnexpectedLength {
                kind: Self::KIND,
                expected: 4,
                got: bytes.len(),
            });
        }
        let mut value = [0u8; 4];
        value.copy_from_slice(bytes);
        let value = u32::from_be_bytes(value);
        // The packed form always carries the shard-size bit.
        if value == 0 {
            return Err(WireError::ZeroValue { kind: Self::KIND });
        }
        Ok(Branch(value))
    }
}
