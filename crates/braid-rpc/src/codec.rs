//! Canonical wire codecs for the JSON-RPC surface.
//!
//! Two scalar forms exist: quantities (integers, minimal hex, no leading
//! zero digits) and data (arbitrary byte buffers, even digit count). Domain
//! objects ride on the data codec through the [`WireSerialize`] capability.

use serde_json::Value;

use braid_core::constants::HASH_LEN;
use braid_core::types::{Address, Branch, Quantity};
use braid_core::WireSerialize;

use crate::error::CodecError;

// ── Quantities ───────────────────────────────────────────────────────────────

/// Decode a canonical quantity: a `0x`-prefixed hex string with no leading
/// zero digit except the literal `"0x0"`.
pub fn decode_quantity(raw: &Value) -> Result<Quantity, CodecError> {
    let s = raw.as_str().ok_or_else(invalid_quantity)?;
    let digits = s.strip_prefix("0x").ok_or_else(invalid_quantity)?;
    if digits.len() > 1 && digits.starts_with('0') {
        return Err(invalid_quantity());
    }
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid_quantity());
    }
    Quantity::from_str_radix(digits, 16).map_err(|_| invalid_quantity())
}

/// Encode a quantity in minimal hex form; zero encodes as `"0x0"`.
pub fn encode_quantity(value: Quantity) -> String {
    format!("{value:#x}")
}

fn invalid_quantity() -> CodecError {
    CodecError::InvalidEncoding("Invalid quantity encoding".into())
}

// ── Data ─────────────────────────────────────────────────────────────────────

/// Decode a data blob. The `0x` prefix is optional. An odd digit count is
/// treated as a legacy short form and zero-left-padded to 32 bytes; inputs
/// already past that bound on the odd-length path are rejected.
pub fn decode_data(raw: &Value) -> Result<Vec<u8>, CodecError> {
    let s = raw.as_str().ok_or_else(invalid_data)?;
    let digits = s.strip_prefix("0x").unwrap_or(s);
    if digits.len() % 2 != 0 {
        if digits.len() > 2 * HASH_LEN {
            return Err(CodecError::Precondition(format!(
                "odd-length data of {} hex digits exceeds the {HASH_LEN}-byte pad bound",
                digits.len()
            )));
        }
        let padded = format!("{digits:0>width$}", width = 2 * HASH_LEN);
        return hex::decode(padded).map_err(|_| invalid_data());
    }
    hex::decode(digits).map_err(|_| invalid_data())
}

/// Encode a data blob as `0x`-prefixed hex. With `length`, the value is
/// left-padded with zero bytes to `length` bytes; it is never truncated:
/// `encode_data(&[0xff], Some(3)) == "0x0000ff"`.
pub fn encode_data(bytes: &[u8], length: Option<usize>) -> String {
    let s = hex::encode(bytes);
    match length {
        Some(len) if s.len() < 2 * len => format!("0x{s:0>width$}", width = 2 * len),
        _ => format!("0x{s}"),
    }
}

fn invalid_data() -> CodecError {
    CodecError::InvalidEncoding("Invalid data hex encoding".into())
}

// ── Domain objects ───────────────────────────────────────────────────────────

/// Decode a fixed-format domain object from its hex wrapper. Deserialization
/// failures are wrapped as parameter errors; the wire error never crosses
/// the boundary as-is.
pub fn decode_object<T: WireSerialize>(raw: &Value) -> Result<T, CodecError> {
    let bytes = decode_data(raw)?;
    T::from_wire_bytes(&bytes)
        .map_err(|e| CodecError::InvalidParams(format!("invalid {}: {e}", T::KIND)))
}

pub fn encode_object<T: WireSerialize>(obj: &T) -> String {
    encode_data(&obj.to_wire_bytes(), None)
}

pub fn decode_address(raw: &Value) -> Result<Address, CodecError> {
    decode_object(raw)
}

pub fn encode_address(address: &Address) -> String {
    encode_object(address)
}

pub fn decode_branch(raw: &Value) -> Result<Branch, CodecError> {
    decode_object(raw)
}

pub fn encode_branch(branch: &Branch) -> String {
    encode_object(branch)
}

// ── Block identifiers ────────────────────────────────────────────────────────

/// A block selector: a symbolic tag or an explicit block number.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockId {
    Unspecified,
    Latest,
    Earliest,
    Pending,
    Number(Quantity),
}

/// Pass the symbolic tags (and JSON null) through; anything else must be a
/// canonical quantity.
pub fn decode_block_id(raw: &Value) -> Result<BlockId, CodecError> {
    match raw {
        Value::Null => Ok(BlockId::Unspecified),
        Value::String(s) if s == "latest" => Ok(BlockId::Latest),
        Value::String(s) if s == "earliest" => Ok(BlockId::Earliest),
        Value::String(s) if s == "pending" => Ok(BlockId::Pending),
        other => decode_quantity(other).map(BlockId::Number),
    }
}

// ── Hashes ───────────────────────────────────────────────────────────────────

/// Which hash a 32-byte decoder is validating; selects the error message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HashKind {
    Block,
    Transaction,
}

impl HashKind {
    fn label(self) -> &'static str {
        match self {
            HashKind::Block => "Block",
            HashKind::Transaction => "Transaction",
        }
    }
}

/// Decode a data blob that must be exactly 32 raw bytes.
pub fn decode_hash32(raw: &Value, kind: HashKind) -> Result<[u8; HASH_LEN], CodecError> {
    let bytes = decode_data(raw)?;
    <[u8; HASH_LEN]>::try_from(bytes).map_err(|_| CodecError::InvalidLength { kind: kind.label() })
}

// ── Booleans ─────────────────────────────────────────────────────────────────

/// Only a native JSON boolean is accepted; boolean-like strings and numbers
/// are rejected.
pub fn decode_bool(raw: &Value) -> Result<bool, CodecError> {
    raw.as_bool()
        .ok_or_else(|| CodecError::InvalidParams("Parameter must be boolean".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn quantity_round_trips() {
        for x in [0u128, 1, 15, 16, 255, 500_000, 60_000_000_000, u128::MAX] {
            assert_eq!(decode_quantity(&json!(encode_quantity(x))).unwrap(), x);
        }
    }

    #[test]
    fn quantity_encoding_is_minimal() {
        assert_eq!(encode_quantity(0), "0x0");
        assert_eq!(encode_quantity(5), "0x5");
        assert_eq!(encode_quantity(255), "0xff");
        for x in [0u128, 9, 4096] {
            let encoded = encode_quantity(x);
            let digits = &encoded[2..];
            assert!(digits == "0" || !digits.starts_with('0'), "{encoded}");
        }
    }

    #[test]
    fn quantity_rejects_leading_zero() {
        assert!(decode_quantity(&json!("0x0ff")).is_err());
        assert!(decode_quantity(&json!("0x00")).is_err());
        assert_eq!(decode_quantity(&json!("0x0")).unwrap(), 0);
    }

    #[test]
    fn quantity_rejects_missing_prefix() {
        assert!(decode_quantity(&json!("ff")).is_err());
    }

    #[test]
    fn quantity_rejects_non_string() {
        assert!(decode_quantity(&json!(123)).is_err());
        assert!(decode_quantity(&json!(null)).is_err());
    }

    #[test]
    fn quantity_rejects_non_hex_digits() {
        assert!(decode_quantity(&json!("0x")).is_err());
        assert!(decode_quantity(&json!("0xfg")).is_err());
        assert!(decode_quantity(&json!("0x+ff")).is_err());
    }

    #[test]
    fn quantity_error_message() {
        let err = decode_quantity(&json!("zz")).unwrap_err();
        assert_eq!(err.to_string(), "Invalid quantity encoding");
    }

    #[test]
    fn data_round_trips() {
        for bytes in [vec![], vec![0x00], vec![0xff, 0x00, 0x12], vec![0xab; 100]] {
            let encoded = encode_data(&bytes, None);
            assert_eq!(decode_data(&json!(encoded)).unwrap(), bytes);
        }
    }

    #[test]
    fn data_prefix_is_optional_on_decode() {
        assert_eq!(decode_data(&json!("abcd")).unwrap(), vec![0xab, 0xcd]);
    }

    #[test]
    fn data_encode_pads_to_length() {
        assert_eq!(encode_data(&[0xff], Some(3)), "0x0000ff");
        // Never truncates.
        assert_eq!(encode_data(&[1, 2, 3, 4], Some(2)), "0x01020304");
    }

    #[test]
    fn data_odd_length_pads_to_32_bytes() {
        let decoded = decode_data(&json!("0xfff")).unwrap();
        assert_eq!(decoded.len(), 32);
        assert_eq!(&decoded[30..], &[0x0f, 0xff]);
        assert!(decoded[..30].iter().all(|&b| b == 0));
    }

    #[test]
    fn data_odd_length_over_bound_fails() {
        let long = "f".repeat(65);
        let err = decode_data(&json!(long)).unwrap_err();
        assert!(matches!(err, CodecError::Precondition(_)));
    }

    #[test]
    fn data_rejects_non_hex() {
        assert!(decode_data(&json!("0xzz")).is_err());
    }

    #[test]
    fn address_round_trips_through_hex_wrapper() {
        let addr = Address::new([0x42; 20], 7);
        let encoded = encode_address(&addr);
        assert_eq!(encoded.len(), 2 + 48);
        assert_eq!(decode_address(&json!(encoded)).unwrap(), addr);
    }

    #[test]
    fn address_wraps_deserialize_failure_as_params_error() {
        let err = decode_address(&json!("0x1234")).unwrap_err();
        match err {
            CodecError::InvalidParams(msg) => {
                assert_eq!(msg, "invalid address: address must be 24 bytes, got 2")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn branch_round_trips_through_hex_wrapper() {
        let branch = Branch(8 | 5);
        assert_eq!(encode_branch(&branch), "0x0000000d");
        assert_eq!(decode_branch(&json!("0x0000000d")).unwrap(), branch);
    }

    #[test]
    fn branch_rejects_zero_wire_value() {
        let err = decode_branch(&json!("0x00000000")).unwrap_err();
        match err {
            CodecError::InvalidParams(msg) => {
                assert_eq!(msg, "invalid branch: branch value must be non-zero")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn block_id_tags_pass_through() {
        assert_eq!(decode_block_id(&json!(null)).unwrap(), BlockId::Unspecified);
        assert_eq!(decode_block_id(&json!("latest")).unwrap(), BlockId::Latest);
        assert_eq!(
            decode_block_id(&json!("earliest")).unwrap(),
            BlockId::Earliest
        );
        assert_eq!(decode_block_id(&json!("pending")).unwrap(), BlockId::Pending);
    }

    #[test]
    fn block_id_numbers_use_quantity_rules() {
        assert_eq!(decode_block_id(&json!("0x5")).unwrap(), BlockId::Number(5));
        assert!(decode_block_id(&json!("0x05")).is_err());
        assert!(decode_block_id(&json!("newest")).is_err());
    }

    #[test]
    fn hash32_requires_exactly_32_bytes() {
        let good = format!("0x{}", "ab".repeat(32));
        assert_eq!(
            decode_hash32(&json!(good), HashKind::Block).unwrap(),
            [0xab; 32]
        );

        let short = format!("0x{}", "ab".repeat(16));
        let err = decode_hash32(&json!(short), HashKind::Block).unwrap_err();
        assert_eq!(err.to_string(), "Block hashes must be 32 bytes long");

        let err = decode_hash32(&json!(short), HashKind::Transaction).unwrap_err();
        assert_eq!(err.to_string(), "Transaction hashes must be 32 bytes long");
    }

    #[test]
    fn bool_rejects_lookalikes() {
        assert!(decode_bool(&json!(true)).unwrap());
        assert!(!decode_bool(&json!(false)).unwrap());
        assert!(decode_bool(&json!("true")).is_err());
        assert!(decode_bool(&json!(1)).is_err());
        let err = decode_bool(&json!(0)).unwrap_err();
        assert_eq!(err.to_string(), "Parameter must be boolean");
    }
}
