use jsonrpsee::types::{ErrorObject, ErrorObjectOwned};
use thiserror::Error;

use crate::master::MasterError;

/// Wire codec failures. Everything here is detected before a handler body
/// runs and reaches the client as an invalid-params error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    /// Malformed hex or quantity wire value (bad prefix, non-hex digit,
    /// leading zero).
    #[error("{0}")]
    InvalidEncoding(String),

    /// Decoded byte buffer has the wrong fixed size.
    #[error("{kind} hashes must be 32 bytes long")]
    InvalidLength { kind: &'static str },

    /// A value violated a codec contract that the type system cannot
    /// enforce (legacy odd-length pad ceiling, handler/registry mismatch).
    #[error("{0}")]
    Precondition(String),

    /// Client-facing parameter error: business validation and domain-object
    /// deserialization failures.
    #[error("{0}")]
    InvalidParams(String),
}

/// Request-level failures surfaced to the JSON-RPC layer.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("master service not connected")]
    MasterUnavailable,

    #[error(transparent)]
    Master(#[from] MasterError),
}

fn rpc_err(code: i32, msg: impl Into<String>) -> ErrorObjectOwned {
    ErrorObject::owned(code, msg.into(), None::<()>)
}

impl From<GatewayError> for ErrorObjectOwned {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Codec(e) => rpc_err(-32602, e.to_string()),
            other => rpc_err(-32603, other.to_string()),
        }
    }
}
