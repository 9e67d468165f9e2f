//! braid-rpc
//!
//! JSON-RPC 2.0 gateway for Braid master services.
//!
//! Methods:
//!   echo                 — decode a data blob, return it re-encoded
//!   getTransactionCount  — branch + transaction count for an address
//!   sendTransaction      — validate raw fields, build and submit a signed tx
//!
//! Every method is a pipeline entry: named-argument decoders run before the
//! handler body, an optional encoder runs after it, and any decode failure
//! surfaces as a JSON-RPC invalid-params error without invoking the handler.

pub mod codec;
pub mod error;
pub mod master;
pub mod pipeline;
pub mod server;
pub mod tx_build;

pub use error::{CodecError, GatewayError};
pub use master::{MasterClient, MasterError};
pub use server::{GatewayState, RpcServer};
