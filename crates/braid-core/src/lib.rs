//! braid-core
//!
//! Domain types shared by the Braid gateway:
//!   Address      — 24-byte account locator (recipient + full shard id)
//!   Branch       — shard/branch identifier partitioning the ledger
//!   Transaction  — a fully-formed signed transaction ready for submission
//!   WireSerialize — the fixed-format byte codec for domain objects

pub mod constants;
pub mod error;
pub mod serialize;
pub mod transaction;
pub mod types;

pub use error::WireError;
pub use serialize::WireSerialize;
pub use transaction::Transaction;
pub use types::{Address, Branch, Quantity, TxHash};
