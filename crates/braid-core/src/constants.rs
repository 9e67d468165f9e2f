// ── Gas defaults ─────────────────────────────────────────────────────────────

/// 1 shannon (gwei-equivalent denomination).
pub const DENOM_SHANNON: u128 = 1_000_000_000;

/// Gas limit applied when a submitted transaction names none.
pub const DEFAULT_START_GAS: u128 = 500_000;

/// Gas price applied when a submitted transaction names none: 60 shannon.
pub const DEFAULT_GAS_PRICE: u128 = 60 * DENOM_SHANNON;

// ── Transaction layout ───────────────────────────────────────────────────────

/// Sign applied to the withdraw field of every gateway-built transaction.
pub const WITHDRAW_SIGN: i8 = 1;

/// Byte length of block and transaction hashes.
pub const HASH_LEN: usize = 32;
