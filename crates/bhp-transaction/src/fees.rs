//! Network fee rules.
//!
//! Transactions up to 100 KiB relay for free. Larger transactions pay a
//! per-byte fee on the excess plus a flat priority fee, denominated in
//! the utility token.

use bhp_primitives::fixed8::Fixed8;

/// Largest serialized size that relays without a network fee, in bytes.
pub const MAX_FREE_TRANSACTION_SIZE: usize = 102_400;

/// Fee per byte beyond the free size, in Fixed8 raw units.
pub const FEE_PER_EXTRA_BYTE: i64 = 1_000;

/// Flat priority fee for oversized transactions, in Fixed8 raw units.
pub const PRIORITY_FEE: i64 = 100_000;

/// Return the minimum network fee for a transaction of the given size.
///
/// # Arguments
/// * `size` - The full serialized transaction size in bytes.
///
/// # Returns
/// `Fixed8::ZERO` for transactions within the free size, otherwise the
/// per-byte fee on the excess plus the priority fee.
pub fn necessary_network_fee(size: usize) -> Fixed8 {
    if size <= MAX_FREE_TRANSACTION_SIZE {
        return Fixed8::ZERO;
    }
    let extra = (size - MAX_FREE_TRANSACTION_SIZE) as i64;
    Fixed8::from_raw(extra * FEE_PER_EXTRA_BYTE + PRIORITY_FEE)
}
