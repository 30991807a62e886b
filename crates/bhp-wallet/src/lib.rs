/// BHP SDK - Accounts, balances, UTXO selection, key protection, and
/// asset transfers.
///
/// Builds on `bhp-primitives`, `bhp-script`, and `bhp-transaction` to
/// provide account management (single-sig, multi-sig, and watch-only),
/// BRC-2 password protection of private keys, per-asset balance
/// snapshots with pluggable input selection, and a fluent builder for
/// contract (asset transfer) transactions.

pub mod assets;
pub mod utxo;
pub mod strategy;
pub mod account;
pub mod brc2;
pub mod transfer;

mod error;
pub use error::WalletError;
pub use account::Account;
pub use assets::{AssetType, GOVERNING_TOKEN_ID, UTILITY_TOKEN_ID};
pub use brc2::ScryptParams;
pub use strategy::{DefaultStrategy, InputStrategy};
pub use transfer::{AssetTransfer, AssetTransferBuilder};
pub use utxo::{AssetBalance, Utxo};
