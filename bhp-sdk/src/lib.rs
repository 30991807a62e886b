#![deny(missing_docs)]

//! BHP Blockchain SDK - Complete SDK.
//!
//! Re-exports all BHP SDK components for convenient single-crate usage.

pub use bhp_primitives as primitives;
pub use bhp_script as script;
pub use bhp_transaction as transaction;
pub use bhp_wallet as wallet;
pub use bhp_contract as contract;
