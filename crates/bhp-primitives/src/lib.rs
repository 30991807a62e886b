/// BHP SDK - Cryptographic primitives, hashing, and binary codec.
///
/// This crate provides the foundational building blocks for the BHP SDK:
/// - Hash functions (SHA-256, SHA-256d, RIPEMD-160, Hash160)
/// - 256-bit chain hash type for transaction and asset identification
/// - Fixed8 fixed-point decimal type used for all on-chain amounts
/// - Binary reader/writer with VarInt and VarBytes encoding
/// - Base58 and Base58Check encoding/decoding
/// - Elliptic curve key pairs (NIST P-256) with WIF import/export

pub mod hash;
pub mod hash256;
pub mod fixed8;
pub mod io;
pub mod base58;
pub mod ec;

mod error;
pub use error::PrimitivesError;
