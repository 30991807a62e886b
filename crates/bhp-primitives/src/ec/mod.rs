/// Elliptic curve cryptography on NIST P-256.
///
/// Provides private keys with WIF import/export and deterministic ECDSA
/// signing, and public keys with SEC1 serialization and verification.

pub mod private_key;
pub mod public_key;

pub use private_key::PrivateKey;
pub use public_key::PublicKey;
