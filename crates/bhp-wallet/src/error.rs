use bhp_primitives::fixed8::Fixed8;
use bhp_primitives::hash256::Hash256;

/// Error types for wallet operations.
#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    /// An operation was attempted on an account in the wrong state.
    #[error("invalid state: {0}")]
    InvalidState(String),
    /// The account's pool does not cover a required asset amount.
    #[error("insufficient funds: needed {required} but found {available} of asset {asset}")]
    InsufficientFunds {
        /// The asset that fell short.
        asset: Hash256,
        /// The amount the transaction requires.
        required: Fixed8,
        /// The amount the pool holds.
        available: Fixed8,
    },
    /// An encrypted key string is not in BRC-2 format.
    #[error("invalid key format: {0}")]
    InvalidKeyFormat(String),
    /// A BRC-2 decryption produced a key that does not match the address
    /// hash, meaning the passphrase is wrong.
    #[error("invalid passphrase")]
    InvalidPassphrase,
    /// The scrypt parameters are out of range.
    #[error("invalid scrypt parameters: {0}")]
    InvalidScryptParams(String),
    /// An underlying transaction error (forwarded from `bhp-transaction`).
    #[error("transaction error: {0}")]
    Transaction(#[from] bhp_transaction::TransactionError),
    /// An underlying script error (forwarded from `bhp-script`).
    #[error("script error: {0}")]
    Script(#[from] bhp_script::ScriptError),
    /// An underlying primitives error (forwarded from `bhp-primitives`).
    #[error("primitives error: {0}")]
    Primitives(#[from] bhp_primitives::PrimitivesError),
}
