/// Error types for transaction operations.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// The transaction structure is invalid.
    #[error("invalid transaction: {0}")]
    InvalidTransaction(String),
    /// A builder was finalized without a required field.
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    /// An error occurred during signing.
    #[error("signing error: {0}")]
    SigningError(String),
    /// An error occurred during binary serialization or deserialization.
    #[error("serialization error: {0}")]
    SerializationError(String),
    /// The leading type byte does not name a known transaction kind.
    #[error("unknown transaction type 0x{0:02x}")]
    UnknownTransactionType(u8),
    /// The attribute usage byte is not recognized.
    #[error("unknown attribute usage 0x{0:02x}")]
    UnknownAttributeUsage(u8),
    /// The attribute data does not fit its usage's wire rules.
    #[error("invalid attribute data: {0}")]
    InvalidAttributeData(String),
    /// An underlying script error (forwarded from `bhp-script`).
    #[error("script error: {0}")]
    Script(#[from] bhp_script::ScriptError),
    /// An underlying primitives error (forwarded from `bhp-primitives`).
    #[error("primitives error: {0}")]
    Primitives(#[from] bhp_primitives::PrimitivesError),
}
