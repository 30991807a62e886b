/// Unified error type for all primitives operations.
///
/// Covers errors from the binary codec, hashing, EC operations, amount
/// parsing, and encoding.
#[derive(Debug, thiserror::Error)]
pub enum PrimitivesError {
    #[error("unexpected end of data")]
    UnexpectedEof,

    #[error("fixed string too long: {got} bytes, declared length {declared}")]
    FixedStringTooLong { declared: usize, got: usize },

    #[error("invalid string: {0}")]
    InvalidString(String),

    #[error("invalid Fixed8 value: {0}")]
    InvalidFixed8(String),

    #[error("invalid hash: {0}")]
    InvalidHash(String),

    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    #[error("invalid WIF format: {0}")]
    InvalidWif(String),

    #[error("checksum mismatch")]
    ChecksumMismatch,

    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("invalid base58: {0}")]
    InvalidBase58(String),
}

impl From<hex::FromHexError> for PrimitivesError {
    fn from(e: hex::FromHexError) -> Self {
        PrimitivesError::InvalidHex(e.to_string())
    }
}
