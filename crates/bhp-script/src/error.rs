/// Error types for script operations.
///
/// Covers script building, address validation, and script hash handling.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// Generic invalid script error.
    #[error("invalid script: {0}")]
    InvalidScript(String),

    /// Invalid address string.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Invalid address length after Base58Check decoding.
    #[error("invalid address length for '{0}'")]
    InvalidAddressLength(String),

    /// Address version byte is not the expected 0x17.
    #[error("unsupported address version 0x{0:02x}")]
    UnsupportedAddressVersion(u8),

    /// Invalid script hash bytes or hex.
    #[error("invalid script hash: {0}")]
    InvalidScriptHash(String),

    /// Push data exceeds the maximum encodable size.
    #[error("data too big")]
    DataTooBig,

    /// System call API name is empty or too long for its length prefix.
    #[error("invalid api name: {0}")]
    InvalidApiName(String),

    /// Multi-sig threshold is out of range for the given key set.
    #[error("invalid signing threshold {threshold} for {keys} keys")]
    InvalidSigningThreshold {
        /// The requested threshold.
        threshold: usize,
        /// The number of public keys supplied.
        keys: usize,
    },

    /// Invalid contract parameter content.
    #[error("invalid contract parameter: {0}")]
    InvalidParameter(String),

    /// Error from primitives crate.
    #[error("primitives error: {0}")]
    Primitives(#[from] bhp_primitives::PrimitivesError),
}
