//! Script hash and address conversion.
//!
//! A script hash is the 20-byte RIPEMD-160(SHA-256(script)) digest of a
//! verification script, stored in wire order and displayed as
//! byte-reversed hex. The address form is Base58Check(0x17 || hash).

use std::fmt;
use std::str::FromStr;

use bhp_primitives::base58;
use bhp_primitives::hash::hash160;
use bhp_primitives::io::{BhpReader, BhpWriter, Serializable};

use crate::ScriptError;

/// Size of a script hash in bytes.
pub const SCRIPT_HASH_SIZE: usize = 20;

/// Address version byte. With Base58Check this yields addresses that
/// start with 'A'.
pub const ADDRESS_VERSION: u8 = 0x17;

/// A 20-byte script hash identifying an account or contract.
///
/// Bytes are stored in wire order; the hex string form is byte-reversed,
/// matching the convention used by explorers and RPC interfaces.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct ScriptHash([u8; SCRIPT_HASH_SIZE]);

impl ScriptHash {
    /// Create a ScriptHash from a raw 20-byte array in wire order.
    pub const fn new(bytes: [u8; SCRIPT_HASH_SIZE]) -> Self {
        ScriptHash(bytes)
    }

    /// Create a ScriptHash from a byte slice in wire order.
    ///
    /// # Arguments
    /// * `bytes` - A slice that must be exactly 20 bytes.
    ///
    /// # Returns
    /// `Ok(ScriptHash)` if the slice is 20 bytes, or an error otherwise.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ScriptError> {
        if bytes.len() != SCRIPT_HASH_SIZE {
            return Err(ScriptError::InvalidScriptHash(
                format!("invalid length of {}, want {}", bytes.len(), SCRIPT_HASH_SIZE)
            ));
        }
        let mut arr = [0u8; SCRIPT_HASH_SIZE];
        arr.copy_from_slice(bytes);
        Ok(ScriptHash(arr))
    }

    /// Compute the script hash of a verification script.
    ///
    /// # Arguments
    /// * `script` - The script bytes.
    ///
    /// # Returns
    /// The Hash160 of the script as a `ScriptHash`.
    pub fn from_script(script: &[u8]) -> Self {
        ScriptHash(hash160(script))
    }

    /// Parse a Base58Check address into its script hash.
    ///
    /// Validates the checksum, the decoded length, and the 0x17 version
    /// byte.
    ///
    /// # Arguments
    /// * `address` - The Base58Check address string.
    ///
    /// # Returns
    /// The embedded script hash, or an error for malformed addresses.
    pub fn from_address(address: &str) -> Result<Self, ScriptError> {
        let payload = base58::check_decode(address)
            .map_err(|e| ScriptError::InvalidAddress(format!("{}: {}", address, e)))?;
        if payload.len() != 1 + SCRIPT_HASH_SIZE {
            return Err(ScriptError::InvalidAddressLength(address.to_string()));
        }
        if payload[0] != ADDRESS_VERSION {
            return Err(ScriptError::UnsupportedAddressVersion(payload[0]));
        }
        Self::from_bytes(&payload[1..])
    }

    /// Encode the script hash as a Base58Check address.
    ///
    /// # Returns
    /// The address string (version byte 0x17 plus the wire-order hash).
    pub fn to_address(&self) -> String {
        let mut payload = Vec::with_capacity(1 + SCRIPT_HASH_SIZE);
        payload.push(ADDRESS_VERSION);
        payload.extend_from_slice(&self.0);
        base58::check_encode(&payload)
    }

    /// Create a ScriptHash from a byte-reversed (display order) hex string.
    ///
    /// An optional `0x` prefix is accepted.
    ///
    /// # Arguments
    /// * `hex_str` - A 40-character hex string in display order.
    ///
    /// # Returns
    /// `Ok(ScriptHash)` on success, or an error for invalid input.
    pub fn from_hex(hex_str: &str) -> Result<Self, ScriptError> {
        let hex_str = hex_str.strip_prefix("0x").unwrap_or(hex_str);
        let mut decoded = hex::decode(hex_str)
            .map_err(|e| ScriptError::InvalidScriptHash(e.to_string()))?;
        decoded.reverse();
        Self::from_bytes(&decoded)
    }

    /// Access the wire-order byte array as a reference.
    pub fn as_bytes(&self) -> &[u8; SCRIPT_HASH_SIZE] {
        &self.0
    }

    /// Return a copy of the wire-order bytes.
    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }
}

/// Display the script hash as byte-reversed hex.
impl fmt::Display for ScriptHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut reversed = self.0;
        reversed.reverse();
        write!(f, "{}", hex::encode(reversed))
    }
}

/// Parse a byte-reversed hex string into a ScriptHash.
///
/// Equivalent to `ScriptHash::from_hex`.
impl FromStr for ScriptHash {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScriptHash::from_hex(s)
    }
}

impl Serializable for ScriptHash {
    type Error = ScriptError;

    fn write_to(&self, writer: &mut BhpWriter) {
        writer.write_bytes(&self.0);
    }

    fn read_from(reader: &mut BhpReader<'_>) -> Result<Self, Self::Error> {
        Self::from_bytes(reader.read_bytes(SCRIPT_HASH_SIZE)?)
    }
}
