//! 256-bit chain hash type for transaction and asset identification.
//!
//! Provides `Hash256` — a 32-byte array displayed as byte-reversed hex,
//! matching the chain's convention for transaction IDs and asset IDs:
//! little-endian on the wire, big-endian in string form.

use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize, Serializer, Deserializer};
use crate::hash::sha256d;
use crate::io::{BhpReader, BhpWriter, Serializable};
use crate::PrimitivesError;

/// Size of a Hash256 in bytes.
pub const HASH_SIZE: usize = 32;

/// Maximum hex string length for a Hash256 (64 hex characters).
pub const MAX_HASH_STRING_SIZE: usize = HASH_SIZE * 2;

/// A 32-byte hash used for transaction IDs and asset IDs.
///
/// The bytes are stored in wire (little-endian) order. When displayed as
/// a string, the bytes are reversed to the big-endian form used by
/// explorers and RPC interfaces.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct Hash256([u8; HASH_SIZE]);

impl Hash256 {
    /// Create a Hash256 from a raw 32-byte array.
    ///
    /// The bytes are stored as-is (wire byte order).
    ///
    /// # Arguments
    /// * `bytes` - The 32 bytes in wire (little-endian) order.
    ///
    /// # Returns
    /// A new `Hash256`.
    pub const fn new(bytes: [u8; HASH_SIZE]) -> Self {
        Hash256(bytes)
    }

    /// Create a Hash256 from a byte slice in wire order.
    ///
    /// # Arguments
    /// * `bytes` - A slice that must be exactly 32 bytes.
    ///
    /// # Returns
    /// `Ok(Hash256)` if the slice is 32 bytes, or an error otherwise.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.len() != HASH_SIZE {
            return Err(PrimitivesError::InvalidHash(
                format!("invalid hash length of {}, want {}", bytes.len(), HASH_SIZE)
            ));
        }
        let mut arr = [0u8; HASH_SIZE];
        arr.copy_from_slice(bytes);
        Ok(Hash256(arr))
    }

    /// Create a Hash256 from a byte-reversed hex string.
    ///
    /// The hex string represents bytes in display order (reversed from
    /// wire storage). An optional `0x` prefix is accepted, and short
    /// strings are zero-padded on the high end.
    ///
    /// # Arguments
    /// * `hex_str` - A hex string of up to 64 characters.
    ///
    /// # Returns
    /// `Ok(Hash256)` on success, or an error for invalid input.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        let hex_str = hex_str.strip_prefix("0x").unwrap_or(hex_str);
        if hex_str.is_empty() {
            return Ok(Hash256::default());
        }
        if hex_str.len() > MAX_HASH_STRING_SIZE {
            return Err(PrimitivesError::InvalidHash(
                format!("max hash string length is {} characters", MAX_HASH_STRING_SIZE)
            ));
        }

        // Pad to even length if needed.
        let padded = if hex_str.len() % 2 != 0 {
            format!("0{}", hex_str)
        } else {
            hex_str.to_string()
        };

        // Decode hex into a temporary buffer, right-aligned in a 32-byte array.
        let decoded = hex::decode(&padded)?;
        let mut display_order = [0u8; HASH_SIZE];
        let offset = HASH_SIZE - decoded.len();
        display_order[offset..].copy_from_slice(&decoded);

        // Reverse to get wire byte order.
        let mut dst = [0u8; HASH_SIZE];
        for i in 0..HASH_SIZE {
            dst[i] = display_order[HASH_SIZE - 1 - i];
        }

        Ok(Hash256(dst))
    }

    /// Compute the double SHA-256 of the input and return it as a Hash256.
    ///
    /// This is how transaction IDs are derived from serialized bytes.
    ///
    /// # Arguments
    /// * `data` - Byte slice to hash.
    ///
    /// # Returns
    /// A `Hash256` containing the SHA-256d digest.
    pub fn sha256d_of(data: &[u8]) -> Self {
        Hash256(sha256d(data))
    }

    /// Access the wire-order byte array as a reference.
    ///
    /// # Returns
    /// A reference to the 32-byte wire-order array.
    pub fn as_bytes(&self) -> &[u8; HASH_SIZE] {
        &self.0
    }

    /// Return a copy of the wire-order bytes.
    ///
    /// # Returns
    /// A `Vec<u8>` containing the 32 hash bytes in wire order.
    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }
}

/// Display the hash as byte-reversed hex (explorer convention).
///
/// Wire bytes `[0x06, 0xe5, ...]` display as `"...e506"`.
impl fmt::Display for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut reversed = self.0;
        reversed.reverse();
        write!(f, "{}", hex::encode(reversed))
    }
}

/// Parse a byte-reversed hex string into a Hash256.
///
/// Equivalent to `Hash256::from_hex`.
impl FromStr for Hash256 {
    type Err = PrimitivesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Hash256::from_hex(s)
    }
}

impl Serializable for Hash256 {
    type Error = PrimitivesError;

    fn write_to(&self, writer: &mut BhpWriter) {
        writer.write_bytes(&self.0);
    }

    fn read_from(reader: &mut BhpReader<'_>) -> Result<Self, Self::Error> {
        Hash256::from_bytes(reader.read_bytes(HASH_SIZE)?)
    }
}

/// Serialize as a display-order hex string in JSON.
impl Serialize for Hash256 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

/// Deserialize from a display-order hex string in JSON.
impl<'de> Deserialize<'de> for Hash256 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Hash256::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
