//! NIST P-256 private key with chain-specific functionality.
//!
//! Wraps a p256 signing key and adds WIF encoding and deterministic
//! (RFC 6979) ECDSA signing with canonical low-S output.

use p256::ecdsa::signature::Signer;
use p256::ecdsa::{Signature, SigningKey};
use rand::rngs::OsRng;
use zeroize::Zeroizing;

use crate::base58;
use crate::ec::public_key::PublicKey;
use crate::PrimitivesError;

/// Length of a serialized private key in bytes.
const PRIVATE_KEY_BYTES_LEN: usize = 32;

/// WIF version byte.
const WIF_VERSION: u8 = 0x80;

/// Compression flag byte; always present, the chain only uses compressed
/// public keys.
const COMPRESS_MAGIC: u8 = 0x01;

/// A P-256 private key for transaction signing.
///
/// Wraps a p256 `SigningKey` and provides WIF serialization and
/// deterministic ECDSA signing over SHA-256 message digests. The wrapped
/// key zeroizes its scalar on drop; scratch buffers holding the scalar
/// during WIF conversion are wiped as well.
#[derive(Clone, Debug)]
pub struct PrivateKey {
    /// The underlying p256 signing key.
    inner: SigningKey,
}

impl PrivateKey {
    /// Generate a new random private key using the OS random number generator.
    ///
    /// # Returns
    /// A new randomly generated `PrivateKey`.
    pub fn new() -> Self {
        let signing_key = SigningKey::random(&mut OsRng);
        PrivateKey {
            inner: signing_key,
        }
    }

    /// Create a private key from a raw 32-byte scalar.
    ///
    /// # Arguments
    /// * `bytes` - A 32-byte slice representing the private key scalar.
    ///
    /// # Returns
    /// `Ok(PrivateKey)` if the bytes represent a valid scalar on P-256,
    /// or an error if the scalar is zero or out of range.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.len() != PRIVATE_KEY_BYTES_LEN {
            return Err(PrimitivesError::InvalidPrivateKey(format!(
                "expected {} bytes, got {}",
                PRIVATE_KEY_BYTES_LEN,
                bytes.len()
            )));
        }
        let signing_key = SigningKey::from_slice(bytes).map_err(|e| {
            PrimitivesError::InvalidPrivateKey(e.to_string())
        })?;
        Ok(PrivateKey {
            inner: signing_key,
        })
    }

    /// Create a private key from a hexadecimal string.
    ///
    /// # Arguments
    /// * `hex_str` - A 64-character hex string representing the 32-byte scalar.
    ///
    /// # Returns
    /// `Ok(PrivateKey)` on success, or an error if the hex or scalar is invalid.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        if hex_str.is_empty() {
            return Err(PrimitivesError::InvalidPrivateKey(
                "private key hex is empty".to_string(),
            ));
        }
        let bytes =
            hex::decode(hex_str).map_err(|e| PrimitivesError::InvalidHex(e.to_string()))?;
        Self::from_bytes(&bytes)
    }

    /// Create a private key from a WIF (Wallet Import Format) string.
    ///
    /// Decodes the Base58Check-encoded string, validates the checksum,
    /// and requires the strict chain form: version byte 0x80, a 32-byte
    /// scalar, and the 0x01 compression flag.
    ///
    /// # Arguments
    /// * `wif` - A Base58Check-encoded WIF string.
    ///
    /// # Returns
    /// `Ok(PrivateKey)` on success, or an error if the WIF is malformed
    /// or the checksum fails.
    pub fn from_wif(wif: &str) -> Result<Self, PrimitivesError> {
        // The decoded payload holds the scalar; wipe it when done.
        let payload = Zeroizing::new(
            base58::check_decode(wif).map_err(|e| match e {
                PrimitivesError::ChecksumMismatch => e,
                other => PrimitivesError::InvalidWif(other.to_string()),
            })?,
        );
        if payload.len() != 1 + PRIVATE_KEY_BYTES_LEN + 1 {
            return Err(PrimitivesError::InvalidWif(format!(
                "invalid decoded length {}",
                payload.len()
            )));
        }
        if payload[0] != WIF_VERSION {
            return Err(PrimitivesError::InvalidWif(format!(
                "invalid version byte 0x{:02x}",
                payload[0]
            )));
        }
        if payload[33] != COMPRESS_MAGIC {
            return Err(PrimitivesError::InvalidWif(
                "missing compression flag".to_string(),
            ));
        }
        Self::from_bytes(&payload[1..1 + PRIVATE_KEY_BYTES_LEN])
    }

    /// Encode the private key as a WIF string.
    ///
    /// # Returns
    /// A Base58Check-encoded WIF string with version 0x80 and the
    /// compression flag set.
    pub fn to_wif(&self) -> String {
        let key_bytes = Zeroizing::new(self.to_bytes());
        let mut payload = Zeroizing::new(Vec::with_capacity(1 + PRIVATE_KEY_BYTES_LEN + 1));
        payload.push(WIF_VERSION);
        payload.extend_from_slice(&key_bytes[..]);
        payload.push(COMPRESS_MAGIC);
        base58::check_encode(&payload)
    }

    /// Serialize the private key as a 32-byte big-endian array.
    ///
    /// # Returns
    /// A 32-byte array containing the private key scalar.
    pub fn to_bytes(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        out.copy_from_slice(&self.inner.to_bytes());
        out
    }

    /// Serialize the private key as a lowercase hexadecimal string.
    ///
    /// # Returns
    /// A 64-character hex string representing the 32-byte scalar.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Derive the corresponding public key for this private key.
    ///
    /// # Returns
    /// The `PublicKey` corresponding to this private key.
    pub fn public_key(&self) -> PublicKey {
        PublicKey::from_verifying_key(self.inner.verifying_key())
    }

    /// Sign a message using deterministic RFC 6979 nonces.
    ///
    /// The message is hashed with SHA-256 before signing. The signature
    /// is canonicalized to its low-S form, so signing the same message
    /// with the same key always yields identical bytes.
    ///
    /// # Arguments
    /// * `message` - The message bytes to sign.
    ///
    /// # Returns
    /// The 64-byte `r || s` signature, or an error if signing fails.
    pub fn sign(&self, message: &[u8]) -> Result<[u8; 64], PrimitivesError> {
        let signature: Signature = self
            .inner
            .try_sign(message)
            .map_err(|e| PrimitivesError::InvalidSignature(e.to_string()))?;
        let signature = signature.normalize_s().unwrap_or(signature);
        let mut out = [0u8; 64];
        out.copy_from_slice(&signature.to_bytes());
        Ok(out)
    }
}

impl Default for PrivateKey {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes() == other.to_bytes()
    }
}

impl Eq for PrivateKey {}
