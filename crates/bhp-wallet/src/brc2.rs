//! BRC-2 private key encryption.
//!
//! A private key is protected under a passphrase by deriving 64 bytes of
//! scrypt key material salted with the first four bytes of the double
//! SHA-256 of the account address, XORing the key with the first half,
//! and encrypting the result with AES-256-ECB under the second half. The
//! address hash doubles as the passphrase check on decryption; there is
//! no separate MAC.

use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockDecrypt, BlockEncrypt, KeyInit};
use aes::Aes256;
use serde::{Deserialize, Serialize};

use bhp_primitives::base58;
use bhp_primitives::ec::PrivateKey;
use bhp_primitives::hash::sha256d;
use bhp_script::{verification, ScriptHash};

use crate::WalletError;

/// Length of the Base58Check payload of an encrypted key.
pub const BRC2_PAYLOAD_LENGTH: usize = 39;

/// First prefix byte of the payload.
pub const BRC2_PREFIX_1: u8 = 0x01;

/// Second prefix byte of the payload.
pub const BRC2_PREFIX_2: u8 = 0x42;

/// Flag byte of the payload, always the same.
pub const BRC2_FLAG: u8 = 0xe0;

const DERIVED_KEY_LENGTH: usize = 64;

/// Scrypt cost parameters for BRC-2 key derivation.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct ScryptParams {
    /// CPU/memory cost, must be a power of two.
    pub n: u32,
    /// Block size.
    pub r: u32,
    /// Parallelization.
    pub p: u32,
}

impl ScryptParams {
    /// Create scrypt parameters.
    ///
    /// # Arguments
    /// * `n` - CPU/memory cost, a power of two.
    /// * `r` - Block size.
    /// * `p` - Parallelization.
    pub fn new(n: u32, r: u32, p: u32) -> Self {
        ScryptParams { n, r, p }
    }

    fn to_params(self) -> Result<scrypt::Params, WalletError> {
        if self.n < 2 || !self.n.is_power_of_two() {
            return Err(WalletError::InvalidScryptParams(format!(
                "n must be a power of two greater than one, got {}",
                self.n
            )));
        }
        let log_n = self.n.trailing_zeros() as u8;
        scrypt::Params::new(log_n, self.r, self.p, DERIVED_KEY_LENGTH)
            .map_err(|e| WalletError::InvalidScryptParams(e.to_string()))
    }
}

/// Standard parameters: n = 16384, r = 8, p = 8.
impl Default for ScryptParams {
    fn default() -> Self {
        ScryptParams { n: 16384, r: 8, p: 8 }
    }
}

/// Encrypt a private key under a passphrase.
///
/// # Arguments
/// * `password` - The passphrase.
/// * `key` - The private key to protect.
/// * `params` - The scrypt cost parameters.
///
/// # Returns
/// The Base58Check-encoded encrypted key, or an error for out-of-range
/// scrypt parameters.
pub fn encrypt(
    password: &str,
    key: &PrivateKey,
    params: &ScryptParams,
) -> Result<String, WalletError> {
    let address_hash = address_hash_of(key);
    let derived = derive_key(password, &address_hash, params)?;
    let (half1, half2) = derived.split_at(32);

    let key_bytes = key.to_bytes();
    let mut xored = [0u8; 32];
    for i in 0..32 {
        xored[i] = key_bytes[i] ^ half1[i];
    }

    let cipher = Aes256::new(GenericArray::from_slice(half2));
    let mut encrypted = xored;
    for chunk in encrypted.chunks_exact_mut(16) {
        cipher.encrypt_block(GenericArray::from_mut_slice(chunk));
    }

    let mut payload = Vec::with_capacity(BRC2_PAYLOAD_LENGTH);
    payload.extend_from_slice(&[BRC2_PREFIX_1, BRC2_PREFIX_2, BRC2_FLAG]);
    payload.extend_from_slice(&address_hash);
    payload.extend_from_slice(&encrypted);
    Ok(base58::check_encode(&payload))
}

/// Decrypt a BRC-2 encrypted private key.
///
/// # Arguments
/// * `password` - The passphrase.
/// * `encrypted_key` - The Base58Check-encoded encrypted key.
/// * `params` - The scrypt cost parameters used at encryption time.
///
/// # Returns
/// The private key, an invalid-format error for malformed input, or an
/// invalid-passphrase error when the recomputed address hash does not
/// match.
pub fn decrypt(
    password: &str,
    encrypted_key: &str,
    params: &ScryptParams,
) -> Result<PrivateKey, WalletError> {
    let data = base58::check_decode(encrypted_key)
        .map_err(|e| WalletError::InvalidKeyFormat(e.to_string()))?;
    if data.len() != BRC2_PAYLOAD_LENGTH
        || data[0] != BRC2_PREFIX_1
        || data[1] != BRC2_PREFIX_2
        || data[2] != BRC2_FLAG
    {
        return Err(WalletError::InvalidKeyFormat(
            "not a valid BRC-2 prefix".to_string(),
        ));
    }

    let address_hash: [u8; 4] = [data[3], data[4], data[5], data[6]];
    let derived = derive_key(password, &address_hash, params)?;
    let (half1, half2) = derived.split_at(32);

    let cipher = Aes256::new(GenericArray::from_slice(half2));
    let mut decrypted = [0u8; 32];
    decrypted.copy_from_slice(&data[7..39]);
    for chunk in decrypted.chunks_exact_mut(16) {
        cipher.decrypt_block(GenericArray::from_mut_slice(chunk));
    }

    let mut key_bytes = [0u8; 32];
    for i in 0..32 {
        key_bytes[i] = decrypted[i] ^ half1[i];
    }

    let key = PrivateKey::from_bytes(&key_bytes).map_err(|_| WalletError::InvalidPassphrase)?;
    if address_hash_of(&key) != address_hash {
        return Err(WalletError::InvalidPassphrase);
    }
    Ok(key)
}

fn derive_key(
    password: &str,
    salt: &[u8; 4],
    params: &ScryptParams,
) -> Result<[u8; DERIVED_KEY_LENGTH], WalletError> {
    let mut derived = [0u8; DERIVED_KEY_LENGTH];
    scrypt::scrypt(password.as_bytes(), salt, &params.to_params()?, &mut derived)
        .map_err(|e| WalletError::InvalidScryptParams(e.to_string()))?;
    Ok(derived)
}

fn address_hash_of(key: &PrivateKey) -> [u8; 4] {
    let script = verification::single_sig_verification_script(&key.public_key());
    let address = ScriptHash::from_script(&script).to_address();
    let hashed = sha256d(address.as_bytes());
    [hashed[0], hashed[1], hashed[2], hashed[3]]
}
