//! Verification and invocation script construction.
//!
//! A witness pairs an invocation script (the pushed signatures) with a
//! verification script (the spending condition). Single-sig accounts use
//! `PUSH33 <pubkey> CHECKSIG`; multi-sig accounts use
//! `PUSH(m) <keys...> PUSH(n) CHECKMULTISIG`.

use bhp_primitives::ec::PublicKey;

use crate::builder::ScriptBuilder;
use crate::opcodes;
use crate::ScriptError;

/// Maximum number of public keys in a multi-sig verification script.
pub const MAX_MULTISIG_KEYS: usize = 1024;

/// Build a single-signature verification script for a public key.
///
/// # Arguments
/// * `public_key` - The account's public key.
///
/// # Returns
/// The script bytes: `PUSH33 <compressed key> CHECKSIG`.
pub fn single_sig_verification_script(public_key: &PublicKey) -> Vec<u8> {
    let mut script = Vec::with_capacity(35);
    script.push(33);
    script.extend_from_slice(&public_key.to_compressed());
    script.push(opcodes::CHECKSIG);
    script
}

/// Build an m-of-n multi-signature verification script.
///
/// Keys are emitted in the order given; signatures in the matching
/// invocation script must follow the same order.
///
/// # Arguments
/// * `threshold` - The number of signatures required (m).
/// * `public_keys` - The participating public keys (n keys).
///
/// # Returns
/// The script bytes, or an error if the threshold is out of range.
pub fn multi_sig_verification_script(
    threshold: usize,
    public_keys: &[PublicKey],
) -> Result<Vec<u8>, ScriptError> {
    if threshold < 1 || threshold > public_keys.len() || public_keys.len() > MAX_MULTISIG_KEYS {
        return Err(ScriptError::InvalidSigningThreshold {
            threshold,
            keys: public_keys.len(),
        });
    }
    let mut builder = ScriptBuilder::new();
    builder.push_integer(threshold as i64);
    for key in public_keys {
        builder.push_data(&key.to_compressed())?;
    }
    builder.push_integer(public_keys.len() as i64);
    builder.op_code(opcodes::CHECKMULTISIG);
    Ok(builder.into_bytes())
}

/// Build a single-signature invocation script.
///
/// # Arguments
/// * `signature` - The 64-byte `r || s` signature.
///
/// # Returns
/// The script bytes: `PUSH64 <signature>`.
pub fn single_sig_invocation_script(signature: &[u8; 64]) -> Vec<u8> {
    let mut script = Vec::with_capacity(65);
    script.push(64);
    script.extend_from_slice(signature);
    script
}

/// Build a multi-signature invocation script.
///
/// Signatures must be ordered to match the key order of the verification
/// script.
///
/// # Arguments
/// * `signatures` - The 64-byte signatures in key order.
///
/// # Returns
/// The script bytes: one `PUSH64` per signature.
pub fn multi_sig_invocation_script(signatures: &[[u8; 64]]) -> Vec<u8> {
    let mut script = Vec::with_capacity(signatures.len() * 65);
    for signature in signatures {
        script.push(64);
        script.extend_from_slice(signature);
    }
    script
}

/// Check whether a verification script is a multi-sig script.
///
/// # Arguments
/// * `script` - The verification script bytes.
///
/// # Returns
/// `true` if the script ends in CHECKMULTISIG.
pub fn is_multi_sig_script(script: &[u8]) -> bool {
    script.last() == Some(&opcodes::CHECKMULTISIG)
}
