//! Transaction witnesses.
//!
//! A witness authorizes a transaction: its invocation script pushes
//! signatures (or contract arguments) onto the VM stack and its
//! verification script consumes them. Witnesses are serialized as two
//! VarBytes fields and must appear sorted by verification script hash.

use bhp_primitives::ec::{PrivateKey, PublicKey};
use bhp_primitives::io::{BhpReader, BhpWriter, Serializable};
use bhp_script::{opcodes, verification, ScriptHash};

use crate::TransactionError;

/// The invocation/verification script pair that authorizes a transaction.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Witness {
    invocation_script: Vec<u8>,
    verification_script: Vec<u8>,
}

impl Witness {
    /// Create a single-signature witness over a message.
    ///
    /// Signs the message with the private key and pairs the pushed
    /// signature with the key's verification script.
    ///
    /// # Arguments
    /// * `message` - The bytes to sign, usually the unsigned transaction.
    /// * `key` - The signing key.
    ///
    /// # Returns
    /// The witness, or an error if signing fails.
    pub fn create(message: &[u8], key: &PrivateKey) -> Result<Self, TransactionError> {
        let signature = key.sign(message).map_err(|e| {
            TransactionError::SigningError(e.to_string())
        })?;
        let public_key = key.public_key();
        Ok(Witness {
            invocation_script: verification::single_sig_invocation_script(&signature),
            verification_script: verification::single_sig_verification_script(&public_key),
        })
    }

    /// Create an m-of-n multi-signature witness.
    ///
    /// Signatures must be ordered to match the key order, and exactly
    /// `threshold` of them must be provided.
    ///
    /// # Arguments
    /// * `signatures` - The 64-byte signatures in key order.
    /// * `threshold` - The signing threshold (m).
    /// * `public_keys` - The participating public keys (n keys).
    ///
    /// # Returns
    /// The witness, or an error if the counts do not line up.
    pub fn multi_sig(
        signatures: &[[u8; 64]],
        threshold: usize,
        public_keys: &[PublicKey],
    ) -> Result<Self, TransactionError> {
        if signatures.len() != threshold {
            return Err(TransactionError::SigningError(format!(
                "multi-sig witness needs exactly {} signatures, got {}",
                threshold,
                signatures.len()
            )));
        }
        Ok(Witness {
            invocation_script: verification::multi_sig_invocation_script(signatures),
            verification_script: verification::multi_sig_verification_script(
                threshold,
                public_keys,
            )?,
        })
    }

    /// Create the witness for spending from a contract address.
    ///
    /// The invocation script pushes one placeholder (`PUSH0`) per
    /// parameter of the contract's verification function; the
    /// verification script is left empty because the chain resolves it
    /// from the contract's script hash.
    ///
    /// # Arguments
    /// * `param_count` - Number of parameters the contract's verification
    ///   function takes.
    pub fn contract_witness(param_count: usize) -> Self {
        Witness {
            invocation_script: vec![opcodes::PUSH0; param_count],
            verification_script: Vec::new(),
        }
    }

    /// Create a witness from raw invocation and verification scripts.
    ///
    /// # Arguments
    /// * `invocation_script` - The raw invocation script bytes.
    /// * `verification_script` - The raw verification script bytes.
    pub fn from_scripts(invocation_script: Vec<u8>, verification_script: Vec<u8>) -> Self {
        Witness { invocation_script, verification_script }
    }

    /// Return the invocation script bytes.
    pub fn invocation_script(&self) -> &[u8] {
        &self.invocation_script
    }

    /// Return the verification script bytes.
    pub fn verification_script(&self) -> &[u8] {
        &self.verification_script
    }

    /// Return the script hash of the verification script.
    ///
    /// For contract witnesses the verification script is empty and the
    /// hash covers zero bytes.
    pub fn script_hash(&self) -> ScriptHash {
        ScriptHash::from_script(&self.verification_script)
    }
}

impl Serializable for Witness {
    type Error = TransactionError;

    fn write_to(&self, writer: &mut BhpWriter) {
        writer.write_var_bytes(&self.invocation_script);
        writer.write_var_bytes(&self.verification_script);
    }

    fn read_from(reader: &mut BhpReader<'_>) -> Result<Self, Self::Error> {
        let invocation_script = reader.read_var_bytes()?;
        let verification_script = reader.read_var_bytes()?;
        Ok(Witness { invocation_script, verification_script })
    }
}
