//! Accounts.
//!
//! An account pairs an address with optional key material and a balance
//! snapshot. Single-sig accounts carry a key pair, multi-sig accounts a
//! verification script over several keys, and watch-only accounts just
//! an address or script hash.

use std::collections::BTreeMap;

use bhp_primitives::ec::{PrivateKey, PublicKey};
use bhp_primitives::fixed8::Fixed8;
use bhp_primitives::hash256::Hash256;
use bhp_script::{verification, ScriptHash};

use crate::brc2::{self, ScryptParams};
use crate::strategy::InputStrategy;
use crate::utxo::{AssetBalance, Utxo};
use crate::WalletError;

/// An account on the chain, with optional signing capability and an
/// optional per-asset balance snapshot.
#[derive(Clone, Debug)]
pub struct Account {
    address: String,
    script_hash: ScriptHash,
    public_key: Option<PublicKey>,
    private_key: Option<PrivateKey>,
    encrypted_private_key: Option<String>,
    verification_script: Option<Vec<u8>>,
    balances: Option<BTreeMap<Hash256, AssetBalance>>,
}

impl Account {
    /// Create a single-sig account from a private key, consuming it.
    ///
    /// # Arguments
    /// * `key` - The account's private key.
    pub fn from_private_key(key: PrivateKey) -> Self {
        let public_key = key.public_key();
        let script = verification::single_sig_verification_script(&public_key);
        let script_hash = ScriptHash::from_script(&script);
        Account {
            address: script_hash.to_address(),
            script_hash,
            public_key: Some(public_key),
            private_key: Some(key),
            encrypted_private_key: None,
            verification_script: Some(script),
            balances: None,
        }
    }

    /// Create a single-sig account from a WIF-encoded private key.
    ///
    /// # Arguments
    /// * `wif` - The WIF string.
    ///
    /// # Returns
    /// The account, or an error for malformed WIF input.
    pub fn from_wif(wif: &str) -> Result<Self, WalletError> {
        Ok(Self::from_private_key(PrivateKey::from_wif(wif)?))
    }

    /// Create a multi-sig account from public keys and a threshold.
    ///
    /// The key order matters: it fixes the verification script, the
    /// address, and the order signatures must be supplied in.
    ///
    /// # Arguments
    /// * `public_keys` - The participating public keys.
    /// * `threshold` - The number of signatures required.
    ///
    /// # Returns
    /// The account, or an error for an out-of-range threshold.
    pub fn from_multisig_keys(
        public_keys: &[PublicKey],
        threshold: usize,
    ) -> Result<Self, WalletError> {
        let script = verification::multi_sig_verification_script(threshold, public_keys)?;
        let script_hash = ScriptHash::from_script(&script);
        Ok(Account {
            address: script_hash.to_address(),
            script_hash,
            public_key: None,
            private_key: None,
            encrypted_private_key: None,
            verification_script: Some(script),
            balances: None,
        })
    }

    /// Create a watch-only account from an address.
    ///
    /// # Arguments
    /// * `address` - A Base58Check address.
    ///
    /// # Returns
    /// The account, or an error for malformed addresses.
    pub fn from_address(address: &str) -> Result<Self, WalletError> {
        let script_hash = ScriptHash::from_address(address)?;
        Ok(Account {
            address: address.to_string(),
            script_hash,
            public_key: None,
            private_key: None,
            encrypted_private_key: None,
            verification_script: None,
            balances: None,
        })
    }

    /// Create a watch-only account from a script hash.
    ///
    /// # Arguments
    /// * `script_hash` - The account's script hash.
    pub fn from_script_hash(script_hash: ScriptHash) -> Self {
        Account {
            address: script_hash.to_address(),
            script_hash,
            public_key: None,
            private_key: None,
            encrypted_private_key: None,
            verification_script: None,
            balances: None,
        }
    }

    /// Return the Base58Check address.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Return the script hash.
    pub fn script_hash(&self) -> ScriptHash {
        self.script_hash
    }

    /// Return the public key, if the account carries one.
    pub fn public_key(&self) -> Option<&PublicKey> {
        self.public_key.as_ref()
    }

    /// Return the verification script, if known.
    pub fn verification_script(&self) -> Option<&[u8]> {
        self.verification_script.as_deref()
    }

    /// Return the BRC-2 encrypted private key, if present.
    pub fn encrypted_private_key(&self) -> Option<&str> {
        self.encrypted_private_key.as_deref()
    }

    /// Check whether this is a multi-sig account.
    pub fn is_multisig(&self) -> bool {
        self.verification_script
            .as_deref()
            .map(verification::is_multi_sig_script)
            .unwrap_or(false)
    }

    /// Return the decrypted private key.
    ///
    /// # Returns
    /// The key, or an invalid-state error for watch-only accounts and
    /// accounts whose key is still encrypted.
    pub fn private_key(&self) -> Result<&PrivateKey, WalletError> {
        self.private_key.as_ref().ok_or_else(|| {
            if self.encrypted_private_key.is_some() {
                WalletError::InvalidState(
                    "the account's private key is encrypted, decrypt it first".to_string(),
                )
            } else {
                WalletError::InvalidState(
                    "the account does not hold a private key".to_string(),
                )
            }
        })
    }

    /// Replace the balance snapshot with a new UTXO pool, grouped per
    /// asset.
    ///
    /// Within each asset, UTXOs keep the order they were supplied in;
    /// input selection depends on that order.
    ///
    /// # Arguments
    /// * `utxos` - The account's unspent outputs.
    pub fn update_asset_balances(&mut self, utxos: Vec<Utxo>) {
        let mut grouped: BTreeMap<Hash256, Vec<Utxo>> = BTreeMap::new();
        for utxo in utxos {
            grouped.entry(utxo.asset_id).or_default().push(utxo);
        }
        self.balances = Some(
            grouped
                .into_iter()
                .map(|(asset, utxos)| (asset, AssetBalance::from_utxos(utxos)))
                .collect(),
        );
    }

    /// Return the balance for an asset, if a snapshot exists and holds it.
    pub fn asset_balance(&self, asset_id: &Hash256) -> Option<&AssetBalance> {
        self.balances.as_ref().and_then(|b| b.get(asset_id))
    }

    /// Select UTXOs from the balance snapshot that cover a required
    /// amount.
    ///
    /// # Arguments
    /// * `asset_id` - The asset needed.
    /// * `amount` - The amount needed.
    /// * `strategy` - The selection strategy.
    ///
    /// # Returns
    /// The selected UTXOs. Fails invalid-state when no balance snapshot
    /// exists, and insufficient-funds when the asset is absent or its
    /// pool sum is short.
    pub fn utxos_for_asset_amount(
        &self,
        asset_id: &Hash256,
        amount: Fixed8,
        strategy: &dyn InputStrategy,
    ) -> Result<Vec<Utxo>, WalletError> {
        let balances = self.balances.as_ref().ok_or_else(|| {
            WalletError::InvalidState(
                "the account has no balance snapshot, update balances first".to_string(),
            )
        })?;
        let balance = balances.get(asset_id).ok_or(WalletError::InsufficientFunds {
            asset: *asset_id,
            required: amount,
            available: Fixed8::ZERO,
        })?;
        if balance.amount() < amount {
            return Err(WalletError::InsufficientFunds {
                asset: *asset_id,
                required: amount,
                available: balance.amount(),
            });
        }
        strategy.calculate_inputs(balance.utxos(), amount)
    }

    /// Encrypt the account's private key under a passphrase.
    ///
    /// The decrypted key is consumed; only the encrypted string remains
    /// reachable until `decrypt_private_key` restores it. Does nothing
    /// if the key is already encrypted.
    ///
    /// # Arguments
    /// * `password` - The passphrase.
    /// * `params` - The scrypt cost parameters.
    ///
    /// # Returns
    /// An invalid-state error when the account holds no private key.
    pub fn encrypt_private_key(
        &mut self,
        password: &str,
        params: &ScryptParams,
    ) -> Result<(), WalletError> {
        if self.encrypted_private_key.is_some() {
            return Ok(());
        }
        let key = self.private_key.take().ok_or_else(|| {
            WalletError::InvalidState("the account does not hold a private key".to_string())
        })?;
        self.encrypted_private_key = Some(brc2::encrypt(password, &key, params)?);
        Ok(())
    }

    /// Decrypt the account's private key, restoring signing capability.
    ///
    /// Does nothing if a decrypted key is already present.
    ///
    /// # Arguments
    /// * `password` - The passphrase.
    /// * `params` - The scrypt cost parameters used at encryption time.
    ///
    /// # Returns
    /// An invalid-state error when no encrypted key is present, or the
    /// BRC-2 errors from decryption.
    pub fn decrypt_private_key(
        &mut self,
        password: &str,
        params: &ScryptParams,
    ) -> Result<(), WalletError> {
        if self.private_key.is_some() {
            return Ok(());
        }
        let encrypted = self.encrypted_private_key.as_deref().ok_or_else(|| {
            WalletError::InvalidState(
                "the account does not hold an encrypted private key".to_string(),
            )
        })?;
        let key = brc2::decrypt(password, encrypted, params)?;
        let public_key = key.public_key();
        if self.verification_script.is_none() {
            self.verification_script =
                Some(verification::single_sig_verification_script(&public_key));
        }
        self.public_key = Some(public_key);
        self.private_key = Some(key);
        Ok(())
    }
}
