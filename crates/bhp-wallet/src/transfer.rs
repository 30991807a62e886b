//! Asset transfer builder.
//!
//! Assembles contract transactions that move UTXO assets. Required
//! amounts aggregate the requested outputs plus the network fee (in the
//! utility token); inputs are selected per asset, change is routed back
//! to the spender, and the fee is left implicit as the difference
//! between inputs and outputs.

use std::collections::BTreeMap;

use bhp_primitives::fixed8::Fixed8;
use bhp_primitives::hash256::Hash256;
use bhp_script::ScriptHash;
use bhp_transaction::{
    ContractTransactionBuilder, RawTransaction, TransactionAttribute, TransactionInput,
    TransactionOutput, Witness,
};

use crate::account::Account;
use crate::assets::UTILITY_TOKEN_ID;
use crate::strategy::{DefaultStrategy, InputStrategy};
use crate::utxo::{sum_values, Utxo};
use crate::WalletError;

struct ContractSpend {
    script_hash: ScriptHash,
    verify_param_count: usize,
    utxos: Vec<Utxo>,
}

/// Fluent builder for asset transfer transactions.
pub struct AssetTransferBuilder<'a> {
    account: Option<&'a Account>,
    outputs: Vec<TransactionOutput>,
    asset: Option<Hash256>,
    amount: Option<Fixed8>,
    to_address: Option<String>,
    attributes: Vec<TransactionAttribute>,
    utxos: Vec<Utxo>,
    network_fee: Fixed8,
    strategy: &'a dyn InputStrategy,
    contract_spend: Option<ContractSpend>,
}

impl<'a> AssetTransferBuilder<'a> {
    /// Create an empty builder.
    pub fn new() -> Self {
        AssetTransferBuilder {
            account: None,
            outputs: Vec::new(),
            asset: None,
            amount: None,
            to_address: None,
            attributes: Vec::new(),
            utxos: Vec::new(),
            network_fee: Fixed8::ZERO,
            strategy: &DefaultStrategy,
            contract_spend: None,
        }
    }

    /// Set the account that funds and signs the transfer. Required.
    pub fn account(mut self, account: &'a Account) -> Self {
        self.account = Some(account);
        self
    }

    /// Add an output. Mutually exclusive with the single-output triple.
    pub fn output(mut self, output: TransactionOutput) -> Self {
        self.outputs.push(output);
        self
    }

    /// Add several outputs.
    pub fn outputs(mut self, outputs: impl IntoIterator<Item = TransactionOutput>) -> Self {
        self.outputs.extend(outputs);
        self
    }

    /// Set the asset of the single-output triple.
    pub fn asset(mut self, asset_id: Hash256) -> Self {
        self.asset = Some(asset_id);
        self
    }

    /// Set the amount of the single-output triple.
    pub fn amount(mut self, amount: Fixed8) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Set the receiving address of the single-output triple.
    pub fn to_address(mut self, address: &str) -> Self {
        self.to_address = Some(address.to_string());
        self
    }

    /// Add a transaction attribute.
    pub fn attribute(mut self, attribute: TransactionAttribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Add a UTXO to a manually supplied pool, bypassing the account's
    /// balance snapshot.
    pub fn utxo(mut self, utxo: Utxo) -> Self {
        self.utxos.push(utxo);
        self
    }

    /// Set the network fee, denominated in the utility token.
    pub fn network_fee(mut self, fee: Fixed8) -> Self {
        self.network_fee = fee;
        self
    }

    /// Replace the input selection strategy.
    pub fn strategy(mut self, strategy: &'a dyn InputStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Spend from a contract address instead of the account.
    ///
    /// Inputs are drawn from the contract's UTXO pool and change goes
    /// back to the contract. A `Script` attribute naming the signing
    /// account is added, and signing attaches the contract's placeholder
    /// witness ahead of the account witness.
    ///
    /// # Arguments
    /// * `script_hash` - The contract's script hash.
    /// * `verify_param_count` - Number of parameters of the contract's
    ///   verification function.
    /// * `utxos` - The contract's unspent outputs.
    pub fn from_contract(
        mut self,
        script_hash: ScriptHash,
        verify_param_count: usize,
        utxos: Vec<Utxo>,
    ) -> Self {
        self.contract_spend = Some(ContractSpend {
            script_hash,
            verify_param_count,
            utxos,
        });
        self
    }

    /// Validate the builder and assemble the unsigned transaction.
    ///
    /// # Returns
    /// The transfer, or a typed invalid-state or insufficient-funds
    /// error.
    pub fn build(self) -> Result<AssetTransfer<'a>, WalletError> {
        let account = self
            .account
            .ok_or_else(|| WalletError::InvalidState("no account set".to_string()))?;
        let outputs = self.resolve_outputs()?;

        let mut required: BTreeMap<Hash256, Fixed8> = BTreeMap::new();
        for output in &outputs {
            let entry = required.entry(output.asset_id).or_insert(Fixed8::ZERO);
            *entry = entry.checked_add(output.value).ok_or_else(|| {
                WalletError::InvalidState("output amounts overflow".to_string())
            })?;
        }
        if self.network_fee > Fixed8::ZERO {
            let entry = required.entry(UTILITY_TOKEN_ID).or_insert(Fixed8::ZERO);
            *entry = entry.checked_add(self.network_fee).ok_or_else(|| {
                WalletError::InvalidState("fee amount overflows".to_string())
            })?;
        }

        let (pool, change_to) = match &self.contract_spend {
            Some(spend) => (Some(&spend.utxos), spend.script_hash),
            None if !self.utxos.is_empty() => (Some(&self.utxos), account.script_hash()),
            None => (None, account.script_hash()),
        };

        let mut inputs: Vec<TransactionInput> = Vec::new();
        let mut change_outputs: Vec<TransactionOutput> = Vec::new();
        for (asset_id, amount) in &required {
            let selected = match pool {
                Some(pool) => select_from_pool(pool, asset_id, *amount, self.strategy)?,
                None => account.utxos_for_asset_amount(asset_id, *amount, self.strategy)?,
            };
            inputs.extend(selected.iter().map(Utxo::to_input));
            let change = sum_values(&selected)
                .checked_sub(*amount)
                .unwrap_or(Fixed8::ZERO);
            if change > Fixed8::ZERO {
                change_outputs.push(TransactionOutput::new(*asset_id, change, change_to));
            }
        }

        let mut attributes = self.attributes;
        let verify_param_count = self.contract_spend.as_ref().map(|spend| {
            attributes.push(TransactionAttribute::script(&account.script_hash()));
            spend.verify_param_count
        });

        let mut builder = ContractTransactionBuilder::new()
            .inputs(inputs)
            .outputs(outputs)
            .outputs(change_outputs);
        for attribute in attributes {
            builder = builder.attribute(attribute);
        }
        Ok(AssetTransfer {
            account,
            transaction: builder.build()?,
            contract_verify_params: verify_param_count,
        })
    }

    fn resolve_outputs(&self) -> Result<Vec<TransactionOutput>, WalletError> {
        let triple_fields =
            [self.asset.is_some(), self.amount.is_some(), self.to_address.is_some()];
        let triple_count = triple_fields.iter().filter(|set| **set).count();
        if !self.outputs.is_empty() {
            if triple_count > 0 {
                return Err(WalletError::InvalidState(
                    "outputs and the asset/amount/address triple are mutually exclusive"
                        .to_string(),
                ));
            }
            return Ok(self.outputs.clone());
        }
        match triple_count {
            3 => {
                let output = TransactionOutput::pay_to_address(
                    self.asset.ok_or_else(|| missing("asset"))?,
                    self.amount.ok_or_else(|| missing("amount"))?,
                    self.to_address.as_deref().ok_or_else(|| missing("address"))?,
                )?;
                Ok(vec![output])
            }
            0 => Err(WalletError::InvalidState(
                "no outputs set, nothing to transfer".to_string(),
            )),
            _ => Err(WalletError::InvalidState(
                "the asset/amount/address triple must be set completely".to_string(),
            )),
        }
    }
}

impl Default for AssetTransferBuilder<'_> {
    fn default() -> Self {
        Self::new()
    }
}

fn missing(field: &str) -> WalletError {
    WalletError::InvalidState(format!("missing {} in the single-output triple", field))
}

fn select_from_pool(
    pool: &[Utxo],
    asset_id: &Hash256,
    amount: Fixed8,
    strategy: &dyn InputStrategy,
) -> Result<Vec<Utxo>, WalletError> {
    let of_asset: Vec<Utxo> = pool
        .iter()
        .filter(|u| u.asset_id == *asset_id)
        .copied()
        .collect();
    let available = sum_values(&of_asset);
    if available < amount {
        return Err(WalletError::InsufficientFunds {
            asset: *asset_id,
            required: amount,
            available,
        });
    }
    strategy.calculate_inputs(&of_asset, amount)
}

/// A built asset transfer, ready for signing.
#[derive(Debug)]
pub struct AssetTransfer<'a> {
    account: &'a Account,
    transaction: RawTransaction,
    contract_verify_params: Option<usize>,
}

impl AssetTransfer<'_> {
    /// Return the transaction in its current state.
    pub fn transaction(&self) -> &RawTransaction {
        &self.transaction
    }

    /// Consume the transfer and return the transaction.
    pub fn into_transaction(self) -> RawTransaction {
        self.transaction
    }

    /// Sign the transfer with the account's private key.
    ///
    /// For contract spends the contract's placeholder witness is
    /// attached ahead of the account witness.
    ///
    /// # Returns
    /// An invalid-state error when the account cannot sign.
    pub fn sign(&mut self) -> Result<(), WalletError> {
        let key = self.account.private_key()?;
        let witness = Witness::create(&self.transaction.to_unsigned_bytes(), key)?;
        if let Some(param_count) = self.contract_verify_params {
            self.transaction
                .add_witness(Witness::contract_witness(param_count));
        }
        self.transaction.add_witness(witness);
        Ok(())
    }

    /// Attach an externally built witness, e.g. for multi-sig accounts.
    pub fn add_witness(&mut self, witness: Witness) {
        self.transaction.add_witness(witness);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    use bhp_primitives::ec::PublicKey;
    use bhp_primitives::io::Serializable;

    use crate::assets::GOVERNING_TOKEN_ID;

    const WIF: &str = "KxDgvEKzgSBPPfuVfw67oPQBSjidEiqTHURKSDL1R7yGaGYAeYnr";
    const ADDRESS: &str = "AK2nJJpJr6o664CWJKi1QRXjqeic2zRp8y";
    const ALT_ADDRESS: &str = "AJQ6FoaSXDFzA6wLnyZ1nFN7SGSN2oNTc3";

    fn wire_hash(wire_hex: &str) -> Hash256 {
        Hash256::from_bytes(&hex::decode(wire_hex).unwrap()).unwrap()
    }

    fn bhp_utxo(wire_tx_id: &str, index: u16, value: &str) -> Utxo {
        Utxo::new(
            GOVERNING_TOKEN_ID,
            wire_hash(wire_tx_id),
            index,
            Fixed8::from_str(value).unwrap(),
        )
    }

    #[test]
    fn test_transfer_from_balance_snapshot() {
        let mut account = Account::from_wif(WIF).unwrap();
        account.update_asset_balances(vec![bhp_utxo(
            "ff8c509a090d440c0e3471709ef536f8e8d32caa2488ed8c64c6f7acf1d1a44b",
            0,
            "100000000",
        )]);

        let mut transfer = AssetTransferBuilder::new()
            .account(&account)
            .asset(GOVERNING_TOKEN_ID)
            .amount(Fixed8::from_str("1").unwrap())
            .to_address(ALT_ADDRESS)
            .attribute(TransactionAttribute::script(&account.script_hash()))
            .build()
            .unwrap();
        transfer.sign().unwrap();

        assert_eq!(
            hex::encode(transfer.transaction().to_bytes()),
            "8000012023ba2703c53263e8d6e522dc32203339dcd8eee901ff8c509a090d440c0e34\
             71709ef536f8e8d32caa2488ed8c64c6f7acf1d1a44b0000029b7cffdaa674beae0f93\
             0ebe6085af9093e5fe56b34a5c220ccdcf6efc336fc500e1f505000000001cc9c05cef\
             ffe6cdd7b182816a9152ec218d2ec09b7cffdaa674beae0f930ebe6085af9093e5fe56\
             b34a5c220ccdcf6efc336fc5001fcb69f286230023ba2703c53263e8d6e522dc322033\
             39dcd8eee90141405355d70f137186599933fb7df0b93f19f8a60ac01148780480eff8\
             497e66e34b234cdb7ad668271579f6e268f01b8103befec12c17bb255a6f58ac38e1d5\
             fb2b2321031a6c6fbbdf02ca351745fa86b9ba5a9452d785ac4f7fc2b7548ca2a46c4f\
             cf4aac"
        );
    }

    #[test]
    fn test_transfer_from_manual_utxo_pool() {
        let account = Account::from_wif(WIF).unwrap();

        // Same transfer as above but with a manually supplied pool and no
        // balance snapshot on the account.
        let mut transfer = AssetTransferBuilder::new()
            .account(&account)
            .utxo(bhp_utxo(
                "ff8c509a090d440c0e3471709ef536f8e8d32caa2488ed8c64c6f7acf1d1a44b",
                0,
                "100000000",
            ))
            .asset(GOVERNING_TOKEN_ID)
            .amount(Fixed8::from_str("1").unwrap())
            .to_address(ALT_ADDRESS)
            .attribute(TransactionAttribute::script(&account.script_hash()))
            .build()
            .unwrap();
        transfer.sign().unwrap();

        assert_eq!(
            hex::encode(transfer.transaction().to_bytes()),
            "8000012023ba2703c53263e8d6e522dc32203339dcd8eee901ff8c509a090d440c0e34\
             71709ef536f8e8d32caa2488ed8c64c6f7acf1d1a44b0000029b7cffdaa674beae0f93\
             0ebe6085af9093e5fe56b34a5c220ccdcf6efc336fc500e1f505000000001cc9c05cef\
             ffe6cdd7b182816a9152ec218d2ec09b7cffdaa674beae0f930ebe6085af9093e5fe56\
             b34a5c220ccdcf6efc336fc5001fcb69f286230023ba2703c53263e8d6e522dc322033\
             39dcd8eee90141405355d70f137186599933fb7df0b93f19f8a60ac01148780480eff8\
             497e66e34b234cdb7ad668271579f6e268f01b8103befec12c17bb255a6f58ac38e1d5\
             fb2b2321031a6c6fbbdf02ca351745fa86b9ba5a9452d785ac4f7fc2b7548ca2a46c4f\
             cf4aac"
        );
    }

    #[test]
    fn test_transfer_with_multiple_inputs() {
        let mut account =
            Account::from_wif("L56SWKLsdynnXTHScMdNjsJRgbtqcf9p5TUgSAHq242L2yD8NyrA").unwrap();
        assert_eq!(account.address(), "APLJBPhtRg2XLhtpxEHd6aRNL7YSLGH2ZL");
        account.update_asset_balances(vec![
            bhp_utxo(
                "c58a18ebdbe3913a903e953b19c97a9d86600ce12915eac317f37073a74e8fea",
                0,
                "10",
            ),
            bhp_utxo(
                "68e254e10b7e33134c16cdd3f4ef86b22e900a958504dd11131019e35e3cd3fd",
                0,
                "10",
            ),
            bhp_utxo(
                "dc455cefe438992d72876aa4adc7f647a2d1c9fd9b632d658733b29f34630f3d",
                0,
                "10",
            ),
        ]);

        let observer = Account::from_address(ADDRESS).unwrap();
        let mut transfer = AssetTransferBuilder::new()
            .account(&account)
            .asset(GOVERNING_TOKEN_ID)
            .amount(Fixed8::from_str("25").unwrap())
            .to_address(ALT_ADDRESS)
            .attribute(TransactionAttribute::script(&observer.script_hash()))
            .build()
            .unwrap();
        transfer.sign().unwrap();

        assert_eq!(
            hex::encode(transfer.transaction().to_bytes()),
            "8000012023ba2703c53263e8d6e522dc32203339dcd8eee903c58a18ebdbe3913a903e\
             953b19c97a9d86600ce12915eac317f37073a74e8fea000068e254e10b7e33134c16cd\
             d3f4ef86b22e900a958504dd11131019e35e3cd3fd0000dc455cefe438992d72876aa4\
             adc7f647a2d1c9fd9b632d658733b29f34630f3d0000029b7cffdaa674beae0f930ebe\
             6085af9093e5fe56b34a5c220ccdcf6efc336fc500f90295000000001cc9c05cefffe6\
             cdd7b182816a9152ec218d2ec09b7cffdaa674beae0f930ebe6085af9093e5fe56b34a\
             5c220ccdcf6efc336fc50065cd1d0000000052eaab8b2aab608902c651912db34de36e\
             7a2b0f01414027420055dea9b299270ce41ff1d4492febc8f83cf4a19892d78577a2be\
             0afac6406dbeb9daf47820ff89e8f5e1bd2afe4b3931e001a4aae8744781cf14eea4b5\
             2321036245f426b4522e8a2901be6ccc1f71e37dc376726cc6665d80c5997e240568fb\
             ac"
        );
    }

    #[test]
    fn test_transfer_from_contract() {
        let account = Account::from_wif(WIF).unwrap();
        let contract_hash =
            ScriptHash::from_hex("d994605e4f3960ba8d7422c4c8b1e94d48960a8d").unwrap();

        let mut transfer = AssetTransferBuilder::new()
            .account(&account)
            .from_contract(
                contract_hash,
                1,
                vec![bhp_utxo(
                    "b3b8549a5c896e3398ed960473842917202a08e3e83da7324050adc0bf41cc47",
                    0,
                    "10",
                )],
            )
            .asset(GOVERNING_TOKEN_ID)
            .amount(Fixed8::from_str("1").unwrap())
            .to_address(ADDRESS)
            .build()
            .unwrap();
        transfer.sign().unwrap();

        assert_eq!(
            hex::encode(transfer.transaction().to_bytes()),
            "8000012023ba2703c53263e8d6e522dc32203339dcd8eee901b3b8549a5c896e3398ed\
             960473842917202a08e3e83da7324050adc0bf41cc470000029b7cffdaa674beae0f93\
             0ebe6085af9093e5fe56b34a5c220ccdcf6efc336fc500e1f5050000000023ba2703c5\
             3263e8d6e522dc32203339dcd8eee99b7cffdaa674beae0f930ebe6085af9093e5fe56\
             b34a5c220ccdcf6efc336fc500e9a435000000008d0a96484de9b1c8c422748dba6039\
             4f5e6094d9020100004140bda6a86e1d1e325da2a10cec2ff7792c3bde45852b578ecf\
             024a87183bc98304ce8ff1e491978140b7e29cc0f5dc05b85eab3e6cd9a72b13cee720\
             82befba0022321031a6c6fbbdf02ca351745fa86b9ba5a9452d785ac4f7fc2b7548ca2\
             a46c4fcf4aac"
        );
    }

    #[test]
    fn test_transfer_from_multisig_account() {
        let key1 = PublicKey::from_hex(
            "0265bf906bf385fbf3f777832e55a87991bcfbe19b097fb7c5ca2e4025a4d5e5d6",
        )
        .unwrap();
        let key2 = PublicKey::from_hex(
            "025dd091303c62a683fab1278349c3475c958f4152292495350571d3e998611d43",
        )
        .unwrap();
        let account = Account::from_multisig_keys(&[key1.clone(), key2.clone()], 2).unwrap();
        assert_eq!(account.address(), "ATcWffQV1A7NMEsqQ1RmKfS7AbSqcAp2hd");

        let mut transfer = AssetTransferBuilder::new()
            .account(&account)
            .utxo(bhp_utxo(
                "c9d3554186f68ec08e8a6b5901610d10f889600ba864573e563b58d1b7ec393f",
                0,
                "100",
            ))
            .asset(GOVERNING_TOKEN_ID)
            .amount(Fixed8::from_str("1").unwrap())
            .to_address(ADDRESS)
            .build()
            .unwrap();

        // Multi-sig accounts cannot sign directly.
        assert!(transfer.sign().is_err());

        // Witness built from signatures produced externally by both key
        // holders over the unsigned transaction bytes.
        let sig1: [u8; 64] = hex::decode(
            "cb10f5cda6cf3adcfa35f67e29d0fec3b96dbfdac079912cd554175b80d923c2\
             decbd47ecb410bc1806eabd4285eea54608a0f18b8c7fef6cb6f2eb39c24aa14",
        )
        .unwrap()
        .try_into()
        .unwrap();
        let sig2: [u8; 64] = hex::decode(
            "8174af3c64a304a1e586694493e448b3c435c1c5391ef7bed9b768a92fddc8e2\
             3419b04eee404e656503fa30a057b35befcb200c162a70a5dc78178f75d28573",
        )
        .unwrap()
        .try_into()
        .unwrap();
        transfer.add_witness(Witness::multi_sig(&[sig1, sig2], 2, &[key1, key2]).unwrap());

        assert_eq!(
            hex::encode(transfer.transaction().to_bytes()),
            "80000001c9d3554186f68ec08e8a6b5901610d10f889600ba864573e563b58d1b7ec39\
             3f0000029b7cffdaa674beae0f930ebe6085af9093e5fe56b34a5c220ccdcf6efc336f\
             c500e1f5050000000023ba2703c53263e8d6e522dc32203339dcd8eee99b7cffdaa674\
             beae0f930ebe6085af9093e5fe56b34a5c220ccdcf6efc336fc50003164e0200000081\
             dc40aa001a388671254601a0593197d7474bc6018240cb10f5cda6cf3adcfa35f67e29\
             d0fec3b96dbfdac079912cd554175b80d923c2decbd47ecb410bc1806eabd4285eea54\
             608a0f18b8c7fef6cb6f2eb39c24aa14408174af3c64a304a1e586694493e448b3c435\
             c1c5391ef7bed9b768a92fddc8e23419b04eee404e656503fa30a057b35befcb200c16\
             2a70a5dc78178f75d285734752210265bf906bf385fbf3f777832e55a87991bcfbe19b\
             097fb7c5ca2e4025a4d5e5d621025dd091303c62a683fab1278349c3475c958f415229\
             2495350571d3e998611d4352ae"
        );
    }

    #[test]
    fn test_builder_validation() {
        let account = Account::from_wif(WIF).unwrap();

        // No account.
        assert!(matches!(
            AssetTransferBuilder::new()
                .asset(GOVERNING_TOKEN_ID)
                .amount(Fixed8::from_str("1").unwrap())
                .to_address(ALT_ADDRESS)
                .build(),
            Err(WalletError::InvalidState(_))
        ));

        // No outputs at all.
        assert!(matches!(
            AssetTransferBuilder::new().account(&account).build(),
            Err(WalletError::InvalidState(_))
        ));

        // Incomplete triple.
        assert!(matches!(
            AssetTransferBuilder::new()
                .account(&account)
                .asset(GOVERNING_TOKEN_ID)
                .build(),
            Err(WalletError::InvalidState(_))
        ));

        // Mixing outputs with the triple.
        let output = TransactionOutput::pay_to_address(
            GOVERNING_TOKEN_ID,
            Fixed8::from_str("1").unwrap(),
            ALT_ADDRESS,
        )
        .unwrap();
        assert!(matches!(
            AssetTransferBuilder::new()
                .account(&account)
                .output(output)
                .asset(GOVERNING_TOKEN_ID)
                .build(),
            Err(WalletError::InvalidState(_))
        ));
    }

    #[test]
    fn test_insufficient_funds_before_mutation() {
        let mut account = Account::from_wif(WIF).unwrap();
        account.update_asset_balances(vec![bhp_utxo(
            "ff8c509a090d440c0e3471709ef536f8e8d32caa2488ed8c64c6f7acf1d1a44b",
            0,
            "10",
        )]);

        let err = AssetTransferBuilder::new()
            .account(&account)
            .asset(GOVERNING_TOKEN_ID)
            .amount(Fixed8::from_str("11").unwrap())
            .to_address(ALT_ADDRESS)
            .build()
            .unwrap_err();
        assert!(matches!(err, WalletError::InsufficientFunds { .. }));
    }
}
