//! Contract invocation transactions.
//!
//! An invocation runs a deployed contract by wrapping an APPCALL script
//! in an invocation transaction. Parameters are pushed in reverse order
//! so the callee pops them in the order they were supplied. Fees and any
//! additional outputs are funded from the account's UTXOs.

use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

use bhp_primitives::fixed8::Fixed8;
use bhp_primitives::hash256::Hash256;
use bhp_script::{ContractParameter, ScriptBuilder, ScriptHash};
use bhp_transaction::{
    InvocationTransactionBuilder, RawTransaction, TransactionAttribute, TransactionOutput, Witness,
};
use bhp_wallet::{Account, DefaultStrategy, InputStrategy, Utxo, UTILITY_TOKEN_ID};

use crate::funding;
use crate::ContractError;

/// Fluent builder for contract invocation transactions.
pub struct ContractInvocationBuilder<'a> {
    contract_script_hash: Option<ScriptHash>,
    account: Option<&'a Account>,
    parameters: Vec<ContractParameter>,
    attributes: Vec<TransactionAttribute>,
    outputs: Vec<TransactionOutput>,
    utxos: Vec<Utxo>,
    network_fee: Fixed8,
    system_fee: Fixed8,
    strategy: &'a dyn InputStrategy,
    remark: Option<Vec<u8>>,
}

impl<'a> ContractInvocationBuilder<'a> {
    /// Create an empty builder.
    pub fn new() -> Self {
        ContractInvocationBuilder {
            contract_script_hash: None,
            account: None,
            parameters: Vec::new(),
            attributes: Vec::new(),
            outputs: Vec::new(),
            utxos: Vec::new(),
            network_fee: Fixed8::ZERO,
            system_fee: Fixed8::ZERO,
            strategy: &DefaultStrategy,
            remark: None,
        }
    }

    /// Set the script hash of the contract to invoke. Required.
    pub fn contract_script_hash(mut self, script_hash: ScriptHash) -> Self {
        self.contract_script_hash = Some(script_hash);
        self
    }

    /// Set the account that funds and signs the invocation. Required.
    pub fn account(mut self, account: &'a Account) -> Self {
        self.account = Some(account);
        self
    }

    /// Add an invocation parameter.
    ///
    /// Parameters end up on the VM stack in the order they were added,
    /// which means they are pushed into the script in reverse.
    pub fn parameter(mut self, parameter: ContractParameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Add several invocation parameters.
    pub fn parameters(mut self, parameters: impl IntoIterator<Item = ContractParameter>) -> Self {
        self.parameters.extend(parameters);
        self
    }

    /// Add a transaction attribute.
    pub fn attribute(mut self, attribute: TransactionAttribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Add an asset output carried along with the invocation.
    pub fn output(mut self, output: TransactionOutput) -> Self {
        self.outputs.push(output);
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

    /// Set the system fee charged for the execution. Becomes the
    /// transaction's gas field and is funded from the account like the
    /// network fee.
    pub fn system_fee(mut self, fee: Fixed8) -> Self {
        self.system_fee = fee;
        self
    }

    /// Replace the input selection strategy.
    pub fn strategy(mut self, strategy: &'a dyn InputStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Override the generated remark bytes. Intended for reproducible
    /// transaction bytes in tests.
    pub fn remark(mut self, remark: Vec<u8>) -> Self {
        self.remark = Some(remark);
        self
    }

    /// Validate the builder and assemble the unsigned transaction.
    ///
    /// An invocation with no inputs and no outputs gets a `Script`
    /// attribute naming the account plus a unique `Remark` attribute, so
    /// the transaction hash differs between otherwise identical calls.
    ///
    /// # Returns
    /// The invocation, or an error for missing fields or insufficient
    /// funds.
    pub fn build(self) -> Result<ContractInvocation<'a>, ContractError> {
        let script_hash = self
            .contract_script_hash
            .ok_or(ContractError::MissingField("contract script hash"))?;
        let account = self.account.ok_or(ContractError::MissingField("account"))?;

        let mut builder = ScriptBuilder::new();
        for parameter in self.parameters.iter().rev() {
            builder.push_param(parameter)?;
        }
        builder.app_call(&script_hash);
        let script = builder.into_bytes();

        let mut required: BTreeMap<Hash256, Fixed8> = BTreeMap::new();
        for output in &self.outputs {
            let entry = required.entry(output.asset_id).or_insert(Fixed8::ZERO);
            *entry = entry.checked_add(output.value).ok_or_else(|| {
                ContractError::InvalidState("output amounts overflow".to_string())
            })?;
        }
        let fees = self.network_fee.checked_add(self.system_fee).ok_or_else(|| {
            ContractError::InvalidState("fee amounts overflow".to_string())
        })?;
        if fees > Fixed8::ZERO {
            let entry = required.entry(UTILITY_TOKEN_ID).or_insert(Fixed8::ZERO);
            *entry = entry.checked_add(fees).ok_or_else(|| {
                ContractError::InvalidState("fee amounts overflow".to_string())
            })?;
        }
        let funding = funding::fund(
            account,
            &self.utxos,
            &required,
            self.strategy,
            account.script_hash(),
        )?;

        let mut attributes = self.attributes;
        if funding.inputs.is_empty() && self.outputs.is_empty() {
            attributes.push(TransactionAttribute::script(&account.script_hash()));
            attributes.push(TransactionAttribute::remark(
                self.remark.unwrap_or_else(random_remark),
            ));
        }

        let mut tx_builder = InvocationTransactionBuilder::new()
            .script(script)
            .gas(self.system_fee)
            .inputs(funding.inputs)
            .outputs(self.outputs)
            .outputs(funding.change);
        for attribute in attributes {
            tx_builder = tx_builder.attribute(attribute);
        }
        Ok(ContractInvocation {
            account,
            transaction: tx_builder.build()?,
        })
    }
}

impl Default for ContractInvocationBuilder<'_> {
    fn default() -> Self {
        Self::new()
    }
}

/// Remark payload unique per call: the current millisecond timestamp in
/// big-endian followed by four random bytes.
fn random_remark() -> Vec<u8> {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default();
    let mut remark = millis.to_be_bytes().to_vec();
    remark.extend_from_slice(&rand::random::<[u8; 4]>());
    remark
}

/// A built contract invocation, ready for signing.
pub struct ContractInvocation<'a> {
    account: &'a Account,
    transaction: RawTransaction,
}

impl ContractInvocation<'_> {
    /// Return the transaction in its current state.
    pub fn transaction(&self) -> &RawTransaction {
        &self.transaction
    }

    /// Consume the invocation and return the transaction.
    pub fn into_transaction(self) -> RawTransaction {
        self.transaction
    }

    /// Sign the invocation with the account's private key.
    pub fn sign(&mut self) -> Result<(), ContractError> {
        let key = self.account.private_key()?;
        let witness = Witness::create(&self.transaction.to_unsigned_bytes(), key)?;
        self.transaction.add_witness(witness);
        Ok(())
    }

    /// Attach an externally built witness, e.g. for multi-sig accounts.
    pub fn add_witness(&mut self, witness: Witness) {
        self.transaction.add_witness(witness);
    }
}
