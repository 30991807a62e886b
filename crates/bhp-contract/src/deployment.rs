//! Contract deployment transactions.
//!
//! Deployment wraps the contract binary and its metadata in a script
//! that calls the `Bhp.Contract.Create` interop service, carried by an
//! invocation transaction whose gas field is the deployment system fee.

use std::collections::BTreeMap;

use bhp_primitives::fixed8::Fixed8;
use bhp_primitives::hash256::Hash256;
use bhp_script::{ContractParameterType, ScriptBuilder, ScriptError, ScriptHash};
use bhp_transaction::{
    InvocationTransactionBuilder, RawTransaction, TransactionAttribute, Witness,
};
use bhp_wallet::{Account, DefaultStrategy, InputStrategy, Utxo, UTILITY_TOKEN_ID};

use crate::funding;
use crate::ContractError;

/// Base deployment fee in whole GAS.
pub const DEPLOYMENT_BASE_FEE: i64 = 100;

/// Surcharge for contracts that need storage, in whole GAS.
pub const STORAGE_SURCHARGE: i64 = 400;

/// Surcharge for contracts that need dynamic invocation, in whole GAS.
pub const DYNAMIC_INVOKE_SURCHARGE: i64 = 500;

/// Execution cost every transaction gets free of charge, in whole GAS.
pub const FREE_EXECUTION_ALLOWANCE: i64 = 10;

/// The execution profile of a contract: its signature and the VM
/// features it needs.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct FunctionProperties {
    /// Parameter types of the contract's entry point.
    pub parameter_types: Vec<ContractParameterType>,
    /// Return type of the contract's entry point.
    pub return_type: ContractParameterType,
    /// Whether the contract uses persistent storage.
    pub needs_storage: bool,
    /// Whether the contract invokes other contracts dynamically.
    pub needs_dynamic_invoke: bool,
    /// Whether the contract can receive assets.
    pub is_payable: bool,
}

impl FunctionProperties {
    fn flags(&self) -> i64 {
        let mut flags = 0;
        if self.needs_storage {
            flags |= 1;
        }
        if self.needs_dynamic_invoke {
            flags |= 2;
        }
        if self.is_payable {
            flags |= 4;
        }
        flags
    }

    fn write_to(&self, builder: &mut ScriptBuilder) -> Result<(), ScriptError> {
        builder.push_integer(self.flags());
        builder.push_integer(self.return_type.byte() as i64);
        let parameter_bytes: Vec<u8> =
            self.parameter_types.iter().map(ContractParameterType::byte).collect();
        builder.push_data(&parameter_bytes)?;
        Ok(())
    }
}

/// Human-readable contract metadata recorded at deployment.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct DescriptionProperties {
    /// Contract name.
    pub name: String,
    /// Version string.
    pub version: String,
    /// Author name.
    pub author: String,
    /// Contact email.
    pub email: String,
    /// Free-form description.
    pub description: String,
}

impl DescriptionProperties {
    fn write_to(&self, builder: &mut ScriptBuilder) -> Result<(), ScriptError> {
        builder.push_data(self.description.as_bytes())?;
        builder.push_data(self.email.as_bytes())?;
        builder.push_data(self.author.as_bytes())?;
        builder.push_data(self.version.as_bytes())?;
        builder.push_data(self.name.as_bytes())?;
        Ok(())
    }
}

/// The script that registers a contract on chain.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct DeploymentScript {
    avm: Vec<u8>,
    function: FunctionProperties,
    description: DescriptionProperties,
}

impl DeploymentScript {
    /// Assemble a deployment script from the contract binary and its
    /// metadata.
    ///
    /// # Arguments
    /// * `avm` - The compiled contract binary.
    /// * `function` - The contract's execution profile.
    /// * `description` - The contract's metadata.
    pub fn new(
        avm: Vec<u8>,
        function: FunctionProperties,
        description: DescriptionProperties,
    ) -> Self {
        DeploymentScript { avm, function, description }
    }

    /// Return the contract binary.
    pub fn avm(&self) -> &[u8] {
        &self.avm
    }

    /// Return the script hash the contract will be addressable by.
    pub fn contract_script_hash(&self) -> ScriptHash {
        ScriptHash::from_script(&self.avm)
    }

    /// Serialize into the VM script that performs the deployment:
    /// description properties, function properties, the pushed binary,
    /// and the `Bhp.Contract.Create` SYSCALL.
    ///
    /// # Returns
    /// The script bytes, or an error if a component exceeds push limits.
    pub fn to_script_bytes(&self) -> Result<Vec<u8>, ScriptError> {
        let mut builder = ScriptBuilder::new();
        self.description.write_to(&mut builder)?;
        self.function.write_to(&mut builder)?;
        builder.push_data(&self.avm)?;
        builder.sys_call("Bhp.Contract.Create")?;
        Ok(builder.into_bytes())
    }

    /// Compute the system fee charged for deploying this contract.
    ///
    /// Base fee plus surcharges for storage and dynamic invocation,
    /// minus the free execution allowance, floored at zero.
    pub fn deployment_system_fee(&self) -> Fixed8 {
        let mut fee = DEPLOYMENT_BASE_FEE;
        if self.function.needs_storage {
            fee += STORAGE_SURCHARGE;
        }
        if self.function.needs_dynamic_invoke {
            fee += DYNAMIC_INVOKE_SURCHARGE;
        }
        fee -= FREE_EXECUTION_ALLOWANCE;
        // The fee constants keep this far below the Fixed8 range.
        Fixed8::from_int(fee.max(0)).unwrap_or(Fixed8::ZERO)
    }
}

/// Fluent builder for contract deployment transactions.
pub struct ContractDeploymentBuilder<'a> {
    account: Option<&'a Account>,
    script_bytes: Option<Vec<u8>>,
    name: String,
    version: String,
    author: String,
    email: String,
    description: String,
    parameter_types: Vec<ContractParameterType>,
    return_type: ContractParameterType,
    needs_storage: bool,
    needs_dynamic_invoke: bool,
    is_payable: bool,
    attributes: Vec<TransactionAttribute>,
    utxos: Vec<Utxo>,
    network_fee: Fixed8,
    strategy: &'a dyn InputStrategy,
}

impl<'a> ContractDeploymentBuilder<'a> {
    /// Create an empty builder. Metadata strings default to empty and
    /// the return type to `ByteArray`.
    pub fn new() -> Self {
        ContractDeploymentBuilder {
            account: None,
            script_bytes: None,
            name: String::new(),
            version: String::new(),
            author: String::new(),
            email: String::new(),
            description: String::new(),
            parameter_types: Vec::new(),
            return_type: ContractParameterType::ByteArray,
            needs_storage: false,
            needs_dynamic_invoke: false,
            is_payable: false,
            attributes: Vec::new(),
            utxos: Vec::new(),
            network_fee: Fixed8::ZERO,
            strategy: &DefaultStrategy,
        }
    }

    /// Set the account that pays the fees and signs. Required.
    pub fn account(mut self, account: &'a Account) -> Self {
        self.account = Some(account);
        self
    }

    /// Set the compiled contract binary. Required.
    pub fn script_bytes(mut self, avm: Vec<u8>) -> Self {
        self.script_bytes = Some(avm);
        self
    }

    /// Set the contract name.
    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Set the version string.
    pub fn version(mut self, version: &str) -> Self {
        self.version = version.to_string();
        self
    }

    /// Set the author name.
    pub fn author(mut self, author: &str) -> Self {
        self.author = author.to_string();
        self
    }

    /// Set the contact email.
    pub fn email(mut self, email: &str) -> Self {
        self.email = email.to_string();
        self
    }

    /// Set the free-form description.
    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Add an entry point parameter type.
    pub fn parameter(mut self, parameter_type: ContractParameterType) -> Self {
        self.parameter_types.push(parameter_type);
        self
    }

    /// Add several entry point parameter types.
    pub fn parameters(
        mut self,
        parameter_types: impl IntoIterator<Item = ContractParameterType>,
    ) -> Self {
        self.parameter_types.extend(parameter_types);
        self
    }

    /// Set the entry point return type.
    pub fn return_type(mut self, return_type: ContractParameterType) -> Self {
        self.return_type = return_type;
        self
    }

    /// Mark the contract as needing persistent storage.
    pub fn needs_storage(mut self) -> Self {
        self.needs_storage = true;
        self
    }

    /// Mark the contract as invoking other contracts dynamically.
    pub fn needs_dynamic_invoke(mut self) -> Self {
        self.needs_dynamic_invoke = true;
        self
    }

    /// Mark the contract as able to receive assets.
    pub fn is_payable(mut self) -> Self {
        self.is_payable = true;
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

    /// Validate the builder and assemble the unsigned transaction.
    ///
    /// The system fee plus network fee is funded from the account's GAS
    /// and the surplus returns as change. The transaction's gas field
    /// carries the system fee.
    ///
    /// # Returns
    /// The deployment, or an error for missing fields or insufficient
    /// funds.
    pub fn build(self) -> Result<ContractDeployment<'a>, ContractError> {
        let account = self.account.ok_or(ContractError::MissingField("account"))?;
        let avm = self
            .script_bytes
            .ok_or(ContractError::MissingField("contract script binary"))?;

        let script = DeploymentScript::new(
            avm,
            FunctionProperties {
                parameter_types: self.parameter_types,
                return_type: self.return_type,
                needs_storage: self.needs_storage,
                needs_dynamic_invoke: self.needs_dynamic_invoke,
                is_payable: self.is_payable,
            },
            DescriptionProperties {
                name: self.name,
                version: self.version,
                author: self.author,
                email: self.email,
                description: self.description,
            },
        );
        let system_fee = script.deployment_system_fee();
        let fees = system_fee.checked_add(self.network_fee).ok_or_else(|| {
            ContractError::InvalidState("fee amounts overflow".to_string())
        })?;

        let mut required: BTreeMap<Hash256, Fixed8> = BTreeMap::new();
        if fees > Fixed8::ZERO {
            required.insert(UTILITY_TOKEN_ID, fees);
        }
        let funding = funding::fund(
            account,
            &self.utxos,
            &required,
            self.strategy,
            account.script_hash(),
        )?;

        let mut tx_builder = InvocationTransactionBuilder::new()
            .script(script.to_script_bytes()?)
            .gas(system_fee)
            .inputs(funding.inputs)
            .outputs(funding.change);
        for attribute in self.attributes {
            tx_builder = tx_builder.attribute(attribute);
        }
        Ok(ContractDeployment {
            account,
            script,
            transaction: tx_builder.build()?,
        })
    }
}

impl Default for ContractDeploymentBuilder<'_> {
    fn default() -> Self {
        Self::new()
    }
}

/// A built contract deployment, ready for signing.
#[derive(Debug)]
pub struct ContractDeployment<'a> {
    account: &'a Account,
    script: DeploymentScript,
    transaction: RawTransaction,
}

impl ContractDeployment<'_> {
    /// Return the deployment script.
    pub fn script(&self) -> &DeploymentScript {
        &self.script
    }

    /// Return the script hash the deployed contract will have.
    pub fn contract_script_hash(&self) -> ScriptHash {
        self.script.contract_script_hash()
    }

    /// Return the transaction in its current state.
    pub fn transaction(&self) -> &RawTransaction {
        &self.transaction
    }

    /// Consume the deployment and return the transaction.
    pub fn into_transaction(self) -> RawTransaction {
        self.transaction
    }

    /// Sign the deployment with the account's private key.
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    use bhp_transaction::TransactionKind;
    use bhp_wallet::WalletError;

    const WIF: &str = "KxDgvEKzgSBPPfuVfw67oPQBSjidEiqTHURKSDL1R7yGaGYAeYnr";

    fn properties(storage: bool, dynamic: bool) -> FunctionProperties {
        FunctionProperties {
            parameter_types: vec![],
            return_type: ContractParameterType::ByteArray,
            needs_storage: storage,
            needs_dynamic_invoke: dynamic,
            is_payable: false,
        }
    }

    #[test]
    fn test_system_fee_table() {
        let avm = vec![0x01];
        let fee = |storage, dynamic| {
            DeploymentScript::new(
                avm.clone(),
                properties(storage, dynamic),
                DescriptionProperties::default(),
            )
            .deployment_system_fee()
        };
        assert_eq!(fee(false, false), Fixed8::from_int(90).unwrap());
        assert_eq!(fee(true, false), Fixed8::from_int(490).unwrap());
        assert_eq!(fee(false, true), Fixed8::from_int(590).unwrap());
        assert_eq!(fee(true, true), Fixed8::from_int(990).unwrap());
    }

    #[test]
    fn test_deployment_script_serialization() {
        let script = DeploymentScript::new(
            vec![0x01, 0x02, 0x03],
            FunctionProperties {
                parameter_types: vec![
                    ContractParameterType::ByteArray,
                    ContractParameterType::Integer,
                ],
                return_type: ContractParameterType::ByteArray,
                needs_storage: true,
                needs_dynamic_invoke: false,
                is_payable: true,
            },
            DescriptionProperties {
                name: "n".to_string(),
                version: "1".to_string(),
                author: "a".to_string(),
                email: "e".to_string(),
                description: "d".to_string(),
            },
        );
        // description, email, author, version, name; then flags
        // (storage | payable = 5), return type, parameter bytes; then
        // the pushed binary and the Create SYSCALL.
        assert_eq!(
            hex::encode(script.to_script_bytes().unwrap()),
            "0164016501610131016e\
             5555020502\
             03010203\
             68134268702e436f6e74726163742e437265617465"
        );
    }

    #[test]
    fn test_contract_script_hash_from_binary() {
        let avm = vec![0x01, 0x02, 0x03];
        let script = DeploymentScript::new(
            avm.clone(),
            properties(false, false),
            DescriptionProperties::default(),
        );
        assert_eq!(script.contract_script_hash(), ScriptHash::from_script(&avm));
    }

    #[test]
    fn test_deployment_transaction() {
        let mut account = Account::from_wif(WIF).unwrap();
        account.update_asset_balances(vec![Utxo::new(
            UTILITY_TOKEN_ID,
            Hash256::from_hex(
                "4ba4d1f1acf7c6648ced8824aa2cd3e8f836f59e7071340e0c440d099a508cff",
            )
            .unwrap(),
            0,
            Fixed8::from_int(500).unwrap(),
        )]);

        let mut deployment = ContractDeploymentBuilder::new()
            .account(&account)
            .script_bytes(vec![0x01, 0x02, 0x03])
            .name("numbers")
            .version("1.0")
            .author("dev")
            .email("dev@example.org")
            .description("counts")
            .parameter(ContractParameterType::String)
            .return_type(ContractParameterType::Integer)
            .needs_storage()
            .build()
            .unwrap();
        deployment.sign().unwrap();

        let tx = deployment.transaction();
        let expected_script = deployment.script().to_script_bytes().unwrap();
        match tx.kind() {
            TransactionKind::Invocation { script, gas } => {
                assert_eq!(script, &expected_script);
                assert_eq!(*gas, Fixed8::from_int(490).unwrap());
            }
            other => panic!("unexpected kind: {:?}", other),
        }
        // The 490 GAS system fee eats into the 500 GAS input.
        assert_eq!(tx.inputs().len(), 1);
        assert_eq!(tx.outputs().len(), 1);
        assert_eq!(tx.outputs()[0].asset_id, UTILITY_TOKEN_ID);
        assert_eq!(tx.outputs()[0].value, Fixed8::from_int(10).unwrap());
        assert_eq!(tx.outputs()[0].script_hash, account.script_hash());

        let witness = &tx.witnesses()[0];
        let signature = &witness.invocation_script()[1..65];
        assert!(account
            .public_key()
            .unwrap()
            .verify(&tx.to_unsigned_bytes(), signature));
    }

    #[test]
    fn test_insufficient_gas_for_fee() {
        let mut account = Account::from_wif(WIF).unwrap();
        account.update_asset_balances(vec![Utxo::new(
            UTILITY_TOKEN_ID,
            Hash256::from_hex(
                "4ba4d1f1acf7c6648ced8824aa2cd3e8f836f59e7071340e0c440d099a508cff",
            )
            .unwrap(),
            0,
            Fixed8::from_int(50).unwrap(),
        )]);

        let err = ContractDeploymentBuilder::new()
            .account(&account)
            .script_bytes(vec![0x01])
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            ContractError::Wallet(WalletError::InsufficientFunds { .. })
        ));
    }

    #[test]
    fn test_missing_required_fields() {
        let account = Account::from_wif(WIF).unwrap();
        assert!(matches!(
            ContractDeploymentBuilder::new().script_bytes(vec![0x01]).build(),
            Err(ContractError::MissingField("account"))
        ));
        assert!(matches!(
            ContractDeploymentBuilder::new().account(&account).build(),
            Err(ContractError::MissingField("contract script binary"))
        ));
    }
}
