//! Raw transaction model.
//!
//! A transaction is a type byte, a version, a kind-specific payload, then
//! attributes, inputs, outputs, and witnesses. The transaction ID is the
//! double SHA-256 of the unsigned serialization, displayed byte-reversed.

use bhp_primitives::ec::PrivateKey;
use bhp_primitives::fixed8::Fixed8;
use bhp_primitives::hash256::Hash256;
use bhp_primitives::io::{BhpReader, BhpWriter, Serializable};

use crate::attribute::TransactionAttribute;
use crate::input::TransactionInput;
use crate::output::TransactionOutput;
use crate::witness::Witness;
use crate::TransactionError;

/// Type byte of a contract (asset transfer) transaction.
pub const CONTRACT_TRANSACTION_TYPE: u8 = 0x80;

/// Type byte of an invocation transaction.
pub const INVOCATION_TRANSACTION_TYPE: u8 = 0xd1;

/// Wire version emitted for contract transactions.
pub const CONTRACT_TRANSACTION_VERSION: u8 = 0;

/// Wire version emitted for invocation transactions.
pub const INVOCATION_TRANSACTION_VERSION: u8 = 1;

/// The kind of a transaction together with its kind-specific payload.
#[derive(Clone, PartialEq, Debug)]
pub enum TransactionKind {
    /// Plain UTXO asset transfer. Carries no extra payload.
    Contract,
    /// Smart contract invocation.
    Invocation {
        /// The VM script to execute.
        script: Vec<u8>,
        /// GAS consumed by the execution beyond the free allowance.
        /// Serialized only for version 1 and above.
        gas: Fixed8,
    },
}

impl TransactionKind {
    /// Return the wire type byte for this kind.
    pub fn type_byte(&self) -> u8 {
        match self {
            TransactionKind::Contract => CONTRACT_TRANSACTION_TYPE,
            TransactionKind::Invocation { .. } => INVOCATION_TRANSACTION_TYPE,
        }
    }
}

/// A transaction in wire form: kind, version, attributes, inputs, outputs,
/// and witnesses.
#[derive(Clone, PartialEq, Debug)]
pub struct RawTransaction {
    kind: TransactionKind,
    version: u8,
    attributes: Vec<TransactionAttribute>,
    inputs: Vec<TransactionInput>,
    outputs: Vec<TransactionOutput>,
    witnesses: Vec<Witness>,
}

impl RawTransaction {
    /// Return the transaction kind.
    pub fn kind(&self) -> &TransactionKind {
        &self.kind
    }

    /// Return the wire version.
    pub fn version(&self) -> u8 {
        self.version
    }

    /// Return the attributes.
    pub fn attributes(&self) -> &[TransactionAttribute] {
        &self.attributes
    }

    /// Return the inputs.
    pub fn inputs(&self) -> &[TransactionInput] {
        &self.inputs
    }

    /// Return the outputs.
    pub fn outputs(&self) -> &[TransactionOutput] {
        &self.outputs
    }

    /// Return the witnesses.
    pub fn witnesses(&self) -> &[Witness] {
        &self.witnesses
    }

    /// Serialize the transaction without witnesses.
    ///
    /// This is the byte string that gets signed and hashed for the
    /// transaction ID.
    ///
    /// # Returns
    /// The unsigned wire bytes.
    pub fn to_unsigned_bytes(&self) -> Vec<u8> {
        let mut writer = BhpWriter::new();
        self.write_unsigned_to(&mut writer);
        writer.into_bytes()
    }

    fn write_unsigned_to(&self, writer: &mut BhpWriter) {
        writer.write_u8(self.kind.type_byte());
        writer.write_u8(self.version);
        if let TransactionKind::Invocation { script, gas } = &self.kind {
            writer.write_var_bytes(script);
            if self.version >= 1 {
                gas.write_to(writer);
            }
        }
        writer.write_serializable_list(&self.attributes);
        writer.write_serializable_list(&self.inputs);
        writer.write_serializable_list(&self.outputs);
    }

    /// Return the transaction ID: the double SHA-256 of the unsigned
    /// serialization.
    pub fn tx_id(&self) -> Hash256 {
        Hash256::sha256d_of(&self.to_unsigned_bytes())
    }

    /// Return the full serialized size in bytes, witnesses included.
    pub fn size(&self) -> usize {
        self.to_bytes().len()
    }

    /// Sign the transaction with a single-signature account key.
    ///
    /// Appends a witness over the unsigned bytes. Call once per required
    /// signer, in witness order.
    ///
    /// # Arguments
    /// * `key` - The signing key.
    ///
    /// # Returns
    /// An error if signing fails.
    pub fn sign(&mut self, key: &PrivateKey) -> Result<(), TransactionError> {
        let witness = Witness::create(&self.to_unsigned_bytes(), key)?;
        self.witnesses.push(witness);
        Ok(())
    }

    /// Append an externally built witness.
    ///
    /// # Arguments
    /// * `witness` - The witness to append.
    pub fn add_witness(&mut self, witness: Witness) {
        self.witnesses.push(witness);
    }

    /// Parse a transaction from its wire bytes.
    ///
    /// Both signed and unsigned serializations are accepted; an unsigned
    /// transaction simply has no witnesses.
    ///
    /// # Arguments
    /// * `bytes` - The wire bytes.
    ///
    /// # Returns
    /// The parsed transaction, or an error for malformed input.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TransactionError> {
        let mut reader = BhpReader::new(bytes);
        let tx = Self::read_from(&mut reader)?;
        if reader.remaining() != 0 {
            return Err(TransactionError::SerializationError(format!(
                "{} trailing bytes after transaction",
                reader.remaining()
            )));
        }
        Ok(tx)
    }
}

impl Serializable for RawTransaction {
    type Error = TransactionError;

    fn write_to(&self, writer: &mut BhpWriter) {
        self.write_unsigned_to(writer);
        writer.write_serializable_list(&self.witnesses);
    }

    fn read_from(reader: &mut BhpReader<'_>) -> Result<Self, Self::Error> {
        let type_byte = reader.read_u8()?;
        let version = reader.read_u8()?;
        let kind = match type_byte {
            CONTRACT_TRANSACTION_TYPE => TransactionKind::Contract,
            INVOCATION_TRANSACTION_TYPE => {
                let script = reader.read_var_bytes()?;
                let gas = if version >= 1 {
                    Fixed8::read_from(reader)?
                } else {
                    Fixed8::ZERO
                };
                TransactionKind::Invocation { script, gas }
            }
            b => return Err(TransactionError::UnknownTransactionType(b)),
        };
        let attributes = reader.read_serializable_list::<TransactionAttribute>()?;
        let inputs = reader.read_serializable_list::<TransactionInput>()?;
        let outputs = reader.read_serializable_list::<TransactionOutput>()?;
        let witnesses = if reader.remaining() > 0 {
            reader.read_serializable_list::<Witness>()?
        } else {
            Vec::new()
        };
        Ok(RawTransaction {
            kind,
            version,
            attributes,
            inputs,
            outputs,
            witnesses,
        })
    }
}

/// Builder for contract (asset transfer) transactions.
#[derive(Default)]
pub struct ContractTransactionBuilder {
    attributes: Vec<TransactionAttribute>,
    inputs: Vec<TransactionInput>,
    outputs: Vec<TransactionOutput>,
}

impl ContractTransactionBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an attribute.
    pub fn attribute(mut self, attribute: TransactionAttribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Add an input.
    pub fn input(mut self, input: TransactionInput) -> Self {
        self.inputs.push(input);
        self
    }

    /// Add several inputs.
    pub fn inputs(mut self, inputs: impl IntoIterator<Item = TransactionInput>) -> Self {
        self.inputs.extend(inputs);
        self
    }

    /// Add an output.
    pub fn output(mut self, output: TransactionOutput) -> Self {
        self.outputs.push(output);
        self
    }

    /// Add several outputs.
    pub fn outputs(mut self, outputs: impl IntoIterator<Item = TransactionOutput>) -> Self {
        self.outputs.extend(outputs);
        self
    }

    /// Build the unsigned transaction.
    ///
    /// # Returns
    /// The transaction, or an error if it would move nothing.
    pub fn build(self) -> Result<RawTransaction, TransactionError> {
        if self.inputs.is_empty() && self.outputs.is_empty() {
            return Err(TransactionError::MissingField("inputs"));
        }
        Ok(RawTransaction {
            kind: TransactionKind::Contract,
            version: CONTRACT_TRANSACTION_VERSION,
            attributes: self.attributes,
            inputs: self.inputs,
            outputs: self.outputs,
            witnesses: Vec::new(),
        })
    }
}

/// Builder for invocation transactions.
#[derive(Default)]
pub struct InvocationTransactionBuilder {
    script: Option<Vec<u8>>,
    gas: Fixed8,
    attributes: Vec<TransactionAttribute>,
    inputs: Vec<TransactionInput>,
    outputs: Vec<TransactionOutput>,
}

impl InvocationTransactionBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the VM script to execute. Required.
    pub fn script(mut self, script: Vec<u8>) -> Self {
        self.script = Some(script);
        self
    }

    /// Set the GAS consumed by the execution. Defaults to zero.
    pub fn gas(mut self, gas: Fixed8) -> Self {
        self.gas = gas;
        self
    }

    /// Add an attribute.
    pub fn attribute(mut self, attribute: TransactionAttribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Add an input.
    pub fn input(mut self, input: TransactionInput) -> Self {
        self.inputs.push(input);
        self
    }

    /// Add several inputs.
    pub fn inputs(mut self, inputs: impl IntoIterator<Item = TransactionInput>) -> Self {
        self.inputs.extend(inputs);
        self
    }

    /// Add an output.
    pub fn output(mut self, output: TransactionOutput) -> Self {
        self.outputs.push(output);
        self
    }

    /// Add several outputs.
    pub fn outputs(mut self, outputs: impl IntoIterator<Item = TransactionOutput>) -> Self {
        self.outputs.extend(outputs);
        self
    }

    /// Build the unsigned transaction.
    ///
    /// # Returns
    /// The transaction, or an error if no script was set.
    pub fn build(self) -> Result<RawTransaction, TransactionError> {
        let script = self.script.ok_or(TransactionError::MissingField("script"))?;
        Ok(RawTransaction {
            kind: TransactionKind::Invocation { script, gas: self.gas },
            version: INVOCATION_TRANSACTION_VERSION,
            attributes: self.attributes,
            inputs: self.inputs,
            outputs: self.outputs,
            witnesses: Vec::new(),
        })
    }
}
