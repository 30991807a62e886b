//! Contract parameter model.
//!
//! Parameters are the typed arguments passed to contract invocations and
//! embedded in deployment metadata. Each variant carries the value the VM
//! will see; the type tag bytes appear in contract ABIs and deployment
//! parameter lists.

use bhp_primitives::hash256::Hash256;

use crate::script_hash::ScriptHash;
use crate::ScriptError;

/// Type tag of a contract parameter, as used in ABIs and deployment
/// parameter lists.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ContractParameterType {
    /// A 64-byte ECDSA signature.
    Signature,
    /// A boolean value.
    Boolean,
    /// A signed integer.
    Integer,
    /// A 20-byte script hash.
    Hash160,
    /// A 32-byte hash.
    Hash256,
    /// An arbitrary byte array.
    ByteArray,
    /// A 33-byte compressed public key.
    PublicKey,
    /// A UTF-8 string.
    String,
    /// An array of parameters.
    Array,
}

impl ContractParameterType {
    /// Return the wire byte for this parameter type.
    pub fn byte(&self) -> u8 {
        match self {
            ContractParameterType::Signature => 0x00,
            ContractParameterType::Boolean => 0x01,
            ContractParameterType::Integer => 0x02,
            ContractParameterType::Hash160 => 0x03,
            ContractParameterType::Hash256 => 0x04,
            ContractParameterType::ByteArray => 0x05,
            ContractParameterType::PublicKey => 0x06,
            ContractParameterType::String => 0x07,
            ContractParameterType::Array => 0x10,
        }
    }

    /// Parse a parameter type from its wire byte.
    ///
    /// # Arguments
    /// * `byte` - The type tag byte.
    ///
    /// # Returns
    /// The parameter type, or an error for unknown tags.
    pub fn from_byte(byte: u8) -> Result<Self, ScriptError> {
        match byte {
            0x00 => Ok(ContractParameterType::Signature),
            0x01 => Ok(ContractParameterType::Boolean),
            0x02 => Ok(ContractParameterType::Integer),
            0x03 => Ok(ContractParameterType::Hash160),
            0x04 => Ok(ContractParameterType::Hash256),
            0x05 => Ok(ContractParameterType::ByteArray),
            0x06 => Ok(ContractParameterType::PublicKey),
            0x07 => Ok(ContractParameterType::String),
            0x10 => Ok(ContractParameterType::Array),
            b => Err(ScriptError::InvalidParameter(
                format!("unknown parameter type 0x{:02x}", b)
            )),
        }
    }
}

/// A typed contract invocation argument.
#[derive(Clone, PartialEq, Debug)]
pub enum ContractParameter {
    /// A 64-byte ECDSA signature.
    Signature(Vec<u8>),
    /// A boolean value.
    Bool(bool),
    /// A signed integer.
    Integer(i64),
    /// A 20-byte script hash.
    Hash160(ScriptHash),
    /// A 32-byte hash.
    Hash256(Hash256),
    /// An arbitrary byte array.
    ByteArray(Vec<u8>),
    /// A 33-byte compressed public key.
    PublicKey(Vec<u8>),
    /// A UTF-8 string, pushed as its UTF-8 bytes.
    String(String),
    /// An array of parameters, packed on the VM stack.
    Array(Vec<ContractParameter>),
}

impl ContractParameter {
    /// Return the type tag of this parameter.
    pub fn param_type(&self) -> ContractParameterType {
        match self {
            ContractParameter::Signature(_) => ContractParameterType::Signature,
            ContractParameter::Bool(_) => ContractParameterType::Boolean,
            ContractParameter::Integer(_) => ContractParameterType::Integer,
            ContractParameter::Hash160(_) => ContractParameterType::Hash160,
            ContractParameter::Hash256(_) => ContractParameterType::Hash256,
            ContractParameter::ByteArray(_) => ContractParameterType::ByteArray,
            ContractParameter::PublicKey(_) => ContractParameterType::PublicKey,
            ContractParameter::String(_) => ContractParameterType::String,
            ContractParameter::Array(_) => ContractParameterType::Array,
        }
    }

    /// Create a byte-array parameter holding an address's script hash.
    ///
    /// Contracts that take an account argument expect the 20 wire-order
    /// script hash bytes, not the address string.
    ///
    /// # Arguments
    /// * `address` - A Base58Check address.
    ///
    /// # Returns
    /// A `ByteArray` parameter, or an error for malformed addresses.
    pub fn byte_array_from_address(address: &str) -> Result<Self, ScriptError> {
        let hash = ScriptHash::from_address(address)?;
        Ok(ContractParameter::ByteArray(hash.to_vec()))
    }

    /// Create a string parameter.
    pub fn string(value: impl Into<String>) -> Self {
        ContractParameter::String(value.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_bytes() {
        assert_eq!(ContractParameterType::Signature.byte(), 0x00);
        assert_eq!(ContractParameterType::Boolean.byte(), 0x01);
        assert_eq!(ContractParameterType::Integer.byte(), 0x02);
        assert_eq!(ContractParameterType::Hash160.byte(), 0x03);
        assert_eq!(ContractParameterType::Hash256.byte(), 0x04);
        assert_eq!(ContractParameterType::ByteArray.byte(), 0x05);
        assert_eq!(ContractParameterType::PublicKey.byte(), 0x06);
        assert_eq!(ContractParameterType::String.byte(), 0x07);
        assert_eq!(ContractParameterType::Array.byte(), 0x10);
    }

    #[test]
    fn test_type_byte_roundtrip() {
        for t in [
            ContractParameterType::Signature,
            ContractParameterType::Boolean,
            ContractParameterType::Integer,
            ContractParameterType::Hash160,
            ContractParameterType::Hash256,
            ContractParameterType::ByteArray,
            ContractParameterType::PublicKey,
            ContractParameterType::String,
            ContractParameterType::Array,
        ] {
            assert_eq!(ContractParameterType::from_byte(t.byte()).unwrap(), t);
        }
        assert!(ContractParameterType::from_byte(0x42).is_err());
    }

    #[test]
    fn test_byte_array_from_address() {
        let param = ContractParameter::byte_array_from_address(
            "AK2nJJpJr6o664CWJKi1QRXjqeic2zRp8y"
        ).unwrap();
        match param {
            ContractParameter::ByteArray(bytes) => {
                assert_eq!(hex::encode(bytes), "23ba2703c53263e8d6e522dc32203339dcd8eee9");
            }
            other => panic!("unexpected parameter: {:?}", other),
        }
        assert!(ContractParameter::byte_array_from_address("garbage").is_err());
    }
}
