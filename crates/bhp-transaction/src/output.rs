//! Transaction outputs.

use bhp_primitives::fixed8::Fixed8;
use bhp_primitives::hash256::Hash256;
use bhp_primitives::io::{BhpReader, BhpWriter, Serializable};
use bhp_script::ScriptHash;

use crate::TransactionError;

/// An amount of a UTXO asset sent to an account.
///
/// On the wire an output is the 32-byte asset ID, the Fixed8 amount, and
/// the 20-byte script hash of the receiving account.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct TransactionOutput {
    /// Asset being transferred (transaction hash of the asset registration).
    pub asset_id: Hash256,
    /// Amount transferred.
    pub value: Fixed8,
    /// Script hash of the receiving account.
    pub script_hash: ScriptHash,
}

impl TransactionOutput {
    /// Create an output sending `value` of `asset_id` to `script_hash`.
    ///
    /// # Arguments
    /// * `asset_id` - The asset to transfer.
    /// * `value` - The amount.
    /// * `script_hash` - The receiving account's script hash.
    ///
    /// # Returns
    /// A new `TransactionOutput`.
    pub fn new(asset_id: Hash256, value: Fixed8, script_hash: ScriptHash) -> Self {
        TransactionOutput { asset_id, value, script_hash }
    }

    /// Create an output addressed by a Base58Check address string.
    ///
    /// # Arguments
    /// * `asset_id` - The asset to transfer.
    /// * `value` - The amount.
    /// * `address` - The receiving account's address.
    ///
    /// # Returns
    /// A new `TransactionOutput`, or an error for malformed addresses.
    pub fn pay_to_address(
        asset_id: Hash256,
        value: Fixed8,
        address: &str,
    ) -> Result<Self, TransactionError> {
        Ok(TransactionOutput {
            asset_id,
            value,
            script_hash: ScriptHash::from_address(address)?,
        })
    }
}

impl Serializable for TransactionOutput {
    type Error = TransactionError;

    fn write_to(&self, writer: &mut BhpWriter) {
        self.asset_id.write_to(writer);
        self.value.write_to(writer);
        self.script_hash.write_to(writer);
    }

    fn read_from(reader: &mut BhpReader<'_>) -> Result<Self, Self::Error> {
        let asset_id = Hash256::read_from(reader)?;
        let value = Fixed8::read_from(reader)?;
        let script_hash = ScriptHash::read_from(reader)?;
        Ok(TransactionOutput { asset_id, value, script_hash })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    const GOVERNING_TOKEN: &str =
        "c56f33fc6ecfcd0c225c4ab356fee59390af8560be0e930faebe74a6daff7c9b";

    #[test]
    fn test_serialization() {
        let output = TransactionOutput::pay_to_address(
            Hash256::from_hex(GOVERNING_TOKEN).unwrap(),
            Fixed8::from_str("1").unwrap(),
            "AJQ6FoaSXDFzA6wLnyZ1nFN7SGSN2oNTc3",
        )
        .unwrap();
        assert_eq!(
            hex::encode(output.to_bytes()),
            "9b7cffdaa674beae0f930ebe6085af9093e5fe56b34a5c220ccdcf6efc336fc5\
             00e1f505000000001cc9c05cefffe6cdd7b182816a9152ec218d2ec0"
        );
    }

    #[test]
    fn test_roundtrip() {
        let output = TransactionOutput::pay_to_address(
            Hash256::from_hex(GOVERNING_TOKEN).unwrap(),
            Fixed8::from_str("25").unwrap(),
            "AK2nJJpJr6o664CWJKi1QRXjqeic2zRp8y",
        )
        .unwrap();
        let bytes = output.to_bytes();
        assert_eq!(bytes.len(), 60);

        let mut reader = BhpReader::new(&bytes);
        let back = TransactionOutput::read_from(&mut reader).unwrap();
        assert_eq!(back, output);
    }
}
