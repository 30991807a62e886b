//! Transaction inputs.

use bhp_primitives::hash256::Hash256;
use bhp_primitives::io::{BhpReader, BhpWriter, Serializable};

use crate::TransactionError;

/// A reference to an unspent output of a previous transaction.
///
/// On the wire an input is the 32-byte previous transaction hash followed
/// by the little-endian u16 output index.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct TransactionInput {
    /// Hash of the transaction holding the output being spent.
    pub prev_hash: Hash256,
    /// Index of the output within that transaction.
    pub prev_index: u16,
}

impl TransactionInput {
    /// Create an input referencing an output of a previous transaction.
    ///
    /// # Arguments
    /// * `prev_hash` - The previous transaction's hash.
    /// * `prev_index` - The output index within that transaction.
    ///
    /// # Returns
    /// A new `TransactionInput`.
    pub fn new(prev_hash: Hash256, prev_index: u16) -> Self {
        TransactionInput { prev_hash, prev_index }
    }
}

impl Serializable for TransactionInput {
    type Error = TransactionError;

    fn write_to(&self, writer: &mut BhpWriter) {
        self.prev_hash.write_to(writer);
        writer.write_u16_le(self.prev_index);
    }

    fn read_from(reader: &mut BhpReader<'_>) -> Result<Self, Self::Error> {
        let prev_hash = Hash256::read_from(reader)?;
        let prev_index = reader.read_u16_le()?;
        Ok(TransactionInput { prev_hash, prev_index })
    }
}
