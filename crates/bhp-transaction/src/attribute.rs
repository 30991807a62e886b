//! Transaction attributes.
//!
//! Attributes attach auxiliary data to a transaction. Each attribute is a
//! usage byte followed by data whose wire form depends on the usage: fixed
//! 20 or 32 raw bytes, a u8-prefixed URL, or VarBytes.

use bhp_primitives::io::{BhpReader, BhpWriter, Serializable};

use crate::TransactionError;

/// The usage tag of a transaction attribute.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AttributeUsage {
    /// Hash of a contract related to the transaction (32 bytes).
    ContractHash,
    /// ECDH key material, prefix 0x02 (32 bytes).
    Ecdh02,
    /// ECDH key material, prefix 0x03 (32 bytes).
    Ecdh03,
    /// Script hash of an account that must witness the transaction
    /// (20 bytes).
    Script,
    /// Voting payload (32 bytes).
    Vote,
    /// URL of an off-chain description (u8 length prefix).
    DescriptionUrl,
    /// Free-form description (VarBytes).
    Description,
    /// Extra hash slot 1 through 15 (32 bytes each).
    Hash(u8),
    /// Free-form remark slot 0 through 15 (VarBytes each).
    Remark(u8),
}

impl AttributeUsage {
    /// Return the wire byte for this usage.
    pub fn type_byte(&self) -> u8 {
        match self {
            AttributeUsage::ContractHash => 0x00,
            AttributeUsage::Ecdh02 => 0x02,
            AttributeUsage::Ecdh03 => 0x03,
            AttributeUsage::Script => 0x20,
            AttributeUsage::Vote => 0x30,
            AttributeUsage::DescriptionUrl => 0x81,
            AttributeUsage::Description => 0x90,
            AttributeUsage::Hash(n) => 0xa0 + n,
            AttributeUsage::Remark(n) => 0xf0 + n,
        }
    }

    /// Parse a usage from its wire byte.
    ///
    /// # Arguments
    /// * `byte` - The usage byte.
    ///
    /// # Returns
    /// The usage, or an error for unknown bytes.
    pub fn from_byte(byte: u8) -> Result<Self, TransactionError> {
        match byte {
            0x00 => Ok(AttributeUsage::ContractHash),
            0x02 => Ok(AttributeUsage::Ecdh02),
            0x03 => Ok(AttributeUsage::Ecdh03),
            0x20 => Ok(AttributeUsage::Script),
            0x30 => Ok(AttributeUsage::Vote),
            0x81 => Ok(AttributeUsage::DescriptionUrl),
            0x90 => Ok(AttributeUsage::Description),
            0xa1..=0xaf => Ok(AttributeUsage::Hash(byte - 0xa0)),
            0xf0..=0xff => Ok(AttributeUsage::Remark(byte - 0xf0)),
            b => Err(TransactionError::UnknownAttributeUsage(b)),
        }
    }

    /// Return the fixed data length required by this usage, if any.
    ///
    /// # Returns
    /// `Some(len)` for fixed-width usages, `None` for variable-length ones.
    fn fixed_data_len(&self) -> Option<usize> {
        match self {
            AttributeUsage::ContractHash
            | AttributeUsage::Ecdh02
            | AttributeUsage::Ecdh03
            | AttributeUsage::Vote
            | AttributeUsage::Hash(_) => Some(32),
            AttributeUsage::Script => Some(20),
            AttributeUsage::DescriptionUrl
            | AttributeUsage::Description
            | AttributeUsage::Remark(_) => None,
        }
    }
}

/// A single transaction attribute: a usage tag and its data.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct TransactionAttribute {
    usage: AttributeUsage,
    data: Vec<u8>,
}

impl TransactionAttribute {
    /// Create an attribute, validating the data against the usage's rules.
    ///
    /// Fixed-width usages require data of exactly the declared size;
    /// `DescriptionUrl` data must fit a u8 length; VarBytes usages accept
    /// any length. `Hash` slots must lie in 1..=15 and `Remark` slots in
    /// 0..=15 so that the usage maps to a wire tag in its own range.
    ///
    /// # Arguments
    /// * `usage` - The usage tag.
    /// * `data` - The attribute payload.
    ///
    /// # Returns
    /// The attribute, or an error for ill-sized data or an out-of-range
    /// slot.
    pub fn new(usage: AttributeUsage, data: Vec<u8>) -> Result<Self, TransactionError> {
        match usage {
            AttributeUsage::Hash(n) if !(1..=15).contains(&n) => {
                return Err(TransactionError::InvalidAttributeData(format!(
                    "hash attribute slot {} is outside 1..=15",
                    n
                )));
            }
            AttributeUsage::Remark(n) if n > 15 => {
                return Err(TransactionError::InvalidAttributeData(format!(
                    "remark attribute slot {} is outside 0..=15",
                    n
                )));
            }
            _ => {}
        }
        if let Some(len) = usage.fixed_data_len() {
            if data.len() != len {
                return Err(TransactionError::InvalidAttributeData(format!(
                    "usage 0x{:02x} requires {} bytes, got {}",
                    usage.type_byte(),
                    len,
                    data.len()
                )));
            }
        }
        if usage == AttributeUsage::DescriptionUrl && data.len() > u8::MAX as usize {
            return Err(TransactionError::InvalidAttributeData(format!(
                "description url of {} bytes exceeds the u8 length prefix",
                data.len()
            )));
        }
        Ok(TransactionAttribute { usage, data })
    }

    /// Create a `Script` attribute naming a witnessing account.
    ///
    /// # Arguments
    /// * `script_hash` - The account's 20-byte script hash (wire order).
    pub fn script(script_hash: &bhp_script::ScriptHash) -> Self {
        TransactionAttribute {
            usage: AttributeUsage::Script,
            data: script_hash.to_vec(),
        }
    }

    /// Create a `Remark` attribute in slot 0.
    ///
    /// # Arguments
    /// * `data` - Free-form remark bytes.
    pub fn remark(data: Vec<u8>) -> Self {
        TransactionAttribute {
            usage: AttributeUsage::Remark(0),
            data,
        }
    }

    /// Return the usage tag.
    pub fn usage(&self) -> AttributeUsage {
        self.usage
    }

    /// Return the attribute payload.
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

impl Serializable for TransactionAttribute {
    type Error = TransactionError;

    fn write_to(&self, writer: &mut BhpWriter) {
        writer.write_u8(self.usage.type_byte());
        match self.usage {
            AttributeUsage::DescriptionUrl => {
                writer.write_u8(self.data.len() as u8);
                writer.write_bytes(&self.data);
            }
            AttributeUsage::Description | AttributeUsage::Remark(_) => {
                writer.write_var_bytes(&self.data);
            }
            _ => writer.write_bytes(&self.data),
        }
    }

    fn read_from(reader: &mut BhpReader<'_>) -> Result<Self, Self::Error> {
        let usage = AttributeUsage::from_byte(reader.read_u8()?)?;
        let data = match usage.fixed_data_len() {
            Some(len) => reader.read_bytes(len)?.to_vec(),
            None => match usage {
                AttributeUsage::DescriptionUrl => {
                    let len = reader.read_u8()? as usize;
                    reader.read_bytes(len)?.to_vec()
                }
                _ => reader.read_var_bytes()?,
            },
        };
        Ok(TransactionAttribute { usage, data })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bhp_script::ScriptHash;

    #[test]
    fn test_usage_byte_roundtrip() {
        for usage in [
            AttributeUsage::ContractHash,
            AttributeUsage::Ecdh02,
            AttributeUsage::Ecdh03,
            AttributeUsage::Script,
            AttributeUsage::Vote,
            AttributeUsage::DescriptionUrl,
            AttributeUsage::Description,
            AttributeUsage::Hash(1),
            AttributeUsage::Hash(15),
            AttributeUsage::Remark(0),
            AttributeUsage::Remark(15),
        ] {
            assert_eq!(AttributeUsage::from_byte(usage.type_byte()).unwrap(), usage);
        }
        assert!(AttributeUsage::from_byte(0x01).is_err());
        assert!(AttributeUsage::from_byte(0x40).is_err());
    }

    #[test]
    fn test_script_attribute_serialization() {
        let hash = ScriptHash::from_address("AK2nJJpJr6o664CWJKi1QRXjqeic2zRp8y").unwrap();
        let attr = TransactionAttribute::script(&hash);
        assert_eq!(
            hex::encode(attr.to_bytes()),
            "2023ba2703c53263e8d6e522dc32203339dcd8eee9"
        );

        let bytes = attr.to_bytes();
        let mut reader = BhpReader::new(&bytes);
        let back = TransactionAttribute::read_from(&mut reader).unwrap();
        assert_eq!(back, attr);
    }

    #[test]
    fn test_remark_attribute_serialization() {
        let attr = TransactionAttribute::remark(b"hello".to_vec());
        assert_eq!(hex::encode(attr.to_bytes()), "f00568656c6c6f");

        let bytes = attr.to_bytes();
        let mut reader = BhpReader::new(&bytes);
        let back = TransactionAttribute::read_from(&mut reader).unwrap();
        assert_eq!(back.data(), b"hello");
    }

    #[test]
    fn test_fixed_width_validation() {
        assert!(TransactionAttribute::new(AttributeUsage::Vote, vec![0u8; 32]).is_ok());
        assert!(TransactionAttribute::new(AttributeUsage::Vote, vec![0u8; 31]).is_err());
        assert!(TransactionAttribute::new(AttributeUsage::Script, vec![0u8; 21]).is_err());
        assert!(
            TransactionAttribute::new(AttributeUsage::DescriptionUrl, vec![0u8; 256]).is_err()
        );
        assert!(TransactionAttribute::new(AttributeUsage::Remark(3), vec![0u8; 300]).is_ok());
    }

    #[test]
    fn test_slot_range_validation() {
        assert!(TransactionAttribute::new(AttributeUsage::Hash(1), vec![0u8; 32]).is_ok());
        assert!(TransactionAttribute::new(AttributeUsage::Hash(15), vec![0u8; 32]).is_ok());
        // Slot 0 would encode tag 0xa0, which is not a hash usage.
        assert!(TransactionAttribute::new(AttributeUsage::Hash(0), vec![0u8; 32]).is_err());
        assert!(TransactionAttribute::new(AttributeUsage::Hash(16), vec![0u8; 32]).is_err());
        assert!(TransactionAttribute::new(AttributeUsage::Remark(15), Vec::new()).is_ok());
        assert!(TransactionAttribute::new(AttributeUsage::Remark(16), Vec::new()).is_err());
    }

    #[test]
    fn test_description_url_serialization() {
        let attr =
            TransactionAttribute::new(AttributeUsage::DescriptionUrl, b"https://bhpa.io".to_vec())
                .unwrap();
        let bytes = attr.to_bytes();
        assert_eq!(bytes[0], 0x81);
        assert_eq!(bytes[1], 15);

        let mut reader = BhpReader::new(&bytes);
        let back = TransactionAttribute::read_from(&mut reader).unwrap();
        assert_eq!(back, attr);
    }
}
