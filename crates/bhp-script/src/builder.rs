//! Script builder emitting canonical push operations.
//!
//! Every piece of executable script in the SDK (verification scripts,
//! invocation scripts, deployment scripts) is produced through
//! `ScriptBuilder`, which always selects the smallest push encoding for
//! the data at hand.

use bhp_primitives::io::BhpWriter;

use crate::opcodes;
use crate::param::ContractParameter;
use crate::ScriptError;

/// Builds VM scripts by appending opcodes and canonical push operations.
pub struct ScriptBuilder {
    writer: BhpWriter,
}

impl ScriptBuilder {
    /// Create a new empty script builder.
    pub fn new() -> Self {
        ScriptBuilder { writer: BhpWriter::new() }
    }

    /// Append a raw opcode.
    ///
    /// # Arguments
    /// * `op` - The opcode byte.
    pub fn op_code(&mut self, op: u8) -> &mut Self {
        self.writer.write_u8(op);
        self
    }

    /// Append a data push using the smallest encoding.
    ///
    /// Up to 75 bytes use a direct-push opcode; longer payloads use
    /// PUSHDATA1/2/4 with a little-endian length prefix.
    ///
    /// # Arguments
    /// * `data` - The bytes to push.
    ///
    /// # Returns
    /// The builder, or an error if the data exceeds the 4-byte length
    /// prefix range.
    pub fn push_data(&mut self, data: &[u8]) -> Result<&mut Self, ScriptError> {
        let len = data.len();
        if len <= opcodes::PUSHBYTES75 as usize {
            self.writer.write_u8(len as u8);
        } else if len <= 0xff {
            self.writer.write_u8(opcodes::PUSHDATA1);
            self.writer.write_u8(len as u8);
        } else if len <= 0xffff {
            self.writer.write_u8(opcodes::PUSHDATA2);
            self.writer.write_u16_le(len as u16);
        } else if len <= 0xffff_ffff {
            self.writer.write_u8(opcodes::PUSHDATA4);
            self.writer.write_u32_le(len as u32);
        } else {
            return Err(ScriptError::DataTooBig);
        }
        self.writer.write_bytes(data);
        Ok(self)
    }

    /// Append an integer push.
    ///
    /// -1 and 0 through 16 map to dedicated opcodes; other values are
    /// pushed as their minimal little-endian two's-complement bytes.
    ///
    /// # Arguments
    /// * `value` - The integer value.
    pub fn push_integer(&mut self, value: i64) -> &mut Self {
        match value {
            -1 => {
                self.writer.write_u8(opcodes::PUSHM1);
            }
            0 => {
                self.writer.write_u8(opcodes::PUSH0);
            }
            1..=16 => {
                self.writer.write_u8(opcodes::PUSH1 + (value as u8 - 1));
            }
            _ => {
                let bytes = minimal_le_bytes(value);
                // At most 8 bytes, always within the direct-push range.
                self.writer.write_u8(bytes.len() as u8);
                self.writer.write_bytes(&bytes);
            }
        }
        self
    }

    /// Append a boolean push: PUSH1 for true, PUSH0 for false.
    ///
    /// # Arguments
    /// * `value` - The boolean value.
    pub fn push_bool(&mut self, value: bool) -> &mut Self {
        if value {
            self.writer.write_u8(opcodes::PUSH1);
        } else {
            self.writer.write_u8(opcodes::PUSH0);
        }
        self
    }

    /// Append a typed contract parameter push.
    ///
    /// Array parameters push their elements in reverse order followed by
    /// the element count and PACK, producing the array the callee expects
    /// on the stack.
    ///
    /// # Arguments
    /// * `param` - The parameter to push.
    ///
    /// # Returns
    /// The builder, or an error for malformed parameter content.
    pub fn push_param(&mut self, param: &ContractParameter) -> Result<&mut Self, ScriptError> {
        match param {
            ContractParameter::Signature(bytes) => {
                if bytes.len() != 64 {
                    return Err(ScriptError::InvalidParameter(
                        format!("signature must be 64 bytes, got {}", bytes.len())
                    ));
                }
                self.push_data(bytes)?;
            }
            ContractParameter::Bool(value) => {
                self.push_bool(*value);
            }
            ContractParameter::Integer(value) => {
                self.push_integer(*value);
            }
            ContractParameter::Hash160(hash) => {
                self.push_data(hash.as_bytes())?;
            }
            ContractParameter::Hash256(hash) => {
                self.push_data(hash.as_bytes())?;
            }
            ContractParameter::ByteArray(bytes) => {
                self.push_data(bytes)?;
            }
            ContractParameter::PublicKey(bytes) => {
                if bytes.len() != 33 {
                    return Err(ScriptError::InvalidParameter(
                        format!("public key must be 33 bytes, got {}", bytes.len())
                    ));
                }
                self.push_data(bytes)?;
            }
            ContractParameter::String(value) => {
                self.push_data(value.as_bytes())?;
            }
            ContractParameter::Array(elements) => {
                for element in elements.iter().rev() {
                    self.push_param(element)?;
                }
                self.push_integer(elements.len() as i64);
                self.op_code(opcodes::PACK);
            }
        }
        Ok(self)
    }

    /// Append pushes for a sequence of contract parameters, in order.
    ///
    /// # Arguments
    /// * `params` - The parameters to push.
    ///
    /// # Returns
    /// The builder, or the first parameter error encountered.
    pub fn push_params(&mut self, params: &[ContractParameter]) -> Result<&mut Self, ScriptError> {
        for param in params {
            self.push_param(param)?;
        }
        Ok(self)
    }

    /// Append a SYSCALL of the named interop service.
    ///
    /// # Arguments
    /// * `api` - The ASCII API name, e.g. "Bhp.Contract.Create".
    ///
    /// # Returns
    /// The builder, or an error if the name is empty or longer than the
    /// 1-byte length prefix allows.
    pub fn sys_call(&mut self, api: &str) -> Result<&mut Self, ScriptError> {
        let bytes = api.as_bytes();
        if bytes.is_empty() {
            return Err(ScriptError::InvalidApiName("empty".to_string()));
        }
        if bytes.len() > 0xff {
            return Err(ScriptError::InvalidApiName(
                format!("{} bytes exceeds length prefix", bytes.len())
            ));
        }
        self.writer.write_u8(opcodes::SYSCALL);
        self.writer.write_u8(bytes.len() as u8);
        self.writer.write_bytes(bytes);
        Ok(self)
    }

    /// Append an APPCALL of the contract with the given script hash.
    ///
    /// The 20 wire-order hash bytes follow the opcode directly, without
    /// a push prefix.
    ///
    /// # Arguments
    /// * `script_hash` - The target contract's script hash.
    pub fn app_call(&mut self, script_hash: &crate::ScriptHash) -> &mut Self {
        self.writer.write_u8(opcodes::APPCALL);
        self.writer.write_bytes(script_hash.as_bytes());
        self
    }

    /// Return the current script length in bytes.
    pub fn len(&self) -> usize {
        self.writer.len()
    }

    /// Check if no bytes have been emitted.
    pub fn is_empty(&self) -> bool {
        self.writer.is_empty()
    }

    /// Consume the builder and return the script bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.writer.into_bytes()
    }
}

impl Default for ScriptBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Minimal little-endian two's-complement encoding of an integer.
///
/// Trailing bytes are dropped while the sign bit of the new top byte
/// still encodes the correct sign.
fn minimal_le_bytes(value: i64) -> Vec<u8> {
    let mut bytes = value.to_le_bytes().to_vec();
    if value >= 0 {
        while bytes.len() > 1 && bytes[bytes.len() - 1] == 0x00
            && bytes[bytes.len() - 2] & 0x80 == 0
        {
            bytes.pop();
        }
    } else {
        while bytes.len() > 1 && bytes[bytes.len() - 1] == 0xff
            && bytes[bytes.len() - 2] & 0x80 != 0
        {
            bytes.pop();
        }
    }
    bytes
}
