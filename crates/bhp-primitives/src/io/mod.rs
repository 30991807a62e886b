//! Binary serialization for BHP protocol data.
//!
//! Provides VarInt encoding/decoding, `BhpReader` and `BhpWriter` structs
//! for reading/writing BHP protocol binary data, and the `Serializable`
//! trait implemented by every wire-format entity. All multi-byte integers
//! are little-endian.

use crate::PrimitivesError;

// ---------------------------------------------------------------------------
// VarInt
// ---------------------------------------------------------------------------

/// A BHP protocol variable-length integer.
///
/// VarInt is used in transaction data to indicate the number of upcoming
/// fields or the length of an upcoming field. The encoding uses 1, 3, 5, or
/// 9 bytes depending on the magnitude of the value: values below 0xFD are a
/// single byte, larger values carry a 0xFD/0xFE/0xFF marker followed by a
/// little-endian u16/u32/u64.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VarInt(pub u64);

impl VarInt {
    /// Return the wire-format byte length of this VarInt.
    ///
    /// # Returns
    /// 1, 3, 5, or 9 depending on the value.
    pub fn length(&self) -> usize {
        if self.0 < 0xfd {
            1
        } else if self.0 <= 0xffff {
            3
        } else if self.0 <= 0xffff_ffff {
            5
        } else {
            9
        }
    }

    /// Encode the VarInt into a new byte vector.
    ///
    /// # Returns
    /// A `Vec<u8>` of 1, 3, 5, or 9 bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let v = self.0;
        if v < 0xfd {
            vec![v as u8]
        } else if v <= 0xffff {
            let mut buf = vec![0xfd];
            buf.extend_from_slice(&(v as u16).to_le_bytes());
            buf
        } else if v <= 0xffff_ffff {
            let mut buf = vec![0xfe];
            buf.extend_from_slice(&(v as u32).to_le_bytes());
            buf
        } else {
            let mut buf = vec![0xff];
            buf.extend_from_slice(&v.to_le_bytes());
            buf
        }
    }

    /// Return the underlying u64 value.
    ///
    /// # Returns
    /// The integer value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for VarInt {
    fn from(v: u64) -> Self {
        VarInt(v)
    }
}

impl From<usize> for VarInt {
    fn from(v: usize) -> Self {
        VarInt(v as u64)
    }
}

// ---------------------------------------------------------------------------
// Serializable
// ---------------------------------------------------------------------------

/// A wire-format entity that can be written to a `BhpWriter` and read back
/// from a `BhpReader`.
///
/// Writing is infallible; reading fails on truncated or malformed input
/// with a crate-specific error that converts from `PrimitivesError`.
pub trait Serializable: Sized {
    /// The error type produced on deserialization failure.
    type Error: From<PrimitivesError>;

    /// Write the wire representation of `self` into the writer.
    fn write_to(&self, writer: &mut BhpWriter);

    /// Read one value from the reader, advancing its position.
    fn read_from(reader: &mut BhpReader<'_>) -> Result<Self, Self::Error>;

    /// Serialize into a fresh byte vector.
    ///
    /// # Returns
    /// The wire bytes of `self`.
    fn to_bytes(&self) -> Vec<u8> {
        let mut writer = BhpWriter::new();
        self.write_to(&mut writer);
        writer.into_bytes()
    }
}

// ---------------------------------------------------------------------------
// BhpReader
// ---------------------------------------------------------------------------

/// A cursor-based reader for BHP protocol binary data.
///
/// Wraps a byte slice and maintains a read position, providing methods
/// to read fixed-size integers, VarInt values, and length-prefixed data
/// in little-endian order.
pub struct BhpReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> BhpReader<'a> {
    /// Create a new reader over the given byte slice.
    ///
    /// # Arguments
    /// * `data` - The byte slice to read from.
    ///
    /// # Returns
    /// A `BhpReader` positioned at the start of the data.
    pub fn new(data: &'a [u8]) -> Self {
        BhpReader { data, pos: 0 }
    }

    /// Read `n` bytes and advance the position.
    ///
    /// # Arguments
    /// * `n` - Number of bytes to read.
    ///
    /// # Returns
    /// A byte slice of length `n`, or an error if insufficient data remains.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], PrimitivesError> {
        // A hostile length prefix can make `pos + n` overflow.
        let end = self
            .pos
            .checked_add(n)
            .filter(|&end| end <= self.data.len())
            .ok_or(PrimitivesError::UnexpectedEof)?;
        let slice = &self.data[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    /// Read a single byte and advance the position.
    ///
    /// # Returns
    /// The byte value, or an error if no data remains.
    pub fn read_u8(&mut self) -> Result<u8, PrimitivesError> {
        let bytes = self.read_bytes(1)?;
        Ok(bytes[0])
    }

    /// Read a boolean encoded as a single byte.
    ///
    /// # Returns
    /// `false` for 0x00, `true` for any other value.
    pub fn read_bool(&mut self) -> Result<bool, PrimitivesError> {
        Ok(self.read_u8()? != 0)
    }

    /// Read a little-endian u16 and advance the position by 2 bytes.
    ///
    /// # Returns
    /// The decoded u16, or an error if insufficient data.
    pub fn read_u16_le(&mut self) -> Result<u16, PrimitivesError> {
        let bytes = self.read_bytes(2)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    /// Read a little-endian u32 and advance the position by 4 bytes.
    ///
    /// # Returns
    /// The decoded u32, or an error if insufficient data.
    pub fn read_u32_le(&mut self) -> Result<u32, PrimitivesError> {
        let bytes = self.read_bytes(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Read a little-endian u64 and advance the position by 8 bytes.
    ///
    /// # Returns
    /// The decoded u64, or an error if insufficient data.
    pub fn read_u64_le(&mut self) -> Result<u64, PrimitivesError> {
        let bytes = self.read_bytes(8)?;
        Ok(u64::from_le_bytes([
            bytes[0], bytes[1], bytes[2], bytes[3],
            bytes[4], bytes[5], bytes[6], bytes[7],
        ]))
    }

    /// Read a little-endian i64 and advance the position by 8 bytes.
    ///
    /// # Returns
    /// The decoded i64, or an error if insufficient data.
    pub fn read_i64_le(&mut self) -> Result<i64, PrimitivesError> {
        Ok(self.read_u64_le()? as i64)
    }

    /// Read a VarInt and advance the position accordingly.
    ///
    /// # Returns
    /// The decoded `VarInt`, or an error if insufficient data.
    pub fn read_varint(&mut self) -> Result<VarInt, PrimitivesError> {
        let first = self.read_u8()?;
        match first {
            0xff => {
                let val = self.read_u64_le()?;
                Ok(VarInt(val))
            }
            0xfe => {
                let val = self.read_u32_le()? as u64;
                Ok(VarInt(val))
            }
            0xfd => {
                let val = self.read_u16_le()? as u64;
                Ok(VarInt(val))
            }
            b => Ok(VarInt(b as u64)),
        }
    }

    /// Read a VarBytes value: a VarInt length followed by that many bytes.
    ///
    /// # Returns
    /// The payload bytes, or an error if insufficient data.
    pub fn read_var_bytes(&mut self) -> Result<Vec<u8>, PrimitivesError> {
        let len = self.read_varint()?.value() as usize;
        Ok(self.read_bytes(len)?.to_vec())
    }

    /// Read a fixed-length string field of `len` bytes.
    ///
    /// Trailing zero padding is stripped; the remaining bytes must be
    /// valid UTF-8.
    ///
    /// # Arguments
    /// * `len` - The declared field width in bytes.
    ///
    /// # Returns
    /// The decoded string, or an error on truncation or invalid UTF-8.
    pub fn read_fixed_string(&mut self, len: usize) -> Result<String, PrimitivesError> {
        let bytes = self.read_bytes(len)?;
        let end = bytes.iter().rposition(|&b| b != 0).map_or(0, |p| p + 1);
        String::from_utf8(bytes[..end].to_vec())
            .map_err(|e| PrimitivesError::InvalidString(e.to_string()))
    }

    /// Read a VarInt element count followed by that many serialized values.
    ///
    /// # Returns
    /// The decoded elements, or the element type's error on failure.
    pub fn read_serializable_list<S: Serializable>(&mut self) -> Result<Vec<S>, S::Error> {
        let count = self.read_varint().map_err(S::Error::from)?.value() as usize;
        let mut items = Vec::with_capacity(count.min(1024));
        for _ in 0..count {
            items.push(S::read_from(self)?);
        }
        Ok(items)
    }

    /// Return the number of bytes remaining.
    ///
    /// # Returns
    /// The count of unread bytes.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }
}

// ---------------------------------------------------------------------------
// BhpWriter
// ---------------------------------------------------------------------------

/// A buffer-based writer for BHP protocol binary data.
///
/// Wraps a `Vec<u8>` and provides methods to append fixed-size integers,
/// VarInt values, and length-prefixed data in little-endian order.
pub struct BhpWriter {
    buf: Vec<u8>,
}

impl BhpWriter {
    /// Create a new empty writer.
    ///
    /// # Returns
    /// A `BhpWriter` with an empty internal buffer.
    pub fn new() -> Self {
        BhpWriter { buf: Vec::new() }
    }

    /// Create a new writer with a pre-allocated capacity.
    ///
    /// # Arguments
    /// * `capacity` - Initial byte capacity of the internal buffer.
    ///
    /// # Returns
    /// A `BhpWriter` with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        BhpWriter { buf: Vec::with_capacity(capacity) }
    }

    /// Append raw bytes to the buffer.
    ///
    /// # Arguments
    /// * `bytes` - The bytes to append.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Append a single byte to the buffer.
    ///
    /// # Arguments
    /// * `val` - The byte value.
    pub fn write_u8(&mut self, val: u8) {
        self.buf.push(val);
    }

    /// Append a boolean as a single byte (0x01 or 0x00).
    ///
    /// # Arguments
    /// * `val` - The boolean value.
    pub fn write_bool(&mut self, val: bool) {
        self.buf.push(val as u8);
    }

    /// Append a little-endian u16 (2 bytes) to the buffer.
    ///
    /// # Arguments
    /// * `val` - The u16 value.
    pub fn write_u16_le(&mut self, val: u16) {
        self.buf.extend_from_slice(&val.to_le_bytes());
    }

    /// Append a little-endian u32 (4 bytes) to the buffer.
    ///
    /// # Arguments
    /// * `val` - The u32 value.
    pub fn write_u32_le(&mut self, val: u32) {
        self.buf.extend_from_slice(&val.to_le_bytes());
    }

    /// Append a little-endian u64 (8 bytes) to the buffer.
    ///
    /// # Arguments
    /// * `val` - The u64 value.
    pub fn write_u64_le(&mut self, val: u64) {
        self.buf.extend_from_slice(&val.to_le_bytes());
    }

    /// Append a little-endian i64 (8 bytes) to the buffer.
    ///
    /// # Arguments
    /// * `val` - The i64 value.
    pub fn write_i64_le(&mut self, val: i64) {
        self.buf.extend_from_slice(&val.to_le_bytes());
    }

    /// Append a VarInt to the buffer.
    ///
    /// # Arguments
    /// * `varint` - The VarInt value to encode and append.
    pub fn write_varint(&mut self, varint: VarInt) {
        let bytes = varint.to_bytes();
        self.buf.extend_from_slice(&bytes);
    }

    /// Append a VarBytes value: a VarInt length followed by the bytes.
    ///
    /// # Arguments
    /// * `bytes` - The payload bytes.
    pub fn write_var_bytes(&mut self, bytes: &[u8]) {
        self.write_varint(VarInt::from(bytes.len()));
        self.buf.extend_from_slice(bytes);
    }

    /// Append a fixed-length string field of `len` bytes.
    ///
    /// The string's UTF-8 bytes are written and zero-padded up to `len`.
    ///
    /// # Arguments
    /// * `val` - The string value.
    /// * `len` - The declared field width in bytes.
    ///
    /// # Returns
    /// An error if the string's UTF-8 encoding exceeds `len` bytes.
    pub fn write_fixed_string(&mut self, val: &str, len: usize) -> Result<(), PrimitivesError> {
        let bytes = val.as_bytes();
        if bytes.len() > len {
            return Err(PrimitivesError::FixedStringTooLong {
                declared: len,
                got: bytes.len(),
            });
        }
        self.buf.extend_from_slice(bytes);
        self.buf.extend(std::iter::repeat(0u8).take(len - bytes.len()));
        Ok(())
    }

    /// Append a VarInt element count followed by each element's wire form.
    ///
    /// # Arguments
    /// * `items` - The elements to serialize.
    pub fn write_serializable_list<S: Serializable>(&mut self, items: &[S]) {
        self.write_varint(VarInt::from(items.len()));
        for item in items {
            item.write_to(self);
        }
    }

    /// Append a VarInt element count followed by each element as VarBytes.
    ///
    /// Each element is serialized to its own buffer and written with its
    /// own VarInt length prefix.
    ///
    /// # Arguments
    /// * `items` - The elements to serialize.
    pub fn write_serializable_list_prefixed<S: Serializable>(&mut self, items: &[S]) {
        self.write_varint(VarInt::from(items.len()));
        for item in items {
            self.write_var_bytes(&item.to_bytes());
        }
    }

    /// Consume the writer and return the accumulated bytes.
    ///
    /// # Returns
    /// The internal byte buffer.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Return a reference to the current buffer contents.
    ///
    /// # Returns
    /// A byte slice of the written data.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Return the current length of the buffer.
    ///
    /// # Returns
    /// The number of bytes written so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Check if the buffer is empty.
    ///
    /// # Returns
    /// `true` if no bytes have been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

impl Default for BhpWriter {
    fn default() -> Self {
        Self::new()
    }
}
