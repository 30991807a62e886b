//! Fixed-point decimal type for on-chain amounts.
//!
//! All asset values and fees on the chain are `Fixed8`: a signed 64-bit
//! integer counting 10^-8 fractional units, serialized as 8 little-endian
//! bytes. Decimal parsing and formatting never go through floating point.

use std::fmt;
use std::str::FromStr;
use crate::io::{BhpReader, BhpWriter, Serializable};
use crate::PrimitivesError;

/// Number of fractional units per whole coin (10^8).
pub const FRACTIONAL_UNITS: i64 = 100_000_000;

/// Maximum number of decimal places a `Fixed8` can represent.
pub const DECIMALS: u32 = 8;

/// A fixed-point decimal amount with 8 decimal places.
///
/// The raw value counts 10^-8 units, so `Fixed8::from_int(1)` equals
/// 100,000,000 raw units. Arithmetic helpers are checked; the wire form
/// is the raw value as a little-endian i64.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct Fixed8(i64);

impl Fixed8 {
    /// The zero amount.
    pub const ZERO: Fixed8 = Fixed8(0);

    /// Create a Fixed8 from a raw count of 10^-8 units.
    ///
    /// # Arguments
    /// * `raw` - The raw unit count.
    ///
    /// # Returns
    /// A new `Fixed8`.
    pub const fn from_raw(raw: i64) -> Self {
        Fixed8(raw)
    }

    /// Create a Fixed8 from a whole-coin integer value.
    ///
    /// # Arguments
    /// * `value` - The whole-coin amount.
    ///
    /// # Returns
    /// `Ok(Fixed8)` or an error if the scaled value overflows i64.
    pub fn from_int(value: i64) -> Result<Self, PrimitivesError> {
        value
            .checked_mul(FRACTIONAL_UNITS)
            .map(Fixed8)
            .ok_or_else(|| PrimitivesError::InvalidFixed8(
                format!("integer value {} overflows", value)
            ))
    }

    /// Return the raw count of 10^-8 units.
    ///
    /// # Returns
    /// The raw i64 value.
    pub fn raw(&self) -> i64 {
        self.0
    }

    /// Checked addition.
    ///
    /// # Returns
    /// `Some(Fixed8)` or `None` on overflow.
    pub fn checked_add(self, other: Fixed8) -> Option<Fixed8> {
        self.0.checked_add(other.0).map(Fixed8)
    }

    /// Checked subtraction.
    ///
    /// # Returns
    /// `Some(Fixed8)` or `None` on overflow.
    pub fn checked_sub(self, other: Fixed8) -> Option<Fixed8> {
        self.0.checked_sub(other.0).map(Fixed8)
    }

    /// Check whether the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check whether the amount is strictly positive.
    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }
}

/// Format as a decimal string with trailing fractional zeros trimmed.
///
/// Whole amounts render without a decimal point: raw 150_000_000 is "1.5",
/// raw 100_000_000 is "1".
impl fmt::Display for Fixed8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let magnitude = self.0.unsigned_abs();
        let whole = magnitude / FRACTIONAL_UNITS as u64;
        let frac = magnitude % FRACTIONAL_UNITS as u64;
        if frac == 0 {
            write!(f, "{}{}", sign, whole)
        } else {
            let frac_str = format!("{:08}", frac);
            write!(f, "{}{}.{}", sign, whole, frac_str.trim_end_matches('0'))
        }
    }
}

/// Parse a decimal string such as "1", "0.001", or "-2.5".
///
/// At most 8 fractional digits are accepted; parsing uses checked integer
/// arithmetic throughout.
impl FromStr for Fixed8 {
    type Err = PrimitivesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PrimitivesError::InvalidFixed8(s.to_string());

        let (negative, body) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        if body.is_empty() {
            return Err(invalid());
        }

        let (whole_str, frac_str) = match body.split_once('.') {
            Some((w, f)) => (w, f),
            None => (body, ""),
        };
        if whole_str.is_empty() && frac_str.is_empty() {
            return Err(invalid());
        }
        if frac_str.len() > DECIMALS as usize {
            return Err(PrimitivesError::InvalidFixed8(
                format!("{}: more than {} decimal places", s, DECIMALS)
            ));
        }

        let whole: i64 = if whole_str.is_empty() {
            0
        } else {
            whole_str.parse().map_err(|_| invalid())?
        };
        if whole < 0 {
            // The minus sign was already stripped above.
            return Err(invalid());
        }

        let frac: i64 = if frac_str.is_empty() {
            0
        } else {
            let digits: i64 = frac_str.parse().map_err(|_| invalid())?;
            digits * 10i64.pow(DECIMALS - frac_str.len() as u32)
        };

        let raw = whole
            .checked_mul(FRACTIONAL_UNITS)
            .and_then(|w| w.checked_add(frac))
            .ok_or_else(invalid)?;
        Ok(Fixed8(if negative { -raw } else { raw }))
    }
}

impl Serializable for Fixed8 {
    type Error = PrimitivesError;

    fn write_to(&self, writer: &mut BhpWriter) {
        writer.write_i64_le(self.0);
    }

    fn read_from(reader: &mut BhpReader<'_>) -> Result<Self, Self::Error> {
        Ok(Fixed8(reader.read_i64_le()?))
    }
}
