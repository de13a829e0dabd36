//! Fixed-width bit sequences.
//!
//! A [`Bits`] value pairs an arbitrary-precision unsigned integer with an
//! explicit bit width. Bit 0 is the most significant bit, so a value reads
//! left to right the same way its binary string does:
//!
//! ```
//! use bittab::Bits;
//!
//! let bits: Bits = "0b1010".parse().unwrap();
//! assert_eq!(bits.len(), 4);
//! assert!(bits[0]);
//! assert!(!bits[1]);
//! assert_eq!(bits.as_hex(), "0A");
//! ```
//!
//! Values are immutable. The bitwise operators return new values:
//!
//! | Operator | Value            | Width                |
//! |----------|------------------|----------------------|
//! | `a \| b` | `a.val \| b.val` | `max(a.len, b.len)`  |
//! | `a & b`  | `a.val & b.val`  | `max(a.len, b.len)`  |
//! | `a << n` | `a.val << n`     | `a.len + n`          |
//! | `a >> n` | `a.val >> n`     | `a.len - n` (min 0)  |

use std::fmt;
use std::ops::{BitAnd, BitOr, Bound, Index, RangeBounds, Shl, Shr};
use std::str::FromStr;

use num_bigint::BigUint;

use crate::error::{BittabError, Result};

/// An immutable fixed-width bit sequence.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Bits {
    val: BigUint,
    len: usize,
}

impl Bits {
    /// Creates a new bit sequence from an unsigned value.
    ///
    /// # Arguments
    /// * `val` - The bit pattern
    /// * `len` - Explicit width in bits; `None` uses the number of
    ///   significant bits of `val` (at least 1)
    ///
    /// # Errors
    /// Returns `BittabError::ValueOutOfRange` if `val` does not fit in
    /// `len` bits.
    pub fn new(val: impl Into<BigUint>, len: Option<usize>) -> Result<Self> {
        let val = val.into();
        let significant = val.bits() as usize;
        let len = len.unwrap_or_else(|| significant.max(1));

        if significant > len {
            return Err(BittabError::ValueOutOfRange {
                value: val.to_string(),
                len,
            });
        }

        Ok(Self { val, len })
    }

    /// The zero-width sequence.
    pub fn empty() -> Self {
        Self {
            val: BigUint::default(),
            len: 0,
        }
    }

    /// Creates a bit sequence from a signed integer.
    ///
    /// # Errors
    /// Returns `BittabError::NegativeValue` for negative input, otherwise
    /// the same errors as [`Bits::new`].
    pub fn from_int(val: i128, len: Option<usize>) -> Result<Self> {
        if val < 0 {
            return Err(BittabError::NegativeValue(val));
        }
        Self::new(val as u128, len)
    }

    /// Parses a binary string such as `"1010"` or `"0b1010"`.
    ///
    /// The width is the number of digits, so leading zeros are kept.
    /// An empty digit string gives the empty sequence.
    pub fn from_bin(bin: &str) -> Result<Self> {
        let digits = bin.trim();
        let digits = digits
            .strip_prefix("0b")
            .or_else(|| digits.strip_prefix("0B"))
            .unwrap_or(digits);

        if digits.is_empty() {
            return Ok(Self::empty());
        }

        let val = digits
            .chars()
            .all(|c| c == '0' || c == '1')
            .then(|| BigUint::parse_bytes(digits.as_bytes(), 2))
            .flatten()
            .ok_or_else(|| BittabError::Parse(format!("Invalid binary string '{}'", bin)))?;
        Self::new(val, Some(digits.len()))
    }

    /// Parses a hexadecimal string such as `"0x1F"` or `"1f"`.
    ///
    /// Each digit contributes four bits to the width.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.trim();
        let digits = digits
            .strip_prefix("0x")
            .or_else(|| digits.strip_prefix("0X"))
            .unwrap_or(digits);

        if digits.is_empty() {
            return Ok(Self::empty());
        }

        let val = digits
            .chars()
            .all(|c| c.is_ascii_hexdigit())
            .then(|| BigUint::parse_bytes(digits.as_bytes(), 16))
            .flatten()
            .ok_or_else(|| BittabError::Parse(format!("Invalid hexadecimal string '{}'", hex)))?;
        Self::new(val, Some(digits.len() * 4))
    }

    /// Creates a bit sequence from raw bytes, eight bits per byte.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_hex(&hex::encode(bytes))
    }

    /// Creates a bit sequence from a list of booleans, most significant first.
    pub fn from_list(list: &[bool]) -> Self {
        let mut val = BigUint::default();
        for &bit in list {
            val <<= 1u32;
            if bit {
                val |= BigUint::from(1u8);
            }
        }
        Self {
            val,
            len: list.len(),
        }
    }

    /// Width in bits.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns bit `index`, counting from the most significant end.
    pub fn get(&self, index: usize) -> Option<bool> {
        if index >= self.len {
            return None;
        }
        Some(self.val.bit((self.len - index - 1) as u64))
    }

    /// Like [`Bits::get`] but reports out-of-range access as an error.
    pub fn try_get(&self, index: usize) -> Result<bool> {
        self.get(index).ok_or(BittabError::IndexOutOfRange {
            index,
            len: self.len,
        })
    }

    /// Returns the bits selected by `range` as a new sequence.
    ///
    /// Bounds are clamped to the width, so an out-of-range slice is empty
    /// rather than an error.
    pub fn slice<R: RangeBounds<usize>>(&self, range: R) -> Self {
        let start = match range.start_bound() {
            Bound::Included(&s) => s,
            Bound::Excluded(&s) => s.saturating_add(1),
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&e) => e.saturating_add(1),
            Bound::Excluded(&e) => e,
            Bound::Unbounded => self.len,
        };
        let end = end.min(self.len);
        if start >= end {
            return Self::empty();
        }

        let width = end - start;
        let mask = (BigUint::from(1u8) << width) - 1u8;
        let val = (&self.val >> (self.len - end)) & mask;
        Self { val, len: width }
    }

    /// Binary string, zero-padded to the full width.
    pub fn as_bin(&self) -> String {
        if self.len == 0 {
            return String::new();
        }
        format!("{:0>width$}", self.val.to_str_radix(2), width = self.len)
    }

    /// Uppercase hexadecimal string, two digits per started byte.
    pub fn as_hex(&self) -> String {
        let digits = 2 * self.byte_len();
        if digits == 0 {
            return String::new();
        }
        format!(
            "{:0>width$}",
            self.val.to_str_radix(16).to_uppercase(),
            width = digits
        )
    }

    pub fn as_int(&self) -> &BigUint {
        &self.val
    }

    /// The value as a `u64`, if it fits.
    pub fn to_u64(&self) -> Option<u64> {
        u64::try_from(&self.val).ok()
    }

    /// Big-endian bytes, left-padded to `ceil(len / 8)` bytes.
    pub fn as_bytes(&self) -> Vec<u8> {
        let size = self.byte_len();
        if size == 0 {
            return Vec::new();
        }
        let raw = self.val.to_bytes_be();
        let mut out = vec![0u8; size.saturating_sub(raw.len())];
        out.extend_from_slice(&raw);
        out
    }

    pub fn as_list(&self) -> Vec<bool> {
        (0..self.len)
            .map(|i| self.val.bit((self.len - i - 1) as u64))
            .collect()
    }

    fn byte_len(&self) -> usize {
        (self.len + 7) / 8
    }
}

impl Default for Bits {
    fn default() -> Self {
        Self::empty()
    }
}

impl FromStr for Bits {
    type Err = BittabError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.starts_with("0x") || trimmed.starts_with("0X") {
            Self::from_hex(trimmed)
        } else {
            Self::from_bin(trimmed)
        }
    }
}

impl From<&[bool]> for Bits {
    fn from(list: &[bool]) -> Self {
        Self::from_list(list)
    }
}

impl Index<usize> for Bits {
    type Output = bool;

    fn index(&self, index: usize) -> &bool {
        match self.get(index) {
            Some(true) => &true,
            Some(false) => &false,
            None => panic!(
                "bit index out of range: the width is {} but the index is {}",
                self.len, index
            ),
        }
    }
}

impl fmt::Display for Bits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_bin())
    }
}

impl fmt::Debug for Bits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bits('{}')", self.as_bin())
    }
}

impl BitOr for &Bits {
    type Output = Bits;

    fn bitor(self, rhs: &Bits) -> Bits {
        Bits {
            val: &self.val | &rhs.val,
            len: self.len.max(rhs.len),
        }
    }
}

impl BitOr for Bits {
    type Output = Bits;

    fn bitor(self, rhs: Bits) -> Bits {
        &self | &rhs
    }
}

impl BitAnd for &Bits {
    type Output = Bits;

    fn bitand(self, rhs: &Bits) -> Bits {
        Bits {
            val: &self.val & &rhs.val,
            len: self.len.max(rhs.len),
        }
    }
}

impl BitAnd for Bits {
    type Output = Bits;

    fn bitand(self, rhs: Bits) -> Bits {
        &self & &rhs
    }
}

impl Shl<usize> for &Bits {
    type Output = Bits;

    fn shl(self, rhs: usize) -> Bits {
        Bits {
            val: &self.val << rhs,
            len: self.len + rhs,
        }
    }
}

impl Shl<usize> for Bits {
    type Output = Bits;

    fn shl(self, rhs: usize) -> Bits {
        &self << rhs
    }
}

// Shifting past the width leaves the empty sequence.
impl Shr<usize> for &Bits {
    type Output = Bits;

    fn shr(self, rhs: usize) -> Bits {
        Bits {
            val: &self.val >> rhs,
            len: self.len.saturating_sub(rhs),
        }
    }
}

impl Shr<usize> for Bits {
    type Output = Bits;

    fn shr(self, rhs: usize) -> Bits {
        &self >> rhs
    }
}
