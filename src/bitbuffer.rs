//! Demodulated bit rows
//!
//! A [`BitBuffer`] holds the rows a pulse demodulator produced for one
//! transmission. Bits are packed MSB-first; each row carries its own bit
//! count, so the last byte of a row may be only partially used.
//!
//! Rows can also be written in the `{bits}hex` text notation used by
//! capture tools, with `/` separating rows:
//!
//! ```text
//! {12}ab3/{8}ff
//! ```

use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use crate::error::{DecodeError, Result};

/// Read bit `index` (MSB-first) from a packed byte slice
#[inline]
fn packed_bit(bytes: &[u8], index: usize) -> bool {
    (bytes[index / 8] >> (7 - index % 8)) & 1 != 0
}

/// One row of demodulated bits
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitRow {
    bytes: Vec<u8>,
    bits: usize,
}

impl BitRow {
    /// Create a row from packed bytes, keeping the first `bits` bits.
    ///
    /// The bit count is clamped to what `bytes` can hold.
    pub fn new(bytes: &[u8], bits: usize) -> Self {
        let bits = bits.min(bytes.len() * 8);
        let used = bits.div_ceil(8);
        let mut bytes = bytes[..used].to_vec();
        if bits % 8 != 0 {
            bytes[used - 1] &= 0xFF << (8 - bits % 8);
        }
        Self { bytes, bits }
    }

    /// Number of valid bits in the row
    #[inline]
    pub fn bits(&self) -> usize {
        self.bits
    }

    /// Packed bytes backing the row
    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Check if the row holds no bits
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Get the bit at `index`, or `None` past the end of the row
    #[inline]
    pub fn bit(&self, index: usize) -> Option<bool> {
        if index >= self.bits {
            return None;
        }
        Some(packed_bit(&self.bytes, index))
    }

    /// Append one bit to the end of the row
    pub fn push_bit(&mut self, bit: bool) {
        if self.bits % 8 == 0 {
            self.bytes.push(0);
        }
        if bit {
            let last = self.bytes.len() - 1;
            self.bytes[last] |= 0x80 >> (self.bits % 8);
        }
        self.bits += 1;
    }

    /// Find the first bit offset at or after `start` where the first
    /// `pattern_bits` bits of `pattern` occur.
    ///
    /// The match is bit-granular: the pattern may start at any offset.
    /// An empty pattern never matches.
    pub fn search(&self, start: usize, pattern: &[u8], pattern_bits: usize) -> Option<usize> {
        let pattern_bits = pattern_bits.min(pattern.len() * 8);
        if pattern_bits == 0 {
            return None;
        }
        let last = self.bits.checked_sub(pattern_bits)?;

        (start..=last).find(|&pos| {
            (0..pattern_bits).all(|i| packed_bit(&self.bytes, pos + i) == packed_bit(pattern, i))
        })
    }

    /// Copy `len_bits` bits starting at bit offset `start` into `out`,
    /// eight bits per byte, MSB-first.
    ///
    /// A trailing partial byte is left-aligned with its unused low bits
    /// cleared. The copy stops at the end of the row or of `out`,
    /// whichever comes first; returns the number of bits copied.
    pub fn extract_bytes(&self, start: usize, out: &mut [u8], len_bits: usize) -> usize {
        let available = self.bits.saturating_sub(start);
        let copied = len_bits.min(available).min(out.len() * 8);
        if copied == 0 {
            return 0;
        }

        let first = start / 8;
        let shift = start % 8;
        let nbytes = copied.div_ceil(8);

        for (i, slot) in out[..nbytes].iter_mut().enumerate() {
            let hi = self.bytes[first + i] << shift;
            let lo = if shift == 0 {
                0
            } else {
                self.bytes.get(first + i + 1).copied().unwrap_or(0) >> (8 - shift)
            };
            *slot = hi | lo;
        }

        let tail = copied % 8;
        if tail != 0 {
            out[nbytes - 1] &= 0xFF << (8 - tail);
        }

        copied
    }
}

impl fmt::Display for BitRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.bits)?;
        for byte in &self.bytes {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

/// All rows demodulated from one transmission
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitBuffer {
    rows: Vec<BitRow>,
}

impl BitBuffer {
    /// Create an empty buffer with no rows
    #[inline]
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Create a single-row buffer
    pub fn from_row(bytes: &[u8], bits: usize) -> Self {
        let mut buffer = Self::new();
        buffer.push_row(bytes, bits);
        buffer
    }

    /// Append a complete row
    pub fn push_row(&mut self, bytes: &[u8], bits: usize) {
        self.rows.push(BitRow::new(bytes, bits));
    }

    /// Start a new empty row for subsequent [`add_bit`](Self::add_bit) calls
    pub fn add_row(&mut self) {
        self.rows.push(BitRow::default());
    }

    /// Append a bit to the last row, starting the first row if needed
    pub fn add_bit(&mut self, bit: bool) {
        if self.rows.is_empty() {
            self.add_row();
        }
        if let Some(row) = self.rows.last_mut() {
            row.push_bit(bit);
        }
    }

    /// Number of rows
    #[inline]
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Bit count of `row`, zero when the row does not exist
    #[inline]
    pub fn bits_per_row(&self, row: usize) -> usize {
        self.rows.get(row).map_or(0, BitRow::bits)
    }

    /// Borrow a row
    #[inline]
    pub fn row(&self, row: usize) -> Option<&BitRow> {
        self.rows.get(row)
    }

    /// Bit `index` of `row`, `None` past the end of either
    #[inline]
    pub fn bit(&self, row: usize, index: usize) -> Option<bool> {
        self.rows.get(row)?.bit(index)
    }

    /// Borrow all rows
    #[inline]
    pub fn rows(&self) -> &[BitRow] {
        &self.rows
    }

    /// Bit-granular pattern search in `row`, see [`BitRow::search`]
    pub fn search(
        &self,
        row: usize,
        start: usize,
        pattern: &[u8],
        pattern_bits: usize,
    ) -> Option<usize> {
        self.rows.get(row)?.search(start, pattern, pattern_bits)
    }

    /// Bit extraction from `row`, see [`BitRow::extract_bytes`]
    pub fn extract_bytes(&self, row: usize, start: usize, out: &mut [u8], len_bits: usize) -> usize {
        self.rows
            .get(row)
            .map_or(0, |r| r.extract_bytes(start, out, len_bits))
    }
}

impl fmt::Display for BitBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{}", row)?;
        }
        Ok(())
    }
}

/// Parse one `{bits}hex` or plain hex row
fn parse_row(text: &str) -> Result<BitRow> {
    let text = text.trim();
    let (declared, hex) = match text.strip_prefix('{') {
        Some(rest) => {
            let close = rest.find('}').ok_or(DecodeError::InvalidBitString)?;
            let bits = rest[..close]
                .trim()
                .parse::<usize>()
                .map_err(|_| DecodeError::InvalidBitString)?;
            (Some(bits), &rest[close + 1..])
        }
        None => (None, text),
    };

    let mut bytes = Vec::with_capacity(hex.len() / 2 + 1);
    let mut nibbles = 0usize;
    for c in hex.chars().filter(|c| !c.is_whitespace()) {
        let nibble = c.to_digit(16).ok_or(DecodeError::InvalidBitString)? as u8;
        if nibbles % 2 == 0 {
            bytes.push(nibble << 4);
        } else {
            let last = bytes.len() - 1;
            bytes[last] |= nibble;
        }
        nibbles += 1;
    }

    let bits = match declared {
        Some(bits) if bits > nibbles * 4 => return Err(DecodeError::InvalidBitString),
        Some(bits) => bits,
        None => nibbles * 4,
    };

    Ok(BitRow::new(&bytes, bits))
}

impl FromStr for BitBuffer {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self> {
        let mut buffer = Self::new();
        if s.trim().is_empty() {
            return Ok(buffer);
        }
        for part in s.split('/') {
            buffer.rows.push(parse_row(part)?);
        }
        Ok(buffer)
    }
}
