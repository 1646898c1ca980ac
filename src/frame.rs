//! Preamble synchronization and payload extraction

use crate::bitbuffer::{BitBuffer, BitRow};
use crate::error::{DecodeError, Result};
use crate::{
    MAX_ROW_BITS, MIN_PAYLOAD_BITS, MIN_ROW_BITS, PAYLOAD_CAPACITY, PREAMBLE, PREAMBLE_BITS,
};

/// Fixed-capacity payload copied out of a row after the preamble
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Payload {
    bytes: [u8; PAYLOAD_CAPACITY],
    bits: usize,
}

impl Payload {
    /// Payload capacity in bytes
    pub const CAPACITY: usize = PAYLOAD_CAPACITY;

    /// Build a payload from already-aligned bytes
    ///
    /// Bytes beyond [`Self::CAPACITY`] are dropped. Fails with
    /// [`DecodeError::PayloadTooShort`] when fewer than 18 bytes are given.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let len = bytes.len().min(PAYLOAD_CAPACITY);
        if len * 8 < MIN_PAYLOAD_BITS {
            return Err(DecodeError::PayloadTooShort);
        }

        let mut payload = Self {
            bytes: [0u8; PAYLOAD_CAPACITY],
            bits: len * 8,
        };
        payload.bytes[..len].copy_from_slice(&bytes[..len]);
        Ok(payload)
    }

    /// Number of extracted bits
    #[inline]
    pub fn bits(&self) -> usize {
        self.bits
    }

    /// Number of whole bytes extracted
    #[inline]
    pub fn len(&self) -> usize {
        self.bits / 8
    }

    /// Check if fewer than eight bits were extracted
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits < 8
    }

    /// Whole extracted bytes
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len()]
    }
}

/// Find the preamble in `row` and return the bit offset just past it
#[inline]
pub fn locate_preamble(row: &BitRow) -> Result<usize> {
    row.search(0, &PREAMBLE, PREAMBLE_BITS)
        .map(|pos| pos + PREAMBLE_BITS)
        .ok_or(DecodeError::PreambleNotFound)
}

/// Check the row shape accepted by this protocol and return the single row
#[inline]
pub fn check_shape(buffer: &BitBuffer) -> Result<&BitRow> {
    if buffer.num_rows() != 1 {
        return Err(DecodeError::FrameLengthOutOfRange);
    }
    let row = buffer.row(0).ok_or(DecodeError::FrameLengthOutOfRange)?;
    if !(MIN_ROW_BITS..=MAX_ROW_BITS).contains(&row.bits()) {
        return Err(DecodeError::FrameLengthOutOfRange);
    }
    Ok(row)
}

/// Extract the payload that follows the preamble in `row`
///
/// The row shape is not checked here; see [`extract_payload`].
pub fn extract_from_row(row: &BitRow) -> Result<Payload> {
    let start = locate_preamble(row)?;
    let remaining = row.bits() - start;
    if remaining < MIN_PAYLOAD_BITS {
        return Err(DecodeError::PayloadTooShort);
    }

    let mut payload = Payload {
        bytes: [0u8; PAYLOAD_CAPACITY],
        bits: 0,
    };
    let len = remaining.min(PAYLOAD_CAPACITY * 8);
    payload.bits = row.extract_bytes(start, &mut payload.bytes, len);
    Ok(payload)
}

/// Validate the frame shape, synchronize on the preamble and copy out
/// up to 160 payload bits
#[inline]
pub fn extract_payload(buffer: &BitBuffer) -> Result<Payload> {
    extract_from_row(check_shape(buffer)?)
}
