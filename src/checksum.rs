//! Additive complement checksum
//!
//! The sensor protects bytes 2..=17 of the payload with an 8-bit sum of
//! `0x100 - byte`. A frame is accepted when that sum equals `0x01`.
//!
//! This is a weak integrity check, not a CRC: it catches most single and
//! double bit flips from RF noise but offers no protection against
//! deliberate tampering or compensating errors.

use core::ops::RangeInclusive;

use crate::error::{DecodeError, Result};
use crate::frame::Payload;

/// Payload byte indices covered by the checksum
pub const CHECKSUM_SPAN: RangeInclusive<usize> = 2..=17;

/// Value the checksum must produce for an intact frame
pub const EXPECTED_CHECKSUM: u8 = 0x01;

/// Sum of `0x100 - byte` over `data`, masked to 8 bits
#[inline]
pub fn inverse_sum(data: &[u8]) -> u8 {
    data.iter()
        .fold(0u8, |acc, &byte| acc.wrapping_add(0u8.wrapping_sub(byte)))
}

/// Compute the checksum over [`CHECKSUM_SPAN`] of a payload
#[inline]
pub fn checksum(payload: &Payload) -> u8 {
    inverse_sum(&payload.as_bytes()[CHECKSUM_SPAN])
}

/// Verify the payload checksum
#[inline]
pub fn verify_checksum(payload: &Payload) -> Result<()> {
    if checksum(payload) != EXPECTED_CHECKSUM {
        return Err(DecodeError::ChecksumMismatch);
    }
    Ok(())
}
