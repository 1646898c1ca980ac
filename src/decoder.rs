//! Single-frame decoder
//!
//! Decoding is a pure function of the captured rows: every call stands
//! alone and keeps no state between frames, so independent captures can
//! be decoded from any number of threads.

use crate::bitbuffer::BitBuffer;
use crate::checksum;
use crate::error::Result;
use crate::frame::{self, Payload};
use crate::reading::{self, Reading};

/// Staged decoder over a borrowed capture
///
/// Each stage can be run on its own for diagnostics; [`decode`](Self::decode)
/// runs them all in order.
#[derive(Debug, Clone, Copy)]
pub struct FrameDecoder<'a> {
    buf: &'a BitBuffer,
}

impl<'a> FrameDecoder<'a> {
    /// Create new decoder for the given capture
    #[inline]
    pub fn new(buf: &'a BitBuffer) -> Self {
        Self { buf }
    }

    /// Check the row shape, find the preamble and extract the payload
    #[inline]
    pub fn payload(&self) -> Result<Payload> {
        frame::extract_payload(self.buf)
    }

    /// Extract the payload and verify its checksum
    #[inline]
    pub fn verified_payload(&self) -> Result<Payload> {
        let payload = self.payload()?;
        checksum::verify_checksum(&payload)?;
        Ok(payload)
    }

    /// Run every stage and produce the reading
    #[inline]
    pub fn decode(&self) -> Result<Reading> {
        Ok(reading::decode_fields(&self.verified_payload()?))
    }
}

/// Decode one capture into a reading
///
/// Fails with a protocol-mismatch error when the capture is not a
/// 5-in-1 frame, or with
/// [`ChecksumMismatch`](crate::DecodeError::ChecksumMismatch) when it is
/// but the data is corrupt. No reading is produced in either case.
#[inline]
pub fn decode(buf: &BitBuffer) -> Result<Reading> {
    FrameDecoder::new(buf).decode()
}

/// Verify and decode an already extracted payload
#[inline]
pub fn decode_payload(payload: &Payload) -> Result<Reading> {
    checksum::verify_checksum(payload)?;
    Ok(reading::decode_fields(payload))
}
