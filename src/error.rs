//! Error types for the Bresser 5-in-1 frame decoder

/// Dispatcher status: message length or preamble wrong
pub const STATUS_ABORT_LENGTH: i32 = -1;
/// Dispatcher status: row shape rejected before any search
pub const STATUS_ABORT_EARLY: i32 = -2;
/// Dispatcher status: integrity check failed
pub const STATUS_FAIL_MIC: i32 = -3;
/// Dispatcher status: input could not be interpreted at all
pub const STATUS_FAIL_SANITY: i32 = -4;

/// Errors that can occur while decoding a capture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// Row count is not exactly one, or the row length is outside 160..=230 bits
    FrameLengthOutOfRange,
    /// Preamble marker absent from the row
    PreambleNotFound,
    /// Fewer than 144 bits follow the preamble
    PayloadTooShort,
    /// Additive checksum over the payload did not come out as 0x01
    ChecksumMismatch,
    /// Bit string notation could not be parsed
    InvalidBitString,
    /// Value cannot be represented in the payload encoding
    FieldOutOfRange,
}

impl DecodeError {
    /// Returns a human-readable description of the error
    pub const fn description(&self) -> &'static str {
        match self {
            DecodeError::FrameLengthOutOfRange => "bits per row out of range",
            DecodeError::PreambleNotFound => "preamble not found",
            DecodeError::PayloadTooShort => "payload too short after preamble",
            DecodeError::ChecksumMismatch => "checksum verification failed",
            DecodeError::InvalidBitString => "invalid bit string notation",
            DecodeError::FieldOutOfRange => "field value not representable",
        }
    }

    /// True when the capture is simply not this protocol and other
    /// decoders should get a chance at it.
    ///
    /// A checksum mismatch means the frame matched structurally but the
    /// data is corrupt.
    #[inline]
    pub const fn is_protocol_mismatch(&self) -> bool {
        matches!(
            self,
            DecodeError::FrameLengthOutOfRange
                | DecodeError::PreambleNotFound
                | DecodeError::PayloadTooShort
        )
    }

    /// Status code reported to a decoder registry
    pub const fn status(&self) -> i32 {
        match self {
            DecodeError::FrameLengthOutOfRange => STATUS_ABORT_EARLY,
            DecodeError::PreambleNotFound | DecodeError::PayloadTooShort => STATUS_ABORT_LENGTH,
            DecodeError::ChecksumMismatch => STATUS_FAIL_MIC,
            DecodeError::InvalidBitString | DecodeError::FieldOutOfRange => STATUS_FAIL_SANITY,
        }
    }
}

#[cfg(feature = "std")]
impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DecodeError {}

/// Result type alias for decoder operations
pub type Result<T> = core::result::Result<T, DecodeError>;
