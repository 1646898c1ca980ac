//! Bresser 5-in-1: frame decoder for the Bresser Weather Center 5-in-1
//! outdoor sensor
//!
//! Given the bit rows a demodulator captured from one 868.3 MHz FSK
//! transmission, this crate finds the preamble, copies out the payload,
//! checks its additive checksum and decodes wind, temperature, humidity
//! and rain readings.
//!
//! # Frame Format
//!
//! ```text
//! +---------------------+-------------+----------------------------------+
//! | warm-up aa aa aa .. | aa aa 2d d4 | payload, up to 20 bytes (160 bit) |
//! +---------------------+-------------+----------------------------------+
//!
//! payload byte:  0 .. 6 | 7  8  9 | 10 11 | 12 13 14 | 15 .. 19
//!                filler | wind    | dir   | T/H or R | filler
//! checksum span:      2 ..................................... 17
//! ```
//!
//! Byte 12 selects the frame variant: `0xFF` marks a rain accumulator
//! frame, anything else a temperature/humidity frame.
//!
//! # Example
//!
//! ```rust
//! use bresser5in1::{decode, encoder, Reading, Variant};
//!
//! let reading = Reading {
//!     wind_gust_raw: 52,
//!     wind_speed_raw: 31,
//!     wind_dir: 225,
//!     variant: Variant::Full { temperature_dc: -45, humidity: 81 },
//! };
//! let capture = encoder::transmission(&encoder::encode_payload(&reading)?, 8);
//!
//! let decoded = decode(&capture)?;
//! assert_eq!(decoded, reading);
//! assert_eq!(decoded.humidity(), Some(81));
//!
//! let record = decoded.to_record();
//! assert_eq!(record.get("mic").and_then(|v| v.as_str()), Some("CHECKSUM"));
//! # Ok::<(), bresser5in1::DecodeError>(())
//! ```

#![no_std]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

pub mod bitbuffer;
pub mod checksum;
pub mod decoder;
pub mod device;
pub mod encoder;
pub mod error;
pub mod frame;
pub mod reading;
pub mod record;

// Re-export main types
pub use bitbuffer::{BitBuffer, BitRow};
pub use decoder::{decode, decode_payload, FrameDecoder};
pub use device::{decode_all, Bresser5in1, Decoder, DeviceParams, Modulation};
pub use error::{DecodeError, Result};
pub use frame::Payload;
pub use reading::{Reading, Variant};
pub use record::{Field, Record, Value};

/// Synchronization marker preceding the payload
pub const PREAMBLE: [u8; 4] = [0xAA, 0xAA, 0x2D, 0xD4];

/// Preamble length in bits
pub const PREAMBLE_BITS: usize = PREAMBLE.len() * 8;

/// Shortest row accepted, in bits
pub const MIN_ROW_BITS: usize = 160;

/// Longest row accepted, in bits
pub const MAX_ROW_BITS: usize = 230;

/// Minimum number of bits that must follow the preamble
pub const MIN_PAYLOAD_BITS: usize = 144;

/// Payload buffer capacity in bytes
pub const PAYLOAD_CAPACITY: usize = 20;

/// Model identifier reported in every record
pub const MODEL: &str = "Bresser-5in1";

/// Integrity tag reported once the checksum has passed
pub const MIC: &str = "CHECKSUM";
