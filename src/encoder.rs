//! Payload and transmission builder
//!
//! The inverse of the field decoder, used to simulate the outdoor unit
//! and to build test captures. Only values the payload can represent are
//! accepted.

use crate::bitbuffer::BitBuffer;
use crate::checksum::CHECKSUM_SPAN;
use crate::error::{DecodeError, Result};
use crate::frame::Payload;
use crate::reading::{Reading, Variant, RAIN_SENTINEL};
use crate::{PAYLOAD_CAPACITY, PREAMBLE, PREAMBLE_BITS};

/// Largest wind value (decimetres per second) the inverted encoding holds
pub const MAX_WIND_RAW: u16 = 2559;

/// Largest BCD wind direction
pub const MAX_WIND_DIR: u16 = 999;

/// Largest rain total in tenths of a millimetre
pub const MAX_RAIN_RAW: u16 = 9999;

/// Temperature range in tenths of a degree
pub const TEMPERATURE_RANGE_DC: core::ops::RangeInclusive<i16> = -399..=600;

/// Largest BCD humidity
pub const MAX_HUMIDITY: u8 = 99;

#[inline]
fn bcd_digit(value: u16, scale: u16) -> u8 {
    ((value / scale) % 10) as u8
}

/// Encode wind into an inverted tens byte and an inverted units nibble
#[inline]
fn encode_wind(raw: u16) -> Result<(u8, u8)> {
    if raw > MAX_WIND_RAW {
        return Err(DecodeError::FieldOutOfRange);
    }
    Ok((0xFF - (raw / 10) as u8, 0x0F - bcd_digit(raw, 1)))
}

/// Build a checksum-valid payload carrying `reading`
///
/// Bytes the decoder never reads are zero, except byte 2 which balances
/// the checksum.
pub fn encode_payload(reading: &Reading) -> Result<Payload> {
    let mut msg = [0u8; PAYLOAD_CAPACITY];

    let (gust_tens, gust_units) = encode_wind(reading.wind_gust_raw)?;
    let (speed_tens, speed_units) = encode_wind(reading.wind_speed_raw)?;
    msg[7] = gust_tens;
    msg[8] = (gust_units << 4) | speed_units;
    msg[9] = speed_tens;

    let dir = reading.wind_dir;
    if dir > MAX_WIND_DIR {
        return Err(DecodeError::FieldOutOfRange);
    }
    msg[10] = (bcd_digit(dir, 100) << 4) | bcd_digit(dir, 10);
    msg[11] = bcd_digit(dir, 1) << 4;

    match reading.variant {
        Variant::RainOnly { rain_raw } => {
            if rain_raw > MAX_RAIN_RAW {
                return Err(DecodeError::FieldOutOfRange);
            }
            msg[12] = RAIN_SENTINEL;
            msg[13] = ((0x0F - bcd_digit(rain_raw, 1000)) << 4) | (0x0F - bcd_digit(rain_raw, 100));
            msg[14] = ((0x0F - bcd_digit(rain_raw, 10)) << 4) | (0x0F - bcd_digit(rain_raw, 1));
        }
        Variant::Full {
            temperature_dc,
            humidity,
        } => {
            if !TEMPERATURE_RANGE_DC.contains(&temperature_dc) || humidity > MAX_HUMIDITY {
                return Err(DecodeError::FieldOutOfRange);
            }
            let raw = if temperature_dc < 0 {
                (temperature_dc + 1000) as u16
            } else {
                temperature_dc as u16
            };
            msg[12] = (bcd_digit(raw, 100) << 4) | bcd_digit(raw, 10);
            msg[13] = bcd_digit(raw, 1) << 4;
            msg[14] = ((humidity / 10) << 4) | (humidity % 10);
        }
    }

    // Inverse sum of 0x01 means the plain byte sum over the span is 0xFF
    let start = *CHECKSUM_SPAN.start();
    let rest = msg[start + 1..=*CHECKSUM_SPAN.end()]
        .iter()
        .fold(0u8, |acc, &b| acc.wrapping_add(b));
    msg[start] = 0xFFu8.wrapping_sub(rest);

    Payload::from_bytes(&msg)
}

/// Lay a payload out as the single row a demodulator would produce:
/// `lead_bits` of alternating warm-up bits, the preamble, then the
/// payload bits.
pub fn transmission(payload: &Payload, lead_bits: usize) -> BitBuffer {
    let mut buffer = BitBuffer::new();
    buffer.add_row();

    for i in 0..lead_bits {
        buffer.add_bit(i % 2 == 0);
    }
    for i in 0..PREAMBLE_BITS {
        buffer.add_bit((PREAMBLE[i / 8] >> (7 - i % 8)) & 1 != 0);
    }

    let bytes = payload.as_bytes();
    for i in 0..payload.len() * 8 {
        buffer.add_bit((bytes[i / 8] >> (7 - i % 8)) & 1 != 0);
    }
    buffer
}
