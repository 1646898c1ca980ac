//! Decoder capability interface
//!
//! A registry of RF decoders holds each protocol behind the [`Decoder`]
//! trait: a descriptor telling the demodulator how to slice pulses into
//! bits, plus a decode entry point returning a keyed [`Record`].

use log::{debug, trace};

use crate::bitbuffer::BitBuffer;
use crate::checksum;
use crate::error::{DecodeError, Result};
use crate::frame;
use crate::reading;
use crate::record::Record;
use crate::{MAX_ROW_BITS, MIN_ROW_BITS};

/// Output keys a 5-in-1 record may contain, in schema order
pub const OUTPUT_FIELDS: &[&str] = &[
    "model",
    "id",
    "temperature_C",
    "humidity",
    "wind_gust",
    "wind_speed",
    "wind_dir_deg",
    "rain_mm",
    "mic",
];

/// Pulse modulation schemes a demodulator can slice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modulation {
    /// On-off keying, pulse code modulation
    OokPulsePcm,
    /// Frequency shift keying, pulse code modulation
    FskPulsePcm,
}

/// Demodulator parameters for a device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceParams {
    /// Display name
    pub name: &'static str,
    /// Modulation scheme
    pub modulation: Modulation,
    /// Nominal short pulse width in microseconds
    pub short_width_us: u32,
    /// Nominal long pulse width in microseconds
    pub long_width_us: u32,
    /// Gap in microseconds that ends a transmission
    pub reset_limit_us: u32,
    /// Disabled decoders are skipped by default
    pub disabled: bool,
}

/// A protocol decoder a registry can dispatch to
pub trait Decoder {
    /// Demodulator parameters
    fn params(&self) -> &DeviceParams;

    /// Output keys the decoder may emit
    fn fields(&self) -> &'static [&'static str];

    /// Decode one capture
    fn decode(&self, buffer: &BitBuffer) -> Result<Record>;

    /// Display name
    fn name(&self) -> &'static str {
        self.params().name
    }
}

/// Bresser Weather Center 5-in-1
///
/// The outdoor unit transmits FSK-PCM on 868.3 MHz every 12 seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bresser5in1;

impl Bresser5in1 {
    /// Demodulator parameters for the 5-in-1 outdoor unit
    pub const PARAMS: DeviceParams = DeviceParams {
        name: "Bresser Weather Center 5-in-1",
        modulation: Modulation::FskPulsePcm,
        short_width_us: 122,
        long_width_us: 122,
        reset_limit_us: 2400,
        disabled: false,
    };
}

impl Decoder for Bresser5in1 {
    fn params(&self) -> &DeviceParams {
        &Self::PARAMS
    }

    fn fields(&self) -> &'static [&'static str] {
        OUTPUT_FIELDS
    }

    fn decode(&self, buffer: &BitBuffer) -> Result<Record> {
        let row = frame::check_shape(buffer).inspect_err(|_| {
            debug!(
                "{}: {} rows, {} bits per row, expected 1 row of {}..={} bits",
                Self::PARAMS.name,
                buffer.num_rows(),
                buffer.bits_per_row(0),
                MIN_ROW_BITS,
                MAX_ROW_BITS
            );
        })?;

        let payload = frame::extract_from_row(row).inspect_err(|e| match e {
            DecodeError::PreambleNotFound => debug!("{}: preamble not found", Self::PARAMS.name),
            _ => debug!(
                "{}: payload too short in {} bit row",
                Self::PARAMS.name,
                row.bits()
            ),
        })?;
        trace!("{}: payload {:02x?}", Self::PARAMS.name, payload.as_bytes());

        checksum::verify_checksum(&payload).inspect_err(|_| {
            debug!(
                "{}: checksum 0x{:02x}, expected 0x{:02x}",
                Self::PARAMS.name,
                checksum::checksum(&payload),
                checksum::EXPECTED_CHECKSUM
            );
        })?;

        Ok(reading::decode_fields(&payload).to_record())
    }
}

/// Try each decoder in turn and return the first record produced
///
/// When every decoder fails, a checksum mismatch from any of them takes
/// precedence over protocol mismatches, since it means some protocol
/// recognized the frame. An empty list reports
/// [`DecodeError::PreambleNotFound`].
pub fn decode_all(decoders: &[&dyn Decoder], buffer: &BitBuffer) -> Result<Record> {
    let mut last = DecodeError::PreambleNotFound;
    let mut corrupt = false;

    for decoder in decoders {
        match decoder.decode(buffer) {
            Ok(record) => return Ok(record),
            Err(e) if e.is_protocol_mismatch() => last = e,
            Err(e) => {
                debug!("{}: {}", decoder.name(), e.description());
                corrupt |= e == DecodeError::ChecksumMismatch;
                last = e;
            }
        }
    }

    if corrupt {
        return Err(DecodeError::ChecksumMismatch);
    }
    Err(last)
}
