//! Sensor field decoding
//!
//! Payload layout, by byte index:
//!
//! ```text
//!  0 .. 6   unknown / checksum filler
//!  7        wind gust, inverted, tens        (GG)
//!  8        gust units (hi) | speed units (lo), inverted nibbles
//!  9        wind speed, inverted, tens       (WW)
//! 10 .. 11  wind direction BCD, hundreds/tens/units in 10.hi, 10.lo, 11.hi
//! 12        0xFF: rain frame, otherwise temperature BCD hundreds/tens
//! 13        rain: inverted BCD thousands/hundreds
//!           temperature: units (hi) | sign flag (lo, unused)
//! 14        rain: inverted BCD tens/units
//!           humidity: BCD
//! ```
//!
//! Nibbles 0xA..=0xF are out of range for BCD. They are not rejected; the
//! arithmetic simply produces larger, meaningless values without overflow.

use crate::frame::Payload;

/// Byte value at index 12 that marks a rain frame
pub const RAIN_SENTINEL: u8 = 0xFF;

/// Decoded temperatures above this many tenths of a degree wrap to negative
const TEMPERATURE_WRAP_DC: i16 = 600;

#[inline]
const fn high_nibble(byte: u8) -> u8 {
    byte >> 4
}

#[inline]
const fn low_nibble(byte: u8) -> u8 {
    byte & 0x0F
}

/// Frame-specific measurements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Variant {
    /// Rain accumulator frame (byte 12 is 0xFF)
    RainOnly {
        /// Rain total in tenths of a millimetre
        rain_raw: u16,
    },
    /// Temperature and humidity frame
    Full {
        /// Temperature in tenths of a degree Celsius, sign corrected
        temperature_dc: i16,
        /// Relative humidity in percent
        humidity: u8,
    },
}

/// One decoded sensor reading
///
/// Raw integer quantities are kept so decoding is exact; the accessor
/// methods convert to physical units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Reading {
    /// Wind gust in decimetres per second
    pub wind_gust_raw: u16,
    /// Average wind speed in decimetres per second
    pub wind_speed_raw: u16,
    /// Wind direction in degrees
    pub wind_dir: u16,
    /// Rain or temperature/humidity part
    pub variant: Variant,
}

impl Reading {
    /// Wind gust in m/s
    #[inline]
    pub fn wind_gust_ms(&self) -> f64 {
        f64::from(self.wind_gust_raw) * 0.1
    }

    /// Wind speed in m/s
    #[inline]
    pub fn wind_speed_ms(&self) -> f64 {
        f64::from(self.wind_speed_raw) * 0.1
    }

    /// Wind gust in km/h
    #[inline]
    pub fn wind_gust_kmh(&self) -> f64 {
        self.wind_gust_ms() * 3.6
    }

    /// Wind speed in km/h
    #[inline]
    pub fn wind_speed_kmh(&self) -> f64 {
        self.wind_speed_ms() * 3.6
    }

    /// Wind direction in degrees
    #[inline]
    pub fn wind_dir_deg(&self) -> f64 {
        f64::from(self.wind_dir)
    }

    /// Temperature in °C, only present in full frames
    pub fn temperature_c(&self) -> Option<f64> {
        match self.variant {
            Variant::Full { temperature_dc, .. } => Some(f64::from(temperature_dc) * 0.1),
            Variant::RainOnly { .. } => None,
        }
    }

    /// Relative humidity in percent, only present in full frames
    pub fn humidity(&self) -> Option<u8> {
        match self.variant {
            Variant::Full { humidity, .. } => Some(humidity),
            Variant::RainOnly { .. } => None,
        }
    }

    /// Rain total in mm, only present in rain frames
    pub fn rain_mm(&self) -> Option<f64> {
        match self.variant {
            Variant::RainOnly { rain_raw } => Some(f64::from(rain_raw) * 0.1),
            Variant::Full { .. } => None,
        }
    }

    /// True for rain accumulator frames
    #[inline]
    pub fn is_rain_only(&self) -> bool {
        matches!(self.variant, Variant::RainOnly { .. })
    }
}

/// Three inverted BCD-ish digits: a whole inverted byte of tens and one
/// inverted units nibble
#[inline]
fn inverted_wind(tens: u8, units: u8) -> u16 {
    u16::from(0xFF - tens) * 10 + u16::from(0x0F - units)
}

/// Straight BCD digits from a byte and the high nibble of the next one
#[inline]
fn bcd3(byte: u8, next: u8) -> u16 {
    u16::from(high_nibble(byte)) * 100
        + u16::from(low_nibble(byte)) * 10
        + u16::from(high_nibble(next))
}

/// Four inverted BCD digits spread over two bytes
#[inline]
fn inverted_bcd4(hi: u8, lo: u8) -> u16 {
    u16::from(0x0F - high_nibble(hi)) * 1000
        + u16::from(0x0F - low_nibble(hi)) * 100
        + u16::from(0x0F - high_nibble(lo)) * 10
        + u16::from(0x0F - low_nibble(lo))
}

/// Apply the offset-range sign rule to a raw temperature in tenths
///
/// Values above 60.0 °C encode negative temperatures: 60.1..=99.9 maps to
/// -39.9..=-0.1.
#[inline]
pub fn correct_temperature(raw: u16) -> i16 {
    // raw never exceeds 15 * 111
    let raw = raw as i16;
    if raw > TEMPERATURE_WRAP_DC {
        raw - 1000
    } else {
        raw
    }
}

/// Interpret the measurement fields of a payload
///
/// The checksum is not verified here.
pub fn decode_fields(payload: &Payload) -> Reading {
    let msg = payload.as_bytes();

    let wind_gust_raw = inverted_wind(msg[7], high_nibble(msg[8]));
    let wind_speed_raw = inverted_wind(msg[9], low_nibble(msg[8]));
    let wind_dir = bcd3(msg[10], msg[11]);

    let variant = if msg[12] == RAIN_SENTINEL {
        Variant::RainOnly {
            rain_raw: inverted_bcd4(msg[13], msg[14]),
        }
    } else {
        Variant::Full {
            temperature_dc: correct_temperature(bcd3(msg[12], msg[13])),
            humidity: high_nibble(msg[14]) * 10 + low_nibble(msg[14]),
        }
    };

    Reading {
        wind_gust_raw,
        wind_speed_raw,
        wind_dir,
        variant,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        a - b < 1e-9 && b - a < 1e-9
    }

    fn payload_with(fields: &[(usize, u8)]) -> Payload {
        let mut bytes = [0u8; 20];
        for &(idx, value) in fields {
            bytes[idx] = value;
        }
        Payload::from_bytes(&bytes).unwrap()
    }

    #[test]
    fn test_wind_fields() {
        // gust = (0xFF - 0xFE) * 10 + (0xF - 0xA) = 15
        // speed = (0xFF - 0xFC) * 10 + (0xF - 0xE) = 31
        let reading = decode_fields(&payload_with(&[(7, 0xFE), (8, 0xAE), (9, 0xFC)]));
        assert_eq!(reading.wind_gust_raw, 15);
        assert_eq!(reading.wind_speed_raw, 31);
        assert!(approx_eq(reading.wind_gust_kmh(), 5.4));
        assert!(approx_eq(reading.wind_speed_kmh(), 11.16));
        assert!(approx_eq(reading.wind_gust_ms(), 1.5));
    }

    #[test]
    fn test_wind_direction_bcd() {
        let reading = decode_fields(&payload_with(&[(10, 0x27), (11, 0x5F)]));
        assert_eq!(reading.wind_dir, 275);
        assert_eq!(reading.wind_dir_deg(), 275.0);
    }

    #[test]
    fn test_full_frame() {
        // 23.4 °C, 56 %
        let reading = decode_fields(&payload_with(&[(12, 0x23), (13, 0x40), (14, 0x56)]));
        assert!(!reading.is_rain_only());
        assert_eq!(
            reading.variant,
            Variant::Full {
                temperature_dc: 234,
                humidity: 56
            }
        );
        assert!(approx_eq(reading.temperature_c().unwrap(), 23.4));
        assert_eq!(reading.humidity(), Some(56));
        assert_eq!(reading.rain_mm(), None);
    }

    #[test]
    fn test_temperature_sign_nibble_ignored() {
        let plain = decode_fields(&payload_with(&[(12, 0x12), (13, 0x30)]));
        let flagged = decode_fields(&payload_with(&[(12, 0x12), (13, 0x3F)]));
        assert_eq!(plain.temperature_c(), flagged.temperature_c());
    }

    #[test]
    fn test_negative_temperature_wrap() {
        // raw 955 -> 95.5 - 100 = -4.5
        let reading = decode_fields(&payload_with(&[(12, 0x95), (13, 0x50)]));
        assert_eq!(
            reading.variant,
            Variant::Full {
                temperature_dc: -45,
                humidity: 0
            }
        );
        assert!(approx_eq(reading.temperature_c().unwrap(), -4.5));

        assert_eq!(correct_temperature(600), 600);
        assert_eq!(correct_temperature(601), -399);
        assert_eq!(correct_temperature(999), -1);
        assert_eq!(correct_temperature(0), 0);
    }

    #[test]
    fn test_rain_frame() {
        // Inverted digits: 0xF-0xE=1, 0xF-0xD=2, 0xF-0xC=3, 0xF-0xB=4 -> 1234 -> 123.4 mm
        let reading = decode_fields(&payload_with(&[(12, 0xFF), (13, 0xED), (14, 0xCB)]));
        assert!(reading.is_rain_only());
        assert_eq!(reading.variant, Variant::RainOnly { rain_raw: 1234 });
        assert!(approx_eq(reading.rain_mm().unwrap(), 123.4));
        assert_eq!(reading.temperature_c(), None);
        assert_eq!(reading.humidity(), None);
    }

    #[test]
    fn test_only_byte_12_selects_variant() {
        let rain = decode_fields(&payload_with(&[(12, 0xFF)]));
        assert!(rain.is_rain_only());
        let almost = decode_fields(&payload_with(&[(12, 0xFE), (13, 0xFF), (14, 0xFF)]));
        assert!(!almost.is_rain_only());
    }

    #[test]
    fn test_out_of_range_nibbles_do_not_overflow() {
        let reading = decode_fields(&payload_with(&[
            (7, 0x00),
            (8, 0x00),
            (9, 0x00),
            (10, 0xFF),
            (11, 0xFF),
            (12, 0xFE),
            (13, 0xFF),
            (14, 0xFF),
        ]));
        assert_eq!(reading.wind_gust_raw, 2565);
        assert_eq!(reading.wind_speed_raw, 2565);
        assert_eq!(reading.wind_dir, 1665);
        // raw 15*100 + 14*10 + 15 = 1655 -> 655
        assert_eq!(
            reading.variant,
            Variant::Full {
                temperature_dc: 655,
                humidity: 165
            }
        );
    }
}
