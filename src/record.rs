//! Keyed output records
//!
//! A [`Record`] is the generic shape handed to reporting sinks: an ordered
//! list of `key -> value` fields, each with a display label and, for
//! floating-point values, a unit used when rendering one decimal place.

use alloc::vec::Vec;
use core::fmt;

use crate::reading::{Reading, Variant};
use crate::{MIC, MODEL};

/// Field value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    /// Constant string
    Str(&'static str),
    /// Integer
    Int(i64),
    /// Float rendered with one decimal followed by `unit`
    Double {
        /// Numeric value
        value: f64,
        /// Unit suffix
        unit: &'static str,
    },
}

impl Value {
    /// Numeric value, if any
    #[inline]
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::Int(v) => Some(v as f64),
            Value::Double { value, .. } => Some(value),
            Value::Str(_) => None,
        }
    }

    /// String value, if any
    #[inline]
    pub fn as_str(&self) -> Option<&'static str> {
        match *self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => f.write_str(s),
            Value::Int(v) => write!(f, "{}", v),
            Value::Double { value, unit } => write!(f, "{:.1} {}", value, unit),
        }
    }
}

/// One keyed field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Field {
    /// Machine-readable key
    pub key: &'static str,
    /// Human-readable label, may be empty
    pub label: &'static str,
    /// Field value
    pub value: Value,
}

/// Ordered set of output fields
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<Field>,
}

impl Record {
    /// Create an empty record
    #[inline]
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Append a field
    pub fn push(&mut self, key: &'static str, label: &'static str, value: Value) {
        self.fields.push(Field { key, label, value });
    }

    /// Look up a field value by key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.iter().find(|f| f.key == key).map(|f| &f.value)
    }

    /// Iterate fields in emission order
    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, Field> {
        self.fields.iter()
    }

    /// Number of fields
    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the record has no fields
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = &'a Field;
    type IntoIter = core::slice::Iter<'a, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str("  ")?;
            }
            let label = if field.label.is_empty() {
                field.key
            } else {
                field.label
            };
            write!(f, "{}: {}", label, field.value)?;
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Value {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        match *self {
            Value::Str(s) => serializer.serialize_str(s),
            Value::Int(v) => serializer.serialize_i64(v),
            Value::Double { value, .. } => serializer.serialize_f64(value),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Record {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for field in &self.fields {
            map.serialize_entry(field.key, &field.value)?;
        }
        map.end()
    }
}

impl Reading {
    /// Render the reading as a keyed record
    ///
    /// `id` is part of the declared schema but never emitted: no station
    /// identifier is decoded from the payload.
    pub fn to_record(&self) -> Record {
        let mut record = Record::new();
        record.push("model", "", Value::Str(MODEL));

        if let Variant::Full {
            temperature_dc,
            humidity,
        } = self.variant
        {
            record.push(
                "temperature_C",
                "Temperature",
                Value::Double {
                    value: f64::from(temperature_dc) * 0.1,
                    unit: "C",
                },
            );
            record.push("humidity", "Humidity", Value::Int(i64::from(humidity)));
        }

        record.push(
            "wind_gust",
            "Wind Gust",
            Value::Double {
                value: self.wind_gust_kmh(),
                unit: "km/h",
            },
        );
        record.push(
            "wind_speed",
            "Wind Speed",
            Value::Double {
                value: self.wind_speed_kmh(),
                unit: "km/h",
            },
        );
        record.push(
            "wind_dir_deg",
            "Direction",
            Value::Double {
                value: self.wind_dir_deg(),
                unit: "°",
            },
        );

        if let Variant::RainOnly { rain_raw } = self.variant {
            record.push(
                "rain_mm",
                "Rain",
                Value::Double {
                    value: f64::from(rain_raw) * 0.1,
                    unit: "mm",
                },
            );
        }

        record.push("mic", "Integrity", Value::Str(MIC));
        record
    }
}

impl From<&Reading> for Record {
    #[inline]
    fn from(reading: &Reading) -> Self {
        reading.to_record()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    fn keys(record: &Record) -> Vec<&'static str> {
        record.iter().map(|f| f.key).collect()
    }

    #[test]
    fn test_full_record_fields() {
        let reading = Reading {
            wind_gust_raw: 15,
            wind_speed_raw: 31,
            wind_dir: 275,
            variant: Variant::Full {
                temperature_dc: -45,
                humidity: 56,
            },
        };
        let record = reading.to_record();
        assert_eq!(
            keys(&record),
            [
                "model",
                "temperature_C",
                "humidity",
                "wind_gust",
                "wind_speed",
                "wind_dir_deg",
                "mic"
            ]
        );
        assert_eq!(record.get("model"), Some(&Value::Str("Bresser-5in1")));
        assert_eq!(record.get("humidity"), Some(&Value::Int(56)));
        assert_eq!(record.get("mic").and_then(Value::as_str), Some("CHECKSUM"));
        assert_eq!(record.get("rain_mm"), None);
        assert_eq!(record.get("id"), None);
    }

    #[test]
    fn test_rain_record_fields() {
        let reading = Reading {
            wind_gust_raw: 0,
            wind_speed_raw: 0,
            wind_dir: 0,
            variant: Variant::RainOnly { rain_raw: 1234 },
        };
        let record = Record::from(&reading);
        assert_eq!(
            keys(&record),
            ["model", "wind_gust", "wind_speed", "wind_dir_deg", "rain_mm", "mic"]
        );
        let rain = record.get("rain_mm").and_then(Value::as_f64).unwrap();
        assert!(rain - 123.4 < 1e-9 && 123.4 - rain < 1e-9);
    }

    #[test]
    fn test_display_one_decimal() {
        let reading = Reading {
            wind_gust_raw: 15,
            wind_speed_raw: 31,
            wind_dir: 275,
            variant: Variant::Full {
                temperature_dc: 234,
                humidity: 56,
            },
        };
        assert_eq!(
            reading.to_record().to_string(),
            "model: Bresser-5in1  Temperature: 23.4 C  Humidity: 56  \
             Wind Gust: 5.4 km/h  Wind Speed: 11.2 km/h  Direction: 275.0 °  \
             Integrity: CHECKSUM"
        );
    }
}
