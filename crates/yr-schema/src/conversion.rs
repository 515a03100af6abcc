//! Leaf conversions from raw strings to typed values
//!
//! Each conversion is a pure function of its input. Raw text is used as-is;
//! surrounding whitespace is not trimmed before numeric parsing.

use crate::{Error, Result};
use chrono::{NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use yr_ir::Value;

/// Timestamp layout used by the forecast API
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

const TIMESTAMP_LAYOUT: &[u8] = b"9999-99-99T99:99:99";

/// A conversion applied to an attribute value or element text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Conversion {
    /// Pass the text through unchanged
    #[serde(rename = "string", alias = "text")]
    Text,

    /// Decimal integer
    #[serde(rename = "int", alias = "integer")]
    Integer,

    /// Decimal floating-point number
    #[serde(rename = "float")]
    Float,

    /// `YYYY-MM-DDTHH:MM:SS` local timestamp
    #[serde(rename = "date", alias = "timestamp")]
    Timestamp,

    /// Whole number of minutes as a duration
    #[serde(rename = "timeoffset", alias = "minutes")]
    Minutes,
}

impl Conversion {
    /// Apply the conversion to a raw string
    ///
    /// # Errors
    ///
    /// Returns [`Error::Conversion`] when the input does not parse.
    pub fn apply(self, raw: &str) -> Result<Value> {
        match self {
            Conversion::Text => Ok(to_text(raw)),
            Conversion::Integer => parse_integer(raw),
            Conversion::Float => parse_float(raw),
            Conversion::Timestamp => parse_timestamp(raw),
            Conversion::Minutes => parse_minutes(raw),
        }
    }

    /// Canonical name used in schema files
    pub fn name(self) -> &'static str {
        match self {
            Conversion::Text => "string",
            Conversion::Integer => "int",
            Conversion::Float => "float",
            Conversion::Timestamp => "date",
            Conversion::Minutes => "timeoffset",
        }
    }
}

impl fmt::Display for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Conversion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "string" | "text" => Ok(Conversion::Text),
            "int" | "integer" => Ok(Conversion::Integer),
            "float" => Ok(Conversion::Float),
            "date" | "timestamp" => Ok(Conversion::Timestamp),
            "timeoffset" | "minutes" => Ok(Conversion::Minutes),
            other => Err(Error::InvalidFormat(format!(
                "Unknown conversion '{other}'"
            ))),
        }
    }
}

/// Identity conversion
pub fn to_text(raw: &str) -> Value {
    Value::Text(raw.to_string())
}

/// Parse a decimal integer
///
/// # Errors
///
/// Returns an error on non-numeric or out-of-range input.
pub fn parse_integer(raw: &str) -> Result<Value> {
    raw.parse::<i64>()
        .map(Value::Integer)
        .map_err(|e| Error::conversion("int", raw, e))
}

/// Parse a decimal floating-point number
///
/// # Errors
///
/// Returns an error on non-numeric input.
pub fn parse_float(raw: &str) -> Result<Value> {
    raw.parse::<f64>()
        .map(Value::Float)
        .map_err(|e| Error::conversion("float", raw, e))
}

/// Parse an exact `YYYY-MM-DDTHH:MM:SS` timestamp with no zone or fraction
///
/// # Errors
///
/// Returns an error on any deviation from the layout, including unpadded or
/// signed fields, fractional seconds and zone suffixes, and on out-of-range
/// dates or times.
pub fn parse_timestamp(raw: &str) -> Result<Value> {
    if !matches_timestamp_layout(raw.as_bytes()) {
        return Err(Error::conversion("date", raw, "expected YYYY-MM-DDTHH:MM:SS"));
    }

    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
        .map(Value::Timestamp)
        .map_err(|e| Error::conversion("date", raw, e))
}

// A digit at every `9` of the layout, the literal separator elsewhere.
fn matches_timestamp_layout(bytes: &[u8]) -> bool {
    bytes.len() == TIMESTAMP_LAYOUT.len()
        && bytes
            .iter()
            .copied()
            .zip(TIMESTAMP_LAYOUT.iter().copied())
            .all(|(byte, expected)| match expected {
                b'9' => byte.is_ascii_digit(),
                separator => byte == separator,
            })
}

/// Parse a whole number of minutes into a duration
///
/// # Errors
///
/// Returns an error on non-integer input or a value too large for a duration.
pub fn parse_minutes(raw: &str) -> Result<Value> {
    let minutes = raw
        .parse::<i64>()
        .map_err(|e| Error::conversion("timeoffset", raw, e))?;

    TimeDelta::try_minutes(minutes)
        .map(Value::Duration)
        .ok_or_else(|| Error::conversion("timeoffset", raw, "duration out of range"))
}
