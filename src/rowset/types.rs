//! Core cell value types.
//!
//! This module contains the fundamental data types used throughout the
//! rowset library:
//! - [`CellValue`] - The nullable cell value type system
//! - [`CellType`] - The closed set of cell types a column can declare

use crate::rowset::error::TableError;
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// A value in a table cell
///
/// This enum represents all cell types supported by the rowset model. It
/// covers simple scalars (integers, strings, booleans), calendar types,
/// exact numerics, and homogeneous arrays. `Null` is the SQL-style absent
/// value: coercion helpers treat it as "no value" rather than an error.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// 64-bit signed integer
    Integer(i64),
    /// 64-bit floating point number
    Float(f64),
    /// UTF-8 string
    String(String),
    /// Boolean value (true/false)
    Boolean(bool),
    /// SQL NULL value
    Null,
    /// Date (YYYY-MM-DD)
    Date(NaiveDate),
    /// Timestamp (YYYY-MM-DD HH:MM:SS[.nnn])
    Timestamp(NaiveDateTime),
    /// Decimal for exact arithmetic
    Decimal(Decimal),
    /// Scaled integer (value, scale): value is scaled by 10^scale
    ScaledInteger(i64, u8),
    /// Array of values - all elements must be the same type
    Array(Vec<CellValue>),
}

/// The closed set of types a table column can declare.
///
/// Scaled integers classify as `Decimal`: they are an exact-numeric
/// representation, not a distinct column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellType {
    Integer,
    Float,
    String,
    Boolean,
    Date,
    Timestamp,
    Decimal,
    Array,
}

impl fmt::Display for CellType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CellType::Integer => "INTEGER",
            CellType::Float => "FLOAT",
            CellType::String => "STRING",
            CellType::Boolean => "BOOLEAN",
            CellType::Date => "DATE",
            CellType::Timestamp => "TIMESTAMP",
            CellType::Decimal => "DECIMAL",
            CellType::Array => "ARRAY",
        };
        write!(f, "{}", name)
    }
}

/// Display implementation for CellValue for clean string formatting
impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => write!(f, "NULL"),
            CellValue::Integer(i) => write!(f, "{}", i),
            CellValue::Float(v) => write!(f, "{}", v),
            CellValue::String(s) => write!(f, "{}", s),
            CellValue::Boolean(b) => write!(f, "{}", b),
            CellValue::Date(d) => write!(f, "{}", d),
            CellValue::Timestamp(t) => write!(f, "{}", t),
            CellValue::Decimal(d) => write!(f, "{}", d),
            CellValue::ScaledInteger(value, scale) => {
                if *scale == 0 {
                    write!(f, "{}", value)
                } else {
                    let divisor = 10_i64.pow(*scale as u32);
                    let whole = value / divisor;
                    let frac = (value % divisor).abs();
                    write!(f, "{}.{:0>width$}", whole, frac, width = *scale as usize)
                }
            }
            CellValue::Array(arr) => {
                write!(f, "[")?;
                for (i, v) in arr.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", v)?;
                }
                write!(f, "]")
            }
        }
    }
}

/// Hash implementation for CellValue so cells can key maps and sets.
///
/// Floats hash via their bit representation, which handles NaN, infinity,
/// and -0.0 deterministically.
impl Hash for CellValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Hash discriminant first to distinguish variants
        std::mem::discriminant(self).hash(state);

        match self {
            CellValue::Integer(i) => i.hash(state),
            CellValue::Float(f) => {
                f.to_bits().hash(state);
            }
            CellValue::String(s) => s.hash(state),
            CellValue::Boolean(b) => b.hash(state),
            CellValue::Null => {}
            CellValue::Date(d) => {
                d.year().hash(state);
                d.month().hash(state);
                d.day().hash(state);
            }
            CellValue::Timestamp(ts) => {
                ts.and_utc().timestamp_millis().hash(state);
            }
            CellValue::Decimal(dec) => {
                // String form is deterministic across equal decimals
                dec.to_string().hash(state);
            }
            CellValue::ScaledInteger(value, scale) => {
                value.hash(state);
                scale.hash(state);
            }
            CellValue::Array(arr) => {
                arr.len().hash(state);
                for elem in arr {
                    elem.hash(state);
                }
            }
        }
    }
}

/// Custom Serialize implementation for CellValue
///
/// Serialization format:
/// - ScaledInteger → decimal string "123.45" (precision preserved)
/// - Timestamp → `YYYY-MM-DD HH:MM:SS.fff` string
/// - Date → `YYYY-MM-DD` string
/// - Decimal → string representation
/// - Null → JSON null
impl Serialize for CellValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            CellValue::Integer(i) => serializer.serialize_i64(*i),
            CellValue::Float(f) => serializer.serialize_f64(*f),
            CellValue::String(s) => serializer.serialize_str(s),
            CellValue::Boolean(b) => serializer.serialize_bool(*b),
            CellValue::Null => serializer.serialize_none(),
            CellValue::Date(d) => serializer.serialize_str(&d.format("%Y-%m-%d").to_string()),
            CellValue::Timestamp(ts) => {
                serializer.serialize_str(&ts.format("%Y-%m-%d %H:%M:%S%.3f").to_string())
            }
            CellValue::Decimal(dec) => serializer.serialize_str(&dec.to_string()),
            CellValue::ScaledInteger(value, scale) => {
                // Preserve all digits including trailing zeros
                let divisor = 10_i64.pow(*scale as u32);
                let integer_part = value / divisor;
                let fractional_part = (value % divisor).abs();

                let decimal_str = if *scale == 0 {
                    integer_part.to_string()
                } else {
                    let frac_str = format!("{:0width$}", fractional_part, width = *scale as usize);
                    format!("{}.{}", integer_part, frac_str)
                };
                serializer.serialize_str(&decimal_str)
            }
            CellValue::Array(arr) => {
                let mut seq = serializer.serialize_seq(Some(arr.len()))?;
                for elem in arr {
                    seq.serialize_element(elem)?;
                }
                seq.end()
            }
        }
    }
}

/// Detect strings shaped like plain decimal literals ("123.45", "-0.07")
/// and represent them as ScaledInteger so precision survives round-trips.
fn try_parse_scaled_integer(s: &str) -> Option<CellValue> {
    let trimmed = s.trim();
    if trimmed.is_empty() || trimmed.len() > 19 {
        return None;
    }

    let (digits, scale) = match trimmed.find('.') {
        Some(dot) => {
            let frac = &trimmed[dot + 1..];
            if frac.is_empty() || frac.len() > u8::MAX as usize {
                return None;
            }
            let mut digits = trimmed[..dot].to_string();
            digits.push_str(frac);
            (digits, frac.len() as u8)
        }
        None => return None,
    };

    let rest = digits.strip_prefix('-').unwrap_or(&digits);
    if rest.is_empty() || !rest.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    digits
        .parse::<i64>()
        .ok()
        .map(|value| CellValue::ScaledInteger(value, scale))
}

impl<'de> Deserialize<'de> for CellValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(CellValueVisitor)
    }
}

struct CellValueVisitor;

impl<'de> Visitor<'de> for CellValueVisitor {
    type Value = CellValue;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a scalar, null, or array cell value")
    }

    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(CellValue::Integer(v))
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        i64::try_from(v)
            .map(CellValue::Integer)
            .map_err(|_| E::custom(format!("integer {} exceeds i64 range", v)))
    }

    fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(CellValue::Float(v))
    }

    fn visit_bool<E>(self, v: bool) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(CellValue::Boolean(v))
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        // Decimal-looking strings become ScaledInteger so precision
        // survives a serialize/deserialize round-trip
        if let Some(result) = try_parse_scaled_integer(v) {
            return Ok(result);
        }
        Ok(CellValue::String(v.to_owned()))
    }

    fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        if let Some(result) = try_parse_scaled_integer(&v) {
            return Ok(result);
        }
        Ok(CellValue::String(v))
    }

    fn visit_none<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(CellValue::Null)
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(CellValue::Null)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut arr = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(elem) = seq.next_element()? {
            arr.push(elem);
        }
        Ok(CellValue::Array(arr))
    }
}

impl CellValue {
    /// Get the type name for error messages and debugging
    pub fn type_name(&self) -> &'static str {
        match self {
            CellValue::Integer(_) => "INTEGER",
            CellValue::Float(_) => "FLOAT",
            CellValue::String(_) => "STRING",
            CellValue::Boolean(_) => "BOOLEAN",
            CellValue::Null => "NULL",
            CellValue::Date(_) => "DATE",
            CellValue::Timestamp(_) => "TIMESTAMP",
            CellValue::Decimal(_) => "DECIMAL",
            CellValue::ScaledInteger(_, _) => "SCALED_INTEGER",
            CellValue::Array(_) => "ARRAY",
        }
    }

    /// The [`CellType`] this value classifies as, or `None` for `Null`.
    pub fn cell_type(&self) -> Option<CellType> {
        match self {
            CellValue::Integer(_) => Some(CellType::Integer),
            CellValue::Float(_) => Some(CellType::Float),
            CellValue::String(_) => Some(CellType::String),
            CellValue::Boolean(_) => Some(CellType::Boolean),
            CellValue::Null => None,
            CellValue::Date(_) => Some(CellType::Date),
            CellValue::Timestamp(_) => Some(CellType::Timestamp),
            CellValue::Decimal(_) | CellValue::ScaledInteger(_, _) => Some(CellType::Decimal),
            CellValue::Array(_) => Some(CellType::Array),
        }
    }

    /// Check whether this value is the SQL NULL value
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Check if this value represents a numeric type
    ///
    /// Returns true for integers, floats, decimals, and scaled integers -
    /// the closed set that aggregate dispatch accepts.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            CellValue::Integer(_)
                | CellValue::Float(_)
                | CellValue::Decimal(_)
                | CellValue::ScaledInteger(_, _)
        )
    }

    /// Convert this value to a string representation for display
    ///
    /// Unlike Debug formatting, this provides clean SQL-like formatting.
    /// Scaled integers render as decimals with trailing zeros trimmed.
    pub fn to_display_string(&self) -> String {
        match self {
            CellValue::Integer(i) => i.to_string(),
            CellValue::Float(f) => f.to_string(),
            CellValue::String(s) => s.clone(),
            CellValue::Boolean(b) => b.to_string(),
            CellValue::Null => "NULL".to_string(),
            CellValue::Date(d) => d.format("%Y-%m-%d").to_string(),
            CellValue::Timestamp(ts) => ts.format("%Y-%m-%d %H:%M:%S%.3f").to_string(),
            CellValue::Decimal(dec) => dec.to_string(),
            CellValue::ScaledInteger(value, scale) => {
                let divisor = 10_i64.pow(*scale as u32);
                let integer_part = value / divisor;
                let fractional_part = (value % divisor).abs();
                if fractional_part == 0 {
                    integer_part.to_string()
                } else {
                    format!(
                        "{}.{:0width$}",
                        integer_part,
                        fractional_part,
                        width = *scale as usize
                    )
                    .trim_end_matches('0')
                    .trim_end_matches('.')
                    .to_string()
                }
            }
            CellValue::Array(arr) => {
                let elements: Vec<String> = arr.iter().map(|v| v.to_display_string()).collect();
                format!("[{}]", elements.join(", "))
            }
        }
    }

    /// Cast this value to the specified target type
    ///
    /// Performs type conversion following SQL casting rules: widening
    /// numeric conversions, string parsing, and boolean-to-0/1. `Null`
    /// casts to `Null` for every target.
    ///
    /// # Arguments
    /// * `target` - The target cell type
    ///
    /// # Returns
    /// * `Ok(CellValue)` - The converted value
    /// * `Err(TableError)` - If the conversion is not supported or fails
    pub fn cast_to(self, target: CellType) -> Result<CellValue, TableError> {
        if self.is_null() {
            return Ok(CellValue::Null);
        }
        match target {
            CellType::Integer => match self {
                CellValue::Integer(i) => Ok(CellValue::Integer(i)),
                CellValue::Float(f) => Ok(CellValue::Integer(f as i64)),
                CellValue::String(s) => s.trim().parse::<i64>().map(CellValue::Integer).map_err(
                    |_| TableError::TypeError {
                        expected: "INTEGER".to_string(),
                        actual: "STRING".to_string(),
                        value: Some(s),
                    },
                ),
                CellValue::Boolean(b) => Ok(CellValue::Integer(if b { 1 } else { 0 })),
                CellValue::Decimal(d) => {
                    // Truncate the fractional part toward zero
                    d.trunc().to_i64().map(CellValue::Integer).ok_or_else(|| {
                        TableError::TypeError {
                            expected: "INTEGER".to_string(),
                            actual: "DECIMAL".to_string(),
                            value: Some(d.to_string()),
                        }
                    })
                }
                CellValue::ScaledInteger(value, scale) => {
                    let divisor = 10_i64.pow(scale as u32);
                    Ok(CellValue::Integer(value / divisor))
                }
                other => Err(TableError::TypeError {
                    expected: "INTEGER".to_string(),
                    actual: other.type_name().to_string(),
                    value: None,
                }),
            },
            CellType::Float => match self {
                CellValue::Integer(i) => Ok(CellValue::Float(i as f64)),
                CellValue::Float(f) => Ok(CellValue::Float(f)),
                CellValue::String(s) => {
                    s.trim()
                        .parse::<f64>()
                        .map(CellValue::Float)
                        .map_err(|_| TableError::TypeError {
                            expected: "FLOAT".to_string(),
                            actual: "STRING".to_string(),
                            value: Some(s),
                        })
                }
                CellValue::Boolean(b) => Ok(CellValue::Float(if b { 1.0 } else { 0.0 })),
                CellValue::Decimal(d) => {
                    Ok(CellValue::Float(d.to_f64().ok_or_else(|| {
                        TableError::TypeError {
                            expected: "FLOAT".to_string(),
                            actual: "DECIMAL".to_string(),
                            value: Some(d.to_string()),
                        }
                    })?))
                }
                CellValue::ScaledInteger(value, scale) => {
                    let divisor = 10_i64.pow(scale as u32);
                    Ok(CellValue::Float(value as f64 / divisor as f64))
                }
                other => Err(TableError::TypeError {
                    expected: "FLOAT".to_string(),
                    actual: other.type_name().to_string(),
                    value: None,
                }),
            },
            CellType::String => Ok(CellValue::String(self.to_display_string())),
            CellType::Boolean => match self {
                CellValue::Boolean(b) => Ok(CellValue::Boolean(b)),
                CellValue::Integer(i) => Ok(CellValue::Boolean(i != 0)),
                CellValue::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                    "true" | "t" | "yes" | "1" => Ok(CellValue::Boolean(true)),
                    "false" | "f" | "no" | "0" => Ok(CellValue::Boolean(false)),
                    _ => Err(TableError::TypeError {
                        expected: "BOOLEAN".to_string(),
                        actual: "STRING".to_string(),
                        value: Some(s),
                    }),
                },
                other => Err(TableError::TypeError {
                    expected: "BOOLEAN".to_string(),
                    actual: other.type_name().to_string(),
                    value: None,
                }),
            },
            CellType::Date => match self {
                CellValue::Date(d) => Ok(CellValue::Date(d)),
                CellValue::Timestamp(ts) => Ok(CellValue::Date(ts.date())),
                CellValue::String(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
                    .map(CellValue::Date)
                    .map_err(|_| TableError::TypeError {
                        expected: "DATE".to_string(),
                        actual: "STRING".to_string(),
                        value: Some(s),
                    }),
                other => Err(TableError::TypeError {
                    expected: "DATE".to_string(),
                    actual: other.type_name().to_string(),
                    value: None,
                }),
            },
            CellType::Timestamp => match self {
                CellValue::Timestamp(ts) => Ok(CellValue::Timestamp(ts)),
                CellValue::Date(d) => {
                    // Midnight is always a valid time of day
                    Ok(CellValue::Timestamp(d.and_hms_opt(0, 0, 0).unwrap()))
                }
                CellValue::String(s) => parse_timestamp_str(s.trim())
                    .map(CellValue::Timestamp)
                    .ok_or_else(|| TableError::TypeError {
                        expected: "TIMESTAMP".to_string(),
                        actual: "STRING".to_string(),
                        value: Some(s),
                    }),
                other => Err(TableError::TypeError {
                    expected: "TIMESTAMP".to_string(),
                    actual: other.type_name().to_string(),
                    value: None,
                }),
            },
            CellType::Decimal => match self {
                CellValue::Decimal(d) => Ok(CellValue::Decimal(d)),
                CellValue::ScaledInteger(value, scale) => {
                    Ok(CellValue::ScaledInteger(value, scale))
                }
                CellValue::Integer(i) => Ok(CellValue::Decimal(Decimal::from(i))),
                CellValue::String(s) => Decimal::from_str(s.trim())
                    .map(CellValue::Decimal)
                    .map_err(|_| TableError::TypeError {
                        expected: "DECIMAL".to_string(),
                        actual: "STRING".to_string(),
                        value: Some(s),
                    }),
                CellValue::Float(f) => Decimal::from_str(&f.to_string())
                    .map(CellValue::Decimal)
                    .map_err(|_| TableError::TypeError {
                        expected: "DECIMAL".to_string(),
                        actual: "FLOAT".to_string(),
                        value: Some(f.to_string()),
                    }),
                other => Err(TableError::TypeError {
                    expected: "DECIMAL".to_string(),
                    actual: other.type_name().to_string(),
                    value: None,
                }),
            },
            CellType::Array => match self {
                CellValue::Array(arr) => Ok(CellValue::Array(arr)),
                other => Err(TableError::TypeError {
                    expected: "ARRAY".to_string(),
                    actual: other.type_name().to_string(),
                    value: None,
                }),
            },
        }
    }
}

/// Parse a timestamp literal in the formats the crate emits.
///
/// Accepts `YYYY-MM-DD HH:MM:SS` with optional fractional seconds, and the
/// `T`-separated ISO variant.
pub(crate) fn parse_timestamp_str(s: &str) -> Option<NaiveDateTime> {
    for format in [
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
    ] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(s, format) {
            return Some(ts);
        }
    }
    None
}
