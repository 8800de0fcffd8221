//! Cell Value Comparison Utilities
//!
//! Handles comparison operations between [`CellValue`] instances. These are
//! pure comparison functions with no table state dependency; `TableView`
//! sorting and the array helpers build on them.

use crate::rowset::error::TableError;
use crate::rowset::types::CellValue;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::cmp::Ordering;

/// Utility class for comparing CellValue instances
pub struct CellComparator;

impl CellComparator {
    /// Compare two CellValues for equality with exact type matching
    ///
    /// `Null` equals `Null` here; use [`CellComparator::values_equal_with_coercion`]
    /// for SQL-style semantics where NULL matches nothing.
    pub fn values_equal(left: &CellValue, right: &CellValue) -> bool {
        match (left, right) {
            (CellValue::Integer(a), CellValue::Integer(b)) => a == b,
            (CellValue::Float(a), CellValue::Float(b)) => (a - b).abs() < f64::EPSILON,
            (CellValue::ScaledInteger(a, scale_a), CellValue::ScaledInteger(b, scale_b)) => {
                // Exact comparison - both value and scale must match
                a == b && scale_a == scale_b
            }
            (CellValue::String(a), CellValue::String(b)) => a == b,
            (CellValue::Boolean(a), CellValue::Boolean(b)) => a == b,
            (CellValue::Date(a), CellValue::Date(b)) => a == b,
            (CellValue::Timestamp(a), CellValue::Timestamp(b)) => a == b,
            (CellValue::Decimal(a), CellValue::Decimal(b)) => a == b,
            (CellValue::Null, CellValue::Null) => true,
            (CellValue::Array(a), CellValue::Array(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .zip(b.iter())
                        .all(|(x, y)| Self::values_equal(x, y))
            }
            _ => false,
        }
    }

    /// Compare values with numeric type coercion
    ///
    /// Integer, Float, ScaledInteger, and Decimal values compare across
    /// types after normalization. `Null` never equals anything, including
    /// another `Null`.
    pub fn values_equal_with_coercion(left: &CellValue, right: &CellValue) -> bool {
        match (left, right) {
            // Exact type matches
            (CellValue::Integer(a), CellValue::Integer(b)) => a == b,
            (CellValue::Float(a), CellValue::Float(b)) => (a - b).abs() < f64::EPSILON,
            (CellValue::ScaledInteger(a, scale_a), CellValue::ScaledInteger(b, scale_b)) => {
                Self::scaled_integers_equal(*a, *scale_a, *b, *scale_b)
            }
            (CellValue::String(a), CellValue::String(b)) => a == b,
            (CellValue::Boolean(a), CellValue::Boolean(b)) => a == b,
            (CellValue::Date(a), CellValue::Date(b)) => a == b,
            (CellValue::Timestamp(a), CellValue::Timestamp(b)) => a == b,
            (CellValue::Decimal(a), CellValue::Decimal(b)) => a == b,

            // Numeric coercion across the closed numeric set
            (CellValue::Integer(a), CellValue::Float(b)) => (*a as f64 - b).abs() < f64::EPSILON,
            (CellValue::Float(a), CellValue::Integer(b)) => (a - *b as f64).abs() < f64::EPSILON,
            (CellValue::ScaledInteger(a, scale), CellValue::Integer(b)) => {
                (Self::scaled_to_f64(*a, *scale) - *b as f64).abs() < f64::EPSILON
            }
            (CellValue::Integer(a), CellValue::ScaledInteger(b, scale)) => {
                (*a as f64 - Self::scaled_to_f64(*b, *scale)).abs() < f64::EPSILON
            }
            (CellValue::ScaledInteger(a, scale), CellValue::Float(b)) => {
                (Self::scaled_to_f64(*a, *scale) - b).abs() < f64::EPSILON
            }
            (CellValue::Float(a), CellValue::ScaledInteger(b, scale)) => {
                (a - Self::scaled_to_f64(*b, *scale)).abs() < f64::EPSILON
            }
            (CellValue::Decimal(a), CellValue::Integer(b)) => *a == Decimal::from(*b),
            (CellValue::Integer(a), CellValue::Decimal(b)) => Decimal::from(*a) == *b,
            (CellValue::Decimal(a), CellValue::Float(b)) => {
                (a.to_f64().unwrap_or(0.0) - b).abs() < f64::EPSILON
            }
            (CellValue::Float(a), CellValue::Decimal(b)) => {
                (a - b.to_f64().unwrap_or(0.0)).abs() < f64::EPSILON
            }
            (CellValue::Decimal(a), CellValue::ScaledInteger(b, scale)) => {
                (a.to_f64().unwrap_or(0.0) - Self::scaled_to_f64(*b, *scale)).abs() < f64::EPSILON
            }
            (CellValue::ScaledInteger(a, scale), CellValue::Decimal(b)) => {
                (Self::scaled_to_f64(*a, *scale) - b.to_f64().unwrap_or(0.0)).abs() < f64::EPSILON
            }

            (CellValue::Array(a), CellValue::Array(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .zip(b.iter())
                        .all(|(x, y)| Self::values_equal_with_coercion(x, y))
            }

            // NULL matches nothing under coercion semantics
            (CellValue::Null, _) | (_, CellValue::Null) => false,

            _ => false,
        }
    }

    /// Total ordering between two non-null cells for sorting
    ///
    /// Numeric values order across the closed numeric set, with exact
    /// scaled-integer comparison when both sides are scaled. Strings,
    /// booleans, dates, and timestamps order naturally. Mixed non-numeric
    /// type pairs (and nulls, which the caller must partition first) are a
    /// `TypeError`.
    pub fn compare(left: &CellValue, right: &CellValue) -> Result<Ordering, TableError> {
        match (left, right) {
            (CellValue::String(a), CellValue::String(b)) => Ok(a.cmp(b)),
            (CellValue::Boolean(a), CellValue::Boolean(b)) => Ok(a.cmp(b)),
            (CellValue::Date(a), CellValue::Date(b)) => Ok(a.cmp(b)),
            (CellValue::Timestamp(a), CellValue::Timestamp(b)) => Ok(a.cmp(b)),
            (CellValue::Date(a), CellValue::Timestamp(b)) => {
                Ok(a.and_hms_opt(0, 0, 0).unwrap().cmp(b))
            }
            (CellValue::Timestamp(a), CellValue::Date(b)) => {
                Ok(a.cmp(&b.and_hms_opt(0, 0, 0).unwrap()))
            }
            (CellValue::ScaledInteger(a, scale_a), CellValue::ScaledInteger(b, scale_b)) => {
                Ok(Self::compare_scaled_integers(*a, *scale_a, *b, *scale_b))
            }
            (CellValue::Decimal(a), CellValue::Decimal(b)) => Ok(a.cmp(b)),
            _ if left.is_numeric() && right.is_numeric() => {
                let a = Self::numeric_as_f64(left);
                let b = Self::numeric_as_f64(right);
                Ok(a.partial_cmp(&b).unwrap_or(Ordering::Equal))
            }
            _ => Err(TableError::TypeError {
                expected: left.type_name().to_string(),
                actual: right.type_name().to_string(),
                value: None,
            }),
        }
    }

    /// Convert a ScaledInteger to f64 by dividing by the scale factor
    pub fn scaled_to_f64(value: i64, scale: u8) -> f64 {
        let divisor = 10_i64.pow(scale as u32) as f64;
        value as f64 / divisor
    }

    fn numeric_as_f64(value: &CellValue) -> f64 {
        match value {
            CellValue::Integer(i) => *i as f64,
            CellValue::Float(f) => *f,
            CellValue::ScaledInteger(v, scale) => Self::scaled_to_f64(*v, *scale),
            CellValue::Decimal(d) => d.to_f64().unwrap_or(0.0),
            _ => 0.0,
        }
    }

    /// Compare two ScaledInteger values for equality with scale normalization
    fn scaled_integers_equal(a: i64, scale_a: u8, b: i64, scale_b: u8) -> bool {
        if scale_a == scale_b {
            a == b
        } else {
            Self::compare_scaled_integers(a, scale_a, b, scale_b) == Ordering::Equal
        }
    }

    /// Compare two ScaledInteger values on a common scale using exact
    /// integer arithmetic
    fn compare_scaled_integers(a: i64, scale_a: u8, b: i64, scale_b: u8) -> Ordering {
        let max_scale = scale_a.max(scale_b);
        let normalized_a = if scale_a < max_scale {
            a.saturating_mul(10_i64.pow((max_scale - scale_a) as u32))
        } else {
            a
        };
        let normalized_b = if scale_b < max_scale {
            b.saturating_mul(10_i64.pow((max_scale - scale_b) as u32))
        } else {
            b
        };
        normalized_a.cmp(&normalized_b)
    }
}
