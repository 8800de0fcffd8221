//! Array manipulation helpers over cell vectors and slices.
//!
//! Arrays in the cell model are homogeneous: all non-null elements share
//! one [`CellType`]. [`Arrays::element_type`] checks that contract; the
//! remaining helpers are shape and membership operations used when cells
//! hold `CellValue::Array` payloads or when callers work with plain cell
//! vectors.

use crate::rowset::aggregate::compute::numeric_to_f64;
use crate::rowset::compare::CellComparator;
use crate::rowset::error::{TableError, TableResult};
use crate::rowset::types::{CellType, CellValue};

/// Utility class for cell array manipulation
pub struct Arrays;

impl Arrays {
    /// Concatenate two arrays into a new one
    pub fn concat(left: &[CellValue], right: &[CellValue]) -> Vec<CellValue> {
        let mut out = Vec::with_capacity(left.len() + right.len());
        out.extend_from_slice(left);
        out.extend_from_slice(right);
        out
    }

    /// Append a value, returning the grown vector
    pub fn append(mut values: Vec<CellValue>, value: CellValue) -> Vec<CellValue> {
        values.push(value);
        values
    }

    /// Grow or shrink to `len`, padding with `Null`
    pub fn resize(mut values: Vec<CellValue>, len: usize) -> Vec<CellValue> {
        values.resize(len, CellValue::Null);
        values
    }

    /// Copy of `len` elements starting at `start`, clamped to the input
    pub fn slice(values: &[CellValue], start: usize, len: usize) -> Vec<CellValue> {
        values
            .iter()
            .skip(start)
            .take(len)
            .cloned()
            .collect()
    }

    /// Index of the first element equal to `needle` under coercing
    /// equality, so `Integer(2)` is found among floats
    ///
    /// `Null` is never found; see the coercion equality rules in
    /// [`CellComparator`].
    pub fn index_of(values: &[CellValue], needle: &CellValue) -> Option<usize> {
        values
            .iter()
            .position(|v| CellComparator::values_equal_with_coercion(v, needle))
    }

    /// Whether any element equals `needle` under coercing equality
    pub fn contains(values: &[CellValue], needle: &CellValue) -> bool {
        Self::index_of(values, needle).is_some()
    }

    /// Drop all nulls, preserving order
    pub fn compact(values: &[CellValue]) -> Vec<CellValue> {
        values.iter().filter(|v| !v.is_null()).cloned().collect()
    }

    /// Order-preserving dedup under strict equality
    pub fn distinct(values: &[CellValue]) -> Vec<CellValue> {
        let mut out: Vec<CellValue> = Vec::new();
        for value in values {
            if !out.iter().any(|seen| CellComparator::values_equal(seen, value)) {
                out.push(value.clone());
            }
        }
        out
    }

    /// Common element type of the array
    ///
    /// Returns `None` for empty or all-null input. Mixed element types
    /// violate the homogeneous-array contract and raise a `TypeError`
    /// (scaled integers and decimals share the `Decimal` classification).
    pub fn element_type(values: &[CellValue]) -> TableResult<Option<CellType>> {
        let mut found: Option<CellType> = None;
        for value in values {
            let Some(element_type) = value.cell_type() else {
                continue;
            };
            match found {
                None => found = Some(element_type),
                Some(expected) if expected == element_type => {}
                Some(expected) => {
                    return Err(TableError::TypeError {
                        expected: expected.to_string(),
                        actual: element_type.to_string(),
                        value: Some(value.to_display_string()),
                    });
                }
            }
        }
        Ok(found)
    }

    /// Convert a numeric array to `f64`s, skipping nulls
    ///
    /// A non-numeric non-null element is a `TypeError`. This is the
    /// bridge the slice-shaped aggregates use.
    pub fn to_f64_vec(values: &[CellValue]) -> TableResult<Vec<f64>> {
        let mut out = Vec::with_capacity(values.len());
        for value in values {
            if value.is_null() {
                continue;
            }
            match numeric_to_f64(value) {
                Some(x) => out.push(x),
                None => {
                    return Err(TableError::TypeError {
                        expected: "numeric".to_string(),
                        actual: value.type_name().to_string(),
                        value: Some(value.to_display_string()),
                    });
                }
            }
        }
        Ok(out)
    }
}
