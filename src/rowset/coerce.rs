//! Cell Coercion Utilities
//!
//! Lenient conversions from nullable cells to Rust primitives, plus the
//! row-level getter family. These are pure conversion functions with no
//! table state dependency.
//!
//! Two layers:
//! - `cell_to_*` functions convert a single [`CellValue`]. `Null` maps to
//!   `Ok(None)`; a present but incompatible value is a `TypeError`.
//! - [`RowValues`] reads a named cell out of a [`Row`], with `_or`
//!   variants that substitute a default for `Null`/missing cells only -
//!   a present but non-coercible value is still an error.

use crate::rowset::error::{TableError, TableResult};
use crate::rowset::table::Row;
use crate::rowset::types::{parse_timestamp_str, CellType, CellValue};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

/// Convert a cell to `i64`
///
/// Floats, decimals, and scaled integers truncate toward zero; booleans
/// widen to 0/1; strings must parse as integers exactly.
pub fn cell_to_i64(cell: &CellValue) -> TableResult<Option<i64>> {
    if cell.is_null() {
        return Ok(None);
    }
    match cell.clone().cast_to(CellType::Integer)? {
        CellValue::Integer(i) => Ok(Some(i)),
        other => Err(TableError::type_error(
            "INTEGER",
            other.type_name(),
            Some(other.to_display_string()),
        )),
    }
}

/// Convert a cell to `f64`
pub fn cell_to_f64(cell: &CellValue) -> TableResult<Option<f64>> {
    if cell.is_null() {
        return Ok(None);
    }
    match cell.clone().cast_to(CellType::Float)? {
        CellValue::Float(f) => Ok(Some(f)),
        other => Err(TableError::type_error(
            "FLOAT",
            other.type_name(),
            Some(other.to_display_string()),
        )),
    }
}

/// Convert a cell to `bool`
///
/// Integers read as `!= 0`; strings accept `true/false`, `t/f`,
/// `yes/no`, and `1/0` case-insensitively.
pub fn cell_to_bool(cell: &CellValue) -> TableResult<Option<bool>> {
    if cell.is_null() {
        return Ok(None);
    }
    match cell.clone().cast_to(CellType::Boolean)? {
        CellValue::Boolean(b) => Ok(Some(b)),
        other => Err(TableError::type_error(
            "BOOLEAN",
            other.type_name(),
            Some(other.to_display_string()),
        )),
    }
}

/// Convert a cell to its display string
///
/// Every non-null cell has a string form, so this never raises a type
/// error.
pub fn cell_to_string(cell: &CellValue) -> Option<String> {
    if cell.is_null() {
        None
    } else {
        Some(cell.to_display_string())
    }
}

/// Convert a cell to an exact [`Decimal`]
pub fn cell_to_decimal(cell: &CellValue) -> TableResult<Option<Decimal>> {
    if cell.is_null() {
        return Ok(None);
    }
    match cell.clone().cast_to(CellType::Decimal)? {
        CellValue::Decimal(d) => Ok(Some(d)),
        CellValue::ScaledInteger(value, scale) => Ok(Some(Decimal::new(value, scale as u32))),
        other => Err(TableError::type_error(
            "DECIMAL",
            other.type_name(),
            Some(other.to_display_string()),
        )),
    }
}

/// Convert a cell to a [`NaiveDate`]
///
/// Timestamps truncate to their date; strings must be `YYYY-MM-DD`.
pub fn cell_to_date(cell: &CellValue) -> TableResult<Option<NaiveDate>> {
    match cell {
        CellValue::Null => Ok(None),
        CellValue::Date(d) => Ok(Some(*d)),
        CellValue::Timestamp(ts) => Ok(Some(ts.date())),
        CellValue::String(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Some)
            .map_err(|_| TableError::type_error("DATE", "STRING", Some(s.clone()))),
        other => Err(TableError::type_error(
            "DATE",
            other.type_name(),
            Some(other.to_display_string()),
        )),
    }
}

/// Convert a cell to a [`NaiveDateTime`]
///
/// Dates read as midnight; integers are interpreted as milliseconds since
/// the Unix epoch; strings accept space- or `T`-separated ISO timestamps.
pub fn cell_to_timestamp(cell: &CellValue) -> TableResult<Option<NaiveDateTime>> {
    match cell {
        CellValue::Null => Ok(None),
        CellValue::Timestamp(ts) => Ok(Some(*ts)),
        CellValue::Date(d) => Ok(Some(d.and_hms_opt(0, 0, 0).unwrap())),
        CellValue::Integer(millis) => DateTime::from_timestamp_millis(*millis)
            .map(|dt| Some(dt.naive_utc()))
            .ok_or_else(|| {
                TableError::type_error("TIMESTAMP", "INTEGER", Some(millis.to_string()))
            }),
        CellValue::String(s) => {
            let trimmed = s.trim();
            parse_timestamp_str(trimmed)
                .or_else(|| {
                    // Date-only strings read as midnight
                    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                        .ok()
                        .and_then(|d| d.and_hms_opt(0, 0, 0))
                })
                .map(Some)
                .ok_or_else(|| TableError::type_error("TIMESTAMP", "STRING", Some(s.clone())))
        }
        other => Err(TableError::type_error(
            "TIMESTAMP",
            other.type_name(),
            Some(other.to_display_string()),
        )),
    }
}

/// Row-level typed getters
///
/// The workhorse accessors for reading table data: each getter names a
/// column and either surfaces `Option<T>` or substitutes a default for
/// absent values.
///
/// # Examples
///
/// ```rust
/// use rowset::rowset::coerce::RowValues;
/// use rowset::rowset::table::Row;
/// use rowset::rowset::types::CellValue;
///
/// let row = Row::new()
///     .with("qty", CellValue::String("12".to_string()))
///     .with("note", CellValue::Null);
///
/// assert_eq!(RowValues::integer(&row, "qty").unwrap(), Some(12));
/// assert_eq!(RowValues::string_or(&row, "note", ""), "");
/// assert_eq!(RowValues::integer_or(&row, "missing", -1).unwrap(), -1);
/// ```
pub struct RowValues;

impl RowValues {
    pub fn integer(row: &Row, column: &str) -> TableResult<Option<i64>> {
        match row.get(column) {
            None => Ok(None),
            Some(cell) => cell_to_i64(cell),
        }
    }

    pub fn integer_or(row: &Row, column: &str, default: i64) -> TableResult<i64> {
        Ok(Self::integer(row, column)?.unwrap_or(default))
    }

    pub fn float(row: &Row, column: &str) -> TableResult<Option<f64>> {
        match row.get(column) {
            None => Ok(None),
            Some(cell) => cell_to_f64(cell),
        }
    }

    pub fn float_or(row: &Row, column: &str, default: f64) -> TableResult<f64> {
        Ok(Self::float(row, column)?.unwrap_or(default))
    }

    pub fn boolean(row: &Row, column: &str) -> TableResult<Option<bool>> {
        match row.get(column) {
            None => Ok(None),
            Some(cell) => cell_to_bool(cell),
        }
    }

    pub fn boolean_or(row: &Row, column: &str, default: bool) -> TableResult<bool> {
        Ok(Self::boolean(row, column)?.unwrap_or(default))
    }

    pub fn string(row: &Row, column: &str) -> Option<String> {
        row.get(column).and_then(cell_to_string)
    }

    pub fn string_or(row: &Row, column: &str, default: &str) -> String {
        Self::string(row, column).unwrap_or_else(|| default.to_string())
    }

    pub fn decimal(row: &Row, column: &str) -> TableResult<Option<Decimal>> {
        match row.get(column) {
            None => Ok(None),
            Some(cell) => cell_to_decimal(cell),
        }
    }

    pub fn decimal_or(row: &Row, column: &str, default: Decimal) -> TableResult<Decimal> {
        Ok(Self::decimal(row, column)?.unwrap_or(default))
    }

    pub fn date(row: &Row, column: &str) -> TableResult<Option<NaiveDate>> {
        match row.get(column) {
            None => Ok(None),
            Some(cell) => cell_to_date(cell),
        }
    }

    pub fn date_or(row: &Row, column: &str, default: NaiveDate) -> TableResult<NaiveDate> {
        Ok(Self::date(row, column)?.unwrap_or(default))
    }

    pub fn timestamp(row: &Row, column: &str) -> TableResult<Option<NaiveDateTime>> {
        match row.get(column) {
            None => Ok(None),
            Some(cell) => cell_to_timestamp(cell),
        }
    }

    pub fn timestamp_or(
        row: &Row,
        column: &str,
        default: NaiveDateTime,
    ) -> TableResult<NaiveDateTime> {
        Ok(Self::timestamp(row, column)?.unwrap_or(default))
    }
}
