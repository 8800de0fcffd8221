//! Aggregate function dispatch over the three input shapes.
//!
//! Every aggregate accepts its input as a table column, a view column
//! (aggregating only the rows the view exposes), or a plain cell slice.

use crate::rowset::aggregate::accumulator::ColumnAccumulator;
use crate::rowset::error::TableResult;
use crate::rowset::table::{Table, TableView};
use crate::rowset::types::CellValue;

/// Utilities for aggregate computation
///
/// # Examples
///
/// ```rust
/// use rowset::rowset::aggregate::Aggregates;
/// use rowset::rowset::types::CellValue;
///
/// let cells = vec![
///     CellValue::Integer(2),
///     CellValue::Null,
///     CellValue::Integer(5),
/// ];
/// assert_eq!(Aggregates::sum_values(&cells).unwrap(), CellValue::Integer(7));
/// assert_eq!(Aggregates::count_values(&cells), CellValue::Integer(3));
/// ```
pub struct Aggregates;

impl Aggregates {
    /// Feed every cell of a table column through an accumulator
    pub fn over_column(table: &Table, column: &str) -> TableResult<ColumnAccumulator> {
        table.schema().require_column(column)?;
        let mut acc = ColumnAccumulator::new();
        for row in table.rows() {
            acc.push(row.get(column).unwrap_or(&CellValue::Null))?;
        }
        Ok(acc)
    }

    /// Feed the cells a view exposes for one column through an accumulator
    pub fn over_view(view: &TableView<'_>, column: &str) -> TableResult<ColumnAccumulator> {
        view.schema().require_column(column)?;
        let mut acc = ColumnAccumulator::new();
        for row in view.iter() {
            acc.push(row.get(column).unwrap_or(&CellValue::Null))?;
        }
        Ok(acc)
    }

    /// Feed a plain cell slice through an accumulator
    pub fn over_values(values: &[CellValue]) -> TableResult<ColumnAccumulator> {
        let mut acc = ColumnAccumulator::new();
        for cell in values {
            acc.push(cell)?;
        }
        Ok(acc)
    }

    // Column-shaped convenience functions

    pub fn count_column(table: &Table, column: &str) -> TableResult<CellValue> {
        Ok(Self::over_column(table, column)?.count())
    }

    pub fn count_non_null_column(table: &Table, column: &str) -> TableResult<CellValue> {
        Ok(Self::over_column(table, column)?.count_non_null())
    }

    pub fn sum_column(table: &Table, column: &str) -> TableResult<CellValue> {
        Self::over_column(table, column)?.sum()
    }

    pub fn avg_column(table: &Table, column: &str) -> TableResult<CellValue> {
        Self::over_column(table, column)?.avg()
    }

    pub fn min_column(table: &Table, column: &str) -> TableResult<CellValue> {
        Ok(Self::over_column(table, column)?.min())
    }

    pub fn max_column(table: &Table, column: &str) -> TableResult<CellValue> {
        Ok(Self::over_column(table, column)?.max())
    }

    // View-shaped convenience functions

    pub fn count_view(view: &TableView<'_>, column: &str) -> TableResult<CellValue> {
        Ok(Self::over_view(view, column)?.count())
    }

    pub fn count_non_null_view(view: &TableView<'_>, column: &str) -> TableResult<CellValue> {
        Ok(Self::over_view(view, column)?.count_non_null())
    }

    pub fn sum_view(view: &TableView<'_>, column: &str) -> TableResult<CellValue> {
        Self::over_view(view, column)?.sum()
    }

    pub fn avg_view(view: &TableView<'_>, column: &str) -> TableResult<CellValue> {
        Self::over_view(view, column)?.avg()
    }

    pub fn min_view(view: &TableView<'_>, column: &str) -> TableResult<CellValue> {
        Ok(Self::over_view(view, column)?.min())
    }

    pub fn max_view(view: &TableView<'_>, column: &str) -> TableResult<CellValue> {
        Ok(Self::over_view(view, column)?.max())
    }

    // Slice-shaped convenience functions

    pub fn count_values(values: &[CellValue]) -> CellValue {
        CellValue::Integer(values.len() as i64)
    }

    pub fn count_non_null_values(values: &[CellValue]) -> CellValue {
        CellValue::Integer(values.iter().filter(|v| !v.is_null()).count() as i64)
    }

    pub fn sum_values(values: &[CellValue]) -> TableResult<CellValue> {
        Self::over_values(values)?.sum()
    }

    pub fn avg_values(values: &[CellValue]) -> TableResult<CellValue> {
        Self::over_values(values)?.avg()
    }

    pub fn min_values(values: &[CellValue]) -> TableResult<CellValue> {
        Ok(Self::over_values(values)?.min())
    }

    pub fn max_values(values: &[CellValue]) -> TableResult<CellValue> {
        Ok(Self::over_values(values)?.max())
    }
}
