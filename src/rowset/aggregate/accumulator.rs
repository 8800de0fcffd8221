//! Incremental per-column aggregate state.

use crate::rowset::aggregate::compute::{
    compute_avg_from_welford, compute_median_from_values, compute_stddev_from_welford,
    compute_sum_result, compute_variance_from_welford, numeric_to_f64, WelfordState,
};
use crate::rowset::compare::CellComparator;
use crate::rowset::error::{TableError, TableResult};
use crate::rowset::types::CellValue;
use std::cmp::Ordering;

/// Accumulator for incremental aggregate computation over one column
///
/// Cells are fed in one at a time with [`ColumnAccumulator::push`]; the
/// finisher methods then produce the aggregate values. Nulls count toward
/// `count` but are otherwise inert. Min/max track any consistently-typed
/// column (strings, dates, numerics); the numeric finishers (`sum`,
/// `avg`, `stddev`, `variance`, `median`) report a `TypeError` when the
/// column held non-numeric cells, instead of silently skipping them.
#[derive(Debug, Clone)]
pub struct ColumnAccumulator {
    /// Count of all pushed cells, nulls included
    count: u64,
    /// Count of non-null cells
    non_null: u64,
    /// Running sum for SUM
    sum: f64,
    /// Whether every summed cell was an Integer (drives SUM result typing)
    sum_all_integer: bool,
    /// Whether any non-null numeric cell was seen
    sum_has_values: bool,
    /// Current minimum cell
    min: Option<CellValue>,
    /// Current maximum cell
    max: Option<CellValue>,
    /// Welford state for AVG / STDDEV / VARIANCE
    welford: WelfordState,
    /// Collected numeric values for MEDIAN
    numeric_values: Vec<f64>,
    /// Type name of the first non-numeric non-null cell, if any
    non_numeric: Option<&'static str>,
}

impl ColumnAccumulator {
    /// Create a new empty accumulator
    pub fn new() -> Self {
        Self {
            count: 0,
            non_null: 0,
            sum: 0.0,
            sum_all_integer: true,
            sum_has_values: false,
            min: None,
            max: None,
            welford: WelfordState::new(),
            numeric_values: Vec::new(),
            non_numeric: None,
        }
    }

    /// Update the accumulator with one cell
    ///
    /// Fails only when the cell cannot be ordered against the current
    /// min/max (mixed incomparable types in one column).
    pub fn push(&mut self, cell: &CellValue) -> TableResult<()> {
        self.count += 1;
        if cell.is_null() {
            return Ok(());
        }
        self.non_null += 1;

        match numeric_to_f64(cell) {
            Some(x) => {
                self.sum += x;
                self.sum_has_values = true;
                if !matches!(cell, CellValue::Integer(_)) {
                    self.sum_all_integer = false;
                }
                self.welford.update(x);
                self.numeric_values.push(x);
            }
            None => {
                if self.non_numeric.is_none() {
                    self.non_numeric = Some(cell.type_name());
                }
            }
        }

        let replace_min = match &self.min {
            None => true,
            Some(current) => CellComparator::compare(cell, current)? == Ordering::Less,
        };
        if replace_min {
            self.min = Some(cell.clone());
        }
        let replace_max = match &self.max {
            None => true,
            Some(current) => CellComparator::compare(cell, current)? == Ordering::Greater,
        };
        if replace_max {
            self.max = Some(cell.clone());
        }

        Ok(())
    }

    /// Count of all pushed cells, nulls included
    pub fn count(&self) -> CellValue {
        CellValue::Integer(self.count as i64)
    }

    /// Count of non-null cells
    pub fn count_non_null(&self) -> CellValue {
        CellValue::Integer(self.non_null as i64)
    }

    /// SUM of the column; `Integer` when every input was an integer with
    /// an integral total, `Null` when no non-null input was seen
    pub fn sum(&self) -> TableResult<CellValue> {
        self.require_numeric("SUM")?;
        Ok(compute_sum_result(
            self.sum,
            self.sum_all_integer,
            self.sum_has_values,
        ))
    }

    /// AVG of the column as `Float`, `Null` when empty
    pub fn avg(&self) -> TableResult<CellValue> {
        self.require_numeric("AVG")?;
        Ok(match compute_avg_from_welford(&self.welford) {
            Some(avg) => CellValue::Float(avg),
            None => CellValue::Null,
        })
    }

    /// Minimum cell, `Null` when no non-null input was seen
    pub fn min(&self) -> CellValue {
        self.min.clone().unwrap_or(CellValue::Null)
    }

    /// Maximum cell, `Null` when no non-null input was seen
    pub fn max(&self) -> CellValue {
        self.max.clone().unwrap_or(CellValue::Null)
    }

    /// Standard deviation; `sample=true` uses the N-1 divisor
    pub fn stddev(&self, sample: bool) -> TableResult<CellValue> {
        self.require_numeric("STDDEV")?;
        Ok(match compute_stddev_from_welford(&self.welford, sample) {
            Some(stddev) => CellValue::Float(stddev),
            None => CellValue::Null,
        })
    }

    /// Variance; `sample=true` uses the N-1 divisor
    pub fn variance(&self, sample: bool) -> TableResult<CellValue> {
        self.require_numeric("VARIANCE")?;
        Ok(match compute_variance_from_welford(&self.welford, sample) {
            Some(var) => CellValue::Float(var),
            None => CellValue::Null,
        })
    }

    /// Median of the collected numeric values
    pub fn median(&self) -> TableResult<CellValue> {
        self.require_numeric("MEDIAN")?;
        Ok(match compute_median_from_values(&self.numeric_values) {
            Some(median) => CellValue::Float(median),
            None => CellValue::Null,
        })
    }

    /// Numeric aggregates refuse columns that held non-numeric cells
    fn require_numeric(&self, operation: &str) -> TableResult<()> {
        match self.non_numeric {
            None => Ok(()),
            Some(type_name) => Err(TableError::TypeError {
                expected: format!("numeric input for {}", operation),
                actual: type_name.to_string(),
                value: None,
            }),
        }
    }
}

impl Default for ColumnAccumulator {
    fn default() -> Self {
        Self::new()
    }
}
