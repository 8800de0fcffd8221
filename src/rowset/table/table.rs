//! The in-memory table: schema-validated rows of nullable cells.

use crate::rowset::error::{TableError, TableResult};
use crate::rowset::table::schema::Schema;
use crate::rowset::types::CellValue;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single table row: named, nullable cells
///
/// Rows do not know their schema; [`Table::insert`] validates and
/// normalizes them against the owning table's schema.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Row {
    pub cells: HashMap<String, CellValue>,
}

impl Row {
    pub fn new() -> Self {
        Row {
            cells: HashMap::new(),
        }
    }

    /// Builder-style cell assignment
    ///
    /// ```rust
    /// use rowset::rowset::table::Row;
    /// use rowset::rowset::types::CellValue;
    ///
    /// let row = Row::new()
    ///     .with("id", CellValue::Integer(1))
    ///     .with("name", CellValue::String("widget".to_string()));
    /// assert_eq!(row.get("id"), Some(&CellValue::Integer(1)));
    /// ```
    pub fn with(mut self, column: impl Into<String>, value: CellValue) -> Self {
        self.cells.insert(column.into(), value);
        self
    }

    /// Get a cell by column name; `None` when the row has no such cell
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells.get(column)
    }

    pub fn set(&mut self, column: impl Into<String>, value: CellValue) {
        self.cells.insert(column.into(), value);
    }

    /// True when the cell is absent or holds `Null`
    pub fn is_null(&self, column: &str) -> bool {
        matches!(self.cells.get(column), None | Some(CellValue::Null))
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.cells.keys().map(|k| k.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Statistics about a table
#[derive(Debug, Clone, PartialEq)]
pub struct TableStats {
    pub name: String,
    pub row_count: usize,
    pub column_count: usize,
}

/// An in-memory relational table
///
/// Every stored row satisfies the schema: all schema columns are present
/// (filled from defaults or `Null` where nullable) and no row carries a
/// cell the schema does not define.
///
/// # Examples
///
/// ```rust
/// use rowset::rowset::table::{Column, Row, Schema, Table};
/// use rowset::rowset::types::{CellType, CellValue};
///
/// let schema = Schema::new(vec![
///     Column::new("id", CellType::Integer),
///     Column::nullable("qty", CellType::Integer),
/// ]);
/// let mut orders = Table::new("orders", schema);
///
/// orders.insert(Row::new().with("id", CellValue::Integer(1))).unwrap();
/// assert_eq!(orders.len(), 1);
/// assert!(orders.row(0).unwrap().is_null("qty"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    name: String,
    schema: Schema,
    rows: Vec<Row>,
}

impl Table {
    /// Create an empty table with the given schema
    pub fn new(name: impl Into<String>, schema: Schema) -> Self {
        Table {
            name: name.into(),
            schema,
            rows: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Insert a row after validating it against the schema
    ///
    /// - Cells naming columns the schema does not define are rejected.
    /// - Missing columns are filled from the column default, then `Null`
    ///   for nullable columns; a missing non-nullable column without a
    ///   default is rejected.
    /// - A cell whose type does not match its column is converted with
    ///   [`CellValue::cast_to`]; conversion failures propagate.
    pub fn insert(&mut self, row: Row) -> TableResult<()> {
        for name in row.cells.keys() {
            if self.schema.column(name).is_none() {
                return Err(TableError::schema_error(
                    "row references a column the schema does not define",
                    Some(name.clone()),
                ));
            }
        }

        let mut normalized = Row::new();
        for column in &self.schema.columns {
            let value = match row.cells.get(&column.name) {
                Some(value) if !value.is_null() => {
                    if value.cell_type() == Some(column.column_type) {
                        value.clone()
                    } else {
                        value.clone().cast_to(column.column_type)?
                    }
                }
                Some(_) | None => match (&column.default, column.nullable) {
                    (Some(default), _) => default.clone(),
                    (None, true) => CellValue::Null,
                    (None, false) => {
                        return Err(TableError::schema_error(
                            "non-nullable column has no value and no default",
                            Some(column.name.clone()),
                        ));
                    }
                },
            };
            normalized.set(column.name.clone(), value);
        }

        self.rows.push(normalized);
        debug!(
            "table '{}': inserted row ({} total)",
            self.name,
            self.rows.len()
        );
        Ok(())
    }

    /// Get a row by index
    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// All cells of one column in row order, nulls included
    pub fn column_values(&self, column: &str) -> TableResult<Vec<CellValue>> {
        self.schema.require_column(column)?;
        Ok(self
            .rows
            .iter()
            .map(|row| row.get(column).cloned().unwrap_or(CellValue::Null))
            .collect())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Remove all rows, keeping the schema
    pub fn truncate(&mut self) {
        debug!("table '{}': truncating {} rows", self.name, self.rows.len());
        self.rows.clear();
    }

    /// Gets statistics about the table
    pub fn stats(&self) -> TableStats {
        TableStats {
            name: self.name.clone(),
            row_count: self.rows.len(),
            column_count: self.schema.len(),
        }
    }

    /// Snapshot of the rows that pass the predicate
    pub fn filter_rows<F>(&self, predicate: F) -> Vec<Row>
    where
        F: Fn(&Row) -> bool,
    {
        self.rows.iter().filter(|r| predicate(r)).cloned().collect()
    }

    /// Apply a function to each row and collect the results
    pub fn map_rows<V, F>(&self, mapper: F) -> Vec<V>
    where
        F: Fn(&Row) -> V,
    {
        self.rows.iter().map(mapper).collect()
    }
}
