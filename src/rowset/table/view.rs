//! Filtered and sorted views over a table.
//!
//! A [`TableView`] borrows its table and materializes only an index list,
//! so stacking filters and sorts never copies row data.

use crate::rowset::compare::CellComparator;
use crate::rowset::error::TableResult;
use crate::rowset::table::schema::Schema;
use crate::rowset::table::table::{Row, Table};
use crate::rowset::types::CellValue;
use log::warn;
use std::cmp::Ordering;

/// Sort direction for [`TableView::sorted_by`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// A filtered, ordered window over a [`Table`]
///
/// Views compose: `view.filtered(..)` and `view.sorted_by(..)` each return
/// a new view over the same table.
#[derive(Debug, Clone)]
pub struct TableView<'a> {
    table: &'a Table,
    indices: Vec<usize>,
}

impl<'a> TableView<'a> {
    /// View over every row of the table, in insertion order
    pub fn of(table: &'a Table) -> Self {
        TableView {
            table,
            indices: (0..table.len()).collect(),
        }
    }

    pub fn table(&self) -> &Table {
        self.table
    }

    pub fn schema(&self) -> &Schema {
        self.table.schema()
    }

    /// Row indices (into the underlying table) this view exposes
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Retain only rows matching the predicate
    pub fn filtered<F>(&self, predicate: F) -> TableView<'a>
    where
        F: Fn(&Row) -> bool,
    {
        let indices = self
            .indices
            .iter()
            .copied()
            .filter(|&idx| self.table.row(idx).map(&predicate).unwrap_or(false))
            .collect();
        TableView {
            table: self.table,
            indices,
        }
    }

    /// Order the view by one column
    ///
    /// Nulls sort first ascending and last descending, mirroring SQL.
    /// Rows whose cells cannot be mutually ordered keep their relative
    /// order; the column must exist in the schema.
    pub fn sorted_by(&self, column: &str, order: SortOrder) -> TableResult<TableView<'a>> {
        self.table.schema().require_column(column)?;

        let mut indices = self.indices.clone();
        indices.sort_by(|&a, &b| {
            let left = self.cell(a, column);
            let right = self.cell(b, column);
            let ordering = match (left, right) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Less,
                (Some(_), None) => Ordering::Greater,
                (Some(l), Some(r)) => CellComparator::compare(l, r).unwrap_or_else(|_| {
                    warn!(
                        "view sort on '{}': incomparable cells {} and {}",
                        column,
                        l.type_name(),
                        r.type_name()
                    );
                    Ordering::Equal
                }),
            };
            match order {
                SortOrder::Ascending => ordering,
                SortOrder::Descending => ordering.reverse(),
            }
        });

        Ok(TableView {
            table: self.table,
            indices,
        })
    }

    /// Non-null cell at (view row, column); `None` for absent or null
    fn cell(&self, index: usize, column: &str) -> Option<&CellValue> {
        self.table
            .row(index)
            .and_then(|row| row.get(column))
            .filter(|value| !value.is_null())
    }

    /// Iterate the rows the view exposes, in view order
    pub fn iter(&self) -> impl Iterator<Item = &Row> {
        self.indices.iter().filter_map(|&idx| self.table.row(idx))
    }

    /// All cells of one column in view order, nulls included
    pub fn column_values(&self, column: &str) -> TableResult<Vec<CellValue>> {
        self.table.schema().require_column(column)?;
        Ok(self
            .iter()
            .map(|row| row.get(column).cloned().unwrap_or(CellValue::Null))
            .collect())
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Materialize the view as a new table with the same schema
    pub fn to_table(&self, name: impl Into<String>) -> Table {
        let mut table = Table::new(name, self.table.schema().clone());
        for row in self.iter() {
            // Rows already satisfy the shared schema
            let _ = table.insert(row.clone());
        }
        table
    }
}
