//! Column and schema definitions for tables.

use crate::rowset::error::{TableError, TableResult};
use crate::rowset::types::{CellType, CellValue};
use serde::{Deserialize, Serialize};

/// Definition of a single table column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub column_type: CellType,
    pub nullable: bool,
    /// Value used when an inserted row omits this column
    pub default: Option<CellValue>,
}

impl Column {
    /// Create a non-nullable column with no default
    pub fn new(name: impl Into<String>, column_type: CellType) -> Self {
        Column {
            name: name.into(),
            column_type,
            nullable: false,
            default: None,
        }
    }

    /// Create a nullable column
    pub fn nullable(name: impl Into<String>, column_type: CellType) -> Self {
        Column {
            name: name.into(),
            column_type,
            nullable: true,
            default: None,
        }
    }

    /// Attach a default value, used when inserted rows omit the column
    pub fn with_default(mut self, default: CellValue) -> Self {
        self.default = Some(default);
        self
    }
}

/// Ordered set of column definitions describing a table's shape
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Schema {
    pub columns: Vec<Column>,
}

impl Schema {
    pub fn new(columns: Vec<Column>) -> Self {
        Schema { columns }
    }

    /// Look up a column definition by name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Positional index of a column, if defined
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Check that a column exists, mapping absence to a schema error
    pub fn require_column(&self, name: &str) -> TableResult<&Column> {
        self.column(name).ok_or_else(|| {
            TableError::schema_error("column not found", Some(name.to_string()))
        })
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
