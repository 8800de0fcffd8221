//! # rowset
//!
//! In-memory relational rowsets: typed nullable cells, schema-validated
//! tables, filtered/sorted views, and the utility surface that makes them
//! useful - coercion getters, aggregates, array helpers, delimited-text
//! parsing, date ranges, and placeholder keys.
//!
//! ## Features
//!
//! - **Typed nullable cells**: [`CellValue`] covers integers, floats,
//!   strings, booleans, dates, timestamps, exact decimals, and arrays,
//!   with SQL-style `Null` handling throughout
//! - **Tables and views**: schema-validated [`Table`] plus composable
//!   filtered/sorted [`TableView`] windows that never copy row data
//! - **Coercion getters**: lenient cell-to-primitive conversions with
//!   `_or` defaults for reading rows ergonomically
//! - **Aggregates**: count / sum / min / max / avg (and the statistics
//!   family) over table columns, view rows, or plain cell slices
//! - **Delimited text**: a quote-aware tokenizer and typed,
//!   type-inferring table ingestion
//!
//! ## Quick Start
//!
//! ```rust
//! use rowset::{Aggregates, CellType, CellValue, Column, Row, Schema, Table};
//!
//! let schema = Schema::new(vec![
//!     Column::new("item", CellType::String),
//!     Column::nullable("qty", CellType::Integer),
//! ]);
//! let mut orders = Table::new("orders", schema);
//!
//! orders
//!     .insert(
//!         Row::new()
//!             .with("item", CellValue::String("bolt".to_string()))
//!             .with("qty", CellValue::Integer(12)),
//!     )
//!     .unwrap();
//! orders
//!     .insert(Row::new().with("item", CellValue::String("nut".to_string())))
//!     .unwrap();
//!
//! assert_eq!(Aggregates::sum_column(&orders, "qty").unwrap(), CellValue::Integer(12));
//! assert_eq!(Aggregates::count_non_null_column(&orders, "qty").unwrap(), CellValue::Integer(1));
//! ```

pub mod rowset;

// Re-export the main API at crate root for easy access
pub use rowset::aggregate::{Aggregates, ColumnAccumulator};
pub use rowset::arrays::Arrays;
pub use rowset::coerce::RowValues;
pub use rowset::compare::CellComparator;
pub use rowset::dates::DateRange;
pub use rowset::error::{TableError, TableResult};
pub use rowset::table::{Column, Row, Schema, SortOrder, Table, TableStats, TableView};
pub use rowset::types::{CellType, CellValue};
