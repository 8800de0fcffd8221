pub mod aggregate;
pub mod arrays;
pub mod coerce;
pub mod compare;
pub mod dates;
pub mod error;
pub mod keys;
pub mod table;
pub mod text;
pub mod types;

// Re-export the working set for callers that want one import
pub use aggregate::{Aggregates, ColumnAccumulator};
pub use error::{TableError, TableResult};
pub use table::{Column, Row, Schema, SortOrder, Table, TableView};
pub use types::{CellType, CellValue};
