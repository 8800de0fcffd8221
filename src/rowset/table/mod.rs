//! In-memory relational table model.
//!
//! A [`Table`] owns a [`Schema`] and a list of [`Row`]s whose cells are
//! nullable [`CellValue`]s. A [`TableView`] is a filtered and/or sorted
//! window over a table that borrows rather than copies the rows.
//!
//! [`CellValue`]: crate::rowset::types::CellValue

pub mod schema;
pub mod table;
pub mod view;

pub use schema::{Column, Schema};
pub use table::{Row, Table, TableStats};
pub use view::{SortOrder, TableView};
