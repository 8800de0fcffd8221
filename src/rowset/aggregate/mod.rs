//! Aggregate functions over table columns, view rows, and cell slices.
//!
//! Aggregation is split the way the computation actually layers:
//! - [`compute`] - pure numeric kernels (Welford state, sum typing,
//!   median) with no cell-model dependency beyond input conversion
//! - [`accumulator`] - [`ColumnAccumulator`], the incremental per-column
//!   state fed one cell at a time
//! - [`functions`] - [`Aggregates`], the dispatch surface over the three
//!   input shapes (table column, view column, plain slice)
//!
//! Numeric aggregates dispatch over the closed set Integer / Float /
//! ScaledInteger / Decimal; any other non-null input surfaces as a
//! `TypeError` rather than being silently skipped.

pub mod accumulator;
pub mod compute;
pub mod functions;

pub use accumulator::ColumnAccumulator;
pub use compute::WelfordState;
pub use functions::Aggregates;
