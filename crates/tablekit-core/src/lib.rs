//! tablekit Core - data model shared by the filter engine and its front ends
//!
//! This crate defines the plain-data shapes that travel between a table UI
//! and the filter engine:
//!
//! - `CellValue` - a materialized cell (string, number, boolean, date, list, null)
//! - `FilterOperator`, `FilterVariant`, `JoinOperator` - filter vocabulary
//! - `ColumnFilter`, `FilterGroup`, `GlobalFilter` - structured filters
//! - `TableFilterState` - the complete filter state of a table
//! - `RowAccessor` - field lookup over a row

mod error;
mod filter_types;
mod types;


pub use error::*;
pub use filter_types::*;
pub use types::*;
