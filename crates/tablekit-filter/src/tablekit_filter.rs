//! tablekit Filter - row filter evaluation
//!
//! Decides whether a table row matches its column filters and global filter:
//!
//! - `regex_cache` - bounded cache of compiled substring patterns
//! - `operators` - per-operator semantics across text, number, date and list values
//! - `column` - column predicates with shorthand inference and range evaluators
//! - `global` - search and AND/OR/mixed filter groups
//! - `table` - the full filter pass over a row set
//!
//! Evaluation never fails. Malformed patterns, unparseable numbers and
//! missing values degrade to a boolean answer.
//!
//! The free functions below evaluate through `FilterEngine::shared()`.

mod column;
mod engine;
mod global;
mod operators;
pub mod regex_cache;
mod settings;
mod table;

#[cfg(test)]
mod column_tests;
#[cfg(test)]
mod global_tests;
#[cfg(test)]
mod operators_tests;
#[cfg(test)]
mod regex_cache_tests;
#[cfg(test)]
mod settings_tests;
#[cfg(test)]
mod table_tests;

pub use column::TIMESTAMP_THRESHOLD_MS;
pub use engine::FilterEngine;
pub use global::and_groups;
pub use regex_cache::{CachedRegex, RegexCache};
pub use settings::FilterSettings;

use tablekit_core::{
    CellValue, ColumnFilterValue, ColumnMeta, FilterOperator, GlobalFilter, RowAccessor,
    TableFilterState,
};

/// Evaluate `cell operator filter_value` with the shared engine
pub fn apply_operator(cell: &CellValue, operator: FilterOperator, filter_value: &CellValue) -> bool {
    FilterEngine::shared().apply_operator(cell, operator, filter_value)
}

/// Generic column predicate with the shared engine
pub fn matches_column_filter(cell: &CellValue, filter: Option<&ColumnFilterValue>) -> bool {
    FilterEngine::shared().matches_column_filter(cell, filter)
}

/// Global predicate with the shared engine
pub fn matches_global_filter<R: RowAccessor + ?Sized>(
    row: &R,
    columns: &[ColumnMeta],
    filter: &GlobalFilter,
) -> bool {
    FilterEngine::shared().matches_global_filter(row, columns, filter)
}

/// Table filter pass with the shared engine
pub fn filter_rows<R: RowAccessor>(
    rows: &[R],
    columns: &[ColumnMeta],
    state: &TableFilterState,
) -> Vec<usize> {
    FilterEngine::shared().filter_rows(rows, columns, state)
}
