//! Operator evaluation
//!
//! Decides whether a single cell satisfies `operator value`. The evaluator
//! dispatches on the shape of the cell and filter values, never on the column
//! variant, and coerces per operator:
//!
//! - text operators compare lowercased string forms
//! - comparison and range operators coerce both sides to numbers and fail on `NaN`
//! - `eq`/`neq` pick a comparison from the pair of shapes (see `loosely_equal`)
//!
//! A null cell only ever satisfies `empty`.

use chrono::{NaiveDate, TimeZone, Utc};
use tablekit_core::{CellValue, FilterOperator};

use crate::engine::FilterEngine;

/// Flags used for every substring pattern
pub(crate) const CASE_INSENSITIVE: &str = "i";

impl FilterEngine {
    /// Evaluate `cell operator filter_value`
    pub fn apply_operator(
        &self,
        cell: &CellValue,
        operator: FilterOperator,
        filter_value: &CellValue,
    ) -> bool {
        if cell.is_null() {
            return operator == FilterOperator::Empty;
        }

        match operator {
            FilterOperator::Contains | FilterOperator::Unrecognized => {
                self.contains_text(cell, filter_value)
            }
            FilterOperator::NotContains => !self.contains_text(cell, filter_value),

            FilterOperator::Eq => loosely_equal(cell, filter_value),
            FilterOperator::Neq => !loosely_equal(cell, filter_value),

            FilterOperator::Empty => is_empty_value(cell),
            FilterOperator::NotEmpty => !is_empty_value(cell),

            FilterOperator::Lt => compare_numbers(cell, filter_value, |a, b| a < b),
            FilterOperator::Lte => compare_numbers(cell, filter_value, |a, b| a <= b),
            FilterOperator::Gt => compare_numbers(cell, filter_value, |a, b| a > b),
            FilterOperator::Gte => compare_numbers(cell, filter_value, |a, b| a >= b),

            FilterOperator::Between => is_between(cell, filter_value),

            FilterOperator::In => filter_value
                .as_list()
                .map(|items| is_member(cell, items))
                .unwrap_or(false),
            // Without a list there is nothing to exclude
            FilterOperator::NotIn => filter_value
                .as_list()
                .map(|items| !is_member(cell, items))
                .unwrap_or(true),

            // TODO: give `relative` real semantics once the UI defines its ranges
            FilterOperator::Relative => true,
        }
    }

    /// Case-insensitive substring test of `needle`'s string form in `cell`'s
    pub(crate) fn contains_text(&self, cell: &CellValue, needle: &CellValue) -> bool {
        let haystack = cell.to_text().to_lowercase();
        let needle = needle.to_text().to_lowercase();
        self.substring_match(&haystack, &needle)
    }

    /// Substring test through the regex cache. Both arguments must already be
    /// lowercased. Falls back to a plain substring search when the pattern
    /// could not be compiled.
    pub(crate) fn substring_match(&self, haystack: &str, needle: &str) -> bool {
        let pattern = self
            .cache
            .get_or_compile(&regex::escape(needle), CASE_INSENSITIVE);
        if pattern.is_fallback() {
            return haystack.contains(needle);
        }
        pattern.is_match(haystack)
    }
}

/// Type-aware equality behind `eq` and `neq`
///
/// - string and string: case-insensitive
/// - boolean cell and string filter: string forms, exact
/// - date cell and number filter: same UTC calendar day
/// - either side numeric: numeric equality (`NaN` never equal)
/// - anything else: strict equality
pub(crate) fn loosely_equal(cell: &CellValue, filter_value: &CellValue) -> bool {
    match (cell, filter_value) {
        (CellValue::Str(a), CellValue::Str(b)) => a.to_lowercase() == b.to_lowercase(),
        (CellValue::Bool(a), CellValue::Str(b)) => a.to_string() == *b,
        (CellValue::DateTime(dt), CellValue::Num(ms)) => {
            same_day(dt.timestamp_millis() as f64, *ms)
        }
        _ => {
            let a = cell.to_number();
            let b = filter_value.to_number();
            if cell.is_number() || !a.is_nan() || !b.is_nan() {
                a == b
            } else {
                cell == filter_value
            }
        }
    }
}

/// Whether two epoch-millisecond instants fall on the same UTC calendar day
pub(crate) fn same_day(a_ms: f64, b_ms: f64) -> bool {
    match (utc_day(a_ms), utc_day(b_ms)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

fn utc_day(ms: f64) -> Option<NaiveDate> {
    if !ms.is_finite() {
        return None;
    }
    Utc.timestamp_millis_opt(ms as i64)
        .single()
        .map(|dt| dt.date_naive())
}

fn is_empty_value(cell: &CellValue) -> bool {
    match cell {
        CellValue::Str(s) => s.trim().is_empty(),
        other => other.is_null(),
    }
}

fn compare_numbers(cell: &CellValue, filter_value: &CellValue, cmp: fn(f64, f64) -> bool) -> bool {
    let a = cell.to_number();
    let b = filter_value.to_number();
    if a.is_nan() || b.is_nan() {
        return false;
    }
    cmp(a, b)
}

fn is_between(cell: &CellValue, filter_value: &CellValue) -> bool {
    let Some([min, max, ..]) = filter_value.as_list() else {
        return false;
    };
    in_inclusive_range(cell.to_number(), min.to_number(), max.to_number())
}

/// `min <= value <= max`, false when any side is `NaN`
pub(crate) fn in_inclusive_range(value: f64, min: f64, max: f64) -> bool {
    if value.is_nan() || min.is_nan() || max.is_nan() {
        return false;
    }
    min <= value && value <= max
}

/// List membership: case-insensitive for string cells, by string form otherwise
pub(crate) fn is_member(cell: &CellValue, items: &[CellValue]) -> bool {
    match cell {
        CellValue::Str(s) => {
            let needle = s.to_lowercase();
            items
                .iter()
                .any(|item| item.to_text().to_lowercase() == needle)
        }
        other => {
            let needle = other.to_text();
            items.iter().any(|item| item.to_text() == needle)
        }
    }
}
