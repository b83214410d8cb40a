//! Column filter predicates
//!
//! A column's filter state is either an explicit `{ operator, value }` object
//! or a raw value whose meaning is inferred from its shape:
//!
//! - two numbers, both above `TIMESTAMP_THRESHOLD_MS` → inclusive date range
//! - two numbers → inclusive numeric range
//! - any other list → membership
//! - a scalar → case-insensitive substring
//!
//! Falsy scalars and empty lists leave the column unfiltered. Unlike
//! JavaScript truthiness, where `[]` is truthy and would match nothing, an
//! empty selection here means "no filter".
//!
//! The two-number case is a heuristic. A price range like `[0, 2e12]` is read
//! as numeric, but `[1.5e12, 2e12]` is read as a date range even on a numeric
//! column. Columns whose variant is known should go through
//! `matches_number_range`/`matches_date_range`, which skip the guess.

use tablekit_core::{CellValue, ColumnFilterValue};

use crate::engine::FilterEngine;
use crate::operators::{in_inclusive_range, is_member};

/// Two-element numeric lists whose values both exceed this are read as
/// epoch-millisecond date ranges (Sep 2001 onwards).
pub const TIMESTAMP_THRESHOLD_MS: f64 = 1_000_000_000_000.0;

impl FilterEngine {
    /// Generic column predicate. `None` means no filter is active.
    pub fn matches_column_filter(&self, cell: &CellValue, filter: Option<&ColumnFilterValue>) -> bool {
        match filter {
            None => true,
            Some(ColumnFilterValue::Operator(op)) => {
                self.apply_operator(cell, op.operator, &op.value)
            }
            Some(ColumnFilterValue::Raw(raw)) => self.matches_raw_filter(cell, raw),
        }
    }

    /// Predicate for columns declared numeric. Two-element lists are always
    /// numeric ranges; a null bound leaves that side open.
    pub fn matches_number_range(&self, cell: &CellValue, filter: Option<&ColumnFilterValue>) -> bool {
        match filter {
            Some(ColumnFilterValue::Raw(CellValue::List(bounds))) if bounds.len() == 2 => {
                !cell.is_null()
                    && within_bounds(cell.to_number(), &bounds[0], &bounds[1], CellValue::to_number)
            }
            other => self.matches_column_filter(cell, other),
        }
    }

    /// Predicate for columns declared as dates. Two-element lists are always
    /// date ranges over epoch milliseconds or parseable date strings; a null
    /// bound leaves that side open.
    pub fn matches_date_range(&self, cell: &CellValue, filter: Option<&ColumnFilterValue>) -> bool {
        match filter {
            Some(ColumnFilterValue::Raw(CellValue::List(bounds))) if bounds.len() == 2 => {
                !cell.is_null()
                    && within_bounds(
                        cell.to_timestamp(),
                        &bounds[0],
                        &bounds[1],
                        CellValue::to_timestamp,
                    )
            }
            other => self.matches_column_filter(cell, other),
        }
    }

    fn matches_raw_filter(&self, cell: &CellValue, raw: &CellValue) -> bool {
        if is_inactive(raw) {
            return true;
        }
        if cell.is_null() {
            return false;
        }

        match raw {
            CellValue::List(items) => match numeric_pair(items) {
                Some((start, end))
                    if start > TIMESTAMP_THRESHOLD_MS && end > TIMESTAMP_THRESHOLD_MS =>
                {
                    in_inclusive_range(cell.to_timestamp(), start, end)
                }
                Some((min, max)) => in_inclusive_range(cell.to_number(), min, max),
                None => is_member(cell, items),
            },
            scalar => self.contains_text(cell, scalar),
        }
    }
}

/// Falsy raw values and empty lists leave the column unfiltered
fn is_inactive(raw: &CellValue) -> bool {
    match raw {
        CellValue::List(items) => items.is_empty(),
        other => other.is_falsy(),
    }
}

fn numeric_pair(items: &[CellValue]) -> Option<(f64, f64)> {
    match items {
        [CellValue::Num(a), CellValue::Num(b)] => Some((*a, *b)),
        _ => None,
    }
}

fn within_bounds(
    value: f64,
    min: &CellValue,
    max: &CellValue,
    coerce: fn(&CellValue) -> f64,
) -> bool {
    let lower = if min.is_null() {
        f64::NEG_INFINITY
    } else {
        coerce(min)
    };
    let upper = if max.is_null() {
        f64::INFINITY
    } else {
        coerce(max)
    };
    in_inclusive_range(value, lower, upper)
}
