//! Global filter predicate
//!
//! The global filter is either a search string matched against every
//! filterable column, or a `FilterGroup` combined by its join operator:
//!
//! - `or`: any filter matches
//! - `and`: every filter matches
//! - `mixed`: AND binds tighter than OR. Each filter tagged `or` opens a new
//!   group, every other filter continues the current one, so
//!   `A and B or C and D` reads as `(A and B) or (C and D)`.
//!
//! Per-filter tags are ignored outside `mixed`.

use tablekit_core::{CellValue, ColumnFilter, ColumnMeta, FilterGroup, GlobalFilter, JoinOperator, RowAccessor};

use crate::engine::FilterEngine;

static NULL_CELL: CellValue = CellValue::Null;

impl FilterEngine {
    pub fn matches_global_filter<R: RowAccessor + ?Sized>(
        &self,
        row: &R,
        columns: &[ColumnMeta],
        filter: &GlobalFilter,
    ) -> bool {
        match filter {
            GlobalFilter::Search(text) => self.matches_search(row, columns, text),
            GlobalFilter::Group(group) => self.matches_filter_group(row, group),
        }
    }

    /// Case-insensitive substring search across filterable, non-null cells.
    /// An empty search matches every row.
    pub fn matches_search<R: RowAccessor + ?Sized>(
        &self,
        row: &R,
        columns: &[ColumnMeta],
        text: &str,
    ) -> bool {
        if text.is_empty() {
            return true;
        }
        let needle = text.to_lowercase();

        columns
            .iter()
            .filter(|column| column.can_filter)
            .any(|column| match row.get_value(&column.id) {
                None | Some(CellValue::Null) => false,
                Some(cell) => self.substring_match(&cell.to_text().to_lowercase(), &needle),
            })
    }

    /// Evaluate a filter group. An empty group matches every row.
    pub fn matches_filter_group<R: RowAccessor + ?Sized>(&self, row: &R, group: &FilterGroup) -> bool {
        if group.filters.is_empty() {
            return true;
        }

        match group.join_operator {
            JoinOperator::Or => group.filters.iter().any(|f| self.matches_filter(row, f)),
            JoinOperator::Mixed => self.matches_mixed(row, &group.filters),
            JoinOperator::And => group.filters.iter().all(|f| self.matches_filter(row, f)),
        }
    }

    /// Evaluate one structured filter against the row's cell for its field
    pub fn matches_filter<R: RowAccessor + ?Sized>(&self, row: &R, filter: &ColumnFilter) -> bool {
        let cell = row.get_value(&filter.field_id).unwrap_or(&NULL_CELL);
        self.apply_operator(cell, filter.operator, &filter.value)
    }

    fn matches_mixed<R: RowAccessor + ?Sized>(&self, row: &R, filters: &[ColumnFilter]) -> bool {
        if let [only] = filters {
            return self.matches_filter(row, only);
        }

        let groups = and_groups(filters);
        tracing::trace!(filters = filters.len(), groups = groups.len(), "Evaluating mixed filter group");

        groups
            .iter()
            .any(|group| group.iter().all(|f| self.matches_filter(row, f)))
    }
}

/// Split a mixed sequence into AND-groups. A new group starts at every filter
/// after the first whose own join operator is `or`.
pub fn and_groups(filters: &[ColumnFilter]) -> Vec<&[ColumnFilter]> {
    let mut groups = Vec::new();
    if filters.is_empty() {
        return groups;
    }

    let mut start = 0;
    for (idx, filter) in filters.iter().enumerate().skip(1) {
        if filter.starts_or_group() {
            groups.push(&filters[start..idx]);
            start = idx;
        }
    }
    groups.push(&filters[start..]);
    groups
}
