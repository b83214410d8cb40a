//! Table filter pass
//!
//! Applies a table's complete filter state to its rows: a row is kept when
//! every active column filter matches and the global filter matches.
//! Filters naming unknown or non-filterable columns are ignored.

use tablekit_core::{
    CellValue, ColumnFilterValue, ColumnMeta, FilterFnKind, GlobalFilter, RowAccessor,
    TableFilterState,
};

use crate::engine::FilterEngine;

static NULL_CELL: CellValue = CellValue::Null;

/// A column filter resolved against its column
struct ActiveFilter<'a> {
    column: &'a ColumnMeta,
    value: &'a ColumnFilterValue,
}

impl FilterEngine {
    /// Indices of the rows that pass `state`, in row order
    pub fn filter_rows<R: RowAccessor>(
        &self,
        rows: &[R],
        columns: &[ColumnMeta],
        state: &TableFilterState,
    ) -> Vec<usize> {
        let active = active_filters(columns, state);
        let global = state.global_filter.as_ref().filter(|g| !g.is_empty());

        if active.is_empty() && global.is_none() {
            return (0..rows.len()).collect();
        }

        let matched: Vec<usize> = rows
            .iter()
            .enumerate()
            .filter(|(_, row)| self.row_passes(*row, columns, &active, global))
            .map(|(idx, _)| idx)
            .collect();

        tracing::debug!(
            total = rows.len(),
            matched = matched.len(),
            column_filters = active.len(),
            global = global.is_some(),
            "Applied table filters"
        );

        matched
    }

    /// Whether a single row passes `state`
    pub fn row_matches<R: RowAccessor + ?Sized>(
        &self,
        row: &R,
        columns: &[ColumnMeta],
        state: &TableFilterState,
    ) -> bool {
        let active = active_filters(columns, state);
        let global = state.global_filter.as_ref().filter(|g| !g.is_empty());
        self.row_passes(row, columns, &active, global)
    }

    /// Run a column filter through the evaluator the column selects
    pub fn matches_column(
        &self,
        column: &ColumnMeta,
        cell: &CellValue,
        filter: Option<&ColumnFilterValue>,
    ) -> bool {
        match column.filter_fn_kind() {
            FilterFnKind::Extended => self.matches_column_filter(cell, filter),
            FilterFnKind::NumberRange => self.matches_number_range(cell, filter),
            FilterFnKind::DateRange => self.matches_date_range(cell, filter),
        }
    }

    fn row_passes<R: RowAccessor + ?Sized>(
        &self,
        row: &R,
        columns: &[ColumnMeta],
        active: &[ActiveFilter<'_>],
        global: Option<&GlobalFilter>,
    ) -> bool {
        let columns_pass = active.iter().all(|filter| {
            let cell = row.get_value(&filter.column.id).unwrap_or(&NULL_CELL);
            self.matches_column(filter.column, cell, Some(filter.value))
        });

        columns_pass
            && global
                .map(|g| self.matches_global_filter(row, columns, g))
                .unwrap_or(true)
    }
}

fn active_filters<'a>(columns: &'a [ColumnMeta], state: &'a TableFilterState) -> Vec<ActiveFilter<'a>> {
    state
        .column_filters
        .iter()
        .filter_map(|entry| {
            let Some(column) = columns.iter().find(|c| c.id == entry.id) else {
                tracing::debug!(column = %entry.id, "Ignoring filter for unknown column");
                return None;
            };
            if !column.can_filter {
                tracing::debug!(column = %entry.id, "Ignoring filter for non-filterable column");
                return None;
            }
            Some(ActiveFilter {
                column,
                value: &entry.value,
            })
        })
        .collect()
}
