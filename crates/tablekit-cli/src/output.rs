//! Rendering filter results and operator listings

use anyhow::Result;
use clap::ValueEnum;
use comfy_table::{Table, presets::UTF8_FULL};
use tablekit_core::{ColumnMeta, FilterOperator, FilterVariant, Row, RowAccessor};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Matching rows as a JSON array
    Json,
    /// Matching rows as a terminal table
    Table,
}

pub fn render_rows(rows: &[&Row], columns: &[ColumnMeta], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let objects: Vec<_> = rows.iter().map(|row| row.to_map()).collect();
            Ok(serde_json::to_string_pretty(&objects)?)
        }
        OutputFormat::Table => Ok(rows_table(rows, columns).to_string()),
    }
}

fn rows_table(rows: &[&Row], columns: &[ColumnMeta]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(columns.iter().map(|c| c.id.as_str()).collect::<Vec<_>>());

    for row in rows {
        let cells: Vec<String> = columns
            .iter()
            .map(|c| {
                row.get_value(&c.id)
                    .map(|cell| cell.to_text())
                    .unwrap_or_default()
            })
            .collect();
        table.add_row(cells);
    }
    table
}

/// Operators offered for `variant`, or every operator
pub fn render_operators(variant: Option<FilterVariant>) -> String {
    let operators = variant.map_or(FilterOperator::all(), |v| v.operators());
    let default = variant.map(|v| v.default_operator());

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Operator", "Label", "Operand"]);

    for op in operators {
        let tag = if Some(*op) == default {
            format!("{} (default)", op.tag())
        } else {
            op.tag().to_string()
        };
        table.add_row(vec![tag, op.label().to_string(), operand(*op).to_string()]);
    }
    table.to_string()
}

fn operand(op: FilterOperator) -> &'static str {
    if op.requires_two_values() {
        "two values"
    } else if op.takes_list() {
        "list"
    } else if op.requires_value() {
        "value"
    } else {
        "none"
    }
}
