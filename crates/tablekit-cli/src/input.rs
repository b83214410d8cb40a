//! Loading rows, columns and filter state from JSON files

use anyhow::{Context, Result, anyhow, bail};
use serde_json::Value;
use std::path::Path;
use tablekit_core::{ColumnMeta, Row, TableFilterState};

pub fn load_rows(path: &Path) -> Result<Vec<Row>> {
    let content = read(path)?;
    parse_rows(&content).with_context(|| format!("Invalid rows in {}", path.display()))
}

pub fn load_columns(path: &Path) -> Result<Vec<ColumnMeta>> {
    let content = read(path)?;
    parse_columns(&content).with_context(|| format!("Invalid columns in {}", path.display()))
}

pub fn load_state(path: &Path) -> Result<TableFilterState> {
    let content = read(path)?;
    TableFilterState::from_json(&content)
        .with_context(|| format!("Invalid filter state in {}", path.display()))
}

/// Parse a JSON array of row objects
pub fn parse_rows(json: &str) -> Result<Vec<Row>> {
    let Value::Array(items) = serde_json::from_str::<Value>(json)? else {
        bail!("expected a JSON array of row objects");
    };

    items
        .into_iter()
        .enumerate()
        .map(|(idx, item)| match item {
            Value::Object(object) => Ok(Row::from_json_object(object)),
            other => Err(anyhow!("row {idx} is not an object: {other}")),
        })
        .collect()
}

pub fn parse_columns(json: &str) -> Result<Vec<ColumnMeta>> {
    Ok(serde_json::from_str(json)?)
}

/// Filterable text columns named after the first row's keys
pub fn infer_columns(rows: &[Row]) -> Vec<ColumnMeta> {
    rows.first()
        .map(|row| row.columns().iter().map(ColumnMeta::new).collect())
        .unwrap_or_default()
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}
