//! Core types for tablekit

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

use crate::filter_types::{FilterFnKind, FilterVariant};

/// A materialized table cell
///
/// Deserializing from JSON never yields `DateTime`: strings stay strings so
/// that string comparisons keep their case-insensitive semantics.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Absent value (null or undefined)
    #[default]
    Null,
    /// Boolean
    Bool(bool),
    /// Number (all numerics are carried as f64)
    Num(f64),
    /// UTF-8 string
    Str(String),
    /// Point in time, UTC
    DateTime(DateTime<Utc>),
    /// Array of values
    List(Vec<CellValue>),
}

impl CellValue {
    /// Check if the value is absent
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Check if the value is a number
    pub fn is_number(&self) -> bool {
        matches!(self, CellValue::Num(_))
    }

    /// Try to get as a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as f64 without coercion
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Num(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to get as a list
    pub fn as_list(&self) -> Option<&[CellValue]> {
        match self {
            CellValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Numeric coercion. Anything that does not read as a number is `NaN`.
    pub fn to_number(&self) -> f64 {
        match self {
            CellValue::Num(n) => *n,
            CellValue::Bool(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            CellValue::DateTime(dt) => dt.timestamp_millis() as f64,
            CellValue::Str(s) => parse_number(s),
            CellValue::List(_) | CellValue::Null => f64::NAN,
        }
    }

    /// String form used by text comparisons. `Null` reads as the empty string.
    pub fn to_text(&self) -> String {
        self.to_string()
    }

    /// Epoch milliseconds for date comparisons, `NaN` when the value is not a date.
    pub fn to_timestamp(&self) -> f64 {
        match self {
            CellValue::DateTime(dt) => dt.timestamp_millis() as f64,
            CellValue::Num(n) => *n,
            CellValue::Str(s) => parse_timestamp(s).unwrap_or(f64::NAN),
            _ => f64::NAN,
        }
    }

    /// Null, false, zero, NaN and the empty string are falsy.
    pub fn is_falsy(&self) -> bool {
        match self {
            CellValue::Null => true,
            CellValue::Bool(b) => !b,
            CellValue::Num(n) => *n == 0.0 || n.is_nan(),
            CellValue::Str(s) => s.is_empty(),
            CellValue::DateTime(_) | CellValue::List(_) => false,
        }
    }
}

/// Parse a number the way a lenient table UI does: surrounding whitespace is
/// ignored and a blank string reads as zero.
fn parse_number(s: &str) -> f64 {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    // f64::from_str also accepts "inf" and "nan", which are not numbers here
    if trimmed
        .bytes()
        .any(|b| b.is_ascii_alphabetic() && b != b'e' && b != b'E')
    {
        return f64::NAN;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

fn parse_timestamp(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.timestamp_millis() as f64);
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(naive.and_utc().timestamp_millis() as f64);
        }
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().timestamp_millis() as f64)
}

fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        }
    } else if n == 0.0 {
        // Covers -0.0
        "0".to_string()
    } else {
        format!("{}", n)
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::Bool(v) => write!(f, "{}", v),
            CellValue::Num(v) => write!(f, "{}", format_number(*v)),
            CellValue::Str(v) => write!(f, "{}", v),
            CellValue::DateTime(v) => {
                write!(f, "{}", v.to_rfc3339_opts(SecondsFormat::Millis, true))
            }
            CellValue::List(items) => {
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", item)?;
                }
                Ok(())
            }
        }
    }
}

impl<'de> Deserialize<'de> for CellValue {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        serde_json::Value::deserialize(deserializer).map(CellValue::from)
    }
}

impl From<serde_json::Value> for CellValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => CellValue::Null,
            serde_json::Value::Bool(b) => CellValue::Bool(b),
            serde_json::Value::Number(n) => CellValue::Num(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => CellValue::Str(s),
            serde_json::Value::Array(items) => {
                CellValue::List(items.into_iter().map(CellValue::from).collect())
            }
            object @ serde_json::Value::Object(_) => CellValue::Str(object.to_string()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Str(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Str(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Num(value)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        CellValue::Num(value as f64)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Num(value as f64)
    }
}

impl From<DateTime<Utc>> for CellValue {
    fn from(value: DateTime<Utc>) -> Self {
        CellValue::DateTime(value)
    }
}

impl<T: Into<CellValue>> From<Vec<T>> for CellValue {
    fn from(values: Vec<T>) -> Self {
        CellValue::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(CellValue::Null)
    }
}

/// Field lookup over a row.
///
/// A `None` answer is treated exactly like a `CellValue::Null` cell.
pub trait RowAccessor {
    fn get_value(&self, column_id: &str) -> Option<&CellValue>;
}

impl RowAccessor for HashMap<String, CellValue> {
    fn get_value(&self, column_id: &str) -> Option<&CellValue> {
        self.get(column_id)
    }
}

impl RowAccessor for IndexMap<String, CellValue> {
    fn get_value(&self, column_id: &str) -> Option<&CellValue> {
        self.get(column_id)
    }
}

/// A table row with positional values
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// Cell values
    pub values: Vec<CellValue>,
    /// Column ids, parallel to `values`
    columns: Vec<String>,
}

impl Row {
    /// Create a new row
    pub fn new(columns: Vec<String>, values: Vec<CellValue>) -> Self {
        Self { values, columns }
    }

    /// Build a row from a JSON object, keeping key order
    pub fn from_json_object(object: serde_json::Map<String, serde_json::Value>) -> Self {
        let (columns, values) = object
            .into_iter()
            .map(|(key, value)| (key, CellValue::from(value)))
            .unzip();
        Self { values, columns }
    }

    /// Get a value by column index
    pub fn get(&self, index: usize) -> Option<&CellValue> {
        self.values.get(index)
    }

    /// Get a value by column id
    pub fn get_by_name(&self, name: &str) -> Option<&CellValue> {
        self.columns
            .iter()
            .position(|c| c == name)
            .and_then(|idx| self.values.get(idx))
    }

    /// Get column ids
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Convert to an ordered map
    pub fn to_map(&self) -> IndexMap<String, CellValue> {
        self.columns
            .iter()
            .zip(self.values.iter())
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

impl RowAccessor for Row {
    fn get_value(&self, column_id: &str) -> Option<&CellValue> {
        self.get_by_name(column_id)
    }
}

/// Column metadata relevant to filtering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnMeta {
    /// Column id, matched against `ColumnFilter::field_id`
    pub id: String,
    /// Whether the column takes part in filtering and global search
    #[serde(default = "default_can_filter")]
    pub can_filter: bool,
    /// UI control type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<FilterVariant>,
    /// Explicit evaluator override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_fn: Option<FilterFnKind>,
}

fn default_can_filter() -> bool {
    true
}

impl ColumnMeta {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            can_filter: true,
            variant: None,
            filter_fn: None,
        }
    }

    pub fn with_variant(mut self, variant: FilterVariant) -> Self {
        self.variant = Some(variant);
        self
    }

    pub fn with_filter_fn(mut self, filter_fn: FilterFnKind) -> Self {
        self.filter_fn = Some(filter_fn);
        self
    }

    pub fn without_filtering(mut self) -> Self {
        self.can_filter = false;
        self
    }

    /// The evaluator this column's filter runs through: the explicit override
    /// first, then the one implied by the variant.
    pub fn filter_fn_kind(&self) -> FilterFnKind {
        self.filter_fn
            .or_else(|| self.variant.map(|v| v.default_filter_fn()))
            .unwrap_or_default()
    }
}
