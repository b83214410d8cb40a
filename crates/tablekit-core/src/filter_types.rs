//! Filter types for tablekit
//!
//! Shared data structures describing column filters, filter groups and the
//! complete filter state of a table. All of them serialize to the camelCase
//! JSON shapes a table UI persists (URL query strings, local state).

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Result;
use crate::types::CellValue;

/// Filter operators understood by the evaluator
///
/// The snake_case tags are canonical; the camelCase aliases are the tags
/// table UIs commonly emit. Unknown tags decode as `Unrecognized`, which
/// evaluates like `Contains`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOperator {
    // String operators
    #[default]
    #[serde(alias = "iLike", alias = "ilike")]
    Contains,
    #[serde(alias = "notILike", alias = "not_ilike")]
    NotContains,

    // Equality operators
    Eq,
    #[serde(alias = "ne")]
    Neq,

    // Comparison operators
    Lt,
    Lte,
    Gt,
    Gte,

    // Range operators
    #[serde(alias = "isBetween")]
    Between,

    // List operators
    #[serde(alias = "inArray")]
    In,
    #[serde(alias = "notInArray")]
    NotIn,

    // Empty operators
    #[serde(alias = "isEmpty")]
    Empty,
    #[serde(alias = "isNotEmpty")]
    NotEmpty,

    // Date operators
    #[serde(alias = "isRelativeToToday")]
    Relative,

    #[serde(other)]
    Unrecognized,
}

impl FilterOperator {
    /// Get the display label for the operator
    pub fn label(&self) -> &'static str {
        match self {
            Self::Contains => "contains",
            Self::NotContains => "does not contain",
            Self::Eq => "is",
            Self::Neq => "is not",
            Self::Lt => "is less than",
            Self::Lte => "is less than or equal to",
            Self::Gt => "is greater than",
            Self::Gte => "is greater than or equal to",
            Self::Between => "is between",
            Self::In => "has any of",
            Self::NotIn => "has none of",
            Self::Empty => "is empty",
            Self::NotEmpty => "is not empty",
            Self::Relative => "is relative to today",
            Self::Unrecognized => "contains",
        }
    }

    /// Canonical tag, as serialized
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Contains => "contains",
            Self::NotContains => "not_contains",
            Self::Eq => "eq",
            Self::Neq => "neq",
            Self::Lt => "lt",
            Self::Lte => "lte",
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::Between => "between",
            Self::In => "in",
            Self::NotIn => "not_in",
            Self::Empty => "empty",
            Self::NotEmpty => "not_empty",
            Self::Relative => "relative",
            Self::Unrecognized => "unrecognized",
        }
    }

    /// Parse a tag, accepting the canonical names and the UI aliases
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "contains" | "iLike" | "ilike" => Self::Contains,
            "not_contains" | "notILike" | "not_ilike" => Self::NotContains,
            "eq" => Self::Eq,
            "neq" | "ne" => Self::Neq,
            "lt" => Self::Lt,
            "lte" => Self::Lte,
            "gt" => Self::Gt,
            "gte" => Self::Gte,
            "between" | "isBetween" => Self::Between,
            "in" | "inArray" => Self::In,
            "not_in" | "notInArray" => Self::NotIn,
            "empty" | "isEmpty" => Self::Empty,
            "not_empty" | "isNotEmpty" => Self::NotEmpty,
            "relative" | "isRelativeToToday" => Self::Relative,
            _ => Self::Unrecognized,
        }
    }

    /// Returns true if this operator requires a value input
    pub fn requires_value(&self) -> bool {
        !matches!(self, Self::Empty | Self::NotEmpty)
    }

    /// Returns true if this operator requires two values (for BETWEEN)
    pub fn requires_two_values(&self) -> bool {
        matches!(self, Self::Between)
    }

    /// Returns true if this operator takes a list of values
    pub fn takes_list(&self) -> bool {
        matches!(self, Self::In | Self::NotIn)
    }

    /// Get all available operators in display order
    pub fn all() -> &'static [FilterOperator] {
        &[
            Self::Contains,
            Self::NotContains,
            Self::Eq,
            Self::Neq,
            Self::Lt,
            Self::Lte,
            Self::Gt,
            Self::Gte,
            Self::Between,
            Self::In,
            Self::NotIn,
            Self::Empty,
            Self::NotEmpty,
            Self::Relative,
        ]
    }
}

impl std::fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// UI control type of a column. Informative only: the evaluator dispatches on
/// value shape, the variant merely picks defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterVariant {
    Text,
    Number,
    Range,
    Date,
    #[serde(alias = "dateRange")]
    DateRange,
    Boolean,
    Select,
    #[serde(alias = "multiSelect")]
    MultiSelect,
}

impl FilterVariant {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::Number => "Number",
            Self::Range => "Range",
            Self::Date => "Date",
            Self::DateRange => "Date range",
            Self::Boolean => "Boolean",
            Self::Select => "Select",
            Self::MultiSelect => "Multi-select",
        }
    }

    /// Operator preselected when a filter is created for this variant
    pub fn default_operator(&self) -> FilterOperator {
        match self {
            Self::Text => FilterOperator::Contains,
            Self::Number | Self::Range | Self::Date | Self::Boolean | Self::Select => {
                FilterOperator::Eq
            }
            Self::DateRange => FilterOperator::Between,
            Self::MultiSelect => FilterOperator::In,
        }
    }

    /// Operators offered for this variant, in display order
    pub fn operators(&self) -> &'static [FilterOperator] {
        use FilterOperator as Op;
        match self {
            Self::Text => &[Op::Contains, Op::NotContains, Op::Eq, Op::Neq, Op::Empty, Op::NotEmpty],
            Self::Number | Self::Range => &[
                Op::Eq,
                Op::Neq,
                Op::Lt,
                Op::Lte,
                Op::Gt,
                Op::Gte,
                Op::Between,
                Op::Empty,
                Op::NotEmpty,
            ],
            Self::Date | Self::DateRange => &[
                Op::Eq,
                Op::Neq,
                Op::Lt,
                Op::Lte,
                Op::Gt,
                Op::Gte,
                Op::Between,
                Op::Relative,
                Op::Empty,
                Op::NotEmpty,
            ],
            Self::Boolean => &[Op::Eq, Op::Neq],
            Self::Select => &[Op::Eq, Op::Neq, Op::Empty, Op::NotEmpty],
            Self::MultiSelect => &[Op::In, Op::NotIn, Op::Empty, Op::NotEmpty],
        }
    }

    /// Column evaluator implied by this variant
    pub fn default_filter_fn(&self) -> FilterFnKind {
        match self {
            Self::Number | Self::Range => FilterFnKind::NumberRange,
            Self::Date | Self::DateRange => FilterFnKind::DateRange,
            _ => FilterFnKind::Extended,
        }
    }
}

/// Which column evaluator a column filter runs through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterFnKind {
    /// Generic predicate with shape-based shorthand inference
    #[default]
    #[serde(alias = "extendedFilter")]
    Extended,
    #[serde(alias = "numberRange")]
    NumberRange,
    #[serde(alias = "dateRange")]
    DateRange,
}

/// Logical operator for combining filters
///
/// On a `FilterGroup` all three apply. On an individual `ColumnFilter` only
/// `And`/`Or` carry meaning: they relate the filter to the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinOperator {
    Or,
    Mixed,
    /// Unknown tags decode as `And`
    #[default]
    #[serde(other)]
    And,
}

impl JoinOperator {
    pub fn label(&self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
            Self::Mixed => "mixed",
        }
    }

    pub fn toggle(&self) -> Self {
        match self {
            Self::And => Self::Or,
            Self::Or => Self::And,
            Self::Mixed => Self::Mixed,
        }
    }
}

/// A single filter condition bound to one field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnFilter {
    /// Column the condition reads
    pub field_id: String,
    /// Filter operator
    pub operator: FilterOperator,
    /// Scalar or list operand; absent reads as null
    #[serde(default)]
    pub value: CellValue,
    /// Relation to the previous filter under `JoinOperator::Mixed`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub join_operator: Option<JoinOperator>,
}

impl ColumnFilter {
    pub fn new(
        field_id: impl Into<String>,
        operator: FilterOperator,
        value: impl Into<CellValue>,
    ) -> Self {
        Self {
            field_id: field_id.into(),
            operator,
            value: value.into(),
            join_operator: None,
        }
    }

    pub fn with_join(mut self, join_operator: JoinOperator) -> Self {
        self.join_operator = Some(join_operator);
        self
    }

    /// Whether this filter opens a new AND-group in a mixed sequence
    pub fn starts_or_group(&self) -> bool {
        self.join_operator == Some(JoinOperator::Or)
    }
}

/// A set of filters and the operator combining them
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterGroup {
    #[serde(default)]
    pub filters: Vec<ColumnFilter>,
    #[serde(default)]
    pub join_operator: JoinOperator,
}

impl FilterGroup {
    pub fn new(filters: Vec<ColumnFilter>, join_operator: JoinOperator) -> Self {
        Self {
            filters,
            join_operator,
        }
    }

    pub fn all(filters: Vec<ColumnFilter>) -> Self {
        Self::new(filters, JoinOperator::And)
    }

    pub fn any(filters: Vec<ColumnFilter>) -> Self {
        Self::new(filters, JoinOperator::Or)
    }

    pub fn mixed(filters: Vec<ColumnFilter>) -> Self {
        Self::new(filters, JoinOperator::Mixed)
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

/// Global filter payload: a plain search string or a structured group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GlobalFilter {
    Search(String),
    Group(FilterGroup),
}

impl GlobalFilter {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Search(text) => text.is_empty(),
            Self::Group(group) => group.is_empty(),
        }
    }
}

impl From<&str> for GlobalFilter {
    fn from(value: &str) -> Self {
        Self::Search(value.to_string())
    }
}

impl From<FilterGroup> for GlobalFilter {
    fn from(value: FilterGroup) -> Self {
        Self::Group(value)
    }
}

/// An explicit operator/operand pair stored as a column filter value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatorFilter {
    pub operator: FilterOperator,
    #[serde(default)]
    pub value: CellValue,
}

/// What a column's filter state holds: an operator object or a raw value
/// whose meaning is inferred from its shape
///
/// Only JSON objects with an `operator` key decode as `Operator`; arrays
/// always stay raw, so `["contains", "x"]` is a membership list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ColumnFilterValue {
    Operator(OperatorFilter),
    Raw(CellValue),
}

impl<'de> Deserialize<'de> for ColumnFilterValue {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        let is_operator = matches!(&value, serde_json::Value::Object(map) if map.contains_key("operator"));

        if is_operator {
            serde_json::from_value(value)
                .map(Self::Operator)
                .map_err(serde::de::Error::custom)
        } else {
            Ok(Self::Raw(CellValue::from(value)))
        }
    }
}

impl ColumnFilterValue {
    pub fn operator(operator: FilterOperator, value: impl Into<CellValue>) -> Self {
        Self::Operator(OperatorFilter {
            operator,
            value: value.into(),
        })
    }

    pub fn raw(value: impl Into<CellValue>) -> Self {
        Self::Raw(value.into())
    }
}

/// One entry of a table's column filter state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnFilterEntry {
    /// Column id
    pub id: String,
    pub value: ColumnFilterValue,
}

impl ColumnFilterEntry {
    pub fn new(id: impl Into<String>, value: ColumnFilterValue) -> Self {
        Self {
            id: id.into(),
            value,
        }
    }
}

/// Complete filter state of a table
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableFilterState {
    #[serde(default)]
    pub column_filters: Vec<ColumnFilterEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_filter: Option<GlobalFilter>,
}

impl TableFilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_column_filter(mut self, id: impl Into<String>, value: ColumnFilterValue) -> Self {
        self.column_filters.push(ColumnFilterEntry::new(id, value));
        self
    }

    pub fn with_global_filter(mut self, filter: impl Into<GlobalFilter>) -> Self {
        self.global_filter = Some(filter.into());
        self
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// True when neither column filters nor a non-empty global filter are set
    pub fn is_empty(&self) -> bool {
        self.column_filters.is_empty()
            && self
                .global_filter
                .as_ref()
                .map(GlobalFilter::is_empty)
                .unwrap_or(true)
    }
}
