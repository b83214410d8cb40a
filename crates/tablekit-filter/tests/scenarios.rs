//! End-to-end filtering scenarios driven through the public free functions
//! and JSON payloads

use indexmap::IndexMap;
use pretty_assertions::assert_eq;
use tablekit_core::{
    CellValue, ColumnFilterValue, ColumnMeta, FilterOperator, GlobalFilter, Row,
    TableFilterState,
};
use tablekit_filter::{
    RegexCache, apply_operator, filter_rows, matches_column_filter, matches_global_filter,
};

fn json_row(json: &str) -> Row {
    match serde_json::from_str::<serde_json::Value>(json).unwrap() {
        serde_json::Value::Object(object) => Row::from_json_object(object),
        other => panic!("not an object: {other}"),
    }
}

#[test]
fn test_simple_text_search() {
    assert!(apply_operator(
        &CellValue::from("Apple iPhone"),
        FilterOperator::Contains,
        &CellValue::from("iphone"),
    ));
}

#[test]
fn test_numeric_range_shorthand() {
    let filter = ColumnFilterValue::raw(vec![100, 200]);
    assert!(matches_column_filter(&CellValue::from(150), Some(&filter)));
    assert!(!matches_column_filter(&CellValue::from(250), Some(&filter)));
}

#[test]
fn test_mixed_logic_from_json() {
    let filter = GlobalFilter::from_json(
        r#"{
            "filters": [
                {"fieldId": "category", "operator": "contains", "value": "phone", "joinOperator": "and"},
                {"fieldId": "price", "operator": "lt", "value": 500, "joinOperator": "and"},
                {"fieldId": "category", "operator": "eq", "value": "electronics", "joinOperator": "or"}
            ],
            "joinOperator": "mixed"
        }"#,
    )
    .unwrap();
    let row = json_row(r#"{"category": "electronics", "price": 2000}"#);

    assert!(matches_global_filter(&row, &[], &filter));
}

#[test]
fn test_not_in_without_list() {
    assert!(apply_operator(
        &CellValue::from("anything"),
        FilterOperator::NotIn,
        &CellValue::from("not-an-array"),
    ));
}

#[test]
fn test_evaluation_is_repeatable() {
    let cell = CellValue::from("Repeatable Value");
    let needle = CellValue::from("value");
    let first = apply_operator(&cell, FilterOperator::Contains, &needle);
    for _ in 0..5 {
        assert_eq!(apply_operator(&cell, FilterOperator::Contains, &needle), first);
    }
}

#[test]
fn test_null_cells_only_match_empty() {
    for op in FilterOperator::all() {
        let expected = *op == FilterOperator::Empty;
        assert_eq!(
            apply_operator(&CellValue::Null, *op, &CellValue::from("x")),
            expected,
            "{op}"
        );
    }
}

#[test]
fn test_cache_evicts_first_inserted() {
    let cache = RegexCache::with_capacity(100);
    for i in 0..101 {
        cache.get_or_compile(&format!("pattern{i}"), "i");
    }

    assert_eq!(cache.len(), 100);
    assert!(!cache.contains("pattern0", "i"));
    assert!(cache.contains("pattern1", "i"));
    assert!(cache.contains("pattern100", "i"));
}

#[test]
fn test_table_pass_over_json_rows() {
    let rows: Vec<Row> = [
        r#"{"name": "Laptop", "price": 1200, "tags": "work"}"#,
        r#"{"name": "Headphones", "price": 150, "tags": "audio"}"#,
        r#"{"name": "Speaker", "price": 90, "tags": null}"#,
    ]
    .into_iter()
    .map(json_row)
    .collect();
    let columns: Vec<ColumnMeta> = serde_json::from_str(
        r#"[{"id": "name"}, {"id": "price", "variant": "range"}, {"id": "tags"}]"#,
    )
    .unwrap();
    let state = TableFilterState::from_json(
        r#"{"columnFilters": [{"id": "price", "value": [100, null]}], "globalFilter": "o"}"#,
    )
    .unwrap();

    assert_eq!(filter_rows(&rows, &columns, &state), vec![0, 1]);
}

#[test]
fn test_map_rows() {
    let mut row = IndexMap::new();
    row.insert("status".to_string(), CellValue::from("Active"));
    let columns = vec![ColumnMeta::new("status")];

    let state = TableFilterState::new().with_column_filter(
        "status",
        ColumnFilterValue::operator(FilterOperator::In, vec!["active", "pending"]),
    );
    assert_eq!(filter_rows(&[row], &columns, &state), vec![0]);
}
