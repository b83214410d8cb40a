//! Tests for search and filter group evaluation

use super::*;
use indexmap::IndexMap;
use pretty_assertions::assert_eq;
use tablekit_core::{
    CellValue, ColumnFilter, ColumnMeta, FilterGroup, FilterOperator, GlobalFilter, JoinOperator,
};

fn product(category: &str, name: &str, price: f64) -> IndexMap<String, CellValue> {
    let mut row = IndexMap::new();
    row.insert("category".to_string(), CellValue::from(category));
    row.insert("name".to_string(), CellValue::from(name));
    row.insert("price".to_string(), CellValue::from(price));
    row.insert("notes".to_string(), CellValue::Null);
    row
}

fn columns() -> Vec<ColumnMeta> {
    vec![
        ColumnMeta::new("category"),
        ColumnMeta::new("name"),
        ColumnMeta::new("price"),
        ColumnMeta::new("notes"),
    ]
}

fn filter(field: &str, op: FilterOperator, value: impl Into<CellValue>) -> ColumnFilter {
    ColumnFilter::new(field, op, value)
}

#[test]
fn test_search_matches_any_column() {
    let engine = FilterEngine::new();
    let row = product("electronics", "Apple iPhone", 999.0);

    assert!(engine.matches_search(&row, &columns(), "IPHONE"));
    assert!(engine.matches_search(&row, &columns(), "electro"));
    assert!(engine.matches_search(&row, &columns(), "99"));
    assert!(!engine.matches_search(&row, &columns(), "android"));
}

#[test]
fn test_search_empty_matches_everything() {
    let engine = FilterEngine::new();
    assert!(engine.matches_search(&product("a", "b", 1.0), &columns(), ""));
}

#[test]
fn test_search_skips_non_filterable_columns() {
    let engine = FilterEngine::new();
    let row = product("electronics", "Apple iPhone", 999.0);
    let columns = vec![
        ColumnMeta::new("category"),
        ColumnMeta::new("name").without_filtering(),
    ];

    assert!(!engine.matches_search(&row, &columns, "iphone"));
    assert!(engine.matches_search(&row, &columns, "electronics"));
}

#[test]
fn test_search_skips_null_and_missing_cells() {
    let engine = FilterEngine::new();
    let row = product("electronics", "Apple iPhone", 999.0);
    let columns = vec![ColumnMeta::new("notes"), ColumnMeta::new("does_not_exist")];

    assert!(!engine.matches_search(&row, &columns, "null"));
    assert!(!engine.matches_search(&row, &columns, "undefined"));
}

#[test]
fn test_search_escapes_metacharacters() {
    let engine = FilterEngine::new();
    let row = product("books", "C++ Primer (5th)", 45.0);

    assert!(engine.matches_search(&row, &columns(), "c++ primer (5"));
    assert!(!engine.matches_search(&row, &columns(), "c.. primer"));
}

#[test]
fn test_or_group_ignores_per_filter_tags() {
    let engine = FilterEngine::new();
    let row = product("electronics", "Apple iPhone", 2000.0);
    let group = FilterGroup::any(vec![
        filter("price", FilterOperator::Lt, 500).with_join(JoinOperator::And),
        filter("name", FilterOperator::Contains, "iphone").with_join(JoinOperator::And),
    ]);

    assert!(engine.matches_filter_group(&row, &group));

    let none_match = FilterGroup::any(vec![
        filter("price", FilterOperator::Lt, 500),
        filter("name", FilterOperator::Contains, "pixel"),
    ]);
    assert!(!engine.matches_filter_group(&row, &none_match));
}

#[test]
fn test_and_group_ignores_per_filter_tags() {
    let engine = FilterEngine::new();
    let row = product("electronics", "Apple iPhone", 2000.0);
    let group = FilterGroup::all(vec![
        filter("price", FilterOperator::Lt, 500),
        filter("name", FilterOperator::Contains, "iphone").with_join(JoinOperator::Or),
    ]);

    assert!(!engine.matches_filter_group(&row, &group));

    let both = FilterGroup::all(vec![
        filter("price", FilterOperator::Gt, 500),
        filter("name", FilterOperator::Contains, "iphone").with_join(JoinOperator::Or),
    ]);
    assert!(engine.matches_filter_group(&row, &both));
}

#[test]
fn test_empty_groups_match() {
    let engine = FilterEngine::new();
    let row = product("a", "b", 1.0);
    for join in [JoinOperator::And, JoinOperator::Or, JoinOperator::Mixed] {
        assert!(engine.matches_filter_group(&row, &FilterGroup::new(vec![], join)));
    }
}

#[test]
fn test_mixed_single_filter() {
    let engine = FilterEngine::new();
    let row = product("electronics", "Apple iPhone", 2000.0);

    let matching = FilterGroup::mixed(vec![
        filter("category", FilterOperator::Eq, "Electronics").with_join(JoinOperator::Or),
    ]);
    let failing = FilterGroup::mixed(vec![filter("price", FilterOperator::Lt, 10)]);

    assert!(engine.matches_filter_group(&row, &matching));
    assert!(!engine.matches_filter_group(&row, &failing));
}

#[test]
fn test_mixed_and_binds_tighter_than_or() {
    let engine = FilterEngine::new();
    let row = product("electronics", "Apple iPhone", 2000.0);
    let group = FilterGroup::mixed(vec![
        filter("category", FilterOperator::Contains, "phone").with_join(JoinOperator::And),
        filter("price", FilterOperator::Lt, 500).with_join(JoinOperator::And),
        filter("category", FilterOperator::Eq, "electronics").with_join(JoinOperator::Or),
    ]);

    assert!(!engine.matches_filter(&row, &group.filters[0]));
    assert!(engine.matches_filter_group(&row, &group));

    let cheap = product("phones", "Pixel", 400.0);
    assert!(engine.matches_filter_group(&cheap, &group));

    let neither = product("books", "Novel", 20.0);
    assert!(!engine.matches_filter_group(&neither, &group));
}

#[test]
fn test_global_filter_dispatch() {
    let engine = FilterEngine::new();
    let row = product("electronics", "Apple iPhone", 999.0);

    assert!(engine.matches_global_filter(&row, &columns(), &GlobalFilter::from("apple")));
    assert!(!engine.matches_global_filter(
        &row,
        &columns(),
        &GlobalFilter::from(FilterGroup::all(vec![filter(
            "price",
            FilterOperator::Gt,
            1000
        )]))
    ));
}

#[test]
fn test_filter_on_missing_field_reads_null() {
    let engine = FilterEngine::new();
    let row = product("electronics", "Apple iPhone", 999.0);

    assert!(engine.matches_filter(&row, &filter("warranty", FilterOperator::Empty, CellValue::Null)));
    assert!(!engine.matches_filter(&row, &filter("warranty", FilterOperator::NotEmpty, CellValue::Null)));
    assert!(!engine.matches_filter(&row, &filter("warranty", FilterOperator::NotIn, vec!["x"])));
}

#[test]
fn test_and_groups_partition() {
    let a = filter("a", FilterOperator::Eq, 1).with_join(JoinOperator::And);
    let b = filter("b", FilterOperator::Eq, 1).with_join(JoinOperator::Or);
    let c = filter("c", FilterOperator::Eq, 1).with_join(JoinOperator::And);
    let d = filter("d", FilterOperator::Eq, 1);

    let filters = vec![a.clone(), b.clone(), c.clone(), d.clone()];
    let groups = and_groups(&filters);
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0], &[a.clone()][..]);
    assert_eq!(groups[1], &[b.clone(), c.clone(), d.clone()][..]);

    // A leading `or` tag does not open an empty group
    let leading_or = vec![b.clone(), a.clone()];
    assert_eq!(and_groups(&leading_or).len(), 1);

    let all_or = vec![b.clone(), b.clone(), b];
    assert_eq!(and_groups(&all_or).len(), 3);

    assert!(and_groups(&[]).is_empty());
}
