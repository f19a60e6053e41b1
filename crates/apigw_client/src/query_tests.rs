use super::*;
use serde::Serialize;

#[derive(Serialize, Default)]
#[serde(rename_all = "camelCase")]
struct ListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    offset: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    product_name: Option<String>,
    has_stage: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    stage_ids: Vec<String>,
}

#[test]
fn test_to_pairs_skips_unset_fields() {
    let pairs = to_pairs(&ListQuery::default()).unwrap();
    assert!(pairs.is_empty());
}

#[test]
fn test_to_pairs_renders_scalars_sorted_by_name() {
    let query = ListQuery {
        offset: Some(20),
        limit: Some(10),
        product_name: Some("my product".to_string()),
        has_stage: Some(true),
        ..Default::default()
    };

    let pairs = to_pairs(&query).unwrap();

    assert_eq!(
        pairs,
        vec![
            ("hasStage".to_string(), "true".to_string()),
            ("limit".to_string(), "10".to_string()),
            ("offset".to_string(), "20".to_string()),
            ("productName".to_string(), "my product".to_string()),
        ]
    );
}

#[test]
fn test_to_pairs_repeats_arrays() {
    let query = ListQuery {
        stage_ids: vec!["s-1".to_string(), "s-2".to_string()],
        ..Default::default()
    };

    let pairs = to_pairs(&query).unwrap();

    assert_eq!(
        pairs,
        vec![
            ("stageIds".to_string(), "s-1".to_string()),
            ("stageIds".to_string(), "s-2".to_string()),
        ]
    );
}

#[test]
fn test_to_pairs_rejects_non_object() {
    let result = to_pairs(&"just a string");
    assert!(matches!(result, Err(Error::Copy(_))));
}

#[test]
fn test_append_encodes_values() {
    let mut url = Url::parse("https://example.com/api/v1/products").unwrap();
    let query = ListQuery {
        product_name: Some("a&b c".to_string()),
        ..Default::default()
    };

    append(&mut url, &query).unwrap();

    assert_eq!(url.query(), Some("productName=a%26b+c"));
}

#[test]
fn test_append_without_pairs_leaves_url_untouched() {
    let mut url = Url::parse("https://example.com/api/v1/products").unwrap();

    append(&mut url, &ListQuery::default()).unwrap();

    assert_eq!(url.as_str(), "https://example.com/api/v1/products");
    assert_eq!(url.query(), None);
}

#[derive(Serialize)]
struct ReversedQuery {
    zeta: i32,
    alpha: Vec<String>,
}

#[test]
fn test_to_pairs_sorts_regardless_of_field_order() {
    let query = ReversedQuery {
        zeta: 1,
        alpha: vec!["b".to_string(), "a".to_string()],
    };

    let pairs = to_pairs(&query).unwrap();

    assert_eq!(
        pairs,
        vec![
            ("alpha".to_string(), "b".to_string()),
            ("alpha".to_string(), "a".to_string()),
            ("zeta".to_string(), "1".to_string()),
        ]
    );
}
