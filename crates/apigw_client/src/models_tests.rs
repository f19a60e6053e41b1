use super::*;
use serde_json::json;

#[test]
fn test_page_deserialization() {
    let page: Page<serde_json::Value> = serde_json::from_value(json!({
        "content": [{"product_id": "p-1"}, {"product_id": "p-2"}],
        "total": 12
    }))
    .expect("Failed to deserialize Page");

    assert_eq!(page.content.len(), 2);
    assert_eq!(page.total, Some(12));
    assert!(!page.is_empty());
}

#[test]
fn test_page_missing_fields_default() {
    let page: Page<String> = serde_json::from_value(json!({})).unwrap();

    assert!(page.is_empty());
    assert_eq!(page.total, None);
    assert_eq!(page, Page::default());
}

#[test]
fn test_paging_serialization_skips_unset() {
    let paging = Paging {
        offset: None,
        limit: Some(50),
    };

    let value = serde_json::to_value(paging).unwrap();

    assert_eq!(value, json!({"limit": 50}));
}

#[test]
fn test_paging_new() {
    let paging = Paging::new(10, 20);

    assert_eq!(paging.offset, Some(10));
    assert_eq!(paging.limit, Some(20));
}
