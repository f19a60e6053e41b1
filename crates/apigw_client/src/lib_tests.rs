//! Unit tests for the request dispatcher.

use super::*; // Import items from lib.rs
use crate::test_support::{api_path, client_for, ValidSignature, TEST_ACCESS_KEY};
use serde_json::json;
use wiremock::matchers::{body_json, header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[test]
fn test_client_config_default() {
    let config = ClientConfig::default();

    assert_eq!(config.base_url, DEFAULT_BASE_URL);
    assert!(config.timeout.is_none());
    assert!(config.user_agent.starts_with("apigw-client/"));
}

#[test]
fn test_new_rejects_invalid_base_url() {
    let config = ClientConfig {
        base_url: "not a url".to_string(),
        ..Default::default()
    };

    let result = ApiGatewayClient::new(config, Credentials::new("a", "b"));

    assert!(matches!(result, Err(Error::InvalidUrl(_))));
}

#[test]
fn test_new_rejects_cannot_be_a_base_url() {
    let config = ClientConfig {
        base_url: "mailto:someone@example.com".to_string(),
        ..Default::default()
    };

    let result = ApiGatewayClient::new(config, Credentials::new("a", "b"));

    assert!(matches!(result, Err(Error::InvalidUrl(_))));
}

#[test]
fn test_endpoint_url_encodes_segments() {
    let client = ApiGatewayClient::new(
        ClientConfig {
            base_url: "https://example.com/api/v1/".to_string(),
            ..Default::default()
        },
        Credentials::new("a", "b"),
    )
    .unwrap();

    let url = client
        .endpoint_url(&["products", "p/1?x", "apis"])
        .unwrap();

    assert_eq!(url.as_str(), "https://example.com/api/v1/products/p%2F1%3Fx/apis");
}

#[tokio::test]
async fn test_request_signs_and_converts_keys() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(api_path("/products/p-1")))
        .and(header("x-ncp-iam-access-key", TEST_ACCESS_KEY))
        .and(header_exists("x-ncp-apigw-timestamp"))
        .and(ValidSignature)
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "product": {
                "productId": "p-1",
                "productName": "payments",
                "isPublished": false,
                "apiIDs": ["a-1"]
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = client
        .request(Method::GET, &["products", "p-1"], None::<&()>, None::<&()>)
        .await
        .expect("request should succeed");

    assert_eq!(
        Value::Object(result),
        json!({
            "product": {
                "product_id": "p-1",
                "product_name": "payments",
                "is_published": false,
                "api_i_ds": ["a-1"]
            }
        })
    );
}

#[tokio::test]
async fn test_request_signs_query_string() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(api_path("/products")))
        .and(query_param("limit", "5"))
        .and(query_param("productName", "pay ments"))
        .and(ValidSignature)
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let query = json!({"limit": 5, "productName": "pay ments", "offset": null});
    let result = client
        .request(Method::GET, &["products"], Some(&query), None::<&()>)
        .await;

    assert!(result.is_ok(), "{result:?}");
}

#[tokio::test]
async fn test_request_sends_json_body() {
    let mock_server = MockServer::start().await;
    let body = json!({"productName": "payments", "subscriptionCode": "PROTECTED"});

    Mock::given(method("POST"))
        .and(path(api_path("/products")))
        .and(header("content-type", "application/json"))
        .and(body_json(&body))
        .and(ValidSignature)
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"product": {}})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = client
        .request(Method::POST, &["products"], None::<&()>, Some(&body))
        .await;

    assert!(result.is_ok(), "{result:?}");
}

#[tokio::test]
async fn test_request_no_content_returns_empty_map() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path(api_path("/products/p-1")))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = client
        .request(Method::DELETE, &["products", "p-1"], None::<&()>, None::<&()>)
        .await
        .expect("204 should succeed");

    assert!(result.is_empty());
}

#[tokio::test]
async fn test_request_empty_success_body_returns_empty_map() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path(api_path("/products/p-1")))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = client
        .request(Method::DELETE, &["products", "p-1"], None::<&()>, None::<&()>)
        .await
        .expect("empty 200 should succeed");

    assert!(result.is_empty());
}

#[tokio::test]
async fn test_request_error_status_uses_message_field() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(api_path("/products/missing")))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "errorCode": "10400",
            "message": "Product not found"
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = client
        .request(Method::GET, &["products", "missing"], None::<&()>, None::<&()>)
        .await;

    match result {
        Err(Error::Api { status, message }) => {
            assert_eq!(status, 404);
            assert_eq!(message, "Product not found (code 10400)");
        }
        other => panic!("Expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_request_error_status_with_nested_error_object() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(api_path("/products")))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {"errorCode": "200", "message": "Authentication Failed"}
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = client
        .request(Method::GET, &["products"], None::<&()>, None::<&()>)
        .await;

    match result {
        Err(Error::Api { status, message }) => {
            assert_eq!(status, 401);
            assert_eq!(message, "Authentication Failed (code 200)");
        }
        other => panic!("Expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_request_error_status_with_text_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(api_path("/products")))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway\n"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = client
        .request(Method::GET, &["products"], None::<&()>, None::<&()>)
        .await;

    match result {
        Err(Error::Api { status, message }) => {
            assert_eq!(status, 502);
            assert_eq!(message, "Bad Gateway");
        }
        other => panic!("Expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_request_error_embedded_in_success_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(api_path("/products")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": {"errorCode": "300", "message": "Not Allowed"}
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = client
        .request(Method::GET, &["products"], None::<&()>, None::<&()>)
        .await;

    assert!(
        matches!(result, Err(Error::Api { status: 200, ref message }) if message == "Not Allowed (code 300)"),
        "{result:?}"
    );
}

#[tokio::test]
async fn test_request_non_object_body_is_deserialization_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(api_path("/products")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([1, 2, 3])))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = client
        .request(Method::GET, &["products"], None::<&()>, None::<&()>)
        .await;

    assert!(matches!(result, Err(Error::Deserialization(_))), "{result:?}");
}

#[tokio::test]
async fn test_request_transport_error() {
    // Nothing listens on this port once the listener is dropped
    let uri = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        format!("http://{}", listener.local_addr().unwrap())
    };

    let client = ApiGatewayClient::new(
        ClientConfig {
            base_url: format!("{uri}/api/v1"),
            ..Default::default()
        },
        Credentials::new("a", "b"),
    )
    .unwrap();

    let result = client
        .request(Method::GET, &["products"], None::<&()>, None::<&()>)
        .await;

    assert!(matches!(result, Err(Error::Transport(_))), "{result:?}");
}

#[tokio::test]
async fn test_fetch_entity_missing_key_is_output_is_nil() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(api_path("/products/p-1")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"other": {}})))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result: Result<Value, Error> = client
        .fetch_entity(
            Method::GET,
            &["products", "p-1"],
            None::<&()>,
            None::<&()>,
            "product",
        )
        .await;

    assert!(matches!(result, Err(Error::OutputIsNil)), "{result:?}");
}

#[tokio::test]
async fn test_fetch_entity_null_key_is_output_is_nil() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(api_path("/products/p-1")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"product": null})))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result: Result<Value, Error> = client
        .fetch_entity(
            Method::GET,
            &["products", "p-1"],
            None::<&()>,
            None::<&()>,
            "product",
        )
        .await;

    assert!(matches!(result, Err(Error::OutputIsNil)), "{result:?}");
}
