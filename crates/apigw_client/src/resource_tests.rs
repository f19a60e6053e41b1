use super::*;
use crate::test_support::{api_path, client_for, received_body, ValidSignature};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const RESOURCES: &str = "/products/p-1/apis/a-1/resources";

#[tokio::test]
async fn test_create_resource_flattens_cors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(api_path(RESOURCES)))
        .and(ValidSignature)
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "resource": {
                "resourceId": "r-1",
                "resourcePath": "/orders",
                "corsAllowOrigin": "*"
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let request = CreateResourceRequest {
        resource_path: "/orders".to_string(),
        cors: CorsSettings {
            cors_allow_origin: Some("*".to_string()),
            cors_max_age: Some("600".to_string()),
            ..Default::default()
        },
    };

    let resource = client.create_resource("p-1", "a-1", &request).await.unwrap();

    assert_eq!(resource.resource_id.as_deref(), Some("r-1"));
    assert_eq!(resource.cors_allow_origin.as_deref(), Some("*"));
    assert_eq!(
        received_body(&mock_server).await,
        json!({
            "resourcePath": "/orders",
            "corsAllowOrigin": "*",
            "corsMaxAge": "600"
        })
    );
}

#[tokio::test]
async fn test_get_resource_with_methods() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(api_path("/products/p-1/apis/a-1/resources/r-1")))
        .and(ValidSignature)
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resource": {
                "resourceId": "r-1",
                "methods": [{"methodCode": "0001", "methodName": "GET"}]
            }
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let resource = client.get_resource("p-1", "a-1", "r-1").await.unwrap();

    let methods = resource.methods.unwrap();
    assert_eq!(methods[0].method_code.as_deref(), Some("0001"));
    assert_eq!(methods[0].method_name.as_deref(), Some("GET"));
}

#[tokio::test]
async fn test_list_resources() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(api_path(RESOURCES)))
        .and(ValidSignature)
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "apiId": "a-1",
            "productId": "p-1",
            "resources": [
                {"resourceId": "r-1", "resourcePath": "/"},
                {"resourceId": "r-2", "resourcePath": "/orders"}
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let list = client.list_resources("p-1", "a-1").await.unwrap();

    assert_eq!(list.api_id.as_deref(), Some("a-1"));
    assert_eq!(list.resources.len(), 2);
    assert_eq!(list.resources[1].resource_path.as_deref(), Some("/orders"));
}

#[tokio::test]
async fn test_list_resources_empty_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(api_path(RESOURCES)))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let list = client.list_resources("p-1", "a-1").await.unwrap();

    assert_eq!(list, ResourceList::default());
}

#[tokio::test]
async fn test_update_resource_cors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path(api_path("/products/p-1/apis/a-1/resources/r-1")))
        .and(ValidSignature)
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resource": {"resourceId": "r-1", "corsAllowCredentials": "true"}
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let cors = CorsSettings {
        cors_allow_credentials: Some("true".to_string()),
        ..Default::default()
    };

    let resource = client
        .update_resource_cors("p-1", "a-1", "r-1", &cors)
        .await
        .unwrap();

    assert_eq!(resource.cors_allow_credentials.as_deref(), Some("true"));
    assert_eq!(
        received_body(&mock_server).await,
        json!({"corsAllowCredentials": "true"})
    );
}

#[tokio::test]
async fn test_delete_resource() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path(api_path("/products/p-1/apis/a-1/resources/r-1")))
        .and(ValidSignature)
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);

    client.delete_resource("p-1", "a-1", "r-1").await.unwrap();
}
