use super::*;
use crate::test_support::{api_path, client_for, received_body, ValidSignature};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const METHODS: &str = "/products/p-1/apis/a-1/resources/r-1/methods";

fn http_method_request() -> MethodRequest {
    MethodRequest {
        method_code: "0001".to_string(),
        method_description: Some("List orders".to_string()),
        api_key_required: true,
        auth_type: AuthType::Iam,
        authorizer_id: None,
        endpoint_type: EndpointType::Http,
        endpoint_config: EndpointConfig {
            http: Some(HttpEndpoint {
                method: "GET".to_string(),
                url: "https://backend.example.com/orders".to_string(),
                stream: None,
            }),
            ..Default::default()
        },
        request_parameters: vec![RequestParameter {
            parameter_name: "page".to_string(),
            parameter_type: "INT".to_string(),
            parameter_required: Some(false),
            ..Default::default()
        }],
        request_headers: Vec::new(),
    }
}

#[tokio::test]
async fn test_create_method_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(api_path(METHODS)))
        .and(ValidSignature)
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "method": {"methodCode": "0001", "methodName": "GET", "authType": "IAM"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let created = client
        .create_method("p-1", "a-1", "r-1", &http_method_request())
        .await
        .unwrap();

    assert_eq!(created.method_name.as_deref(), Some("GET"));
    assert_eq!(created.auth_type, Some(AuthType::Iam));
    assert_eq!(
        received_body(&mock_server).await,
        json!({
            "methodCode": "0001",
            "methodDescription": "List orders",
            "apiKeyRequired": true,
            "authType": "IAM",
            "endpointType": "HTTP",
            "endpointConfig": {
                "http": {"method": "GET", "url": "https://backend.example.com/orders"}
            },
            "requestParameters": [
                {"parameterName": "page", "parameterType": "INT", "parameterRequired": false}
            ]
        })
    );
}

#[tokio::test]
async fn test_create_mock_method_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(api_path(METHODS)))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "method": {"methodCode": "0002"}
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let request = MethodRequest {
        method_code: "0002".to_string(),
        endpoint_type: EndpointType::Mock,
        endpoint_config: EndpointConfig {
            mock: Some(MockEndpoint {
                status: 200,
                body: Some("{}".to_string()),
                headers: vec![MockHeader {
                    key: "Content-Type".to_string(),
                    value: "application/json".to_string(),
                }],
            }),
            ..Default::default()
        },
        ..Default::default()
    };

    client
        .create_method("p-1", "a-1", "r-1", &request)
        .await
        .unwrap();

    let body = received_body(&mock_server).await;
    assert_eq!(body["authType"], "NONE");
    assert_eq!(body["apiKeyRequired"], false);
    assert_eq!(
        body["endpointConfig"],
        json!({
            "mock": {
                "status": 200,
                "body": "{}",
                "headers": [{"key": "Content-Type", "value": "application/json"}]
            }
        })
    );
    assert!(body.get("requestHeaders").is_none());
}

#[tokio::test]
async fn test_get_method_parses_nested_config() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(api_path("/products/p-1/apis/a-1/resources/r-1/methods/0003")))
        .and(ValidSignature)
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "method": {
                "methodCode": "0003",
                "endpointType": "NCP",
                "endpointConfig": {
                    "ncpService": {"service": "cloudfunctions", "actionId": "act-1", "region": "KR"}
                },
                "requestHeaders": [{"headerName": "X-Trace", "headerRequired": true}]
            }
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let found = client.get_method("p-1", "a-1", "r-1", "0003").await.unwrap();

    assert_eq!(found.endpoint_type, Some(EndpointType::Ncp));
    let ncp = found
        .endpoint_config
        .and_then(|c| c.ncp_service)
        .expect("ncp service endpoint");
    assert_eq!(ncp.action_id, "act-1");
    assert_eq!(ncp.region.as_deref(), Some("KR"));

    let headers = found.request_headers.unwrap();
    assert_eq!(headers[0].header_name, "X-Trace");
    assert_eq!(headers[0].header_required, Some(true));
}

#[tokio::test]
async fn test_list_methods() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(api_path(METHODS)))
        .and(ValidSignature)
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "methods": [{"methodCode": "0001"}, {"methodCode": "0002"}]
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let list = client.list_methods("p-1", "a-1", "r-1").await.unwrap();

    let codes: Vec<_> = list
        .methods
        .iter()
        .filter_map(|m| m.method_code.as_deref())
        .collect();
    assert_eq!(codes, vec!["0001", "0002"]);
}

#[tokio::test]
async fn test_update_method() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path(api_path("/products/p-1/apis/a-1/resources/r-1/methods/0001")))
        .and(ValidSignature)
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "method": {"methodCode": "0001", "apiKeyRequired": true}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let updated = client
        .update_method("p-1", "a-1", "r-1", "0001", &http_method_request())
        .await
        .unwrap();

    assert_eq!(updated.api_key_required, Some(true));
}

#[tokio::test]
async fn test_delete_method() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path(api_path("/products/p-1/apis/a-1/resources/r-1/methods/0001")))
        .and(ValidSignature)
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);

    client
        .delete_method("p-1", "a-1", "r-1", "0001")
        .await
        .unwrap();
}
