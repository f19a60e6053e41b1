//! Shared helpers for the endpoint tests.

use serde_json::Value;
use wiremock::{Match, MockServer, Request};

use crate::signer::{
    make_signature, path_and_query, ACCESS_KEY_HEADER, SIGNATURE_HEADER, TIMESTAMP_HEADER,
};
use crate::{ApiGatewayClient, ClientConfig, Credentials};

pub const TEST_ACCESS_KEY: &str = "TESTACCESSKEY";
pub const TEST_SECRET_KEY: &str = "test-secret-key";

/// Path prefix the test clients use as their API root.
pub const API_ROOT: &str = "/api/v1";

/// Creates a client pointed at `server` with the test credentials.
pub fn client_for(server: &MockServer) -> ApiGatewayClient {
    let config = ClientConfig {
        base_url: format!("{}{}", server.uri(), API_ROOT),
        ..Default::default()
    };
    ApiGatewayClient::new(config, Credentials::new(TEST_ACCESS_KEY, TEST_SECRET_KEY))
        .expect("Failed to build test client")
}

/// Full mock path for an endpoint path such as `/products/p-1`.
pub fn api_path(path: &str) -> String {
    format!("{API_ROOT}{path}")
}

/// Matches requests that carry a valid signature for the test credentials.
///
/// The signature is recomputed from the received method, path, query and
/// timestamp header, so a request signed for a different URL does not match.
pub struct ValidSignature;

impl Match for ValidSignature {
    fn matches(&self, request: &Request) -> bool {
        let header = |name: &str| {
            request
                .headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };

        let (Some(timestamp), Some(access_key), Some(signature)) = (
            header(TIMESTAMP_HEADER),
            header(ACCESS_KEY_HEADER),
            header(SIGNATURE_HEADER),
        ) else {
            return false;
        };

        if access_key != TEST_ACCESS_KEY || timestamp.parse::<i64>().is_err() {
            return false;
        }

        match make_signature(
            request.method.as_str(),
            &path_and_query(&request.url),
            &timestamp,
            &access_key,
            TEST_SECRET_KEY,
        ) {
            Ok(expected) => expected == signature,
            Err(_) => false,
        }
    }
}

/// Parses the JSON body of the single request the server received.
pub async fn received_body(server: &MockServer) -> Value {
    let requests = server
        .received_requests()
        .await
        .expect("Request recording is enabled");
    assert_eq!(requests.len(), 1, "Expected exactly one request");
    serde_json::from_slice(&requests[0].body).expect("Request body should be JSON")
}
