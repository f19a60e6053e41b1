//! Shared helpers for the command tests.

use apigw_client::{ApiGatewayClient, ClientConfig, Credentials};
use wiremock::MockServer;

/// Path prefix the test clients use as their API root.
pub const API_ROOT: &str = "/api/v1";

/// Creates a client pointed at `server`.
pub fn client_for(server: &MockServer) -> ApiGatewayClient {
    let config = ClientConfig {
        base_url: format!("{}{}", server.uri(), API_ROOT),
        ..Default::default()
    };
    ApiGatewayClient::new(config, Credentials::new("TESTACCESSKEY", "test-secret-key"))
        .expect("Failed to build test client")
}

/// Full mock path for an endpoint path such as `/products/p-1`.
pub fn api_path(path: &str) -> String {
    format!("{API_ROOT}{path}")
}
