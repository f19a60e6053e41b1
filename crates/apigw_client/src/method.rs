//! Method endpoints.
//!
//! A method binds an HTTP verb on a resource to a backend endpoint. Methods
//! are addressed by their method code rather than by a generated ID.
//!
//! The nested configuration types appear both in request bodies and in
//! responses. They serialize with camelCase names for the wire and
//! deserialize from the snake_case names the dispatcher produces.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::{ApiGatewayClient, Error};

#[cfg(test)]
#[path = "method_tests.rs"]
mod tests;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthType {
    #[default]
    None,
    Iam,
    Authorizer,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EndpointType {
    #[default]
    Http,
    Mock,
    Ncp,
}

/// Backend of a method. Exactly one variant should be set, matching the
/// method's [`EndpointType`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct EndpointConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http: Option<HttpEndpoint>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mock: Option<MockEndpoint>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ncp_service: Option<NcpServiceEndpoint>,
}

/// Forwards calls to an HTTP backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct HttpEndpoint {
    pub method: String,
    pub url: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
}

/// Answers calls with a fixed response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct MockEndpoint {
    pub status: i32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub headers: Vec<MockHeader>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MockHeader {
    pub key: String,
    pub value: String,
}

/// Invokes an action of another cloud service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct NcpServiceEndpoint {
    pub service: String,
    pub action_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

/// A query parameter the gateway validates before calling the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct RequestParameter {
    pub parameter_name: String,

    /// `STRING`, `INT`, `LONG`, `DOUBLE`, `BOOLEAN`, ...
    pub parameter_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter_description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter_required: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter_multiple: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct RequestHeader {
    pub header_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_required: Option<bool>,
}

/// A method as returned by the service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiMethod {
    pub method_code: Option<String>,
    pub method_name: Option<String>,
    pub method_description: Option<String>,
    pub resource_id: Option<String>,
    pub api_id: Option<String>,
    pub api_key_required: Option<bool>,
    pub auth_type: Option<AuthType>,
    pub authorizer_id: Option<String>,
    pub endpoint_type: Option<EndpointType>,
    pub endpoint_config: Option<EndpointConfig>,
    pub request_parameters: Option<Vec<RequestParameter>>,
    pub request_headers: Option<Vec<RequestHeader>>,
    pub mod_time: Option<String>,
}

/// Response of [`ApiGatewayClient::list_methods`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MethodList {
    #[serde(default)]
    pub methods: Vec<ApiMethod>,
}

/// Body of both method creation and method update.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodRequest {
    /// Identifies the HTTP verb. Also addresses the method in later calls.
    pub method_code: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub method_description: Option<String>,

    pub api_key_required: bool,
    pub auth_type: AuthType,

    /// Required when `auth_type` is [`AuthType::Authorizer`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorizer_id: Option<String>,

    pub endpoint_type: EndpointType,
    pub endpoint_config: EndpointConfig,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub request_parameters: Vec<RequestParameter>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub request_headers: Vec<RequestHeader>,
}

impl ApiGatewayClient {
    #[instrument(skip(self, request), fields(method_code = %request.method_code))]
    pub async fn create_method(
        &self,
        product_id: &str,
        api_id: &str,
        resource_id: &str,
        request: &MethodRequest,
    ) -> Result<ApiMethod, Error> {
        info!("Creating method");
        self.fetch_entity(
            Method::POST,
            &[
                "products", product_id, "apis", api_id, "resources", resource_id, "methods",
            ],
            None::<&()>,
            Some(request),
            "method",
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn get_method(
        &self,
        product_id: &str,
        api_id: &str,
        resource_id: &str,
        method_code: &str,
    ) -> Result<ApiMethod, Error> {
        debug!("Getting method");
        self.fetch_entity(
            Method::GET,
            &[
                "products", product_id, "apis", api_id, "resources", resource_id, "methods",
                method_code,
            ],
            None::<&()>,
            None::<&()>,
            "method",
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn list_methods(
        &self,
        product_id: &str,
        api_id: &str,
        resource_id: &str,
    ) -> Result<MethodList, Error> {
        self.fetch_object(
            Method::GET,
            &[
                "products", product_id, "apis", api_id, "resources", resource_id, "methods",
            ],
            None::<&()>,
            None::<&()>,
        )
        .await
    }

    /// Replaces the configuration of a method. `request.method_code` must
    /// match `method_code`.
    #[instrument(skip(self, request))]
    pub async fn update_method(
        &self,
        product_id: &str,
        api_id: &str,
        resource_id: &str,
        method_code: &str,
        request: &MethodRequest,
    ) -> Result<ApiMethod, Error> {
        info!("Updating method");
        self.fetch_entity(
            Method::PATCH,
            &[
                "products", product_id, "apis", api_id, "resources", resource_id, "methods",
                method_code,
            ],
            None::<&()>,
            Some(request),
            "method",
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn delete_method(
        &self,
        product_id: &str,
        api_id: &str,
        resource_id: &str,
        method_code: &str,
    ) -> Result<(), Error> {
        info!("Deleting method");
        self.send_only(
            Method::DELETE,
            &[
                "products", product_id, "apis", api_id, "resources", resource_id, "methods",
                method_code,
            ],
            None::<&()>,
            None::<&()>,
        )
        .await
    }
}
