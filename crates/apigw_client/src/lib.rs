//! Crate for interacting with the API Gateway management REST API.
//!
//! This crate provides a client that signs every request with an access key /
//! secret key pair, sends it, converts the camelCase keys of the JSON response
//! to snake_case and maps the result into typed structures.
//!
//! One module per resource family holds the request and response types for
//! that family and adds its endpoint methods to [`ApiGatewayClient`]:
//! [`product`], [`api`], [`resource`], [`method`], [`stage`], [`deployment`],
//! [`usage_plan`], [`authorizer`] and [`api_key`].

use std::time::Duration;

use reqwest::{Method, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, error, instrument};
use url::Url;

pub mod casing;
pub mod copier;
pub mod errors;
pub use errors::Error;
pub mod models;
pub use models::Page;
pub mod query;
pub mod signer;
pub use signer::Credentials;

pub mod api;
pub mod api_key;
pub mod authorizer;
pub mod deployment;
pub mod method;
pub mod product;
pub mod resource;
pub mod stage;
pub mod usage_plan;

#[cfg(test)]
mod test_support;

// Reference the tests module in the separate file
#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// Base URL of the public API Gateway management API.
pub const DEFAULT_BASE_URL: &str = "https://apigateway.apigw.ntruss.com/api/v1";

/// User agent sent when the configuration does not override it.
pub const DEFAULT_USER_AGENT: &str = concat!("apigw-client/", env!("CARGO_PKG_VERSION"));

/// Settings for building an [`ApiGatewayClient`].
///
/// Use `Default::default()` and modify fields as needed.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Root of the API, for example `https://apigateway.apigw.ntruss.com/api/v1`.
    pub base_url: String,

    /// Overall timeout per request. `None` leaves requests unbounded.
    pub timeout: Option<Duration>,

    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// A client for the API Gateway management API.
///
/// The client is cheap to clone; clones share the underlying connection pool.
///
/// # Example
///
/// ```rust,no_run
/// use apigw_client::{ApiGatewayClient, ClientConfig, Credentials};
///
/// # async fn example() -> Result<(), apigw_client::Error> {
/// let client = ApiGatewayClient::new(
///     ClientConfig::default(),
///     Credentials::new("my-access-key", "my-secret-key"),
/// )?;
///
/// let product = client.get_product("p-1234").await?;
/// println!("Product name: {:?}", product.product_name);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ApiGatewayClient {
    http: reqwest::Client,
    base_url: Url,
    credentials: Credentials,
}

impl ApiGatewayClient {
    /// Creates a new client.
    ///
    /// # Errors
    /// Returns `Error::InvalidUrl` if the base URL cannot be parsed or cannot
    /// have path segments appended, and `Error::Transport` if the HTTP client
    /// cannot be built.
    pub fn new(config: ClientConfig, credentials: Credentials) -> Result<Self, Error> {
        let base_url = Url::parse(&config.base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(Error::InvalidUrl(
                url::ParseError::RelativeUrlWithCannotBeABaseBase,
            ));
        }

        let mut builder = reqwest::Client::builder().user_agent(config.user_agent);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        debug!(
            base_url = %base_url,
            access_key = %signer::redact(credentials.access_key()),
            "Created API Gateway client"
        );

        Ok(Self {
            http,
            base_url,
            credentials,
        })
    }

    /// Creates a client for the default endpoint with credentials read from
    /// `NCLOUD_ACCESS_KEY` and `NCLOUD_SECRET_KEY`.
    ///
    /// # Errors
    /// Returns `Error::MissingCredentials` when either variable is unset.
    pub fn from_env() -> Result<Self, Error> {
        Self::new(ClientConfig::default(), Credentials::from_env()?)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds the URL for an endpoint from its path segments.
    ///
    /// Each segment is percent-encoded on its own, so identifiers containing
    /// `/` or `?` cannot change the shape of the path.
    ///
    /// # Errors
    /// Returns `Error::InvalidUrl` if the base URL cannot take path segments.
    pub fn endpoint_url(&self, segments: &[&str]) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Sends a signed request and returns the response object with snake_case keys.
    ///
    /// A `204 No Content` response, or any success response with an empty
    /// body, yields an empty map.
    ///
    /// # Errors
    /// - `Error::Transport` if the request cannot be sent or the body read
    /// - `Error::Deserialization` if the body is not a JSON object
    /// - `Error::Api` for non-success statuses and embedded `error` objects
    #[instrument(skip(self, query, body))]
    pub async fn request<Q, B>(
        &self,
        method: Method,
        segments: &[&str],
        query: Option<&Q>,
        body: Option<&B>,
    ) -> Result<Map<String, Value>, Error>
    where
        Q: Serialize + ?Sized,
        B: Serialize + ?Sized,
    {
        let mut url = self.endpoint_url(segments)?;
        if let Some(query) = query {
            query::append(&mut url, query)?;
        }

        let signed = self
            .credentials
            .sign(method.as_str(), &url, signer::current_timestamp_ms())?;

        let mut builder = self.http.request(method, url.clone());
        for (name, value) in signed.pairs() {
            builder = builder.header(name, value);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        debug!(url = %url, "Sending API Gateway request");
        let response = builder.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        debug!(
            url = %url,
            status = status.as_u16(),
            body_length = bytes.len(),
            "Received API Gateway response"
        );

        if !status.is_success() {
            let message = error_message(&bytes);
            error!(
                url = %url,
                status = status.as_u16(),
                error_message = %message,
                "API Gateway returned an error"
            );
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }

        if status == StatusCode::NO_CONTENT || bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Map::new());
        }

        let map: Map<String, Value> = serde_json::from_slice(&bytes)?;
        if let Some(embedded) = map.get("error").filter(|e| e.is_object()) {
            let message = message_from_value(embedded).unwrap_or_else(|| embedded.to_string());
            error!(
                url = %url,
                status = status.as_u16(),
                error_message = %message,
                "API Gateway reported an error in a success response"
            );
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(casing::to_snake_keys(map))
    }

    /// Sends a request and types the entity found under the snake_case `key`.
    ///
    /// # Errors
    /// Returns `Error::OutputIsNil` when `key` is missing or null, and any
    /// error of [`ApiGatewayClient::request`].
    pub(crate) async fn fetch_entity<T, Q, B>(
        &self,
        method: Method,
        segments: &[&str],
        query: Option<&Q>,
        body: Option<&B>,
        key: &str,
    ) -> Result<T, Error>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
        B: Serialize + ?Sized,
    {
        let mut map = self.request(method, segments, query, body).await?;
        match map.remove(key) {
            None | Some(Value::Null) => {
                error!(key = key, "Response did not contain the expected entity");
                Err(Error::OutputIsNil)
            }
            Some(entity) => copier::Copier::new().copy_value(entity),
        }
    }

    /// Sends a request and types the whole response object.
    pub(crate) async fn fetch_object<T, Q, B>(
        &self,
        method: Method,
        segments: &[&str],
        query: Option<&Q>,
        body: Option<&B>,
    ) -> Result<T, Error>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
        B: Serialize + ?Sized,
    {
        let map = self.request(method, segments, query, body).await?;
        copier::Copier::new().copy_value(Value::Object(map))
    }

    /// Sends a request whose response body is not needed.
    pub(crate) async fn send_only<Q, B>(
        &self,
        method: Method,
        segments: &[&str],
        query: Option<&Q>,
        body: Option<&B>,
    ) -> Result<(), Error>
    where
        Q: Serialize + ?Sized,
        B: Serialize + ?Sized,
    {
        self.request(method, segments, query, body).await.map(|_| ())
    }
}

/// Extracts a human readable message from an error response body.
fn error_message(body: &[u8]) -> String {
    match serde_json::from_slice::<Value>(body) {
        Ok(value) => message_from_value(&value)
            .or_else(|| value.get("error").and_then(message_from_value))
            .unwrap_or_else(|| value.to_string()),
        Err(_) => String::from_utf8_lossy(body).trim().to_string(),
    }
}

fn message_from_value(value: &Value) -> Option<String> {
    let message = ["message", "errorMessage", "error_message"]
        .iter()
        .find_map(|k| value.get(*k).and_then(Value::as_str))?;

    match value.get("errorCode").or_else(|| value.get("error_code")) {
        Some(Value::String(code)) => Some(format!("{message} (code {code})")),
        Some(Value::Number(code)) => Some(format!("{message} (code {code})")),
        _ => Some(message.to_string()),
    }
}
