//! Error types for API Gateway client operations.
//!
//! This module defines the error types that can occur when calling the API Gateway
//! management API through the apigw_client crate. Transport and decode failures keep
//! the underlying error as their source so callers can inspect it directly.

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur during API Gateway client operations.
///
/// ## Examples
///
/// ```rust,ignore
/// use apigw_client::Error;
///
/// match client.get_product("p-123").await {
///     Ok(product) => println!("Found product: {:?}", product.product_name),
///     Err(Error::Api { status: 404, .. }) => eprintln!("No such product"),
///     Err(Error::OutputIsNil) => eprintln!("The service returned no product"),
///     Err(err) => eprintln!("Other error: {}", err),
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The service answered with an error.
    ///
    /// Raised for every non-2xx status, and for 2xx responses that carry an
    /// `error` object. The message is taken from the response body when it is
    /// JSON, otherwise it is the raw body text.
    #[error("API request failed with status {status}: {message}")]
    Api { status: u16, message: String },

    /// A struct-to-struct copy could not be completed.
    ///
    /// This happens when a custom converter rejects a value, or when the copied
    /// fields do not fit the shape of the destination type.
    #[error("Failed to copy value: {0}")]
    Copy(String),

    /// Error deserializing the response from the service.
    #[error("Failed to deserialize API Gateway response: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// A header value could not be built from the given credentials.
    ///
    /// Header values must be visible ASCII. An access key containing control
    /// characters ends up here.
    #[error("Invalid header value: {0}")]
    InvalidHeader(String),

    /// The base URL or an endpoint URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// No credentials were available to sign the request.
    ///
    /// The contained string names the missing setting.
    #[error("Missing credentials: {0}")]
    MissingCredentials(String),

    /// The response did not contain the expected entity.
    ///
    /// Create, get and update calls return the entity under a single wrapper
    /// key. When that key is absent or null this error is returned.
    #[error("output is nil")]
    OutputIsNil,

    /// The request signature could not be computed.
    #[error("Failed to sign request: {0}")]
    Signing(String),

    /// The HTTP request could not be sent or its body could not be read.
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),
}
