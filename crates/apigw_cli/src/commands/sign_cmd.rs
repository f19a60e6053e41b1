//! Prints the authentication headers for a request.
//!
//! Useful for calling the API with curl or another HTTP tool:
//!
//! ```bash
//! apigw sign GET "/products?limit=5"
//! ```

use apigw_client::signer::{current_timestamp_ms, Credentials};
use clap::Args;
use tracing::{debug, instrument};
use url::Url;

use crate::config::AppConfig;
use crate::errors::Error;

#[cfg(test)]
#[path = "sign_cmd_tests.rs"]
mod tests;

#[derive(Args, Debug, Clone)]
pub struct SignArgs {
    /// HTTP method of the request, for example GET
    pub method: String,

    /// Path below the configured base URL, optionally with a query string
    pub path: String,

    /// Sign for this time in milliseconds since the epoch instead of now
    #[arg(long)]
    pub timestamp: Option<i64>,
}

#[instrument(skip(config))]
pub fn execute(args: &SignArgs, config: &AppConfig) -> Result<String, Error> {
    let credentials = config.credentials()?;
    sign_request(args, &config.client.base_url, &credentials)
}

/// Signs `args` against `base_url` and formats the headers one per line.
pub fn sign_request(
    args: &SignArgs,
    base_url: &str,
    credentials: &Credentials,
) -> Result<String, Error> {
    let url = request_url(base_url, &args.path)?;
    let timestamp = args.timestamp.unwrap_or_else(current_timestamp_ms);
    let method = args.method.to_uppercase();
    debug!(method = method.as_str(), url = %url, "Signing request");

    let headers = credentials.sign(&method, &url, timestamp)?;

    let mut output = String::new();
    for (name, value) in headers.pairs() {
        output.push_str(&format!("{}: {}\n", name, value));
    }
    Ok(output)
}

/// Joins a request path onto the base URL, keeping the base path.
pub(crate) fn request_url(base_url: &str, path: &str) -> Result<Url, Error> {
    let joined = format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    Url::parse(&joined)
        .map_err(|e| Error::InvalidArguments(format!("Invalid request path '{}': {}", path, e)))
}
