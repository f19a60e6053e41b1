//! Request signing for the API Gateway management API.
//!
//! Every request carries three headers: the request timestamp, the caller's
//! access key and an HMAC-SHA256 signature. The signed message is
//!
//! ```text
//! {METHOD} {path_and_query}\n{timestamp}\n{access_key}
//! ```
//!
//! keyed with the secret key, and the signature is sent base64 encoded.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use tracing::debug;
use url::Url;

use crate::Error;

#[cfg(test)]
#[path = "signer_tests.rs"]
mod tests;

/// Header carrying the request time in milliseconds since the Unix epoch.
pub const TIMESTAMP_HEADER: &str = "x-ncp-apigw-timestamp";

/// Header carrying the caller's access key.
pub const ACCESS_KEY_HEADER: &str = "x-ncp-iam-access-key";

/// Header carrying the base64 encoded HMAC-SHA256 signature.
pub const SIGNATURE_HEADER: &str = "x-ncp-apigw-signature-v2";

/// Environment variable read by [`Credentials::from_env`] for the access key.
pub const ACCESS_KEY_ENV: &str = "NCLOUD_ACCESS_KEY";

/// Environment variable read by [`Credentials::from_env`] for the secret key.
pub const SECRET_KEY_ENV: &str = "NCLOUD_SECRET_KEY";

/// An access key / secret key pair used to sign requests.
///
/// The secret key is held in a [`SecretString`] so it does not show up in
/// `Debug` output or logs.
#[derive(Debug, Clone)]
pub struct Credentials {
    access_key: String,
    secret_key: SecretString,
}

impl Credentials {
    /// Creates credentials from an access key and a secret key.
    pub fn new(access_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: SecretString::from(secret_key.into()),
        }
    }

    /// Reads credentials from `NCLOUD_ACCESS_KEY` and `NCLOUD_SECRET_KEY`.
    ///
    /// # Errors
    /// Returns `Error::MissingCredentials` naming the first variable that is
    /// unset or empty.
    pub fn from_env() -> Result<Self, Error> {
        let access_key = read_env(ACCESS_KEY_ENV)?;
        let secret_key = read_env(SECRET_KEY_ENV)?;
        Ok(Self::new(access_key, secret_key))
    }

    /// The access key, sent in clear in the access key header.
    pub fn access_key(&self) -> &str {
        &self.access_key
    }

    /// Signs a request for `method` and `url` at `timestamp_ms`.
    ///
    /// # Errors
    /// Returns `Error::InvalidHeader` if the access key cannot be sent as a
    /// header value, and `Error::Signing` if the HMAC cannot be keyed.
    pub fn sign(&self, method: &str, url: &Url, timestamp_ms: i64) -> Result<SignedHeaders, Error> {
        if !self.access_key.bytes().all(|b| b.is_ascii_graphic()) {
            return Err(Error::InvalidHeader(format!(
                "access key {} must be visible ASCII without spaces",
                redact(&self.access_key)
            )));
        }

        let timestamp = timestamp_ms.to_string();
        let target = path_and_query(url);
        let signature = make_signature(
            method,
            &target,
            &timestamp,
            &self.access_key,
            self.secret_key.expose_secret(),
        )?;

        debug!(
            method = method,
            path_and_query = %target,
            access_key = %redact(&self.access_key),
            "Signed request"
        );

        Ok(SignedHeaders {
            timestamp,
            access_key: self.access_key.clone(),
            signature,
        })
    }
}

/// The three authentication header values for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    pub timestamp: String,
    pub access_key: String,
    pub signature: String,
}

impl SignedHeaders {
    /// Header name / value pairs in the order they are attached.
    pub fn pairs(&self) -> [(&'static str, &str); 3] {
        [
            (TIMESTAMP_HEADER, self.timestamp.as_str()),
            (ACCESS_KEY_HEADER, self.access_key.as_str()),
            (SIGNATURE_HEADER, self.signature.as_str()),
        ]
    }
}

/// Builds the message that gets signed.
pub fn string_to_sign(method: &str, path_and_query: &str, timestamp: &str, access_key: &str) -> String {
    format!("{method} {path_and_query}\n{timestamp}\n{access_key}")
}

/// Computes the base64 encoded HMAC-SHA256 signature of a request.
///
/// # Errors
/// Returns `Error::Signing` if the HMAC cannot be keyed with `secret_key`.
pub fn make_signature(
    method: &str,
    path_and_query: &str,
    timestamp: &str,
    access_key: &str,
    secret_key: &str,
) -> Result<String, Error> {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret_key.as_bytes())
        .map_err(|e| Error::Signing(e.to_string()))?;
    mac.update(string_to_sign(method, path_and_query, timestamp, access_key).as_bytes());

    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

/// The URL path plus `?query` when the URL has a non-empty query.
pub fn path_and_query(url: &Url) -> String {
    match url.query() {
        Some(query) if !query.is_empty() => format!("{}?{}", url.path(), query),
        _ => url.path().to_string(),
    }
}

/// Milliseconds since the Unix epoch, as used in the timestamp header.
pub fn current_timestamp_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Shortens a key for logging: the first four characters followed by `***`.
pub fn redact(key: &str) -> String {
    let prefix: String = key.chars().take(4).collect();
    format!("{prefix}***")
}

fn read_env(name: &str) -> Result<String, Error> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(Error::MissingCredentials(name.to_string())),
    }
}
