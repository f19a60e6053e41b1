//! API key endpoints.
//!
//! Every API key carries a primary and a secondary key value so callers can
//! rotate one while the other stays valid.

use std::fmt;

use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::copier;
use crate::models::{Page, Paging};
use crate::{ApiGatewayClient, Error};

#[cfg(test)]
#[path = "api_key_tests.rs"]
mod tests;

/// Which of the two key values to regenerate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyType {
    Primary,
    Secondary,
}

impl KeyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyType::Primary => "primary",
            KeyType::Secondary => "secondary",
        }
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiKey {
    pub api_key_id: Option<String>,
    pub api_key_name: Option<String>,
    pub api_key_description: Option<String>,
    pub primary_key: Option<String>,
    pub secondary_key: Option<String>,
    pub is_enabled: Option<bool>,
    pub domain_code: Option<String>,
    pub tenant_id: Option<String>,
    pub modifier: Option<String>,
    pub mod_time: Option<String>,
}

// Key values stay out of logs and panic messages.
impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redacted = |key: &Option<String>| key.as_ref().map(|_| "[REDACTED]");
        f.debug_struct("ApiKey")
            .field("api_key_id", &self.api_key_id)
            .field("api_key_name", &self.api_key_name)
            .field("api_key_description", &self.api_key_description)
            .field("primary_key", &redacted(&self.primary_key))
            .field("secondary_key", &redacted(&self.secondary_key))
            .field("is_enabled", &self.is_enabled)
            .field("domain_code", &self.domain_code)
            .field("tenant_id", &self.tenant_id)
            .field("modifier", &self.modifier)
            .field("mod_time", &self.mod_time)
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateApiKeyRequest {
    pub api_key_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key_description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateApiKeyRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key_description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_enabled: Option<bool>,
}

impl UpdateApiKeyRequest {
    /// Starts an update from the current state of an API key.
    ///
    /// # Errors
    /// Returns `Error::Deserialization` if the key holds values the request cannot carry.
    pub fn from_api_key(api_key: &ApiKey) -> Result<Self, Error> {
        copier::request_from(api_key)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListApiKeysQuery {
    #[serde(flatten)]
    pub paging: Paging,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key_name: Option<String>,
}

impl ApiGatewayClient {
    #[instrument(skip(self, request), fields(api_key_name = %request.api_key_name))]
    pub async fn create_api_key(&self, request: &CreateApiKeyRequest) -> Result<ApiKey, Error> {
        info!("Creating API key");
        let api_key: ApiKey = self
            .fetch_entity(
                Method::POST,
                &["api-keys"],
                None::<&()>,
                Some(request),
                "api_key",
            )
            .await?;

        info!(api_key_id = ?api_key.api_key_id, "Created API key");
        Ok(api_key)
    }

    #[instrument(skip(self))]
    pub async fn get_api_key(&self, api_key_id: &str) -> Result<ApiKey, Error> {
        debug!("Getting API key");
        self.fetch_entity(
            Method::GET,
            &["api-keys", api_key_id],
            None::<&()>,
            None::<&()>,
            "api_key",
        )
        .await
    }

    #[instrument(skip(self, query))]
    pub async fn list_api_keys(&self, query: &ListApiKeysQuery) -> Result<Page<ApiKey>, Error> {
        self.fetch_entity(
            Method::GET,
            &["api-keys"],
            Some(query),
            None::<&()>,
            "api_key_page",
        )
        .await
    }

    /// Renames, describes, enables or disables an API key.
    #[instrument(skip(self, request))]
    pub async fn update_api_key(
        &self,
        api_key_id: &str,
        request: &UpdateApiKeyRequest,
    ) -> Result<ApiKey, Error> {
        info!(is_enabled = ?request.is_enabled, "Updating API key");
        self.fetch_entity(
            Method::PATCH,
            &["api-keys", api_key_id],
            None::<&()>,
            Some(request),
            "api_key",
        )
        .await
    }

    /// Replaces one of the two key values with a newly generated one.
    #[instrument(skip(self))]
    pub async fn regenerate_api_key(
        &self,
        api_key_id: &str,
        key_type: KeyType,
    ) -> Result<ApiKey, Error> {
        info!("Regenerating API key");
        self.fetch_entity(
            Method::PUT,
            &["api-keys", api_key_id, key_type.as_str()],
            None::<&()>,
            None::<&()>,
            "api_key",
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn delete_api_key(&self, api_key_id: &str) -> Result<(), Error> {
        info!("Deleting API key");
        self.send_only(
            Method::DELETE,
            &["api-keys", api_key_id],
            None::<&()>,
            None::<&()>,
        )
        .await
    }
}
