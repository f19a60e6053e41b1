//! Authorizer endpoints.
//!
//! An authorizer delegates the access decision for a method to a cloud
//! function. The function receives the request values listed in the
//! authorizer's payload.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::models::{Page, Paging};
use crate::{ApiGatewayClient, Error};

#[cfg(test)]
#[path = "authorizer_tests.rs"]
mod tests;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthorizerType {
    #[default]
    CloudFunctions,
}

/// Where the authorizer function runs and what it receives.
///
/// Serializes with camelCase names and deserializes from snake_case ones,
/// since it appears in both request bodies and converted responses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct AuthorizerConfig {
    pub region: String,
    pub function_id: String,

    #[serde(default)]
    pub payload: Vec<AuthorizerPayload>,
}

/// A request value passed to the authorizer function.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthorizerPayload {
    /// `HEADER` or `QUERY_STRING`.
    pub r#in: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Authorizer {
    pub authorizer_id: Option<String>,
    pub authorizer_name: Option<String>,
    pub authorizer_description: Option<String>,
    pub authorizer_type: Option<AuthorizerType>,
    pub authorizer_config: Option<AuthorizerConfig>,
    pub domain_code: Option<String>,
    pub tenant_id: Option<String>,
    pub modifier: Option<String>,
    pub mod_time: Option<String>,
}

/// Body of both authorizer creation and authorizer update.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizerRequest {
    pub authorizer_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorizer_description: Option<String>,

    pub authorizer_type: AuthorizerType,
    pub authorizer_config: AuthorizerConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListAuthorizersQuery {
    #[serde(flatten)]
    pub paging: Paging,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorizer_name: Option<String>,
}

impl ApiGatewayClient {
    #[instrument(skip(self, request), fields(authorizer_name = %request.authorizer_name))]
    pub async fn create_authorizer(
        &self,
        request: &AuthorizerRequest,
    ) -> Result<Authorizer, Error> {
        info!("Creating authorizer");
        self.fetch_entity(
            Method::POST,
            &["authorizers"],
            None::<&()>,
            Some(request),
            "authorizer",
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn get_authorizer(&self, authorizer_id: &str) -> Result<Authorizer, Error> {
        debug!("Getting authorizer");
        self.fetch_entity(
            Method::GET,
            &["authorizers", authorizer_id],
            None::<&()>,
            None::<&()>,
            "authorizer",
        )
        .await
    }

    #[instrument(skip(self, query))]
    pub async fn list_authorizers(
        &self,
        query: &ListAuthorizersQuery,
    ) -> Result<Page<Authorizer>, Error> {
        self.fetch_entity(
            Method::GET,
            &["authorizers"],
            Some(query),
            None::<&()>,
            "authorizer_page",
        )
        .await
    }

    #[instrument(skip(self, request))]
    pub async fn update_authorizer(
        &self,
        authorizer_id: &str,
        request: &AuthorizerRequest,
    ) -> Result<Authorizer, Error> {
        info!("Updating authorizer");
        self.fetch_entity(
            Method::PATCH,
            &["authorizers", authorizer_id],
            None::<&()>,
            Some(request),
            "authorizer",
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn delete_authorizer(&self, authorizer_id: &str) -> Result<(), Error> {
        info!("Deleting authorizer");
        self.send_only(
            Method::DELETE,
            &["authorizers", authorizer_id],
            None::<&()>,
            None::<&()>,
        )
        .await
    }
}
