//! Resource endpoints.
//!
//! Resources are the URL paths of an API. Each carries the CORS settings the
//! gateway applies to preflight requests for that path.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::{ApiGatewayClient, Error};

#[cfg(test)]
#[path = "resource_tests.rs"]
mod tests;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub resource_id: Option<String>,
    pub resource_path: Option<String>,
    pub api_id: Option<String>,
    pub cors_allow_origin: Option<String>,
    pub cors_allow_methods: Option<String>,
    pub cors_allow_headers: Option<String>,
    pub cors_expose_headers: Option<String>,
    pub cors_max_age: Option<String>,
    pub cors_allow_credentials: Option<String>,
    pub methods: Option<Vec<ResourceMethodSummary>>,
}

/// Short method record embedded in resource responses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceMethodSummary {
    pub method_code: Option<String>,
    pub method_name: Option<String>,
}

/// Response of [`ApiGatewayClient::list_resources`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceList {
    pub api_id: Option<String>,
    pub product_id: Option<String>,
    #[serde(default)]
    pub resources: Vec<Resource>,
}

/// CORS settings of a resource. The service takes every value as text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorsSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cors_allow_origin: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cors_allow_methods: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cors_allow_headers: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cors_expose_headers: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cors_max_age: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cors_allow_credentials: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateResourceRequest {
    /// Path relative to the API root, e.g. `/orders/{order-id}`.
    pub resource_path: String,

    #[serde(flatten)]
    pub cors: CorsSettings,
}

impl ApiGatewayClient {
    #[instrument(skip(self, request), fields(resource_path = %request.resource_path))]
    pub async fn create_resource(
        &self,
        product_id: &str,
        api_id: &str,
        request: &CreateResourceRequest,
    ) -> Result<Resource, Error> {
        info!("Creating resource");
        self.fetch_entity(
            Method::POST,
            &["products", product_id, "apis", api_id, "resources"],
            None::<&()>,
            Some(request),
            "resource",
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn get_resource(
        &self,
        product_id: &str,
        api_id: &str,
        resource_id: &str,
    ) -> Result<Resource, Error> {
        debug!("Getting resource");
        self.fetch_entity(
            Method::GET,
            &["products", product_id, "apis", api_id, "resources", resource_id],
            None::<&()>,
            None::<&()>,
            "resource",
        )
        .await
    }

    /// Lists every resource of an API. The service does not page this list.
    #[instrument(skip(self))]
    pub async fn list_resources(
        &self,
        product_id: &str,
        api_id: &str,
    ) -> Result<ResourceList, Error> {
        let list: ResourceList = self
            .fetch_object(
                Method::GET,
                &["products", product_id, "apis", api_id, "resources"],
                None::<&()>,
                None::<&()>,
            )
            .await?;

        debug!(count = list.resources.len(), "Retrieved resources");
        Ok(list)
    }

    /// Replaces the CORS settings of a resource. Its path cannot change.
    #[instrument(skip(self, cors))]
    pub async fn update_resource_cors(
        &self,
        product_id: &str,
        api_id: &str,
        resource_id: &str,
        cors: &CorsSettings,
    ) -> Result<Resource, Error> {
        info!("Updating resource CORS settings");
        self.fetch_entity(
            Method::PATCH,
            &["products", product_id, "apis", api_id, "resources", resource_id],
            None::<&()>,
            Some(cors),
            "resource",
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn delete_resource(
        &self,
        product_id: &str,
        api_id: &str,
        resource_id: &str,
    ) -> Result<(), Error> {
        info!("Deleting resource");
        self.send_only(
            Method::DELETE,
            &["products", product_id, "apis", api_id, "resources", resource_id],
            None::<&()>,
            None::<&()>,
        )
        .await
    }
}
