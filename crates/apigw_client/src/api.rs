//! API endpoints, scoped to a product.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::models::{Page, Paging};
use crate::{ApiGatewayClient, Error};

#[cfg(test)]
#[path = "api_tests.rs"]
mod tests;

/// An API as returned by the service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Api {
    pub api_id: Option<String>,
    pub api_name: Option<String>,
    pub api_description: Option<String>,
    pub product_id: Option<String>,
    pub tenant_id: Option<String>,
    pub is_deleted: Option<bool>,
    pub is_published: Option<bool>,
    pub permission: Option<String>,
    pub action_name: Option<String>,
    pub domain_code: Option<String>,
    pub modifier: Option<String>,
    pub mod_time: Option<String>,
    pub stages: Option<Vec<ApiStageSummary>>,
}

/// Short stage record embedded in API responses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiStageSummary {
    pub stage_id: Option<String>,
    pub stage_name: Option<String>,
    pub is_published: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateApiRequest {
    pub api_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_description: Option<String>,
}

/// Payload for updating an API. `product_id` moves the API to another product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateApiRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListApisQuery {
    #[serde(flatten)]
    pub paging: Paging,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_name: Option<String>,
}

impl ApiGatewayClient {
    #[instrument(skip(self, request), fields(api_name = %request.api_name))]
    pub async fn create_api(
        &self,
        product_id: &str,
        request: &CreateApiRequest,
    ) -> Result<Api, Error> {
        info!("Creating API");
        self.fetch_entity(
            Method::POST,
            &["products", product_id, "apis"],
            None::<&()>,
            Some(request),
            "api",
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn get_api(&self, product_id: &str, api_id: &str) -> Result<Api, Error> {
        debug!("Getting API");
        self.fetch_entity(
            Method::GET,
            &["products", product_id, "apis", api_id],
            None::<&()>,
            None::<&()>,
            "api",
        )
        .await
    }

    #[instrument(skip(self, query))]
    pub async fn list_apis(
        &self,
        product_id: &str,
        query: &ListApisQuery,
    ) -> Result<Page<Api>, Error> {
        let page: Page<Api> = self
            .fetch_entity(
                Method::GET,
                &["products", product_id, "apis"],
                Some(query),
                None::<&()>,
                "api_page",
            )
            .await?;

        debug!(count = page.content.len(), "Retrieved APIs");
        Ok(page)
    }

    #[instrument(skip(self, request))]
    pub async fn update_api(
        &self,
        product_id: &str,
        api_id: &str,
        request: &UpdateApiRequest,
    ) -> Result<Api, Error> {
        info!("Updating API");
        self.fetch_entity(
            Method::PATCH,
            &["products", product_id, "apis", api_id],
            None::<&()>,
            Some(request),
            "api",
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn delete_api(&self, product_id: &str, api_id: &str) -> Result<(), Error> {
        info!("Deleting API");
        self.send_only(
            Method::DELETE,
            &["products", product_id, "apis", api_id],
            None::<&()>,
            None::<&()>,
        )
        .await
    }
}
