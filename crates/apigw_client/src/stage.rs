//! Stage endpoints.
//!
//! Stages are the deployment targets of an API (for example `dev` and
//! `prod`). Throttling, caching and IP access control are configured here.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::{ApiGatewayClient, Error};

#[cfg(test)]
#[path = "stage_tests.rs"]
mod tests;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IpAclType {
    Allowed,
    Denied,
}

/// A stage as returned by the service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    pub stage_id: Option<String>,
    pub stage_name: Option<String>,
    pub api_id: Option<String>,
    pub product_id: Option<String>,
    pub endpoint_domain: Option<String>,
    pub invoke_url: Option<String>,
    pub enabled_content_encoding: Option<bool>,
    pub is_max_qps_throttle_valid: Option<bool>,
    pub max_qps: Option<i32>,
    pub throttle_rps: Option<i32>,
    pub cache_ttl_sec: Option<i32>,
    pub ip_acl_type: Option<IpAclType>,
    pub ip_acl_list: Option<String>,
    pub deployed_stage_deployment_no: Option<i64>,
    pub is_published: Option<bool>,
    pub mod_time: Option<String>,
}

/// Response of [`ApiGatewayClient::list_stages`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StageList {
    #[serde(default)]
    pub stages: Vec<Stage>,
}

/// Body of both stage creation and stage update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageRequest {
    pub stage_name: String,

    /// Backend base URL that HTTP methods with relative URLs resolve against.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint_domain: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled_content_encoding: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_max_qps_throttle_valid: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_qps: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub throttle_rps: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_ttl_sec: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_acl_type: Option<IpAclType>,

    /// Comma separated addresses or CIDR blocks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_acl_list: Option<String>,
}

impl ApiGatewayClient {
    #[instrument(skip(self, request), fields(stage_name = %request.stage_name))]
    pub async fn create_stage(
        &self,
        product_id: &str,
        api_id: &str,
        request: &StageRequest,
    ) -> Result<Stage, Error> {
        info!("Creating stage");
        self.fetch_entity(
            Method::POST,
            &["products", product_id, "apis", api_id, "stages"],
            None::<&()>,
            Some(request),
            "stage",
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn get_stage(
        &self,
        product_id: &str,
        api_id: &str,
        stage_id: &str,
    ) -> Result<Stage, Error> {
        debug!("Getting stage");
        self.fetch_entity(
            Method::GET,
            &["products", product_id, "apis", api_id, "stages", stage_id],
            None::<&()>,
            None::<&()>,
            "stage",
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn list_stages(&self, product_id: &str, api_id: &str) -> Result<StageList, Error> {
        let list: StageList = self
            .fetch_object(
                Method::GET,
                &["products", product_id, "apis", api_id, "stages"],
                None::<&()>,
                None::<&()>,
            )
            .await?;

        debug!(count = list.stages.len(), "Retrieved stages");
        Ok(list)
    }

    #[instrument(skip(self, request))]
    pub async fn update_stage(
        &self,
        product_id: &str,
        api_id: &str,
        stage_id: &str,
        request: &StageRequest,
    ) -> Result<Stage, Error> {
        info!("Updating stage");
        self.fetch_entity(
            Method::PATCH,
            &["products", product_id, "apis", api_id, "stages", stage_id],
            None::<&()>,
            Some(request),
            "stage",
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn delete_stage(
        &self,
        product_id: &str,
        api_id: &str,
        stage_id: &str,
    ) -> Result<(), Error> {
        info!("Deleting stage");
        self.send_only(
            Method::DELETE,
            &["products", product_id, "apis", api_id, "stages", stage_id],
            None::<&()>,
            None::<&()>,
        )
        .await
    }
}
