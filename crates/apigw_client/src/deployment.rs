//! Stage deployment endpoints.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::models::{Page, Paging};
use crate::{ApiGatewayClient, Error};

#[cfg(test)]
#[path = "deployment_tests.rs"]
mod tests;

/// A snapshot of an API deployed to a stage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Deployment {
    pub deployment_no: Option<i64>,
    pub deployment_description: Option<String>,
    pub stage_id: Option<String>,
    pub api_id: Option<String>,
    pub is_current: Option<bool>,
    pub deployed_time: Option<String>,
    pub deployer: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDeploymentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deployment_description: Option<String>,
}

impl ApiGatewayClient {
    /// Deploys the current definition of the API to a stage.
    #[instrument(skip(self, request))]
    pub async fn create_deployment(
        &self,
        product_id: &str,
        api_id: &str,
        stage_id: &str,
        request: &CreateDeploymentRequest,
    ) -> Result<Deployment, Error> {
        info!("Deploying stage");
        let deployment: Deployment = self
            .fetch_entity(
                Method::POST,
                &[
                    "products", product_id, "apis", api_id, "stages", stage_id, "deployments",
                ],
                None::<&()>,
                Some(request),
                "deployment",
            )
            .await?;

        info!(deployment_no = ?deployment.deployment_no, "Deployed stage");
        Ok(deployment)
    }

    #[instrument(skip(self))]
    pub async fn get_deployment(
        &self,
        product_id: &str,
        api_id: &str,
        stage_id: &str,
        deployment_id: &str,
    ) -> Result<Deployment, Error> {
        debug!("Getting deployment");
        self.fetch_entity(
            Method::GET,
            &[
                "products", product_id, "apis", api_id, "stages", stage_id, "deployments",
                deployment_id,
            ],
            None::<&()>,
            None::<&()>,
            "deployment",
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn list_deployments(
        &self,
        product_id: &str,
        api_id: &str,
        stage_id: &str,
        paging: Paging,
    ) -> Result<Page<Deployment>, Error> {
        self.fetch_entity(
            Method::GET,
            &[
                "products", product_id, "apis", api_id, "stages", stage_id, "deployments",
            ],
            Some(&paging),
            None::<&()>,
            "deployment_page",
        )
        .await
    }

    /// Makes an earlier deployment the current one for its stage.
    #[instrument(skip(self))]
    pub async fn rollback_deployment(
        &self,
        product_id: &str,
        api_id: &str,
        stage_id: &str,
        deployment_id: &str,
    ) -> Result<Deployment, Error> {
        info!("Rolling back stage deployment");
        self.fetch_entity(
            Method::POST,
            &[
                "products", product_id, "apis", api_id, "stages", stage_id, "deployments",
                deployment_id, "rollback",
            ],
            None::<&()>,
            None::<&()>,
            "deployment",
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn delete_deployment(
        &self,
        product_id: &str,
        api_id: &str,
        stage_id: &str,
        deployment_id: &str,
    ) -> Result<(), Error> {
        info!("Deleting deployment");
        self.send_only(
            Method::DELETE,
            &[
                "products", product_id, "apis", api_id, "stages", stage_id, "deployments",
                deployment_id,
            ],
            None::<&()>,
            None::<&()>,
        )
        .await
    }
}
