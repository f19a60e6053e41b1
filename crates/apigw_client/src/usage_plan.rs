//! Usage plan endpoints.
//!
//! A usage plan caps the request rate and the daily or monthly quota of the
//! stages attached to it. Plans are account wide, so their paths are not
//! scoped by product.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::models::{Page, Paging};
use crate::{ApiGatewayClient, Error};

#[cfg(test)]
#[path = "usage_plan_tests.rs"]
mod tests;

/// Which quota a usage plan enforces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuotaCondition {
    Day,
    Month,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsagePlan {
    pub usage_plan_id: Option<String>,
    pub usage_plan_name: Option<String>,
    pub usage_plan_description: Option<String>,
    pub rate_rps: Option<i32>,
    pub quota_condition: Option<QuotaCondition>,
    pub day_quota_request: Option<i64>,
    pub month_quota_request: Option<i64>,
    pub domain_code: Option<String>,
    pub associated_stages_count: Option<i32>,
    pub permission: Option<String>,
    pub action_name: Option<String>,
    pub tenant_id: Option<String>,
    pub modifier: Option<String>,
    pub mod_time: Option<String>,
}

/// A stage attached to a usage plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsagePlanStage {
    pub stage_id: Option<String>,
    pub stage_name: Option<String>,
    pub api_id: Option<String>,
    pub api_name: Option<String>,
    pub product_id: Option<String>,
    pub product_name: Option<String>,
}

/// Response of the usage plan stage listing and association calls.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsagePlanStageList {
    #[serde(default)]
    pub stages: Vec<UsagePlanStage>,
}

/// Body of both usage plan creation and usage plan update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsagePlanRequest {
    pub usage_plan_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_plan_description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_rps: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub quota_condition: Option<QuotaCondition>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_quota_request: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub month_quota_request: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain_code: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListUsagePlansQuery {
    #[serde(flatten)]
    pub paging: Paging,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_plan_name: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AssociateStagesRequest<'a> {
    stage_ids: &'a [String],
}

impl ApiGatewayClient {
    #[instrument(skip(self, request), fields(usage_plan_name = %request.usage_plan_name))]
    pub async fn create_usage_plan(&self, request: &UsagePlanRequest) -> Result<UsagePlan, Error> {
        info!("Creating usage plan");
        self.fetch_entity(
            Method::POST,
            &["usage-plans"],
            None::<&()>,
            Some(request),
            "usage_plan",
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn get_usage_plan(&self, usage_plan_id: &str) -> Result<UsagePlan, Error> {
        debug!("Getting usage plan");
        self.fetch_entity(
            Method::GET,
            &["usage-plans", usage_plan_id],
            None::<&()>,
            None::<&()>,
            "usage_plan",
        )
        .await
    }

    #[instrument(skip(self, query))]
    pub async fn list_usage_plans(
        &self,
        query: &ListUsagePlansQuery,
    ) -> Result<Page<UsagePlan>, Error> {
        self.fetch_entity(
            Method::GET,
            &["usage-plans"],
            Some(query),
            None::<&()>,
            "usage_plan_page",
        )
        .await
    }

    #[instrument(skip(self, request))]
    pub async fn update_usage_plan(
        &self,
        usage_plan_id: &str,
        request: &UsagePlanRequest,
    ) -> Result<UsagePlan, Error> {
        info!("Updating usage plan");
        self.fetch_entity(
            Method::PATCH,
            &["usage-plans", usage_plan_id],
            None::<&()>,
            Some(request),
            "usage_plan",
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn delete_usage_plan(&self, usage_plan_id: &str) -> Result<(), Error> {
        info!("Deleting usage plan");
        self.send_only(
            Method::DELETE,
            &["usage-plans", usage_plan_id],
            None::<&()>,
            None::<&()>,
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn list_usage_plan_stages(
        &self,
        usage_plan_id: &str,
    ) -> Result<UsagePlanStageList, Error> {
        self.fetch_object(
            Method::GET,
            &["usage-plans", usage_plan_id, "stages"],
            None::<&()>,
            None::<&()>,
        )
        .await
    }

    /// Attaches stages to a usage plan and returns the stages now attached.
    #[instrument(skip(self))]
    pub async fn associate_usage_plan_stages(
        &self,
        usage_plan_id: &str,
        stage_ids: &[String],
    ) -> Result<UsagePlanStageList, Error> {
        info!(count = stage_ids.len(), "Attaching stages to usage plan");
        self.fetch_object(
            Method::POST,
            &["usage-plans", usage_plan_id, "stages"],
            None::<&()>,
            Some(&AssociateStagesRequest { stage_ids }),
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn dissociate_usage_plan_stage(
        &self,
        usage_plan_id: &str,
        stage_id: &str,
    ) -> Result<(), Error> {
        info!("Detaching stage from usage plan");
        self.send_only(
            Method::DELETE,
            &["usage-plans", usage_plan_id, "stages", stage_id],
            None::<&()>,
            None::<&()>,
        )
        .await
    }
}
