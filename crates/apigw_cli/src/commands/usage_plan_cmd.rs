use apigw_client::models::Paging;
use apigw_client::usage_plan::{
    ListUsagePlansQuery, QuotaCondition, UsagePlan, UsagePlanStageList,
};
use apigw_client::{ApiGatewayClient, Page};
use clap::Subcommand;
use colored::Colorize;
use tracing::instrument;

use super::{field_line, page_footer, render};
use crate::errors::Error;

#[cfg(test)]
#[path = "usage_plan_cmd_tests.rs"]
mod tests;

#[derive(Subcommand, Debug, Clone)]
pub enum UsagePlanCommands {
    /// List usage plans
    List {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        offset: Option<i64>,

        #[arg(long)]
        limit: Option<i64>,

        /// Output format (json or pretty).
        #[arg(long, default_value = "pretty")]
        format: String,
    },

    /// Show a usage plan and the stages attached to it
    Get {
        usage_plan_id: String,

        /// Output format (json or pretty).
        #[arg(long, default_value = "pretty")]
        format: String,
    },

    /// Attach one or more stages to a usage plan
    AttachStage {
        usage_plan_id: String,

        /// Stage to attach. Repeat to attach several.
        #[arg(long = "stage", required = true)]
        stages: Vec<String>,
    },

    /// Detach a stage from a usage plan
    DetachStage {
        usage_plan_id: String,

        #[arg(long)]
        stage: String,
    },
}

#[instrument(skip(client))]
pub async fn execute(
    cmd: &UsagePlanCommands,
    client: &ApiGatewayClient,
) -> Result<String, Error> {
    match cmd {
        UsagePlanCommands::List {
            name,
            offset,
            limit,
            format,
        } => {
            let query = ListUsagePlansQuery {
                paging: Paging {
                    offset: *offset,
                    limit: *limit,
                },
                usage_plan_name: name.clone(),
            };
            let page = client.list_usage_plans(&query).await?;
            render(&page, format, format_usage_plan_page)
        }
        UsagePlanCommands::Get {
            usage_plan_id,
            format,
        } => {
            let plan = client.get_usage_plan(usage_plan_id).await?;
            let stages = client.list_usage_plan_stages(usage_plan_id).await?;
            let details = UsagePlanDetails { plan, stages };
            render(&details, format, format_usage_plan)
        }
        UsagePlanCommands::AttachStage {
            usage_plan_id,
            stages,
        } => {
            let attached = client
                .associate_usage_plan_stages(usage_plan_id, stages)
                .await?;
            Ok(format!(
                "Usage plan {} now has {} stage(s) attached",
                usage_plan_id,
                attached.stages.len()
            ))
        }
        UsagePlanCommands::DetachStage {
            usage_plan_id,
            stage,
        } => {
            client
                .dissociate_usage_plan_stage(usage_plan_id, stage)
                .await?;
            Ok(format!(
                "Stage {} detached from usage plan {}",
                stage, usage_plan_id
            ))
        }
    }
}

/// A usage plan together with its attached stages, as shown by `get`.
#[derive(Debug, serde::Serialize)]
struct UsagePlanDetails {
    #[serde(flatten)]
    plan: UsagePlan,

    #[serde(flatten)]
    stages: UsagePlanStageList,
}

fn quota_line(plan: &UsagePlan) -> String {
    match plan.quota_condition {
        Some(QuotaCondition::Day) => format!(
            "{} requests per day",
            plan.day_quota_request.map_or("-".to_string(), |v| v.to_string())
        ),
        Some(QuotaCondition::Month) => format!(
            "{} requests per month",
            plan.month_quota_request
                .map_or("-".to_string(), |v| v.to_string())
        ),
        None => "unlimited".to_string(),
    }
}

fn format_usage_plan(details: &UsagePlanDetails) -> String {
    let plan = &details.plan;
    let mut output = String::new();

    output.push_str(&format!(
        "\n{}\n\n",
        plan.usage_plan_name
            .as_deref()
            .unwrap_or("(unnamed)")
            .bold()
            .bright_cyan()
    ));
    output.push_str(&field_line("ID", plan.usage_plan_id.as_deref()));
    output.push_str(&field_line(
        "Description",
        plan.usage_plan_description.as_deref(),
    ));
    output.push_str(&field_line("Rate (rps)", plan.rate_rps));
    output.push_str(&format!("{}: {}\n", "Quota".bold(), quota_line(plan)));

    output.push_str(&format!("\n{}\n", "Stages:".bold()));
    if details.stages.stages.is_empty() {
        output.push_str(&format!("  {}\n", "(none attached)".dimmed()));
    }
    for stage in &details.stages.stages {
        output.push_str(&format!(
            "  {} {} / {} / {}\n",
            stage.stage_id.as_deref().unwrap_or("-"),
            stage.product_name.as_deref().unwrap_or("-"),
            stage.api_name.as_deref().unwrap_or("-"),
            stage.stage_name.as_deref().unwrap_or("-").green()
        ));
    }

    output
}

fn format_usage_plan_page(page: &Page<UsagePlan>) -> String {
    if page.is_empty() {
        return format!("{}\n", "No usage plans found".dimmed());
    }

    let mut output = String::new();
    for plan in &page.content {
        output.push_str(&format!(
            "{}  {}  {}\n",
            plan.usage_plan_id.as_deref().unwrap_or("-").bold(),
            plan.usage_plan_name.as_deref().unwrap_or("-"),
            quota_line(plan).dimmed()
        ));
    }
    output.push_str(&page_footer(page.content.len(), page.total));
    output
}
