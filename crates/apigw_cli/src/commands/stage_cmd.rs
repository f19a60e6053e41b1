//! Stage and deployment commands.
//!
//! ```bash
//! apigw stage list --product p-1 --api a-1
//! apigw stage deploy --product p-1 --api a-1 s-1 --description "release 7"
//! apigw stage deployments --product p-1 --api a-1 s-1 --limit 5
//! ```

use apigw_client::deployment::{CreateDeploymentRequest, Deployment};
use apigw_client::models::Paging;
use apigw_client::stage::{IpAclType, Stage, StageList};
use apigw_client::{ApiGatewayClient, Page};
use clap::{Args, Subcommand};
use colored::Colorize;
use tracing::{info, instrument};

use super::{field_line, page_footer, render};
use crate::errors::Error;

#[cfg(test)]
#[path = "stage_cmd_tests.rs"]
mod tests;

/// The API a stage command works on.
#[derive(Args, Debug, Clone)]
pub struct ApiScope {
    #[arg(long)]
    pub product: String,

    #[arg(long)]
    pub api: String,
}

#[derive(Subcommand, Debug, Clone)]
pub enum StageCommands {
    /// List the stages of an API
    List {
        #[command(flatten)]
        scope: ApiScope,

        /// Output format (json or pretty).
        #[arg(long, default_value = "pretty")]
        format: String,
    },

    /// Show a single stage
    Get {
        #[command(flatten)]
        scope: ApiScope,

        stage_id: String,

        /// Output format (json or pretty).
        #[arg(long, default_value = "pretty")]
        format: String,
    },

    /// Deploy the current API definition to a stage
    Deploy {
        #[command(flatten)]
        scope: ApiScope,

        stage_id: String,

        #[arg(long)]
        description: Option<String>,

        /// Output format (json or pretty).
        #[arg(long, default_value = "pretty")]
        format: String,
    },

    /// List the deployments of a stage, newest first
    Deployments {
        #[command(flatten)]
        scope: ApiScope,

        stage_id: String,

        #[arg(long)]
        offset: Option<i64>,

        #[arg(long)]
        limit: Option<i64>,

        /// Output format (json or pretty).
        #[arg(long, default_value = "pretty")]
        format: String,
    },
}

#[instrument(skip(client))]
pub async fn execute(cmd: &StageCommands, client: &ApiGatewayClient) -> Result<String, Error> {
    match cmd {
        StageCommands::List { scope, format } => {
            let list = client.list_stages(&scope.product, &scope.api).await?;
            render(&list, format, format_stage_list)
        }
        StageCommands::Get {
            scope,
            stage_id,
            format,
        } => {
            let stage = client
                .get_stage(&scope.product, &scope.api, stage_id)
                .await?;
            render(&stage, format, format_stage)
        }
        StageCommands::Deploy {
            scope,
            stage_id,
            description,
            format,
        } => {
            let request = CreateDeploymentRequest {
                deployment_description: description.clone(),
            };
            let deployment = client
                .create_deployment(&scope.product, &scope.api, stage_id, &request)
                .await?;
            info!(
                message = "Stage deployed",
                stage_id = stage_id.as_str(),
                deployment_no = ?deployment.deployment_no
            );
            render(&deployment, format, format_deployment)
        }
        StageCommands::Deployments {
            scope,
            stage_id,
            offset,
            limit,
            format,
        } => {
            let paging = Paging {
                offset: *offset,
                limit: *limit,
            };
            let page = client
                .list_deployments(&scope.product, &scope.api, stage_id, paging)
                .await?;
            render(&page, format, format_deployment_page)
        }
    }
}

fn format_stage(stage: &Stage) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "\n{}\n\n",
        stage
            .stage_name
            .as_deref()
            .unwrap_or("(unnamed)")
            .bold()
            .bright_cyan()
    ));
    output.push_str(&field_line("ID", stage.stage_id.as_deref()));
    output.push_str(&field_line("Invoke URL", stage.invoke_url.as_deref()));
    output.push_str(&field_line("Endpoint domain", stage.endpoint_domain.as_deref()));
    output.push_str(&field_line(
        "Deployment",
        stage.deployed_stage_deployment_no,
    ));

    output.push_str(&format!("\n{}\n", "Throttling:".bold()));
    if stage.is_max_qps_throttle_valid == Some(true) {
        output.push_str(&format!(
            "  max {} qps, {} rps\n",
            stage.max_qps.map_or("-".to_string(), |v| v.to_string()),
            stage.throttle_rps.map_or("-".to_string(), |v| v.to_string())
        ));
    } else {
        output.push_str(&format!("  {}\n", "(off)".dimmed()));
    }

    if let Some(acl) = stage.ip_acl_list.as_deref() {
        let kind = match stage.ip_acl_type {
            Some(IpAclType::Allowed) => "allow",
            Some(IpAclType::Denied) => "deny",
            None => "-",
        };
        output.push_str(&format!("\n{}: {} {}\n", "IP ACL".bold(), kind, acl));
    }

    output
}

fn format_stage_list(list: &StageList) -> String {
    if list.stages.is_empty() {
        return format!("{}\n", "No stages found".dimmed());
    }

    let mut output = String::new();
    for stage in &list.stages {
        output.push_str(&format!(
            "{}  {}  {}\n",
            stage.stage_id.as_deref().unwrap_or("-").bold(),
            stage.stage_name.as_deref().unwrap_or("-"),
            stage.invoke_url.as_deref().unwrap_or("").dimmed()
        ));
    }
    output
}

fn format_deployment(deployment: &Deployment) -> String {
    let mut output = String::new();

    output.push_str(&field_line("Deployment", deployment.deployment_no));
    output.push_str(&field_line(
        "Description",
        deployment.deployment_description.as_deref(),
    ));
    output.push_str(&field_line("Deployed", deployment.deployed_time.as_deref()));
    output.push_str(&field_line("Current", deployment.is_current));

    output
}

fn format_deployment_page(page: &Page<Deployment>) -> String {
    if page.is_empty() {
        return format!("{}\n", "No deployments found".dimmed());
    }

    let mut output = String::new();
    for deployment in &page.content {
        let marker = if deployment.is_current == Some(true) {
            "*".green().to_string()
        } else {
            " ".to_string()
        };
        output.push_str(&format!(
            "{} {}  {}  {}\n",
            marker,
            deployment
                .deployment_no
                .map_or("-".to_string(), |n| n.to_string())
                .bold(),
            deployment.deployed_time.as_deref().unwrap_or("-"),
            deployment.deployment_description.as_deref().unwrap_or("")
        ));
    }
    output.push_str(&page_footer(page.content.len(), page.total));
    output
}
