use apigw_client::api::{Api, ListApisQuery};
use apigw_client::models::Paging;
use apigw_client::{ApiGatewayClient, Page};
use clap::Subcommand;
use colored::Colorize;
use tracing::instrument;

use super::{field_line, page_footer, render};
use crate::errors::Error;

#[cfg(test)]
#[path = "api_cmd_tests.rs"]
mod tests;

/// API subcommands. Every API belongs to a product.
#[derive(Subcommand, Debug, Clone)]
pub enum ApiCommands {
    /// List the APIs of a product
    List {
        #[arg(long)]
        product: String,

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

    /// Show a single API
    Get {
        #[arg(long)]
        product: String,

        api_id: String,

        /// Output format (json or pretty).
        #[arg(long, default_value = "pretty")]
        format: String,
    },

    /// Delete an API
    Delete {
        #[arg(long)]
        product: String,

        api_id: String,
    },
}

#[instrument(skip(client))]
pub async fn execute(cmd: &ApiCommands, client: &ApiGatewayClient) -> Result<String, Error> {
    match cmd {
        ApiCommands::List {
            product,
            name,
            offset,
            limit,
            format,
        } => {
            let query = ListApisQuery {
                paging: Paging {
                    offset: *offset,
                    limit: *limit,
                },
                api_name: name.clone(),
            };
            let page = client.list_apis(product, &query).await?;
            render(&page, format, format_api_page)
        }
        ApiCommands::Get {
            product,
            api_id,
            format,
        } => {
            let api = client.get_api(product, api_id).await?;
            render(&api, format, format_api)
        }
        ApiCommands::Delete { product, api_id } => {
            client.delete_api(product, api_id).await?;
            Ok(format!("API {} deleted from product {}", api_id, product))
        }
    }
}

fn format_api(api: &Api) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "\n{}\n\n",
        api.api_name.as_deref().unwrap_or("(unnamed)").bold().bright_cyan()
    ));
    output.push_str(&field_line("ID", api.api_id.as_deref()));
    output.push_str(&field_line("Product", api.product_id.as_deref()));
    output.push_str(&field_line("Description", api.api_description.as_deref()));
    output.push_str(&field_line("Published", api.is_published));

    output.push_str(&format!("\n{}\n", "Stages:".bold()));
    match api.stages.as_deref() {
        Some(stages) if !stages.is_empty() => {
            for stage in stages {
                output.push_str(&format!(
                    "  {} {}\n",
                    stage.stage_id.as_deref().unwrap_or("-"),
                    stage.stage_name.as_deref().unwrap_or("-").green()
                ));
            }
        }
        _ => output.push_str(&format!("  {}\n", "(none)".dimmed())),
    }

    output
}

fn format_api_page(page: &Page<Api>) -> String {
    if page.is_empty() {
        return format!("{}\n", "No APIs found".dimmed());
    }

    let mut output = String::new();
    for api in &page.content {
        output.push_str(&format!(
            "{}  {}\n",
            api.api_id.as_deref().unwrap_or("-").bold(),
            api.api_name.as_deref().unwrap_or("-")
        ));
    }
    output.push_str(&page_footer(page.content.len(), page.total));
    output
}
