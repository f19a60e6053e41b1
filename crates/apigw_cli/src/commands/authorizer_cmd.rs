use apigw_client::authorizer::{Authorizer, ListAuthorizersQuery};
use apigw_client::models::Paging;
use apigw_client::{ApiGatewayClient, Page};
use clap::Subcommand;
use colored::Colorize;
use tracing::instrument;

use super::{field_line, page_footer, render};
use crate::errors::Error;

#[cfg(test)]
#[path = "authorizer_cmd_tests.rs"]
mod tests;

#[derive(Subcommand, Debug, Clone)]
pub enum AuthorizerCommands {
    /// List authorizers
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

    /// Show an authorizer and the function it calls
    Get {
        authorizer_id: String,

        /// Output format (json or pretty).
        #[arg(long, default_value = "pretty")]
        format: String,
    },

    /// Delete an authorizer
    Delete { authorizer_id: String },
}

#[instrument(skip(client))]
pub async fn execute(
    cmd: &AuthorizerCommands,
    client: &ApiGatewayClient,
) -> Result<String, Error> {
    match cmd {
        AuthorizerCommands::List {
            name,
            offset,
            limit,
            format,
        } => {
            let query = ListAuthorizersQuery {
                paging: Paging {
                    offset: *offset,
                    limit: *limit,
                },
                authorizer_name: name.clone(),
            };
            let page = client.list_authorizers(&query).await?;
            render(&page, format, format_authorizer_page)
        }
        AuthorizerCommands::Get {
            authorizer_id,
            format,
        } => {
            let authorizer = client.get_authorizer(authorizer_id).await?;
            render(&authorizer, format, format_authorizer)
        }
        AuthorizerCommands::Delete { authorizer_id } => {
            client.delete_authorizer(authorizer_id).await?;
            Ok(format!("Authorizer {} deleted", authorizer_id))
        }
    }
}

fn format_authorizer(authorizer: &Authorizer) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "\n{}\n\n",
        authorizer
            .authorizer_name
            .as_deref()
            .unwrap_or("(unnamed)")
            .bold()
            .bright_cyan()
    ));
    output.push_str(&field_line("ID", authorizer.authorizer_id.as_deref()));
    output.push_str(&field_line(
        "Description",
        authorizer.authorizer_description.as_deref(),
    ));

    if let Some(config) = &authorizer.authorizer_config {
        output.push_str(&format!(
            "{}: {} ({})\n",
            "Function".bold(),
            config.function_id,
            config.region
        ));
        if !config.payload.is_empty() {
            output.push_str(&format!("\n{}\n", "Payload:".bold()));
            for item in &config.payload {
                output.push_str(&format!("  {} {}\n", item.r#in.dimmed(), item.name));
            }
        }
    }

    output
}

fn format_authorizer_page(page: &Page<Authorizer>) -> String {
    if page.is_empty() {
        return format!("{}\n", "No authorizers found".dimmed());
    }

    let mut output = String::new();
    for authorizer in &page.content {
        output.push_str(&format!(
            "{}  {}\n",
            authorizer.authorizer_id.as_deref().unwrap_or("-").bold(),
            authorizer.authorizer_name.as_deref().unwrap_or("-")
        ));
    }
    output.push_str(&page_footer(page.content.len(), page.total));
    output
}
