//! API key commands.
//!
//! Key values are never printed by `list`. `get`, `create` and `regenerate`
//! show them, since that is the only way to hand a key to a caller.

use apigw_client::api_key::{
    ApiKey, CreateApiKeyRequest, KeyType, ListApiKeysQuery, UpdateApiKeyRequest,
};
use apigw_client::copier::Copier;
use apigw_client::models::Paging;
use apigw_client::{ApiGatewayClient, Page};
use clap::Subcommand;
use colored::Colorize;
use tracing::{info, instrument};

use super::{enabled_marker, field_line, page_footer, render};
use crate::errors::Error;

#[cfg(test)]
#[path = "api_key_cmd_tests.rs"]
mod tests;

#[derive(Subcommand, Debug, Clone)]
pub enum ApiKeyCommands {
    /// List API keys
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

    /// Show an API key, including its key values
    Get {
        api_key_id: String,

        /// Output format (json or pretty).
        #[arg(long, default_value = "pretty")]
        format: String,
    },

    /// Create an API key
    Create {
        #[arg(long)]
        name: String,

        #[arg(long)]
        description: Option<String>,

        /// Output format (json or pretty).
        #[arg(long, default_value = "pretty")]
        format: String,
    },

    /// Allow calls made with this key
    Enable { api_key_id: String },

    /// Reject calls made with this key
    Disable { api_key_id: String },

    /// Replace the primary or secondary key value
    Regenerate {
        api_key_id: String,

        /// Which key to replace: primary or secondary.
        #[arg(long, value_parser = parse_key_type)]
        key: KeyType,

        /// Output format (json or pretty).
        #[arg(long, default_value = "pretty")]
        format: String,
    },

    /// Delete an API key
    Delete { api_key_id: String },
}

pub fn parse_key_type(value: &str) -> Result<KeyType, String> {
    match value.to_lowercase().as_str() {
        "primary" => Ok(KeyType::Primary),
        "secondary" => Ok(KeyType::Secondary),
        other => Err(format!(
            "unknown key '{}', expected 'primary' or 'secondary'",
            other
        )),
    }
}

#[instrument(skip(client))]
pub async fn execute(cmd: &ApiKeyCommands, client: &ApiGatewayClient) -> Result<String, Error> {
    match cmd {
        ApiKeyCommands::List {
            name,
            offset,
            limit,
            format,
        } => {
            let query = ListApiKeysQuery {
                paging: Paging {
                    offset: *offset,
                    limit: *limit,
                },
                api_key_name: name.clone(),
            };
            let mut page = client.list_api_keys(&query).await?;
            for api_key in &mut page.content {
                api_key.primary_key = None;
                api_key.secondary_key = None;
            }
            render(&page, format, format_api_key_page)
        }
        ApiKeyCommands::Get { api_key_id, format } => {
            let api_key = client.get_api_key(api_key_id).await?;
            render(&api_key, format, format_api_key)
        }
        ApiKeyCommands::Create {
            name,
            description,
            format,
        } => {
            let request = CreateApiKeyRequest {
                api_key_name: name.clone(),
                api_key_description: description.clone(),
            };
            let api_key = client.create_api_key(&request).await?;
            render(&api_key, format, format_api_key)
        }
        ApiKeyCommands::Enable { api_key_id } => {
            set_enabled(client, api_key_id, true).await?;
            Ok(format!("API key {} enabled", api_key_id))
        }
        ApiKeyCommands::Disable { api_key_id } => {
            set_enabled(client, api_key_id, false).await?;
            Ok(format!("API key {} disabled", api_key_id))
        }
        ApiKeyCommands::Regenerate {
            api_key_id,
            key,
            format,
        } => {
            let api_key = client.regenerate_api_key(api_key_id, *key).await?;
            info!(
                message = "API key regenerated",
                api_key_id = api_key_id.as_str(),
                key = %key
            );
            render(&api_key, format, format_api_key)
        }
        ApiKeyCommands::Delete { api_key_id } => {
            client.delete_api_key(api_key_id).await?;
            Ok(format!("API key {} deleted", api_key_id))
        }
    }
}

/// Flips the enabled flag of a key while keeping its name and description.
#[instrument(skip(client))]
pub async fn set_enabled(
    client: &ApiGatewayClient,
    api_key_id: &str,
    enabled: bool,
) -> Result<ApiKey, Error> {
    let current = client.get_api_key(api_key_id).await?;
    let mut request = UpdateApiKeyRequest::from_api_key(&current)?;

    let flags = UpdateApiKeyRequest {
        is_enabled: Some(enabled),
        ..Default::default()
    };
    Copier::new()
        .ignore_empty(true)
        .copy_into(&flags, &mut request)?;

    Ok(client.update_api_key(api_key_id, &request).await?)
}

fn format_api_key(api_key: &ApiKey) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "\n{} ({})\n\n",
        api_key
            .api_key_name
            .as_deref()
            .unwrap_or("(unnamed)")
            .bold()
            .bright_cyan(),
        enabled_marker(api_key.is_enabled)
    ));
    output.push_str(&field_line("ID", api_key.api_key_id.as_deref()));
    output.push_str(&field_line(
        "Description",
        api_key.api_key_description.as_deref(),
    ));
    output.push_str(&field_line("Primary key", api_key.primary_key.as_deref()));
    output.push_str(&field_line(
        "Secondary key",
        api_key.secondary_key.as_deref(),
    ));

    output
}

fn format_api_key_page(page: &Page<ApiKey>) -> String {
    if page.is_empty() {
        return format!("{}\n", "No API keys found".dimmed());
    }

    let mut output = String::new();
    for api_key in &page.content {
        output.push_str(&format!(
            "{}  {}  {}\n",
            api_key.api_key_id.as_deref().unwrap_or("-").bold(),
            api_key.api_key_name.as_deref().unwrap_or("-"),
            enabled_marker(api_key.is_enabled)
        ));
    }
    output.push_str(&page_footer(page.content.len(), page.total));
    output
}
