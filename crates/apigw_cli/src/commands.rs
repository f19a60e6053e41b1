//! Command modules for the `apigw` CLI.
//!
//! Each submodule handles one resource family:
//!
//! - `config_cmd`: create and inspect the configuration file
//! - `product_cmd`, `api_cmd`, `stage_cmd`: the product / API / stage tree
//! - `usage_plan_cmd`, `api_key_cmd`, `authorizer_cmd`: account wide resources
//! - `sign_cmd`: print the authentication headers for a request
//!
//! Commands that talk to the service take an [`ApiGatewayClient`] and return
//! the text to print, so they can be exercised against a mock server.
//!
//! [`ApiGatewayClient`]: apigw_client::ApiGatewayClient

use colored::Colorize;
use serde::Serialize;

use crate::errors::Error;

pub mod api_cmd;
pub mod api_key_cmd;
pub mod authorizer_cmd;
pub mod config_cmd;
pub mod product_cmd;
pub mod sign_cmd;
pub mod stage_cmd;
pub mod usage_plan_cmd;

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;

/// Renders `value` as JSON, or with `pretty` for human readers.
///
/// # Errors
///
/// Returns `Error::InvalidArguments` for any format other than `json` or
/// `pretty`.
pub fn render<T, F>(value: &T, format: &str, pretty: F) -> Result<String, Error>
where
    T: Serialize + ?Sized,
    F: FnOnce(&T) -> String,
{
    match format {
        "json" => serde_json::to_string_pretty(value)
            .map_err(|e| Error::Config(format!("Failed to serialize to JSON: {}", e))),
        "pretty" => Ok(pretty(value)),
        _ => Err(Error::InvalidArguments(format!(
            "Invalid format: '{}'. Use 'json' or 'pretty'.",
            format
        ))),
    }
}

/// One `Label: value` line, with a dimmed placeholder for missing values.
pub(crate) fn field_line<V: ToString>(label: &str, value: Option<V>) -> String {
    match value {
        Some(v) => format!("{}: {}\n", label.bold(), v.to_string()),
        None => format!("{}: {}\n", label.bold(), "(none)".dimmed()),
    }
}

/// Footer shown under paged listings.
pub(crate) fn page_footer(shown: usize, total: Option<i64>) -> String {
    match total {
        Some(total) => format!("\n{} of {} shown\n", shown, total),
        None => format!("\n{} shown\n", shown),
    }
}

pub(crate) fn enabled_marker(enabled: Option<bool>) -> String {
    match enabled {
        Some(true) => "enabled".green().to_string(),
        Some(false) => "disabled".red().to_string(),
        None => "unknown".dimmed().to_string(),
    }
}
