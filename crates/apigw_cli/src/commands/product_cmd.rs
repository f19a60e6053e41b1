//! Product commands.
//!
//! ```bash
//! apigw product list --name pay --format json
//! apigw product create --name payments --description "Payment APIs"
//! apigw product update p-123 --subscription published
//! ```

use apigw_client::copier::Copier;
use apigw_client::models::Paging;
use apigw_client::product::{
    CreateProductRequest, ListProductsQuery, Product, SubscriptionCode, UpdateProductRequest,
};
use apigw_client::{ApiGatewayClient, Page};
use clap::Subcommand;
use colored::Colorize;
use tracing::{debug, info, instrument};

use super::{field_line, page_footer, render};
use crate::errors::Error;

#[cfg(test)]
#[path = "product_cmd_tests.rs"]
mod tests;

#[derive(Subcommand, Debug, Clone)]
pub enum ProductCommands {
    /// List products
    List {
        /// Only products whose name contains this text
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

    /// Show a single product
    Get {
        product_id: String,

        /// Output format (json or pretty).
        #[arg(long, default_value = "pretty")]
        format: String,
    },

    /// Create a product
    Create {
        #[arg(long)]
        name: String,

        #[arg(long)]
        description: Option<String>,

        /// Let callers use the product without subscribing first
        #[arg(long)]
        published: bool,

        /// Output format (json or pretty).
        #[arg(long, default_value = "pretty")]
        format: String,
    },

    /// Change a product. Fields that are not given keep their current value.
    Update {
        product_id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// PROTECTED or PUBLISHED
        #[arg(long, value_parser = parse_subscription_code)]
        subscription: Option<SubscriptionCode>,

        /// Output format (json or pretty).
        #[arg(long, default_value = "pretty")]
        format: String,
    },

    /// Delete a product
    Delete { product_id: String },
}

/// Parses a subscription code given on the command line, ignoring case.
pub fn parse_subscription_code(s: &str) -> Result<SubscriptionCode, String> {
    match s.to_ascii_uppercase().as_str() {
        "PROTECTED" => Ok(SubscriptionCode::Protected),
        "PUBLISHED" => Ok(SubscriptionCode::Published),
        _ => Err(format!(
            "invalid subscription code `{}`: use PROTECTED or PUBLISHED",
            s
        )),
    }
}

#[instrument(skip(client))]
pub async fn execute(cmd: &ProductCommands, client: &ApiGatewayClient) -> Result<String, Error> {
    match cmd {
        ProductCommands::List {
            name,
            offset,
            limit,
            format,
        } => {
            let query = ListProductsQuery {
                paging: Paging {
                    offset: *offset,
                    limit: *limit,
                },
                product_name: name.clone(),
                subscription_code: None,
            };
            let page = client.list_products(&query).await?;
            render(&page, format, format_product_page)
        }
        ProductCommands::Get { product_id, format } => {
            let product = client.get_product(product_id).await?;
            render(&product, format, format_product)
        }
        ProductCommands::Create {
            name,
            description,
            published,
            format,
        } => {
            let request = CreateProductRequest {
                product_name: name.clone(),
                product_description: description.clone(),
                subscription_code: if *published {
                    SubscriptionCode::Published
                } else {
                    SubscriptionCode::Protected
                },
            };
            let product = client.create_product(&request).await?;
            render(&product, format, format_product)
        }
        ProductCommands::Update {
            product_id,
            name,
            description,
            subscription,
            format,
        } => {
            let flags = UpdateProductRequest {
                product_name: name.clone(),
                product_description: description.clone(),
                subscription_code: *subscription,
            };
            let product = update_product(client, product_id, &flags).await?;
            render(&product, format, format_product)
        }
        ProductCommands::Delete { product_id } => {
            client.delete_product(product_id).await?;
            Ok(format!("Product {} deleted", product_id))
        }
    }
}

/// Overlays `flags` onto the current state of the product and sends the result.
#[instrument(skip(client, flags))]
pub async fn update_product(
    client: &ApiGatewayClient,
    product_id: &str,
    flags: &UpdateProductRequest,
) -> Result<Product, Error> {
    let current = client.get_product(product_id).await?;
    let mut request = UpdateProductRequest::from_product(&current)?;

    Copier::new()
        .ignore_empty(true)
        .copy_into(flags, &mut request)?;
    debug!(request = ?request, "Built product update");

    let product = client.update_product(product_id, &request).await?;
    info!(message = "Product updated", product_id = product_id);
    Ok(product)
}

fn subscription_label(code: Option<SubscriptionCode>) -> String {
    match code {
        Some(SubscriptionCode::Protected) => "protected".yellow().to_string(),
        Some(SubscriptionCode::Published) => "published".green().to_string(),
        None => "unknown".dimmed().to_string(),
    }
}

fn format_product(product: &Product) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "\n{}\n\n",
        product
            .product_name
            .as_deref()
            .unwrap_or("(unnamed)")
            .bold()
            .bright_cyan()
    ));
    output.push_str(&field_line("ID", product.product_id.as_deref()));
    output.push_str(&field_line(
        "Description",
        product.product_description.as_deref(),
    ));
    output.push_str(&format!(
        "{}: {}\n",
        "Subscription".bold(),
        subscription_label(product.subscription_code)
    ));
    output.push_str(&field_line("Published", product.is_published));
    output.push_str(&field_line("Modified", product.mod_time.as_deref()));

    output
}

fn format_product_page(page: &Page<Product>) -> String {
    if page.is_empty() {
        return format!("{}\n", "No products found".dimmed());
    }

    let mut output = String::new();
    for product in &page.content {
        output.push_str(&format!(
            "{}  {}  {}\n",
            product.product_id.as_deref().unwrap_or("-").bold(),
            product.product_name.as_deref().unwrap_or("-"),
            subscription_label(product.subscription_code)
        ));
    }
    output.push_str(&page_footer(page.content.len(), page.total));
    output
}
