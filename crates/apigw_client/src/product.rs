//! Product endpoints.
//!
//! A product is the top level container of the gateway: it groups APIs and
//! controls whether callers need a subscription to use them.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::copier;
use crate::models::{Page, Paging};
use crate::{ApiGatewayClient, Error};

#[cfg(test)]
#[path = "product_tests.rs"]
mod tests;

/// Whether a product can be called without subscribing to it first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubscriptionCode {
    /// Callers need an approved subscription.
    #[default]
    Protected,
    /// Published to callers without a subscription step.
    Published,
}

/// A product as returned by the service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub product_id: Option<String>,
    pub product_name: Option<String>,
    pub product_description: Option<String>,
    pub subscription_code: Option<SubscriptionCode>,
    pub is_published: Option<bool>,
    pub is_deleted: Option<bool>,
    pub permission: Option<String>,
    pub action_name: Option<String>,
    pub domain_code: Option<String>,
    pub tenant_id: Option<String>,
    pub modifier: Option<String>,
    pub invoke_id: Option<String>,
    pub zone_code: Option<String>,
    pub mod_time: Option<String>,
    pub disabled: Option<bool>,
}

/// Payload for creating a product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub product_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_description: Option<String>,

    pub subscription_code: SubscriptionCode,
}

/// Payload for updating a product. Unset fields are left out of the body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription_code: Option<SubscriptionCode>,
}

impl UpdateProductRequest {
    /// Starts an update from the current state of a product.
    ///
    /// # Errors
    /// Returns `Error::Deserialization` if the product holds values the request cannot carry.
    pub fn from_product(product: &Product) -> Result<Self, Error> {
        copier::request_from(product)
    }
}

/// Filters for listing products.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListProductsQuery {
    #[serde(flatten)]
    pub paging: Paging,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription_code: Option<SubscriptionCode>,
}

impl ApiGatewayClient {
    /// Creates a new product.
    ///
    /// # Errors
    /// Returns `Error::OutputIsNil` if the response carries no product, or
    /// any error of [`ApiGatewayClient::request`].
    #[instrument(skip(self, request), fields(product_name = %request.product_name))]
    pub async fn create_product(&self, request: &CreateProductRequest) -> Result<Product, Error> {
        info!("Creating product");
        let product: Product = self
            .fetch_entity(
                Method::POST,
                &["products"],
                None::<&()>,
                Some(request),
                "product",
            )
            .await?;

        info!(product_id = ?product.product_id, "Created product");
        Ok(product)
    }

    /// Fetches a product by ID.
    ///
    /// # Errors
    /// Returns `Error::Api` with status 404 if the product does not exist.
    #[instrument(skip(self))]
    pub async fn get_product(&self, product_id: &str) -> Result<Product, Error> {
        debug!("Getting product");
        self.fetch_entity(
            Method::GET,
            &["products", product_id],
            None::<&()>,
            None::<&()>,
            "product",
        )
        .await
    }

    /// Lists products, one page at a time.
    #[instrument(skip(self, query))]
    pub async fn list_products(&self, query: &ListProductsQuery) -> Result<Page<Product>, Error> {
        let page: Page<Product> = self
            .fetch_entity(
                Method::GET,
                &["products"],
                Some(query),
                None::<&()>,
                "product_page",
            )
            .await?;

        debug!(
            count = page.content.len(),
            total = ?page.total,
            "Retrieved products"
        );
        Ok(page)
    }

    /// Updates a product. Only the fields set in `request` change.
    #[instrument(skip(self, request))]
    pub async fn update_product(
        &self,
        product_id: &str,
        request: &UpdateProductRequest,
    ) -> Result<Product, Error> {
        info!("Updating product");
        self.fetch_entity(
            Method::PATCH,
            &["products", product_id],
            None::<&()>,
            Some(request),
            "product",
        )
        .await
    }

    /// Deletes a product.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, product_id: &str) -> Result<(), Error> {
        info!("Deleting product");
        self.send_only(
            Method::DELETE,
            &["products", product_id],
            None::<&()>,
            None::<&()>,
        )
        .await
    }
}
