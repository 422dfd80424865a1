//! Typed client for the storefront HTTP API.
//!
//! Wire shapes mirror the server: the cart count endpoint returns
//! `{"count": N}`, the mutation endpoints ack with `{"success": bool}` and
//! an optional `message` on failure.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StorefrontError};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Deserialize)]
struct CountResponse {
    count: u64,
}

#[derive(Serialize)]
struct QuantityRequest {
    quantity: u32,
}

#[derive(Deserialize)]
struct AckResponse {
    success: bool,
    #[serde(default)]
    message: Option<String>,
}

/// Client for the storefront HTTP API.
#[derive(Clone)]
pub struct StorefrontClient {
    client: Client,
    base_url: String,
}

impl StorefrontClient {
    /// Create a client for the API at `base_url` (no trailing slash).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Fetch the number of items in the current cart.
    pub async fn cart_count(&self) -> Result<u64> {
        let response = self
            .client
            .get(format!("{}/api/cart/count", self.base_url))
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(StorefrontError::Api(format!(
                "cart count returned {}",
                response.status()
            )));
        }

        let result: CountResponse = response.json().await?;
        Ok(result.count)
    }

    /// Set the quantity of a cart item.
    pub async fn update_quantity(&self, item_id: u64, quantity: u32) -> Result<()> {
        let response = self
            .client
            .post(format!("{}/cart/update/{}", self.base_url, item_id))
            .json(&QuantityRequest { quantity })
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(StorefrontError::Api(format!(
                "cart update returned {}",
                response.status()
            )));
        }

        let ack: AckResponse = response.json().await?;
        if !ack.success {
            return Err(StorefrontError::Api(
                ack.message
                    .unwrap_or_else(|| "cart update rejected".to_string()),
            ));
        }
        Ok(())
    }

    /// Convert the current cart into orders.
    pub async fn checkout(&self) -> Result<()> {
        let response = self
            .client
            .post(format!("{}/checkout", self.base_url))
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(StorefrontError::Api(format!(
                "checkout returned {}",
                response.status()
            )));
        }

        let ack: AckResponse = response.json().await?;
        if !ack.success {
            return Err(StorefrontError::Api(
                ack.message.unwrap_or_else(|| "checkout failed".to_string()),
            ));
        }
        Ok(())
    }
}
