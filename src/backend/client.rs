//! Async HTTP client for the chat/commerce backend.

use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use super::error::BackendError;
use super::types::{CartAddRequest, CartRemoveRequest, CartSummary, ChatReply, ChatRequest};

/// Request timeout applied to every call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection timeout applied to every call.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Thin client over the backend's REST endpoints.
///
/// No retry policy and no authentication: those are owned by the backend
/// and the host, respectively. Hosts that want retries can consult
/// [`BackendError::is_retryable`].
pub struct BackendClient {
    client: reqwest::Client,
    base: Url,
}

impl BackendClient {
    /// Create a client against `base_url`, e.g. `http://localhost:8000/`.
    ///
    /// # Errors
    /// Returns an error when `base_url` is not a valid URL or the HTTP
    /// client cannot be created.
    pub fn new(base_url: &str) -> Result<Self, BackendError> {
        let base = Url::parse(base_url)?;
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()?;
        Ok(Self { client, base })
    }

    /// Send a chat message and return the agent's structured reply.
    ///
    /// # Errors
    /// Returns an error when the request fails or the backend answers with
    /// a non-success status.
    pub async fn send_chat(&self, request: &ChatRequest) -> Result<ChatReply, BackendError> {
        self.post_json("chat", request).await
    }

    /// Add a product to the server-side cart.
    ///
    /// The ack body is backend-defined, so it is returned as raw JSON.
    ///
    /// # Errors
    /// Returns an error when the request fails or the backend answers with
    /// a non-success status.
    pub async fn add_cart_line(
        &self,
        request: &CartAddRequest,
    ) -> Result<serde_json::Value, BackendError> {
        self.post_json("cart/add", request).await
    }

    /// Remove a product from the server-side cart.
    ///
    /// # Errors
    /// Returns an error when the request fails or the backend answers with
    /// a non-success status.
    pub async fn remove_cart_line(
        &self,
        request: &CartRemoveRequest,
    ) -> Result<serde_json::Value, BackendError> {
        self.post_json("cart/remove", request).await
    }

    /// Fetch the server-side cart summary for a customer.
    ///
    /// # Errors
    /// Returns an error when the request fails or the backend answers with
    /// a non-success status.
    pub async fn fetch_cart(&self, customer_id: &str) -> Result<CartSummary, BackendError> {
        let url = self.base.join(&format!("cart/{customer_id}"))?;
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Status(status.as_u16()));
        }
        Ok(response.json().await?)
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, BackendError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let url = self.base.join(path)?;
        tracing::debug!("POST {url}");
        let response = self.client.post(url).json(body).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Status(status.as_u16()));
        }
        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_rejects_invalid_base_url() {
        let client = BackendClient::new("not a url");
        assert!(matches!(client, Err(BackendError::InvalidUrl(_))));
    }

    #[test]
    fn test_client_accepts_localhost_base() {
        let client = BackendClient::new("http://localhost:8000/");
        assert!(client.is_ok());
    }
}
