//! # LINE API Client
//!
//! Client for the LINE Messaging API push endpoint. Every call is bounded by
//! the configured timeout and authenticated with the channel access token.

use super::outgoing_schemas::{PushMessageRequest, PushMessageResponse};
use crate::{config, services};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;

/// LINE API client for pushing messages
pub struct LineClient {
    /// HTTP client for making API requests
    client: reqwest::Client,
    /// LINE push message endpoint
    endpoint: String,
    /// Channel access token
    access_token: String,
}

impl LineClient {
    /// Creates a new LINE client
    ///
    /// # Arguments
    /// * `endpoint` - Push message endpoint
    /// * `access_token` - Channel access token sent as bearer token
    /// * `timeout` - Upper bound for each request
    pub fn new(endpoint: String, access_token: String, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build LINE HTTP client")?;

        Ok(Self {
            client,
            endpoint,
            access_token,
        })
    }

    /// Creates a LINE client from [`config::APP_CONFIG`]
    pub fn from_config() -> Result<Self> {
        let app_config = config::APP_CONFIG
            .get()
            .context("failed to get app config")?;

        Self::new(
            app_config.line_push_endpoint.clone(),
            app_config.line_channel_access_token.clone(),
            app_config.line_push_timeout(),
        )
    }

    /// Pushes a text message
    ///
    /// # Arguments
    /// * `to` - Recipient's LINE user id or group id
    /// * `text` - Message text
    ///
    /// # Returns
    /// * `Result<PushMessageResponse>` - Response from LINE API
    pub async fn push_text_message(&self, to: String, text: String) -> Result<PushMessageResponse> {
        let message = PushMessageRequest::new_text(to, text);
        self.push_message(&message).await
    }

    /// Internal method to send any push request to LINE API
    async fn push_message(&self, message: &PushMessageRequest) -> Result<PushMessageResponse> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.access_token)
            .json(message)
            .send()
            .await
            .context("Failed to send request to LINE API")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read response body".to_string());

            anyhow::bail!("LINE API returned error status {}: {}", status, body);
        }

        let body = response
            .bytes()
            .await
            .context("Failed to read LINE API response")?;
        if body.is_empty() {
            return Ok(PushMessageResponse::default());
        }

        serde_json::from_slice(&body).context("Failed to parse LINE API response")
    }
}

#[async_trait]
impl services::Notifier for LineClient {
    async fn send(&self, to: &str, text: &str) -> Result<PushMessageResponse> {
        self.push_text_message(to.to_string(), text.to_string())
            .await
    }
}
