use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument, warn};

use scheduler::notify::{DeliveryOutcome, Notifier, NotifyError};

use super::errors::LineError;
use super::types::PushRequest;

pub const DEFAULT_PUSH_ENDPOINT: &str = "https://api.line.me/v2/bot/message/push";

/// LINE Messaging API push client.
#[derive(Clone)]
pub struct LineClient {
    http: Client,
    endpoint: String,
    token: SecretString,
}

impl LineClient {
    pub fn new(endpoint: impl Into<String>, token: SecretString) -> Result<Self, LineError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(10))
            .pool_idle_timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
            token,
        })
    }

    /// Sends one text message. Any HTTP status is returned as-is.
    #[instrument(skip(self, text), level = "debug")]
    pub async fn push_text(&self, to: &str, text: &str) -> Result<u16, LineError> {
        if to.is_empty() {
            return Err(LineError::InvalidRequest("empty recipient".into()));
        }

        let resp = self
            .http
            .post(&self.endpoint)
            .bearer_auth(self.token.expose_secret())
            .json(&PushRequest::text(to, text))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            // Error bodies are small JSON documents; keep them for diagnosis.
            let body = resp.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), %body, "line push rejected");
        } else {
            debug!(status = status.as_u16(), "line push accepted");
        }

        Ok(status.as_u16())
    }
}

#[async_trait]
impl Notifier for LineClient {
    async fn push(&self, recipient: &str, text: &str) -> Result<DeliveryOutcome, NotifyError> {
        let status = self.push_text(recipient, text).await?;
        Ok(DeliveryOutcome::new(status))
    }
}
