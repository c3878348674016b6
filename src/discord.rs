use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{error, info, instrument};

use crate::error::{MonitError, MonitResult};

/// Timeout of a single webhook delivery attempt
const DELIVERY_TIMEOUT: Duration = Duration::from_secs(10);

/// Discord-compatible webhook payload: `{"content": "..."}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    pub content: String,
}

impl Message {
    pub fn new(content: impl ToString) -> Self {
        Self {
            content: content.to_string(),
        }
    }
}

/// Outbound sink for alert messages.
///
/// Implementations make a single attempt; the caller decides what a failure
/// means.
#[async_trait]
pub trait NotificationTransport: Send + Sync {
    async fn deliver(&self, url: &str, message: &Message) -> MonitResult<()>;
}

/// Posts messages as JSON to a Discord webhook (or any endpoint accepting the
/// same payload).
#[derive(Debug, Clone)]
pub struct DiscordTransport {
    client: Client,
}

impl DiscordTransport {
    pub fn new() -> MonitResult<Self> {
        Self::with_timeout(DELIVERY_TIMEOUT)
    }

    /// Transport whose every delivery attempt gives up after `timeout`
    pub fn with_timeout(timeout: Duration) -> MonitResult<Self> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            MonitError::NotificationFailure(format!("failed to build HTTP client: {e}"))
        })?;
        Ok(Self { client })
    }
}

#[async_trait]
impl NotificationTransport for DiscordTransport {
    #[instrument(skip(self, message))]
    async fn deliver(&self, url: &str, message: &Message) -> MonitResult<()> {
        let response = self
            .client
            .post(url)
            .json(message)
            .send()
            .await
            .map_err(|e| {
                error!("Failed to send Discord message: {}", e);
                MonitError::NotificationFailure(e.to_string())
            })?;

        let status = response.status();
        if status.is_success() {
            info!("Successfully sent Discord message");
            return Ok(());
        }

        error!("Discord message failed with status: {}", status);
        if let Ok(error_text) = response.text().await {
            error!("Discord API error response: {}", error_text);
        }
        Err(MonitError::NotificationFailure(format!(
            "webhook responded with {status}"
        )))
    }
}
