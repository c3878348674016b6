use std::sync::Arc;

use tracing::{error, info, instrument, warn};

use crate::discord::{DiscordTransport, Message, NotificationTransport};
use crate::error::MonitResult;
use crate::thresholds::BreachSet;

const ALERT_HEADER: &str = "Alert! The following thresholds have been exceeded:";

/// What happened to an alert; only ever logged, never fails a check
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    Delivered,
    NoBreaches,
    NotConfigured,
    Failed(String),
}

#[derive(Clone)]
pub struct AlertDispatcher {
    transport: Arc<dyn NotificationTransport>,
}

impl AlertDispatcher {
    pub fn new(transport: Arc<dyn NotificationTransport>) -> Self {
        Self { transport }
    }

    /// Dispatcher delivering through a Discord webhook
    pub fn discord() -> MonitResult<Self> {
        Ok(Self::new(Arc::new(DiscordTransport::new()?)))
    }

    /// One line per breached metric, `"<metric>: <value>%"`.
    pub fn format_message(breaches: &BreachSet) -> String {
        let mut message = format!("{ALERT_HEADER}\n");
        for (metric, value) in breaches {
            message.push_str(&format!("{metric}: {value}%\n"));
        }
        message
    }

    /// Send a single best-effort alert for `breaches`.
    ///
    /// Without a usable webhook URL nothing is sent. Delivery is attempted
    /// exactly once.
    #[instrument(skip(self, breaches), fields(breaches = breaches.len()))]
    pub async fn dispatch(&self, breaches: &BreachSet, webhook_url: Option<&str>) -> DispatchOutcome {
        if breaches.is_empty() {
            return DispatchOutcome::NoBreaches;
        }

        let Some(url) = webhook_url else {
            warn!("Discord webhook URL not configured. Unable to send alerts.");
            return DispatchOutcome::NotConfigured;
        };

        let message = Message::new(Self::format_message(breaches));
        match self.transport.deliver(url, &message).await {
            Ok(()) => {
                info!("Alert sent to Discord.");
                DispatchOutcome::Delivered
            }
            Err(e) => {
                error!("alert delivery failed: {e}");
                DispatchOutcome::Failed(e.to_string())
            }
        }
    }
}
