use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::{Notifier, format_message};
use crate::config::Credentials;
use crate::error::NotificationError;
use crate::state::TransitionEvent;

const SEND_TIMEOUT: Duration = Duration::from_secs(5);

/// Sends transition messages to one Telegram chat through the Bot API.
pub struct TelegramNotifier {
    client: Client,
    endpoint: String,
    chat_id: String,
}

impl TelegramNotifier {
    /// Create a notifier for the chat in `credentials`.
    /// `api_base` is the Bot API root, normally `https://api.telegram.org`.
    pub fn new(api_base: &str, credentials: &Credentials) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(SEND_TIMEOUT).build()?;
        let endpoint = format!(
            "{}/bot{}/sendMessage",
            api_base.trim_end_matches('/'),
            credentials.token
        );

        Ok(TelegramNotifier {
            client,
            endpoint,
            chat_id: credentials.chat_id.clone(),
        })
    }

    pub async fn send_text(&self, text: &str) -> Result<(), NotificationError> {
        let payload = serde_json::json!({
            "chat_id": self.chat_id,
            "text": text,
        });

        let response = self
            .client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await
            // the url carries the bot token, keep it out of logs
            .map_err(|e| NotificationError::Request(e.without_url()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(NotificationError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        log::info!("Message sent to Telegram successfully.");
        Ok(())
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(&self, event: &TransitionEvent) -> Result<(), NotificationError> {
        self.send_text(&format_message(event)).await
    }
}
