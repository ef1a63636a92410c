use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use chrono::DateTime;
use serde::Deserialize;
use tracing::debug;

use crate::commands::InboundMessage;
use crate::error::MonitorError;

const API_BASE: &str = "https://api.telegram.org";
const CHANNEL_TIMEOUT: Duration = Duration::from_secs(10);

/// What the run controller needs from the messaging side: one outbound
/// send, and one read of the recent inbound window.
#[async_trait]
pub trait NotifyChannel {
    async fn send(&self, chat_id: &str, text: &str) -> Result<(), MonitorError>;
    async fn poll_recent(&self, chat_id: &str) -> Result<Vec<InboundMessage>, MonitorError>;
}

/// Telegram Bot API client covering `sendMessage` and `getUpdates`.
pub struct TelegramChannel {
    client: reqwest::Client,
    token: String,
}

impl TelegramChannel {
    pub fn new(token: String) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(CHANNEL_TIMEOUT).build()?;
        Ok(TelegramChannel { client, token })
    }

    fn endpoint(&self, method: &str) -> String {
        format!("{}/bot{}/{}", API_BASE, self.token, method)
    }
}

/// Bot API URLs embed the token and reqwest error strings include the
/// request URL. Strip the URL before the error can reach a log line.
fn channel_error(e: reqwest::Error) -> MonitorError {
    MonitorError::Notification(e.without_url().to_string())
}

#[async_trait]
impl NotifyChannel for TelegramChannel {
    async fn send(&self, chat_id: &str, text: &str) -> Result<(), MonitorError> {
        let params = [
            ("chat_id", chat_id),
            ("text", text),
            ("parse_mode", "Markdown"),
        ];
        let response = self
            .client
            .post(self.endpoint("sendMessage"))
            .form(&params)
            .send()
            .await
            .map_err(channel_error)?;
        if !response.status().is_success() {
            return Err(MonitorError::Notification(format!(
                "sendMessage returned {}",
                response.status()
            )));
        }
        Ok(())
    }

    async fn poll_recent(&self, chat_id: &str) -> Result<Vec<InboundMessage>, MonitorError> {
        let response = self
            .client
            .get(self.endpoint("getUpdates"))
            .send()
            .await
            .map_err(channel_error)?
            .error_for_status()
            .map_err(channel_error)?;
        let envelope: UpdatesEnvelope = response.json().await.map_err(channel_error)?;
        if !envelope.ok {
            return Err(MonitorError::Notification(
                "getUpdates returned ok=false".to_string(),
            ));
        }
        let messages = updates_to_messages(&envelope, chat_id);
        debug!(count = messages.len(), "inbound messages decoded");
        Ok(messages)
    }
}

// Wire shapes for the Bot API responses. Only the fields the monitor reads.

#[derive(Debug, Deserialize)]
struct UpdatesEnvelope {
    ok: bool,
    #[serde(default)]
    result: Vec<Update>,
}

#[derive(Debug, Deserialize)]
struct Update {
    update_id: i64,
    message: Option<Message>,
}

#[derive(Debug, Deserialize)]
struct Message {
    #[serde(default)]
    text: Option<String>,
    date: i64,
    chat: Chat,
}

#[derive(Debug, Deserialize)]
struct Chat {
    id: i64,
}

/// Decode a `getUpdates` envelope into the inbound window for one chat,
/// keeping the ascending order Telegram delivers. Updates without a text
/// message, and messages from other chats, are dropped.
fn updates_to_messages(envelope: &UpdatesEnvelope, chat_id: &str) -> Vec<InboundMessage> {
    envelope
        .result
        .iter()
        .filter_map(|update| {
            let message = update.message.as_ref()?;
            if message.chat.id.to_string() != chat_id {
                return None;
            }
            let text = message.text.clone()?;
            let received_at = DateTime::from_timestamp(message.date, 0)?;
            Some(InboundMessage {
                id: update.update_id,
                text,
                received_at,
            })
        })
        .collect()
}
