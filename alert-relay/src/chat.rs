//! Outbound delivery to a Google Chat incoming webhook.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::errors::RelayError;

// Threading only works reliably when the key rides on the URL; the webhook
// API does not honor thread info placed solely in the body.
const THREAD_KEY_PARAM: &str = "threadKey";
const REPLY_OPTION_PARAM: &str = "messageReplyOption";
const REPLY_OPTION_VALUE: &str = "REPLY_MESSAGE_FALLBACK_TO_NEW_THREAD";

/// The message body posted to the chat webhook.
#[derive(Serialize, Debug, Clone)]
pub struct ChatMessage {
    pub text: String,
}

/// What the chat service told us about the delivered message.
#[derive(Debug, Clone, Default)]
pub struct DeliveryReceipt {
    /// Resource name of the thread the message landed in, when reported.
    pub thread_name: Option<String>,
}

/// Delivery seam between the webhook handler and the chat service.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn deliver(
        &self,
        message: &ChatMessage,
        thread_key: &str,
    ) -> Result<DeliveryReceipt, RelayError>;
}

/// Posts messages to a Google Chat incoming-webhook URL.
pub struct GoogleChatClient {
    client: reqwest::Client,
    webhook_url: Url,
}

impl GoogleChatClient {
    pub fn new(webhook_url: Url, timeout: Duration) -> Result<Self, RelayError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RelayError::HttpClientError(e.to_string()))?;

        Ok(GoogleChatClient {
            client,
            webhook_url,
        })
    }

    /// Webhook URL with the thread key and reply-fallback option appended,
    /// preserving the key/token parameters already on the configured URL.
    fn delivery_url(&self, thread_key: &str) -> Url {
        let mut url = self.webhook_url.clone();
        url.query_pairs_mut()
            .append_pair(THREAD_KEY_PARAM, thread_key)
            .append_pair(REPLY_OPTION_PARAM, REPLY_OPTION_VALUE);
        url
    }
}

#[async_trait]
impl ChatTransport for GoogleChatClient {
    async fn deliver(
        &self,
        message: &ChatMessage,
        thread_key: &str,
    ) -> Result<DeliveryReceipt, RelayError> {
        let url = self.delivery_url(thread_key);

        let response = self
            .client
            .post(url)
            .json(message)
            .send()
            .await
            .map_err(|e| RelayError::ChatRequestFailed(e.to_string()))?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            return Err(RelayError::ChatRejected {
                status: status.as_u16(),
                body,
            });
        }

        let thread_name = serde_json::from_str::<PostMessageResponse>(&body)
            .ok()
            .and_then(|r| r.thread)
            .and_then(|t| t.name);

        Ok(DeliveryReceipt { thread_name })
    }
}

#[derive(Deserialize)]
struct PostMessageResponse {
    thread: Option<MessageThread>,
}

#[derive(Deserialize)]
struct MessageThread {
    name: Option<String>,
}
