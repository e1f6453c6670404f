use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::chat::{ChatMessage, ChatTransport, DeliveryReceipt};
use crate::errors::RelayError;

/// The alert payload used across handler tests.
pub fn sample_alert_payload() -> serde_json::Value {
    serde_json::json!({
        "event_name": "new_item",
        "data": {
            "item": {
                "level": 50,
                "title": "DB timeout",
                "project_id": 42,
                "counter": 7,
                "environment": "prod",
                "url": "https://rollbar.com/acme.example.com/order_fulfillment/items/7"
            }
        }
    })
}

/// Chat transport stub that records every delivery attempt.
pub struct RecordingTransport {
    /// Recorded `(message text, thread key)` pairs, in delivery order.
    pub sent: Mutex<Vec<(String, String)>>,
    thread_name: Option<String>,
    reject_status: Option<u16>,
}

impl RecordingTransport {
    pub fn succeeding(thread_name: Option<&str>) -> Arc<Self> {
        Arc::new(RecordingTransport {
            sent: Mutex::new(Vec::new()),
            thread_name: thread_name.map(str::to_owned),
            reject_status: None,
        })
    }

    pub fn failing(status: u16) -> Arc<Self> {
        Arc::new(RecordingTransport {
            sent: Mutex::new(Vec::new()),
            thread_name: None,
            reject_status: Some(status),
        })
    }
}

#[async_trait]
impl ChatTransport for RecordingTransport {
    async fn deliver(
        &self,
        message: &ChatMessage,
        thread_key: &str,
    ) -> Result<DeliveryReceipt, RelayError> {
        self.sent
            .lock()
            .unwrap()
            .push((message.text.clone(), thread_key.to_owned()));

        match self.reject_status {
            Some(status) => Err(RelayError::ChatRejected {
                status,
                body: "stub rejection".into(),
            }),
            None => Ok(DeliveryReceipt {
                thread_name: self.thread_name.clone(),
            }),
        }
    }
}
