use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono_tz::Tz;
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::alert::WebhookEvent;
use crate::chat::{ChatMessage, ChatTransport, GoogleChatClient};
use crate::config::RelayConfig;
use crate::errors::RelayError;
use crate::message::{display_project_name, render_text};
use crate::metrics_defs::{
    ALERTS_RELAYED, DELIVERY_DURATION, PAYLOADS_REJECTED, RELAY_FAILURES, WEBHOOKS_RECEIVED,
};
use crate::severity::Severity;
use crate::threading::derive_thread_key;
use crate::{counter, histogram};

const GREETING: &str = "herald: relaying Rollbar alerts to Google Chat\n";

struct StateInner {
    chat: Option<Arc<dyn ChatTransport>>,
    static_thread_key: Option<String>,
    display_timezone: Tz,
}

/// Shared handler state, built once at startup.
#[derive(Clone)]
pub struct RelayState {
    inner: Arc<StateInner>,
}

impl RelayState {
    pub fn new(
        chat: Option<Arc<dyn ChatTransport>>,
        static_thread_key: Option<String>,
        display_timezone: Tz,
    ) -> Self {
        RelayState {
            inner: Arc::new(StateInner {
                chat,
                static_thread_key,
                display_timezone,
            }),
        }
    }

    pub fn from_config(config: &RelayConfig) -> Result<Self, RelayError> {
        let chat = match &config.chat.webhook_url {
            Some(url) => {
                let client = GoogleChatClient::new(
                    url.clone(),
                    Duration::from_secs(config.chat.timeout_secs),
                )?;
                Some(Arc::new(client) as Arc<dyn ChatTransport>)
            }
            None => {
                tracing::warn!("chat webhook URL not configured; alerts will be rejected");
                None
            }
        };

        Ok(RelayState::new(
            chat,
            config.chat.static_thread_key.clone(),
            config.chat.display_timezone,
        ))
    }
}

/// Builds the relay's router: the webhook endpoint plus a liveness probe.
pub fn app(state: RelayState) -> Router {
    Router::new()
        .route("/", get(liveness))
        .route("/api/webhook", post(receive_webhook))
        .with_state(state)
}

async fn liveness() -> &'static str {
    GREETING
}

#[derive(Serialize, Debug)]
pub struct RelayResponse {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    thread_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    chat_thread_name: Option<String>,
}

impl RelayResponse {
    fn ack() -> Self {
        RelayResponse {
            message: "Test webhook received successfully!".into(),
            thread_key: None,
            chat_thread_name: None,
        }
    }

    fn delivered(thread_key: String, chat_thread_name: Option<String>) -> Self {
        RelayResponse {
            message: "Notification sent to Google Chat thread".into(),
            thread_key: Some(thread_key),
            chat_thread_name,
        }
    }
}

impl IntoResponse for RelayResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

async fn receive_webhook(
    State(state): State<RelayState>,
    Json(event): Json<WebhookEvent>,
) -> Result<RelayResponse, RelayError> {
    counter!(WEBHOOKS_RECEIVED).increment(1);
    tracing::info!(
        event_name = event.event_name.as_deref().unwrap_or("-"),
        "received webhook"
    );

    // Rollbar's webhook-verification ping; acknowledge without delivery
    if event.is_test_ping() {
        tracing::info!("test webhook acknowledged");
        return Ok(RelayResponse::ack());
    }

    let Some(item) = event.item() else {
        counter!(PAYLOADS_REJECTED).increment(1);
        tracing::warn!("rejected payload without data.item");
        return Err(RelayError::MissingItem);
    };

    let severity = Severity::from_level(item.level);
    let thread_key = derive_thread_key(state.inner.static_thread_key.as_deref(), item);
    tracing::info!(
        project = %display_project_name(item),
        environment = item.environment.as_deref().unwrap_or("unknown"),
        level = item.level,
        severity = severity.label(),
        thread_key = %thread_key,
        occurrences = item.occurrence_count(),
        "parsed alert"
    );

    let Some(chat) = state.inner.chat.as_ref() else {
        tracing::error!("dropping alert: chat webhook URL not configured");
        return Err(RelayError::WebhookUrlNotConfigured);
    };

    let message = ChatMessage {
        text: render_text(item, severity, state.inner.display_timezone),
    };

    let started = Instant::now();
    let result = chat.deliver(&message, &thread_key).await;
    histogram!(DELIVERY_DURATION).record(started.elapsed().as_secs_f64());

    match result {
        Ok(receipt) => {
            counter!(ALERTS_RELAYED).increment(1);
            tracing::info!(
                thread_key = %thread_key,
                chat_thread = receipt.thread_name.as_deref().unwrap_or("-"),
                "delivered alert"
            );
            Ok(RelayResponse::delivered(thread_key, receipt.thread_name))
        }
        Err(err) => {
            counter!(RELAY_FAILURES).increment(1);
            tracing::error!(thread_key = %thread_key, error = %err, "chat delivery failed");
            Err(err)
        }
    }
}
