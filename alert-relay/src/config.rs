use chrono_tz::Tz;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

/// Environment variable holding the Google Chat incoming-webhook URL.
pub const ENV_GCHAT_WEBHOOK_URL: &str = "GCHAT_WEBHOOK_URL";

/// Environment variable that pins every alert to one constant thread.
pub const ENV_GCHAT_THREAD_KEY: &str = "GCHAT_THREAD_KEY";

const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Port cannot be 0")]
    InvalidPort,

    #[error("Invalid chat webhook URL: {0}")]
    InvalidWebhookUrl(String),
}

/// Relay configuration
#[derive(Clone, Debug, Deserialize, Default, PartialEq)]
pub struct RelayConfig {
    /// Listener for incoming webhook requests
    #[serde(default)]
    pub listener: Listener,
    /// Outbound chat delivery settings
    #[serde(default)]
    pub chat: ChatConfig,
}

impl RelayConfig {
    /// Validates the relay configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.listener.validate()
    }
}

/// Network listener configuration
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Listener {
    /// Host address to bind to (e.g., "0.0.0.0" or "127.0.0.1")
    pub host: String,
    /// Port number to listen on
    pub port: u16,
}

impl Listener {
    /// Validates the listener configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        Ok(())
    }
}

impl Default for Listener {
    fn default() -> Self {
        Listener {
            host: "127.0.0.1".into(),
            port: 3000,
        }
    }
}

/// Outbound Google Chat settings
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ChatConfig {
    /// Incoming-webhook URL of the target chat space
    ///
    /// Note: Uses the `url::Url` type for compile-time URL validation.
    /// Invalid URLs will be rejected during config deserialization.
    /// May be left unset here and supplied via `GCHAT_WEBHOOK_URL`.
    pub webhook_url: Option<Url>,
    /// Constant thread key overriding per-error thread derivation
    pub static_thread_key: Option<String>,
    /// Timeout for the outbound delivery call
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Timezone used to render first/last-seen timestamps
    #[serde(default = "default_display_timezone")]
    pub display_timezone: Tz,
}

impl ChatConfig {
    /// Applies `GCHAT_WEBHOOK_URL` / `GCHAT_THREAD_KEY` values on top of the
    /// file-supplied settings. Values win over the file when present.
    pub fn apply_overrides(
        &mut self,
        webhook_url: Option<String>,
        static_thread_key: Option<String>,
    ) -> Result<(), ValidationError> {
        if let Some(raw) = webhook_url {
            let url =
                Url::parse(&raw).map_err(|_| ValidationError::InvalidWebhookUrl(raw.clone()))?;
            self.webhook_url = Some(url);
        }
        if let Some(key) = static_thread_key {
            self.static_thread_key = Some(key);
        }
        Ok(())
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        ChatConfig {
            webhook_url: None,
            static_thread_key: None,
            timeout_secs: default_timeout_secs(),
            display_timezone: default_display_timezone(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_display_timezone() -> Tz {
    Tz::Asia__Kolkata
}
