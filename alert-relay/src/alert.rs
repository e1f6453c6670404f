//! Inbound Rollbar webhook payload types.

use serde::Deserialize;

/// Top-level webhook notification body.
///
/// Rollbar sends `event_name: "test"` with no item when verifying a webhook
/// endpoint; real alerts carry the item under `data.item`.
#[derive(Deserialize, Debug)]
pub struct WebhookEvent {
    pub event_name: Option<String>,
    pub data: Option<EventData>,
}

impl WebhookEvent {
    pub fn is_test_ping(&self) -> bool {
        self.event_name.as_deref() == Some("test")
    }

    pub fn item(&self) -> Option<&AlertItem> {
        self.data.as_ref()?.item.as_ref()
    }
}

#[derive(Deserialize, Debug)]
pub struct EventData {
    pub item: Option<AlertItem>,
}

/// One error-occurrence record emitted by Rollbar.
#[derive(Deserialize, Debug, Default)]
pub struct AlertItem {
    #[serde(default)]
    pub level: i64,
    #[serde(default)]
    pub title: String,
    pub project_id: Option<i64>,
    pub counter: Option<i64>,
    pub environment: Option<String>,
    pub url: Option<String>,
    pub project_name: Option<String>,
    pub total_occurrences: Option<u64>,
    pub occurrences: Option<u64>,
    pub first_occurrence_timestamp: Option<i64>,
    pub last_occurrence_timestamp: Option<i64>,
    pub last_occurrence: Option<Occurrence>,
}

impl AlertItem {
    /// Total occurrence count; items without either field count as one.
    pub fn occurrence_count(&self) -> u64 {
        self.total_occurrences.or(self.occurrences).unwrap_or(1)
    }

    /// First non-empty stack line, used as the error location in the message.
    /// Prefers the enriched `custom.stack` over the raw occurrence stack.
    pub fn location(&self) -> Option<&str> {
        let occurrence = self.last_occurrence.as_ref()?;
        let stack = occurrence
            .custom
            .as_ref()
            .and_then(|c| c.stack.as_deref())
            .or(occurrence.stack.as_deref())?;

        stack.lines().map(str::trim).find(|line| !line.is_empty())
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct Occurrence {
    pub custom: Option<OccurrenceCustom>,
    pub stack: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct OccurrenceCustom {
    pub stack: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_test_ping_detection() {
        let event: WebhookEvent = serde_json::from_str(r#"{"event_name": "test"}"#).unwrap();
        assert!(event.is_test_ping());
        assert!(event.item().is_none());

        let event: WebhookEvent =
            serde_json::from_str(r#"{"event_name": "new_item", "data": {"item": {}}}"#).unwrap();
        assert!(!event.is_test_ping());
        assert!(event.item().is_some());
    }

    #[test]
    fn test_missing_item() {
        let event: WebhookEvent = serde_json::from_str(r#"{"event_name": "new_item"}"#).unwrap();
        assert!(event.item().is_none());

        let event: WebhookEvent = serde_json::from_str(r#"{"data": {}}"#).unwrap();
        assert!(event.item().is_none());
    }

    #[test]
    fn test_occurrence_count_preference() {
        let item = AlertItem {
            total_occurrences: Some(12),
            occurrences: Some(3),
            ..Default::default()
        };
        assert_eq!(item.occurrence_count(), 12);

        let item = AlertItem {
            occurrences: Some(3),
            ..Default::default()
        };
        assert_eq!(item.occurrence_count(), 3);

        assert_eq!(AlertItem::default().occurrence_count(), 1);
    }

    #[test]
    fn test_location_prefers_custom_stack() {
        let item: AlertItem = serde_json::from_str(
            r#"{
                "last_occurrence": {
                    "custom": {"stack": "  at handler (app.js:10)\n  at run (app.js:2)"},
                    "stack": "raw frame"
                }
            }"#,
        )
        .unwrap();
        assert_eq!(item.location(), Some("at handler (app.js:10)"));
    }

    #[test]
    fn test_location_falls_back_to_raw_stack() {
        let item: AlertItem = serde_json::from_str(
            r#"{"last_occurrence": {"stack": "\n  at main (srv.py:3)\n"}}"#,
        )
        .unwrap();
        assert_eq!(item.location(), Some("at main (srv.py:3)"));

        assert_eq!(AlertItem::default().location(), None);
    }
}
