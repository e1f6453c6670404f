//! Common types for metrics definitions.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricType {
    Counter,
    Histogram,
}

#[derive(Debug, Clone, Copy)]
pub struct MetricDef {
    pub name: &'static str,
    pub metric_type: MetricType,
    pub description: &'static str,
}

#[macro_export]
macro_rules! counter {
    ($def:expr) => {
        metrics::counter!($def.name)
    };
}

#[macro_export]
macro_rules! histogram {
    ($def:expr) => {
        metrics::histogram!($def.name)
    };
}

pub const WEBHOOKS_RECEIVED: MetricDef = MetricDef {
    name: "webhooks.received",
    metric_type: MetricType::Counter,
    description: "Inbound webhook requests, including test pings",
};

pub const PAYLOADS_REJECTED: MetricDef = MetricDef {
    name: "webhooks.rejected",
    metric_type: MetricType::Counter,
    description: "Inbound payloads rejected for missing data.item",
};

pub const ALERTS_RELAYED: MetricDef = MetricDef {
    name: "alerts.relayed",
    metric_type: MetricType::Counter,
    description: "Alerts successfully delivered to the chat webhook",
};

pub const RELAY_FAILURES: MetricDef = MetricDef {
    name: "alerts.failed",
    metric_type: MetricType::Counter,
    description: "Alerts that could not be delivered to the chat webhook",
};

pub const DELIVERY_DURATION: MetricDef = MetricDef {
    name: "chat.delivery.duration",
    metric_type: MetricType::Histogram,
    description: "Outbound chat delivery duration in seconds",
};

pub const ALL_METRICS: &[MetricDef] = &[
    WEBHOOKS_RECEIVED,
    PAYLOADS_REJECTED,
    ALERTS_RELAYED,
    RELAY_FAILURES,
    DELIVERY_DURATION,
];
