use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::topology::Queue;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Display, Default,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Info,
    #[default]
    Warning,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AlertStatus {
    Active,
    Acknowledged,
    Resolved,
}

/// Comparison operator of an alert rule, in its wire form (`>`, `<`, `=`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
pub enum CompareOp {
    #[serde(rename = ">")]
    #[strum(serialize = ">")]
    Gt,
    #[serde(rename = "<")]
    #[strum(serialize = "<")]
    Lt,
    #[serde(rename = "=")]
    #[strum(serialize = "=")]
    Eq,
    #[serde(rename = ">=")]
    #[strum(serialize = ">=")]
    Gte,
    #[serde(rename = "<=")]
    #[strum(serialize = "<=")]
    Lte,
}

impl CompareOp {
    pub fn evaluate(self, value: f64, threshold: f64) -> bool {
        match self {
            Self::Gt => value > threshold,
            Self::Lt => value < threshold,
            Self::Eq => (value - threshold).abs() < f64::EPSILON,
            Self::Gte => value >= threshold,
            Self::Lte => value <= threshold,
        }
    }
}

/// Queue metric an alert rule watches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AlertMetric {
    MessagesReady,
    MessagesUnacked,
    MessagesTotal,
    Consumers,
    MemoryBytes,
    PublishRate,
    DeliverRate,
}

impl AlertMetric {
    pub fn value_of(self, queue: &Queue) -> f64 {
        match self {
            Self::MessagesReady => queue.messages_ready as f64,
            Self::MessagesUnacked => queue.messages_unacked as f64,
            Self::MessagesTotal => queue.messages_total as f64,
            Self::Consumers => queue.consumers as f64,
            Self::MemoryBytes => queue.memory_bytes as f64,
            Self::PublishRate => queue.publish_rate,
            Self::DeliverRate => queue.deliver_rate,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertRule {
    pub id: String,
    pub name: String,
    pub enabled: bool,
    pub metric: AlertMetric,
    pub operator: CompareOp,
    pub threshold: f64,
    /// How long the condition must hold before firing. The sustained-duration
    /// timer lives in the telemetry feed; the rule only carries the setting.
    pub duration_secs: u64,
    pub severity: Severity,
    #[serde(default)]
    pub notification_channels: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl AlertRule {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        metric: AlertMetric,
        operator: CompareOp,
        threshold: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            enabled: true,
            metric,
            operator,
            threshold,
            duration_secs: 0,
            severity: Severity::default(),
            notification_channels: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn is_satisfied(&self, value: f64) -> bool {
        self.operator.evaluate(value, self.threshold)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlertRuleUpdate {
    pub name: Option<String>,
    pub enabled: Option<bool>,
    pub metric: Option<AlertMetric>,
    pub operator: Option<CompareOp>,
    pub threshold: Option<f64>,
    pub duration_secs: Option<u64>,
    pub severity: Option<Severity>,
    pub notification_channels: Option<Vec<String>>,
}

impl AlertRuleUpdate {
    pub fn apply(self, rule: &mut AlertRule) {
        if let Some(name) = self.name {
            rule.name = name;
        }
        if let Some(enabled) = self.enabled {
            rule.enabled = enabled;
        }
        if let Some(metric) = self.metric {
            rule.metric = metric;
        }
        if let Some(operator) = self.operator {
            rule.operator = operator;
        }
        if let Some(threshold) = self.threshold {
            rule.threshold = threshold;
        }
        if let Some(duration) = self.duration_secs {
            rule.duration_secs = duration;
        }
        if let Some(severity) = self.severity {
            rule.severity = severity;
        }
        if let Some(channels) = self.notification_channels {
            rule.notification_channels = channels;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, Default)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TargetKind {
    #[default]
    Queue,
    Exchange,
    Connection,
}

/// A fired alert. Rule name and severity are denormalized at trigger time so
/// deleting the rule keeps historical alerts intact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub id: String,
    pub rule_id: String,
    pub rule_name: String,
    pub severity: Severity,
    pub status: AlertStatus,
    pub message: String,
    pub target_kind: TargetKind,
    pub target: String,
    /// Metric value observed at trigger time.
    pub value: f64,
    pub threshold: f64,
    pub triggered_at: DateTime<Utc>,
    pub acknowledged_by: Option<String>,
    pub acknowledged_at: Option<DateTime<Utc>>,
    pub resolved_at: Option<DateTime<Utc>>,
}
