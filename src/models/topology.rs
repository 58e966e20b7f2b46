use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Open string-keyed argument bag (`x-dead-letter-exchange`, `x-max-length`, ...).
pub type Arguments = HashMap<String, serde_json::Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum QueueKind {
    #[default]
    Classic,
    Quorum,
    Stream,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum QueueState {
    #[default]
    Running,
    Idle,
    Down,
    Starting,
    Stopping,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExchangeKind {
    #[default]
    Direct,
    Fanout,
    Topic,
    Headers,
    /// Extension exchange types (`x-delayed-message`, plugins, ...).
    #[serde(untagged)]
    Custom(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Queue {
    pub id: String,
    pub name: String,
    pub vhost: String,
    #[serde(rename = "type")]
    pub kind: QueueKind,
    pub state: QueueState,
    pub durable: bool,
    pub exclusive: bool,
    pub auto_delete: bool,
    #[serde(default)]
    pub arguments: Arguments,
    pub messages_ready: u64,
    pub messages_unacked: u64,
    /// Always `messages_ready + messages_unacked`; derived, never written directly.
    pub messages_total: u64,
    pub consumers: u32,
    pub memory_bytes: u64,
    pub publish_rate: f64,
    pub deliver_rate: f64,
    pub ack_rate: f64,
    pub redeliver_rate: f64,
    pub created_at: DateTime<Utc>,
    pub health_score: u8,
}

impl Queue {
    pub fn new(id: impl Into<String>, name: impl Into<String>, vhost: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            vhost: vhost.into(),
            kind: QueueKind::default(),
            state: QueueState::default(),
            durable: true,
            exclusive: false,
            auto_delete: false,
            arguments: Arguments::default(),
            messages_ready: 0,
            messages_unacked: 0,
            messages_total: 0,
            consumers: 0,
            memory_bytes: 0,
            publish_rate: 0.0,
            deliver_rate: 0.0,
            ack_rate: 0.0,
            redeliver_rate: 0.0,
            created_at: Utc::now(),
            health_score: 100,
        }
    }
}

/// Partial update for a queue. `messages_total` is intentionally absent; it is
/// re-derived from the ready/unacked pair after every merge.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueueUpdate {
    pub state: Option<QueueState>,
    pub messages_ready: Option<u64>,
    pub messages_unacked: Option<u64>,
    pub consumers: Option<u32>,
    pub memory_bytes: Option<u64>,
    pub publish_rate: Option<f64>,
    pub deliver_rate: Option<f64>,
    pub ack_rate: Option<f64>,
    pub redeliver_rate: Option<f64>,
    pub arguments: Option<Arguments>,
}

impl QueueUpdate {
    pub fn apply(self, queue: &mut Queue) {
        if let Some(state) = self.state {
            queue.state = state;
        }
        if let Some(ready) = self.messages_ready {
            queue.messages_ready = ready;
        }
        if let Some(unacked) = self.messages_unacked {
            queue.messages_unacked = unacked;
        }
        if let Some(consumers) = self.consumers {
            queue.consumers = consumers;
        }
        if let Some(memory) = self.memory_bytes {
            queue.memory_bytes = memory;
        }
        if let Some(rate) = self.publish_rate {
            queue.publish_rate = rate;
        }
        if let Some(rate) = self.deliver_rate {
            queue.deliver_rate = rate;
        }
        if let Some(rate) = self.ack_rate {
            queue.ack_rate = rate;
        }
        if let Some(rate) = self.redeliver_rate {
            queue.redeliver_rate = rate;
        }
        if let Some(arguments) = self.arguments {
            queue.arguments = arguments;
        }
        queue.messages_total = queue.messages_ready + queue.messages_unacked;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exchange {
    pub id: String,
    pub name: String,
    pub vhost: String,
    #[serde(rename = "type")]
    pub kind: ExchangeKind,
    pub durable: bool,
    pub internal: bool,
    #[serde(default)]
    pub arguments: Arguments,
    pub publish_in_rate: f64,
    pub publish_out_rate: f64,
    pub created_at: DateTime<Utc>,
}

impl Exchange {
    pub fn new(id: impl Into<String>, name: impl Into<String>, vhost: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            vhost: vhost.into(),
            kind: ExchangeKind::default(),
            durable: true,
            internal: false,
            arguments: Arguments::default(),
            publish_in_rate: 0.0,
            publish_out_rate: 0.0,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExchangeUpdate {
    pub publish_in_rate: Option<f64>,
    pub publish_out_rate: Option<f64>,
    pub arguments: Option<Arguments>,
}

impl ExchangeUpdate {
    pub fn apply(self, exchange: &mut Exchange) {
        if let Some(rate) = self.publish_in_rate {
            exchange.publish_in_rate = rate;
        }
        if let Some(rate) = self.publish_out_rate {
            exchange.publish_out_rate = rate;
        }
        if let Some(arguments) = self.arguments {
            exchange.arguments = arguments;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DestinationKind {
    #[default]
    Queue,
    Exchange,
}

/// A routing edge from an exchange to a queue or another exchange. Bindings
/// have no lifecycle of their own; deleting either endpoint removes them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Binding {
    pub id: String,
    pub vhost: String,
    /// Source exchange id.
    pub source: String,
    /// Destination queue or exchange id, per `destination_kind`.
    pub destination: String,
    pub destination_kind: DestinationKind,
    pub routing_key: String,
    #[serde(default)]
    pub arguments: Arguments,
}
