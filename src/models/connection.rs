use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
    #[default]
    Running,
    Blocked,
    Blocking,
    Closing,
    Closed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connection {
    pub id: String,
    pub name: String,
    pub vhost: String,
    /// Authenticated user the client connected as.
    pub user: String,
    pub state: ConnectionState,
    pub protocol: String,
    pub peer_host: String,
    pub peer_port: u16,
    pub host: String,
    pub port: u16,
    pub tls: bool,
    pub channel_count: u32,
    pub recv_rate: f64,
    pub send_rate: f64,
    pub connected_at: DateTime<Utc>,
}

impl Connection {
    pub fn new(id: impl Into<String>, name: impl Into<String>, vhost: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            vhost: vhost.into(),
            user: "guest".to_owned(),
            state: ConnectionState::default(),
            protocol: "AMQP 0-9-1".to_owned(),
            peer_host: "127.0.0.1".to_owned(),
            peer_port: 0,
            host: "127.0.0.1".to_owned(),
            port: 5672,
            tls: false,
            channel_count: 0,
            recv_rate: 0.0,
            send_rate: 0.0,
            connected_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConnectionUpdate {
    pub state: Option<ConnectionState>,
    pub channel_count: Option<u32>,
    pub recv_rate: Option<f64>,
    pub send_rate: Option<f64>,
}

impl ConnectionUpdate {
    pub fn apply(self, connection: &mut Connection) {
        if let Some(state) = self.state {
            connection.state = state;
        }
        if let Some(count) = self.channel_count {
            connection.channel_count = count;
        }
        if let Some(rate) = self.recv_rate {
            connection.recv_rate = rate;
        }
        if let Some(rate) = self.send_rate {
            connection.send_rate = rate;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChannelState {
    #[default]
    Running,
    Flow,
    Idle,
    Closing,
}

/// Owned by exactly one connection; removed when the connection goes away.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Channel {
    pub id: String,
    pub connection_id: String,
    pub number: u32,
    pub state: ChannelState,
    pub prefetch_count: u32,
    pub messages_unacked: u64,
    pub publish_rate: f64,
    pub deliver_rate: f64,
}

impl Channel {
    pub fn new(id: impl Into<String>, connection_id: impl Into<String>, number: u32) -> Self {
        Self {
            id: id.into(),
            connection_id: connection_id.into(),
            number,
            state: ChannelState::default(),
            prefetch_count: 0,
            messages_unacked: 0,
            publish_rate: 0.0,
            deliver_rate: 0.0,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChannelUpdate {
    pub state: Option<ChannelState>,
    pub prefetch_count: Option<u32>,
    pub messages_unacked: Option<u64>,
    pub publish_rate: Option<f64>,
    pub deliver_rate: Option<f64>,
}

impl ChannelUpdate {
    pub fn apply(self, channel: &mut Channel) {
        if let Some(state) = self.state {
            channel.state = state;
        }
        if let Some(count) = self.prefetch_count {
            channel.prefetch_count = count;
        }
        if let Some(unacked) = self.messages_unacked {
            channel.messages_unacked = unacked;
        }
        if let Some(rate) = self.publish_rate {
            channel.publish_rate = rate;
        }
        if let Some(rate) = self.deliver_rate {
            channel.deliver_rate = rate;
        }
    }
}

/// A consumer subscription. The tag is the consumer's identity; channel and
/// connection ids are back-references, not ownership.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Consumer {
    pub tag: String,
    /// Target queue, by name (compatibility lookup, not an id reference).
    pub queue: String,
    pub channel_id: String,
    pub connection_id: String,
    pub ack_required: bool,
    pub exclusive: bool,
    pub prefetch_count: u32,
    pub delivered: u64,
    pub deliver_rate: f64,
    pub ack_rate: f64,
    pub avg_processing_ms: f64,
    /// Derived; see `health::is_slow_consumer`.
    pub slow: bool,
}

impl Consumer {
    pub fn new(
        tag: impl Into<String>,
        queue: impl Into<String>,
        channel_id: impl Into<String>,
        connection_id: impl Into<String>,
    ) -> Self {
        Self {
            tag: tag.into(),
            queue: queue.into(),
            channel_id: channel_id.into(),
            connection_id: connection_id.into(),
            ack_required: true,
            exclusive: false,
            prefetch_count: 0,
            delivered: 0,
            deliver_rate: 0.0,
            ack_rate: 0.0,
            avg_processing_ms: 0.0,
            slow: false,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConsumerUpdate {
    pub prefetch_count: Option<u32>,
    pub delivered: Option<u64>,
    pub deliver_rate: Option<f64>,
    pub ack_rate: Option<f64>,
    pub avg_processing_ms: Option<f64>,
}

impl ConsumerUpdate {
    pub fn apply(self, consumer: &mut Consumer) {
        if let Some(count) = self.prefetch_count {
            consumer.prefetch_count = count;
        }
        if let Some(delivered) = self.delivered {
            consumer.delivered = delivered;
        }
        if let Some(rate) = self.deliver_rate {
            consumer.deliver_rate = rate;
        }
        if let Some(rate) = self.ack_rate {
            consumer.ack_rate = rate;
        }
        if let Some(ms) = self.avg_processing_ms {
            consumer.avg_processing_ms = ms;
        }
    }
}
