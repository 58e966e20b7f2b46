use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::Display;

use super::alert::Severity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EventKind {
    Queue,
    Exchange,
    Binding,
    Connection,
    Channel,
    Consumer,
    Vhost,
    User,
    Permission,
    Policy,
    AlertRule,
    Alert,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EventAction {
    Created,
    Deleted,
    Purged,
    Triggered,
    Acknowledged,
    Resolved,
    Dismissed,
}

/// Append-only audit record. No cascading relationships.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub kind: EventKind,
    pub action: EventAction,
    pub severity: Severity,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    /// Acting user, when the mutation came from an authenticated caller.
    pub user: Option<String>,
}
