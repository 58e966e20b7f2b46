//! The in-memory entity store backing the management console.
//!
//! One store instance holds every topology and administrative entity. All
//! mutations are synchronous, cascade fully before returning, and never fail
//! on absent ids (no-op semantics); the only hard error is a duplicate id on
//! insert. Collections keep insertion order; alerts and events are
//! most-recent-first with bounded retention.

use std::collections::VecDeque;

use chrono::Utc;
use uuid::Uuid;

use crate::{
    error::Error,
    models::{
        Alert, AlertRule, AlertRuleUpdate, Binding, Channel, ChannelUpdate, Connection,
        ConnectionUpdate, Consumer, ConsumerUpdate, DestinationKind, Event, EventAction,
        EventKind, Exchange, ExchangeKind, ExchangeUpdate, Permission, PermissionUpdate, Policy,
        PolicyUpdate, Queue, QueueUpdate, Severity, User, UserUpdate, VirtualHost,
        VirtualHostUpdate,
    },
    routing,
};

/// Retention cap for fired alerts.
pub const MAX_ALERTS: usize = 100;
/// Retention cap for audit events.
pub const MAX_EVENTS: usize = 500;

#[derive(Debug, Default)]
pub struct EntityStore {
    pub(crate) queues: Vec<Queue>,
    pub(crate) exchanges: Vec<Exchange>,
    pub(crate) bindings: Vec<Binding>,
    pub(crate) connections: Vec<Connection>,
    pub(crate) channels: Vec<Channel>,
    pub(crate) consumers: Vec<Consumer>,
    pub(crate) vhosts: Vec<VirtualHost>,
    pub(crate) users: Vec<User>,
    pub(crate) permissions: Vec<Permission>,
    pub(crate) policies: Vec<Policy>,
    pub(crate) alert_rules: Vec<AlertRule>,
    pub(crate) alerts: VecDeque<Alert>,
    pub(crate) events: VecDeque<Event>,
    selected_queue: Option<String>,
    selected_exchange: Option<String>,
    selected_connection: Option<String>,
}

fn ensure_unique<'a>(mut ids: impl Iterator<Item = &'a str>, id: &str) -> Result<(), Error> {
    if ids.any(|existing| existing == id) {
        return Err(Error::duplicate_id(id));
    }
    Ok(())
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an audit event, evicting the oldest entries past the cap.
    pub(crate) fn record(
        &mut self,
        kind: EventKind,
        action: EventAction,
        severity: Severity,
        message: impl Into<String>,
    ) {
        self.events.push_front(Event {
            id: Uuid::new_v4().to_string(),
            kind,
            action,
            severity,
            message: message.into(),
            timestamp: Utc::now(),
            user: None,
        });
        self.events.truncate(MAX_EVENTS);
    }

    // ---- queues ----

    pub fn add_queue(&mut self, mut queue: Queue) -> Result<Queue, Error> {
        ensure_unique(self.queues.iter().map(|q| q.id.as_str()), &queue.id)?;
        queue.messages_total = queue.messages_ready + queue.messages_unacked;
        queue.health_score = crate::health::health_score(&queue);
        let out = queue.clone();
        self.queues.push(queue);
        self.record(
            EventKind::Queue,
            EventAction::Created,
            Severity::Info,
            format!("queue {} declared on vhost {}", out.name, out.vhost),
        );
        Ok(out)
    }

    pub fn update_queue(&mut self, id: &str, update: QueueUpdate) -> Option<Queue> {
        let queue = self.queues.iter_mut().find(|q| q.id == id)?;
        update.apply(queue);
        queue.health_score = crate::health::health_score(queue);
        Some(queue.clone())
    }

    /// Removes the queue and every binding pointing at it.
    pub fn delete_queue(&mut self, id: &str) -> bool {
        let Some(pos) = self.queues.iter().position(|q| q.id == id) else {
            return false;
        };
        let queue = self.queues.remove(pos);
        self.bindings
            .retain(|b| !(b.destination_kind == DestinationKind::Queue && b.destination == id));
        self.record(
            EventKind::Queue,
            EventAction::Deleted,
            Severity::Info,
            format!("queue {} deleted from vhost {}", queue.name, queue.vhost),
        );
        true
    }

    /// Resets all three message counters to zero. Identity is untouched.
    pub fn purge_queue(&mut self, id: &str) -> Option<Queue> {
        let queue = self.queues.iter_mut().find(|q| q.id == id)?;
        queue.messages_ready = 0;
        queue.messages_unacked = 0;
        queue.messages_total = 0;
        queue.health_score = crate::health::health_score(queue);
        let out = queue.clone();
        self.record(
            EventKind::Queue,
            EventAction::Purged,
            Severity::Warning,
            format!("queue {} purged", out.name),
        );
        Some(out)
    }

    pub fn queues(&self) -> &[Queue] {
        &self.queues
    }

    pub fn queue(&self, id: &str) -> Option<&Queue> {
        self.queues.iter().find(|q| q.id == id)
    }

    pub fn queue_by_name(&self, vhost: &str, name: &str) -> Option<&Queue> {
        self.queues
            .iter()
            .find(|q| q.vhost == vhost && q.name == name)
    }

    // ---- exchanges ----

    pub fn add_exchange(&mut self, exchange: Exchange) -> Result<Exchange, Error> {
        ensure_unique(self.exchanges.iter().map(|e| e.id.as_str()), &exchange.id)?;
        let out = exchange.clone();
        self.exchanges.push(exchange);
        self.record(
            EventKind::Exchange,
            EventAction::Created,
            Severity::Info,
            format!("exchange {} declared on vhost {}", out.name, out.vhost),
        );
        Ok(out)
    }

    pub fn update_exchange(&mut self, id: &str, update: ExchangeUpdate) -> Option<Exchange> {
        let exchange = self.exchanges.iter_mut().find(|e| e.id == id)?;
        update.apply(exchange);
        Some(exchange.clone())
    }

    /// Removes the exchange and every binding it terminates, on either end.
    pub fn delete_exchange(&mut self, id: &str) -> bool {
        let Some(pos) = self.exchanges.iter().position(|e| e.id == id) else {
            return false;
        };
        let exchange = self.exchanges.remove(pos);
        self.bindings.retain(|b| {
            b.source != id
                && !(b.destination_kind == DestinationKind::Exchange && b.destination == id)
        });
        self.record(
            EventKind::Exchange,
            EventAction::Deleted,
            Severity::Info,
            format!("exchange {} deleted from vhost {}", exchange.name, exchange.vhost),
        );
        true
    }

    pub fn exchanges(&self) -> &[Exchange] {
        &self.exchanges
    }

    pub fn exchange(&self, id: &str) -> Option<&Exchange> {
        self.exchanges.iter().find(|e| e.id == id)
    }

    // ---- bindings ----

    /// Inserts a binding after verifying both endpoints exist, so the store
    /// never holds a dangling routing edge.
    pub fn add_binding(&mut self, binding: Binding) -> Result<Binding, Error> {
        ensure_unique(self.bindings.iter().map(|b| b.id.as_str()), &binding.id)?;
        if self.exchange(&binding.source).is_none() {
            return Err(Error::entity_not_found("exchange", &binding.source));
        }
        let destination_exists = match binding.destination_kind {
            DestinationKind::Queue => self.queue(&binding.destination).is_some(),
            DestinationKind::Exchange => self.exchange(&binding.destination).is_some(),
        };
        if !destination_exists {
            return Err(Error::entity_not_found("destination", &binding.destination));
        }
        let out = binding.clone();
        self.bindings.push(binding);
        self.record(
            EventKind::Binding,
            EventAction::Created,
            Severity::Info,
            format!(
                "binding {} -> {} ({})",
                out.source, out.destination, out.routing_key
            ),
        );
        Ok(out)
    }

    pub fn delete_binding(&mut self, id: &str) -> bool {
        let Some(pos) = self.bindings.iter().position(|b| b.id == id) else {
            return false;
        };
        let binding = self.bindings.remove(pos);
        self.record(
            EventKind::Binding,
            EventAction::Deleted,
            Severity::Info,
            format!("binding {} -> {} removed", binding.source, binding.destination),
        );
        true
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    pub fn binding(&self, id: &str) -> Option<&Binding> {
        self.bindings.iter().find(|b| b.id == id)
    }

    /// Topology query: which bindings on this exchange would a message with
    /// the given routing key follow.
    pub fn match_bindings(&self, exchange_id: &str, routing_key: &str) -> Vec<&Binding> {
        let Some(exchange) = self.exchange(exchange_id) else {
            return Vec::new();
        };
        self.bindings
            .iter()
            .filter(|b| b.source == exchange_id)
            .filter(|b| match &exchange.kind {
                ExchangeKind::Fanout | ExchangeKind::Headers => true,
                ExchangeKind::Topic => routing::matches(&b.routing_key, routing_key),
                ExchangeKind::Direct | ExchangeKind::Custom(_) => b.routing_key == routing_key,
            })
            .collect()
    }

    // ---- connections, channels, consumers ----

    pub fn add_connection(&mut self, connection: Connection) -> Result<Connection, Error> {
        ensure_unique(
            self.connections.iter().map(|c| c.id.as_str()),
            &connection.id,
        )?;
        let out = connection.clone();
        self.connections.push(connection);
        self.record(
            EventKind::Connection,
            EventAction::Created,
            Severity::Info,
            format!("connection {} opened by {}", out.name, out.user),
        );
        Ok(out)
    }

    pub fn update_connection(&mut self, id: &str, update: ConnectionUpdate) -> Option<Connection> {
        let connection = self.connections.iter_mut().find(|c| c.id == id)?;
        update.apply(connection);
        Some(connection.clone())
    }

    /// Removes the connection together with its channels and every consumer
    /// registered through it.
    pub fn delete_connection(&mut self, id: &str) -> bool {
        let Some(pos) = self.connections.iter().position(|c| c.id == id) else {
            return false;
        };
        let connection = self.connections.remove(pos);
        self.channels.retain(|ch| ch.connection_id != id);
        self.consumers.retain(|c| c.connection_id != id);
        self.record(
            EventKind::Connection,
            EventAction::Deleted,
            Severity::Info,
            format!("connection {} closed", connection.name),
        );
        true
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn connection(&self, id: &str) -> Option<&Connection> {
        self.connections.iter().find(|c| c.id == id)
    }

    pub fn add_channel(&mut self, channel: Channel) -> Result<Channel, Error> {
        ensure_unique(self.channels.iter().map(|c| c.id.as_str()), &channel.id)?;
        if self.connection(&channel.connection_id).is_none() {
            return Err(Error::entity_not_found("connection", &channel.connection_id));
        }
        let out = channel.clone();
        self.channels.push(channel);
        Ok(out)
    }

    pub fn update_channel(&mut self, id: &str, update: ChannelUpdate) -> Option<Channel> {
        let channel = self.channels.iter_mut().find(|c| c.id == id)?;
        update.apply(channel);
        Some(channel.clone())
    }

    pub fn delete_channel(&mut self, id: &str) -> bool {
        let Some(pos) = self.channels.iter().position(|c| c.id == id) else {
            return false;
        };
        self.channels.remove(pos);
        true
    }

    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    pub fn channel(&self, id: &str) -> Option<&Channel> {
        self.channels.iter().find(|c| c.id == id)
    }

    pub fn add_consumer(&mut self, mut consumer: Consumer) -> Result<Consumer, Error> {
        ensure_unique(
            self.consumers.iter().map(|c| c.tag.as_str()),
            &consumer.tag,
        )?;
        consumer.slow = crate::health::is_slow_consumer(&consumer);
        let out = consumer.clone();
        self.consumers.push(consumer);
        Ok(out)
    }

    pub fn update_consumer(&mut self, tag: &str, update: ConsumerUpdate) -> Option<Consumer> {
        let consumer = self.consumers.iter_mut().find(|c| c.tag == tag)?;
        update.apply(consumer);
        consumer.slow = crate::health::is_slow_consumer(consumer);
        Some(consumer.clone())
    }

    pub fn delete_consumer(&mut self, tag: &str) -> bool {
        let Some(pos) = self.consumers.iter().position(|c| c.tag == tag) else {
            return false;
        };
        self.consumers.remove(pos);
        true
    }

    pub fn consumers(&self) -> &[Consumer] {
        &self.consumers
    }

    pub fn consumer(&self, tag: &str) -> Option<&Consumer> {
        self.consumers.iter().find(|c| c.tag == tag)
    }

    // ---- vhosts, users, permissions, policies ----

    pub fn add_vhost(&mut self, vhost: VirtualHost) -> Result<VirtualHost, Error> {
        ensure_unique(self.vhosts.iter().map(|v| v.id.as_str()), &vhost.id)?;
        let out = vhost.clone();
        self.vhosts.push(vhost);
        self.record(
            EventKind::Vhost,
            EventAction::Created,
            Severity::Info,
            format!("vhost {} created", out.name),
        );
        Ok(out)
    }

    pub fn update_vhost(&mut self, id: &str, update: VirtualHostUpdate) -> Option<VirtualHost> {
        let vhost = self.vhosts.iter_mut().find(|v| v.id == id)?;
        update.apply(vhost);
        Some(vhost.clone())
    }

    pub fn delete_vhost(&mut self, id: &str) -> bool {
        let Some(pos) = self.vhosts.iter().position(|v| v.id == id) else {
            return false;
        };
        let vhost = self.vhosts.remove(pos);
        self.record(
            EventKind::Vhost,
            EventAction::Deleted,
            Severity::Info,
            format!("vhost {} deleted", vhost.name),
        );
        true
    }

    pub fn vhosts(&self) -> &[VirtualHost] {
        &self.vhosts
    }

    pub fn vhost(&self, id: &str) -> Option<&VirtualHost> {
        self.vhosts.iter().find(|v| v.id == id)
    }

    pub fn add_user(&mut self, user: User) -> Result<User, Error> {
        ensure_unique(self.users.iter().map(|u| u.id.as_str()), &user.id)?;
        let out = user.clone();
        self.users.push(user);
        self.record(
            EventKind::User,
            EventAction::Created,
            Severity::Info,
            format!("user {} created", out.name),
        );
        Ok(out)
    }

    pub fn update_user(&mut self, id: &str, update: UserUpdate) -> Option<User> {
        let user = self.users.iter_mut().find(|u| u.id == id)?;
        update.apply(user);
        Some(user.clone())
    }

    pub fn delete_user(&mut self, id: &str) -> bool {
        let Some(pos) = self.users.iter().position(|u| u.id == id) else {
            return false;
        };
        let user = self.users.remove(pos);
        self.record(
            EventKind::User,
            EventAction::Deleted,
            Severity::Info,
            format!("user {} deleted", user.name),
        );
        true
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn add_permission(&mut self, permission: Permission) -> Result<Permission, Error> {
        ensure_unique(
            self.permissions.iter().map(|p| p.id.as_str()),
            &permission.id,
        )?;
        let out = permission.clone();
        self.permissions.push(permission);
        Ok(out)
    }

    pub fn update_permission(&mut self, id: &str, update: PermissionUpdate) -> Option<Permission> {
        let permission = self.permissions.iter_mut().find(|p| p.id == id)?;
        update.apply(permission);
        Some(permission.clone())
    }

    pub fn delete_permission(&mut self, id: &str) -> bool {
        let Some(pos) = self.permissions.iter().position(|p| p.id == id) else {
            return false;
        };
        self.permissions.remove(pos);
        true
    }

    pub fn permissions(&self) -> &[Permission] {
        &self.permissions
    }

    pub fn permission(&self, id: &str) -> Option<&Permission> {
        self.permissions.iter().find(|p| p.id == id)
    }

    pub fn add_policy(&mut self, policy: Policy) -> Result<Policy, Error> {
        ensure_unique(self.policies.iter().map(|p| p.id.as_str()), &policy.id)?;
        let out = policy.clone();
        self.policies.push(policy);
        self.record(
            EventKind::Policy,
            EventAction::Created,
            Severity::Info,
            format!("policy {} set on vhost {}", out.name, out.vhost),
        );
        Ok(out)
    }

    pub fn update_policy(&mut self, id: &str, update: PolicyUpdate) -> Option<Policy> {
        let policy = self.policies.iter_mut().find(|p| p.id == id)?;
        update.apply(policy);
        Some(policy.clone())
    }

    pub fn delete_policy(&mut self, id: &str) -> bool {
        let Some(pos) = self.policies.iter().position(|p| p.id == id) else {
            return false;
        };
        let policy = self.policies.remove(pos);
        self.record(
            EventKind::Policy,
            EventAction::Deleted,
            Severity::Info,
            format!("policy {} cleared", policy.name),
        );
        true
    }

    pub fn policies(&self) -> &[Policy] {
        &self.policies
    }

    pub fn policy(&self, id: &str) -> Option<&Policy> {
        self.policies.iter().find(|p| p.id == id)
    }

    // ---- alert rules ----

    pub fn add_alert_rule(&mut self, rule: AlertRule) -> Result<AlertRule, Error> {
        ensure_unique(self.alert_rules.iter().map(|r| r.id.as_str()), &rule.id)?;
        let out = rule.clone();
        self.alert_rules.push(rule);
        self.record(
            EventKind::AlertRule,
            EventAction::Created,
            Severity::Info,
            format!("alert rule {} created", out.name),
        );
        Ok(out)
    }

    pub fn update_alert_rule(&mut self, id: &str, update: AlertRuleUpdate) -> Option<AlertRule> {
        let rule = self.alert_rules.iter_mut().find(|r| r.id == id)?;
        update.apply(rule);
        Some(rule.clone())
    }

    /// Deleting a rule never touches historical alerts; they carry their own
    /// copy of the rule name and severity.
    pub fn delete_alert_rule(&mut self, id: &str) -> bool {
        let Some(pos) = self.alert_rules.iter().position(|r| r.id == id) else {
            return false;
        };
        let rule = self.alert_rules.remove(pos);
        self.record(
            EventKind::AlertRule,
            EventAction::Deleted,
            Severity::Info,
            format!("alert rule {} deleted", rule.name),
        );
        true
    }

    pub fn alert_rules(&self) -> &[AlertRule] {
        &self.alert_rules
    }

    pub fn alert_rule(&self, id: &str) -> Option<&AlertRule> {
        self.alert_rules.iter().find(|r| r.id == id)
    }

    // ---- alerts & events (lifecycle ops live in `alerts`) ----

    pub fn alerts(&self) -> &VecDeque<Alert> {
        &self.alerts
    }

    pub fn alert(&self, id: &str) -> Option<&Alert> {
        self.alerts.iter().find(|a| a.id == id)
    }

    pub fn events(&self) -> &VecDeque<Event> {
        &self.events
    }

    // ---- selection ----

    pub fn set_selected_queue(&mut self, id: Option<String>) {
        self.selected_queue = id;
    }

    pub fn selected_queue(&self) -> Option<&str> {
        self.selected_queue.as_deref()
    }

    pub fn set_selected_exchange(&mut self, id: Option<String>) {
        self.selected_exchange = id;
    }

    pub fn selected_exchange(&self) -> Option<&str> {
        self.selected_exchange.as_deref()
    }

    pub fn set_selected_connection(&mut self, id: Option<String>) {
        self.selected_connection = id;
    }

    pub fn selected_connection(&self) -> Option<&str> {
        self.selected_connection.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DestinationKind, ExchangeKind};

    fn binding(id: &str, source: &str, destination: &str, kind: DestinationKind) -> Binding {
        Binding {
            id: id.to_owned(),
            vhost: "/".to_owned(),
            source: source.to_owned(),
            destination: destination.to_owned(),
            destination_kind: kind,
            routing_key: "#".to_owned(),
            arguments: Default::default(),
        }
    }

    #[test]
    fn duplicate_queue_id_is_rejected() {
        let mut store = EntityStore::new();
        store.add_queue(Queue::new("q1", "orders", "/")).unwrap();

        let err = store.add_queue(Queue::new("q1", "other", "/")).unwrap_err();
        assert!(matches!(err, Error::DuplicateId { .. }));
        assert_eq!(store.queues().len(), 1);
    }

    #[test]
    fn deleting_a_queue_drops_its_bindings() {
        let mut store = EntityStore::new();
        store.add_exchange(Exchange::new("ex1", "amq.topic", "/")).unwrap();
        store.add_queue(Queue::new("q1", "orders", "/")).unwrap();
        store.add_queue(Queue::new("q2", "payments", "/")).unwrap();
        store
            .add_binding(binding("b1", "ex1", "q1", DestinationKind::Queue))
            .unwrap();
        store
            .add_binding(binding("b2", "ex1", "q2", DestinationKind::Queue))
            .unwrap();

        assert!(store.delete_queue("q1"));

        assert_eq!(store.bindings().len(), 1);
        assert!(store
            .bindings()
            .iter()
            .all(|b| b.source != "q1" && b.destination != "q1"));
    }

    #[test]
    fn deleting_an_exchange_drops_bindings_on_both_ends() {
        let mut store = EntityStore::new();
        store.add_exchange(Exchange::new("ex1", "upstream", "/")).unwrap();
        store.add_exchange(Exchange::new("ex2", "downstream", "/")).unwrap();
        store.add_queue(Queue::new("q1", "orders", "/")).unwrap();
        store
            .add_binding(binding("b1", "ex1", "ex2", DestinationKind::Exchange))
            .unwrap();
        store
            .add_binding(binding("b2", "ex2", "q1", DestinationKind::Queue))
            .unwrap();

        assert!(store.delete_exchange("ex2"));

        assert!(store.bindings().is_empty());
    }

    #[test]
    fn binding_endpoints_must_exist() {
        let mut store = EntityStore::new();
        store.add_exchange(Exchange::new("ex1", "amq.direct", "/")).unwrap();

        let err = store
            .add_binding(binding("b1", "ex1", "q-missing", DestinationKind::Queue))
            .unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));

        let err = store
            .add_binding(binding("b2", "ex-missing", "q1", DestinationKind::Queue))
            .unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));

        assert!(store.bindings().is_empty());
    }

    #[test]
    fn purge_zeroes_all_three_counters() {
        let mut store = EntityStore::new();
        let mut queue = Queue::new("q1", "orders", "/");
        queue.messages_ready = 40;
        queue.messages_unacked = 2;
        store.add_queue(queue).unwrap();

        let purged = store.purge_queue("q1").unwrap();
        assert_eq!(purged.messages_ready, 0);
        assert_eq!(purged.messages_unacked, 0);
        assert_eq!(purged.messages_total, 0);

        // Absent id is a no-op, not an error.
        assert!(store.purge_queue("q-missing").is_none());
    }

    #[test]
    fn update_rederives_total_and_health() {
        let mut store = EntityStore::new();
        store.add_queue(Queue::new("q1", "orders", "/")).unwrap();

        let updated = store
            .update_queue(
                "q1",
                QueueUpdate {
                    messages_ready: Some(100),
                    messages_unacked: Some(7),
                    consumers: Some(2),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.messages_total, 107);
        assert_eq!(updated.health_score, 100);
        assert!(store.update_queue("nope", QueueUpdate::default()).is_none());
    }

    #[test]
    fn connection_delete_cascades_to_channels_and_consumers() {
        let mut store = EntityStore::new();
        store
            .add_connection(Connection::new("c1", "10.0.0.5:49202", "/"))
            .unwrap();
        store.add_channel(Channel::new("ch1", "c1", 1)).unwrap();
        store
            .add_consumer(Consumer::new("ctag-1", "orders", "ch1", "c1"))
            .unwrap();

        assert!(store.delete_connection("c1"));

        assert!(store.connections().is_empty());
        assert!(store.channels().is_empty());
        assert!(store.consumers().is_empty());
    }

    #[test]
    fn match_bindings_respects_exchange_kind() {
        let mut store = EntityStore::new();
        let mut topic = Exchange::new("ex-topic", "events", "/");
        topic.kind = ExchangeKind::Topic;
        store.add_exchange(topic).unwrap();
        let mut fanout = Exchange::new("ex-fan", "broadcast", "/");
        fanout.kind = ExchangeKind::Fanout;
        store.add_exchange(fanout).unwrap();
        store.add_queue(Queue::new("q1", "orders", "/")).unwrap();

        let mut b1 = binding("b1", "ex-topic", "q1", DestinationKind::Queue);
        b1.routing_key = "order.*".to_owned();
        store.add_binding(b1).unwrap();
        let mut b2 = binding("b2", "ex-fan", "q1", DestinationKind::Queue);
        b2.routing_key = String::new();
        store.add_binding(b2).unwrap();

        assert_eq!(store.match_bindings("ex-topic", "order.created").len(), 1);
        assert_eq!(store.match_bindings("ex-topic", "payment.created").len(), 0);
        assert_eq!(store.match_bindings("ex-fan", "anything.at.all").len(), 1);
        assert!(store.match_bindings("ex-missing", "x").is_empty());
    }

    #[test]
    fn events_are_head_first_and_capped() {
        let mut store = EntityStore::new();
        for i in 0..(MAX_EVENTS + 20) {
            store.record(
                EventKind::System,
                EventAction::Created,
                Severity::Info,
                format!("tick {i}"),
            );
        }

        assert_eq!(store.events().len(), MAX_EVENTS);
        assert_eq!(store.events()[0].message, format!("tick {}", MAX_EVENTS + 19));
    }

    #[test]
    fn selection_slots_are_overwritable_and_nullable() {
        let mut store = EntityStore::new();
        assert!(store.selected_queue().is_none());

        store.set_selected_queue(Some("q1".to_owned()));
        assert_eq!(store.selected_queue(), Some("q1"));

        store.set_selected_queue(Some("q2".to_owned()));
        assert_eq!(store.selected_queue(), Some("q2"));

        store.set_selected_queue(None);
        assert!(store.selected_queue().is_none());
    }
}
