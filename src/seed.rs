//! Demo topology loaded at startup when no real broker feed is wired in.
//! Gives the dashboard something to render; the refresh driver keeps it
//! moving from there.

use serde_json::json;

use crate::{
    models::{
        AlertMetric, AlertRule, Binding, Channel, CompareOp, Connection, Consumer,
        DestinationKind, Exchange, ExchangeKind, Permission, Policy, PolicyTarget, Queue,
        QueueKind, QueueState, Severity, User, VirtualHost,
    },
    store::EntityStore,
};

pub fn seed(store: &mut EntityStore) {
    store
        .add_vhost(VirtualHost {
            id: "vh-default".to_owned(),
            name: "/".to_owned(),
            description: "Default virtual host".to_owned(),
        })
        .ok();

    for (id, name, tags) in [
        ("u-admin", "admin", vec!["administrator"]),
        ("u-monitor", "monitor", vec!["monitoring"]),
        ("u-app", "orders-service", vec![]),
    ] {
        store
            .add_user(User {
                id: id.to_owned(),
                name: name.to_owned(),
                tags: tags.into_iter().map(str::to_owned).collect(),
            })
            .ok();
    }

    store
        .add_permission(Permission {
            id: "perm-app-default".to_owned(),
            user_id: "u-app".to_owned(),
            vhost: "/".to_owned(),
            configure: "^orders\\..*".to_owned(),
            write: ".*".to_owned(),
            read: ".*".to_owned(),
        })
        .ok();

    let mut orders = Exchange::new("ex-orders", "orders", "/");
    orders.kind = ExchangeKind::Topic;
    store.add_exchange(orders).ok();

    let mut broadcast = Exchange::new("ex-broadcast", "notifications", "/");
    broadcast.kind = ExchangeKind::Fanout;
    store.add_exchange(broadcast).ok();

    let mut dlx = Exchange::new("ex-dlx", "dlx", "/");
    dlx.internal = true;
    store.add_exchange(dlx).ok();

    let mut processing = Queue::new("q-orders-processing", "orders.processing", "/");
    processing.kind = QueueKind::Quorum;
    processing.messages_ready = 1_240;
    processing.messages_unacked = 56;
    processing.consumers = 3;
    processing.memory_bytes = 12 << 20;
    processing.publish_rate = 140.0;
    processing.deliver_rate = 135.0;
    processing.ack_rate = 133.0;
    processing
        .arguments
        .insert("x-dead-letter-exchange".to_owned(), json!("dlx"));
    store.add_queue(processing).ok();

    let mut dlq = Queue::new("q-orders-dlq", "orders.dlq", "/");
    dlq.messages_ready = 12;
    dlq.consumers = 1;
    store.add_queue(dlq).ok();

    let mut email = Queue::new("q-notify-email", "notifications.email", "/");
    email.state = QueueState::Idle;
    email.consumers = 1;
    store.add_queue(email).ok();

    for (id, source, destination, key) in [
        ("b-orders", "ex-orders", "q-orders-processing", "order.#"),
        ("b-dlq", "ex-dlx", "q-orders-dlq", "#"),
        ("b-email", "ex-broadcast", "q-notify-email", ""),
    ] {
        store
            .add_binding(Binding {
                id: id.to_owned(),
                vhost: "/".to_owned(),
                source: source.to_owned(),
                destination: destination.to_owned(),
                destination_kind: DestinationKind::Queue,
                routing_key: key.to_owned(),
                arguments: Default::default(),
            })
            .ok();
    }

    let mut conn = Connection::new("conn-orders-1", "10.20.4.17:49201", "/");
    conn.user = "orders-service".to_owned();
    conn.peer_host = "10.20.4.17".to_owned();
    conn.peer_port = 49_201;
    conn.tls = true;
    conn.channel_count = 2;
    conn.recv_rate = 250.0;
    conn.send_rate = 230.0;
    store.add_connection(conn).ok();

    store.add_channel(Channel::new("ch-orders-1", "conn-orders-1", 1)).ok();
    store.add_channel(Channel::new("ch-orders-2", "conn-orders-1", 2)).ok();

    let mut consumer = Consumer::new(
        "ctag-orders-1",
        "orders.processing",
        "ch-orders-1",
        "conn-orders-1",
    );
    consumer.prefetch_count = 50;
    consumer.deliver_rate = 45.0;
    consumer.ack_rate = 44.0;
    consumer.avg_processing_ms = 35.0;
    store.add_consumer(consumer).ok();

    let mut policy = Policy {
        id: "pol-dlq-ttl".to_owned(),
        name: "dlq-ttl".to_owned(),
        vhost: "/".to_owned(),
        pattern: "\\.dlq$".to_owned(),
        apply_to: PolicyTarget::Queues,
        definition: Default::default(),
        priority: 10,
    };
    policy
        .definition
        .insert("message-ttl".to_owned(), json!(86_400_000));
    store.add_policy(policy).ok();

    let mut backlog = AlertRule::new(
        "rule-backlog",
        "queue backlog high",
        AlertMetric::MessagesReady,
        CompareOp::Gt,
        5_000.0,
    );
    backlog.duration_secs = 60;
    store.add_alert_rule(backlog).ok();

    let mut starved = AlertRule::new(
        "rule-no-consumers",
        "queue has no consumers",
        AlertMetric::Consumers,
        CompareOp::Lt,
        1.0,
    );
    starved.severity = Severity::Critical;
    starved.duration_secs = 120;
    store.add_alert_rule(starved).ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_topology_is_internally_consistent() {
        let mut store = EntityStore::new();
        seed(&mut store);

        // Every binding endpoint resolves.
        for binding in store.bindings() {
            assert!(store.exchange(&binding.source).is_some());
            let ok = match binding.destination_kind {
                DestinationKind::Queue => store.queue(&binding.destination).is_some(),
                DestinationKind::Exchange => store.exchange(&binding.destination).is_some(),
            };
            assert!(ok, "dangling binding {}", binding.id);
        }

        // Every consumer hangs off a live connection and channel.
        for consumer in store.consumers() {
            assert!(store.connection(&consumer.connection_id).is_some());
            assert!(store.channel(&consumer.channel_id).is_some());
        }

        for queue in store.queues() {
            assert_eq!(queue.messages_total, queue.messages_ready + queue.messages_unacked);
        }
    }
}
