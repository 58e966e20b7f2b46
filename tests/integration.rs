use std::time::Duration;

use scopemq::{
    config::Config,
    models::{
        AlertMetric, AlertStatus, Binding, Channel, CompareOp, Connection, Consumer,
        DestinationKind, Exchange, ExchangeKind, Queue, QueueUpdate, TargetKind,
    },
    refresh::RefreshDriver,
    service::Service,
};
use serde_json::json;

fn setup() -> Service {
    Service::with_config(Config {
        host: None,
        port: None,
        refresh_interval_secs: None,
        seed_topology: Some(false),
    })
}

fn rule(id: &str) -> scopemq::models::AlertRule {
    scopemq::models::AlertRule::new(
        id,
        format!("rule-{id}"),
        AlertMetric::MessagesReady,
        CompareOp::Gt,
        5_000.0,
    )
}

#[test]
fn dead_letter_wiring() {
    let service = setup();

    let mut dlx = Exchange::new("ex-dlx", "dlx", "/");
    dlx.internal = true;
    service.create_exchange(dlx).unwrap();

    service
        .create_queue(Queue::new("q-dlq", "orders.dlq", "/"))
        .unwrap();

    let mut processing = Queue::new("q-processing", "orders.processing", "/");
    processing
        .arguments
        .insert("x-dead-letter-exchange".to_owned(), json!("dlx"));
    service.create_queue(processing).unwrap();

    service
        .create_binding(Binding {
            id: "b-dlq".to_owned(),
            vhost: "/".to_owned(),
            source: "ex-dlx".to_owned(),
            destination: "q-dlq".to_owned(),
            destination_kind: DestinationKind::Queue,
            routing_key: "#".to_owned(),
            arguments: Default::default(),
        })
        .unwrap();

    assert_eq!(service.list_queues().len(), 2);
    let exchanges = service.list_exchanges();
    assert_eq!(exchanges.len(), 1);
    assert!(exchanges[0].internal);
    assert_eq!(service.list_bindings().len(), 1);

    let processing = service.get_queue("q-processing").unwrap();
    assert_eq!(
        processing.arguments.get("x-dead-letter-exchange"),
        Some(&json!("dlx"))
    );
}

#[test]
fn connection_teardown_removes_consumers() {
    let service = setup();

    service
        .create_connection(Connection::new("c1", "10.0.0.9:41210", "/"))
        .unwrap();
    service.create_channel(Channel::new("ch1", "c1", 1)).unwrap();
    service
        .create_consumer(Consumer::new("ctag-1", "orders", "ch1", "c1"))
        .unwrap();

    assert!(service.delete_connection("c1"));

    assert!(service.list_consumers().is_empty());
    assert!(service.list_channels().is_empty());

    // A second delete is a no-op; the facade still reports success.
    assert!(!service.delete_connection("c1"));
}

#[test]
fn queue_delete_cascades_bindings() {
    let service = setup();

    service
        .create_exchange(Exchange::new("ex1", "amq.topic", "/"))
        .unwrap();
    service
        .create_queue(Queue::new("q1", "orders", "/"))
        .unwrap();
    service
        .create_binding(Binding {
            id: "b1".to_owned(),
            vhost: "/".to_owned(),
            source: "ex1".to_owned(),
            destination: "q1".to_owned(),
            destination_kind: DestinationKind::Queue,
            routing_key: "order.#".to_owned(),
            arguments: Default::default(),
        })
        .unwrap();

    service.delete_queue("q1");

    assert!(service
        .list_bindings()
        .iter()
        .all(|b| b.source != "q1" && b.destination != "q1"));
    assert!(service.list_bindings().is_empty());
}

#[test]
fn purge_and_rate_updates_keep_counters_consistent() {
    let service = setup();

    let mut queue = Queue::new("q1", "orders", "/");
    queue.messages_ready = 300;
    queue.messages_unacked = 40;
    service.create_queue(queue).unwrap();

    let stored = service.get_queue("q1").unwrap();
    assert_eq!(stored.messages_total, 340);

    // Rate-only update leaves the counters alone and the invariant intact.
    let updated = service
        .update_queue(
            "q1",
            QueueUpdate {
                publish_rate: Some(80.0),
                deliver_rate: Some(75.0),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(updated.messages_total, 340);
    assert_eq!(
        updated.messages_total,
        updated.messages_ready + updated.messages_unacked
    );

    let purged = service.purge_queue("q1").unwrap();
    assert_eq!(purged.messages_ready, 0);
    assert_eq!(purged.messages_unacked, 0);
    assert_eq!(purged.messages_total, 0);
}

#[test]
fn alert_cap_and_ordering() {
    let service = setup();
    let r = rule("r1");

    for i in 0..110 {
        service.trigger_alert(&r, TargetKind::Queue, format!("queue-{i}"), 9_000.0);
    }

    let alerts = service.list_alerts();
    assert_eq!(alerts.len(), 100);
    assert_eq!(alerts[0].target, "queue-109");
}

#[test]
fn alert_state_machine_round_trip() {
    let service = setup();
    let alert = service.trigger_alert(&rule("r1"), TargetKind::Queue, "orders", 9_000.0);

    service.acknowledge_alert(&alert.id, "ops").unwrap();
    let resolved = service.resolve_alert(&alert.id).unwrap();

    assert_eq!(resolved.status, AlertStatus::Resolved);
    assert!(resolved.acknowledged_at.is_some());
    assert!(resolved.resolved_at.is_some());

    let before = service.list_alerts().len();
    assert!(service.dismiss_alert(&alert.id));
    assert_eq!(service.list_alerts().len(), before - 1);
}

#[test]
fn duplicate_ids_are_rejected() {
    let service = setup();

    service
        .create_queue(Queue::new("q1", "orders", "/"))
        .unwrap();
    assert!(service.create_queue(Queue::new("q1", "other", "/")).is_err());
    assert_eq!(service.list_queues().len(), 1);
}

#[test]
fn topic_routing_through_the_store() {
    let service = setup();

    let mut topic = Exchange::new("ex-events", "events", "/");
    topic.kind = ExchangeKind::Topic;
    service.create_exchange(topic).unwrap();
    service
        .create_queue(Queue::new("q-audit", "audit", "/"))
        .unwrap();

    service
        .create_binding(Binding {
            id: "b-audit".to_owned(),
            vhost: "/".to_owned(),
            source: "ex-events".to_owned(),
            destination: "q-audit".to_owned(),
            destination_kind: DestinationKind::Queue,
            routing_key: "order.#".to_owned(),
            arguments: Default::default(),
        })
        .unwrap();

    assert_eq!(service.match_bindings("ex-events", "order.created.v2").len(), 1);
    assert!(service.match_bindings("ex-events", "payment.created").is_empty());
}

#[test]
fn refresh_ticks_never_break_the_counter_invariant() {
    let service = setup();

    let mut queue = Queue::new("q1", "orders", "/");
    queue.messages_ready = 2_000;
    queue.messages_unacked = 150;
    queue.consumers = 2;
    queue.publish_rate = 90.0;
    queue.deliver_rate = 85.0;
    service.create_queue(queue).unwrap();

    for _ in 0..50 {
        service.refresh_tick();
        let q = service.get_queue("q1").unwrap();
        assert_eq!(q.messages_total, q.messages_ready + q.messages_unacked);
        assert!(q.health_score <= 100);
    }
}

#[tokio::test(start_paused = true)]
async fn refresh_driver_ticks_and_stops_cleanly() {
    let service = std::sync::Arc::new(Service::with_config(Config {
        host: None,
        port: None,
        refresh_interval_secs: Some(1),
        seed_topology: Some(true),
    }));

    let driver = RefreshDriver::spawn(service.clone(), Duration::from_secs(1));
    tokio::time::sleep(Duration::from_secs(5)).await;
    driver.shutdown().await;

    for queue in service.list_queues() {
        assert_eq!(
            queue.messages_total,
            queue.messages_ready + queue.messages_unacked
        );
    }
}
