//! Simulated telemetry: a periodic tick that nudges queue, consumer, and
//! connection metrics inside bounded jitter, re-derives health annotations,
//! and sweeps alert rules. Keeps the dashboard moving without a broker feed.

use std::{sync::Arc, time::Duration};

use rand::Rng;
use tokio::{task::JoinHandle, time::MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::{
    models::{ConnectionState, QueueState},
    service::Service,
    store::EntityStore,
};

impl EntityStore {
    /// One refresh tick. `messages_total` is re-derived from the perturbed
    /// ready/unacked pair, so the counter invariant holds after every tick.
    pub fn refresh_metrics<R: Rng>(&mut self, rng: &mut R) {
        for queue in &mut self.queues {
            if queue.state != QueueState::Running {
                continue;
            }
            queue.messages_ready = jitter_counter(rng, queue.messages_ready);
            queue.messages_unacked = jitter_counter(rng, queue.messages_unacked);
            queue.messages_total = queue.messages_ready + queue.messages_unacked;
            queue.memory_bytes = jitter_counter(rng, queue.memory_bytes);
            queue.publish_rate = jitter_rate(rng, queue.publish_rate);
            queue.deliver_rate = jitter_rate(rng, queue.deliver_rate);
            queue.ack_rate = jitter_rate(rng, queue.ack_rate);
            queue.redeliver_rate = jitter_rate(rng, queue.redeliver_rate);
            queue.health_score = crate::health::health_score(queue);
        }

        for consumer in &mut self.consumers {
            consumer.deliver_rate = jitter_rate(rng, consumer.deliver_rate);
            consumer.ack_rate = jitter_rate(rng, consumer.ack_rate);
            consumer.avg_processing_ms = jitter_rate(rng, consumer.avg_processing_ms);
            consumer.slow = crate::health::is_slow_consumer(consumer);
        }

        for connection in &mut self.connections {
            if connection.state != ConnectionState::Running {
                continue;
            }
            connection.recv_rate = jitter_rate(rng, connection.recv_rate);
            connection.send_rate = jitter_rate(rng, connection.send_rate);
        }

        self.evaluate_rules();
    }
}

/// Counters drift up to ±10% per tick, with a small floor so quiet queues
/// still show life. Never goes negative.
fn jitter_counter<R: Rng>(rng: &mut R, value: u64) -> u64 {
    let base = (value as f64).max(10.0);
    let delta = base * 0.1 * (rng.gen::<f64>() * 2.0 - 1.0);
    (value as f64 + delta).round().max(0.0) as u64
}

fn jitter_rate<R: Rng>(rng: &mut R, value: f64) -> f64 {
    let base = value.max(1.0);
    (value + base * 0.2 * (rng.gen::<f64>() * 2.0 - 1.0)).max(0.0)
}

/// Background task driving [`Service::refresh_tick`] on a fixed interval.
pub struct RefreshDriver {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl RefreshDriver {
    pub fn spawn(service: Arc<Service>, period: Duration) -> Self {
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        let handle = tokio::spawn(async move {
            let mut tick = tokio::time::interval(period.max(Duration::from_secs(1)));
            tick.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = tick.tick() => service.refresh_tick(),
                }
            }

            tracing::debug!("refresh driver stopped");
        });

        Self { cancel, handle }
    }

    pub async fn shutdown(self) {
        self.cancel.cancel();
        let _ = self.handle.await;
    }
}
