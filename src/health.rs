//! Health heuristics derived from queue and consumer snapshots.

use crate::models::{Consumer, Queue};

/// Score a queue from 0 (unhealthy) to 100 (healthy). Starts at 100 and
/// subtracts independent penalties for backlog, unacked depth, missing
/// consumers, and publish/deliver imbalance.
pub fn health_score(queue: &Queue) -> u8 {
    let mut score: i32 = 100;

    if queue.messages_ready > 10_000 {
        score -= 20;
    } else if queue.messages_ready > 5_000 {
        score -= 10;
    }

    if queue.messages_unacked > 1_000 {
        score -= 15;
    } else if queue.messages_unacked > 500 {
        score -= 5;
    }

    if queue.consumers == 0 {
        score -= 25;
    }

    if queue.publish_rate > 2.0 * queue.deliver_rate {
        score -= 10;
    }

    score.clamp(0, 100) as u8
}

/// A consumer is slow when its average processing time exceeds one second, or
/// when its ack rate falls materially behind its deliver rate.
pub fn is_slow_consumer(consumer: &Consumer) -> bool {
    consumer.avg_processing_ms > 1_000.0
        || (consumer.deliver_rate > 0.0 && consumer.ack_rate < 0.7 * consumer.deliver_rate)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn queue() -> Queue {
        Queue::new("q1", "orders", "/")
    }

    #[test]
    fn idle_queue_with_consumer_is_perfect() {
        let mut q = queue();
        q.consumers = 1;
        assert_eq!(health_score(&q), 100);
    }

    #[test]
    fn no_consumers_costs_25() {
        let q = queue();
        assert_eq!(health_score(&q), 75);
    }

    #[test]
    fn penalties_accumulate() {
        let mut q = queue();
        q.messages_ready = 20_000; // -20
        q.messages_unacked = 2_000; // -15
        q.consumers = 0; // -25
        q.publish_rate = 10.0; // -10 (deliver_rate 0)
        q.messages_total = q.messages_ready + q.messages_unacked;
        assert_eq!(health_score(&q), 30);
    }

    #[test]
    fn backlog_tiers() {
        let mut q = queue();
        q.consumers = 1;

        q.messages_ready = 5_000;
        assert_eq!(health_score(&q), 100);
        q.messages_ready = 5_001;
        assert_eq!(health_score(&q), 90);
        q.messages_ready = 10_001;
        assert_eq!(health_score(&q), 80);
    }

    #[test]
    fn unacked_tiers() {
        let mut q = queue();
        q.consumers = 1;

        q.messages_unacked = 500;
        assert_eq!(health_score(&q), 100);
        q.messages_unacked = 501;
        assert_eq!(health_score(&q), 95);
        q.messages_unacked = 1_001;
        assert_eq!(health_score(&q), 85);
    }

    #[test]
    fn publish_deliver_imbalance() {
        let mut q = queue();
        q.consumers = 1;
        q.publish_rate = 100.0;
        q.deliver_rate = 50.0;
        assert_eq!(health_score(&q), 100);

        q.deliver_rate = 49.0;
        assert_eq!(health_score(&q), 90);
    }

    #[test]
    fn slow_consumer_thresholds() {
        let mut c = Consumer::new("ctag-1", "orders", "ch1", "conn1");
        assert!(!is_slow_consumer(&c));

        c.avg_processing_ms = 1_001.0;
        assert!(is_slow_consumer(&c));

        c.avg_processing_ms = 0.0;
        c.deliver_rate = 100.0;
        c.ack_rate = 69.0;
        assert!(is_slow_consumer(&c));

        c.ack_rate = 70.0;
        assert!(!is_slow_consumer(&c));
    }

    proptest! {
        #[test]
        fn score_is_always_in_bounds(
            ready in any::<u64>(),
            unacked in any::<u64>(),
            consumers in any::<u32>(),
            publish in 0.0f64..1e9,
            deliver in 0.0f64..1e9,
        ) {
            let mut q = queue();
            q.messages_ready = ready;
            q.messages_unacked = unacked;
            q.consumers = consumers;
            q.publish_rate = publish;
            q.deliver_rate = deliver;
            let score = health_score(&q);
            prop_assert!(score <= 100);
        }
    }
}
