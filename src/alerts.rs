//! Alert lifecycle on top of the entity store.
//!
//! Alerts move forward only: active -> acknowledged -> resolved. Dismissal
//! removes the alert outright at any point; there is no tombstone. The
//! collection is most-recent-first and holds at most [`MAX_ALERTS`] entries,
//! with tail eviction happening in the same mutation as the insert.

use chrono::Utc;
use uuid::Uuid;

use crate::{
    models::{Alert, AlertRule, AlertStatus, EventAction, EventKind, TargetKind},
    store::{EntityStore, MAX_ALERTS},
};

impl EntityStore {
    /// Fires a new alert for `rule` against `target`, denormalizing the
    /// rule's name and severity so the alert outlives the rule.
    pub fn trigger_alert(
        &mut self,
        rule: &AlertRule,
        target_kind: TargetKind,
        target: &str,
        value: f64,
    ) -> Alert {
        let alert = Alert {
            id: Uuid::new_v4().to_string(),
            rule_id: rule.id.clone(),
            rule_name: rule.name.clone(),
            severity: rule.severity,
            status: AlertStatus::Active,
            message: format!(
                "{}: {} {} {} on {} {} (observed {})",
                rule.name, rule.metric, rule.operator, rule.threshold, target_kind, target, value
            ),
            target_kind,
            target: target.to_owned(),
            value,
            threshold: rule.threshold,
            triggered_at: Utc::now(),
            acknowledged_by: None,
            acknowledged_at: None,
            resolved_at: None,
        };

        self.alerts.push_front(alert.clone());
        self.alerts.truncate(MAX_ALERTS);
        self.record(
            EventKind::Alert,
            EventAction::Triggered,
            rule.severity,
            alert.message.clone(),
        );

        tracing::warn!(rule = %rule.name, %target, value, "alert triggered");

        alert
    }

    /// Valid only from `active`. Anything else is a no-op.
    pub fn acknowledge_alert(&mut self, id: &str, actor: impl Into<String>) -> Option<Alert> {
        let alert = self.alerts.iter_mut().find(|a| a.id == id)?;
        if alert.status != AlertStatus::Active {
            return None;
        }
        alert.status = AlertStatus::Acknowledged;
        alert.acknowledged_by = Some(actor.into());
        alert.acknowledged_at = Some(Utc::now());
        let out = alert.clone();
        self.record(
            EventKind::Alert,
            EventAction::Acknowledged,
            out.severity,
            format!("alert {} acknowledged", out.rule_name),
        );
        Some(out)
    }

    /// Valid from `active` or `acknowledged`.
    pub fn resolve_alert(&mut self, id: &str) -> Option<Alert> {
        let alert = self.alerts.iter_mut().find(|a| a.id == id)?;
        if alert.status == AlertStatus::Resolved {
            return None;
        }
        alert.status = AlertStatus::Resolved;
        alert.resolved_at = Some(Utc::now());
        let out = alert.clone();
        self.record(
            EventKind::Alert,
            EventAction::Resolved,
            out.severity,
            format!("alert {} resolved", out.rule_name),
        );
        Some(out)
    }

    /// Removes the alert entirely, from any state.
    pub fn dismiss_alert(&mut self, id: &str) -> bool {
        let Some(pos) = self.alerts.iter().position(|a| a.id == id) else {
            return false;
        };
        let alert = self.alerts.remove(pos).expect("position is in bounds");
        self.record(
            EventKind::Alert,
            EventAction::Dismissed,
            alert.severity,
            format!("alert {} dismissed", alert.rule_name),
        );
        true
    }

    /// Sweeps every enabled rule over every queue's current metrics and fires
    /// an alert per satisfied pair. Pairs that already carry a live
    /// (non-resolved) alert are skipped so a sustained breach fires once.
    /// Returns how many alerts were fired.
    pub fn evaluate_rules(&mut self) -> usize {
        let mut fired = Vec::new();
        for rule in self.alert_rules.iter().filter(|r| r.enabled) {
            for queue in &self.queues {
                let value = rule.metric.value_of(queue);
                if rule.is_satisfied(value) && !self.has_live_alert(&rule.id, &queue.name) {
                    fired.push((rule.clone(), queue.name.clone(), value));
                }
            }
        }

        let count = fired.len();
        for (rule, target, value) in fired {
            self.trigger_alert(&rule, TargetKind::Queue, &target, value);
        }
        count
    }

    fn has_live_alert(&self, rule_id: &str, target: &str) -> bool {
        self.alerts
            .iter()
            .any(|a| a.rule_id == rule_id && a.target == target && a.status != AlertStatus::Resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AlertMetric, CompareOp, Queue, Severity};

    fn rule(id: &str, metric: AlertMetric, op: CompareOp, threshold: f64) -> AlertRule {
        AlertRule::new(id, format!("rule-{id}"), metric, op, threshold)
    }

    #[test]
    fn compare_op_evaluation() {
        let cases = vec![
            (CompareOp::Gt, 5.0, 4.0, true),
            (CompareOp::Gt, 4.0, 4.0, false),
            (CompareOp::Lt, 3.0, 4.0, true),
            (CompareOp::Lt, 4.0, 4.0, false),
            (CompareOp::Eq, 4.0, 4.0, true),
            (CompareOp::Eq, 4.1, 4.0, false),
            (CompareOp::Gte, 4.0, 4.0, true),
            (CompareOp::Lte, 4.0, 4.0, true),
            (CompareOp::Lte, 4.1, 4.0, false),
        ];

        for (op, value, threshold, expected) in cases {
            assert_eq!(
                op.evaluate(value, threshold),
                expected,
                "{value} {op} {threshold}"
            );
        }
    }

    #[test]
    fn trigger_inserts_at_head_and_caps_at_100() {
        let mut store = EntityStore::new();
        let r = rule("r1", AlertMetric::MessagesReady, CompareOp::Gt, 10.0);

        for i in 0..110 {
            store.trigger_alert(&r, TargetKind::Queue, &format!("queue-{i}"), 50.0);
        }

        assert_eq!(store.alerts().len(), 100);
        assert_eq!(store.alerts()[0].target, "queue-109");
        // Oldest ten were evicted from the tail.
        assert_eq!(store.alerts()[99].target, "queue-10");
    }

    #[test]
    fn lifecycle_forward_only() {
        let mut store = EntityStore::new();
        let r = rule("r1", AlertMetric::Consumers, CompareOp::Lt, 1.0);
        let alert = store.trigger_alert(&r, TargetKind::Queue, "orders", 0.0);

        let acked = store.acknowledge_alert(&alert.id, "ops").unwrap();
        assert_eq!(acked.status, AlertStatus::Acknowledged);
        assert_eq!(acked.acknowledged_by.as_deref(), Some("ops"));
        assert!(acked.acknowledged_at.is_some());

        // Second acknowledge is a no-op.
        assert!(store.acknowledge_alert(&alert.id, "ops2").is_none());

        let resolved = store.resolve_alert(&alert.id).unwrap();
        assert_eq!(resolved.status, AlertStatus::Resolved);
        assert!(resolved.acknowledged_at.is_some());
        assert!(resolved.resolved_at.is_some());

        assert!(store.resolve_alert(&alert.id).is_none());
    }

    #[test]
    fn resolve_straight_from_active() {
        let mut store = EntityStore::new();
        let r = rule("r1", AlertMetric::Consumers, CompareOp::Lt, 1.0);
        let alert = store.trigger_alert(&r, TargetKind::Queue, "orders", 0.0);

        let resolved = store.resolve_alert(&alert.id).unwrap();
        assert_eq!(resolved.status, AlertStatus::Resolved);
        assert!(resolved.acknowledged_at.is_none());
    }

    #[test]
    fn dismiss_removes_from_any_state() {
        let mut store = EntityStore::new();
        let r = rule("r1", AlertMetric::Consumers, CompareOp::Lt, 1.0);
        let a1 = store.trigger_alert(&r, TargetKind::Queue, "orders", 0.0);
        let a2 = store.trigger_alert(&r, TargetKind::Queue, "payments", 0.0);
        store.acknowledge_alert(&a2.id, "ops");

        assert!(store.dismiss_alert(&a1.id));
        assert!(store.dismiss_alert(&a2.id));
        assert!(store.alerts().is_empty());
        assert!(!store.dismiss_alert(&a1.id));
    }

    #[test]
    fn missing_ids_are_no_ops() {
        let mut store = EntityStore::new();
        assert!(store.acknowledge_alert("nope", "ops").is_none());
        assert!(store.resolve_alert("nope").is_none());
        assert!(!store.dismiss_alert("nope"));
    }

    #[test]
    fn evaluate_rules_fires_once_per_live_breach() {
        let mut store = EntityStore::new();
        let mut queue = Queue::new("q1", "orders", "/");
        queue.messages_ready = 9_000;
        store.add_queue(queue).unwrap();
        store
            .add_alert_rule(rule("r1", AlertMetric::MessagesReady, CompareOp::Gt, 5_000.0))
            .unwrap();

        assert_eq!(store.evaluate_rules(), 1);
        // Still breaching; the live alert suppresses a duplicate.
        assert_eq!(store.evaluate_rules(), 0);
        assert_eq!(store.alerts().len(), 1);

        // Once resolved, a continuing breach may fire again.
        let id = store.alerts()[0].id.clone();
        store.resolve_alert(&id);
        assert_eq!(store.evaluate_rules(), 1);
    }

    #[test]
    fn disabled_rules_never_fire() {
        let mut store = EntityStore::new();
        let mut queue = Queue::new("q1", "orders", "/");
        queue.messages_ready = 9_000;
        store.add_queue(queue).unwrap();
        let mut r = rule("r1", AlertMetric::MessagesReady, CompareOp::Gt, 5_000.0);
        r.enabled = false;
        store.add_alert_rule(r).unwrap();

        assert_eq!(store.evaluate_rules(), 0);
        assert!(store.alerts().is_empty());
    }

    #[test]
    fn alerts_survive_rule_deletion() {
        let mut store = EntityStore::new();
        let r = rule("r1", AlertMetric::Consumers, CompareOp::Lt, 1.0);
        store.add_alert_rule(r.clone()).unwrap();
        store.trigger_alert(&r, TargetKind::Queue, "orders", 0.0);

        assert!(store.delete_alert_rule("r1"));

        assert_eq!(store.alerts().len(), 1);
        assert_eq!(store.alerts()[0].rule_name, "rule-r1");
    }

    #[test]
    fn rule_severity_is_denormalized_at_trigger_time() {
        let mut store = EntityStore::new();
        let mut r = rule("r1", AlertMetric::Consumers, CompareOp::Lt, 1.0);
        r.severity = Severity::Critical;
        let alert = store.trigger_alert(&r, TargetKind::Queue, "orders", 0.0);
        assert_eq!(alert.severity, Severity::Critical);
        assert_eq!(alert.rule_name, "rule-r1");
        assert_eq!(alert.threshold, 1.0);
        assert_eq!(alert.value, 0.0);
    }
}
