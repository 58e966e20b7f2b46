//! The service facade over the entity store.
//!
//! One logical mutation runs to completion (cascades included) under the
//! write lock before the next begins; readers take the read lock and get
//! cloned snapshots. The refresh tick goes through the same write lock as
//! every other mutation.

use std::collections::VecDeque;

use parking_lot::RwLock;

use crate::{
    config::Config,
    error::Error,
    models::{
        Alert, AlertRule, AlertRuleUpdate, Binding, Channel, ChannelUpdate, Connection,
        ConnectionUpdate, Consumer, ConsumerUpdate, Event, Exchange, ExchangeUpdate, Permission,
        PermissionUpdate, Policy, PolicyUpdate, Queue, QueueUpdate, TargetKind, User, UserUpdate,
        VirtualHost, VirtualHostUpdate,
    },
    store::EntityStore,
};

pub struct Service {
    state: RwLock<EntityStore>,
    config: Config,
}

impl Service {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        let mut store = EntityStore::new();
        if config.seed_topology() {
            crate::seed::seed(&mut store);
        }

        Self {
            state: RwLock::new(store),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// One simulated-telemetry tick; see `refresh`.
    pub fn refresh_tick(&self) {
        let mut rng = rand::thread_rng();
        self.state.write().refresh_metrics(&mut rng);
    }

    // ---- queues ----

    pub fn list_queues(&self) -> Vec<Queue> {
        self.state.read().queues().to_vec()
    }

    pub fn get_queue(&self, id: impl AsRef<str>) -> Option<Queue> {
        self.state.read().queue(id.as_ref()).cloned()
    }

    pub fn create_queue(&self, queue: Queue) -> Result<Queue, Error> {
        self.state.write().add_queue(queue)
    }

    pub fn update_queue(&self, id: impl AsRef<str>, update: QueueUpdate) -> Option<Queue> {
        self.state.write().update_queue(id.as_ref(), update)
    }

    pub fn delete_queue(&self, id: impl AsRef<str>) -> bool {
        self.state.write().delete_queue(id.as_ref())
    }

    pub fn purge_queue(&self, id: impl AsRef<str>) -> Option<Queue> {
        self.state.write().purge_queue(id.as_ref())
    }

    // ---- exchanges ----

    pub fn list_exchanges(&self) -> Vec<Exchange> {
        self.state.read().exchanges().to_vec()
    }

    pub fn get_exchange(&self, id: impl AsRef<str>) -> Option<Exchange> {
        self.state.read().exchange(id.as_ref()).cloned()
    }

    pub fn create_exchange(&self, exchange: Exchange) -> Result<Exchange, Error> {
        self.state.write().add_exchange(exchange)
    }

    pub fn update_exchange(&self, id: impl AsRef<str>, update: ExchangeUpdate) -> Option<Exchange> {
        self.state.write().update_exchange(id.as_ref(), update)
    }

    pub fn delete_exchange(&self, id: impl AsRef<str>) -> bool {
        self.state.write().delete_exchange(id.as_ref())
    }

    // ---- bindings ----

    pub fn list_bindings(&self) -> Vec<Binding> {
        self.state.read().bindings().to_vec()
    }

    pub fn get_binding(&self, id: impl AsRef<str>) -> Option<Binding> {
        self.state.read().binding(id.as_ref()).cloned()
    }

    pub fn create_binding(&self, binding: Binding) -> Result<Binding, Error> {
        self.state.write().add_binding(binding)
    }

    pub fn delete_binding(&self, id: impl AsRef<str>) -> bool {
        self.state.write().delete_binding(id.as_ref())
    }

    pub fn match_bindings(
        &self,
        exchange_id: impl AsRef<str>,
        routing_key: impl AsRef<str>,
    ) -> Vec<Binding> {
        self.state
            .read()
            .match_bindings(exchange_id.as_ref(), routing_key.as_ref())
            .into_iter()
            .cloned()
            .collect()
    }

    // ---- connections, channels, consumers ----

    pub fn list_connections(&self) -> Vec<Connection> {
        self.state.read().connections().to_vec()
    }

    pub fn get_connection(&self, id: impl AsRef<str>) -> Option<Connection> {
        self.state.read().connection(id.as_ref()).cloned()
    }

    pub fn create_connection(&self, connection: Connection) -> Result<Connection, Error> {
        self.state.write().add_connection(connection)
    }

    pub fn update_connection(
        &self,
        id: impl AsRef<str>,
        update: ConnectionUpdate,
    ) -> Option<Connection> {
        self.state.write().update_connection(id.as_ref(), update)
    }

    pub fn delete_connection(&self, id: impl AsRef<str>) -> bool {
        self.state.write().delete_connection(id.as_ref())
    }

    pub fn list_channels(&self) -> Vec<Channel> {
        self.state.read().channels().to_vec()
    }

    pub fn get_channel(&self, id: impl AsRef<str>) -> Option<Channel> {
        self.state.read().channel(id.as_ref()).cloned()
    }

    pub fn create_channel(&self, channel: Channel) -> Result<Channel, Error> {
        self.state.write().add_channel(channel)
    }

    pub fn update_channel(&self, id: impl AsRef<str>, update: ChannelUpdate) -> Option<Channel> {
        self.state.write().update_channel(id.as_ref(), update)
    }

    pub fn delete_channel(&self, id: impl AsRef<str>) -> bool {
        self.state.write().delete_channel(id.as_ref())
    }

    pub fn list_consumers(&self) -> Vec<Consumer> {
        self.state.read().consumers().to_vec()
    }

    pub fn get_consumer(&self, tag: impl AsRef<str>) -> Option<Consumer> {
        self.state.read().consumer(tag.as_ref()).cloned()
    }

    pub fn create_consumer(&self, consumer: Consumer) -> Result<Consumer, Error> {
        self.state.write().add_consumer(consumer)
    }

    pub fn update_consumer(&self, tag: impl AsRef<str>, update: ConsumerUpdate) -> Option<Consumer> {
        self.state.write().update_consumer(tag.as_ref(), update)
    }

    pub fn delete_consumer(&self, tag: impl AsRef<str>) -> bool {
        self.state.write().delete_consumer(tag.as_ref())
    }

    // ---- vhosts, users, permissions, policies ----

    pub fn list_vhosts(&self) -> Vec<VirtualHost> {
        self.state.read().vhosts().to_vec()
    }

    pub fn get_vhost(&self, id: impl AsRef<str>) -> Option<VirtualHost> {
        self.state.read().vhost(id.as_ref()).cloned()
    }

    pub fn create_vhost(&self, vhost: VirtualHost) -> Result<VirtualHost, Error> {
        self.state.write().add_vhost(vhost)
    }

    pub fn update_vhost(&self, id: impl AsRef<str>, update: VirtualHostUpdate) -> Option<VirtualHost> {
        self.state.write().update_vhost(id.as_ref(), update)
    }

    pub fn delete_vhost(&self, id: impl AsRef<str>) -> bool {
        self.state.write().delete_vhost(id.as_ref())
    }

    pub fn list_users(&self) -> Vec<User> {
        self.state.read().users().to_vec()
    }

    pub fn get_user(&self, id: impl AsRef<str>) -> Option<User> {
        self.state.read().user(id.as_ref()).cloned()
    }

    pub fn create_user(&self, user: User) -> Result<User, Error> {
        self.state.write().add_user(user)
    }

    pub fn update_user(&self, id: impl AsRef<str>, update: UserUpdate) -> Option<User> {
        self.state.write().update_user(id.as_ref(), update)
    }

    pub fn delete_user(&self, id: impl AsRef<str>) -> bool {
        self.state.write().delete_user(id.as_ref())
    }

    pub fn list_permissions(&self) -> Vec<Permission> {
        self.state.read().permissions().to_vec()
    }

    pub fn get_permission(&self, id: impl AsRef<str>) -> Option<Permission> {
        self.state.read().permission(id.as_ref()).cloned()
    }

    pub fn create_permission(&self, permission: Permission) -> Result<Permission, Error> {
        self.state.write().add_permission(permission)
    }

    pub fn update_permission(
        &self,
        id: impl AsRef<str>,
        update: PermissionUpdate,
    ) -> Option<Permission> {
        self.state.write().update_permission(id.as_ref(), update)
    }

    pub fn delete_permission(&self, id: impl AsRef<str>) -> bool {
        self.state.write().delete_permission(id.as_ref())
    }

    pub fn list_policies(&self) -> Vec<Policy> {
        self.state.read().policies().to_vec()
    }

    pub fn get_policy(&self, id: impl AsRef<str>) -> Option<Policy> {
        self.state.read().policy(id.as_ref()).cloned()
    }

    pub fn create_policy(&self, policy: Policy) -> Result<Policy, Error> {
        self.state.write().add_policy(policy)
    }

    pub fn update_policy(&self, id: impl AsRef<str>, update: PolicyUpdate) -> Option<Policy> {
        self.state.write().update_policy(id.as_ref(), update)
    }

    pub fn delete_policy(&self, id: impl AsRef<str>) -> bool {
        self.state.write().delete_policy(id.as_ref())
    }

    // ---- alert rules, alerts, events ----

    pub fn list_alert_rules(&self) -> Vec<AlertRule> {
        self.state.read().alert_rules().to_vec()
    }

    pub fn get_alert_rule(&self, id: impl AsRef<str>) -> Option<AlertRule> {
        self.state.read().alert_rule(id.as_ref()).cloned()
    }

    pub fn create_alert_rule(&self, rule: AlertRule) -> Result<AlertRule, Error> {
        self.state.write().add_alert_rule(rule)
    }

    pub fn update_alert_rule(
        &self,
        id: impl AsRef<str>,
        update: AlertRuleUpdate,
    ) -> Option<AlertRule> {
        self.state.write().update_alert_rule(id.as_ref(), update)
    }

    pub fn delete_alert_rule(&self, id: impl AsRef<str>) -> bool {
        self.state.write().delete_alert_rule(id.as_ref())
    }

    pub fn list_alerts(&self) -> VecDeque<Alert> {
        self.state.read().alerts().clone()
    }

    pub fn get_alert(&self, id: impl AsRef<str>) -> Option<Alert> {
        self.state.read().alert(id.as_ref()).cloned()
    }

    pub fn trigger_alert(
        &self,
        rule: &AlertRule,
        target_kind: TargetKind,
        target: impl AsRef<str>,
        value: f64,
    ) -> Alert {
        self.state
            .write()
            .trigger_alert(rule, target_kind, target.as_ref(), value)
    }

    pub fn acknowledge_alert(&self, id: impl AsRef<str>, actor: impl Into<String>) -> Option<Alert> {
        self.state.write().acknowledge_alert(id.as_ref(), actor)
    }

    pub fn resolve_alert(&self, id: impl AsRef<str>) -> Option<Alert> {
        self.state.write().resolve_alert(id.as_ref())
    }

    pub fn dismiss_alert(&self, id: impl AsRef<str>) -> bool {
        self.state.write().dismiss_alert(id.as_ref())
    }

    pub fn evaluate_rules(&self) -> usize {
        self.state.write().evaluate_rules()
    }

    pub fn list_events(&self) -> VecDeque<Event> {
        self.state.read().events().clone()
    }

    // ---- selection ----

    pub fn select_queue(&self, id: Option<String>) {
        self.state.write().set_selected_queue(id);
    }

    pub fn selected_queue(&self) -> Option<String> {
        self.state.read().selected_queue().map(str::to_owned)
    }

    pub fn select_exchange(&self, id: Option<String>) {
        self.state.write().set_selected_exchange(id);
    }

    pub fn selected_exchange(&self) -> Option<String> {
        self.state.read().selected_exchange().map(str::to_owned)
    }

    pub fn select_connection(&self, id: Option<String>) {
        self.state.write().set_selected_connection(id);
    }

    pub fn selected_connection(&self) -> Option<String> {
        self.state.read().selected_connection().map(str::to_owned)
    }
}

impl Default for Service {
    fn default() -> Self {
        Self::new()
    }
}
