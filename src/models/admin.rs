use serde::{Deserialize, Serialize};

use super::topology::Arguments;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VirtualHost {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VirtualHostUpdate {
    pub description: Option<String>,
}

impl VirtualHostUpdate {
    pub fn apply(self, vhost: &mut VirtualHost) {
        if let Some(description) = self.description {
            vhost.description = description;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    /// Role tags (`administrator`, `monitoring`, ...).
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserUpdate {
    pub tags: Option<Vec<String>>,
}

impl UserUpdate {
    pub fn apply(self, user: &mut User) {
        if let Some(tags) = self.tags {
            user.tags = tags;
        }
    }
}

/// Grants a user configure/write/read patterns on one vhost. Join entity;
/// deleting it cascades nowhere.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Permission {
    pub id: String,
    pub user_id: String,
    pub vhost: String,
    pub configure: String,
    pub write: String,
    pub read: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PermissionUpdate {
    pub configure: Option<String>,
    pub write: Option<String>,
    pub read: Option<String>,
}

impl PermissionUpdate {
    pub fn apply(self, permission: &mut Permission) {
        if let Some(configure) = self.configure {
            permission.configure = configure;
        }
        if let Some(write) = self.write {
            permission.write = write;
        }
        if let Some(read) = self.read {
            permission.read = read;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PolicyTarget {
    Queues,
    Exchanges,
    #[default]
    All,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Policy {
    pub id: String,
    pub name: String,
    pub vhost: String,
    /// Name pattern the policy applies to.
    pub pattern: String,
    pub apply_to: PolicyTarget,
    #[serde(default)]
    pub definition: Arguments,
    pub priority: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PolicyUpdate {
    pub pattern: Option<String>,
    pub apply_to: Option<PolicyTarget>,
    pub definition: Option<Arguments>,
    pub priority: Option<i32>,
}

impl PolicyUpdate {
    pub fn apply(self, policy: &mut Policy) {
        if let Some(pattern) = self.pattern {
            policy.pattern = pattern;
        }
        if let Some(apply_to) = self.apply_to {
            policy.apply_to = apply_to;
        }
        if let Some(definition) = self.definition {
            policy.definition = definition;
        }
        if let Some(priority) = self.priority {
            policy.priority = priority;
        }
    }
}
