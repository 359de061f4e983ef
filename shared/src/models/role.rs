//! Role Model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Identity;

/// 角色 (RBAC)
///
/// 决定工单可见范围和可执行的操作，权限矩阵见 `ticket-desk` 的 `auth::permissions`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Support,
    Admin,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::User, Role::Support, Role::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Support => "support",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" => Ok(Role::User),
            "support" => Ok(Role::Support),
            "admin" => Ok(Role::Admin),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

/// One canned identity per role
///
/// Used by the demo credential resolver and by role switching.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleProfiles {
    pub user: Identity,
    pub support: Identity,
    pub admin: Identity,
}

impl RoleProfiles {
    pub fn get(&self, role: Role) -> &Identity {
        match role {
            Role::User => &self.user,
            Role::Support => &self.support,
            Role::Admin => &self.admin,
        }
    }

    /// Each profile must carry the role it is filed under
    pub fn is_consistent(&self) -> bool {
        Role::ALL.iter().all(|role| self.get(*role).role == *role)
    }
}
