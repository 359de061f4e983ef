//! 会话存储
//!
//! 持有零或一个当前身份，是"谁在操作"的唯一来源。

use parking_lot::RwLock;
use shared::models::{Identity, Role, RoleProfiles};
use uuid::Uuid;

use super::CredentialResolver;
use crate::security_log;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Clone)]
struct Session {
    id: Uuid,
    identity: Identity,
}

/// Session store
///
/// Each instance is independent; tests and concurrent demo sessions each
/// build their own.
pub struct SessionStore {
    current: RwLock<Option<Session>>,
    resolver: Box<dyn CredentialResolver>,
    profiles: RoleProfiles,
    allow_role_switch: bool,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("current", &self.current.read().as_ref().map(|s| s.id))
            .field("resolver", &"<CredentialResolver>")
            .field("allow_role_switch", &self.allow_role_switch)
            .finish()
    }
}

impl SessionStore {
    pub fn new(
        resolver: Box<dyn CredentialResolver>,
        profiles: RoleProfiles,
        allow_role_switch: bool,
    ) -> Self {
        Self {
            current: RwLock::new(None),
            resolver,
            profiles,
            allow_role_switch,
        }
    }

    /// 登录
    ///
    /// 失败时返回 `InvalidCredentials`，且不影响已有会话。
    pub fn login(&self, email: &str, password: &str) -> AppResult<Identity> {
        match self.resolver.resolve(email, password) {
            Ok(identity) => {
                let session = Session {
                    id: Uuid::new_v4(),
                    identity: identity.clone(),
                };
                security_log!(
                    "INFO",
                    "login_succeeded",
                    session_id = session.id.to_string(),
                    user_id = identity.id.as_str(),
                    user_role = identity.role.as_str()
                );
                *self.current.write() = Some(session);
                Ok(identity)
            }
            Err(e) => {
                security_log!(
                    "WARN",
                    "login_failed",
                    email = mask_email(email).as_str(),
                    category = e.code.category().name(),
                    error = e.message.as_str()
                );
                Err(e)
            }
        }
    }

    /// 登出，幂等
    pub fn logout(&self) {
        if let Some(session) = self.current.write().take() {
            security_log!(
                "INFO",
                "logout",
                session_id = session.id.to_string(),
                user_id = session.identity.id.as_str()
            );
        }
    }

    /// 演示用角色切换，不重新认证
    ///
    /// 未开启开关时返回 `FeatureDisabled`，当前身份不变。
    pub fn switch_role(&self, role: Role) -> AppResult<Identity> {
        if !self.allow_role_switch {
            security_log!("WARN", "role_switch_blocked", requested_role = role.as_str());
            return Err(AppError::feature_disabled("role switching"));
        }
        let identity = self.profiles.get(role).clone();
        let session = Session {
            id: Uuid::new_v4(),
            identity: identity.clone(),
        };
        security_log!(
            "WARN",
            "role_switched",
            session_id = session.id.to_string(),
            user_id = identity.id.as_str(),
            user_role = identity.role.as_str()
        );
        *self.current.write() = Some(session);
        Ok(identity)
    }

    pub fn current_identity(&self) -> Option<Identity> {
        self.current.read().as_ref().map(|s| s.identity.clone())
    }

    /// 当前身份，未登录时返回 `NotAuthenticated`
    pub fn require_identity(&self) -> AppResult<Identity> {
        self.current_identity().ok_or_else(AppError::not_authenticated)
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.read().is_some()
    }
}

/// Keep the first character and the domain: `john@example.com` → `j***@example.com`
fn mask_email(email: &str) -> String {
    match email.trim().split_once('@') {
        Some((local, domain)) => match local.chars().next() {
            Some(first) => format!("{}***@{}", first, domain),
            None => format!("***@{}", domain),
        },
        None => "***".to_string(),
    }
}
