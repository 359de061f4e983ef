//! 凭证解析
//!
//! 登录流程先解析角色，再创建会话。解析器是可替换的 trait，
//! 真实认证只需提供新的实现，不影响会话和工单存储的接口。

use shared::models::{Identity, Role, RoleProfiles};

use crate::utils::{AppError, AppResult};

/// Resolves login credentials into an identity
pub trait CredentialResolver: Send + Sync {
    fn resolve(&self, email: &str, password: &str) -> AppResult<Identity>;
}

/// 根据邮箱内容推断角色
///
/// 包含 "admin" → admin；否则包含 "support" → support；其余为 user。
pub fn role_from_email(email: &str) -> Role {
    if email.contains("admin") {
        Role::Admin
    } else if email.contains("support") {
        Role::Support
    } else {
        Role::User
    }
}

/// 演示用凭证解析器
///
/// 任何邮箱配合固定口令即可登录，返回对应角色的预置身份。
/// 仅用于演示，不能用于真实部署。
#[derive(Debug, Clone)]
pub struct DemoCredentialResolver {
    sentinel_password: String,
    profiles: RoleProfiles,
}

impl DemoCredentialResolver {
    pub fn new(sentinel_password: impl Into<String>, profiles: RoleProfiles) -> Self {
        Self {
            sentinel_password: sentinel_password.into(),
            profiles,
        }
    }
}

impl CredentialResolver for DemoCredentialResolver {
    fn resolve(&self, email: &str, password: &str) -> AppResult<Identity> {
        let role = role_from_email(email);
        if password != self.sentinel_password {
            return Err(AppError::invalid_credentials());
        }
        Ok(self.profiles.get(role).clone())
    }
}
