//! 认证授权模块
//!
//! - [`SessionStore`] - 当前身份与会话
//! - [`CredentialResolver`] - 可替换的凭证解析
//! - [`permissions`] - 角色能力矩阵与工单访问判定

pub mod credentials;
pub mod permissions;
pub mod session;

pub use credentials::{CredentialResolver, DemoCredentialResolver, role_from_email};
pub use permissions::{Action, authorize, authorize_ticket, can_access_ticket, role_can};
pub use session::SessionStore;
