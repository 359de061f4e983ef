//! Identity Model

use serde::{Deserialize, Serialize};

use super::Role;

/// 当前操作者身份
///
/// 登录时创建，切换角色时整体替换，登出时清除。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl Identity {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            role,
        }
    }
}
