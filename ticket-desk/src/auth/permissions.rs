//! Permission Definitions
//!
//! 角色能力矩阵 - 所有守卫都必须查询这里，不得自行重新编码规则。
//!
//! | 操作 | user | support | admin |
//! |------|------|---------|-------|
//! | 查看自己的工单 | ✓ | ✓ | ✓ |
//! | 查看全部工单 | ✗ | ✓ | ✓ |
//! | 创建工单 | ✓ | ✓ | ✓ |
//! | 查看/评论任意工单 | 仅作者 | ✓ | ✓ |
//! | 修改工单状态 | ✗ | ✓ | ✓ |
//! | 指派工单 | ✗ | ✗ | ✓ |
//! | 用户管理 | ✗ | ✗ | ✓ |

use shared::models::{Identity, Role, Ticket};

use crate::security_log;
use crate::utils::{AppError, AppResult};

/// Role-gated action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ViewOwnTickets,
    ViewAllTickets,
    CreateTicket,
    /// View or comment on a ticket regardless of authorship
    CommentOnTicket,
    ChangeStatus,
    AssignTicket,
    /// List/add/edit/delete/role-change of directory users
    ManageUsers,
}

impl Action {
    pub const ALL: [Action; 7] = [
        Action::ViewOwnTickets,
        Action::ViewAllTickets,
        Action::CreateTicket,
        Action::CommentOnTicket,
        Action::ChangeStatus,
        Action::AssignTicket,
        Action::ManageUsers,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::ViewOwnTickets => "tickets:view_own",
            Action::ViewAllTickets => "tickets:view_all",
            Action::CreateTicket => "tickets:create",
            Action::CommentOnTicket => "tickets:comment",
            Action::ChangeStatus => "tickets:status",
            Action::AssignTicket => "tickets:assign",
            Action::ManageUsers => "users:manage",
        }
    }
}

/// Capability matrix lookup
pub fn role_can(role: Role, action: Action) -> bool {
    match action {
        Action::ViewOwnTickets | Action::CreateTicket => true,
        Action::ViewAllTickets | Action::CommentOnTicket | Action::ChangeStatus => {
            matches!(role, Role::Support | Role::Admin)
        }
        Action::AssignTicket | Action::ManageUsers => role == Role::Admin,
    }
}

/// Edit access to a specific ticket
///
/// (role ∈ {support, admin}) OR (role == user AND ticket.author_id == identity.id)
pub fn can_access_ticket(identity: &Identity, ticket: &Ticket) -> bool {
    role_can(identity.role, Action::CommentOnTicket) || ticket.is_authored_by(&identity.id)
}

/// 检查角色能力，拒绝时记录安全日志
pub fn authorize(identity: &Identity, action: Action) -> AppResult<()> {
    if role_can(identity.role, action) {
        return Ok(());
    }
    security_log!(
        "WARN",
        "permission_denied",
        user_id = identity.id.as_str(),
        user_role = identity.role.as_str(),
        required_permission = action.as_str()
    );
    let err = if matches!(action, Action::AssignTicket | Action::ManageUsers) {
        AppError::new(shared::ErrorCode::AdminRequired)
    } else {
        AppError::permission_denied(format!("Permission denied: {}", action.as_str()))
    };
    Err(err.with_detail("permission", action.as_str()))
}

/// 检查对指定工单的访问权，拒绝时记录安全日志
pub fn authorize_ticket(identity: &Identity, ticket: &Ticket) -> AppResult<()> {
    if can_access_ticket(identity, ticket) {
        return Ok(());
    }
    security_log!(
        "WARN",
        "ticket_access_denied",
        user_id = identity.id.as_str(),
        user_role = identity.role.as_str(),
        ticket_id = ticket.id.as_str()
    );
    Err(
        AppError::permission_denied("You can only access tickets you created")
            .with_detail("ticket_id", ticket.id.as_str()),
    )
}
