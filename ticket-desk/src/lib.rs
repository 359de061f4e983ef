//! Ticket Desk - 工单台策略核心
//!
//! # 架构概述
//!
//! 与界面无关的状态与权限核心：
//!
//! - **认证** (`auth`): 会话、可替换的凭证解析、角色能力矩阵
//! - **工单** (`tickets`): 工单存储、异步服务、仪表盘过滤
//! - **用户目录** (`users`): 管理员用户管理
//! - **种子数据** (`seed`): 内置演示数据或 JSON 文件
//!
//! # 模块结构
//!
//! ```text
//! ticket-desk/src/
//! ├── core/          # 配置、时钟、状态
//! ├── auth/          # 会话、凭证、权限
//! ├── tickets/       # 存储、服务、过滤
//! ├── users/         # 用户目录
//! ├── utils/         # 日志、校验
//! └── seed.rs        # 种子数据
//! ```
//!
//! # 示例
//!
//! ```no_run
//! use shared::models::TicketCreate;
//! use ticket_desk::{Config, DeskState};
//!
//! # async fn demo() -> ticket_desk::AppResult<()> {
//! let state = DeskState::initialize(&Config::with_overrides(false, 0))?;
//! let me = state.sessions.login("john@example.com", "password")?;
//! let ticket = state
//!     .tickets
//!     .create_ticket(
//!         &me,
//!         TicketCreate {
//!             subject: "VPN down".into(),
//!             description: "Cannot reach the office network".into(),
//!             priority: Default::default(),
//!         },
//!     )
//!     .await?;
//! assert_eq!(state.tickets.visible_tickets(&me)[0].id, ticket.id);
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod core;
pub mod seed;
pub mod tickets;
pub mod users;
pub mod utils;

// Re-export 公共类型
pub use auth::{Action, CredentialResolver, SessionStore, can_access_ticket, role_can};
pub use core::{Config, DeskState};
pub use seed::SeedData;
pub use tickets::{Dashboard, TicketFilter, TicketService, TicketStore};
pub use users::UserDirectory;
pub use utils::{AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - 认证与权限事件
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// 设置运行环境: 加载 `.env`，读取配置，按配置初始化日志
pub fn setup_environment() -> Config {
    dotenv::dotenv().ok();
    let config = Config::from_env();
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());
    config
}

pub fn print_banner() {
    println!(
        r#"
 _____ _      _        _     ____            _
|_   _(_) ___| | _____| |_  |  _ \  ___  ___| | __
  | | | |/ __| |/ / _ \ __| | | | |/ _ \/ __| |/ /
  | | | | (__|   <  __/ |_  | |_| |  __/\__ \   <
  |_| |_|\___|_|\_\___|\__| |____/ \___||___/_|\_\
    "#
    );
}
