//! 工单模块
//!
//! - [`TicketStore`] - 工单集合的唯一所有者，负责顺序、时间戳与评论不变量
//! - [`TicketService`] - 带权限校验、重复提交保护和模拟延迟的异步入口
//! - [`filter`] - 仪表盘过滤与统计

pub mod filter;
pub mod inflight;
pub mod service;
pub mod store;

pub use filter::{Dashboard, DashboardScope, TicketFilter, TicketStats};
pub use inflight::{InFlight, InFlightGuard};
pub use service::TicketService;
pub use store::TicketStore;
