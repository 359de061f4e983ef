//! 核心模块 - 配置、时钟和状态
//!
//! - [`Config`] - 工单台配置
//! - [`Clock`] - 时间来源
//! - [`DeskState`] - 各存储的共享句柄

pub mod clock;
pub mod config;
pub mod state;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::Config;
pub use state::DeskState;
