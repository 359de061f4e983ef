use std::sync::Arc;

use crate::auth::{DemoCredentialResolver, SessionStore};
use crate::core::Config;
use crate::core::clock::SystemClock;
use crate::seed::SeedData;
use crate::tickets::{TicketService, TicketStore};
use crate::users::UserDirectory;
use crate::utils::AppResult;

/// 工单台状态 - 持有各存储的共享引用
///
/// 没有进程级单例：每个 `DeskState` 都是独立的会话与数据集，
/// 测试可以各自构造互不干扰。使用 Arc 实现浅拷贝。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | sessions | Arc<SessionStore> | 当前身份 |
/// | tickets | Arc<TicketService> | 工单读写 |
/// | users | Arc<UserDirectory> | 用户目录 |
#[derive(Clone, Debug)]
pub struct DeskState {
    pub config: Config,
    pub sessions: Arc<SessionStore>,
    pub tickets: Arc<TicketService>,
    pub users: Arc<UserDirectory>,
}

impl DeskState {
    /// 初始化状态
    ///
    /// 按顺序：
    /// 1. 种子数据 (`SEED_FILE` 或内置演示数据)
    /// 2. 会话存储 (演示凭证解析器)
    /// 3. 工单服务与用户目录
    pub fn initialize(config: &Config) -> AppResult<Self> {
        let seed = match &config.seed_file {
            Some(path) => SeedData::from_json_file(path)?,
            None => SeedData::demo(),
        };
        Self::from_seed(config, seed)
    }

    /// 使用给定种子构建状态
    ///
    /// `Config::sentinel_password` 优先于种子中的口令。
    pub fn from_seed(config: &Config, seed: SeedData) -> AppResult<Self> {
        let password = config.sentinel_password.clone().unwrap_or(seed.password);
        let resolver = DemoCredentialResolver::new(password, seed.profiles.clone());
        let sessions = SessionStore::new(
            Box::new(resolver),
            seed.profiles,
            config.role_switch_enabled(),
        );
        let store = TicketStore::from_seed(seed.tickets, Box::new(SystemClock))?;
        let ticket_count = store.len();
        let tickets = TicketService::new(store, config.mutation_latency_ms);
        let users = UserDirectory::new(seed.users)?;

        tracing::info!(
            environment = %config.environment,
            tickets = ticket_count,
            role_switch = config.role_switch_enabled(),
            latency_ms = config.mutation_latency_ms,
            "Ticket desk state initialized"
        );

        Ok(Self {
            config: config.clone(),
            sessions: Arc::new(sessions),
            tickets: Arc::new(tickets),
            users: Arc::new(users),
        })
    }
}
