/// 工单台配置
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | ENVIRONMENT | development | 运行环境 |
/// | ALLOW_ROLE_SWITCH | false | 是否允许演示用的角色切换 |
/// | MUTATION_LATENCY_MS | 0 | 模拟提交延迟(毫秒) |
/// | AUTH_SENTINEL_PASSWORD | (种子口令) | 演示登录口令 |
/// | SEED_FILE | (无) | JSON 种子数据文件 |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_DIR | (无) | 日志文件目录 |
///
/// # 示例
///
/// ```ignore
/// ALLOW_ROLE_SWITCH=true MUTATION_LATENCY_MS=500 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 角色切换开关 (仅演示用途，生产环境强制关闭)
    pub allow_role_switch: bool,
    /// 每次写操作提交前的模拟延迟 (毫秒)，0 表示不延迟
    pub mutation_latency_ms: u64,
    /// 演示凭证解析器接受的固定口令，未设置时使用种子数据中的口令
    pub sentinel_password: Option<String>,
    /// 种子数据文件路径，未设置时使用内置演示数据
    pub seed_file: Option<String>,
    /// 日志级别
    pub log_level: String,
    /// 日志目录
    pub log_dir: Option<String>,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            allow_role_switch: std::env::var("ALLOW_ROLE_SWITCH")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            mutation_latency_ms: std::env::var("MUTATION_LATENCY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0),
            sentinel_password: std::env::var("AUTH_SENTINEL_PASSWORD")
                .ok()
                .filter(|s| !s.is_empty()),
            seed_file: std::env::var("SEED_FILE").ok().filter(|s| !s.is_empty()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|s| !s.is_empty()),
        }
    }

    /// 不读取环境变量的确定性配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(allow_role_switch: bool, mutation_latency_ms: u64) -> Self {
        Self {
            environment: "development".into(),
            allow_role_switch,
            mutation_latency_ms,
            sentinel_password: None,
            seed_file: None,
            log_level: "info".into(),
            log_dir: None,
        }
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// 角色切换是否实际可用
    ///
    /// 生产环境下无论开关如何都不可用
    pub fn role_switch_enabled(&self) -> bool {
        self.allow_role_switch && !self.is_production()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_switch_requires_flag() {
        let config = Config::with_overrides(false, 0);
        assert!(!config.role_switch_enabled());

        let config = Config::with_overrides(true, 0);
        assert!(config.role_switch_enabled());
        assert!(config.is_development());
    }

    #[test]
    fn test_role_switch_never_in_production() {
        let mut config = Config::with_overrides(true, 0);
        config.environment = "production".into();
        assert!(config.is_production());
        assert!(!config.role_switch_enabled());
    }
}
