//! 用户目录 (管理员)

pub mod directory;

pub use directory::{UserDirectory, UserFilter, UserStats};
