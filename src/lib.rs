// Alist Rust SDK
// Alist 文件管理 API 客户端库

// 认证模块
pub mod auth;

// 配置管理模块
pub mod config;

// 错误类型
pub mod error;

// 日志系统
pub mod logging;

// Alist API 模块
pub mod api;

// 导出常用类型
pub use api::{
    AlistClient, ApiEnvelope, Dir, File, FileKind, ListData, RequestExecutor, Settings,
    TransportOptions, TwoFactorSecret, User,
};
pub use auth::{AuthState, Credentials};
pub use config::{AppConfig, ClientConfig, LogConfig};
pub use error::{AlistError, TransportError};
