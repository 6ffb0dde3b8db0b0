// 配置管理模块

use crate::api::constants::DEFAULT_TIMEOUT_SECS;
use crate::api::executor::TransportOptions;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::fs;

/// 应用配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Alist 客户端配置
    #[serde(default)]
    pub client: ClientConfig,
    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// Alist 客户端配置
///
/// token 与用户名密码二选一：有 token 时直接以已登录状态创建客户端
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// 服务地址，如 http://127.0.0.1:5244
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// 用户名
    #[serde(default)]
    pub username: Option<String>,
    /// 密码
    #[serde(default)]
    pub password: Option<String>,
    /// 两步验证密钥（Base32）
    #[serde(default)]
    pub otp_secret: Option<String>,
    /// 预先签发的 token
    #[serde(default)]
    pub token: Option<String>,
    /// 请求超时（秒），非正数时使用默认值
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: i64,
    /// 跳过 TLS 证书校验
    #[serde(default)]
    pub insecure_skip_verify: bool,
}

fn default_base_url() -> String {
    "http://127.0.0.1:5244".to_string()
}

fn default_timeout_secs() -> i64 {
    DEFAULT_TIMEOUT_SECS as i64
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            username: None,
            password: None,
            otp_secret: None,
            token: None,
            timeout_secs: default_timeout_secs(),
            insecure_skip_verify: false,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    pub fn with_otp_secret(mut self, secret: impl Into<String>) -> Self {
        self.otp_secret = Some(secret.into());
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_timeout(mut self, timeout_secs: i64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn with_insecure_skip_verify(mut self, skip: bool) -> Self {
        self.insecure_skip_verify = skip;
        self
    }

    /// 传输层配置
    pub fn transport_options(&self) -> TransportOptions {
        TransportOptions {
            timeout_secs: self.timeout_secs,
            insecure_skip_verify: self.insecure_skip_verify,
        }
    }

    /// 验证服务地址与认证信息
    pub fn validate(&self) -> Result<()> {
        let url = reqwest::Url::parse(&self.base_url)
            .with_context(|| format!("服务地址格式错误: {}", self.base_url))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            anyhow::bail!("服务地址必须使用 http 或 https: {}", self.base_url);
        }

        let has_token = self.token.as_deref().is_some_and(|t| !t.is_empty());
        let has_credentials = self.username.is_some() && self.password.is_some();
        if !has_token && !has_credentials {
            anyhow::bail!("必须配置 token 或 username/password 之一");
        }

        Ok(())
    }
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// 是否启用日志文件持久化
    #[serde(default = "default_log_enabled")]
    pub enabled: bool,
    /// 日志文件保存目录
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
    /// 日志保留天数（默认 7 天）
    #[serde(default = "default_log_retention_days")]
    pub retention_days: u32,
    /// 日志级别（默认 info）
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_enabled() -> bool {
    false
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("logs")
}

fn default_log_retention_days() -> u32 {
    7
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: default_log_enabled(),
            log_dir: default_log_dir(),
            retention_days: default_log_retention_days(),
            level: default_log_level(),
        }
    }
}

impl AppConfig {
    /// 从文件加载配置
    pub async fn load_from_file(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .context("Failed to read config file")?;

        let config: AppConfig = toml::from_str(&content).context("Failed to parse config file")?;

        config
            .client
            .validate()
            .context("配置文件中的客户端配置验证失败")?;

        Ok(config)
    }

    /// 保存配置到文件
    pub async fn save_to_file(&self, path: &str) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        // 确保父目录存在
        if let Some(parent) = std::path::Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .await
                    .context("Failed to create config directory")?;
            }
        }

        fs::write(path, content)
            .await
            .context("Failed to write config file")?;

        tracing::info!("✓ 配置已保存: {}", path);
        Ok(())
    }

    /// 加载配置，失败时写出默认配置供用户填写
    pub async fn load_or_default(path: &str) -> Self {
        match Self::load_from_file(path).await {
            Ok(config) => {
                tracing::info!("配置文件加载成功: {}", path);
                config
            }
            Err(e) => {
                tracing::warn!("配置文件加载失败，使用默认配置: {:#}", e);
                let default_config = Self::default();

                if !std::path::Path::new(path).exists() {
                    if let Err(e) = default_config.save_to_file(path).await {
                        tracing::error!("保存默认配置失败: {}", e);
                    }
                }

                default_config
            }
        }
    }
}
