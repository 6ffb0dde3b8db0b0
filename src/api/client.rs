// Alist 客户端实现

use crate::api::constants::*;
use crate::api::executor::{ApiRequest, RequestExecutor};
use crate::api::request::*;
use crate::api::types::{ApiEnvelope, Dir, File, ListData, LoginData, Settings, TwoFactorSecret, User};
use crate::auth::{otp, AuthState, Credentials};
use crate::config::ClientConfig;
use crate::error::{AlistError, Result};
use parking_lot::RwLock;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Alist 客户端
///
/// token 保存在读写锁中，每次请求时复制一份用于组装请求头；
/// 多个并发登录之间的先后顺序由调用方自行协调。
#[derive(Debug)]
pub struct AlistClient {
    /// 服务地址（不含末尾 /）
    base_url: String,
    /// 登录凭证
    credentials: Option<Credentials>,
    /// 登录状态
    auth: RwLock<AuthState>,
    /// 请求执行器
    executor: RequestExecutor,
}

impl AlistClient {
    /// 按配置创建客户端
    ///
    /// 配置中带 token 时直接进入已登录状态
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let executor = RequestExecutor::new(config.transport_options())?;

        let credentials = match (&config.username, &config.password) {
            (Some(username), Some(password)) => {
                let mut creds = Credentials::new(username.clone(), password.clone());
                creds.otp_secret = config.otp_secret.clone().filter(|s| !s.is_empty());
                Some(creds)
            }
            _ => None,
        };

        let auth = match &config.token {
            Some(token) => AuthState::from_token(token.clone()),
            None => AuthState::Anonymous,
        };

        info!(
            "初始化 Alist 客户端: base_url={}, 凭证={}, token={}",
            config.base_url,
            if credentials.is_some() { "已设置" } else { "未设置" },
            if auth.is_authenticated() { "已设置" } else { "未设置" }
        );

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            credentials,
            auth: RwLock::new(auth),
            executor,
        })
    }

    /// 使用用户名密码创建客户端
    pub fn with_credentials(
        base_url: &str,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self> {
        let config = ClientConfig::new(base_url).with_credentials(username, password);
        Self::new(&config)
    }

    /// 使用已签发的 token 创建客户端
    pub fn with_token(base_url: &str, token: impl Into<String>) -> Result<Self> {
        let config = ClientConfig::new(base_url).with_token(token);
        Self::new(&config)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 当前 token
    pub fn token(&self) -> Option<String> {
        self.auth.read().token().map(str::to_string)
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth.read().is_authenticated()
    }

    /// 当前登录状态快照
    pub fn auth_state(&self) -> AuthState {
        self.auth.read().clone()
    }

    /// 手动设置 token
    pub fn set_token(&self, token: impl Into<String>) {
        *self.auth.write() = AuthState::from_token(token);
    }

    /// 清除 token，回到未登录状态
    pub fn clear_token(&self) {
        *self.auth.write() = AuthState::Anonymous;
    }

    fn url(&self, route: &str) -> String {
        format!("{}{}", self.base_url, route)
    }

    fn require_token(&self) -> Result<String> {
        self.token().ok_or(AlistError::AuthRequired)
    }

    // =====================================================
    // 请求辅助
    // =====================================================

    /// 发送请求并解析信封
    async fn send(&self, request: ApiRequest, route: &'static str) -> Result<ApiEnvelope> {
        let body = self.executor.execute(request).await?;
        let envelope = ApiEnvelope::from_slice(&body)?;
        if !envelope.is_success() {
            warn!(
                "接口返回错误: route={}, code={}, message={}",
                route, envelope.code, envelope.message
            );
        }
        Ok(envelope)
    }

    async fn post_envelope<B: Serialize>(
        &self,
        route: &'static str,
        body: &B,
        token: Option<String>,
    ) -> Result<ApiEnvelope> {
        let payload = serde_json::to_vec(body)?;
        let request = ApiRequest::post(self.url(route), payload).with_token(token);
        self.send(request, route).await
    }

    /// 已登录 POST，返回 data
    async fn post_data<B: Serialize, T: DeserializeOwned>(
        &self,
        route: &'static str,
        body: &B,
    ) -> Result<T> {
        let token = self.require_token()?;
        self.post_envelope(route, body, Some(token))
            .await?
            .into_data(route)
    }

    /// 已登录 POST，data 允许为 null
    async fn post_data_optional<B: Serialize, T: DeserializeOwned>(
        &self,
        route: &'static str,
        body: &B,
    ) -> Result<Option<T>> {
        let token = self.require_token()?;
        match self.post_envelope(route, body, Some(token)).await?.check()? {
            Some(serde_json::Value::Null) | None => Ok(None),
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
        }
    }

    /// 已登录 POST，只关心是否成功
    async fn post_unit<B: Serialize>(&self, route: &'static str, body: &B) -> Result<()> {
        let token = self.require_token()?;
        self.post_envelope(route, body, Some(token)).await?.check()?;
        Ok(())
    }

    /// 已登录 GET，返回 data
    async fn get_data<T: DeserializeOwned>(&self, route: &'static str) -> Result<T> {
        let token = self.require_token()?;
        let request = ApiRequest::get(self.url(route)).with_token(Some(token));
        self.send(request, route).await?.into_data(route)
    }

    // =====================================================
    // 认证
    // =====================================================

    /// 使用配置的凭证登录并返回当前用户
    ///
    /// 配置了两步验证密钥时自动计算验证码
    pub async fn login(&self) -> Result<User> {
        let otp_code = match self.credentials.as_ref().and_then(|c| c.otp_secret.as_deref()) {
            Some(secret) => Some(otp::current_code(secret)?),
            None => None,
        };
        self.login_inner(otp_code.as_deref()).await
    }

    /// 使用显式的两步验证码登录
    pub async fn login_with_otp(&self, otp_code: &str) -> Result<User> {
        self.login_inner(Some(otp_code)).await
    }

    async fn login_inner(&self, otp_code: Option<&str>) -> Result<User> {
        let (username, password) = match &self.credentials {
            Some(creds) => (creds.username.as_str(), creds.password.as_str()),
            None => ("", ""),
        };

        info!("登录: username={}, 两步验证={}", username, otp_code.is_some());

        let body = LoginRequest {
            username,
            password,
            otp_code,
        };
        let login: LoginData = self
            .post_envelope(API_LOGIN, &body, None)
            .await?
            .into_data(API_LOGIN)?;

        if login.token.is_empty() {
            return Err(AlistError::EmptyPayload { route: API_LOGIN });
        }

        *self.auth.write() = AuthState::from_token(login.token);
        info!("登录成功: username={}", username);

        self.me().await
    }

    /// 获取当前用户信息
    pub async fn me(&self) -> Result<User> {
        let user: User = self.get_data(API_ME).await?;
        debug!("当前用户: id={}, username={}", user.id, user.username);
        Ok(user)
    }

    /// 生成两步验证密钥
    pub async fn generate_2fa(&self) -> Result<TwoFactorSecret> {
        info!("生成两步验证密钥");
        self.post_data(API_2FA_GENERATE, &serde_json::json!({})).await
    }

    /// 提交验证码以启用两步验证
    pub async fn verify_2fa(&self, code: &str, secret: &str) -> Result<()> {
        info!("验证两步验证码");
        self.post_unit(API_2FA_VERIFY, &VerifyTwoFactorRequest { code, secret })
            .await
    }

    // =====================================================
    // 文件系统
    // =====================================================

    /// 创建目录
    pub async fn mkdir(&self, path: &str) -> Result<()> {
        info!("创建目录: path={}", path);
        self.post_unit(API_FS_MKDIR, &MkdirRequest { path }).await
    }

    /// 重命名文件或目录
    ///
    /// # 参数
    /// * `new_name` - 新名称（不含路径）
    /// * `path` - 待重命名对象的完整路径
    pub async fn rename(&self, new_name: &str, path: &str) -> Result<()> {
        info!("重命名: path={}, new_name={}", path, new_name);
        self.post_unit(
            API_FS_RENAME,
            &RenameRequest {
                name: new_name,
                path,
            },
        )
        .await
    }

    /// 删除目录下的若干文件或目录
    pub async fn remove(&self, dir: &str, names: &[String]) -> Result<()> {
        info!("删除: dir={}, names={:?}", dir, names);
        self.post_unit(API_FS_REMOVE, &RemoveRequest { dir, names })
            .await
    }

    /// 删除空目录
    pub async fn remove_empty_dir(&self, dir: &str) -> Result<()> {
        info!("删除空目录: dir={}", dir);
        self.post_unit(API_FS_REMOVE_EMPTY_DIR, &RemoveEmptyDirRequest { src_dir: dir })
            .await
    }

    /// 复制文件
    pub async fn copy(&self, src_dir: &str, dst_dir: &str, names: &[String]) -> Result<()> {
        info!("复制: {} -> {}, names={:?}", src_dir, dst_dir, names);
        self.post_unit(
            API_FS_COPY,
            &TransferObjectsRequest {
                src_dir,
                dst_dir,
                names,
            },
        )
        .await
    }

    /// 移动文件
    pub async fn move_files(&self, src_dir: &str, dst_dir: &str, names: &[String]) -> Result<()> {
        info!("移动: {} -> {}, names={:?}", src_dir, dst_dir, names);
        self.post_unit(
            API_FS_MOVE,
            &TransferObjectsRequest {
                src_dir,
                dst_dir,
                names,
            },
        )
        .await
    }

    /// 递归移动：把源目录下的所有文件移动到目标目录
    pub async fn recursive_move(&self, src_dir: &str, dst_dir: &str) -> Result<()> {
        info!("递归移动: {} -> {}", src_dir, dst_dir);
        self.post_unit(API_FS_RECURSIVE_MOVE, &RecursiveMoveRequest { src_dir, dst_dir })
            .await
    }

    /// 正则重命名
    ///
    /// `mapping` 的键为源文件名匹配表达式，值为新文件名（可引用捕获组）。
    /// 发送前逐一编译校验表达式。
    pub async fn regex_rename(
        &self,
        src_dir: &str,
        mapping: &HashMap<String, String>,
    ) -> Result<()> {
        self.require_token()?;
        for pattern in mapping.keys() {
            Regex::new(pattern).map_err(|source| AlistError::InvalidPattern {
                pattern: pattern.clone(),
                source,
            })?;
        }

        info!("正则重命名: dir={}, 规则数={}", src_dir, mapping.len());
        self.post_unit(
            API_FS_REGEX_RENAME,
            &BatchRenameRequest::from_map(src_dir, mapping),
        )
        .await
    }

    /// 批量重命名
    ///
    /// `mapping` 为 旧文件名 → 新文件名，各对之间相互独立，发送顺序不保证
    pub async fn batch_rename(
        &self,
        src_dir: &str,
        mapping: &HashMap<String, String>,
    ) -> Result<()> {
        info!("批量重命名: dir={}, 数量={}", src_dir, mapping.len());
        self.post_unit(
            API_FS_BATCH_RENAME,
            &BatchRenameRequest::from_map(src_dir, mapping),
        )
        .await
    }

    /// 列出子目录
    ///
    /// # 参数
    /// * `path` - 目录路径
    /// * `password` - 目录密码（没有则传空字符串）
    /// * `force_root` - 是否强制从根目录开始
    pub async fn dirs(&self, path: &str, password: &str, force_root: bool) -> Result<Vec<Dir>> {
        debug!("获取子目录: path={}", path);
        let dirs: Option<Vec<Dir>> = self
            .post_data_optional(
                API_FS_DIRS,
                &DirsRequest {
                    path,
                    password,
                    force_root,
                },
            )
            .await?;
        Ok(dirs.unwrap_or_default())
    }

    /// 列出目录内容
    ///
    /// # 参数
    /// * `path` - 目录路径（如 "/" 或 "/docs"）
    /// * `password` - 目录密码
    /// * `page_num` - 页码（从 1 开始）
    /// * `per_page` - 每页数量（0 表示不分页）
    /// * `refresh` - 是否强制刷新缓存
    pub async fn list(
        &self,
        path: &str,
        password: &str,
        page_num: u32,
        per_page: u32,
        refresh: bool,
    ) -> Result<ListData> {
        debug!("列出目录: path={}, page={}, per_page={}", path, page_num, per_page);
        let data: ListData = self
            .post_data(
                API_FS_LIST,
                &ListRequest {
                    path,
                    password,
                    page_num,
                    per_page,
                    refresh,
                },
            )
            .await?;
        debug!("获取到 {} 个文件/目录, total={}", data.content.len(), data.total);
        Ok(data)
    }

    /// 获取单个文件 / 目录信息
    pub async fn get(&self, path: &str, password: &str) -> Result<File> {
        debug!("获取对象信息: path={}", path);
        self.post_data(API_FS_GET, &GetRequest { path, password })
            .await
    }

    // =====================================================
    // 站点
    // =====================================================

    /// 获取站点设置
    pub async fn settings(&self) -> Result<Settings> {
        self.get_data(API_SETTINGS).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_with_token_is_authenticated() {
        let client = AlistClient::with_token("http://127.0.0.1:5244/", "tok").unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:5244");
        assert!(client.is_authenticated());
        assert_eq!(client.token().as_deref(), Some("tok"));
    }

    #[test]
    fn test_client_with_credentials_is_anonymous() {
        let client = AlistClient::with_credentials("http://127.0.0.1:5244", "admin", "pw").unwrap();
        assert!(!client.is_authenticated());
        assert_eq!(client.auth_state(), AuthState::Anonymous);
    }

    #[test]
    fn test_set_and_clear_token() {
        let client = AlistClient::with_credentials("http://127.0.0.1:5244", "admin", "pw").unwrap();
        client.set_token("new-token");
        assert_eq!(client.token().as_deref(), Some("new-token"));
        client.clear_token();
        assert!(client.token().is_none());
    }

    #[test]
    fn test_url_join() {
        let client = AlistClient::with_token("https://alist.example.com//", "t").unwrap();
        assert_eq!(client.url(API_FS_LIST), "https://alist.example.com/api/fs/list");
    }

    #[tokio::test]
    async fn test_regex_rename_rejects_invalid_pattern() {
        let client = AlistClient::with_token("http://127.0.0.1:9", "t").unwrap();
        let mut mapping = HashMap::new();
        mapping.insert("(unclosed".to_string(), "x".to_string());

        let err = client.regex_rename("/", &mapping).await.unwrap_err();
        assert!(matches!(err, AlistError::InvalidPattern { .. }));
    }
}
