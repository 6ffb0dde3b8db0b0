// 认证模块数据类型定义

use std::fmt;

/// 登录凭证
#[derive(Clone, Default)]
pub struct Credentials {
    /// 用户名
    pub username: String,
    /// 密码
    pub password: String,
    /// 两步验证密钥（Base32），设置后登录时自动计算验证码
    pub otp_secret: Option<String>,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            otp_secret: None,
        }
    }

    pub fn with_otp_secret(mut self, secret: impl Into<String>) -> Self {
        self.otp_secret = Some(secret.into());
        self
    }
}

// 密码与密钥不进日志
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .field("otp_secret", &self.otp_secret.as_ref().map(|_| "***"))
            .finish()
    }
}

/// 登录状态
///
/// Anonymous --登录成功--> Authenticated；登录失败不改变状态
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthState {
    /// 未登录
    #[default]
    Anonymous,
    /// 已登录
    Authenticated {
        token: String,
        /// 获得 token 的时间戳（秒）
        since: i64,
    },
}

impl AuthState {
    /// 以 token 进入已登录状态，空 token 视为未登录
    pub fn from_token(token: impl Into<String>) -> Self {
        let token = token.into();
        if token.is_empty() {
            AuthState::Anonymous
        } else {
            AuthState::Authenticated {
                token,
                since: chrono::Utc::now().timestamp(),
            }
        }
    }

    pub fn token(&self) -> Option<&str> {
        match self {
            AuthState::Anonymous => None,
            AuthState::Authenticated { token, .. } => Some(token),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated { .. })
    }

    /// 持有 token 的时长（秒），未登录返回 None
    pub fn age_secs(&self) -> Option<i64> {
        match self {
            AuthState::Anonymous => None,
            AuthState::Authenticated { since, .. } => Some(chrono::Utc::now().timestamp() - since),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_anonymous() {
        let state = AuthState::default();
        assert!(!state.is_authenticated());
        assert_eq!(state.token(), None);
        assert_eq!(state.age_secs(), None);
    }

    #[test]
    fn test_from_token() {
        let state = AuthState::from_token("abc");
        assert!(state.is_authenticated());
        assert_eq!(state.token(), Some("abc"));
        assert!(state.age_secs().unwrap() >= 0);

        assert_eq!(AuthState::from_token(""), AuthState::Anonymous);
    }

    #[test]
    fn test_credentials_debug_hides_password() {
        let creds = Credentials::new("admin", "hunter2").with_otp_secret("JBSWY3DPEHPK3PXP");
        let printed = format!("{:?}", creds);
        assert!(printed.contains("admin"));
        assert!(!printed.contains("hunter2"));
        assert!(!printed.contains("JBSWY3DPEHPK3PXP"));
    }
}
