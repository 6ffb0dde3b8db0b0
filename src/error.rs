// 客户端错误类型

use thiserror::Error;

/// 传输层错误
///
/// 请求无法构造（URL / 请求头非法）或无法完成（连接失败、超时、TLS 握手失败）
#[derive(Debug, Error)]
pub enum TransportError {
    /// URL 格式错误
    #[error("无效的请求地址 {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// 请求头值非法（例如 token 中包含换行）
    #[error("无效的请求头 {name}: {reason}")]
    InvalidHeader { name: &'static str, reason: String },

    /// 底层 HTTP 请求失败
    #[error("HTTP 请求失败: {0}")]
    Request(#[from] reqwest::Error),
}

impl TransportError {
    /// 是否为超时导致的失败
    pub fn is_timeout(&self) -> bool {
        matches!(self, TransportError::Request(e) if e.is_timeout())
    }
}

/// Alist 客户端错误
#[derive(Debug, Error)]
pub enum AlistError {
    /// 网络 / 传输错误，原样透传给调用方
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// 尚未登录（没有 token）
    #[error("not login yet")]
    AuthRequired,

    /// 服务端返回了非 200 的业务码
    #[error("{message}")]
    RemoteApi { code: i64, message: String },

    /// 响应体不是合法的 JSON 信封或 data 结构不匹配
    #[error("响应解析失败: {0}")]
    Decode(#[from] serde_json::Error),

    /// code 为 200 但缺少 data
    #[error("接口 {route} 返回成功但缺少 data 字段")]
    EmptyPayload { route: &'static str },

    /// 正则重命名的表达式无法编译
    #[error("无效的正则表达式 {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// 两步验证码生成失败
    #[error("两步验证失败: {0}")]
    TwoFactor(String),
}

impl AlistError {
    /// 是否为超时导致的传输错误
    pub fn is_timeout(&self) -> bool {
        matches!(self, AlistError::Transport(e) if e.is_timeout())
    }

    /// 服务端业务码（仅 RemoteApi 有）
    pub fn remote_code(&self) -> Option<i64> {
        match self {
            AlistError::RemoteApi { code, .. } => Some(*code),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for AlistError {
    fn from(err: reqwest::Error) -> Self {
        AlistError::Transport(TransportError::Request(err))
    }
}

pub type Result<T, E = AlistError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_error_displays_server_message() {
        let err = AlistError::RemoteApi {
            code: 403,
            message: "permission denied".to_string(),
        };
        assert_eq!(err.to_string(), "permission denied");
        assert_eq!(err.remote_code(), Some(403));
        assert!(!err.is_timeout());
    }

    #[test]
    fn test_auth_required_message() {
        assert_eq!(AlistError::AuthRequired.to_string(), "not login yet");
        assert_eq!(AlistError::AuthRequired.remote_code(), None);
    }

    #[test]
    fn test_invalid_url_is_transport() {
        let err: AlistError = TransportError::InvalidUrl {
            url: "::".to_string(),
            reason: "relative URL without a base".to_string(),
        }
        .into();
        assert!(matches!(err, AlistError::Transport(_)));
        assert!(err.to_string().contains("::"));
    }
}
