//! 请求执行器
//!
//! 完成一次 HTTP 往返并返回原始响应体。执行器不解释 HTTP 状态码，
//! 业务结果由调用方通过 JSON 信封中的 `code` 字段判断。

use crate::api::constants::{CONTENT_TYPE_JSON, DEFAULT_TIMEOUT_SECS, USER_AGENT};
use crate::error::TransportError;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client, Method, Url};
use std::time::Duration;
use tracing::debug;

/// 传输配置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportOptions {
    /// 请求超时（秒），未设置或非正数时使用默认 30 秒
    pub timeout_secs: i64,
    /// 跳过 TLS 证书校验（自签名证书场景）
    pub insecure_skip_verify: bool,
}

impl TransportOptions {
    pub fn timeout(&self) -> Duration {
        effective_timeout(self.timeout_secs)
    }
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS as i64,
            insecure_skip_verify: false,
        }
    }
}

/// 计算实际生效的超时时间
pub fn effective_timeout(timeout_secs: i64) -> Duration {
    if timeout_secs > 0 {
        Duration::from_secs(timeout_secs as u64)
    } else {
        Duration::from_secs(DEFAULT_TIMEOUT_SECS)
    }
}

/// 单次请求描述
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    /// 绝对地址
    pub url: String,
    /// 原始 token，存在时写入 Authorization
    pub token: Option<String>,
    /// 已序列化的请求体
    pub body: Option<Vec<u8>>,
}

impl ApiRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            url: url.into(),
            token: None,
            body: None,
        }
    }

    pub fn post(url: impl Into<String>, body: Vec<u8>) -> Self {
        Self {
            method: Method::POST,
            url: url.into(),
            token: None,
            body: Some(body),
        }
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }
}

/// 组装单次请求的请求头
///
/// 每次调用都重新构造，不在客户端上保留可变的请求头状态
pub fn build_headers(token: Option<&str>) -> Result<HeaderMap, TransportError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(CONTENT_TYPE_JSON),
    );
    headers.insert(header::USER_AGENT, HeaderValue::from_static(USER_AGENT));

    if let Some(token) = token {
        // Alist 直接使用原始 token，不带 Bearer 前缀
        let value = HeaderValue::from_str(token).map_err(|e| TransportError::InvalidHeader {
            name: "Authorization",
            reason: e.to_string(),
        })?;
        headers.insert(header::AUTHORIZATION, value);
    }

    Ok(headers)
}

/// HTTP 请求执行器
#[derive(Debug, Clone)]
pub struct RequestExecutor {
    client: Client,
    options: TransportOptions,
}

impl RequestExecutor {
    /// 按传输配置创建执行器
    pub fn new(options: TransportOptions) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(options.timeout())
            .danger_accept_invalid_certs(options.insecure_skip_verify)
            .build()?;

        debug!(
            "初始化请求执行器: timeout={:?}, insecure_skip_verify={}",
            options.timeout(),
            options.insecure_skip_verify
        );

        Ok(Self { client, options })
    }

    pub fn options(&self) -> TransportOptions {
        self.options
    }

    /// 执行一次请求，返回完整响应体
    ///
    /// 不重试；任何 HTTP 状态码都会返回响应体。
    /// 响应体在函数返回前被完整读取并释放。
    pub async fn execute(&self, request: ApiRequest) -> Result<Vec<u8>, TransportError> {
        let url = Url::parse(&request.url).map_err(|e| TransportError::InvalidUrl {
            url: request.url.clone(),
            reason: e.to_string(),
        })?;
        let headers = build_headers(request.token.as_deref())?;

        debug!("发送请求: {} {}", request.method, url);

        let mut builder = self.client.request(request.method, url).headers(headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        debug!("收到响应: status={}, 长度={} 字节", status, body.len());

        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_default_transport_options() {
        let options = TransportOptions::default();
        assert_eq!(options.timeout(), Duration::from_secs(30));
        assert!(!options.insecure_skip_verify);
    }

    #[test]
    fn test_headers_without_token() {
        let headers = build_headers(None).unwrap();
        assert_eq!(
            headers.get(header::CONTENT_TYPE).unwrap(),
            "application/json; charset=utf-8"
        );
        assert_eq!(headers.get(header::USER_AGENT).unwrap(), USER_AGENT);
        assert!(headers.get(header::AUTHORIZATION).is_none());
    }

    #[test]
    fn test_headers_carry_raw_token() {
        let headers = build_headers(Some("abc.def")).unwrap();
        assert_eq!(headers.get(header::AUTHORIZATION).unwrap(), "abc.def");
    }

    #[test]
    fn test_headers_reject_invalid_token() {
        let err = build_headers(Some("bad\ntoken")).unwrap_err();
        assert!(matches!(
            err,
            TransportError::InvalidHeader {
                name: "Authorization",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_malformed_url_is_rejected() {
        let executor = RequestExecutor::new(TransportOptions::default()).unwrap();
        let err = executor
            .execute(ApiRequest::get("not a url"))
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::InvalidUrl { .. }));
    }

    proptest! {
        #[test]
        fn non_positive_timeout_falls_back_to_default(secs in i64::MIN..=0) {
            prop_assert_eq!(effective_timeout(secs), Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        }

        #[test]
        fn positive_timeout_is_kept(secs in 1i64..=86_400) {
            prop_assert_eq!(effective_timeout(secs), Duration::from_secs(secs as u64));
        }
    }
}
