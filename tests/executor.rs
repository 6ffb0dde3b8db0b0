// 请求执行器集成测试

use alist_sdk::api::constants::USER_AGENT;
use alist_sdk::api::{ApiRequest, RequestExecutor, TransportOptions};
use alist_sdk::TransportError;
use std::time::{Duration, Instant};
use wiremock::matchers::{body_bytes, header, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn executor(timeout_secs: i64) -> RequestExecutor {
    RequestExecutor::new(TransportOptions {
        timeout_secs,
        insecure_skip_verify: false,
    })
    .unwrap()
}

#[tokio::test]
async fn test_returns_exact_body_bytes() {
    let server = MockServer::start().await;
    let payload: Vec<u8> = vec![0x00, 0x9f, 0x92, 0x96, b'{', b'}', 0xff];

    Mock::given(method("GET"))
        .and(path("/raw"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(payload.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let body = executor(5)
        .execute(ApiRequest::get(format!("{}/raw", server.uri())))
        .await
        .unwrap();

    assert_eq!(body, payload);
}

#[tokio::test]
async fn test_http_error_status_still_returns_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/me"))
        .respond_with(
            ResponseTemplate::new(401).set_body_string(r#"{"code":401,"message":"token is expired"}"#),
        )
        .mount(&server)
        .await;

    let body = executor(5)
        .execute(ApiRequest::get(format!("{}/api/me", server.uri())))
        .await
        .unwrap();

    assert_eq!(body, br#"{"code":401,"message":"token is expired"}"#.to_vec());
}

#[tokio::test]
async fn test_post_sends_body_and_headers() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/fs/mkdir"))
        .and(header("content-type", "application/json; charset=utf-8"))
        .and(header("authorization", "raw-token"))
        .and(|req: &Request| {
            req.headers
                .get("user-agent")
                .and_then(|v| v.to_str().ok())
                == Some(USER_AGENT)
        })
        .and(body_bytes(br#"{"path":"/new"}"#.to_vec()))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&server)
        .await;

    let request = ApiRequest::post(
        format!("{}/api/fs/mkdir", server.uri()),
        br#"{"path":"/new"}"#.to_vec(),
    )
    .with_token(Some("raw-token".to_string()));

    let body = executor(5).execute(request).await.unwrap();
    assert_eq!(body, b"ok".to_vec());
}

#[tokio::test]
async fn test_no_authorization_header_without_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/settings"))
        .and(|req: &Request| !req.headers.contains_key("authorization"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&server)
        .await;

    executor(5)
        .execute(ApiRequest::get(format!("{}/api/settings", server.uri())))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_timeout_is_bounded() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("late")
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let started = Instant::now();
    let err = executor(1)
        .execute(ApiRequest::get(format!("{}/slow", server.uri())))
        .await
        .unwrap_err();
    let elapsed = started.elapsed();

    assert!(err.is_timeout(), "expected timeout, got {:?}", err);
    assert!(elapsed >= Duration::from_millis(900), "returned too early: {:?}", elapsed);
    assert!(elapsed < Duration::from_secs(3), "timeout not honoured: {:?}", elapsed);
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // 绑定后立即释放端口，保证无人监听
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let err = executor(2)
        .execute(ApiRequest::get(format!("http://127.0.0.1:{}/api/me", port)))
        .await
        .unwrap_err();

    assert!(matches!(err, TransportError::Request(_)));
    assert!(!err.is_timeout());
}

#[tokio::test]
async fn test_malformed_url() {
    let err = executor(2)
        .execute(ApiRequest::get("http://[::1/api/me"))
        .await
        .unwrap_err();
    assert!(matches!(err, TransportError::InvalidUrl { .. }));
}
