//! 飞书发送器集成测试
//!
//! 使用 mockito 模拟飞书webhook，验证请求体和结果归一化逻辑

use chrono::{DateTime, Utc};
use haginotifier::notification::feishu::SUCCESS_FALLBACK;
use haginotifier::{FeishuSender, NotificationInput, NotificationOutput, NotificationStatus};
use mockito::{Matcher, Server};
use serde_json::json;
use std::net::TcpListener;

const HOOK_PATH: &str = "/open-apis/bot/v2/hook/test-token";

async fn send(input: &NotificationInput) -> NotificationOutput {
    let sender = FeishuSender::new(None).unwrap();
    sender.send_notification(input).await
}

fn assert_recent_timestamp(output: &NotificationOutput) {
    let timestamp = DateTime::parse_from_rfc3339(&output.timestamp).unwrap();
    let age = Utc::now().signed_duration_since(timestamp.with_timezone(&Utc));
    assert!(age.num_seconds().abs() < 30, "timestamp too far off: {}", output.timestamp);
}

#[tokio::test]
async fn test_text_message_success() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", HOOK_PATH)
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "msg_type": "text",
            "content": {"text": "部署完成"}
        })))
        .with_status(200)
        .with_body(r#"{"code":0}"#)
        .create_async()
        .await;

    let url = format!("{}{}", server.url(), HOOK_PATH);
    let output = send(&NotificationInput::new(url, "部署完成")).await;

    mock.assert_async().await;
    assert_eq!(output.status, NotificationStatus::Success);
    assert_eq!(output.response, r#"{"code":0}"#);
    assert_recent_timestamp(&output);
}

#[tokio::test]
async fn test_interactive_message_body() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", HOOK_PATH)
        .match_body(Matcher::Json(json!({
            "msg_type": "interactive",
            "card": {
                "header": {"title": {"content": "CI", "tag": "plain_text"}},
                "elements": [
                    {"tag": "div", "text": {"content": "构建失败", "tag": "plain_text"}}
                ]
            }
        })))
        .with_status(200)
        .with_body(r#"{"code":0,"msg":"success","data":{}}"#)
        .create_async()
        .await;

    let url = format!("{}{}", server.url(), HOOK_PATH);
    let input = NotificationInput::new(url, "构建失败")
        .with_msg_type("interactive")
        .with_title("CI");
    let output = send(&input).await;

    mock.assert_async().await;
    assert_eq!(output.status, NotificationStatus::Success);
}

#[tokio::test]
async fn test_post_message_without_title() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", HOOK_PATH)
        .match_body(Matcher::Json(json!({
            "msg_type": "post",
            "content": {"post": {"zh_cn": {
                "content": [[{"tag": "text", "text": "hello"}]]
            }}}
        })))
        .with_status(200)
        .with_body(r#"{"code":0}"#)
        .create_async()
        .await;

    let url = format!("{}{}", server.url(), HOOK_PATH);
    let output = send(&NotificationInput::new(url, "hello").with_msg_type("post")).await;

    mock.assert_async().await;
    assert_eq!(output.status, NotificationStatus::Success);
}

#[tokio::test]
async fn test_nonzero_code_is_failure() {
    let mut server = Server::new_async().await;
    let body = r#"{"code":19001,"msg":"bad"}"#;
    let _mock = server
        .mock("POST", HOOK_PATH)
        .with_status(200)
        .with_body(body)
        .create_async()
        .await;

    let url = format!("{}{}", server.url(), HOOK_PATH);
    let output = send(&NotificationInput::new(url, "hi")).await;

    assert_eq!(output.status, NotificationStatus::Failure);
    assert!(output.response.contains("HTTP 200"));
    assert!(output.response.contains(body));
    assert_eq!(output.response, format!("HTTP 200: {}", body));
}

#[tokio::test]
async fn test_nonzero_code_with_unexpected_msg_type_is_failure() {
    let mut server = Server::new_async().await;
    let body = r#"{"code":19001,"msg":123}"#;
    let _mock = server
        .mock("POST", HOOK_PATH)
        .with_status(200)
        .with_body(body)
        .create_async()
        .await;

    let url = format!("{}{}", server.url(), HOOK_PATH);
    let output = send(&NotificationInput::new(url, "hi")).await;

    assert_eq!(output.status, NotificationStatus::Failure);
    assert_eq!(output.response, format!("HTTP 200: {}", body));
}

#[tokio::test]
async fn test_fractional_code_is_failure() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", HOOK_PATH)
        .with_status(200)
        .with_body(r#"{"code":1.5}"#)
        .create_async()
        .await;

    let url = format!("{}{}", server.url(), HOOK_PATH);
    let output = send(&NotificationInput::new(url, "hi")).await;

    assert_eq!(output.status, NotificationStatus::Failure);
    assert!(output.response.starts_with("HTTP 200:"));
}

#[tokio::test]
async fn test_server_error_is_failure() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", HOOK_PATH)
        .with_status(500)
        .create_async()
        .await;

    let url = format!("{}{}", server.url(), HOOK_PATH);
    let output = send(&NotificationInput::new(url, "hi")).await;

    assert_eq!(output.status, NotificationStatus::Failure);
    assert!(output.response.starts_with("HTTP 500:"));
    assert_eq!(output.response, "HTTP 500: Internal Server Error");
    assert_recent_timestamp(&output);
}

#[tokio::test]
async fn test_non_json_body_with_success_status() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", HOOK_PATH)
        .with_status(200)
        .with_body("ok")
        .create_async()
        .await;

    let url = format!("{}{}", server.url(), HOOK_PATH);
    let output = send(&NotificationInput::new(url, "hi")).await;

    assert_eq!(output.status, NotificationStatus::Success);
    assert_eq!(output.response, "ok");
}

#[tokio::test]
async fn test_non_json_body_with_error_status() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", HOOK_PATH)
        .with_status(403)
        .with_body("forbidden by gateway")
        .create_async()
        .await;

    let url = format!("{}{}", server.url(), HOOK_PATH);
    let output = send(&NotificationInput::new(url, "hi")).await;

    assert_eq!(output.status, NotificationStatus::Failure);
    assert_eq!(output.response, "HTTP 403: forbidden by gateway");
}

#[tokio::test]
async fn test_empty_body_uses_status_text() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", HOOK_PATH)
        .with_status(200)
        .create_async()
        .await;

    let url = format!("{}{}", server.url(), HOOK_PATH);
    let output = send(&NotificationInput::new(url, "hi")).await;

    assert_eq!(output.status, NotificationStatus::Success);
    assert_eq!(output.response, "OK");
    assert_ne!(output.response, SUCCESS_FALLBACK);
}

#[tokio::test]
async fn test_missing_webhook_url_makes_no_request() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let output = send(&NotificationInput::new("", "hi")).await;

    mock.assert_async().await;
    assert_eq!(output.status, NotificationStatus::Failure);
    assert!(output.response.contains("webhook_url"));
    assert_recent_timestamp(&output);
}

#[tokio::test]
async fn test_missing_message_makes_no_request() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let url = format!("{}{}", server.url(), HOOK_PATH);
    let output = send(&NotificationInput::new(url, "")).await;

    mock.assert_async().await;
    assert_eq!(output.status, NotificationStatus::Failure);
    assert_eq!(output.response, "Missing required parameter: message");
}

#[tokio::test]
async fn test_connection_refused() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let url = format!("http://127.0.0.1:{}{}", port, HOOK_PATH);
    let output = send(&NotificationInput::new(url, "hi")).await;

    assert_eq!(output.status, NotificationStatus::Failure);
    assert!(output.response.starts_with("Request failed:"));
    assert!(!output.response.contains("test-token"), "{}", output.response);
    assert!(!output.response.contains(HOOK_PATH));
    assert_recent_timestamp(&output);
}

#[tokio::test]
async fn test_malformed_url() {
    let output = send(&NotificationInput::new("not a url", "hi")).await;

    assert_eq!(output.status, NotificationStatus::Failure);
    assert!(output.response.starts_with("Request failed:"));
}

#[tokio::test]
async fn test_library_send_notification() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", HOOK_PATH)
        .with_status(200)
        .with_body(r#"{"code":0}"#)
        .create_async()
        .await;

    let url = format!("{}{}", server.url(), HOOK_PATH);
    let output = haginotifier::send_notification(&NotificationInput::new(url, "hi")).await;

    assert_eq!(output.status, NotificationStatus::Success);
}
