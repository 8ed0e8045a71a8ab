//! 飞书通知发送器模块
//!
//! 实现飞书webhook通知功能

use crate::error::{NotifierError, Result};
use crate::notification::payload::build_payload;
use crate::notification::sender::NotificationSender;
use crate::notification::types::{
    iso_timestamp, NotificationInput, NotificationOutput, WebhookResponse,
};
use async_trait::async_trait;
use reqwest::{Client, Url};
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// 响应体为空且状态行也无描述时的成功提示
pub const SUCCESS_FALLBACK: &str = "Notification sent successfully";

/// 单次投递的远端结论
enum Delivery {
    /// 飞书接受了消息
    Accepted(String),
    /// HTTP状态非成功或 code 非 0
    Rejected(String),
}

/// 飞书通知发送器
#[derive(Debug, Clone)]
pub struct FeishuSender {
    /// HTTP客户端
    client: Client,
}

impl FeishuSender {
    /// 创建新的飞书发送器
    ///
    /// # 参数
    /// * `timeout` - 请求超时时间，`None` 表示不设置超时
    ///
    /// # 返回
    /// * `Result<Self>` - 发送器实例
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { client })
    }

    /// 使用已有的HTTP客户端创建发送器
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// 发送通知，所有失败都转换为失败结果
    ///
    /// # 参数
    /// * `input` - 通知输入参数
    ///
    /// # 返回
    /// * `NotificationOutput` - 发送结果
    pub async fn send_notification(&self, input: &NotificationInput) -> NotificationOutput {
        self.send_at(input, iso_timestamp()).await
    }

    /// 使用调用方在发起前记录的时间戳发送通知
    pub(crate) async fn send_at(
        &self,
        input: &NotificationInput,
        timestamp: String,
    ) -> NotificationOutput {
        match self.deliver(input).await {
            Ok(Delivery::Accepted(response)) => {
                info!("飞书消息发送成功");
                NotificationOutput::success(timestamp, response)
            }
            Ok(Delivery::Rejected(response)) => {
                warn!("飞书消息被拒绝: {}", response);
                NotificationOutput::failure(timestamp, response)
            }
            Err(e) => {
                error!("飞书消息发送失败: {}", e);
                NotificationOutput::failure(timestamp, e.to_string())
            }
        }
    }

    /// 校验参数、发送请求并解读响应
    async fn deliver(&self, input: &NotificationInput) -> Result<Delivery> {
        validate(input)?;

        let payload = build_payload(input);
        debug!(
            "发送 {} 消息到飞书webhook: {}",
            payload.msg_type(),
            redact_webhook_url(&input.webhook_url)
        );

        let response = self
            .client
            .post(&input.webhook_url)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await.unwrap_or_else(|e| {
            warn!("读取飞书响应失败: {}", e);
            String::new()
        });
        debug!("飞书响应: {} - {}", status, body);

        let remote = WebhookResponse::parse(&body);
        // 空响应体以状态码的标准描述代替
        let text = if body.is_empty() {
            status.canonical_reason().unwrap_or_default().to_string()
        } else {
            body
        };

        if status.is_success() && remote.is_accepted() {
            if text.is_empty() {
                Ok(Delivery::Accepted(SUCCESS_FALLBACK.to_string()))
            } else {
                Ok(Delivery::Accepted(text))
            }
        } else {
            Ok(Delivery::Rejected(format!("HTTP {}: {}", status.as_u16(), text)))
        }
    }
}

#[async_trait]
impl NotificationSender for FeishuSender {
    async fn send_notification(&self, input: &NotificationInput) -> NotificationOutput {
        FeishuSender::send_notification(self, input).await
    }
}

/// 校验必填参数
fn validate(input: &NotificationInput) -> Result<()> {
    if input.webhook_url.is_empty() {
        return Err(NotifierError::MissingParameter("webhook_url"));
    }
    if input.message.is_empty() {
        return Err(NotifierError::MissingParameter("message"));
    }
    Ok(())
}

/// webhook URL 的路径中包含机器人令牌，日志只保留协议和主机
fn redact_webhook_url(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => format!("{}://{}", parsed.scheme(), parsed.host_str().unwrap_or("")),
        Err(_) => "<invalid url>".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_missing_webhook_url() {
        let err = validate(&NotificationInput::new("", "hi")).unwrap_err();
        assert!(matches!(err, NotifierError::MissingParameter("webhook_url")));
    }

    #[test]
    fn test_validate_checks_url_before_message() {
        let err = validate(&NotificationInput::new("", "")).unwrap_err();
        assert!(matches!(err, NotifierError::MissingParameter("webhook_url")));

        let err = validate(&NotificationInput::new("https://x", "")).unwrap_err();
        assert!(matches!(err, NotifierError::MissingParameter("message")));
    }

    #[test]
    fn test_redact_webhook_url() {
        assert_eq!(
            redact_webhook_url("https://open.feishu.cn/open-apis/bot/v2/hook/secret-token"),
            "https://open.feishu.cn"
        );
        assert_eq!(redact_webhook_url("not a url"), "<invalid url>");
    }

    #[tokio::test]
    async fn test_send_at_keeps_given_timestamp() {
        let sender = FeishuSender::new(None).unwrap();
        let output = sender
            .send_at(
                &NotificationInput::new("", "hi"),
                "2024-01-01T00:00:00.000Z".to_string(),
            )
            .await;
        assert_eq!(output.timestamp, "2024-01-01T00:00:00.000Z");
        assert_eq!(output.response, "Missing required parameter: webhook_url");
    }

    #[tokio::test]
    async fn test_send_without_message_fails() {
        let sender = FeishuSender::new(None).unwrap();
        let output = sender
            .send_notification(&NotificationInput::new("https://x", ""))
            .await;
        assert!(!output.status.is_success());
        assert_eq!(output.response, "Missing required parameter: message");
    }
}
