//! 通知数据类型模块
//!
//! 定义通知输入、输出以及飞书webhook响应结构

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// 消息类型
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MsgType {
    /// 纯文本消息
    #[default]
    Text,
    /// 富文本消息
    Post,
    /// 卡片消息
    Interactive,
    /// 无法识别的类型，按文本消息发送
    Other(String),
}

impl MsgType {
    /// 类型字符串
    pub fn as_str(&self) -> &str {
        match self {
            MsgType::Text => "text",
            MsgType::Post => "post",
            MsgType::Interactive => "interactive",
            MsgType::Other(value) => value,
        }
    }
}

impl From<&str> for MsgType {
    fn from(value: &str) -> Self {
        match value {
            "" | "text" => MsgType::Text,
            "post" => MsgType::Post,
            "interactive" => MsgType::Interactive,
            other => MsgType::Other(other.to_string()),
        }
    }
}

impl fmt::Display for MsgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 通知输入参数
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationInput {
    /// 飞书webhook URL
    pub webhook_url: String,
    /// 消息内容
    pub message: String,
    /// 消息类型
    pub msg_type: MsgType,
    /// 消息标题，仅用于 post/interactive
    pub title: Option<String>,
}

impl NotificationInput {
    /// 创建文本消息输入
    pub fn new(webhook_url: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            webhook_url: webhook_url.into(),
            message: message.into(),
            ..Default::default()
        }
    }

    /// 设置消息类型
    pub fn with_msg_type(mut self, msg_type: impl Into<MsgType>) -> Self {
        self.msg_type = msg_type.into();
        self
    }

    /// 设置标题
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// 非空标题；空字符串视为未提供
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref().filter(|title| !title.is_empty())
    }
}

/// 通知发送状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationStatus {
    /// 发送成功
    Success,
    /// 发送失败
    Failure,
}

impl NotificationStatus {
    /// 是否成功
    pub fn is_success(&self) -> bool {
        matches!(self, NotificationStatus::Success)
    }
}

/// 通知发送结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationOutput {
    /// 发送状态
    pub status: NotificationStatus,
    /// 发送时间（ISO 8601）
    pub timestamp: String,
    /// webhook响应内容或错误信息
    pub response: String,
}

impl NotificationOutput {
    /// 成功结果
    pub fn success(timestamp: String, response: impl Into<String>) -> Self {
        Self {
            status: NotificationStatus::Success,
            timestamp,
            response: response.into(),
        }
    }

    /// 失败结果
    pub fn failure(timestamp: String, response: impl Into<String>) -> Self {
        Self {
            status: NotificationStatus::Failure,
            timestamp,
            response: response.into(),
        }
    }
}

/// 当前时间的 ISO 8601 表示，精确到毫秒
pub fn iso_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// 飞书webhook响应
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WebhookResponse {
    /// 业务状态码，0 表示成功；保留原始JSON值
    pub code: Option<Value>,
    /// 错误描述
    pub msg: Option<String>,
    /// 附加数据
    pub data: Option<Value>,
}

impl WebhookResponse {
    /// 解析响应文本；非JSON或非对象时视为不含 code
    ///
    /// 逐字段读取，某个字段类型不符不影响 code 的判断
    pub fn parse(body: &str) -> Self {
        let value: Value = match serde_json::from_str(body) {
            Ok(value) => value,
            Err(_) => return Self::default(),
        };

        Self {
            code: value.get("code").filter(|code| !code.is_null()).cloned(),
            msg: value.get("msg").and_then(Value::as_str).map(str::to_string),
            data: value.get("data").or_else(|| value.get("Data")).cloned(),
        }
    }

    /// code 缺失、为 null 或为 0 即视为接受，其他任何取值都视为拒绝
    pub fn is_accepted(&self) -> bool {
        match &self.code {
            None => true,
            Some(code) => code.as_f64() == Some(0.0),
        }
    }
}
