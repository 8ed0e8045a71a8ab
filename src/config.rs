//! 配置模块
//!
//! 从环境变量读取通知参数和运行选项，不解析命令行参数

use crate::error::{ConfigError, Result};
use crate::notification::types::{MsgType, NotificationInput};
use log::LevelFilter;
use std::time::Duration;

/// webhook URL
pub const ENV_WEBHOOK_URL: &str = "FEISHU_WEBHOOK_URL";
/// 消息内容
pub const ENV_MESSAGE: &str = "FEISHU_MESSAGE";
/// 消息类型
pub const ENV_MSG_TYPE: &str = "FEISHU_MSG_TYPE";
/// 消息标题
pub const ENV_TITLE: &str = "FEISHU_TITLE";
/// 请求超时（秒）
pub const ENV_TIMEOUT_SECS: &str = "FEISHU_TIMEOUT_SECS";
/// 日志级别
pub const ENV_LOG_LEVEL: &str = "FEISHU_LOG_LEVEL";
/// 是否输出JSON日志
pub const ENV_LOG_JSON: &str = "FEISHU_LOG_JSON";

/// 通知器运行配置
#[derive(Debug, Clone, PartialEq)]
pub struct NotifierConfig {
    /// 通知输入
    pub input: NotificationInput,
    /// 请求超时，`None` 表示不限制
    pub timeout: Option<Duration>,
    /// 日志级别
    pub log_level: LevelFilter,
    /// 是否使用JSON日志格式
    pub log_json: bool,
}

impl NotifierConfig {
    /// 从进程环境变量加载配置
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// 通过查找函数加载配置
    ///
    /// # 参数
    /// * `lookup` - 按变量名返回取值的函数
    ///
    /// # 返回
    /// * `Result<Self>` - 配置或无效取值错误
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).unwrap_or_default();

        let msg_type = MsgType::from(var(ENV_MSG_TYPE).as_str());
        let title = Some(var(ENV_TITLE)).filter(|title| !title.is_empty());

        let input = NotificationInput {
            webhook_url: var(ENV_WEBHOOK_URL),
            message: var(ENV_MESSAGE),
            msg_type,
            title,
        };

        Ok(Self {
            input,
            timeout: parse_timeout(&var(ENV_TIMEOUT_SECS))?,
            log_level: parse_log_level(&var(ENV_LOG_LEVEL))?,
            log_json: parse_bool(&var(ENV_LOG_JSON)),
        })
    }
}

fn parse_timeout(value: &str) -> std::result::Result<Option<Duration>, ConfigError> {
    if value.is_empty() {
        return Ok(None);
    }

    let invalid = |reason: &str| ConfigError::InvalidValue {
        var: ENV_TIMEOUT_SECS,
        value: value.to_string(),
        reason: reason.to_string(),
    };

    match value.trim().parse::<u64>() {
        Ok(0) => Err(invalid("超时时间必须大于0")),
        Ok(secs) => Ok(Some(Duration::from_secs(secs))),
        Err(e) => Err(invalid(&e.to_string())),
    }
}

fn parse_log_level(value: &str) -> std::result::Result<LevelFilter, ConfigError> {
    if value.is_empty() {
        return Ok(LevelFilter::Info);
    }

    value
        .trim()
        .parse::<LevelFilter>()
        .map_err(|_| ConfigError::InvalidValue {
            var: ENV_LOG_LEVEL,
            value: value.to_string(),
            reason: "可选值: off, error, warn, info, debug, trace".to_string(),
        })
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
