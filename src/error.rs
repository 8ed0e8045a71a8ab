//! 错误处理模块
//!
//! 定义应用程序的统一错误类型

use thiserror::Error;

/// 飞书通知器的主要错误类型
///
/// `Display` 输出即为失败结果中的 `response` 文本
#[derive(Error, Debug)]
pub enum NotifierError {
    /// 缺少必填参数
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    /// 请求失败（网络错误、URL格式错误等）
    #[error("Request failed: {0}")]
    Request(String),

    /// 配置相关错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

impl From<reqwest::Error> for NotifierError {
    /// reqwest 的错误信息带完整 URL，webhook 路径中含机器人令牌，须先去除
    fn from(err: reqwest::Error) -> Self {
        NotifierError::Request(error_chain(&err.without_url()))
    }
}

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 环境变量取值无效
    #[error("环境变量 {var} 的值无效 '{value}': {reason}")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// 拼接错误及其所有 source，reqwest 的顶层信息通常不含根因
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_message = cause.to_string();
        if !message.contains(&cause_message) {
            message.push_str(": ");
            message.push_str(&cause_message);
        }
        source = cause.source();
    }
    message
}

/// 结果类型别名
pub type Result<T> = std::result::Result<T, NotifierError>;
