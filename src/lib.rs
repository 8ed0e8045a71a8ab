//! haginotifier - 飞书webhook通知工具
//!
//! 供CI流水线等自动化场景调用，通过飞书自定义机器人webhook发送一条消息：
//! - 支持 text、post、interactive 三种消息格式
//! - 发送结果统一为 success/failure 记录，不向调用方抛出错误
//! - 独立运行时只从环境变量读取配置

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod notification;

// 重新导出主要类型
pub use error::NotifierError;
pub use notification::{
    FeishuSender, MsgType, NotificationInput, NotificationOutput, NotificationSender,
    NotificationStatus, WebhookPayload,
};

use notification::types::iso_timestamp;

/// 应用程序版本信息
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 应用程序名称
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");

/// 使用默认HTTP客户端发送飞书通知
///
/// 不设置超时；需要超时请使用 [`FeishuSender::new`]
///
/// # 参数
/// * `input` - 通知输入参数
///
/// # 返回
/// * `NotificationOutput` - 发送结果
pub async fn send_notification(input: &NotificationInput) -> NotificationOutput {
    let timestamp = iso_timestamp();
    match FeishuSender::new(None) {
        Ok(sender) => sender.send_at(input, timestamp).await,
        Err(e) => NotificationOutput::failure(timestamp, e.to_string()),
    }
}
