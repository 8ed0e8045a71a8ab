//! 通知发送器模块
//!
//! 定义通知发送的trait

use crate::notification::types::{NotificationInput, NotificationOutput};
use async_trait::async_trait;

/// 通知发送器trait
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// 发送通知
    ///
    /// # 参数
    /// * `input` - 通知输入参数
    ///
    /// # 返回
    /// * `NotificationOutput` - 发送结果，所有失败都记录在结果中，不会返回错误
    async fn send_notification(&self, input: &NotificationInput) -> NotificationOutput;
}
