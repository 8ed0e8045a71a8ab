//! 通知模块
//!
//! 提供飞书消息体构建和webhook投递功能

pub mod feishu;
pub mod payload;
pub mod sender;
pub mod types;

// 重新导出主要类型
pub use feishu::FeishuSender;
pub use payload::{build_payload, WebhookPayload};
pub use sender::NotificationSender;
pub use types::{MsgType, NotificationInput, NotificationOutput, NotificationStatus};
