//! 命令行入口
//!
//! 从环境变量读取配置，发送一次通知，输出JSON结果并给出进程退出码

use crate::config::NotifierConfig;
use crate::logging::{LogConfig, LoggingSystem};
use crate::notification::{FeishuSender, NotificationInput, NotificationSender};
use anyhow::{Context, Result};
use std::io::Write;
use tracing::info;

/// 成功退出码
pub const EXIT_SUCCESS: i32 = 0;
/// 失败退出码
pub const EXIT_FAILURE: i32 = 1;

/// 读取环境变量并执行一次通知
///
/// # 返回
/// * `Result<i32>` - 进程退出码；配置或初始化错误以 `Err` 返回
pub async fn run_cli() -> Result<i32> {
    let config = NotifierConfig::from_env().context("读取环境变量配置失败")?;

    let _logging_system = LoggingSystem::setup_logging(LogConfig {
        level: config.log_level,
        json_format: config.log_json,
    })
    .context("初始化日志系统失败")?;

    info!("haginotifier v{} 启动", crate::VERSION);

    let sender = FeishuSender::new(config.timeout).context("创建HTTP客户端失败")?;
    execute(&sender, &config.input, &mut std::io::stdout()).await
}

/// 通过给定发送器发送通知，将结果以格式化JSON写入 `out`
///
/// # 参数
/// * `sender` - 通知发送器
/// * `input` - 通知输入参数
/// * `out` - 结果输出目标
///
/// # 返回
/// * `Result<i32>` - 失败结果对应退出码 1，成功为 0
pub async fn execute<W: Write>(
    sender: &dyn NotificationSender,
    input: &NotificationInput,
    out: &mut W,
) -> Result<i32> {
    let output = sender.send_notification(input).await;

    let rendered = serde_json::to_string_pretty(&output).context("序列化通知结果失败")?;
    writeln!(out, "{}", rendered).context("写入通知结果失败")?;

    if output.status.is_success() {
        Ok(EXIT_SUCCESS)
    } else {
        Ok(EXIT_FAILURE)
    }
}
