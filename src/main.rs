//! haginotifier 主程序入口
//!
//! 环境变量:
//! - FEISHU_WEBHOOK_URL: webhook URL
//! - FEISHU_MESSAGE: 消息内容
//! - FEISHU_MSG_TYPE: 消息类型（默认 text）
//! - FEISHU_TITLE: post/interactive 消息标题
//! - FEISHU_TIMEOUT_SECS: 请求超时（秒，默认不限制）
//! - FEISHU_LOG_LEVEL / FEISHU_LOG_JSON: 日志级别与格式

use haginotifier::cli::{self, EXIT_FAILURE};

#[tokio::main]
async fn main() {
    let code = match cli::run_cli().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("CLI error: {:#}", e);
            EXIT_FAILURE
        }
    };

    std::process::exit(code);
}
