//! 飞书消息体构建模块
//!
//! 将通知输入映射为三种webhook消息结构之一

use crate::notification::types::{MsgType, NotificationInput};
use serde::Serialize;
use tracing::warn;

/// 飞书webhook消息体
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "msg_type", rename_all = "lowercase")]
pub enum WebhookPayload {
    /// 文本消息
    Text { content: TextContent },
    /// 富文本消息
    Post { content: PostContent },
    /// 卡片消息
    Interactive { card: Card },
}

impl WebhookPayload {
    /// 消息类型标识
    pub fn msg_type(&self) -> &'static str {
        match self {
            WebhookPayload::Text { .. } => "text",
            WebhookPayload::Post { .. } => "post",
            WebhookPayload::Interactive { .. } => "interactive",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextContent {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostContent {
    pub post: PostLocales,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostLocales {
    pub zh_cn: PostBody,
}

/// 富文本正文，`content` 为段落列表，每个段落由若干元素组成
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub content: Vec<Vec<PostElement>>,
}

/// 富文本元素
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "tag", rename_all = "lowercase")]
pub enum PostElement {
    /// 文本
    Text { text: String },
    /// 超链接
    A { text: String, href: String },
    /// @用户
    At {
        user_id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        user_name: Option<String>,
    },
    /// 图片
    Img { image_key: String },
}

/// 卡片消息
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Card {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<CardHeader>,
    pub elements: Vec<CardElement>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardHeader {
    pub title: CardText,
    /// 标题栏颜色，如 blue、red、green
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
}

/// 卡片元素
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "tag", rename_all = "lowercase")]
pub enum CardElement {
    /// 文本块
    Div { text: CardText },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardText {
    pub content: String,
    pub tag: TextTag,
}

impl CardText {
    /// 纯文本
    pub fn plain(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            tag: TextTag::PlainText,
        }
    }
}

/// 卡片文本渲染方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextTag {
    PlainText,
    LarkMd,
}

/// 构建飞书消息体
///
/// 对合法输入总能成功；无法识别的消息类型按文本消息处理
pub fn build_payload(input: &NotificationInput) -> WebhookPayload {
    let message = input.message.clone();
    let title = input.title().map(str::to_string);

    match &input.msg_type {
        MsgType::Text => text_payload(message),
        MsgType::Post => WebhookPayload::Post {
            content: PostContent {
                post: PostLocales {
                    zh_cn: PostBody {
                        title,
                        content: vec![vec![PostElement::Text { text: message }]],
                    },
                },
            },
        },
        MsgType::Interactive => WebhookPayload::Interactive {
            card: Card {
                header: title.map(|title| CardHeader {
                    title: CardText::plain(title),
                    template: None,
                }),
                elements: vec![CardElement::Div {
                    text: CardText::plain(message),
                }],
            },
        },
        MsgType::Other(other) => {
            warn!("未知的消息类型 '{}'，按文本消息发送", other);
            text_payload(message)
        }
    }
}

fn text_payload(text: String) -> WebhookPayload {
    WebhookPayload::Text {
        content: TextContent { text },
    }
}
