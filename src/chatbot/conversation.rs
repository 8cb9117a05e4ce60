//! Running chat transcript.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::responder::{self, Topic};

/// Suggested prompts shown next to the chat.
pub const QUICK_REPLIES: [&str; 6] = [
    "Đặt lịch hẹn",
    "Tìm bác sỹ",
    "Triệu chứng bệnh",
    "Giờ làm việc",
    "Dịch vụ y tế",
    "Liên hệ khẩn cấp",
];

const WELCOME_TOPICS: &[&str] = &[
    "Tư vấn về triệu chứng bệnh",
    "Đặt lịch hẹn với bác sỹ",
    "Thông tin về các dịch vụ y tế",
    "Hướng dẫn sử dụng hệ thống",
    "Liên hệ khẩn cấp",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Author {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub id: u64,
    pub author: Author,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

/// A chat transcript, opened with the assistant's welcome message.
#[derive(Debug, Clone)]
pub struct Conversation {
    messages: Vec<Message>,
    next_id: u64,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

impl Conversation {
    #[must_use]
    pub fn new() -> Self {
        let mut conversation = Self {
            messages: Vec::new(),
            next_id: 1,
        };
        conversation.push(Author::Bot, welcome_message());
        conversation
    }

    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Records a user message and the assistant's reply.
    ///
    /// Blank input is ignored and returns `None`.
    pub fn send(&mut self, input: &str) -> Option<&Message> {
        let content = input.trim();
        if content.is_empty() {
            return None;
        }

        let _span = tracing::debug_span!("chat_send", len = content.len()).entered();
        self.push(Author::User, content.to_string());
        let reply = responder::respond(content);
        self.push(Author::Bot, reply.to_string());
        self.messages.last()
    }

    fn push(&mut self, author: Author, content: String) {
        self.messages.push(Message {
            id: self.next_id,
            author,
            content,
            timestamp: Utc::now(),
        });
        self.next_id += 1;
    }
}

fn welcome_message() -> String {
    let bullets: Vec<String> = WELCOME_TOPICS.iter().map(|topic| format!("• {topic}")).collect();
    format!(
        "{}\n\n{}\n\nBạn cần hỗ trợ gì hôm nay?",
        Topic::Greeting.response(),
        bullets.join("\n")
    )
}
