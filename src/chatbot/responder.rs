//! Keyword rule table for the scripted assistant.
//!
//! Rules are tried in order against the lower-cased message and the first rule
//! with a matching keyword wins, so "xin chào, tôi muốn đặt lịch" is a booking
//! request rather than a greeting.

/// What a message was recognized as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    Booking,
    Doctor,
    Symptom,
    Emergency,
    Greeting,
    Fallback,
}

impl Topic {
    /// The canned reply for this topic.
    #[must_use]
    pub const fn response(self) -> &'static str {
        match self {
            Self::Booking => "Tôi có thể giúp bạn đặt lịch hẹn. Vui lòng cung cấp thông tin về ngày mong muốn và loại dịch vụ cần khám.",
            Self::Doctor => "Chúng tôi có đội ngũ bác sỹ chuyên nghiệp trong nhiều lĩnh vực. Bạn cần tư vấn về chuyên khoa nào?",
            Self::Symptom => "Dựa trên triệu chứng bạn mô tả, tôi khuyên bạn nên đặt lịch hẹn với bác sỹ chuyên khoa phù hợp. Bạn có muốn tôi giúp đặt lịch không?",
            Self::Emergency => "Nếu đây là trường hợp cấp cứu, vui lòng gọi ngay 115 hoặc đến phòng cấp cứu gần nhất. Sức khỏe của bạn là ưu tiên hàng đầu!",
            Self::Greeting => "Xin chào! Tôi là trợ lý ảo của hệ thống Healthcare. Tôi có thể giúp bạn:",
            Self::Fallback => "Tôi hiểu câu hỏi của bạn. Để được hỗ trợ tốt nhất, tôi khuyên bạn nên liên hệ trực tiếp với đội ngũ y tế của chúng tôi.",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub topic: Topic,
    pub keywords: &'static [&'static str],
}

/// Ordered rules; earlier entries take precedence.
pub const RULES: &[Rule] = &[
    Rule {
        topic: Topic::Booking,
        keywords: &["đặt lịch", "hẹn"],
    },
    Rule {
        topic: Topic::Doctor,
        keywords: &["bác sỹ", "doctor"],
    },
    Rule {
        topic: Topic::Symptom,
        keywords: &["triệu chứng", "đau", "bệnh"],
    },
    Rule {
        topic: Topic::Emergency,
        keywords: &["cấp cứu", "khẩn cấp", "emergency"],
    },
    Rule {
        topic: Topic::Greeting,
        keywords: &["xin chào", "hello", "chào"],
    },
];

/// Finds the topic of `message`, falling back when no keyword matches.
#[must_use]
pub fn classify(message: &str) -> Topic {
    let lowered = message.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|keyword| lowered.contains(keyword)))
        .map_or(Topic::Fallback, |rule| rule.topic)
}

/// Canned reply for `message`.
#[must_use]
pub fn respond(message: &str) -> &'static str {
    let topic = classify(message);
    tracing::debug!(topic = ?topic, "chatbot rule matched");
    topic.response()
}
