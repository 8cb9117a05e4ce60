//! Scripted health assistant.
//!
//! No language understanding: a fixed, ordered keyword table picks one of a
//! handful of canned replies.

pub mod conversation;
pub mod responder;

pub use conversation::{Author, Conversation, Message, QUICK_REPLIES};
pub use responder::{classify, respond, Topic, RULES};
