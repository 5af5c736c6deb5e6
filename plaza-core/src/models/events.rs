use serde::{Deserialize, Serialize};

use super::id::{MessageId, UserId};
use super::message::ChatMessageWithAuthor;

/// Events sent by clients over the broadcast channel.
///
/// Wire shape: `{"event": "message", "data": {...}}`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientEvent {
    /// A new chat message from an already-authenticated actor
    Message {
        content: String,
        author_id: UserId,
        #[serde(default)]
        parent_id: Option<MessageId>,
    },
}

/// Events sent by the server over the broadcast channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerEvent {
    /// History replay, sent once to a newly connected client
    Messages(Vec<ChatMessageWithAuthor>),
    /// A single new record, broadcast to all connected clients
    Message(ChatMessageWithAuthor),
}

impl ServerEvent {
    #[must_use]
    pub const fn event_type(&self) -> &'static str {
        match self {
            Self::Messages(_) => "messages",
            Self::Message(_) => "message",
        }
    }
}
