use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{MessageId, UserId};

/// A persisted chat message.
///
/// `parent_id` forms a one-level reply relationship: a message with a
/// non-null `parent_id` is a reply and may not itself have replies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: MessageId,
    pub content: String,
    pub author_id: UserId,
    pub parent_id: Option<MessageId>,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(author_id: UserId, content: String, parent_id: Option<MessageId>) -> Self {
        Self {
            id: MessageId::new(),
            content,
            author_id,
            parent_id,
            created_at: Utc::now(),
        }
    }
}

/// Minimal author display fields joined onto a message.
///
/// Read from the identity collaborator's `users` table; never written here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageAuthor {
    pub id: UserId,
    pub name: String,
    pub avatar_url: Option<String>,
}

/// A chat message joined with its author's display fields, as sent to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessageWithAuthor {
    #[serde(flatten)]
    pub message: ChatMessage,
    pub author: MessageAuthor,
}
