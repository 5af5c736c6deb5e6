//! Chat service for the broadcast channel
//!
//! Validates inbound message events, relays them to the message store, and
//! fans successfully persisted records out to every connected client. Every
//! failure degrades: invalid events are dropped, store failures are logged
//! and never surfaced to the sender.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, error, info, warn};

use crate::{
    config::ChatConfig,
    models::{ChatMessage, ChatMessageWithAuthor, MessageId, ServerEvent, UserId},
    repository::MessageStore,
    service::ChannelHub,
};

#[derive(Clone)]
pub struct ChatService {
    store: Arc<dyn MessageStore>,
    hub: Arc<ChannelHub>,
    config: ChatConfig,
}

impl ChatService {
    #[must_use]
    pub fn new(store: Arc<dyn MessageStore>, hub: Arc<ChannelHub>, config: ChatConfig) -> Self {
        Self { store, hub, config }
    }

    /// Handle an inbound message event from an already-authenticated actor.
    ///
    /// Invalid content drops the event silently. On successful persistence
    /// the created record is broadcast to every connection, including the
    /// sender; on persistence failure nothing is broadcast and there is no
    /// retry.
    pub async fn handle_incoming(
        &self,
        content: String,
        author_id: UserId,
        parent_id: Option<MessageId>,
    ) {
        if content.is_empty() {
            debug!(author_id = %author_id, "Dropped message event with empty content");
            return;
        }
        if content.len() > self.config.max_content_length {
            debug!(
                author_id = %author_id,
                length = content.len(),
                "Dropped message event exceeding content length limit"
            );
            return;
        }

        let message = ChatMessage::new(author_id, content, parent_id);

        match self.store.create(&message).await {
            Ok(created) => {
                info!(
                    message_id = %created.message.id,
                    author_id = %created.message.author_id,
                    "Chat message persisted"
                );
                self.hub.broadcast(&ServerEvent::Message(created));
            }
            Err(e) => {
                error!(error = %e, "Failed to persist chat message, not broadcasting");
            }
        }
    }

    /// History replayed to a newly connected client: messages inside the
    /// trailing window, ascending, capped. A query failure is swallowed and
    /// the connection proceeds with no backlog.
    pub async fn replay(&self) -> Vec<ChatMessageWithAuthor> {
        let since = Utc::now() - chrono::Duration::days(self.config.history_window_days);

        match self
            .store
            .list_since(since, self.config.history_limit)
            .await
        {
            Ok(messages) => messages,
            Err(e) => {
                warn!(error = %e, "Failed to load chat history, replaying nothing");
                Vec::new()
            }
        }
    }
}
