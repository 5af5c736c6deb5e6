//! Persistence gateway consumed by the broadcast channel and the
//! live-status aggregator.
//!
//! The concrete repositories run on sqlx/Postgres; the services depend on
//! the gateway traits so they stay independently testable.

pub mod message;
pub mod streamer;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{
    models::{ChatMessage, ChatMessageWithAuthor, StreamerConfig},
    Result,
};

pub use message::MessageRepository;
pub use streamer::StreamerRepository;

/// Message record storage: create, windowed listing, age-based deletion.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Persist a new message and return it joined with author display fields
    async fn create(&self, message: &ChatMessage) -> Result<ChatMessageWithAuthor>;

    /// List messages with `created_at >= since`, ascending, capped at `limit`,
    /// each joined with author display fields
    async fn list_since(
        &self,
        since: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<ChatMessageWithAuthor>>;

    /// Delete messages with `created_at` strictly older than `cutoff`,
    /// returning the number of deleted records
    async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> Result<u64>;
}

/// Read-only listing of the externally managed streamer configuration.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StreamerDirectory: Send + Sync {
    /// List all tracked streamers in stable iteration order
    async fn list(&self) -> Result<Vec<StreamerConfig>>;
}
