//! Live status provider adapters
//!
//! One adapter per streaming platform, each translating that platform's
//! protocol into the aggregator's normalized `LiveStreamRecord`.

pub mod error;
pub mod kick;
pub mod registry;
pub mod twitcasting;
pub mod twitch;
pub mod youtube;

use async_trait::async_trait;

use crate::models::{LiveStreamRecord, Platform, StreamerConfig};

pub use error::{check_response, json_with_limit, ProviderError};
pub use kick::KickProvider;
pub use registry::ProviderRegistry;
pub use twitcasting::TwitcastingProvider;
pub use twitch::TwitchProvider;
pub use youtube::YouTubeProvider;

/// Live status provider trait
///
/// Poll one streamer, return an optional normalized live record.
/// `Ok(None)` means "not currently live" and is never an error; errors are
/// for transport/protocol failures and are caught at the aggregator
/// boundary.
#[async_trait]
pub trait LiveStatusProvider: Send + Sync {
    /// The platform this adapter answers for
    fn platform(&self) -> Platform;

    /// Poll the platform for the streamer's current live status
    async fn poll(&self, streamer: &StreamerConfig)
        -> Result<Option<LiveStreamRecord>, ProviderError>;
}
