//! Kick live status adapter
//!
//! Kick has no stable public API, so this adapter emits a best-effort
//! simulated signal behind the same optional-record contract. Swapping in a
//! real client later only touches this file.

use async_trait::async_trait;
use rand::RngExt;

use super::{LiveStatusProvider, ProviderError};
use crate::models::{LiveStreamRecord, Platform, StreamerConfig};

const PLACEHOLDER_THUMBNAIL: &str = "https://via.placeholder.com/640x360";

pub struct KickProvider;

impl KickProvider {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn record_for(streamer: &StreamerConfig, viewer_count: u64) -> LiveStreamRecord {
        LiveStreamRecord {
            id: LiveStreamRecord::record_id(Platform::Kick, &streamer.id),
            streamer_name: streamer.name.clone(),
            platform: Platform::Kick,
            title: format!("{} live stream", streamer.name),
            thumbnail_url: PLACEHOLDER_THUMBNAIL.to_string(),
            viewer_count,
            stream_url: format!("https://kick.com/{}", streamer.platform_id),
        }
    }
}

impl Default for KickProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LiveStatusProvider for KickProvider {
    fn platform(&self) -> Platform {
        Platform::Kick
    }

    async fn poll(
        &self,
        streamer: &StreamerConfig,
    ) -> Result<Option<LiveStreamRecord>, ProviderError> {
        let (is_live, viewer_count) = {
            let mut rng = rand::rng();
            (rng.random_bool(0.8), rng.random_range(0..1000))
        };

        if !is_live {
            return Ok(None);
        }

        Ok(Some(Self::record_for(streamer, viewer_count)))
    }
}
