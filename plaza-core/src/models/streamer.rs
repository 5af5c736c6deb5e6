use serde::{Deserialize, Serialize};

use super::id::StreamerId;
use crate::{Error, Result};

/// Streaming platform a tracked streamer broadcasts on.
///
/// Closed set: adding a platform means adding a variant and its adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Youtube,
    Twitch,
    Kick,
    Twitcasting,
}

impl Platform {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Youtube => "youtube",
            Self::Twitch => "twitch",
            Self::Kick => "kick",
            Self::Twitcasting => "twitcasting",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "youtube" => Ok(Self::Youtube),
            "twitch" => Ok(Self::Twitch),
            "kick" => Ok(Self::Kick),
            "twitcasting" => Ok(Self::Twitcasting),
            other => Err(Error::InvalidInput(format!("Unknown platform: {other}"))),
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tracked streamer, read-only from this layer's perspective.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamerConfig {
    pub id: StreamerId,
    pub name: String,
    pub platform: Platform,
    /// Provider-specific channel/user identifier
    pub platform_id: String,
}

/// A normalized live-stream snapshot, constructed fresh on every successful
/// poll. Lives only inside the aggregation cache; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveStreamRecord {
    pub id: String,
    pub streamer_name: String,
    pub platform: Platform,
    pub title: String,
    pub thumbnail_url: String,
    pub viewer_count: u64,
    pub stream_url: String,
}

impl LiveStreamRecord {
    /// Deterministic record id, derived from platform + streamer id
    #[must_use]
    pub fn record_id(platform: Platform, streamer_id: &StreamerId) -> String {
        format!("{}-{}", platform.as_str(), streamer_id.as_str())
    }
}
