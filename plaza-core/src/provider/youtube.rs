//! YouTube live status adapter
//!
//! Key-authenticated Data API v3 flow: a live-event search on the channel,
//! then a videos lookup for title, thumbnail, and concurrent viewers.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::{check_response, json_with_limit, LiveStatusProvider, ProviderError};
use crate::models::{LiveStreamRecord, Platform, StreamerConfig};

const SEARCH_URL: &str = "https://www.googleapis.com/youtube/v3/search";
const VIDEOS_URL: &str = "https://www.googleapis.com/youtube/v3/videos";

pub struct YouTubeProvider {
    client: Client,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct SearchResp {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: SearchItemId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchItemId {
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VideosResp {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoItem {
    snippet: VideoSnippet,
    #[serde(default)]
    live_streaming_details: Option<LiveStreamingDetails>,
}

#[derive(Debug, Deserialize)]
struct VideoSnippet {
    title: String,
    thumbnails: Thumbnails,
}

#[derive(Debug, Deserialize)]
struct Thumbnails {
    #[serde(default)]
    high: Option<Thumbnail>,
    #[serde(default, rename = "default")]
    fallback: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LiveStreamingDetails {
    /// The API reports this as a string; absent when the stream just started
    concurrent_viewers: Option<String>,
}

impl YouTubeProvider {
    #[must_use]
    pub fn new(api_key: String) -> Self {
        Self {
            client: super::error::SHARED_CLIENT.clone(),
            api_key,
        }
    }

    /// Build the normalized record from the videos-lookup payload
    fn record_from_video(
        streamer: &StreamerConfig,
        video_id: &str,
        item: &VideoItem,
    ) -> Result<LiveStreamRecord, ProviderError> {
        let thumbnail = item
            .snippet
            .thumbnails
            .high
            .as_ref()
            .or(item.snippet.thumbnails.fallback.as_ref())
            .ok_or_else(|| ProviderError::Parse("Video has no thumbnail".to_string()))?;

        let viewer_count = item
            .live_streaming_details
            .as_ref()
            .and_then(|d| d.concurrent_viewers.as_deref())
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(0);

        Ok(LiveStreamRecord {
            id: LiveStreamRecord::record_id(Platform::Youtube, &streamer.id),
            streamer_name: streamer.name.clone(),
            platform: Platform::Youtube,
            title: item.snippet.title.clone(),
            thumbnail_url: thumbnail.url.clone(),
            viewer_count,
            stream_url: format!("https://www.youtube.com/watch?v={video_id}"),
        })
    }
}

#[async_trait]
impl LiveStatusProvider for YouTubeProvider {
    fn platform(&self) -> Platform {
        Platform::Youtube
    }

    async fn poll(
        &self,
        streamer: &StreamerConfig,
    ) -> Result<Option<LiveStreamRecord>, ProviderError> {
        if self.api_key.is_empty() {
            return Err(ProviderError::InvalidConfig(
                "YouTube API key is not configured".to_string(),
            ));
        }

        // Search for a live event on the channel
        let response = self
            .client
            .get(SEARCH_URL)
            .query(&[
                ("part", "snippet"),
                ("channelId", streamer.platform_id.as_str()),
                ("type", "video"),
                ("eventType", "live"),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;
        let search: SearchResp = json_with_limit(check_response(response)?).await?;

        let Some(video_id) = search
            .items
            .first()
            .and_then(|item| item.id.video_id.clone())
        else {
            return Ok(None); // Not live
        };

        // Look up the live video's details
        let response = self
            .client
            .get(VIDEOS_URL)
            .query(&[
                ("part", "snippet,liveStreamingDetails"),
                ("id", video_id.as_str()),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;
        let videos: VideosResp = json_with_limit(check_response(response)?).await?;

        let Some(item) = videos.items.first() else {
            return Ok(None);
        };

        Self::record_from_video(streamer, &video_id, item).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StreamerId;

    fn sample_streamer() -> StreamerConfig {
        StreamerConfig {
            id: StreamerId::from_string("st-yt-000001".to_string()),
            name: "alice".to_string(),
            platform: Platform::Youtube,
            platform_id: "UCchannel".to_string(),
        }
    }

    #[test]
    fn test_record_from_video_normalizes_fields() {
        let item: VideoItem = serde_json::from_value(serde_json::json!({
            "snippet": {
                "title": "Morning stream",
                "thumbnails": {
                    "high": {"url": "https://i.ytimg.com/vi/abc/hqdefault.jpg"}
                }
            },
            "liveStreamingDetails": {"concurrentViewers": "1523"}
        }))
        .unwrap();

        let record = YouTubeProvider::record_from_video(&sample_streamer(), "abc", &item).unwrap();
        assert_eq!(record.id, "youtube-st-yt-000001");
        assert_eq!(record.title, "Morning stream");
        assert_eq!(record.viewer_count, 1523);
        assert_eq!(record.stream_url, "https://www.youtube.com/watch?v=abc");
        assert_eq!(
            record.thumbnail_url,
            "https://i.ytimg.com/vi/abc/hqdefault.jpg"
        );
    }

    #[test]
    fn test_viewer_count_defaults_to_zero_when_omitted() {
        let item: VideoItem = serde_json::from_value(serde_json::json!({
            "snippet": {
                "title": "Just started",
                "thumbnails": {
                    "default": {"url": "https://i.ytimg.com/vi/abc/default.jpg"}
                }
            }
        }))
        .unwrap();

        let record = YouTubeProvider::record_from_video(&sample_streamer(), "abc", &item).unwrap();
        assert_eq!(record.viewer_count, 0);
        assert_eq!(
            record.thumbnail_url,
            "https://i.ytimg.com/vi/abc/default.jpg"
        );
    }

    #[test]
    fn test_search_response_without_items_means_not_live() {
        let search: SearchResp = serde_json::from_str("{}").unwrap();
        assert!(search.items.is_empty());
    }
}
