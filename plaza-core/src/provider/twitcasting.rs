//! Twitcasting live status adapter
//!
//! Bearer-token v2 API flow: a user lookup for the `is_live` flag, then the
//! current-live movie details.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::{check_response, json_with_limit, LiveStatusProvider, ProviderError};
use crate::models::{LiveStreamRecord, Platform, StreamerConfig};

const API_BASE: &str = "https://apiv2.twitcasting.tv";

pub struct TwitcastingProvider {
    client: Client,
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct UserResp {
    user: TwitcastingUser,
}

#[derive(Debug, Deserialize)]
struct TwitcastingUser {
    #[serde(default)]
    is_live: bool,
}

#[derive(Debug, Deserialize)]
struct CurrentLiveResp {
    movie: TwitcastingMovie,
}

#[derive(Debug, Deserialize)]
struct TwitcastingMovie {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    large_thumbnail: Option<String>,
    #[serde(default)]
    current_view_count: Option<u64>,
}

impl TwitcastingProvider {
    #[must_use]
    pub fn new(access_token: String) -> Self {
        Self {
            client: super::error::SHARED_CLIENT.clone(),
            access_token,
        }
    }

    fn record_from_movie(streamer: &StreamerConfig, movie: &TwitcastingMovie) -> LiveStreamRecord {
        LiveStreamRecord {
            id: LiveStreamRecord::record_id(Platform::Twitcasting, &streamer.id),
            streamer_name: streamer.name.clone(),
            platform: Platform::Twitcasting,
            title: movie
                .title
                .clone()
                .unwrap_or_else(|| format!("{} live stream", streamer.name)),
            thumbnail_url: movie.large_thumbnail.clone().unwrap_or_default(),
            viewer_count: movie.current_view_count.unwrap_or(0),
            stream_url: format!("https://twitcasting.tv/{}", streamer.platform_id),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<T, ProviderError> {
        let response = self
            .client
            .get(format!("{API_BASE}{path}"))
            .header("Accept", "application/json")
            .header("X-Api-Version", "2.0")
            .bearer_auth(&self.access_token)
            .send()
            .await?;
        json_with_limit(check_response(response)?).await
    }
}

#[async_trait]
impl LiveStatusProvider for TwitcastingProvider {
    fn platform(&self) -> Platform {
        Platform::Twitcasting
    }

    async fn poll(
        &self,
        streamer: &StreamerConfig,
    ) -> Result<Option<LiveStreamRecord>, ProviderError> {
        if self.access_token.is_empty() {
            return Err(ProviderError::InvalidConfig(
                "Twitcasting access token is not configured".to_string(),
            ));
        }

        let user: UserResp = self
            .get_json(&format!("/users/{}", streamer.platform_id))
            .await?;

        if !user.user.is_live {
            return Ok(None);
        }

        let live: CurrentLiveResp = self
            .get_json(&format!("/users/{}/current_live", streamer.platform_id))
            .await?;

        Ok(Some(Self::record_from_movie(streamer, &live.movie)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StreamerId;

    fn sample_streamer() -> StreamerConfig {
        StreamerConfig {
            id: StreamerId::from_string("st-tc-000001".to_string()),
            name: "carol".to_string(),
            platform: Platform::Twitcasting,
            platform_id: "carol_cast".to_string(),
        }
    }

    #[test]
    fn test_record_from_movie_normalizes_fields() {
        let movie: TwitcastingMovie = serde_json::from_value(serde_json::json!({
            "title": "Evening chat",
            "large_thumbnail": "https://twitcasting.tv/img/large.jpg",
            "current_view_count": 42
        }))
        .unwrap();

        let record = TwitcastingProvider::record_from_movie(&sample_streamer(), &movie);
        assert_eq!(record.id, "twitcasting-st-tc-000001");
        assert_eq!(record.title, "Evening chat");
        assert_eq!(record.viewer_count, 42);
        assert_eq!(record.stream_url, "https://twitcasting.tv/carol_cast");
    }

    #[test]
    fn test_record_defaults_for_sparse_movie() {
        let movie: TwitcastingMovie = serde_json::from_str("{}").unwrap();

        let record = TwitcastingProvider::record_from_movie(&sample_streamer(), &movie);
        assert_eq!(record.title, "carol live stream");
        assert_eq!(record.viewer_count, 0);
    }

    #[test]
    fn test_user_is_live_defaults_to_false() {
        let user: UserResp = serde_json::from_str(r#"{"user": {}}"#).unwrap();
        assert!(!user.user.is_live);
    }
}
