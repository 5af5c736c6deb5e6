//! Twitch live status adapter
//!
//! Helix flow: client-credentials token exchange, then a streams query and
//! a users lookup (for the channel login the stream URL is built from).

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::{check_response, json_with_limit, LiveStatusProvider, ProviderError};
use crate::models::{LiveStreamRecord, Platform, StreamerConfig};

const TOKEN_URL: &str = "https://id.twitch.tv/oauth2/token";
const STREAMS_URL: &str = "https://api.twitch.tv/helix/streams";
const USERS_URL: &str = "https://api.twitch.tv/helix/users";

pub struct TwitchProvider {
    client: Client,
    client_id: String,
    client_secret: String,
}

#[derive(Debug, Deserialize)]
struct TokenResp {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct StreamsResp {
    #[serde(default)]
    data: Vec<TwitchStream>,
}

#[derive(Debug, Deserialize)]
struct TwitchStream {
    title: String,
    /// Template URL with literal `{width}`/`{height}` placeholders
    thumbnail_url: String,
    #[serde(default)]
    viewer_count: u64,
}

#[derive(Debug, Deserialize)]
struct UsersResp {
    #[serde(default)]
    data: Vec<TwitchUser>,
}

#[derive(Debug, Deserialize)]
struct TwitchUser {
    login: String,
}

impl TwitchProvider {
    #[must_use]
    pub fn new(client_id: String, client_secret: String) -> Self {
        Self {
            client: super::error::SHARED_CLIENT.clone(),
            client_id,
            client_secret,
        }
    }

    /// Exchange client credentials for an app access token
    async fn fetch_access_token(&self) -> Result<String, ProviderError> {
        let response = self
            .client
            .post(TOKEN_URL)
            .query(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("grant_type", "client_credentials"),
            ])
            .send()
            .await?;
        let token: TokenResp = json_with_limit(check_response(response)?).await?;
        Ok(token.access_token)
    }

    /// Build the normalized record from a helix stream + user payload
    fn record_from_stream(
        streamer: &StreamerConfig,
        stream: &TwitchStream,
        login: &str,
    ) -> LiveStreamRecord {
        LiveStreamRecord {
            id: LiveStreamRecord::record_id(Platform::Twitch, &streamer.id),
            streamer_name: streamer.name.clone(),
            platform: Platform::Twitch,
            title: stream.title.clone(),
            thumbnail_url: stream
                .thumbnail_url
                .replace("{width}", "640")
                .replace("{height}", "360"),
            viewer_count: stream.viewer_count,
            stream_url: format!("https://twitch.tv/{login}"),
        }
    }
}

#[async_trait]
impl LiveStatusProvider for TwitchProvider {
    fn platform(&self) -> Platform {
        Platform::Twitch
    }

    async fn poll(
        &self,
        streamer: &StreamerConfig,
    ) -> Result<Option<LiveStreamRecord>, ProviderError> {
        if self.client_id.is_empty() || self.client_secret.is_empty() {
            return Err(ProviderError::InvalidConfig(
                "Twitch credentials are not configured".to_string(),
            ));
        }

        let access_token = self.fetch_access_token().await?;

        let response = self
            .client
            .get(STREAMS_URL)
            .query(&[("user_id", streamer.platform_id.as_str())])
            .header("Client-ID", &self.client_id)
            .bearer_auth(&access_token)
            .send()
            .await?;
        let streams: StreamsResp = json_with_limit(check_response(response)?).await?;

        let Some(stream) = streams.data.first() else {
            return Ok(None); // Not live
        };

        let response = self
            .client
            .get(USERS_URL)
            .query(&[("id", streamer.platform_id.as_str())])
            .header("Client-ID", &self.client_id)
            .bearer_auth(&access_token)
            .send()
            .await?;
        let users: UsersResp = json_with_limit(check_response(response)?).await?;

        let user = users.data.first().ok_or_else(|| {
            ProviderError::Parse(format!("No user record for id {}", streamer.platform_id))
        })?;

        Ok(Some(Self::record_from_stream(streamer, stream, &user.login)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StreamerId;

    fn sample_streamer() -> StreamerConfig {
        StreamerConfig {
            id: StreamerId::from_string("st-tw-000001".to_string()),
            name: "bob".to_string(),
            platform: Platform::Twitch,
            platform_id: "44445555".to_string(),
        }
    }

    #[test]
    fn test_record_resolves_thumbnail_template() {
        let stream: TwitchStream = serde_json::from_value(serde_json::json!({
            "title": "Ranked grind",
            "thumbnail_url":
                "https://static-cdn.jtvnw.net/previews-ttv/live_user_bob-{width}x{height}.jpg",
            "viewer_count": 120
        }))
        .unwrap();

        let record = TwitchProvider::record_from_stream(&sample_streamer(), &stream, "bob");
        assert_eq!(record.id, "twitch-st-tw-000001");
        assert_eq!(record.viewer_count, 120);
        assert_eq!(record.stream_url, "https://twitch.tv/bob");
        assert_eq!(
            record.thumbnail_url,
            "https://static-cdn.jtvnw.net/previews-ttv/live_user_bob-640x360.jpg"
        );
    }

    #[test]
    fn test_viewer_count_defaults_to_zero() {
        let stream: TwitchStream = serde_json::from_value(serde_json::json!({
            "title": "No count yet",
            "thumbnail_url": "https://example.com/{width}x{height}.jpg"
        }))
        .unwrap();

        let record = TwitchProvider::record_from_stream(&sample_streamer(), &stream, "bob");
        assert_eq!(record.viewer_count, 0);
    }

    #[test]
    fn test_empty_streams_data_means_not_live() {
        let streams: StreamsResp = serde_json::from_str(r#"{"data": []}"#).unwrap();
        assert!(streams.data.is_empty());
    }
}
