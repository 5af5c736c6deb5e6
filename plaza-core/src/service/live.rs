//! Live status aggregation
//!
//! Answers "which configured streamers are currently live" from a
//! short-lived cache, refreshing it with one concurrent poll per streamer.
//! Each poll is independently fault-isolated: a failing provider yields "no
//! live stream" and never aborts or delays the others.

use std::sync::Arc;

use futures::future;
use tracing::{debug, info, warn};

use crate::{
    cache::LiveCache,
    models::{LiveStreamRecord, StreamerConfig},
    provider::ProviderRegistry,
    repository::StreamerDirectory,
};

pub struct LiveStatusService {
    directory: Arc<dyn StreamerDirectory>,
    registry: Arc<ProviderRegistry>,
    cache: LiveCache,
}

impl LiveStatusService {
    #[must_use]
    pub fn new(
        directory: Arc<dyn StreamerDirectory>,
        registry: Arc<ProviderRegistry>,
        cache_ttl: std::time::Duration,
    ) -> Self {
        Self {
            directory,
            registry,
            cache: LiveCache::new(cache_ttl),
        }
    }

    /// Get the current ordered sequence of live streams.
    ///
    /// Serves the cache while fresh and non-empty; otherwise fans out to
    /// every configured provider, waits for the full set, and replaces the
    /// cache. Never fails: every error degrades to an empty or partial
    /// result.
    pub async fn get_live_streams(&self) -> Vec<LiveStreamRecord> {
        if let Some(entries) = self.cache.fresh() {
            debug!(entries = entries.len(), "Serving live status from cache");
            return entries;
        }

        self.refresh().await
    }

    async fn refresh(&self) -> Vec<LiveStreamRecord> {
        let streamers = match self.directory.list().await {
            Ok(streamers) => streamers,
            Err(e) => {
                warn!(error = %e, "Failed to load streamer configuration");
                return Vec::new();
            }
        };

        // One poll per streamer, all concurrent; the barrier waits for the
        // full set before publishing, keeping streamer-iteration order.
        let polls = streamers.iter().map(|streamer| self.poll_one(streamer));
        let results = future::join_all(polls).await;

        let entries: Vec<LiveStreamRecord> = results.into_iter().flatten().collect();

        info!(
            polled = streamers.len(),
            live = entries.len(),
            "Live status refresh completed"
        );

        self.cache.store(entries.clone());
        entries
    }

    async fn poll_one(&self, streamer: &StreamerConfig) -> Option<LiveStreamRecord> {
        let Some(provider) = self.registry.get(streamer.platform) else {
            warn!(
                platform = %streamer.platform,
                streamer = %streamer.name,
                "No provider registered for platform"
            );
            return None;
        };

        match provider.poll(streamer).await {
            Ok(record) => record,
            Err(e) => {
                warn!(
                    streamer = %streamer.name,
                    platform = %streamer.platform,
                    error = %e,
                    "Live status poll failed"
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use crate::models::{Platform, StreamerId};
    use crate::provider::{LiveStatusProvider, ProviderError};
    use crate::repository::MockStreamerDirectory;
    use crate::Error;

    /// Provider stub returning a fixed record (or "not live") every poll
    struct StaticProvider {
        platform: Platform,
        record: Option<LiveStreamRecord>,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl LiveStatusProvider for StaticProvider {
        fn platform(&self) -> Platform {
            self.platform
        }

        async fn poll(
            &self,
            _streamer: &StreamerConfig,
        ) -> Result<Option<LiveStreamRecord>, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.record.clone())
        }
    }

    /// Provider stub that always fails
    struct FailingProvider {
        platform: Platform,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl LiveStatusProvider for FailingProvider {
        fn platform(&self) -> Platform {
            self.platform
        }

        async fn poll(
            &self,
            _streamer: &StreamerConfig,
        ) -> Result<Option<LiveStreamRecord>, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(ProviderError::Network("connection refused".to_string()))
        }
    }

    fn streamer(name: &str, platform: Platform) -> StreamerConfig {
        StreamerConfig {
            id: StreamerId::from_string(format!("{name}-id")),
            name: name.to_string(),
            platform,
            platform_id: format!("{name}-platform-id"),
        }
    }

    fn record(name: &str, platform: Platform, viewer_count: u64) -> LiveStreamRecord {
        let streamer_id = StreamerId::from_string(format!("{name}-id"));
        LiveStreamRecord {
            id: LiveStreamRecord::record_id(platform, &streamer_id),
            streamer_name: name.to_string(),
            platform,
            title: format!("{name} stream"),
            thumbnail_url: "https://example.com/t.jpg".to_string(),
            viewer_count,
            stream_url: "https://example.com/live".to_string(),
        }
    }

    fn directory_with(streamers: Vec<StreamerConfig>) -> Arc<MockStreamerDirectory> {
        let mut directory = MockStreamerDirectory::new();
        directory
            .expect_list()
            .returning(move || Ok(streamers.clone()));
        Arc::new(directory)
    }

    #[tokio::test]
    async fn test_failing_provider_is_isolated() {
        // Streamer A on a healthy platform, B on a failing one
        let calls = Arc::new(AtomicUsize::new(0));
        let mut registry = ProviderRegistry::new();
        registry.register(Arc::new(StaticProvider {
            platform: Platform::Youtube,
            record: Some(record("alice", Platform::Youtube, 120)),
            calls: calls.clone(),
        }));
        registry.register(Arc::new(FailingProvider {
            platform: Platform::Twitch,
            calls: calls.clone(),
        }));

        let service = LiveStatusService::new(
            directory_with(vec![
                streamer("alice", Platform::Youtube),
                streamer("bob", Platform::Twitch),
            ]),
            Arc::new(registry),
            Duration::from_secs(30),
        );

        let streams = service.get_live_streams().await;
        assert_eq!(streams.len(), 1);
        assert_eq!(streams[0].streamer_name, "alice");
        assert_eq!(streams[0].viewer_count, 120);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_fresh_cache_skips_second_fan_out() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut registry = ProviderRegistry::new();
        registry.register(Arc::new(StaticProvider {
            platform: Platform::Twitch,
            record: Some(record("alice", Platform::Twitch, 7)),
            calls: calls.clone(),
        }));

        let service = LiveStatusService::new(
            directory_with(vec![streamer("alice", Platform::Twitch)]),
            Arc::new(registry),
            Duration::from_secs(30),
        );

        let first = service.get_live_streams().await;
        let second = service.get_live_streams().await;

        assert_eq!(first, second);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_all_empty_result_triggers_refresh_on_next_call() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut registry = ProviderRegistry::new();
        registry.register(Arc::new(StaticProvider {
            platform: Platform::Twitch,
            record: None,
            calls: calls.clone(),
        }));

        let service = LiveStatusService::new(
            directory_with(vec![streamer("alice", Platform::Twitch)]),
            Arc::new(registry),
            Duration::from_secs(30),
        );

        assert!(service.get_live_streams().await.is_empty());
        assert!(service.get_live_streams().await.is_empty());
        // No caching of the empty result: each call polled again
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_expired_cache_triggers_refresh() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut registry = ProviderRegistry::new();
        registry.register(Arc::new(StaticProvider {
            platform: Platform::Twitch,
            record: Some(record("alice", Platform::Twitch, 7)),
            calls: calls.clone(),
        }));

        let service = LiveStatusService::new(
            directory_with(vec![streamer("alice", Platform::Twitch)]),
            Arc::new(registry),
            Duration::ZERO,
        );

        service.get_live_streams().await;
        service.get_live_streams().await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_results_keep_streamer_iteration_order() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut registry = ProviderRegistry::new();
        // Busy stream first in viewer count, but listed second
        registry.register(Arc::new(StaticProvider {
            platform: Platform::Twitch,
            record: Some(record("alice", Platform::Twitch, 5)),
            calls: calls.clone(),
        }));
        registry.register(Arc::new(StaticProvider {
            platform: Platform::Youtube,
            record: Some(record("bob", Platform::Youtube, 9000)),
            calls: calls.clone(),
        }));

        let service = LiveStatusService::new(
            directory_with(vec![
                streamer("alice", Platform::Twitch),
                streamer("bob", Platform::Youtube),
            ]),
            Arc::new(registry),
            Duration::from_secs(30),
        );

        let streams = service.get_live_streams().await;
        let names: Vec<&str> = streams.iter().map(|s| s.streamer_name.as_str()).collect();
        assert_eq!(names, vec!["alice", "bob"]);
    }

    #[tokio::test]
    async fn test_directory_failure_degrades_to_empty() {
        let mut directory = MockStreamerDirectory::new();
        directory
            .expect_list()
            .returning(|| Err(Error::Internal("store unavailable".to_string())));

        let service = LiveStatusService::new(
            Arc::new(directory),
            Arc::new(ProviderRegistry::new()),
            Duration::from_secs(30),
        );

        assert!(service.get_live_streams().await.is_empty());
    }

    #[tokio::test]
    async fn test_unregistered_platform_yields_no_record() {
        let service = LiveStatusService::new(
            directory_with(vec![streamer("alice", Platform::Kick)]),
            Arc::new(ProviderRegistry::new()),
            Duration::from_secs(30),
        );

        assert!(service.get_live_streams().await.is_empty());
    }
}
