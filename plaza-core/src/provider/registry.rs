//! Provider registry
//!
//! Maps each platform tag to its adapter. Dispatch stays uniform: the
//! aggregator looks up by tag and calls `poll`, whatever the provider.

use std::collections::HashMap;
use std::sync::Arc;

use super::{KickProvider, LiveStatusProvider, TwitcastingProvider, TwitchProvider, YouTubeProvider};
use crate::config::LiveConfig;
use crate::models::Platform;

/// Registry of live status providers, keyed by platform
#[derive(Default)]
pub struct ProviderRegistry {
    providers: HashMap<Platform, Arc<dyn LiveStatusProvider>>,
}

impl ProviderRegistry {
    /// Create new empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            providers: HashMap::new(),
        }
    }

    /// Build the full registry from configuration, one adapter per platform
    #[must_use]
    pub fn from_config(config: &LiveConfig) -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(YouTubeProvider::new(
            config.youtube_api_key.clone(),
        )));
        registry.register(Arc::new(TwitchProvider::new(
            config.twitch_client_id.clone(),
            config.twitch_client_secret.clone(),
        )));
        registry.register(Arc::new(KickProvider::new()));
        registry.register(Arc::new(TwitcastingProvider::new(
            config.twitcasting_access_token.clone(),
        )));
        registry
    }

    /// Register a provider under its own platform tag
    pub fn register(&mut self, provider: Arc<dyn LiveStatusProvider>) {
        self.providers.insert(provider.platform(), provider);
    }

    /// Get the provider for a platform
    #[must_use]
    pub fn get(&self, platform: Platform) -> Option<Arc<dyn LiveStatusProvider>> {
        self.providers.get(&platform).cloned()
    }

    /// Number of registered providers
    #[must_use]
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_registers_every_platform() {
        let registry = ProviderRegistry::from_config(&LiveConfig::default());
        assert_eq!(registry.len(), 4);
        for platform in [
            Platform::Youtube,
            Platform::Twitch,
            Platform::Kick,
            Platform::Twitcasting,
        ] {
            let provider = registry.get(platform).unwrap();
            assert_eq!(provider.platform(), platform);
        }
    }

    #[test]
    fn test_empty_registry_returns_none() {
        let registry = ProviderRegistry::new();
        assert!(registry.get(Platform::Twitch).is_none());
    }
}
