//! Provider registry keyed by platform.
//!
//! The registry is populated once at startup with one provider per platform.
//! Platform keys coming in from seller settings are resolved here, at the
//! boundary: an unknown key yields an `UnsupportedPlatform` error instead of
//! reaching a provider.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use slotlink_core::{MeetingLink, MeetingPlatform, PlatformConfig, SellerSettings};

use crate::error::{ProviderError, ProviderResult};
use crate::google_meet::GoogleMeetProvider;
use crate::idgen::IdSource;
use crate::phone::PhoneProvider;
use crate::provider::{LinkRequest, MeetingProvider};
use crate::skype::SkypeProvider;
use crate::teams::TeamsProvider;
use crate::zoom::ZoomProvider;

/// A closed set of meeting providers, one per supported platform.
pub struct ProviderRegistry {
    providers: HashMap<MeetingPlatform, Box<dyn MeetingProvider>>,
}

impl ProviderRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            providers: HashMap::new(),
        }
    }

    /// Creates a registry with all five built-in providers sharing the given
    /// id source.
    pub fn with_defaults(ids: Arc<dyn IdSource>) -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(ZoomProvider::new(ids.clone())));
        registry.register(Box::new(GoogleMeetProvider::new(ids.clone())));
        registry.register(Box::new(TeamsProvider::new(ids)));
        registry.register(Box::new(SkypeProvider::new()));
        registry.register(Box::new(PhoneProvider::new()));
        registry
    }

    /// Registers a provider under its own platform, replacing any previous
    /// provider for that platform.
    pub fn register(&mut self, provider: Box<dyn MeetingProvider>) {
        self.providers.insert(provider.platform(), provider);
    }

    /// Looks up the provider for a platform.
    pub fn get(&self, platform: MeetingPlatform) -> Option<&dyn MeetingProvider> {
        self.providers.get(&platform).map(Box::as_ref)
    }

    /// Resolves a raw platform key to its provider.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedPlatform` for keys that do not name a registered
    /// platform.
    pub fn resolve(&self, platform_key: &str) -> ProviderResult<&dyn MeetingProvider> {
        let platform = MeetingPlatform::from_key(platform_key)
            .ok_or_else(|| ProviderError::unsupported(platform_key))?;
        self.get(platform)
            .ok_or_else(|| ProviderError::unsupported(platform_key))
    }

    /// Resolves a platform key, derives the per-call config from seller
    /// settings, and dispatches link synthesis.
    pub async fn create_link(
        &self,
        platform_key: &str,
        settings: &SellerSettings,
        request: LinkRequest,
    ) -> ProviderResult<MeetingLink> {
        let provider = self.resolve(platform_key)?;
        let config = PlatformConfig::from_settings(provider.platform(), settings);
        debug!(platform = platform_key, title = %request.title, "dispatching link synthesis");
        provider.create_link(config, request).await
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderErrorCode;
    use crate::idgen::{FixedIdSource, RandomIdSource};
    use chrono::Utc;

    fn request() -> LinkRequest {
        LinkRequest::new(Utc::now(), 30, "Consultation")
    }

    fn full_settings() -> SellerSettings {
        SellerSettings {
            email: Some("seller@example.com".into()),
            skype_username: Some("seller.skype".into()),
            phone_number: Some("+14155552671".into()),
        }
    }

    #[test]
    fn defaults_cover_all_platforms() {
        let registry = ProviderRegistry::with_defaults(Arc::new(RandomIdSource::new()));
        for platform in MeetingPlatform::ALL {
            assert!(registry.get(platform).is_some(), "{platform} missing");
        }
    }

    #[test]
    fn unknown_key_is_rejected_at_the_boundary() {
        let registry = ProviderRegistry::with_defaults(Arc::new(RandomIdSource::new()));
        let err = registry.resolve("Webex").unwrap_err();
        assert_eq!(err.code(), ProviderErrorCode::UnsupportedPlatform);
        assert!(err.message().contains("Webex"));
    }

    #[tokio::test]
    async fn create_link_for_every_platform() {
        let registry = ProviderRegistry::with_defaults(Arc::new(RandomIdSource::new()));
        let settings = full_settings();

        for platform in MeetingPlatform::ALL {
            let link = registry
                .create_link(platform.as_str(), &settings, request())
                .await
                .unwrap();
            assert_eq!(link.platform, platform);
            assert!(!link.join_url.is_empty());
        }
    }

    #[tokio::test]
    async fn link_shapes_match_platform_templates() {
        let ids = Arc::new(FixedIdSource::new([
            "12345678901",
            "p4sswd",
            "abc",
            "d3f4",
            "xyz",
            "tok1234567890",
        ]));
        let registry = ProviderRegistry::with_defaults(ids);
        let settings = full_settings();

        let zoom = registry
            .create_link("Zoom Meeting", &settings, request())
            .await
            .unwrap();
        assert_eq!(zoom.join_url, "https://zoom.us/j/12345678901?pwd=p4sswd");

        let meet = registry
            .create_link("Google Meet", &settings, request())
            .await
            .unwrap();
        assert_eq!(meet.join_url, "https://meet.google.com/abc-d3f4-xyz");

        let teams = registry
            .create_link("Microsoft Teams", &settings, request())
            .await
            .unwrap();
        assert!(teams.join_url.starts_with(
            "https://teams.microsoft.com/l/meetup-join/19:meeting_tok1234567890@thread.v2/0"
        ));

        let skype = registry
            .create_link("Skype", &settings, request())
            .await
            .unwrap();
        assert_eq!(skype.join_url, "https://join.skype.com/invite/seller.skype");

        let phone = registry
            .create_link("Phone Call", &settings, request())
            .await
            .unwrap();
        assert_eq!(phone.join_url, "tel:+14155552671");
    }

    #[tokio::test]
    async fn create_link_with_unknown_key_fails() {
        let registry = ProviderRegistry::with_defaults(Arc::new(RandomIdSource::new()));
        let err = registry
            .create_link("Discord", &full_settings(), request())
            .await
            .unwrap_err();
        assert_eq!(err.code(), ProviderErrorCode::UnsupportedPlatform);
    }
}
