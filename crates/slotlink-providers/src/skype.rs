//! Skype invite link synthesis.

use slotlink_core::{ContactField, MeetingLink, MeetingPlatform, PlatformConfig};

use crate::error::{ProviderError, ProviderResult};
use crate::provider::{BoxFuture, LinkRequest, MeetingProvider};

/// Builds Skype invite links addressed to the seller's username.
///
/// No identifier is generated; the username is the whole address.
#[derive(Debug, Default)]
pub struct SkypeProvider;

impl SkypeProvider {
    /// Creates a Skype provider.
    pub fn new() -> Self {
        Self
    }
}

impl MeetingProvider for SkypeProvider {
    fn platform(&self) -> MeetingPlatform {
        MeetingPlatform::Skype
    }

    fn create_link(
        &self,
        config: PlatformConfig,
        _request: LinkRequest,
    ) -> BoxFuture<'_, ProviderResult<MeetingLink>> {
        Box::pin(async move {
            let username = config
                .username
                .as_deref()
                .map(str::trim)
                .filter(|u| !u.is_empty());
            let Some(username) = username else {
                return Err(ProviderError::missing_field(ContactField::Username)
                    .with_platform(self.platform().as_str()));
            };

            let join_url = format!("https://join.skype.com/invite/{username}");
            Ok(MeetingLink::new(MeetingPlatform::Skype, join_url))
        })
    }
}
