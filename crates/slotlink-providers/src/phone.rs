//! Phone-call fallback link synthesis.

use slotlink_core::{ContactField, MeetingLink, MeetingPlatform, PlatformConfig};

use crate::error::{ProviderError, ProviderResult};
use crate::provider::{BoxFuture, LinkRequest, MeetingProvider};

/// Builds `tel:` links from the seller's phone number.
///
/// Internal whitespace is stripped so the link dials cleanly.
#[derive(Debug, Default)]
pub struct PhoneProvider;

impl PhoneProvider {
    /// Creates a phone provider.
    pub fn new() -> Self {
        Self
    }
}

impl MeetingProvider for PhoneProvider {
    fn platform(&self) -> MeetingPlatform {
        MeetingPlatform::PhoneCall
    }

    fn create_link(
        &self,
        config: PlatformConfig,
        _request: LinkRequest,
    ) -> BoxFuture<'_, ProviderResult<MeetingLink>> {
        Box::pin(async move {
            let phone: String = config
                .phone
                .as_deref()
                .unwrap_or("")
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect();
            if phone.is_empty() {
                return Err(ProviderError::missing_field(ContactField::Phone)
                    .with_platform(self.platform().as_str()));
            }

            Ok(MeetingLink::new(
                MeetingPlatform::PhoneCall,
                format!("tel:{phone}"),
            ))
        })
    }
}
