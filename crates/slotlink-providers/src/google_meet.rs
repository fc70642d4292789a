//! Google Meet link synthesis.

use std::sync::Arc;

use slotlink_core::{ContactField, MeetingLink, MeetingPlatform, PlatformConfig};

use crate::error::{ProviderError, ProviderResult};
use crate::idgen::IdSource;
use crate::provider::{BoxFuture, LinkRequest, MeetingProvider};

/// Synthesizes Google Meet links.
///
/// Meet codes are three dash-separated groups in the `xxx-xxxx-xxx` shape:
/// the outer groups are letters, the middle group mixes letters and digits.
pub struct GoogleMeetProvider {
    ids: Arc<dyn IdSource>,
}

impl GoogleMeetProvider {
    /// Creates a Google Meet provider over the given id source.
    pub fn new(ids: Arc<dyn IdSource>) -> Self {
        Self { ids }
    }
}

impl MeetingProvider for GoogleMeetProvider {
    fn platform(&self) -> MeetingPlatform {
        MeetingPlatform::GoogleMeet
    }

    fn create_link(
        &self,
        config: PlatformConfig,
        _request: LinkRequest,
    ) -> BoxFuture<'_, ProviderResult<MeetingLink>> {
        Box::pin(async move {
            let host_email = config.email.as_deref().map(str::trim).filter(|e| !e.is_empty());
            if host_email.is_none() {
                return Err(ProviderError::missing_field(ContactField::Email)
                    .with_platform(self.platform().as_str()));
            }

            let code = format!(
                "{}-{}-{}",
                self.ids.letters(3),
                self.ids.lower_alnum(4),
                self.ids.letters(3)
            );
            let join_url = format!("https://meet.google.com/{code}");

            Ok(MeetingLink::new(MeetingPlatform::GoogleMeet, join_url).with_meeting_id(code))
        })
    }
}
