//! Microsoft Teams link synthesis.

use std::sync::Arc;

use slotlink_core::{ContactField, MeetingLink, MeetingPlatform, PlatformConfig};

use crate::error::{ProviderError, ProviderResult};
use crate::idgen::IdSource;
use crate::provider::{BoxFuture, LinkRequest, MeetingProvider};

/// Synthesizes Microsoft Teams deep links from a 13-character opaque meeting
/// token embedded in the `meetup-join` path.
pub struct TeamsProvider {
    ids: Arc<dyn IdSource>,
}

impl TeamsProvider {
    /// Creates a Teams provider over the given id source.
    pub fn new(ids: Arc<dyn IdSource>) -> Self {
        Self { ids }
    }
}

impl MeetingProvider for TeamsProvider {
    fn platform(&self) -> MeetingPlatform {
        MeetingPlatform::MicrosoftTeams
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

            let token = self.ids.lower_alnum(13);
            let join_url = format!(
                "https://teams.microsoft.com/l/meetup-join/19:meeting_{token}@thread.v2/0?context={{\"Tid\":\"tenant-id\"}}"
            );

            Ok(MeetingLink::new(MeetingPlatform::MicrosoftTeams, join_url).with_meeting_id(token))
        })
    }
}
