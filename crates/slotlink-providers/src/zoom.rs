//! Zoom meeting link synthesis.

use std::sync::Arc;

use slotlink_core::{ContactField, MeetingLink, MeetingPlatform, PlatformConfig};

use crate::error::{ProviderError, ProviderResult};
use crate::idgen::IdSource;
use crate::provider::{BoxFuture, LinkRequest, MeetingProvider};

/// Synthesizes Zoom join links: an 11-digit meeting id plus a 6-character
/// alphanumeric passcode embedded in the `pwd` query parameter.
pub struct ZoomProvider {
    ids: Arc<dyn IdSource>,
}

impl ZoomProvider {
    /// Creates a Zoom provider over the given id source.
    pub fn new(ids: Arc<dyn IdSource>) -> Self {
        Self { ids }
    }
}

impl MeetingProvider for ZoomProvider {
    fn platform(&self) -> MeetingPlatform {
        MeetingPlatform::ZoomMeeting
    }

    fn create_link(
        &self,
        config: PlatformConfig,
        _request: LinkRequest,
    ) -> BoxFuture<'_, ProviderResult<MeetingLink>> {
        Box::pin(async move {
            // The host email does not appear in the link but a meeting can
            // only be bound to a host account; re-check it here.
            let host_email = config.email.as_deref().map(str::trim).filter(|e| !e.is_empty());
            if host_email.is_none() {
                return Err(ProviderError::missing_field(ContactField::Email)
                    .with_platform(self.platform().as_str()));
            }

            let meeting_id = self.ids.digits(11);
            let password = self.ids.alphanumeric(6);
            let join_url = format!("https://zoom.us/j/{meeting_id}?pwd={password}");

            Ok(MeetingLink::new(MeetingPlatform::ZoomMeeting, join_url)
                .with_meeting_id(meeting_id)
                .with_password(password))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderErrorCode;
    use crate::idgen::FixedIdSource;
    use chrono::Utc;

    fn request() -> LinkRequest {
        LinkRequest::new(Utc::now(), 30, "Consultation")
    }

    #[tokio::test]
    async fn synthesizes_zoom_link() {
        let ids = Arc::new(FixedIdSource::new(["98882220011", "Ab3dE9"]));
        let provider = ZoomProvider::new(ids);
        let config =
            PlatformConfig::new(MeetingPlatform::ZoomMeeting).with_email("seller@example.com");

        let link = provider.create_link(config, request()).await.unwrap();
        assert_eq!(link.join_url, "https://zoom.us/j/98882220011?pwd=Ab3dE9");
        assert_eq!(link.meeting_id.as_deref(), Some("98882220011"));
        assert_eq!(link.password.as_deref(), Some("Ab3dE9"));
        assert_eq!(link.platform, MeetingPlatform::ZoomMeeting);
    }

    #[tokio::test]
    async fn missing_email_fails_naming_the_field() {
        let provider = ZoomProvider::new(Arc::new(FixedIdSource::new(Vec::<String>::new())));
        let config = PlatformConfig::new(MeetingPlatform::ZoomMeeting);

        let err = provider.create_link(config, request()).await.unwrap_err();
        assert_eq!(err.code(), ProviderErrorCode::MissingContactField);
        assert!(err.message().contains("email"));
        assert_eq!(err.platform(), Some("Zoom Meeting"));
    }
}
