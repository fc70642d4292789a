//! Video-conferencing platform types.
//!
//! This module provides:
//! - [`MeetingPlatform`]: the closed set of supported conferencing platforms
//! - [`ContactField`]: the single contact field each platform requires
//! - [`SellerSettings`]: the seller's contact details as stored in settings
//! - [`PlatformConfig`]: the transient per-call config derived from settings
//! - [`MeetingLink`]: the synthesized join link for a confirmed booking
//!
//! The platform set is a closed enum rather than free-form strings: an
//! unknown platform key is rejected when the key is parsed, not deep inside
//! a provisioning call.

use serde::{Deserialize, Serialize};
use url::Url;

/// A supported video-conferencing platform, or the phone fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MeetingPlatform {
    /// Zoom meeting with a generated id and passcode.
    #[serde(rename = "Zoom Meeting")]
    ZoomMeeting,
    /// Google Meet with a generated meeting code.
    #[serde(rename = "Google Meet")]
    GoogleMeet,
    /// Microsoft Teams deep-link meeting.
    #[serde(rename = "Microsoft Teams")]
    MicrosoftTeams,
    /// Skype invite addressed to the seller's username.
    #[serde(rename = "Skype")]
    Skype,
    /// Plain phone call to the seller's number.
    #[serde(rename = "Phone Call")]
    PhoneCall,
}

impl MeetingPlatform {
    /// All supported platforms, in registry order.
    pub const ALL: [MeetingPlatform; 5] = [
        Self::ZoomMeeting,
        Self::GoogleMeet,
        Self::MicrosoftTeams,
        Self::Skype,
        Self::PhoneCall,
    ];

    /// Returns the canonical key for this platform.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ZoomMeeting => "Zoom Meeting",
            Self::GoogleMeet => "Google Meet",
            Self::MicrosoftTeams => "Microsoft Teams",
            Self::Skype => "Skype",
            Self::PhoneCall => "Phone Call",
        }
    }

    /// Parses a platform key.
    ///
    /// Keys match exactly; there is no fuzzy or case-insensitive fallback.
    /// Unknown keys return `None` and must be rejected by the caller.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "Zoom Meeting" => Some(Self::ZoomMeeting),
            "Google Meet" => Some(Self::GoogleMeet),
            "Microsoft Teams" => Some(Self::MicrosoftTeams),
            "Skype" => Some(Self::Skype),
            "Phone Call" => Some(Self::PhoneCall),
            _ => None,
        }
    }

    /// Returns the single contact field this platform requires.
    pub fn required_field(&self) -> ContactField {
        match self {
            Self::ZoomMeeting | Self::GoogleMeet | Self::MicrosoftTeams => ContactField::Email,
            Self::Skype => ContactField::Username,
            Self::PhoneCall => ContactField::Phone,
        }
    }
}

impl std::fmt::Display for MeetingPlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The kind of contact field a platform requires from the seller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactField {
    /// An email address, format-checked.
    Email,
    /// A platform username, only checked for presence.
    Username,
    /// A phone number, format-checked.
    Phone,
}

impl ContactField {
    /// Returns a human-readable name for error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Username => "username",
            Self::Phone => "phone number",
        }
    }
}

/// The seller's contact details, as read from their settings record.
///
/// Only the field the chosen platform requires is consulted; the rest may
/// be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SellerSettings {
    /// Email used for Zoom, Google Meet and Teams meetings.
    pub email: Option<String>,
    /// Skype username.
    pub skype_username: Option<String>,
    /// Phone number for the phone-call fallback.
    pub phone_number: Option<String>,
}

impl SellerSettings {
    /// Returns the value of the given contact field, if set and non-blank.
    pub fn contact(&self, field: ContactField) -> Option<&str> {
        let value = match field {
            ContactField::Email => self.email.as_deref(),
            ContactField::Username => self.skype_username.as_deref(),
            ContactField::Phone => self.phone_number.as_deref(),
        };
        value.map(str::trim).filter(|v| !v.is_empty())
    }
}

/// Transient per-call platform configuration.
///
/// Derived from [`SellerSettings`] at provisioning time; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformConfig {
    /// The platform this config targets.
    pub platform: MeetingPlatform,
    /// Host email (Zoom, Meet, Teams).
    pub email: Option<String>,
    /// Host username (Skype).
    pub username: Option<String>,
    /// Host phone number (phone fallback).
    pub phone: Option<String>,
}

impl PlatformConfig {
    /// Creates an empty config for a platform.
    pub fn new(platform: MeetingPlatform) -> Self {
        Self {
            platform,
            email: None,
            username: None,
            phone: None,
        }
    }

    /// Derives a config from seller settings, copying only the field the
    /// platform requires.
    pub fn from_settings(platform: MeetingPlatform, settings: &SellerSettings) -> Self {
        let mut config = Self::new(platform);
        match platform.required_field() {
            ContactField::Email => {
                config.email = settings.contact(ContactField::Email).map(String::from);
            }
            ContactField::Username => {
                config.username = settings.contact(ContactField::Username).map(String::from);
            }
            ContactField::Phone => {
                config.phone = settings.contact(ContactField::Phone).map(String::from);
            }
        }
        config
    }

    /// Builder method to set the email.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Builder method to set the username.
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Builder method to set the phone number.
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Returns the value of the platform's required field, if present.
    pub fn required_value(&self) -> Option<&str> {
        let value = match self.platform.required_field() {
            ContactField::Email => self.email.as_deref(),
            ContactField::Username => self.username.as_deref(),
            ContactField::Phone => self.phone.as_deref(),
        };
        value.map(str::trim).filter(|v| !v.is_empty())
    }
}

/// A synthesized meeting link for a confirmed booking.
///
/// Produced fresh on every provisioning call and never cached; the persisted
/// copy lives on the booking record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingLink {
    /// The platform that produced this link.
    pub platform: MeetingPlatform,
    /// The join URL. Always present.
    pub join_url: String,
    /// Platform meeting id, where the platform has one.
    pub meeting_id: Option<String>,
    /// Meeting passcode, where the platform uses one.
    pub password: Option<String>,
}

impl MeetingLink {
    /// Creates a link with just a join URL.
    pub fn new(platform: MeetingPlatform, join_url: impl Into<String>) -> Self {
        Self {
            platform,
            join_url: join_url.into(),
            meeting_id: None,
            password: None,
        }
    }

    /// Builder method to set the meeting id.
    pub fn with_meeting_id(mut self, id: impl Into<String>) -> Self {
        self.meeting_id = Some(id.into());
        self
    }

    /// Builder method to set the passcode.
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Returns the host portion of the join URL, if it parses as a URL.
    ///
    /// `tel:` links have no host and return `None`.
    pub fn host(&self) -> Option<String> {
        Url::parse(&self.join_url)
            .ok()
            .and_then(|u| u.host_str().map(String::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_keys_round_trip() {
        for platform in MeetingPlatform::ALL {
            assert_eq!(MeetingPlatform::from_key(platform.as_str()), Some(platform));
        }
    }

    #[test]
    fn unknown_key_is_rejected() {
        assert_eq!(MeetingPlatform::from_key("Webex"), None);
        assert_eq!(MeetingPlatform::from_key("zoom meeting"), None);
        assert_eq!(MeetingPlatform::from_key(""), None);
    }

    #[test]
    fn required_fields() {
        assert_eq!(
            MeetingPlatform::ZoomMeeting.required_field(),
            ContactField::Email
        );
        assert_eq!(
            MeetingPlatform::Skype.required_field(),
            ContactField::Username
        );
        assert_eq!(
            MeetingPlatform::PhoneCall.required_field(),
            ContactField::Phone
        );
    }

    #[test]
    fn config_from_settings_copies_only_required_field() {
        let settings = SellerSettings {
            email: Some("seller@example.com".into()),
            skype_username: Some("seller.skype".into()),
            phone_number: Some("+14155552671".into()),
        };

        let config = PlatformConfig::from_settings(MeetingPlatform::Skype, &settings);
        assert_eq!(config.username.as_deref(), Some("seller.skype"));
        assert!(config.email.is_none());
        assert!(config.phone.is_none());
        assert_eq!(config.required_value(), Some("seller.skype"));
    }

    #[test]
    fn blank_setting_counts_as_missing() {
        let settings = SellerSettings {
            email: Some("   ".into()),
            ..Default::default()
        };
        let config = PlatformConfig::from_settings(MeetingPlatform::ZoomMeeting, &settings);
        assert_eq!(config.required_value(), None);
    }

    #[test]
    fn meeting_link_host() {
        let link = MeetingLink::new(MeetingPlatform::GoogleMeet, "https://meet.google.com/abc");
        assert_eq!(link.host().as_deref(), Some("meet.google.com"));

        let tel = MeetingLink::new(MeetingPlatform::PhoneCall, "tel:+14155552671");
        assert_eq!(tel.host(), None);
    }

    #[test]
    fn platform_serde_uses_canonical_keys() {
        let json = serde_json::to_string(&MeetingPlatform::ZoomMeeting).unwrap();
        assert_eq!(json, "\"Zoom Meeting\"");
        let parsed: MeetingPlatform = serde_json::from_str("\"Phone Call\"").unwrap();
        assert_eq!(parsed, MeetingPlatform::PhoneCall);
    }
}
