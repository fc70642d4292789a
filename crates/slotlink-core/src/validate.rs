//! Contact-field validation.
//!
//! This module format-checks the platform-specific contact fields (email,
//! phone number, username presence) before any remote call is made. The
//! provisioning pipeline runs these checks first so a bad seller setting
//! fails fast instead of surfacing from deep inside a provider call.

use std::sync::LazyLock;

use regex::Regex;

use crate::platform::{ContactField, MeetingPlatform, SellerSettings};

/// Permissive RFC-5322-subset email pattern.
///
/// Local part allows the usual punctuation set; the domain is one or more
/// dot-separated DNS labels of 1-63 chars with no leading or trailing hyphen.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*$",
    )
    .expect("Invalid email regex")
});

/// Phone pattern: optional leading `+`, then 1-16 digits, first digit nonzero.
static PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[1-9][0-9]{0,15}$").expect("Invalid phone regex"));

/// Returns true if `s`, after trimming, is a plausible email address.
pub fn validate_email(s: &str) -> bool {
    let trimmed = s.trim();
    !trimmed.is_empty() && EMAIL_REGEX.is_match(trimmed)
}

/// Returns true if `s`, after stripping internal whitespace, is a plausible
/// phone number.
pub fn validate_phone_number(s: &str) -> bool {
    let stripped: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    PHONE_REGEX.is_match(&stripped)
}

/// Result of a platform-config validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigCheck {
    /// Whether the settings satisfy the platform's requirement.
    pub is_valid: bool,
    /// Human-readable outcome, naming the missing or malformed field.
    pub message: String,
}

impl ConfigCheck {
    /// A passing check.
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            message: "ok".to_string(),
        }
    }

    /// A failing check with the given message.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            message: message.into(),
        }
    }
}

/// Checks that the seller's settings carry a usable value for the platform's
/// required contact field.
///
/// Unknown platform keys are themselves a validation failure: the key is
/// parsed here, at the boundary, and never forwarded as a raw string.
/// Username-based platforms only require the field to be non-empty; email
/// and phone fields are format-checked.
pub fn validate_platform_config(platform_key: &str, settings: &SellerSettings) -> ConfigCheck {
    let Some(platform) = MeetingPlatform::from_key(platform_key) else {
        return ConfigCheck::invalid(format!("unsupported meeting platform: {platform_key:?}"));
    };

    let field = platform.required_field();
    let Some(value) = settings.contact(field) else {
        return ConfigCheck::invalid(format!(
            "{platform} requires a {} in seller settings",
            field.as_str()
        ));
    };

    match field {
        ContactField::Email if !validate_email(value) => ConfigCheck::invalid(format!(
            "{platform} email in seller settings is not a valid email address"
        )),
        ContactField::Phone if !validate_phone_number(value) => ConfigCheck::invalid(format!(
            "{platform} phone number in seller settings is not a valid phone number"
        )),
        _ => ConfigCheck::ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_emails() {
        assert!(validate_email("user@example.com"));
        assert!(validate_email("first.last+tag@sub.example.co"));
        assert!(validate_email("  padded@example.com  "));
    }

    #[test]
    fn rejects_bad_emails() {
        assert!(!validate_email(""));
        assert!(!validate_email("   "));
        assert!(!validate_email("not-an-email"));
        assert!(!validate_email("user@"));
        assert!(!validate_email("@example.com"));
        assert!(!validate_email("user@-example.com"));
        assert!(!validate_email("user@example-.com"));
        assert!(!validate_email("user@exa mple.com"));
    }

    #[test]
    fn domain_labels_capped_at_63_chars() {
        let label_63 = "a".repeat(63);
        assert!(validate_email(&format!("u@{label_63}.com")));
        let label_64 = "a".repeat(64);
        assert!(!validate_email(&format!("u@{label_64}.com")));
    }

    #[test]
    fn accepts_plain_phone_numbers() {
        assert!(validate_phone_number("+14155552671"));
        assert!(validate_phone_number("14155552671"));
        assert!(validate_phone_number("+1 415 555 2671"));
        assert!(validate_phone_number("7"));
    }

    #[test]
    fn rejects_bad_phone_numbers() {
        assert!(!validate_phone_number("abc"));
        assert!(!validate_phone_number(""));
        assert!(!validate_phone_number("+0123456"));
        assert!(!validate_phone_number("0123456"));
        assert!(!validate_phone_number("+123456789012345678")); // 18 digits
        assert!(!validate_phone_number("+1-415-555-2671")); // dashes not stripped
    }

    #[test]
    fn unknown_platform_fails_validation() {
        let settings = SellerSettings {
            email: Some("seller@example.com".into()),
            skype_username: Some("seller".into()),
            phone_number: Some("+14155552671".into()),
        };
        let check = validate_platform_config("Webex", &settings);
        assert!(!check.is_valid);
        assert!(check.message.contains("Webex"));
    }

    #[test]
    fn missing_field_names_the_field() {
        let check = validate_platform_config("Zoom Meeting", &SellerSettings::default());
        assert!(!check.is_valid);
        assert!(check.message.contains("email"));

        let check = validate_platform_config("Phone Call", &SellerSettings::default());
        assert!(!check.is_valid);
        assert!(check.message.contains("phone number"));
    }

    #[test]
    fn malformed_email_is_reported() {
        let settings = SellerSettings {
            email: Some("not-an-email".into()),
            ..Default::default()
        };
        let check = validate_platform_config("Google Meet", &settings);
        assert!(!check.is_valid);
        assert!(check.message.contains("not a valid email"));
    }

    #[test]
    fn username_platform_only_needs_presence() {
        let settings = SellerSettings {
            skype_username: Some("any username works".into()),
            ..Default::default()
        };
        assert!(validate_platform_config("Skype", &settings).is_valid);
        assert!(!validate_platform_config("Skype", &SellerSettings::default()).is_valid);
    }

    #[test]
    fn valid_configs_pass() {
        let settings = SellerSettings {
            email: Some("seller@example.com".into()),
            skype_username: Some("seller".into()),
            phone_number: Some("+14155552671".into()),
        };
        for key in [
            "Zoom Meeting",
            "Google Meet",
            "Microsoft Teams",
            "Skype",
            "Phone Call",
        ] {
            let check = validate_platform_config(key, &settings);
            assert!(check.is_valid, "{key}: {}", check.message);
        }
    }
}
