//! Error types for meeting-provider operations.

use std::fmt;
use thiserror::Error;

use slotlink_core::ContactField;

/// The category of a provider error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderErrorCode {
    /// The seller settings lack the contact field the platform requires.
    MissingContactField,
    /// The requested platform key is not in the registry.
    UnsupportedPlatform,
    /// Provider configuration is invalid for another reason.
    ConfigurationError,
    /// Network error - connection failed, timeout, DNS resolution, etc.
    NetworkError,
    /// The platform's service returned an error.
    ServerError,
    /// Internal provider error - unexpected state, bug.
    InternalError,
}

impl ProviderErrorCode {
    /// Returns true if this error is transient and the operation may be retried.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::NetworkError | Self::ServerError)
    }

    /// Returns a human-readable name for this error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingContactField => "missing_contact_field",
            Self::UnsupportedPlatform => "unsupported_platform",
            Self::ConfigurationError => "configuration_error",
            Self::NetworkError => "network_error",
            Self::ServerError => "server_error",
            Self::InternalError => "internal_error",
        }
    }
}

impl fmt::Display for ProviderErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An error from a meeting provider or the registry.
#[derive(Debug, Error)]
pub struct ProviderError {
    /// The error code categorizing this error.
    code: ProviderErrorCode,
    /// A human-readable message describing the error.
    message: String,
    /// The platform that generated this error, if known.
    platform: Option<String>,
    /// The underlying cause of this error, if any.
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ProviderError {
    /// Creates a new provider error with the given code and message.
    pub fn new(code: ProviderErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            platform: None,
            source: None,
        }
    }

    /// Creates a missing-contact-field error naming the field.
    pub fn missing_field(field: ContactField) -> Self {
        Self::new(
            ProviderErrorCode::MissingContactField,
            format!("missing required {} in platform config", field.as_str()),
        )
    }

    /// Creates an unsupported-platform error naming the key.
    pub fn unsupported(platform_key: impl AsRef<str>) -> Self {
        Self::new(
            ProviderErrorCode::UnsupportedPlatform,
            format!("unsupported meeting platform: {:?}", platform_key.as_ref()),
        )
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::ConfigurationError, message)
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::NetworkError, message)
    }

    /// Creates a server error.
    pub fn server(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::ServerError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::InternalError, message)
    }

    /// Sets the platform name for this error.
    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = Some(platform.into());
        self
    }

    /// Sets the source error for this error.
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    /// Returns the error code.
    pub fn code(&self) -> ProviderErrorCode {
        self.code
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the platform name, if set.
    pub fn platform(&self) -> Option<&str> {
        self.platform.as_deref()
    }

    /// Returns true if this error is transient and may be retried.
    pub fn is_retryable(&self) -> bool {
        self.code.is_retryable()
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref platform) = self.platform {
            write!(f, "[{}] ", platform)?;
        }
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// A specialized Result type for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_retryable() {
        assert!(ProviderErrorCode::NetworkError.is_retryable());
        assert!(ProviderErrorCode::ServerError.is_retryable());
        assert!(!ProviderErrorCode::MissingContactField.is_retryable());
        assert!(!ProviderErrorCode::UnsupportedPlatform.is_retryable());
    }

    #[test]
    fn missing_field_names_the_field() {
        let err = ProviderError::missing_field(ContactField::Username);
        assert_eq!(err.code(), ProviderErrorCode::MissingContactField);
        assert!(err.message().contains("username"));
        assert!(!err.is_retryable());
    }

    #[test]
    fn unsupported_names_the_key() {
        let err = ProviderError::unsupported("Webex");
        assert_eq!(err.code(), ProviderErrorCode::UnsupportedPlatform);
        assert!(err.message().contains("Webex"));
    }

    #[test]
    fn display_includes_platform_tag() {
        let err = ProviderError::missing_field(ContactField::Email).with_platform("Zoom Meeting");
        let display = format!("{}", err);
        assert!(display.contains("[Zoom Meeting]"));
        assert!(display.contains("missing_contact_field"));
    }
}
