//! Provisioning error types.

use thiserror::Error;

use slotlink_providers::ProviderError;
use slotlink_store::StoreError;

/// Result type for provisioning operations.
pub type ProvisionResult<T> = Result<T, ProvisionError>;

/// Errors from the meeting-provisioning pipeline.
///
/// `OrphanedEvent` is the one inconsistent-state case: the external calendar
/// event exists but the local record of it could not be written. It carries
/// the event id so an operator can reconcile by hand; the pipeline never
/// rolls the external event back automatically.
#[derive(Debug, Error)]
pub enum ProvisionError {
    /// A contact field failed validation before any remote call was made.
    #[error("validation failed: {message}")]
    Validation { message: String },

    /// Link synthesis failed (missing field, unsupported platform).
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// The calendar event could not be created. Nothing was persisted.
    #[error("calendar event creation failed: {message}")]
    CalendarCreation { message: String },

    /// The event was created externally but persisting it failed.
    #[error("external calendar event {event_id} could not be persisted locally: {message}")]
    OrphanedEvent { event_id: String, message: String },

    /// A store operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ProvisionError {
    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Creates a calendar-creation error.
    pub fn calendar_creation(message: impl Into<String>) -> Self {
        Self::CalendarCreation {
            message: message.into(),
        }
    }

    /// Creates an orphaned-event error.
    pub fn orphaned_event(event_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::OrphanedEvent {
            event_id: event_id.into(),
            message: message.into(),
        }
    }
}
