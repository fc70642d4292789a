//! Store error types.

use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors from the remote consultation store.
///
/// Transport errors are the only retryable variant. Domain refusals from the
/// reserve/book RPCs arrive as `Ok` outcomes with `success = false` and are
/// mapped to `ReservationConflict` / `BookingRejected` by the client; they
/// must never be retried with the same inputs.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Network or remote-call failure. Retry-eligible.
    #[error("transport error: {message}")]
    Transport { message: String },

    /// The slot was already held or booked by someone else.
    #[error("slot reservation conflict: {message}")]
    ReservationConflict { message: String },

    /// The store refused to finalize the booking.
    #[error("booking rejected: {message}")]
    BookingRejected { message: String },

    /// The slot does not exist.
    #[error("slot not found: {slot_id}")]
    SlotNotFound { slot_id: String },

    /// The booking does not exist.
    #[error("booking not found: {booking_id}")]
    BookingNotFound { booking_id: String },

    /// A write against an existing record failed.
    #[error("persistence error: {message}")]
    Persistence { message: String },
}

impl StoreError {
    /// Creates a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Creates a reservation conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::ReservationConflict {
            message: message.into(),
        }
    }

    /// Creates a booking rejected error.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::BookingRejected {
            message: message.into(),
        }
    }

    /// Creates a slot not found error.
    pub fn slot_not_found(slot_id: impl Into<String>) -> Self {
        Self::SlotNotFound {
            slot_id: slot_id.into(),
        }
    }

    /// Creates a booking not found error.
    pub fn booking_not_found(booking_id: impl Into<String>) -> Self {
        Self::BookingNotFound {
            booking_id: booking_id.into(),
        }
    }

    /// Creates a persistence error.
    pub fn persistence(message: impl Into<String>) -> Self {
        Self::Persistence {
            message: message.into(),
        }
    }

    /// Returns true if the operation may be retried.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_transport_is_retryable() {
        assert!(StoreError::transport("timeout").is_retryable());
        assert!(!StoreError::conflict("already held").is_retryable());
        assert!(!StoreError::rejected("no hold").is_retryable());
        assert!(!StoreError::slot_not_found("s1").is_retryable());
        assert!(!StoreError::persistence("write failed").is_retryable());
    }

    #[test]
    fn display_carries_detail() {
        let err = StoreError::slot_not_found("slot-7");
        assert!(err.to_string().contains("slot-7"));
    }
}
