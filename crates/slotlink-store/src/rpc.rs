//! Wire shapes of the remote slot-transition RPCs.
//!
//! The remote store exposes two state-transition calls,
//! `reserve_consultation_slot` and `book_consultation_slot`. Both report
//! domain refusals in-band (`success = false` with a non-empty error) rather
//! than as transport failures; these types mirror that contract exactly.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Result of `reserve_consultation_slot`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReserveOutcome {
    /// Whether the provisional hold was won.
    pub success: bool,
    /// Refusal reason when `success` is false. Non-empty in that case.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ReserveOutcome {
    /// A winning reservation.
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    /// A domain refusal with a reason.
    pub fn rejected(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}

/// Result of `book_consultation_slot`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookOutcome {
    /// Whether the held reservation was converted into a booking.
    pub success: bool,
    /// The new booking id when `success` is true.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_id: Option<String>,
    /// Refusal reason when `success` is false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BookOutcome {
    /// A finalized booking.
    pub fn ok(booking_id: impl Into<String>) -> Self {
        Self {
            success: true,
            booking_id: Some(booking_id.into()),
            error: None,
        }
    }

    /// A domain refusal with a reason.
    pub fn rejected(error: impl Into<String>) -> Self {
        Self {
            success: false,
            booking_id: None,
            error: Some(error.into()),
        }
    }
}

/// Parameters of `book_consultation_slot`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookRequest {
    /// The slot being finalized.
    pub slot_id: String,
    /// The buyer holding the reservation.
    pub buyer_id: String,
    /// The seller who owns the slot.
    pub seller_id: String,
    /// Date of the consultation.
    pub booking_date: NaiveDate,
    /// Start of the window.
    pub start_time: NaiveTime,
    /// End of the window.
    pub end_time: NaiveTime,
    /// Buyer's notes, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Payment confirmation amount from checkout. Opaque here.
    pub payment_amount: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_outcome_carries_error() {
        let outcome = ReserveOutcome::rejected("slot is no longer available");
        assert!(!outcome.success);
        assert_eq!(outcome.error.as_deref(), Some("slot is no longer available"));
    }

    #[test]
    fn ok_outcome_serializes_without_error_field() {
        let json = serde_json::to_value(ReserveOutcome::ok()).unwrap();
        assert_eq!(json.get("success"), Some(&serde_json::Value::Bool(true)));
        assert!(json.get("error").is_none());
    }

    #[test]
    fn book_outcome_round_trip() {
        let outcome = BookOutcome::ok("bk-42");
        let json = serde_json::to_string(&outcome).unwrap();
        let parsed: BookOutcome = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, outcome);
        assert_eq!(parsed.booking_id.as_deref(), Some("bk-42"));
    }
}
