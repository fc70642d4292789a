//! Consultation slot type.
//!
//! A slot is a seller-defined, fixed-duration time window that a buyer can
//! book. The slot record itself is owned by the remote store; this type is
//! the local view of it that the reservation and provisioning pipeline read
//! and write.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// A seller's bookable time window.
///
/// State invariant: a booked slot is never available (`is_booked` implies
/// `!is_available`). At most one non-cancelled booking references a slot;
/// that exclusivity is enforced by the remote store's reserve operation,
/// not by this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsultationSlot {
    /// Unique identifier for the slot.
    pub id: String,
    /// The seller who owns this time window.
    pub seller_id: String,
    /// The calendar date of the slot.
    pub date: NaiveDate,
    /// Start of the window (seller-local wall clock).
    pub start_time: NaiveTime,
    /// End of the window (seller-local wall clock).
    pub end_time: NaiveTime,
    /// Whether the slot can currently be reserved.
    pub is_available: bool,
    /// Whether a booking has been finalized against this slot.
    pub is_booked: bool,
    /// The buyer holding the booking, if any.
    pub booked_by: Option<String>,
}

impl ConsultationSlot {
    /// Creates a new open slot for a seller.
    pub fn new(
        id: impl Into<String>,
        seller_id: impl Into<String>,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Self {
        Self {
            id: id.into(),
            seller_id: seller_id.into(),
            date,
            start_time,
            end_time,
            is_available: true,
            is_booked: false,
            booked_by: None,
        }
    }

    /// Returns true if the booked/available flags are in a legal combination.
    ///
    /// A slot that is both booked and available violates the store invariant
    /// and indicates a half-applied transition on the remote side.
    pub fn is_consistent(&self) -> bool {
        !(self.is_booked && self.is_available)
    }

    /// Marks the slot booked by the given buyer.
    pub fn mark_booked(&mut self, buyer_id: impl Into<String>) {
        self.is_available = false;
        self.is_booked = true;
        self.booked_by = Some(buyer_id.into());
    }

    /// Returns the slot to its open state.
    pub fn reset(&mut self) {
        self.is_available = true;
        self.is_booked = false;
        self.booked_by = None;
    }
}
