//! ConsultationStore trait definition.
//!
//! The store is the remote system of record for slots and bookings. All
//! methods are I/O-bound remote calls; the trait uses boxed futures to stay
//! object-safe, so pipeline components can hold `Arc<dyn ConsultationStore>`
//! and tests can substitute [`crate::MemoryStore`].
//!
//! Error convention: transport failures are `Err(StoreError::Transport)`;
//! domain refusals from the reserve/book transitions come back as `Ok`
//! outcomes with `success = false`, mirroring the remote contract.

use std::future::Future;
use std::pin::Pin;

use slotlink_core::{ConsultationBooking, ConsultationSlot, MeetingLink};

use crate::error::StoreResult;
use crate::rpc::{BookOutcome, BookRequest, ReserveOutcome};

/// A boxed future for async trait methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The remote store for consultation slots and bookings.
pub trait ConsultationStore: Send + Sync {
    /// Fetches the current state of a slot.
    fn get_slot(&self, slot_id: &str) -> BoxFuture<'_, StoreResult<ConsultationSlot>>;

    /// Resets a slot to its open state (`is_available`, not booked, no
    /// holder). A no-op if the slot does not exist, so cleanup paths can
    /// call it unconditionally.
    fn reset_slot(&self, slot_id: &str) -> BoxFuture<'_, StoreResult<()>>;

    /// Places a provisional hold on a slot for a buyer.
    ///
    /// The remote operation is an atomic compare-and-swap with at most one
    /// winner; a lost race is an `Ok` outcome with `success = false` and a
    /// non-empty error, not a transport failure.
    fn reserve_slot(
        &self,
        slot_id: &str,
        buyer_id: &str,
    ) -> BoxFuture<'_, StoreResult<ReserveOutcome>>;

    /// Converts a held reservation into a durable booking.
    fn book_slot(&self, request: BookRequest) -> BoxFuture<'_, StoreResult<BookOutcome>>;

    /// Fetches a booking by id.
    fn get_booking(&self, booking_id: &str) -> BoxFuture<'_, StoreResult<ConsultationBooking>>;

    /// Persists a provisioned platform meeting onto a booking.
    fn store_platform_meeting(
        &self,
        booking_id: &str,
        link: &MeetingLink,
    ) -> BoxFuture<'_, StoreResult<()>>;

    /// Persists a created calendar event id and meet link onto a booking.
    fn store_calendar_event(
        &self,
        booking_id: &str,
        event_id: &str,
        meet_link: &str,
    ) -> BoxFuture<'_, StoreResult<()>>;

    /// Updates per-party invite-sent flags.
    ///
    /// A `true` argument sets the flag and stamps the transition time; a
    /// `false` argument makes no change. Flags never move back to false.
    fn update_invite_flags(
        &self,
        booking_id: &str,
        seller_sent: bool,
        buyer_sent: bool,
    ) -> BoxFuture<'_, StoreResult<()>>;

    /// Deletes a booking. A no-op if the booking does not exist.
    fn delete_booking(&self, booking_id: &str) -> BoxFuture<'_, StoreResult<()>>;
}
