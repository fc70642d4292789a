//! In-memory consultation store.
//!
//! [`MemoryStore`] implements the same contract the remote store guarantees,
//! including the atomic at-most-one-winner reserve transition, so pipeline
//! components and tests can run against it unchanged. Transport faults can
//! be injected per operation to exercise retry paths.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use slotlink_core::{BookingStatus, ConsultationBooking, ConsultationSlot, MeetingLink};

use crate::error::{StoreError, StoreResult};
use crate::rpc::{BookOutcome, BookRequest, ReserveOutcome};
use crate::store::{BoxFuture, ConsultationStore};

#[derive(Debug, Default)]
struct Inner {
    slots: HashMap<String, ConsultationSlot>,
    bookings: HashMap<String, ConsultationBooking>,
    /// Remaining injected transport failures, keyed by operation name.
    faults: HashMap<String, u32>,
}

/// An in-memory store with CAS reserve semantics and fault injection.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
    next_booking: AtomicU64,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a slot.
    pub async fn insert_slot(&self, slot: ConsultationSlot) {
        self.inner.write().await.slots.insert(slot.id.clone(), slot);
    }

    /// Inserts or replaces a booking.
    pub async fn insert_booking(&self, booking: ConsultationBooking) {
        self.inner
            .write()
            .await
            .bookings
            .insert(booking.id.clone(), booking);
    }

    /// Returns the number of stored bookings.
    pub async fn booking_count(&self) -> usize {
        self.inner.read().await.bookings.len()
    }

    /// Arranges for the next `count` calls of `op` to fail with a transport
    /// error. Operation names match the trait method names.
    pub async fn fail_transport(&self, op: &str, count: u32) {
        self.inner.write().await.faults.insert(op.to_string(), count);
    }

    /// Consumes one injected fault for `op`, if any remain.
    async fn take_fault(&self, op: &str) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        if let Some(remaining) = inner.faults.get_mut(op) {
            if *remaining > 0 {
                *remaining -= 1;
                debug!(op, remaining = *remaining, "injected transport fault");
                return Err(StoreError::transport(format!("injected fault in {op}")));
            }
        }
        Ok(())
    }

    fn next_booking_id(&self) -> String {
        let n = self.next_booking.fetch_add(1, Ordering::Relaxed) + 1;
        format!("bk-{n}")
    }
}

impl ConsultationStore for MemoryStore {
    fn get_slot(&self, slot_id: &str) -> BoxFuture<'_, StoreResult<ConsultationSlot>> {
        let slot_id = slot_id.to_string();
        Box::pin(async move {
            self.take_fault("get_slot").await?;
            let inner = self.inner.read().await;
            inner
                .slots
                .get(&slot_id)
                .cloned()
                .ok_or_else(|| StoreError::slot_not_found(&slot_id))
        })
    }

    fn reset_slot(&self, slot_id: &str) -> BoxFuture<'_, StoreResult<()>> {
        let slot_id = slot_id.to_string();
        Box::pin(async move {
            self.take_fault("reset_slot").await?;
            let mut inner = self.inner.write().await;
            if let Some(slot) = inner.slots.get_mut(&slot_id) {
                slot.reset();
            }
            Ok(())
        })
    }

    fn reserve_slot(
        &self,
        slot_id: &str,
        buyer_id: &str,
    ) -> BoxFuture<'_, StoreResult<ReserveOutcome>> {
        let slot_id = slot_id.to_string();
        let buyer_id = buyer_id.to_string();
        Box::pin(async move {
            self.take_fault("reserve_slot").await?;
            // The write lock makes the check-and-hold transition atomic,
            // matching the remote CAS guarantee.
            let mut inner = self.inner.write().await;
            let Some(slot) = inner.slots.get_mut(&slot_id) else {
                return Ok(ReserveOutcome::rejected(format!("slot not found: {slot_id}")));
            };
            if slot.is_booked || !slot.is_available || slot.booked_by.is_some() {
                return Ok(ReserveOutcome::rejected("slot is no longer available"));
            }
            slot.is_available = false;
            slot.booked_by = Some(buyer_id);
            Ok(ReserveOutcome::ok())
        })
    }

    fn book_slot(&self, request: BookRequest) -> BoxFuture<'_, StoreResult<BookOutcome>> {
        Box::pin(async move {
            self.take_fault("book_slot").await?;
            let mut inner = self.inner.write().await;
            let Some(slot) = inner.slots.get_mut(&request.slot_id) else {
                return Ok(BookOutcome::rejected(format!(
                    "slot not found: {}",
                    request.slot_id
                )));
            };
            if slot.is_booked {
                return Ok(BookOutcome::rejected("slot is already booked"));
            }
            if slot.booked_by.as_deref() != Some(request.buyer_id.as_str()) {
                return Ok(BookOutcome::rejected(
                    "slot is not held by this buyer",
                ));
            }

            slot.is_booked = true;
            slot.is_available = false;

            let booking_id = self.next_booking_id();
            let mut booking = ConsultationBooking::new(
                &booking_id,
                &request.slot_id,
                &request.buyer_id,
                &request.seller_id,
                request.payment_amount,
            );
            booking.notes = request.notes.clone();
            booking.status = BookingStatus::Confirmed;
            inner.bookings.insert(booking_id.clone(), booking);

            Ok(BookOutcome::ok(booking_id))
        })
    }

    fn get_booking(&self, booking_id: &str) -> BoxFuture<'_, StoreResult<ConsultationBooking>> {
        let booking_id = booking_id.to_string();
        Box::pin(async move {
            self.take_fault("get_booking").await?;
            let inner = self.inner.read().await;
            inner
                .bookings
                .get(&booking_id)
                .cloned()
                .ok_or_else(|| StoreError::booking_not_found(&booking_id))
        })
    }

    fn store_platform_meeting(
        &self,
        booking_id: &str,
        link: &MeetingLink,
    ) -> BoxFuture<'_, StoreResult<()>> {
        let booking_id = booking_id.to_string();
        let link = link.clone();
        Box::pin(async move {
            self.take_fault("store_platform_meeting").await?;
            let mut inner = self.inner.write().await;
            let booking = inner
                .bookings
                .get_mut(&booking_id)
                .ok_or_else(|| StoreError::booking_not_found(&booking_id))?;
            booking.attach_platform_meeting(&link);
            Ok(())
        })
    }

    fn store_calendar_event(
        &self,
        booking_id: &str,
        event_id: &str,
        meet_link: &str,
    ) -> BoxFuture<'_, StoreResult<()>> {
        let booking_id = booking_id.to_string();
        let event_id = event_id.to_string();
        let meet_link = meet_link.to_string();
        Box::pin(async move {
            self.take_fault("store_calendar_event").await?;
            let mut inner = self.inner.write().await;
            let booking = inner
                .bookings
                .get_mut(&booking_id)
                .ok_or_else(|| StoreError::booking_not_found(&booking_id))?;
            booking.attach_calendar_event(event_id, meet_link);
            Ok(())
        })
    }

    fn update_invite_flags(
        &self,
        booking_id: &str,
        seller_sent: bool,
        buyer_sent: bool,
    ) -> BoxFuture<'_, StoreResult<()>> {
        let booking_id = booking_id.to_string();
        Box::pin(async move {
            self.take_fault("update_invite_flags").await?;
            let mut inner = self.inner.write().await;
            let booking = inner
                .bookings
                .get_mut(&booking_id)
                .ok_or_else(|| StoreError::booking_not_found(&booking_id))?;
            booking.record_invites(seller_sent, buyer_sent, Utc::now());
            Ok(())
        })
    }

    fn delete_booking(&self, booking_id: &str) -> BoxFuture<'_, StoreResult<()>> {
        let booking_id = booking_id.to_string();
        Box::pin(async move {
            self.take_fault("delete_booking").await?;
            self.inner.write().await.bookings.remove(&booking_id);
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use std::sync::Arc;

    fn slot(id: &str) -> ConsultationSlot {
        ConsultationSlot::new(
            id,
            "seller-1",
            NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
            NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(10, 30, 0).unwrap(),
        )
    }

    fn book_request(slot_id: &str, buyer_id: &str) -> BookRequest {
        BookRequest {
            slot_id: slot_id.to_string(),
            buyer_id: buyer_id.to_string(),
            seller_id: "seller-1".to_string(),
            booking_date: NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
            start_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(10, 30, 0).unwrap(),
            notes: Some("test booking".to_string()),
            payment_amount: 49.0,
        }
    }

    #[tokio::test]
    async fn reserve_then_book() {
        let store = MemoryStore::new();
        store.insert_slot(slot("s1")).await;

        let outcome = store.reserve_slot("s1", "buyer-1").await.unwrap();
        assert!(outcome.success);

        let booked = store.book_slot(book_request("s1", "buyer-1")).await.unwrap();
        assert!(booked.success);
        let booking_id = booked.booking_id.unwrap();

        let slot = store.get_slot("s1").await.unwrap();
        assert!(slot.is_booked);
        assert!(!slot.is_available);
        assert!(slot.is_consistent());

        let booking = store.get_booking(&booking_id).await.unwrap();
        assert_eq!(booking.buyer_id, "buyer-1");
        assert_eq!(booking.status, BookingStatus::Confirmed);
    }

    #[tokio::test]
    async fn second_reserve_loses() {
        let store = MemoryStore::new();
        store.insert_slot(slot("s1")).await;

        assert!(store.reserve_slot("s1", "buyer-1").await.unwrap().success);
        let lost = store.reserve_slot("s1", "buyer-2").await.unwrap();
        assert!(!lost.success);
        assert!(!lost.error.unwrap().is_empty());
    }

    #[tokio::test]
    async fn concurrent_reserves_have_one_winner() {
        let store = Arc::new(MemoryStore::new());
        store.insert_slot(slot("s1")).await;

        let a = {
            let store = store.clone();
            tokio::spawn(async move { store.reserve_slot("s1", "buyer-a").await.unwrap() })
        };
        let b = {
            let store = store.clone();
            tokio::spawn(async move { store.reserve_slot("s1", "buyer-b").await.unwrap() })
        };
        let (a, b) = (a.await.unwrap(), b.await.unwrap());

        assert!(a.success != b.success, "exactly one attempt must win");
        let loser = if a.success { &b } else { &a };
        assert!(!loser.error.as_deref().unwrap_or("").is_empty());
        assert_eq!(store.booking_count().await, 0);
    }

    #[tokio::test]
    async fn book_without_hold_is_rejected() {
        let store = MemoryStore::new();
        store.insert_slot(slot("s1")).await;

        let outcome = store.book_slot(book_request("s1", "buyer-1")).await.unwrap();
        assert!(!outcome.success);
        assert!(outcome.booking_id.is_none());
    }

    #[tokio::test]
    async fn book_under_someone_elses_hold_is_rejected() {
        let store = MemoryStore::new();
        store.insert_slot(slot("s1")).await;
        assert!(store.reserve_slot("s1", "buyer-1").await.unwrap().success);

        let outcome = store.book_slot(book_request("s1", "buyer-2")).await.unwrap();
        assert!(!outcome.success);
        assert_eq!(store.booking_count().await, 0);
    }

    #[tokio::test]
    async fn injected_faults_surface_as_transport_errors() {
        let store = MemoryStore::new();
        store.insert_slot(slot("s1")).await;
        store.fail_transport("reserve_slot", 1).await;

        let err = store.reserve_slot("s1", "buyer-1").await.unwrap_err();
        assert!(err.is_retryable());

        // The fault budget is spent; the next call goes through.
        assert!(store.reserve_slot("s1", "buyer-1").await.unwrap().success);
    }

    #[tokio::test]
    async fn delete_and_reset_tolerate_missing_rows() {
        let store = MemoryStore::new();
        store.delete_booking("missing").await.unwrap();
        store.reset_slot("missing").await.unwrap();
    }

    #[tokio::test]
    async fn invite_flags_are_monotonic() {
        let store = MemoryStore::new();
        store
            .insert_booking(ConsultationBooking::new("bk-1", "s1", "b1", "sel1", 10.0))
            .await;

        store.update_invite_flags("bk-1", true, false).await.unwrap();
        let first = store.get_booking("bk-1").await.unwrap();
        assert!(first.seller_invite_sent);
        assert!(!first.buyer_invite_sent);

        store.update_invite_flags("bk-1", false, true).await.unwrap();
        store.update_invite_flags("bk-1", false, false).await.unwrap();
        let after = store.get_booking("bk-1").await.unwrap();
        assert!(after.seller_invite_sent);
        assert!(after.buyer_invite_sent);
        assert_eq!(after.seller_invite_sent_at, first.seller_invite_sent_at);
    }
}
