//! Calendar-invite delivery tracking.
//!
//! Invite delivery is a best-effort side process: sends can fail per party
//! and succeed later on retry. The tracker records what actually went out,
//! one flag per participant, and is safe to call repeatedly with partial
//! information.

use std::sync::Arc;

use tracing::debug;

use crate::error::StoreResult;
use crate::store::ConsultationStore;

/// Records per-party invite delivery on a booking.
pub struct InviteTracker {
    store: Arc<dyn ConsultationStore>,
}

impl InviteTracker {
    /// Creates a tracker over the given store.
    pub fn new(store: Arc<dyn ConsultationStore>) -> Self {
        Self { store }
    }

    /// Marks invites as sent for the parties whose delivery succeeded.
    ///
    /// `true` sets the stored flag and stamps the transition time; `false`
    /// makes no change, so a previously recorded delivery is never unset.
    /// Calling with both arguments false is a no-op and skips the remote
    /// write entirely.
    pub async fn update_invite_status(
        &self,
        booking_id: &str,
        seller_sent: bool,
        buyer_sent: bool,
    ) -> StoreResult<()> {
        if !seller_sent && !buyer_sent {
            debug!(booking_id, "no invite deliveries to record");
            return Ok(());
        }
        self.store
            .update_invite_flags(booking_id, seller_sent, buyer_sent)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use slotlink_core::ConsultationBooking;

    #[tokio::test]
    async fn partial_updates_accumulate() {
        let store = Arc::new(MemoryStore::new());
        store
            .insert_booking(ConsultationBooking::new("bk-1", "s1", "b1", "sel1", 25.0))
            .await;
        let tracker = InviteTracker::new(store.clone());

        tracker.update_invite_status("bk-1", true, false).await.unwrap();
        tracker.update_invite_status("bk-1", false, true).await.unwrap();

        let booking = store.get_booking("bk-1").await.unwrap();
        assert!(booking.seller_invite_sent);
        assert!(booking.buyer_invite_sent);
        assert!(booking.seller_invite_sent_at.is_some());
        assert!(booking.buyer_invite_sent_at.is_some());
    }

    #[tokio::test]
    async fn all_false_never_unsets_and_skips_the_write() {
        let store = Arc::new(MemoryStore::new());
        store
            .insert_booking(ConsultationBooking::new("bk-1", "s1", "b1", "sel1", 25.0))
            .await;
        let tracker = InviteTracker::new(store.clone());

        tracker.update_invite_status("bk-1", true, true).await.unwrap();

        // Even with a transport fault armed, the all-false call succeeds
        // because it never reaches the store.
        store.fail_transport("update_invite_flags", 1).await;
        tracker.update_invite_status("bk-1", false, false).await.unwrap();

        let booking = store.get_booking("bk-1").await.unwrap();
        assert!(booking.seller_invite_sent);
        assert!(booking.buyer_invite_sent);
    }

    #[tokio::test]
    async fn repeat_true_is_idempotent() {
        let store = Arc::new(MemoryStore::new());
        store
            .insert_booking(ConsultationBooking::new("bk-1", "s1", "b1", "sel1", 25.0))
            .await;
        let tracker = InviteTracker::new(store.clone());

        tracker.update_invite_status("bk-1", true, false).await.unwrap();
        let first = store.get_booking("bk-1").await.unwrap();

        tracker.update_invite_status("bk-1", true, false).await.unwrap();
        let second = store.get_booking("bk-1").await.unwrap();
        assert_eq!(first.seller_invite_sent_at, second.seller_invite_sent_at);
    }
}
