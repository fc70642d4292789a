//! End-to-end booking verification harness.
//!
//! [`BookingTestHarness`] exercises the full slot lifecycle against a live
//! store: fetch, reserve, finalize, re-fetch. It reports success or the
//! stage that failed instead of returning errors, so a dashboard or smoke
//! check can render the report directly, and it can restore the slot state
//! afterwards with [`BookingTestHarness::cleanup_test_booking`].

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use slotlink_core::ConsultationSlot;
use slotlink_store::{BookRequest, ConsultationStore, SlotReservationClient, StoreResult};

/// Notes written onto harness-created bookings so they are recognizable.
const TEST_NOTES: &str = "automated booking check";

/// Structured result of a harness run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingTestReport {
    /// Whether the full lifecycle completed.
    pub success: bool,
    /// The stage reached: "fetch", "reserve", "finalize", "verify" or "done".
    pub stage: String,
    /// Human-readable detail, naming the failure when there is one.
    pub message: String,
    /// The booking created, when finalization succeeded.
    pub booking_id: Option<String>,
    /// Slot state before the run.
    pub slot_before: Option<ConsultationSlot>,
    /// Slot state after the run.
    pub slot_after: Option<ConsultationSlot>,
}

impl BookingTestReport {
    fn failed(stage: &str, message: impl Into<String>) -> Self {
        Self {
            success: false,
            stage: stage.to_string(),
            message: message.into(),
            booking_id: None,
            slot_before: None,
            slot_after: None,
        }
    }
}

/// Drives a slot through reserve and finalize with fixed test parameters.
pub struct BookingTestHarness {
    store: Arc<dyn ConsultationStore>,
    client: SlotReservationClient,
}

impl BookingTestHarness {
    /// Creates a harness over the given store.
    pub fn new(store: Arc<dyn ConsultationStore>) -> Self {
        let client = SlotReservationClient::new(store.clone());
        Self { store, client }
    }

    /// Runs the full booking lifecycle against a slot.
    ///
    /// Never returns an error; failures are reported in the returned
    /// [`BookingTestReport`] with the stage that failed.
    pub async fn test_booking_process(
        &self,
        seller_id: &str,
        buyer_id: &str,
        slot_id: &str,
    ) -> BookingTestReport {
        let slot_before = match self.store.get_slot(slot_id).await {
            Ok(slot) => slot,
            Err(err) => return BookingTestReport::failed("fetch", err.to_string()),
        };

        if let Err(err) = self.client.reserve(slot_id, buyer_id).await {
            let mut report = BookingTestReport::failed("reserve", err.to_string());
            report.slot_before = Some(slot_before);
            return report;
        }

        let request = BookRequest {
            slot_id: slot_id.to_string(),
            buyer_id: buyer_id.to_string(),
            seller_id: seller_id.to_string(),
            booking_date: slot_before.date,
            start_time: slot_before.start_time,
            end_time: slot_before.end_time,
            notes: Some(TEST_NOTES.to_string()),
            payment_amount: 0.0,
        };
        let booking_id = match self.client.finalize_book(request).await {
            Ok(id) => id,
            Err(err) => {
                let mut report = BookingTestReport::failed("finalize", err.to_string());
                report.slot_before = Some(slot_before);
                return report;
            }
        };

        let slot_after = match self.store.get_slot(slot_id).await {
            Ok(slot) => slot,
            Err(err) => {
                let mut report = BookingTestReport::failed("verify", err.to_string());
                report.slot_before = Some(slot_before);
                report.booking_id = Some(booking_id);
                return report;
            }
        };

        info!(slot_id, booking_id = %booking_id, "booking lifecycle check passed");
        BookingTestReport {
            success: true,
            stage: "done".to_string(),
            message: format!("slot {slot_id} booked and verified"),
            booking_id: Some(booking_id),
            slot_before: Some(slot_before),
            slot_after: Some(slot_after),
        }
    }

    /// Removes a harness-created booking and reopens its slot.
    ///
    /// Safe to call after a partial failure: deleting an absent booking and
    /// resetting an absent or already-open slot are both no-ops.
    pub async fn cleanup_test_booking(&self, booking_id: &str, slot_id: &str) -> StoreResult<()> {
        if let Err(err) = self.store.delete_booking(booking_id).await {
            warn!(booking_id, %err, "failed to delete test booking");
            return Err(err);
        }
        self.store.reset_slot(slot_id).await?;
        info!(booking_id, slot_id, "test booking cleaned up");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use slotlink_store::{MemoryStore, StoreError};

    fn slot(id: &str) -> ConsultationSlot {
        ConsultationSlot::new(
            id,
            "seller-1",
            NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
            NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(10, 30, 0).unwrap(),
        )
    }

    #[tokio::test]
    async fn full_lifecycle_and_cleanup() {
        let store = Arc::new(MemoryStore::new());
        store.insert_slot(slot("s1")).await;
        let harness = BookingTestHarness::new(store.clone());

        let report = harness.test_booking_process("seller-1", "buyer-1", "s1").await;
        assert!(report.success, "{}", report.message);
        assert_eq!(report.stage, "done");
        let booking_id = report.booking_id.clone().unwrap();

        let after = report.slot_after.unwrap();
        assert!(after.is_booked);
        assert!(!after.is_available);
        assert_eq!(after.booked_by.as_deref(), Some("buyer-1"));

        harness.cleanup_test_booking(&booking_id, "s1").await.unwrap();
        let restored = store.get_slot("s1").await.unwrap();
        assert!(restored.is_available);
        assert!(!restored.is_booked);
        assert!(restored.booked_by.is_none());
        assert!(matches!(
            store.get_booking(&booking_id).await.unwrap_err(),
            StoreError::BookingNotFound { .. }
        ));
    }

    #[tokio::test]
    async fn missing_slot_reports_fetch_stage() {
        let harness = BookingTestHarness::new(Arc::new(MemoryStore::new()));
        let report = harness.test_booking_process("seller-1", "buyer-1", "nope").await;
        assert!(!report.success);
        assert_eq!(report.stage, "fetch");
        assert!(report.message.contains("nope"));
    }

    #[tokio::test]
    async fn contested_slot_reports_reserve_stage() {
        let store = Arc::new(MemoryStore::new());
        store.insert_slot(slot("s1")).await;
        assert!(store.reserve_slot("s1", "someone-else").await.unwrap().success);
        let harness = BookingTestHarness::new(store);

        let report = harness.test_booking_process("seller-1", "buyer-1", "s1").await;
        assert!(!report.success);
        assert_eq!(report.stage, "reserve");
        assert!(!report.message.is_empty());
        assert!(report.slot_before.is_some());
    }

    #[tokio::test]
    async fn cleanup_tolerates_absent_rows() {
        let harness = BookingTestHarness::new(Arc::new(MemoryStore::new()));
        harness.cleanup_test_booking("missing-bk", "missing-slot").await.unwrap();
    }

    #[tokio::test]
    async fn report_serializes_for_dashboards() {
        let store = Arc::new(MemoryStore::new());
        store.insert_slot(slot("s1")).await;
        let harness = BookingTestHarness::new(store);

        let report = harness.test_booking_process("seller-1", "buyer-1", "s1").await;
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["success"], serde_json::Value::Bool(true));
        assert!(json["slot_after"]["is_booked"].as_bool().unwrap());
    }
}
