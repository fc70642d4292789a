//! Slot reservation client.
//!
//! Thin wrapper over the store's two state-transition RPCs that normalizes
//! their result shape: domain refusals (`success = false`) become typed,
//! non-retryable errors, while transport failures are retried under a small
//! bounded budget. No upstream policy exists for timeouts or retries, so the
//! defaults here are deliberately conservative: three attempts, 200 ms
//! initial backoff, doubling per attempt.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::error::{StoreError, StoreResult};
use crate::rpc::BookRequest;
use crate::store::ConsultationStore;

/// Retry policy for transport-level failures.
///
/// Domain refusals are never retried, whatever the policy says.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub max_attempts: u32,
    /// Backoff before the second attempt.
    pub initial_backoff: Duration,
    /// Backoff multiplier per subsequent attempt.
    pub multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(200),
            multiplier: 2.0,
        }
    }
}

impl RetryPolicy {
    /// A policy that never retries.
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            initial_backoff: Duration::ZERO,
            multiplier: 1.0,
        }
    }

    /// Returns the backoff delay before the given retry (1-based).
    pub fn backoff_delay(&self, retry: u32) -> Duration {
        if retry == 0 {
            return Duration::ZERO;
        }
        let base = self.initial_backoff.as_secs_f64();
        let delay = base * self.multiplier.powi(retry as i32 - 1);
        Duration::from_secs_f64(delay)
    }
}

/// Client for the reserve/finalize slot transitions.
pub struct SlotReservationClient {
    store: Arc<dyn ConsultationStore>,
    retry: RetryPolicy,
}

impl SlotReservationClient {
    /// Creates a client with the default retry policy.
    pub fn new(store: Arc<dyn ConsultationStore>) -> Self {
        Self {
            store,
            retry: RetryPolicy::default(),
        }
    }

    /// Builder method to override the retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Places a provisional hold on a slot for a buyer.
    ///
    /// # Errors
    ///
    /// Returns `ReservationConflict` when another buyer holds the slot, or
    /// `Transport` after the retry budget is exhausted.
    pub async fn reserve(&self, slot_id: &str, buyer_id: &str) -> StoreResult<()> {
        let outcome = self
            .with_transport_retry("reserve", || self.store.reserve_slot(slot_id, buyer_id))
            .await?;
        if outcome.success {
            debug!(slot_id, buyer_id, "slot reserved");
            Ok(())
        } else {
            Err(StoreError::conflict(
                outcome
                    .error
                    .unwrap_or_else(|| "slot is no longer available".to_string()),
            ))
        }
    }

    /// Converts a held reservation into a booking and returns the booking id.
    ///
    /// # Errors
    ///
    /// Returns `BookingRejected` on a domain refusal, or `Transport` after
    /// the retry budget is exhausted.
    pub async fn finalize_book(&self, request: BookRequest) -> StoreResult<String> {
        let outcome = self
            .with_transport_retry("finalize_book", || self.store.book_slot(request.clone()))
            .await?;
        if !outcome.success {
            return Err(StoreError::rejected(
                outcome
                    .error
                    .unwrap_or_else(|| "booking was not finalized".to_string()),
            ));
        }
        match outcome.booking_id {
            Some(id) => {
                debug!(slot_id = %request.slot_id, booking_id = %id, "booking finalized");
                Ok(id)
            }
            // A success without an id is a broken remote response; surface it
            // as a persistence problem, not a retryable transport error.
            None => Err(StoreError::persistence(
                "finalize reported success without a booking id",
            )),
        }
    }

    /// Runs `call`, retrying transport errors under the policy. Domain-level
    /// outcomes (including refusals) pass through on the first response.
    async fn with_transport_retry<T, F, Fut>(&self, op: &str, mut call: F) -> StoreResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = StoreResult<T>>,
    {
        let mut attempt = 1u32;
        loop {
            match call().await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_retryable() && attempt < self.retry.max_attempts => {
                    let delay = self.retry.backoff_delay(attempt);
                    warn!(op, attempt, ?delay, %err, "transport failure, retrying");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
