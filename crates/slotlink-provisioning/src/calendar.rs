//! CalendarService trait and simulated implementation.
//!
//! The calendar side of provisioning creates a meeting event and delivers
//! invites to both parties. Real delivery is out of scope; the
//! [`SimulatedCalendar`] synthesizes plausible event ids and Meet links from
//! an injected id source, and a reqwest-backed implementation would slot in
//! behind the same trait.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use thiserror::Error;

use slotlink_core::{CalendarEvent, CalendarInvite};
use slotlink_providers::IdSource;

/// A boxed future for async trait methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Errors from the calendar backend.
#[derive(Debug, Error)]
pub enum CalendarError {
    /// The event could not be created.
    #[error("event creation failed: {0}")]
    Creation(String),

    /// Invite delivery failed for both parties.
    #[error("invite delivery failed: {0}")]
    Delivery(String),
}

/// A successfully created calendar event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedEvent {
    /// The backend's event id.
    pub event_id: String,
    /// The meeting link attached to the event.
    pub meet_link: String,
}

/// Per-party invite delivery outcome.
///
/// Delivery is tracked per participant because sends fail independently:
/// one party's invite can go out while the other's bounces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InviteDelivery {
    /// Whether the seller's invite went out.
    pub seller_sent: bool,
    /// Whether the buyer's invite went out.
    pub buyer_sent: bool,
}

impl InviteDelivery {
    /// Both invites delivered.
    pub fn all() -> Self {
        Self {
            seller_sent: true,
            buyer_sent: true,
        }
    }

    /// Neither invite delivered.
    pub fn none() -> Self {
        Self::default()
    }

    /// Returns true if at least one invite went out.
    pub fn any(&self) -> bool {
        self.seller_sent || self.buyer_sent
    }
}

/// The calendar backend used by the provisioning pipeline.
pub trait CalendarService: Send + Sync {
    /// Creates a meeting event and returns its id and join link.
    fn create_event(&self, event: CalendarEvent) -> BoxFuture<'_, Result<CreatedEvent, CalendarError>>;

    /// Delivers invites to both parties, reporting per-party success.
    ///
    /// A total failure is an `Err`; partial delivery is an `Ok` with the
    /// per-party flags set accordingly.
    fn send_invites(
        &self,
        invite: CalendarInvite,
    ) -> BoxFuture<'_, Result<InviteDelivery, CalendarError>>;
}

/// A local, deterministic calendar backend for tests and development.
///
/// Event ids are 26 lowercase alphanumerics and meet links follow the
/// `xxx-xxxx-xxx` code shape, both drawn from the injected id source.
/// Failures can be armed per call to exercise the pipeline's error paths,
/// and call counters expose how far a pipeline run got.
pub struct SimulatedCalendar {
    ids: Arc<dyn IdSource>,
    fail_creates: AtomicU32,
    fail_deliveries: AtomicU32,
    next_delivery: Mutex<Option<InviteDelivery>>,
    create_calls: AtomicUsize,
    invite_calls: AtomicUsize,
}

impl SimulatedCalendar {
    /// Creates a simulated calendar over the given id source.
    pub fn new(ids: Arc<dyn IdSource>) -> Self {
        Self {
            ids,
            fail_creates: AtomicU32::new(0),
            fail_deliveries: AtomicU32::new(0),
            next_delivery: Mutex::new(None),
            create_calls: AtomicUsize::new(0),
            invite_calls: AtomicUsize::new(0),
        }
    }

    /// Arms the next `count` event creations to fail.
    pub fn fail_creates(&self, count: u32) {
        self.fail_creates.store(count, Ordering::SeqCst);
    }

    /// Arms the next `count` invite deliveries to fail entirely.
    pub fn fail_deliveries(&self, count: u32) {
        self.fail_deliveries.store(count, Ordering::SeqCst);
    }

    /// Scripts the outcome of the next invite delivery (partial delivery).
    pub fn set_next_delivery(&self, delivery: InviteDelivery) {
        *self
            .next_delivery
            .lock()
            .expect("delivery script lock poisoned") = Some(delivery);
    }

    /// Number of `create_event` calls made.
    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    /// Number of `send_invites` calls made.
    pub fn invite_calls(&self) -> usize {
        self.invite_calls.load(Ordering::SeqCst)
    }

    fn take_failure(counter: &AtomicU32) -> bool {
        counter
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

impl CalendarService for SimulatedCalendar {
    fn create_event(&self, event: CalendarEvent) -> BoxFuture<'_, Result<CreatedEvent, CalendarError>> {
        Box::pin(async move {
            self.create_calls.fetch_add(1, Ordering::SeqCst);
            if Self::take_failure(&self.fail_creates) {
                return Err(CalendarError::Creation(format!(
                    "simulated failure creating event {:?}",
                    event.summary
                )));
            }

            let event_id = self.ids.lower_alnum(26);
            let meet_link = format!(
                "https://meet.google.com/{}-{}-{}",
                self.ids.letters(3),
                self.ids.lower_alnum(4),
                self.ids.letters(3)
            );
            Ok(CreatedEvent {
                event_id,
                meet_link,
            })
        })
    }

    fn send_invites(
        &self,
        invite: CalendarInvite,
    ) -> BoxFuture<'_, Result<InviteDelivery, CalendarError>> {
        Box::pin(async move {
            self.invite_calls.fetch_add(1, Ordering::SeqCst);
            if Self::take_failure(&self.fail_deliveries) {
                return Err(CalendarError::Delivery(format!(
                    "simulated delivery failure for event {}",
                    invite.event_id
                )));
            }

            let scripted = self
                .next_delivery
                .lock()
                .expect("delivery script lock poisoned")
                .take();
            Ok(scripted.unwrap_or_else(InviteDelivery::all))
        })
    }
}
