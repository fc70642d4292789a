//! Remote store contracts, slot reservation client, invite tracking.
//!
//! The remote store owns slots and bookings; this crate defines the
//! [`ConsultationStore`] trait it is consumed through, the wire shapes of
//! its two state-transition RPCs, the [`SlotReservationClient`] that
//! normalizes their results, and an in-memory implementation with the same
//! atomicity guarantees for tests.

pub mod client;
pub mod error;
pub mod invites;
pub mod memory;
pub mod rpc;
pub mod store;

pub use client::{RetryPolicy, SlotReservationClient};
pub use error::{StoreError, StoreResult};
pub use invites::InviteTracker;
pub use memory::MemoryStore;
pub use rpc::{BookOutcome, BookRequest, ReserveOutcome};
pub use store::{BoxFuture, ConsultationStore};
