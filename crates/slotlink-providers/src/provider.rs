//! MeetingProvider trait definition.
//!
//! This module defines the [`MeetingProvider`] trait, the seam between the
//! provisioning pipeline and a conferencing backend. The implementations in
//! this crate synthesize links locally and deterministically from an injected
//! id source; a real vendor-API-backed implementation would plug in behind
//! the same trait without changing the orchestration above it.

use std::future::Future;
use std::pin::Pin;

use chrono::{DateTime, Utc};

use slotlink_core::{MeetingLink, MeetingPlatform, PlatformConfig};

use crate::error::ProviderResult;

/// A boxed future for async trait methods.
///
/// Boxed futures keep the trait object-safe so the registry can hold
/// heterogeneous providers behind `dyn MeetingProvider`.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Parameters for a link-synthesis call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRequest {
    /// Meeting start, UTC.
    pub start: DateTime<Utc>,
    /// Meeting duration in minutes.
    pub duration_minutes: u32,
    /// Meeting title.
    pub title: String,
}

impl LinkRequest {
    /// Creates a new link request.
    pub fn new(start: DateTime<Utc>, duration_minutes: u32, title: impl Into<String>) -> Self {
        Self {
            start,
            duration_minutes,
            title: title.into(),
        }
    }
}

/// The core abstraction for meeting-link backends.
///
/// Each implementation covers one platform. The config's required contact
/// field is checked again inside `create_link` even though the pipeline
/// validates it earlier; a provider must not rely on pre-validation having
/// run.
pub trait MeetingProvider: Send + Sync {
    /// The platform this provider serves.
    fn platform(&self) -> MeetingPlatform;

    /// Synthesizes a join link for a meeting.
    ///
    /// # Errors
    ///
    /// Returns a `MissingContactField` error naming the absent field when the
    /// config lacks the platform's required contact detail.
    fn create_link(
        &self,
        config: PlatformConfig,
        request: LinkRequest,
    ) -> BoxFuture<'_, ProviderResult<MeetingLink>>;
}

impl std::fmt::Debug for dyn MeetingProvider + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MeetingProvider")
            .field("platform", &self.platform())
            .finish()
    }
}
