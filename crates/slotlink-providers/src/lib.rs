//! MeetingProvider trait and per-platform link synthesis.
//!
//! This crate owns the conferencing side of the booking pipeline: a closed
//! registry of link-synthesis backends, one per supported platform, behind
//! the object-safe [`MeetingProvider`] trait. Synthesis is local and
//! deterministic given the injected [`IdSource`]; no network calls are made.

pub mod error;
pub mod google_meet;
pub mod idgen;
pub mod phone;
pub mod provider;
pub mod registry;
pub mod skype;
pub mod teams;
pub mod zoom;

pub use error::{ProviderError, ProviderErrorCode, ProviderResult};
pub use google_meet::GoogleMeetProvider;
pub use idgen::{FixedIdSource, IdSource, RandomIdSource};
pub use phone::PhoneProvider;
pub use provider::{BoxFuture, LinkRequest, MeetingProvider};
pub use registry::ProviderRegistry;
pub use skype::SkypeProvider;
pub use teams::TeamsProvider;
pub use zoom::ZoomProvider;
