//! Core types: slots, bookings, platforms, validation, tracing

pub mod booking;
pub mod calendar;
pub mod platform;
pub mod slot;
pub mod tracing;
pub mod validate;

pub use booking::{BookingStatus, ConsultationBooking};
pub use calendar::{CalendarEvent, CalendarInvite};
pub use platform::{ContactField, MeetingLink, MeetingPlatform, PlatformConfig, SellerSettings};
pub use slot::ConsultationSlot;
pub use tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
pub use validate::{ConfigCheck, validate_email, validate_phone_number, validate_platform_config};
