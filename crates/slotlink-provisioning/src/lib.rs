//! Meeting provisioning orchestration.
//!
//! Ties the reservation, provider and store crates together: once a booking
//! exists, [`MeetingProvisioningService`] creates the external meeting
//! (calendar event or platform link), persists the result, and tracks
//! best-effort invite delivery. [`BookingTestHarness`] exercises the whole
//! slot lifecycle end to end and restores state afterwards.

pub mod calendar;
pub mod error;
pub mod harness;
pub mod service;

pub use calendar::{
    BoxFuture, CalendarError, CalendarService, CreatedEvent, InviteDelivery, SimulatedCalendar,
};
pub use error::{ProvisionError, ProvisionResult};
pub use harness::{BookingTestHarness, BookingTestReport};
pub use service::{MeetingProvisioningService, ScheduleOutcome};
