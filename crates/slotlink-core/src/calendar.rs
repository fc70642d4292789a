//! Calendar event and invite value objects.
//!
//! Both types are transient: they exist only for the duration of a
//! provisioning call and are never persisted directly. The durable outcome
//! (event id, link, invite flags) lives on the booking record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A calendar-style meeting to be created with the calendar service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// Short title of the event.
    pub summary: String,
    /// Longer description shown in the calendar entry.
    pub description: String,
    /// Event start, UTC.
    pub start: DateTime<Utc>,
    /// Event end, UTC.
    pub end: DateTime<Utc>,
    /// Attendee email addresses.
    pub attendees: Vec<String>,
}

impl CalendarEvent {
    /// Creates an event with an empty description and no attendees.
    pub fn new(summary: impl Into<String>, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            summary: summary.into(),
            description: String::new(),
            start,
            end,
            attendees: Vec::new(),
        }
    }

    /// Builder method to set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Builder method to add an attendee.
    pub fn with_attendee(mut self, email: impl Into<String>) -> Self {
        self.attendees.push(email.into());
        self
    }
}

/// An invite-delivery request for both booking parties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarInvite {
    /// The calendar event the invite refers to.
    pub event_id: String,
    /// Seller's email address.
    pub seller_email: String,
    /// Buyer's email address.
    pub buyer_email: String,
    /// Join link included in the invite.
    pub join_url: String,
    /// Meeting start, UTC.
    pub start: DateTime<Utc>,
    /// Meeting end, UTC.
    pub end: DateTime<Utc>,
    /// Event summary repeated in the invite body.
    pub summary: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_builder() {
        let start = Utc::now();
        let end = start + chrono::Duration::minutes(30);
        let event = CalendarEvent::new("Consultation", start, end)
            .with_description("Prompt review session")
            .with_attendee("seller@example.com")
            .with_attendee("buyer@example.com");

        assert_eq!(event.summary, "Consultation");
        assert_eq!(event.attendees.len(), 2);
        assert_eq!(event.start, start);
    }
}
