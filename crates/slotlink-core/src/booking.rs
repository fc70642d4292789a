//! Consultation booking record.
//!
//! A booking is the durable record created once a slot reservation is
//! finalized. The provisioning pipeline later attaches meeting and calendar
//! fields to it; those fields are write-once in the forward direction (a
//! booking never goes back to "no meeting" once one is attached), and the
//! per-party invite flags only ever move from false to true.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::platform::MeetingPlatform;

/// Lifecycle status of a booking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Created but not yet confirmed by the seller.
    #[default]
    Pending,
    /// Confirmed; the consultation will take place.
    Confirmed,
    /// Cancelled by either party.
    Cancelled,
    /// The consultation has taken place.
    Completed,
}

impl BookingStatus {
    /// Returns the lowercase wire name of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
        }
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" => Ok(Self::Cancelled),
            "completed" => Ok(Self::Completed),
            other => Err(format!("unknown booking status: {other}")),
        }
    }
}

/// A finalized consultation booking.
///
/// Field wire names follow the store's column names; the seller invite flag
/// is persisted under its legacy `google_calendar_*` name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsultationBooking {
    /// Unique identifier for the booking.
    pub id: String,
    /// The slot this booking was finalized against.
    pub slot_id: String,
    /// The buyer who booked.
    pub buyer_id: String,
    /// The seller whose slot was booked.
    pub seller_id: String,
    /// Current lifecycle status.
    pub status: BookingStatus,
    /// Amount paid at checkout. Opaque to this pipeline.
    pub payment_amount: f64,
    /// Free-form notes from the buyer.
    pub notes: Option<String>,
    /// Platform chosen for the meeting, once provisioned.
    pub meeting_platform: Option<MeetingPlatform>,
    /// Platform meeting id, where the platform has one.
    pub platform_meeting_id: Option<String>,
    /// Platform meeting passcode, where the platform uses one.
    pub platform_meeting_password: Option<String>,
    /// Join URL for the provisioned meeting.
    pub platform_join_url: Option<String>,
    /// Legacy alias of `platform_join_url`, kept for older readers.
    pub meeting_link: Option<String>,
    /// Calendar event id, when the calendar path was used.
    pub google_calendar_event_id: Option<String>,
    /// Meet link attached to the calendar event.
    pub google_calendar_meet_link: Option<String>,
    /// Whether the seller's calendar invite was delivered.
    #[serde(rename = "google_calendar_invite_sent")]
    pub seller_invite_sent: bool,
    /// When the seller's invite was delivered.
    #[serde(rename = "google_calendar_invite_sent_at")]
    pub seller_invite_sent_at: Option<DateTime<Utc>>,
    /// Whether the buyer's calendar invite was delivered.
    #[serde(rename = "buyer_calendar_invite_sent")]
    pub buyer_invite_sent: bool,
    /// When the buyer's invite was delivered.
    #[serde(rename = "buyer_calendar_invite_sent_at")]
    pub buyer_invite_sent_at: Option<DateTime<Utc>>,
}

impl ConsultationBooking {
    /// Creates a fresh booking with no meeting attached.
    pub fn new(
        id: impl Into<String>,
        slot_id: impl Into<String>,
        buyer_id: impl Into<String>,
        seller_id: impl Into<String>,
        payment_amount: f64,
    ) -> Self {
        Self {
            id: id.into(),
            slot_id: slot_id.into(),
            buyer_id: buyer_id.into(),
            seller_id: seller_id.into(),
            status: BookingStatus::Pending,
            payment_amount,
            notes: None,
            meeting_platform: None,
            platform_meeting_id: None,
            platform_meeting_password: None,
            platform_join_url: None,
            meeting_link: None,
            google_calendar_event_id: None,
            google_calendar_meet_link: None,
            seller_invite_sent: false,
            seller_invite_sent_at: None,
            buyer_invite_sent: false,
            buyer_invite_sent_at: None,
        }
    }

    /// Builder method to set the buyer's notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Returns true if a platform meeting has already been provisioned.
    pub fn has_platform_meeting(&self) -> bool {
        self.platform_join_url.is_some()
    }

    /// Returns true if a calendar event has already been provisioned.
    pub fn has_calendar_event(&self) -> bool {
        self.google_calendar_event_id.is_some()
    }

    /// Attaches a provisioned platform meeting to this booking.
    ///
    /// Also writes the legacy `meeting_link` alias.
    pub fn attach_platform_meeting(&mut self, link: &crate::platform::MeetingLink) {
        self.meeting_platform = Some(link.platform);
        self.platform_meeting_id = link.meeting_id.clone();
        self.platform_meeting_password = link.password.clone();
        self.platform_join_url = Some(link.join_url.clone());
        self.meeting_link = Some(link.join_url.clone());
    }

    /// Attaches a calendar event to this booking.
    pub fn attach_calendar_event(
        &mut self,
        event_id: impl Into<String>,
        meet_link: impl Into<String>,
    ) {
        let meet_link = meet_link.into();
        self.google_calendar_event_id = Some(event_id.into());
        self.google_calendar_meet_link = Some(meet_link.clone());
        self.meeting_link = Some(meet_link);
    }

    /// Records invite deliveries.
    ///
    /// A `true` argument sets the corresponding flag and stamps `at` on the
    /// false-to-true transition; a `false` argument changes nothing. Flags
    /// never move back to false, so this is safe to call repeatedly as
    /// retries succeed incrementally.
    pub fn record_invites(&mut self, seller_sent: bool, buyer_sent: bool, at: DateTime<Utc>) {
        if seller_sent && !self.seller_invite_sent {
            self.seller_invite_sent = true;
            self.seller_invite_sent_at = Some(at);
        }
        if buyer_sent && !self.buyer_invite_sent {
            self.buyer_invite_sent = true;
            self.buyer_invite_sent_at = Some(at);
        }
    }
}
