//! Meeting provisioning orchestration.
//!
//! [`MeetingProvisioningService`] sits between a finalized booking and the
//! external meeting systems. It runs two pipelines:
//!
//! - `schedule_consultation_meeting`: create a calendar event, persist its id
//!   and link onto the booking, then deliver invites best-effort.
//! - `provision_platform_meeting`: synthesize a platform join link through
//!   the provider registry and persist it.
//!
//! Both pipelines validate contact fields before touching anything remote
//! and skip work that has already been done for the booking, so a retry
//! after a partial failure never double-provisions.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, error, info, warn};

use slotlink_core::{
    CalendarEvent, CalendarInvite, MeetingLink, SellerSettings, validate_email,
    validate_platform_config,
};
use slotlink_providers::{LinkRequest, ProviderRegistry};
use slotlink_store::{ConsultationStore, InviteTracker};

use crate::calendar::{CalendarService, InviteDelivery};
use crate::error::{ProvisionError, ProvisionResult};

/// Outcome of a scheduling call.
///
/// The hard result (event id and link) and the soft invite-delivery outcome
/// are separate channels: a swallowed invite failure is visible here and in
/// the persisted flags, never as an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleOutcome {
    /// The calendar event id attached to the booking.
    pub event_id: String,
    /// The meeting link attached to the booking.
    pub meet_link: String,
    /// Which invites actually went out during this call.
    pub invites: InviteDelivery,
    /// True if the booking already had a calendar event and no work was done.
    pub already_provisioned: bool,
}

/// Orchestrates meeting provisioning for finalized bookings.
pub struct MeetingProvisioningService {
    store: Arc<dyn ConsultationStore>,
    calendar: Arc<dyn CalendarService>,
    registry: ProviderRegistry,
    invites: InviteTracker,
}

impl MeetingProvisioningService {
    /// Creates a service over the given store, calendar backend and registry.
    pub fn new(
        store: Arc<dyn ConsultationStore>,
        calendar: Arc<dyn CalendarService>,
        registry: ProviderRegistry,
    ) -> Self {
        let invites = InviteTracker::new(store.clone());
        Self {
            store,
            calendar,
            registry,
            invites,
        }
    }

    /// Creates a calendar meeting for a booking and delivers invites.
    ///
    /// Event creation and persistence are hard steps: either failing fails
    /// the call. Invite delivery is best-effort; its outcome is reported in
    /// the returned [`ScheduleOutcome`] and in the persisted flags only.
    ///
    /// # Errors
    ///
    /// - `Validation` if either email fails the format check (nothing remote
    ///   was touched).
    /// - `CalendarCreation` if the event could not be created (nothing was
    ///   persisted; the call is safe to retry).
    /// - `OrphanedEvent` if the event exists externally but could not be
    ///   persisted; this needs operator reconciliation.
    pub async fn schedule_consultation_meeting(
        &self,
        booking_id: &str,
        seller_email: &str,
        buyer_email: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        summary: &str,
    ) -> ProvisionResult<ScheduleOutcome> {
        if !validate_email(seller_email) {
            return Err(ProvisionError::validation(format!(
                "seller email is not a valid email address: {seller_email:?}"
            )));
        }
        if !validate_email(buyer_email) {
            return Err(ProvisionError::validation(format!(
                "buyer email is not a valid email address: {buyer_email:?}"
            )));
        }

        let booking = self.store.get_booking(booking_id).await?;
        if booking.has_calendar_event() {
            // Retries land here instead of creating a second external event.
            info!(booking_id, "calendar event already provisioned, skipping");
            return Ok(ScheduleOutcome {
                event_id: booking.google_calendar_event_id.unwrap_or_default(),
                meet_link: booking.google_calendar_meet_link.unwrap_or_default(),
                invites: InviteDelivery {
                    seller_sent: booking.seller_invite_sent,
                    buyer_sent: booking.buyer_invite_sent,
                },
                already_provisioned: true,
            });
        }

        let event = CalendarEvent::new(summary, start, end)
            .with_description(format!(
                "Consultation booking {booking_id} between {seller_email} and {buyer_email}"
            ))
            .with_attendee(seller_email)
            .with_attendee(buyer_email);

        let created = match self.calendar.create_event(event).await {
            Ok(created) => created,
            Err(err) => {
                debug!(booking_id, %err, "calendar event creation failed");
                return Err(ProvisionError::calendar_creation(err.to_string()));
            }
        };
        info!(booking_id, event_id = %created.event_id, "calendar event created");

        if let Err(err) = self
            .store
            .store_calendar_event(booking_id, &created.event_id, &created.meet_link)
            .await
        {
            // The external event now exists without a durable local record.
            // Surface it distinctly; do not roll the event back.
            error!(
                booking_id,
                event_id = %created.event_id,
                %err,
                "created event could not be persisted, manual reconciliation needed"
            );
            return Err(ProvisionError::orphaned_event(
                created.event_id,
                err.to_string(),
            ));
        }

        let invite = CalendarInvite {
            event_id: created.event_id.clone(),
            seller_email: seller_email.to_string(),
            buyer_email: buyer_email.to_string(),
            join_url: created.meet_link.clone(),
            start,
            end,
            summary: summary.to_string(),
        };
        let delivery = match self.calendar.send_invites(invite).await {
            Ok(delivery) => delivery,
            Err(err) => {
                // Best-effort: the booking and its link remain valid.
                warn!(booking_id, %err, "invite delivery failed");
                InviteDelivery::none()
            }
        };

        if delivery.any() {
            if let Err(err) = self
                .invites
                .update_invite_status(booking_id, delivery.seller_sent, delivery.buyer_sent)
                .await
            {
                warn!(booking_id, %err, "failed to record invite delivery");
            }
        }

        Ok(ScheduleOutcome {
            event_id: created.event_id,
            meet_link: created.meet_link,
            invites: delivery,
            already_provisioned: false,
        })
    }

    /// Synthesizes a platform meeting link for a booking and persists it.
    ///
    /// # Errors
    ///
    /// - `Validation` if the platform key is unknown or the seller settings
    ///   lack the platform's required contact field (nothing remote was
    ///   touched).
    /// - `Provider` if link synthesis itself refuses the config.
    pub async fn provision_platform_meeting(
        &self,
        booking_id: &str,
        platform_key: &str,
        settings: &SellerSettings,
        start: DateTime<Utc>,
        duration_minutes: u32,
        title: &str,
    ) -> ProvisionResult<MeetingLink> {
        let check = validate_platform_config(platform_key, settings);
        if !check.is_valid {
            return Err(ProvisionError::validation(check.message));
        }

        let booking = self.store.get_booking(booking_id).await?;
        if booking.has_platform_meeting() {
            if let (Some(platform), Some(join_url)) =
                (booking.meeting_platform, booking.platform_join_url)
            {
                info!(booking_id, "platform meeting already provisioned, skipping");
                let mut link = MeetingLink::new(platform, join_url);
                link.meeting_id = booking.platform_meeting_id;
                link.password = booking.platform_meeting_password;
                return Ok(link);
            }
        }

        let link = self
            .registry
            .create_link(
                platform_key,
                settings,
                LinkRequest::new(start, duration_minutes, title),
            )
            .await?;

        self.store.store_platform_meeting(booking_id, &link).await?;
        info!(booking_id, platform = platform_key, "platform meeting provisioned");
        Ok(link)
    }
}
