use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use tracing::{debug, info};
use uuid::Uuid;

use notification_cell::{NotificationDispatcher, NotificationKind};
use shared_config::AppConfig;
use shared_database::rest::RestClient;

use crate::models::{
    Appointment, AppointmentError, AppointmentStatus, NewAppointment, ScheduleVisitRequest,
};
use crate::services::clock::{Clock, SystemClock};
use crate::services::validation::{
    normalize_phone, parse_schedule, validate_schedule, ScheduleCandidate,
};
use crate::store::{AppointmentStore, RestAppointmentStore, StatusUpdate};

/// Gates every appointment create/update through the validator, persists the
/// result, and hands status changes to the notification dispatcher.
///
/// Validation and persistence run synchronously on the request; dispatch is
/// spawned detached afterwards, so the response never waits for email.
pub struct VisitBookingService {
    store: Arc<dyn AppointmentStore>,
    dispatcher: Arc<NotificationDispatcher>,
    clock: Arc<dyn Clock>,
}

impl VisitBookingService {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_parts(
            Arc::new(RestAppointmentStore::new(RestClient::new(config))),
            Arc::new(NotificationDispatcher::new(config)),
            Arc::new(SystemClock::from_config(config)),
        )
    }

    pub fn with_parts(
        store: Arc<dyn AppointmentStore>,
        dispatcher: Arc<NotificationDispatcher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            dispatcher,
            clock,
        }
    }

    /// Public form intake. The new appointment always starts `pending`, so no
    /// conflict query is needed yet.
    pub async fn schedule_visit(
        &self,
        request: ScheduleVisitRequest,
    ) -> Result<Appointment, AppointmentError> {
        let phone = normalize_phone(&request.phone)?;
        let (date, time) = parse_schedule(&request.date, &request.time)?;

        let candidate = ScheduleCandidate {
            date,
            time,
            status: AppointmentStatus::Pending,
        };
        validate_schedule(&candidate, &[], self.clock.now_local())?;

        let appointment = self
            .store
            .insert(&NewAppointment {
                name: request.name,
                email: request.email,
                phone,
                date,
                time,
                message: request.message,
                status: AppointmentStatus::Pending,
                quote_id: request.quote_id,
            })
            .await?;

        info!(
            "Visit scheduled: {} on {} at {}",
            appointment.id, appointment.date, appointment.time
        );
        Ok(appointment)
    }

    /// Admin accepts a request. Re-validates against the other accepted
    /// appointments of that date, persists the transition, then fires the
    /// confirmation email in the background.
    pub async fn accept(
        &self,
        id: Uuid,
        admin_id: &str,
    ) -> Result<Appointment, AppointmentError> {
        let appointment = self.require(id).await?;

        let others = self.accepted_datetimes(&appointment, id).await?;
        let candidate = ScheduleCandidate {
            date: appointment.date,
            time: appointment.time,
            status: AppointmentStatus::Accepted,
        };
        validate_schedule(&candidate, &others, self.clock.now_local())?;

        let updated = self
            .store
            .update_status(id, &StatusUpdate::accepted(admin_id))
            .await?;

        info!("Appointment {} accepted by {}", id, admin_id);
        self.dispatcher.spawn(id, NotificationKind::Accepted);

        Ok(updated)
    }

    /// Admin turns a request down. The validator skips the past check and the
    /// conflict window for rejected status, so stale requests can still be
    /// answered.
    pub async fn reject(
        &self,
        id: Uuid,
        admin_id: &str,
    ) -> Result<Appointment, AppointmentError> {
        let appointment = self.require(id).await?;

        let candidate = ScheduleCandidate {
            date: appointment.date,
            time: appointment.time,
            status: AppointmentStatus::Rejected,
        };
        validate_schedule(&candidate, &[], self.clock.now_local())?;

        let updated = self
            .store
            .update_status(id, &StatusUpdate::rejected(admin_id))
            .await?;

        info!("Appointment {} rejected by {}", id, admin_id);
        self.dispatcher.spawn(id, NotificationKind::Rejected);

        Ok(updated)
    }

    /// Occupied times on a date, for the public form's slot picker. Pending
    /// requests block a slot too; only rejection frees it.
    pub async fn occupied_times(
        &self,
        date_text: &str,
    ) -> Result<Vec<NaiveTime>, AppointmentError> {
        let date = NaiveDate::parse_from_str(date_text.trim(), "%Y-%m-%d")
            .map_err(|_| AppointmentError::MalformedInput)?;

        let occupied = self.store.occupied_on_date(date).await?;
        Ok(occupied.iter().map(|a| a.time).collect())
    }

    pub async fn get(&self, id: Uuid) -> Result<Appointment, AppointmentError> {
        self.require(id).await
    }

    pub async fn list(&self) -> Result<Vec<Appointment>, AppointmentError> {
        self.store.list().await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppointmentError> {
        self.require(id).await?;
        self.store.delete(id).await?;
        info!("Appointment {} deleted", id);
        Ok(())
    }

    async fn require(&self, id: Uuid) -> Result<Appointment, AppointmentError> {
        self.store
            .fetch(id)
            .await?
            .ok_or(AppointmentError::NotFound)
    }

    async fn accepted_datetimes(
        &self,
        appointment: &Appointment,
        exclude: Uuid,
    ) -> Result<Vec<NaiveDateTime>, AppointmentError> {
        let others = self
            .store
            .accepted_on_date(appointment.date, Some(exclude))
            .await?;

        debug!(
            "Conflict check for {}: {} accepted appointments on {}",
            exclude,
            others.len(),
            appointment.date
        );

        Ok(others.iter().map(|a| a.scheduled_at()).collect())
    }
}
