use std::sync::Arc;

use tracing::{debug, error, info, warn};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::rest::RestClient;

use crate::lookup::{AppointmentContact, AppointmentLookup, RestAppointmentLookup};
use crate::models::{DispatchOutcome, NotificationError, NotificationKind};
use crate::services::mailer::{MailerClient, OutboundEmail};
use crate::services::rate_limit::DispatchRateLimiter;
use crate::services::templates::{strip_tags, MessageTemplates};

/// Delivers status-change emails off the request path.
///
/// A dispatch is launched with [`NotificationDispatcher::spawn`] after the
/// status transition is persisted; the triggering request never awaits it and
/// no failure here reaches the end user.
pub struct NotificationDispatcher {
    lookup: Arc<dyn AppointmentLookup>,
    mailer: MailerClient,
    templates: MessageTemplates,
    limiter: DispatchRateLimiter,
}

impl NotificationDispatcher {
    pub fn new(config: &AppConfig) -> Self {
        let lookup = Arc::new(RestAppointmentLookup::new(RestClient::new(config)));
        Self::with_parts(
            lookup,
            MailerClient::new(config),
            MessageTemplates::default(),
            DispatchRateLimiter::default(),
        )
    }

    pub fn with_parts(
        lookup: Arc<dyn AppointmentLookup>,
        mailer: MailerClient,
        templates: MessageTemplates,
        limiter: DispatchRateLimiter,
    ) -> Self {
        Self {
            lookup,
            mailer,
            templates,
            limiter,
        }
    }

    /// Launch a dispatch as a detached background task. The handle is
    /// dropped: the task runs to completion or fails silently, and there is
    /// no cancellation.
    pub fn spawn(self: &Arc<Self>, appointment_id: Uuid, kind: NotificationKind) {
        let dispatcher = Arc::clone(self);
        tokio::spawn(async move {
            let outcome = dispatcher.dispatch(appointment_id, kind).await;
            debug!(
                "Dispatch for appointment {} ({}) finished: {:?}",
                appointment_id, kind, outcome
            );
        });
    }

    pub async fn dispatch(
        &self,
        appointment_id: Uuid,
        kind: NotificationKind,
    ) -> DispatchOutcome {
        if !self.limiter.try_acquire() {
            debug!(
                "Dispatch for appointment {} ({}) dropped by cooldown",
                appointment_id, kind
            );
            return DispatchOutcome::RateLimited;
        }

        // The appointment may have been deleted between the transition and
        // this task running; look it up again before touching the transport.
        let contact = match self.lookup.appointment_contact(appointment_id).await {
            Ok(Some(contact)) => contact,
            Ok(None) => {
                warn!("Appointment {} not found, dropping notification", appointment_id);
                return DispatchOutcome::Failed(NotificationError::LookupFailure);
            }
            Err(e) => {
                warn!("Lookup for appointment {} failed: {}", appointment_id, e);
                return DispatchOutcome::Failed(e);
            }
        };

        match self.send_templated(&contact, kind).await {
            Ok(()) => {
                info!(
                    "Notification ({}) sent to {} for appointment {}",
                    kind, contact.email, appointment_id
                );
                DispatchOutcome::Delivered
            }
            Err(e) => {
                warn!(
                    "Templated notification for appointment {} failed ({}), trying fallback",
                    appointment_id, e
                );
                match self.send_fallback(&contact, kind).await {
                    Ok(()) => {
                        info!(
                            "Fallback notification ({}) sent to {} for appointment {}",
                            kind, contact.email, appointment_id
                        );
                        DispatchOutcome::FallbackDelivered
                    }
                    Err(fallback_err) => {
                        error!(
                            "Notification for appointment {} failed completely: {}",
                            appointment_id, fallback_err
                        );
                        DispatchOutcome::Failed(fallback_err)
                    }
                }
            }
        }
    }

    async fn send_templated(
        &self,
        contact: &AppointmentContact,
        kind: NotificationKind,
    ) -> Result<(), NotificationError> {
        let context = [
            ("nome", contact.name.clone()),
            ("data", contact.date.format("%d/%m/%Y").to_string()),
            ("hora", contact.time.format("%H:%M").to_string()),
            ("telefone", contact.phone.clone()),
            ("mensagem", contact.message_or_placeholder().to_string()),
        ];

        let html = self.templates.render(kind.template_name(), &context)?;
        let text = strip_tags(&html);

        self.mailer
            .send(&OutboundEmail {
                subject: kind.subject().to_string(),
                to: vec![contact.email.clone()],
                text,
                html: Some(html),
            })
            .await
    }

    async fn send_fallback(
        &self,
        contact: &AppointmentContact,
        kind: NotificationKind,
    ) -> Result<(), NotificationError> {
        let date = contact.date.format("%d/%m/%Y");
        let time = contact.time.format("%H:%M");

        let body = match kind {
            NotificationKind::Accepted => format!(
                "Agendamento CONFIRMADO\n\n\
                 Olá {},\n\n\
                 Seu agendamento foi confirmado:\n\
                 Data: {}\n\
                 Hora: {}\n\n\
                 Atenciosamente,\n\
                 Sabina Decorações",
                contact.name, date, time
            ),
            NotificationKind::Rejected => format!(
                "Agendamento RECUSADO\n\n\
                 Olá {},\n\n\
                 Não podemos atender seu agendamento:\n\
                 Data: {}\n\
                 Hora: {}\n\n\
                 Entre em contato conosco para buscar alternativas.\n\n\
                 Sabina Decorações",
                contact.name, date, time
            ),
        };

        self.mailer
            .send(&OutboundEmail {
                subject: kind.subject().to_string(),
                to: vec![contact.email.clone()],
                text: body,
                html: None,
            })
            .await
    }
}
