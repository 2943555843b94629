use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use reqwest::Method;
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;
use uuid::Uuid;

use shared_database::rest::RestClient;

use crate::models::NotificationError;

/// The slice of an appointment a notification needs. Dispatch re-fetches this
/// by id so a deleted appointment is noticed before any email goes out.
#[derive(Debug, Clone, Deserialize)]
pub struct AppointmentContact {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    #[serde(default)]
    pub message: String,
}

impl AppointmentContact {
    pub fn message_or_placeholder(&self) -> &str {
        if self.message.trim().is_empty() {
            "Não informada"
        } else {
            &self.message
        }
    }
}

#[async_trait]
pub trait AppointmentLookup: Send + Sync {
    async fn appointment_contact(
        &self,
        id: Uuid,
    ) -> Result<Option<AppointmentContact>, NotificationError>;
}

pub struct RestAppointmentLookup {
    rest: RestClient,
}

impl RestAppointmentLookup {
    pub fn new(rest: RestClient) -> Self {
        Self { rest }
    }
}

#[async_trait]
impl AppointmentLookup for RestAppointmentLookup {
    async fn appointment_contact(
        &self,
        id: Uuid,
    ) -> Result<Option<AppointmentContact>, NotificationError> {
        let path = format!("/rest/v1/appointments?id=eq.{}&limit=1", id);

        let rows: Vec<Value> = self
            .rest
            .request(Method::GET, &path, None)
            .await
            .map_err(|e| {
                warn!("Appointment lookup for {} failed: {}", id, e);
                NotificationError::LookupFailure
            })?;

        let Some(row) = rows.into_iter().next() else {
            return Ok(None);
        };

        let contact = serde_json::from_value(row).map_err(|e| {
            warn!("Appointment row for {} did not parse: {}", id, e);
            NotificationError::LookupFailure
        })?;

        Ok(Some(contact))
    }
}
