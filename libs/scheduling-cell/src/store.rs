use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Method;
use serde_json::{json, Value};
use uuid::Uuid;

use shared_database::rest::RestClient;

use crate::models::{Appointment, AppointmentError, AppointmentStatus, NewAppointment};

/// Status transition row update. Actor columns are written explicitly (null
/// included) so a re-decision clears the previous actor.
#[derive(Debug, Clone)]
pub struct StatusUpdate {
    pub status: AppointmentStatus,
    pub accepted_by: Option<String>,
    pub rejected_by: Option<String>,
}

impl StatusUpdate {
    pub fn accepted(admin_id: &str) -> Self {
        Self {
            status: AppointmentStatus::Accepted,
            accepted_by: Some(admin_id.to_string()),
            rejected_by: None,
        }
    }

    pub fn rejected(admin_id: &str) -> Self {
        Self {
            status: AppointmentStatus::Rejected,
            accepted_by: None,
            rejected_by: Some(admin_id.to_string()),
        }
    }

    fn to_body(&self) -> Value {
        json!({
            "status": self.status,
            "accepted_by": self.accepted_by,
            "rejected_by": self.rejected_by,
        })
    }
}

#[async_trait]
pub trait AppointmentStore: Send + Sync {
    async fn insert(&self, new: &NewAppointment) -> Result<Appointment, AppointmentError>;
    async fn fetch(&self, id: Uuid) -> Result<Option<Appointment>, AppointmentError>;
    async fn list(&self) -> Result<Vec<Appointment>, AppointmentError>;
    /// Accepted appointments on `date`, excluding `exclude` when updating an
    /// existing row. Feeds the conflict check.
    async fn accepted_on_date(
        &self,
        date: NaiveDate,
        exclude: Option<Uuid>,
    ) -> Result<Vec<Appointment>, AppointmentError>;
    /// Pending and accepted appointments on `date`. Feeds the public
    /// availability check; rejected slots are free again.
    async fn occupied_on_date(&self, date: NaiveDate)
        -> Result<Vec<Appointment>, AppointmentError>;
    async fn update_status(
        &self,
        id: Uuid,
        update: &StatusUpdate,
    ) -> Result<Appointment, AppointmentError>;
    async fn delete(&self, id: Uuid) -> Result<(), AppointmentError>;
}

pub struct RestAppointmentStore {
    rest: RestClient,
}

impl RestAppointmentStore {
    pub fn new(rest: RestClient) -> Self {
        Self { rest }
    }
}

#[async_trait]
impl AppointmentStore for RestAppointmentStore {
    async fn insert(&self, new: &NewAppointment) -> Result<Appointment, AppointmentError> {
        let body = serde_json::to_value(new)
            .map_err(|e| AppointmentError::DatabaseError(e.to_string()))?;

        let rows: Vec<Appointment> = self
            .rest
            .request(Method::POST, "/rest/v1/appointments", Some(body))
            .await
            .map_err(|e| AppointmentError::DatabaseError(e.to_string()))?;

        rows.into_iter()
            .next()
            .ok_or_else(|| AppointmentError::DatabaseError("insert returned no row".to_string()))
    }

    async fn fetch(&self, id: Uuid) -> Result<Option<Appointment>, AppointmentError> {
        let path = format!("/rest/v1/appointments?id=eq.{}&limit=1", id);

        let rows: Vec<Appointment> = self
            .rest
            .request(Method::GET, &path, None)
            .await
            .map_err(|e| AppointmentError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().next())
    }

    async fn list(&self) -> Result<Vec<Appointment>, AppointmentError> {
        let path = "/rest/v1/appointments?order=date.desc,time.desc";

        self.rest
            .request(Method::GET, path, None)
            .await
            .map_err(|e| AppointmentError::DatabaseError(e.to_string()))
    }

    async fn accepted_on_date(
        &self,
        date: NaiveDate,
        exclude: Option<Uuid>,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        let mut query_parts = vec![
            format!("date=eq.{}", date),
            "status=eq.accepted".to_string(),
        ];

        if let Some(exclude_id) = exclude {
            query_parts.push(format!("id=neq.{}", exclude_id));
        }

        let path = format!(
            "/rest/v1/appointments?{}&order=time.asc",
            query_parts.join("&")
        );

        self.rest
            .request(Method::GET, &path, None)
            .await
            .map_err(|e| AppointmentError::DatabaseError(e.to_string()))
    }

    async fn occupied_on_date(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        let path = format!(
            "/rest/v1/appointments?date=eq.{}&status=in.(pending,accepted)&order=time.asc",
            date
        );

        self.rest
            .request(Method::GET, &path, None)
            .await
            .map_err(|e| AppointmentError::DatabaseError(e.to_string()))
    }

    async fn update_status(
        &self,
        id: Uuid,
        update: &StatusUpdate,
    ) -> Result<Appointment, AppointmentError> {
        let path = format!("/rest/v1/appointments?id=eq.{}", id);

        let rows: Vec<Appointment> = self
            .rest
            .request(Method::PATCH, &path, Some(update.to_body()))
            .await
            .map_err(|e| AppointmentError::DatabaseError(e.to_string()))?;

        rows.into_iter().next().ok_or(AppointmentError::NotFound)
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppointmentError> {
        let path = format!("/rest/v1/appointments?id=eq.{}", id);

        self.rest
            .execute(Method::DELETE, &path, None)
            .await
            .map_err(|e| AppointmentError::DatabaseError(e.to_string()))
    }
}
