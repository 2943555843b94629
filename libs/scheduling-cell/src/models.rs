use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ==============================================================================
// CORE APPOINTMENT MODELS
// ==============================================================================

/// A requested visit. Created `pending` by the public form; only an
/// administrator moves it to `accepted` or `rejected`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    /// Stored normalized as `(DD) DDDDD-DDDD`.
    pub phone: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    #[serde(default)]
    pub message: String,
    pub status: AppointmentStatus,
    pub accepted_by: Option<String>,
    pub rejected_by: Option<String>,
    pub quote_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl Appointment {
    pub fn scheduled_at(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Pending,
    Accepted,
    Rejected,
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Pending => write!(f, "pending"),
            AppointmentStatus::Accepted => write!(f, "accepted"),
            AppointmentStatus::Rejected => write!(f, "rejected"),
        }
    }
}

// ==============================================================================
// REQUEST MODELS
// ==============================================================================

/// Public form submission. Date and time arrive as text and are parsed during
/// validation; the phone is normalized before anything is stored.
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleVisitRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub date: String,
    pub time: String,
    #[serde(default)]
    pub message: String,
    pub quote_id: Option<Uuid>,
}

/// Validated row ready for insertion.
#[derive(Debug, Clone, Serialize)]
pub struct NewAppointment {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub message: String,
    pub status: AppointmentStatus,
    pub quote_id: Option<Uuid>,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AppointmentError {
    #[error("Appointments are not taken on Sundays")]
    DayNotAllowed,

    #[error("Appointments must fall between 09:00 and 18:00")]
    OutsideBusinessHours,

    #[error("Cannot schedule for a past date or time")]
    PastSchedule,

    #[error("An accepted appointment already exists within 30 minutes of {0}")]
    SchedulingConflict(NaiveTime),

    #[error("The provided date or time is not valid")]
    MalformedInput,

    #[error("Phone must contain exactly 11 digits, like (00) 00000-0000")]
    InvalidPhoneFormat,

    #[error("Appointment not found")]
    NotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}
