use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use shared_models::auth::User;
use shared_models::error::AppError;

use crate::models::{AppointmentError, ScheduleVisitRequest};
use crate::router::SchedulingState;

fn map_error(e: AppointmentError) -> AppError {
    match e {
        AppointmentError::DayNotAllowed
        | AppointmentError::OutsideBusinessHours
        | AppointmentError::PastSchedule
        | AppointmentError::MalformedInput
        | AppointmentError::InvalidPhoneFormat => AppError::Validation(e.to_string()),
        AppointmentError::SchedulingConflict(_) => AppError::Conflict(e.to_string()),
        AppointmentError::NotFound => AppError::NotFound(e.to_string()),
        AppointmentError::DatabaseError(msg) => AppError::Database(msg),
    }
}

fn require_admin(user: &User) -> Result<(), AppError> {
    if user.is_admin() {
        Ok(())
    } else {
        Err(AppError::Auth(
            "Administrator role required for this action".to_string(),
        ))
    }
}

/// Public form endpoint: anyone can request a visit.
#[axum::debug_handler]
pub async fn schedule_visit(
    State(state): State<Arc<SchedulingState>>,
    Json(request): Json<ScheduleVisitRequest>,
) -> Result<Json<Value>, AppError> {
    let appointment = state
        .booking
        .schedule_visit(request)
        .await
        .map_err(map_error)?;

    Ok(Json(json!({
        "success": true,
        "appointment": appointment,
    })))
}

#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub date: String,
}

/// Public slot check for the scheduling form: which times on a date are
/// already taken by a pending or accepted appointment.
#[axum::debug_handler]
pub async fn check_availability(
    State(state): State<Arc<SchedulingState>>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<Value>, AppError> {
    let times = state
        .booking
        .occupied_times(&query.date)
        .await
        .map_err(map_error)?;

    let occupied: Vec<String> = times.iter().map(|t| t.format("%H:%M").to_string()).collect();

    Ok(Json(json!({
        "date": query.date,
        "occupied": occupied,
    })))
}

#[axum::debug_handler]
pub async fn list_appointments(
    State(state): State<Arc<SchedulingState>>,
    Extension(_user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    let appointments = state.booking.list().await.map_err(map_error)?;
    let count = appointments.len();

    Ok(Json(json!({
        "appointments": appointments,
        "count": count,
    })))
}

#[axum::debug_handler]
pub async fn get_appointment(
    State(state): State<Arc<SchedulingState>>,
    Extension(_user): Extension<User>,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let appointment = state.booking.get(appointment_id).await.map_err(map_error)?;

    Ok(Json(json!({ "appointment": appointment })))
}

/// Accept a pending (or previously rejected) request. The confirmation email
/// is dispatched in the background; this returns as soon as the transition is
/// persisted.
#[axum::debug_handler]
pub async fn accept_appointment(
    State(state): State<Arc<SchedulingState>>,
    Extension(user): Extension<User>,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    require_admin(&user)?;

    let appointment = state
        .booking
        .accept(appointment_id, &user.id)
        .await
        .map_err(map_error)?;

    Ok(Json(json!({
        "success": true,
        "appointment": appointment,
    })))
}

#[axum::debug_handler]
pub async fn reject_appointment(
    State(state): State<Arc<SchedulingState>>,
    Extension(user): Extension<User>,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    require_admin(&user)?;

    let appointment = state
        .booking
        .reject(appointment_id, &user.id)
        .await
        .map_err(map_error)?;

    Ok(Json(json!({
        "success": true,
        "appointment": appointment,
    })))
}

#[axum::debug_handler]
pub async fn delete_appointment(
    State(state): State<Arc<SchedulingState>>,
    Extension(user): Extension<User>,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    require_admin(&user)?;

    state
        .booking
        .delete(appointment_id)
        .await
        .map_err(map_error)?;

    Ok(Json(json!({ "success": true })))
}
