use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};

use shared_config::AppConfig;
use shared_utils::extractor::auth_middleware;

use crate::handlers;
use crate::services::booking::VisitBookingService;

pub struct SchedulingState {
    pub booking: Arc<VisitBookingService>,
}

pub fn appointment_routes(state: Arc<SchedulingState>, config: Arc<AppConfig>) -> Router {
    // The scheduling form is public; everything else is admin-only.
    let public_routes = Router::new()
        .route("/", post(handlers::schedule_visit))
        .route("/availability", get(handlers::check_availability));

    let admin_routes = Router::new()
        .route("/", get(handlers::list_appointments))
        .route("/{appointment_id}", get(handlers::get_appointment))
        .route("/{appointment_id}", delete(handlers::delete_appointment))
        .route("/{appointment_id}/accept", post(handlers::accept_appointment))
        .route("/{appointment_id}/reject", post(handlers::reject_appointment))
        .layer(middleware::from_fn_with_state(config, auth_middleware));

    Router::new()
        .merge(public_routes)
        .merge(admin_routes)
        .with_state(state)
}
