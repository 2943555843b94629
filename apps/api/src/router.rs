use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use gallery_cell::router::{gallery_routes, GalleryState};
use gallery_cell::services::gallery::GalleryService;
use quote_cell::router::{quote_routes, QuoteState};
use quote_cell::services::quote::QuoteService;
use scheduling_cell::router::{appointment_routes, SchedulingState};
use scheduling_cell::services::booking::VisitBookingService;
use shared_config::AppConfig;

pub fn create_router(config: Arc<AppConfig>) -> Router {
    // Services are built once and shared; the notification dispatcher's
    // cooldown is process-wide, so it must not be rebuilt per request.
    let scheduling = Arc::new(SchedulingState {
        booking: Arc::new(VisitBookingService::new(&config)),
    });
    let quotes = Arc::new(QuoteState {
        quotes: Arc::new(QuoteService::new(&config)),
    });
    let gallery = Arc::new(GalleryState {
        gallery: Arc::new(GalleryService::new(&config)),
    });

    Router::new()
        .route("/", get(|| async { "Sabina Decorações API is running!" }))
        .route("/health", get(|| async { "ok" }))
        .nest(
            "/api/appointments",
            appointment_routes(scheduling, config.clone()),
        )
        .nest("/api/quotes", quote_routes(quotes, config.clone()))
        .nest("/api/gallery", gallery_routes(gallery, config))
}
