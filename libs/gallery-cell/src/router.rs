use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};

use shared_config::AppConfig;
use shared_utils::extractor::auth_middleware;

use crate::handlers;
use crate::services::gallery::GalleryService;

pub struct GalleryState {
    pub gallery: Arc<GalleryService>,
}

pub fn gallery_routes(state: Arc<GalleryState>, config: Arc<AppConfig>) -> Router {
    let public_routes = Router::new().route("/", get(handlers::public_gallery));

    let admin_routes = Router::new()
        .route("/", post(handlers::add_photo))
        .route("/photos", get(handlers::list_all_photos))
        .route("/{photo_id}", delete(handlers::delete_photo))
        .route("/{photo_id}/deactivate", post(handlers::deactivate_photo))
        .route("/categories", get(handlers::list_categories))
        .route("/categories", post(handlers::add_category))
        .layer(middleware::from_fn_with_state(config, auth_middleware));

    Router::new()
        .merge(public_routes)
        .merge(admin_routes)
        .with_state(state)
}
