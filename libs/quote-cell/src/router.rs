use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};

use shared_config::AppConfig;
use shared_utils::extractor::auth_middleware;

use crate::handlers;
use crate::services::quote::QuoteService;

pub struct QuoteState {
    pub quotes: Arc<QuoteService>,
}

pub fn quote_routes(state: Arc<QuoteState>, config: Arc<AppConfig>) -> Router {
    // The simulator and its pricing catalog are public; management is
    // admin-only.
    let public_routes = Router::new()
        .route("/", post(handlers::create_quote))
        .route("/options", get(handlers::pricing_options));

    let admin_routes = Router::new()
        .route("/", get(handlers::list_quotes))
        .route("/{quote_id}", get(handlers::get_quote))
        .route("/{quote_id}", delete(handlers::delete_quote))
        .route("/{quote_id}/final-price", post(handlers::set_final_price))
        .layer(middleware::from_fn_with_state(config, auth_middleware));

    Router::new()
        .merge(public_routes)
        .merge(admin_routes)
        .with_state(state)
}
