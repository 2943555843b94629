use std::sync::Arc;

use axum::{
    extract::{Extension, Path, State},
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use shared_models::auth::User;
use shared_models::error::AppError;

use crate::models::{CreateQuoteRequest, QuoteError, SetFinalPriceRequest};
use crate::router::QuoteState;
use crate::services::pricing;

fn map_error(e: QuoteError) -> AppError {
    match e {
        QuoteError::NotFound => AppError::NotFound(e.to_string()),
        QuoteError::Validation(msg) => AppError::Validation(msg),
        QuoteError::DatabaseError(msg) => AppError::Database(msg),
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

/// Public simulator endpoint. Returns the stored request with its estimate.
#[axum::debug_handler]
pub async fn create_quote(
    State(state): State<Arc<QuoteState>>,
    Json(request): Json<CreateQuoteRequest>,
) -> Result<Json<Value>, AppError> {
    let (quote, estimate) = state.quotes.create_quote(request).await.map_err(map_error)?;

    Ok(Json(json!({
        "success": true,
        "quote": quote,
        "estimate": estimate,
    })))
}

/// Public catalog of packages and extra services, used to render the
/// simulator form.
#[axum::debug_handler]
pub async fn pricing_options() -> Json<Value> {
    let packages: Vec<Value> = pricing::packages()
        .iter()
        .map(|p| {
            json!({
                "key": p.key,
                "name": p.name,
                "description": p.description,
                "price": p.price,
            })
        })
        .collect();

    let services: Vec<Value> = pricing::services()
        .iter()
        .map(|s| json!({ "key": s.key, "name": s.name, "price": s.price }))
        .collect();

    Json(json!({
        "packages": packages,
        "services": services,
        "price_per_guest": pricing::PRICE_PER_GUEST,
    }))
}

#[axum::debug_handler]
pub async fn list_quotes(
    State(state): State<Arc<QuoteState>>,
    Extension(_user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    let quotes = state.quotes.list().await.map_err(map_error)?;
    let count = quotes.len();

    Ok(Json(json!({
        "quotes": quotes,
        "count": count,
    })))
}

#[axum::debug_handler]
pub async fn get_quote(
    State(state): State<Arc<QuoteState>>,
    Extension(_user): Extension<User>,
    Path(quote_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let quote = state.quotes.get(quote_id).await.map_err(map_error)?;
    let estimate = pricing::estimate(&quote.package, quote.guest_count, &quote.services);

    // Expand service keys so the admin panel can show names and prices.
    let services: Vec<Value> = quote
        .services
        .iter()
        .map(|key| {
            let price = pricing::service_info(key)
                .map(|s| s.price)
                .unwrap_or(pricing::FALLBACK_SERVICE_PRICE);
            json!({
                "key": key,
                "name": pricing::service_label(key),
                "price": price,
            })
        })
        .collect();

    Ok(Json(json!({
        "quote": quote,
        "services": services,
        "estimate": estimate,
    })))
}

/// Set the final price. The customer notice is sent in the background.
#[axum::debug_handler]
pub async fn set_final_price(
    State(state): State<Arc<QuoteState>>,
    Extension(user): Extension<User>,
    Path(quote_id): Path<Uuid>,
    Json(request): Json<SetFinalPriceRequest>,
) -> Result<Json<Value>, AppError> {
    require_admin(&user)?;

    let quote = state
        .quotes
        .set_final_price(quote_id, &request.final_price)
        .await
        .map_err(map_error)?;

    Ok(Json(json!({
        "success": true,
        "quote": quote,
    })))
}

#[axum::debug_handler]
pub async fn delete_quote(
    State(state): State<Arc<QuoteState>>,
    Extension(user): Extension<User>,
    Path(quote_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    require_admin(&user)?;

    state.quotes.delete(quote_id).await.map_err(map_error)?;

    Ok(Json(json!({ "success": true })))
}
