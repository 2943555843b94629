use std::sync::Arc;

use axum::{
    extract::{Extension, Path, State},
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use shared_models::auth::User;
use shared_models::error::AppError;

use crate::models::{GalleryError, NewGalleryPhoto, NewPhotoCategory};
use crate::router::GalleryState;

fn map_error(e: GalleryError) -> AppError {
    match e {
        GalleryError::NotFound => AppError::NotFound(e.to_string()),
        GalleryError::Validation(msg) => AppError::Validation(msg),
        GalleryError::DatabaseError(msg) => AppError::Database(msg),
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

/// Public gallery page data: active photos, newest first, plus categories.
#[axum::debug_handler]
pub async fn public_gallery(
    State(state): State<Arc<GalleryState>>,
) -> Result<Json<Value>, AppError> {
    let (photos, categories) = state.gallery.public_gallery().await.map_err(map_error)?;

    Ok(Json(json!({
        "photos": photos,
        "categories": categories,
    })))
}

#[axum::debug_handler]
pub async fn list_all_photos(
    State(state): State<Arc<GalleryState>>,
    Extension(_user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    let photos = state.gallery.list_all_photos().await.map_err(map_error)?;
    let count = photos.len();

    Ok(Json(json!({
        "photos": photos,
        "count": count,
    })))
}

#[axum::debug_handler]
pub async fn add_photo(
    State(state): State<Arc<GalleryState>>,
    Extension(user): Extension<User>,
    Json(request): Json<NewGalleryPhoto>,
) -> Result<Json<Value>, AppError> {
    require_admin(&user)?;

    let photo = state.gallery.add_photo(request).await.map_err(map_error)?;

    Ok(Json(json!({
        "success": true,
        "photo": photo,
    })))
}

/// Hide a photo from the public gallery without deleting it.
#[axum::debug_handler]
pub async fn deactivate_photo(
    State(state): State<Arc<GalleryState>>,
    Extension(user): Extension<User>,
    Path(photo_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    require_admin(&user)?;

    let photo = state
        .gallery
        .set_photo_active(photo_id, false)
        .await
        .map_err(map_error)?;

    Ok(Json(json!({
        "success": true,
        "photo": photo,
    })))
}

#[axum::debug_handler]
pub async fn delete_photo(
    State(state): State<Arc<GalleryState>>,
    Extension(user): Extension<User>,
    Path(photo_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    require_admin(&user)?;

    state
        .gallery
        .delete_photo(photo_id)
        .await
        .map_err(map_error)?;

    Ok(Json(json!({ "success": true })))
}

#[axum::debug_handler]
pub async fn list_categories(
    State(state): State<Arc<GalleryState>>,
    Extension(_user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    let categories = state.gallery.list_categories().await.map_err(map_error)?;

    Ok(Json(json!({ "categories": categories })))
}

#[axum::debug_handler]
pub async fn add_category(
    State(state): State<Arc<GalleryState>>,
    Extension(user): Extension<User>,
    Json(request): Json<NewPhotoCategory>,
) -> Result<Json<Value>, AppError> {
    require_admin(&user)?;

    let category = state
        .gallery
        .add_category(request)
        .await
        .map_err(map_error)?;

    Ok(Json(json!({
        "success": true,
        "category": category,
    })))
}
