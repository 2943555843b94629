use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A portfolio photo. Images live in external object storage; only the URL
/// is kept here. Photos are soft-hidden via `active` rather than deleted so
/// a misclick in the admin panel is recoverable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryPhoto {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub image_url: String,
    pub category_id: Option<Uuid>,
    pub active: bool,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoCategory {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NewGalleryPhoto {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub image_url: String,
    pub category_id: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NewPhotoCategory {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GalleryError {
    #[error("Photo not found")]
    NotFound,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
