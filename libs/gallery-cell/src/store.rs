use async_trait::async_trait;
use reqwest::Method;
use serde_json::json;
use uuid::Uuid;

use shared_database::rest::RestClient;

use crate::models::{GalleryError, GalleryPhoto, NewGalleryPhoto, NewPhotoCategory, PhotoCategory};

#[async_trait]
pub trait GalleryStore: Send + Sync {
    async fn insert_photo(&self, new: &NewGalleryPhoto) -> Result<GalleryPhoto, GalleryError>;
    /// Active photos, newest first. The public gallery view.
    async fn list_active_photos(&self) -> Result<Vec<GalleryPhoto>, GalleryError>;
    /// All photos including hidden ones, newest first. The admin view.
    async fn list_all_photos(&self) -> Result<Vec<GalleryPhoto>, GalleryError>;
    async fn set_photo_active(&self, id: Uuid, active: bool)
        -> Result<GalleryPhoto, GalleryError>;
    async fn delete_photo(&self, id: Uuid) -> Result<(), GalleryError>;
    async fn insert_category(&self, new: &NewPhotoCategory)
        -> Result<PhotoCategory, GalleryError>;
    async fn list_categories(&self) -> Result<Vec<PhotoCategory>, GalleryError>;
}

pub struct RestGalleryStore {
    rest: RestClient,
}

impl RestGalleryStore {
    pub fn new(rest: RestClient) -> Self {
        Self { rest }
    }
}

#[async_trait]
impl GalleryStore for RestGalleryStore {
    async fn insert_photo(&self, new: &NewGalleryPhoto) -> Result<GalleryPhoto, GalleryError> {
        let body =
            serde_json::to_value(new).map_err(|e| GalleryError::DatabaseError(e.to_string()))?;

        let rows: Vec<GalleryPhoto> = self
            .rest
            .request(Method::POST, "/rest/v1/gallery_photos", Some(body))
            .await
            .map_err(|e| GalleryError::DatabaseError(e.to_string()))?;

        rows.into_iter()
            .next()
            .ok_or_else(|| GalleryError::DatabaseError("insert returned no row".to_string()))
    }

    async fn list_active_photos(&self) -> Result<Vec<GalleryPhoto>, GalleryError> {
        let path = "/rest/v1/gallery_photos?active=eq.true&order=uploaded_at.desc";

        self.rest
            .request(Method::GET, path, None)
            .await
            .map_err(|e| GalleryError::DatabaseError(e.to_string()))
    }

    async fn list_all_photos(&self) -> Result<Vec<GalleryPhoto>, GalleryError> {
        let path = "/rest/v1/gallery_photos?order=uploaded_at.desc";

        self.rest
            .request(Method::GET, path, None)
            .await
            .map_err(|e| GalleryError::DatabaseError(e.to_string()))
    }

    async fn set_photo_active(
        &self,
        id: Uuid,
        active: bool,
    ) -> Result<GalleryPhoto, GalleryError> {
        let path = format!("/rest/v1/gallery_photos?id=eq.{}", id);
        let body = json!({ "active": active });

        let rows: Vec<GalleryPhoto> = self
            .rest
            .request(Method::PATCH, &path, Some(body))
            .await
            .map_err(|e| GalleryError::DatabaseError(e.to_string()))?;

        rows.into_iter().next().ok_or(GalleryError::NotFound)
    }

    async fn delete_photo(&self, id: Uuid) -> Result<(), GalleryError> {
        let path = format!("/rest/v1/gallery_photos?id=eq.{}", id);

        self.rest
            .execute(Method::DELETE, &path, None)
            .await
            .map_err(|e| GalleryError::DatabaseError(e.to_string()))
    }

    async fn insert_category(
        &self,
        new: &NewPhotoCategory,
    ) -> Result<PhotoCategory, GalleryError> {
        let body =
            serde_json::to_value(new).map_err(|e| GalleryError::DatabaseError(e.to_string()))?;

        let rows: Vec<PhotoCategory> = self
            .rest
            .request(Method::POST, "/rest/v1/photo_categories", Some(body))
            .await
            .map_err(|e| GalleryError::DatabaseError(e.to_string()))?;

        rows.into_iter()
            .next()
            .ok_or_else(|| GalleryError::DatabaseError("insert returned no row".to_string()))
    }

    async fn list_categories(&self) -> Result<Vec<PhotoCategory>, GalleryError> {
        let path = "/rest/v1/photo_categories?order=name.asc";

        self.rest
            .request(Method::GET, path, None)
            .await
            .map_err(|e| GalleryError::DatabaseError(e.to_string()))
    }
}
