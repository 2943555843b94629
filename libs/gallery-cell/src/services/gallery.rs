use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::rest::RestClient;

use crate::models::{GalleryError, GalleryPhoto, NewGalleryPhoto, NewPhotoCategory, PhotoCategory};
use crate::store::{GalleryStore, RestGalleryStore};

pub struct GalleryService {
    store: Arc<dyn GalleryStore>,
}

impl GalleryService {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_store(Arc::new(RestGalleryStore::new(RestClient::new(config))))
    }

    pub fn with_store(store: Arc<dyn GalleryStore>) -> Self {
        Self { store }
    }

    /// Public gallery: active photos plus the category list for filtering.
    pub async fn public_gallery(
        &self,
    ) -> Result<(Vec<GalleryPhoto>, Vec<PhotoCategory>), GalleryError> {
        let photos = self.store.list_active_photos().await?;
        let categories = self.store.list_categories().await?;
        Ok((photos, categories))
    }

    pub async fn list_all_photos(&self) -> Result<Vec<GalleryPhoto>, GalleryError> {
        self.store.list_all_photos().await
    }

    pub async fn add_photo(&self, new: NewGalleryPhoto) -> Result<GalleryPhoto, GalleryError> {
        if new.title.trim().is_empty() {
            return Err(GalleryError::Validation("Title is required".to_string()));
        }
        if new.image_url.trim().is_empty() {
            return Err(GalleryError::Validation(
                "Image URL is required".to_string(),
            ));
        }

        let photo = self.store.insert_photo(&new).await?;
        info!("Gallery photo {} added ('{}')", photo.id, photo.title);
        Ok(photo)
    }

    pub async fn set_photo_active(
        &self,
        id: Uuid,
        active: bool,
    ) -> Result<GalleryPhoto, GalleryError> {
        self.store.set_photo_active(id, active).await
    }

    pub async fn delete_photo(&self, id: Uuid) -> Result<(), GalleryError> {
        self.store.delete_photo(id).await
    }

    pub async fn add_category(
        &self,
        new: NewPhotoCategory,
    ) -> Result<PhotoCategory, GalleryError> {
        if new.name.trim().is_empty() {
            return Err(GalleryError::Validation("Name is required".to_string()));
        }

        self.store.insert_category(&new).await
    }

    pub async fn list_categories(&self) -> Result<Vec<PhotoCategory>, GalleryError> {
        self.store.list_categories().await
    }
}
