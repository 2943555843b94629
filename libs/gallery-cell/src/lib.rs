pub mod handlers;
pub mod models;
pub mod router;
pub mod services;
pub mod store;

pub use models::{GalleryError, GalleryPhoto, PhotoCategory};
pub use router::{gallery_routes, GalleryState};
pub use services::gallery::GalleryService;
