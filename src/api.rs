pub mod client;
pub use client::ApiClient;
pub mod salon_api;
pub use salon_api::{HttpSalonClient, MediaUpload, SalonStore, UploadFile};
pub mod auth_api;
pub use auth_api::AuthClient;
