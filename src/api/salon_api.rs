// src/api/salon_api.rs

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde_json::Value;

use crate::{
    api::client::ApiClient,
    common::error::AppResult,
    config::AppConfig,
    models::salon::{MediaAsset, SalonRecord, SalonSummary},
};

// ---
// Media upload payload (multipart)
// ---

#[derive(Debug, Clone, PartialEq)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    fn to_part(&self) -> AppResult<Part> {
        Ok(Part::bytes(self.bytes.clone())
            .file_name(self.file_name.clone())
            .mime_str(&self.content_type)?)
    }
}

// `existing_images` lists the already stored images the backend must keep.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediaUpload {
    pub logo: Option<UploadFile>,
    pub images: Vec<UploadFile>,
    pub existing_images: Vec<MediaAsset>,
}

impl MediaUpload {
    fn to_form(&self) -> AppResult<Form> {
        let mut form = Form::new();
        if let Some(logo) = &self.logo {
            form = form.part("logo", logo.to_part()?);
        }
        for image in &self.images {
            form = form.part("images", image.to_part()?);
        }
        if !self.existing_images.is_empty() {
            form = form.text("existingImages", serde_json::to_string(&self.existing_images)?);
        }
        Ok(form)
    }
}

// ---
// Store trait: everything salon-scoped goes through the username
// ---

#[async_trait]
pub trait SalonStore: Send + Sync {
    /// GET /api/salons
    async fn list_salons(&self) -> AppResult<Vec<SalonSummary>>;

    /// GET /api/salons/{username}, used by the settings pages.
    async fn fetch_salon(&self, username: &str) -> AppResult<SalonRecord>;

    /// GET /api/salons/username/{username}, used by the public booking page.
    async fn fetch_public_salon(&self, username: &str) -> AppResult<SalonRecord>;

    /// PUT /api/salons/{username} with a JSON partial body.
    async fn update_salon(&self, username: &str, partial: &Value) -> AppResult<SalonRecord>;

    /// PUT /api/salons/{username} as multipart/form-data.
    async fn upload_media(&self, username: &str, upload: &MediaUpload) -> AppResult<SalonRecord>;

    /// DELETE /api/salons/{username}/image/{key}
    async fn delete_image(&self, username: &str, key: &str) -> AppResult<SalonRecord>;
}

#[derive(Clone)]
pub struct HttpSalonClient {
    api: ApiClient,
    token: Option<String>,
}

impl HttpSalonClient {
    pub fn new(base_url: &str, token: Option<String>) -> AppResult<Self> {
        Ok(Self { api: ApiClient::new(base_url)?, token })
    }

    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        Self::new(&config.api_base_url, config.api_token.clone())
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

#[async_trait]
impl SalonStore for HttpSalonClient {
    async fn list_salons(&self) -> AppResult<Vec<SalonSummary>> {
        let url = self.api.endpoint(&["api", "salons"])?;
        tracing::debug!(%url, "Listing salons");
        self.api.send_json(self.authorized(self.api.http().get(url))).await
    }

    async fn fetch_salon(&self, username: &str) -> AppResult<SalonRecord> {
        let url = self.api.endpoint(&["api", "salons", username])?;
        tracing::debug!(%url, "Fetching salon");
        self.api.send_json(self.authorized(self.api.http().get(url))).await
    }

    async fn fetch_public_salon(&self, username: &str) -> AppResult<SalonRecord> {
        let url = self.api.endpoint(&["api", "salons", "username", username])?;
        tracing::debug!(%url, "Fetching public salon page");
        self.api.send_json(self.authorized(self.api.http().get(url))).await
    }

    async fn update_salon(&self, username: &str, partial: &Value) -> AppResult<SalonRecord> {
        let url = self.api.endpoint(&["api", "salons", username])?;
        tracing::debug!(%url, body = %partial, "Updating salon");
        self.api
            .send_json(self.authorized(self.api.http().put(url).json(partial)))
            .await
    }

    async fn upload_media(&self, username: &str, upload: &MediaUpload) -> AppResult<SalonRecord> {
        let url = self.api.endpoint(&["api", "salons", username])?;
        tracing::debug!(
            %url,
            logo = upload.logo.is_some(),
            images = upload.images.len(),
            kept = upload.existing_images.len(),
            "Uploading salon media"
        );
        let form = upload.to_form()?;
        self.api
            .send_json(self.authorized(self.api.http().put(url).multipart(form)))
            .await
    }

    async fn delete_image(&self, username: &str, key: &str) -> AppResult<SalonRecord> {
        let url = self.api.endpoint(&["api", "salons", username, "image", key])?;
        tracing::debug!(%url, "Deleting salon image");
        self.api.send_json(self.authorized(self.api.http().delete(url))).await
    }
}
