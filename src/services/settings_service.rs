// src/services/settings_service.rs

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::{
    api::{MediaUpload, SalonStore},
    common::error::{AppError, AppResult},
    models::salon::SalonRecord,
    services::notifier::{Notice, Notifier},
};

/// What a settings form hands to [`SalonSettingsService::update_field`].
#[derive(Debug, Clone)]
pub enum FieldValue {
    Json(Value),
    Media(MediaUpload),
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        FieldValue::Json(value)
    }
}

// Local copy of one salon record plus the single entry point that writes to it.
// Every settings form borrows this store; none of them talks to the backend directly.
pub struct SalonSettingsService {
    store: Arc<dyn SalonStore>,
    notifier: Arc<dyn Notifier>,
    username: String,
    salon: Option<SalonRecord>,
}

impl SalonSettingsService {
    pub fn new(store: Arc<dyn SalonStore>, notifier: Arc<dyn Notifier>, username: impl Into<String>) -> Self {
        Self {
            store,
            notifier,
            username: username.into(),
            salon: None,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// `None` until the first successful load.
    pub fn salon(&self) -> Option<&SalonRecord> {
        self.salon.as_ref()
    }

    pub fn require_salon(&self) -> AppResult<&SalonRecord> {
        self.salon.as_ref().ok_or(AppError::SalonNotLoaded)
    }

    pub(crate) fn notifier(&self) -> &dyn Notifier {
        self.notifier.as_ref()
    }

    // =========================================================================
    //  1. LOAD
    // =========================================================================

    pub async fn load(&mut self) -> AppResult<()> {
        match self.store.fetch_salon(&self.username).await {
            Ok(salon) => {
                tracing::info!(username = %self.username, "Salon data loaded");
                self.salon = Some(salon);
                Ok(())
            }
            Err(e) => {
                tracing::error!(username = %self.username, error = %e, "Failed to load salon data");
                self.notifier.notify(Notice::error("Failed to load salon data"));
                Err(e)
            }
        }
    }

    // =========================================================================
    //  2. FIELD-GROUP UPDATE
    // =========================================================================

    /// Writes one field path (`"about"`, `"location.city"`, ...) or a media upload.
    ///
    /// JSON values are applied locally first, then sent as a partial body scoped to
    /// that path. The server answer replaces local state. On failure the record is
    /// fetched again so the optimistic value never outlives the error.
    pub async fn update_field(&mut self, field: &str, value: impl Into<FieldValue>) -> AppResult<()> {
        let current = self.require_salon()?.clone();

        let result = match value.into() {
            FieldValue::Json(value) => {
                let path = parse_field_path(field)?;
                let optimistic = match apply_at_path(&current, &path, value.clone()) {
                    Ok(optimistic) => optimistic,
                    Err(e) => {
                        tracing::warn!(field, error = %e, "Value does not fit the salon record");
                        self.notifier.notify(Notice::error("Failed to save changes"));
                        return Err(e);
                    }
                };
                self.salon = Some(optimistic);

                let body = partial_update(&path, value);
                self.store.update_salon(&self.username, &body).await
            }
            FieldValue::Media(upload) => self.store.upload_media(&self.username, &upload).await,
        };

        match result {
            Ok(updated) => {
                tracing::info!(username = %self.username, field, "Salon field saved");
                self.salon = Some(updated);
                self.notifier.notify(Notice::success("Changes saved successfully"));
                Ok(())
            }
            Err(e) => {
                tracing::error!(username = %self.username, field, error = %e, "Failed to save salon field");
                self.resync(current).await;
                self.notifier
                    .notify(Notice::error("Failed to save changes").with_description(e.user_message()));
                Err(e)
            }
        }
    }

    /// Deletes a stored gallery image and takes the server's record.
    pub async fn delete_image(&mut self, key: &str) -> AppResult<()> {
        self.require_salon()?;
        match self.store.delete_image(&self.username, key).await {
            Ok(updated) => {
                self.salon = Some(updated);
                self.notifier.notify(
                    Notice::info("Image removed").with_description("The image has been deleted successfully."),
                );
                Ok(())
            }
            Err(e) => {
                tracing::error!(username = %self.username, key, error = %e, "Failed to delete image");
                self.notifier.notify(
                    Notice::error("Failed to remove image")
                        .with_description("There was an error deleting the image."),
                );
                Err(e)
            }
        }
    }

    // Server truth wins. If even the re-fetch fails, fall back to the last
    // confirmed copy so the optimistic value is still discarded.
    async fn resync(&mut self, last_confirmed: SalonRecord) {
        match self.store.fetch_salon(&self.username).await {
            Ok(fresh) => self.salon = Some(fresh),
            Err(e) => {
                tracing::warn!(username = %self.username, error = %e, "Re-fetch after failed save also failed");
                self.salon = Some(last_confirmed);
            }
        }
    }
}

// ---
// Field path helpers
// ---

pub(crate) fn parse_field_path(field: &str) -> AppResult<Vec<&str>> {
    let path: Vec<&str> = field.split('.').collect();
    if path.iter().any(|segment| segment.trim().is_empty()) {
        return Err(AppError::InvalidFieldPath(field.to_string()));
    }
    // The username is the record key and never changes.
    if path[0] == "username" {
        return Err(AppError::InvalidFieldPath(field.to_string()));
    }
    Ok(path)
}

/// `["location", "city"]` + `"Austin"` -> `{"location": {"city": "Austin"}}`
pub(crate) fn partial_update(path: &[&str], value: Value) -> Value {
    path.iter().rev().fold(value, |acc, key| {
        let mut obj = Map::new();
        obj.insert((*key).to_string(), acc);
        Value::Object(obj)
    })
}

// Sets `value` at `path`, keeping sibling fields of every intermediate object.
fn apply_at_path(salon: &SalonRecord, path: &[&str], value: Value) -> AppResult<SalonRecord> {
    let mut doc = serde_json::to_value(salon)?;
    set_at_path(&mut doc, path, value);
    Ok(serde_json::from_value(doc)?)
}

fn set_at_path(target: &mut Value, path: &[&str], value: Value) {
    let Some((head, rest)) = path.split_first() else {
        *target = value;
        return;
    };
    if !target.is_object() {
        *target = Value::Object(Map::new());
    }
    if let Value::Object(obj) = target {
        let slot = obj.entry((*head).to_string()).or_insert(Value::Null);
        set_at_path(slot, rest, value);
    }
}
