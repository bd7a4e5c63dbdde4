// src/services/forms/amenities.rs

use crate::{
    common::error::{AppError, AppResult},
    models::salon::{AMENITY_CATALOG, Amenity},
    services::{
        forms::{FormState, SaveOutcome, save_group},
        notifier::Notice,
        settings_service::SalonSettingsService,
    },
};

// Pre-selected when the salon never saved any amenities.
pub const DEFAULT_AMENITIES: [&str; 3] = ["wifi", "credit-cards", "online-booking"];

pub struct AmenitiesForm {
    state: FormState<Vec<String>>,
}

impl AmenitiesForm {
    pub fn load(settings: &SalonSettingsService) -> AppResult<Self> {
        let selected = settings
            .require_salon()?
            .amenities
            .clone()
            .unwrap_or_else(|| DEFAULT_AMENITIES.iter().map(|id| id.to_string()).collect());
        Ok(Self { state: FormState::new(selected) })
    }

    pub fn state(&self) -> &FormState<Vec<String>> {
        &self.state
    }

    pub fn catalog(&self) -> &'static [Amenity] {
        &AMENITY_CATALOG
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.state.draft().iter().any(|a| a == id)
    }

    /// Adds at the end or removes; the remaining order is untouched.
    pub fn toggle(&mut self, id: &str) -> AppResult<()> {
        if !AMENITY_CATALOG.iter().any(|a| a.id == id) {
            return Err(AppError::NotFound(format!("Amenity '{id}'")));
        }
        self.state.edit(|selected| match selected.iter().position(|a| a == id) {
            Some(index) => {
                selected.remove(index);
            }
            None => selected.push(id.to_string()),
        });
        Ok(())
    }

    pub async fn save(&mut self, settings: &mut SalonSettingsService) -> AppResult<SaveOutcome> {
        save_group(
            &mut self.state,
            settings,
            "amenities",
            Notice::success("Amenities saved")
                .with_description("Your salon amenities have been updated successfully."),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        services::notifier::RecordingNotifier,
        testutils::{MockSalonStore, sample_salon},
    };
    use serde_json::json;
    use std::sync::Arc;

    async fn settings(store: &MockSalonStore) -> SalonSettingsService {
        let mut settings =
            SalonSettingsService::new(Arc::new(store.clone()), Arc::new(RecordingNotifier::new()), "glowgirl");
        settings.load().await.unwrap();
        settings
    }

    #[tokio::test]
    async fn defaults_apply_when_salon_has_none() {
        let store = MockSalonStore::new(sample_salon());
        let settings = settings(&store).await;
        let form = AmenitiesForm::load(&settings).unwrap();

        assert_eq!(form.state().draft(), &vec!["wifi", "credit-cards", "online-booking"]);
        assert!(!form.state().is_dirty());
    }

    #[tokio::test]
    async fn toggle_keeps_insertion_order_and_saves() {
        let store = MockSalonStore::new(sample_salon());
        let mut settings = settings(&store).await;
        let mut form = AmenitiesForm::load(&settings).unwrap();

        form.toggle("credit-cards").unwrap();
        form.toggle("parking").unwrap();
        assert!(form.is_selected("parking"));
        assert!(matches!(form.toggle("sauna"), Err(AppError::NotFound(_))));

        form.save(&mut settings).await.unwrap();
        assert_eq!(
            store.last_update(),
            Some(json!({ "amenities": ["wifi", "online-booking", "parking"] }))
        );
    }
}
