// src/services/forms/location.rs

use crate::{
    common::error::AppResult,
    models::salon::Location,
    services::{
        forms::{FormState, SaveOutcome, save_group},
        notifier::Notice,
        settings_service::SalonSettingsService,
    },
};

pub struct LocationForm {
    state: FormState<Location>,
}

impl LocationForm {
    pub fn load(settings: &SalonSettingsService) -> AppResult<Self> {
        let location = settings.require_salon()?.location.clone().unwrap_or_default();
        Ok(Self { state: FormState::new(location) })
    }

    pub fn state(&self) -> &FormState<Location> {
        &self.state
    }

    /// Manual edit of one or more address fields.
    pub fn update(&mut self, change: impl FnOnce(&mut Location)) {
        self.state.edit(change);
    }

    /// A place picked from an address search replaces the whole address,
    /// empty parts included.
    pub fn apply_place(&mut self, place: Location) {
        self.state.edit(|draft| *draft = place);
    }

    pub async fn save(&mut self, settings: &mut SalonSettingsService) -> AppResult<SaveOutcome> {
        save_group(
            &mut self.state,
            settings,
            "location",
            Notice::success("Location saved")
                .with_description("Your location information has been updated successfully."),
        )
        .await
    }
}
