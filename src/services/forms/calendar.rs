// src/services/forms/calendar.rs

use crate::{
    common::error::AppResult,
    models::salon::CalendarSettings,
    services::{
        forms::{FormState, SaveOutcome, push_group, save_group},
        integrations::CalendarProvider,
        notifier::Notice,
        settings_service::SalonSettingsService,
    },
};

pub struct CalendarForm {
    state: FormState<CalendarSettings>,
}

impl CalendarForm {
    pub fn load(settings: &SalonSettingsService) -> AppResult<Self> {
        let calendar = settings.require_salon()?.calendar.clone().unwrap_or_default();
        Ok(Self { state: FormState::new(calendar) })
    }

    pub fn state(&self) -> &FormState<CalendarSettings> {
        &self.state
    }

    pub fn set_sync_enabled(&mut self, enabled: bool) {
        self.state.edit(|draft| draft.sync_enabled = enabled);
    }

    pub fn set_notifications_enabled(&mut self, enabled: bool) {
        self.state.edit(|draft| draft.notifications_enabled = enabled);
    }

    /// Links a calendar through `provider` and saves the connection at once.
    pub async fn connect(
        &mut self,
        settings: &mut SalonSettingsService,
        provider: &dyn CalendarProvider,
    ) -> AppResult<SaveOutcome> {
        if self.state.is_saving() {
            return Ok(SaveOutcome::Disabled);
        }
        let connection = match provider.connect(settings.username()).await {
            Ok(connection) => connection,
            Err(e) => {
                tracing::warn!(error = %e, "Calendar connection failed");
                settings.notifier().notify(
                    Notice::error("Failed to connect").with_description(e.user_message()),
                );
                return Err(e);
            }
        };

        let next = CalendarSettings {
            google_connected: true,
            google_calendar_id: Some(connection.calendar_id),
            ..self.state.draft().clone()
        };
        let outcome = push_group(&mut self.state, settings, "calendar", next).await?;
        settings.notifier().notify(
            Notice::success("Google Calendar connected")
                .with_description("Your salon is now connected to Google Calendar."),
        );
        Ok(outcome)
    }

    /// Drops the link and every calendar preference with it.
    pub async fn disconnect(&mut self, settings: &mut SalonSettingsService) -> AppResult<SaveOutcome> {
        let outcome =
            push_group(&mut self.state, settings, "calendar", CalendarSettings::default()).await?;
        if outcome == SaveOutcome::Saved {
            settings.notifier().notify(
                Notice::success("Google Calendar disconnected")
                    .with_description("Your salon is no longer connected to Google Calendar."),
            );
        }
        Ok(outcome)
    }

    pub async fn save(&mut self, settings: &mut SalonSettingsService) -> AppResult<SaveOutcome> {
        save_group(
            &mut self.state,
            settings,
            "calendar",
            Notice::success("Calendar settings saved")
                .with_description("Your calendar integration settings have been updated successfully."),
        )
        .await
    }
}
