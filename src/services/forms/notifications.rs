// src/services/forms/notifications.rs

use crate::{
    common::error::{AppError, AppResult},
    models::salon::{NotificationContact, NotificationSettings},
    services::{
        forms::{FormState, SaveOutcome, save_group},
        notifier::Notice,
        settings_service::SalonSettingsService,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Email,
    Sms,
}

pub struct NotificationsForm {
    state: FormState<NotificationSettings>,
}

impl NotificationsForm {
    pub fn load(settings: &SalonSettingsService) -> AppResult<Self> {
        let notifications = settings.require_salon()?.notifications.clone().unwrap_or_default();
        Ok(Self { state: FormState::new(notifications) })
    }

    pub fn state(&self) -> &FormState<NotificationSettings> {
        &self.state
    }

    pub fn recipients(&self, channel: Channel) -> &[NotificationContact] {
        let draft = self.state.draft();
        match channel {
            Channel::Email => &draft.email_recipients,
            Channel::Sms => &draft.sms_recipients,
        }
    }

    pub fn set_channel_enabled(&mut self, channel: Channel, enabled: bool) {
        self.state.edit(|draft| match channel {
            Channel::Email => draft.email_enabled = enabled,
            Channel::Sms => draft.sms_enabled = enabled,
        });
    }

    /// Appends an empty, enabled recipient and returns its id.
    pub fn add_recipient(&mut self, channel: Channel) -> u64 {
        let id = self.recipients(channel).iter().map(|c| c.id).max().unwrap_or(0) + 1;
        self.state.edit(|draft| {
            list_mut(draft, channel).push(NotificationContact { id, value: String::new(), enabled: true })
        });
        id
    }

    pub fn remove_recipient(&mut self, channel: Channel, id: u64) -> AppResult<()> {
        let index = self.recipient_index(channel, id)?;
        self.state.edit(|draft| {
            list_mut(draft, channel).remove(index);
        });
        Ok(())
    }

    pub fn update_recipient(&mut self, channel: Channel, id: u64, value: &str) -> AppResult<()> {
        let index = self.recipient_index(channel, id)?;
        self.state.edit(|draft| list_mut(draft, channel)[index].value = value.to_string());
        Ok(())
    }

    pub fn toggle_recipient(&mut self, channel: Channel, id: u64, enabled: bool) -> AppResult<()> {
        let index = self.recipient_index(channel, id)?;
        self.state.edit(|draft| list_mut(draft, channel)[index].enabled = enabled);
        Ok(())
    }

    pub async fn save(&mut self, settings: &mut SalonSettingsService) -> AppResult<SaveOutcome> {
        save_group(
            &mut self.state,
            settings,
            "notifications",
            Notice::success("Notification settings saved")
                .with_description("Your notification preferences have been updated successfully."),
        )
        .await
    }

    fn recipient_index(&self, channel: Channel, id: u64) -> AppResult<usize> {
        self.recipients(channel)
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Recipient {id}")))
    }
}

fn list_mut(draft: &mut NotificationSettings, channel: Channel) -> &mut Vec<NotificationContact> {
    match channel {
        Channel::Email => &mut draft.email_recipients,
        Channel::Sms => &mut draft.sms_recipients,
    }
}
