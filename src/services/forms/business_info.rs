// src/services/forms/business_info.rs

use serde_json::Value;
use validator::{Validate, ValidationError};

use crate::{
    common::{
        error::{AppError, AppResult},
        format::{
            SocialPlatform, format_phone, is_valid_email, is_valid_phone, social_handle, social_url,
            unformat_phone,
        },
    },
    models::salon::{SalonRecord, Socials},
    services::{
        forms::{FormState, SaveOutcome},
        notifier::Notice,
        settings_service::SalonSettingsService,
    },
};

fn validate_contact_email(email: &str) -> Result<(), ValidationError> {
    if !is_valid_email(email) {
        let mut err = ValidationError::new("email");
        err.message = Some("Please enter a valid email address".into());
        return Err(err);
    }
    Ok(())
}

fn validate_contact_phone(phone: &str) -> Result<(), ValidationError> {
    if !is_valid_phone(phone) {
        let mut err = ValidationError::new("phone");
        err.message = Some("Please enter a valid 10-digit phone number".into());
        return Err(err);
    }
    Ok(())
}

// Editable copy of the top-level profile fields. Missing server values read as "".
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct BusinessInfo {
    pub salon_name: String,
    pub about: String,
    #[validate(custom(function = "validate_contact_email"))]
    pub contact_email: String,
    // Raw digits.
    #[validate(custom(function = "validate_contact_phone"))]
    pub contact_phone: String,
    pub website: String,
    pub socials: Socials,
}

impl BusinessInfo {
    pub fn from_salon(salon: &SalonRecord) -> Self {
        Self {
            salon_name: salon.salon_name.clone(),
            about: salon.about.clone().unwrap_or_default(),
            contact_email: salon.contact_email.clone().unwrap_or_default(),
            contact_phone: salon.contact_phone.clone().unwrap_or_default(),
            website: salon.website.clone().unwrap_or_default(),
            socials: salon.socials.clone().unwrap_or_default(),
        }
    }

    /// Field paths that differ from `base`, in form order, with the value to send.
    pub fn changes_from(&self, base: &BusinessInfo) -> AppResult<Vec<(&'static str, Value)>> {
        let mut changes = Vec::new();
        let text_fields = [
            ("salonName", &self.salon_name, &base.salon_name),
            ("about", &self.about, &base.about),
            ("contactEmail", &self.contact_email, &base.contact_email),
            ("contactPhone", &self.contact_phone, &base.contact_phone),
            ("website", &self.website, &base.website),
        ];
        for (field, mine, theirs) in text_fields {
            if mine != theirs {
                changes.push((field, Value::String(mine.clone())));
            }
        }
        if self.socials != base.socials {
            changes.push(("socials", serde_json::to_value(&self.socials)?));
        }
        Ok(changes)
    }
}

pub struct BusinessInfoForm {
    state: FormState<BusinessInfo>,
}

impl BusinessInfoForm {
    pub fn load(settings: &SalonSettingsService) -> AppResult<Self> {
        let salon = settings.require_salon()?;
        Ok(Self { state: FormState::new(BusinessInfo::from_salon(salon)) })
    }

    pub fn state(&self) -> &FormState<BusinessInfo> {
        &self.state
    }

    pub fn set_salon_name(&mut self, value: &str) {
        self.state.edit(|d| d.salon_name = value.to_string());
    }

    pub fn set_about(&mut self, value: &str) {
        self.state.edit(|d| d.about = value.to_string());
    }

    pub fn set_contact_email(&mut self, value: &str) {
        self.state.edit(|d| d.contact_email = value.trim().to_string());
    }

    /// Accepts whatever was typed; only the digits are kept.
    pub fn set_contact_phone(&mut self, value: &str) {
        self.state.edit(|d| d.contact_phone = unformat_phone(value));
    }

    pub fn display_phone(&self) -> String {
        format_phone(&self.state.draft().contact_phone)
    }

    pub fn set_website(&mut self, value: &str) {
        self.state.edit(|d| d.website = value.trim().to_string());
    }

    /// Stores the full profile URL built from a bare handle.
    pub fn set_social(&mut self, platform: SocialPlatform, handle: &str) {
        let url = social_url(handle, platform);
        self.state.edit(|d| match platform {
            SocialPlatform::Instagram => d.socials.instagram = url,
            SocialPlatform::Twitter => d.socials.twitter = url,
            SocialPlatform::Facebook => d.socials.facebook = url,
        });
    }

    pub fn social_handle(&self, platform: SocialPlatform) -> String {
        let socials = &self.state.draft().socials;
        let url = match platform {
            SocialPlatform::Instagram => &socials.instagram,
            SocialPlatform::Twitter => &socials.twitter,
            SocialPlatform::Facebook => &socials.facebook,
        };
        social_handle(url, platform)
    }

    /// Validates, then sends every changed field on its own, in form order.
    /// The first failing field stops the save; the form stays dirty.
    pub async fn save(&mut self, settings: &mut SalonSettingsService) -> AppResult<SaveOutcome> {
        if !self.state.can_save() {
            return Ok(SaveOutcome::Disabled);
        }
        if let Err(errors) = self.state.draft().validate() {
            settings.notifier().notify(
                Notice::error("Validation Error").with_description("Please fix the errors before saving."),
            );
            return Err(AppError::ValidationError(errors));
        }

        self.state.begin_save();
        let result = self.send_changes(settings).await;
        self.state.finish_save(&result);

        match &result {
            Ok(SaveOutcome::Saved) => settings.notifier().notify(
                Notice::success("Business information saved")
                    .with_description("Your business information has been updated successfully."),
            ),
            Err(_) => settings.notifier().notify(
                Notice::error("Failed to save").with_description(
                    "There was an error saving your business information. Please try again.",
                ),
            ),
            _ => {}
        }
        result
    }

    async fn send_changes(&self, settings: &mut SalonSettingsService) -> AppResult<SaveOutcome> {
        let base = BusinessInfo::from_salon(settings.require_salon()?);
        let changes = self.state.draft().changes_from(&base)?;
        if changes.is_empty() {
            return Ok(SaveOutcome::Unchanged);
        }
        for (field, value) in changes {
            settings.update_field(field, value).await?;
        }
        Ok(SaveOutcome::Saved)
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
    use std::sync::{Arc, atomic::Ordering};

    async fn loaded(store: &MockSalonStore) -> SalonSettingsService {
        let mut settings =
            SalonSettingsService::new(Arc::new(store.clone()), Arc::new(RecordingNotifier::new()), "glowgirl");
        settings.load().await.unwrap();
        settings
    }

    #[tokio::test]
    async fn typed_phone_is_stored_raw_and_shown_formatted() {
        let store = MockSalonStore::new(sample_salon());
        let mut settings = loaded(&store).await;
        let mut form = BusinessInfoForm::load(&settings).unwrap();

        form.set_contact_phone("(555) 987-6543");
        assert_eq!(form.state().draft().contact_phone, "5559876543");
        assert_eq!(form.display_phone(), "(555) 987-6543");

        assert_eq!(form.save(&mut settings).await.unwrap(), SaveOutcome::Saved);
        assert_eq!(store.last_update(), Some(json!({ "contactPhone": "5559876543" })));
        assert!(!form.state().is_dirty());
    }

    #[tokio::test]
    async fn invalid_contact_blocks_save_and_reports_fields() {
        let store = MockSalonStore::new(sample_salon());
        let mut settings = loaded(&store).await;
        let mut form = BusinessInfoForm::load(&settings).unwrap();

        form.set_contact_email("not-an-email");
        form.set_contact_phone("555-12");
        let err = form.save(&mut settings).await.unwrap_err();

        let fields = err.field_messages();
        assert_eq!(fields["contact_email"], vec!["Please enter a valid email address".to_string()]);
        assert_eq!(fields["contact_phone"], vec!["Please enter a valid 10-digit phone number".to_string()]);
        assert_eq!(store.0.calls_to_update_salon.load(Ordering::SeqCst), 0);
        assert!(form.state().is_dirty());
        assert!(!form.state().is_saving());
    }

    #[tokio::test]
    async fn every_changed_field_is_sent_in_form_order() {
        let store = MockSalonStore::new(sample_salon());
        let mut settings = loaded(&store).await;
        let mut form = BusinessInfoForm::load(&settings).unwrap();

        form.set_website("https://glowgirl.com");
        form.set_salon_name("Glow Girl Lash Studio");
        form.set_social(SocialPlatform::Twitter, "@glowgirl");
        form.save(&mut settings).await.unwrap();

        let updates = store.updates();
        assert_eq!(updates.len(), 3);
        assert_eq!(updates[0], json!({ "salonName": "Glow Girl Lash Studio" }));
        assert_eq!(updates[1], json!({ "website": "https://glowgirl.com" }));
        assert_eq!(updates[2]["socials"]["twitter"], json!("https://twitter.com/glowgirl"));
        assert_eq!(form.social_handle(SocialPlatform::Twitter), "glowgirl");
    }

    #[tokio::test]
    async fn edit_back_to_server_value_sends_nothing() {
        let store = MockSalonStore::new(sample_salon());
        let mut settings = loaded(&store).await;
        let mut form = BusinessInfoForm::load(&settings).unwrap();

        form.set_about("Lashes and brows");
        assert_eq!(form.save(&mut settings).await.unwrap(), SaveOutcome::Unchanged);
        assert!(!form.state().is_dirty());
        assert_eq!(store.0.calls_to_update_salon.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn failed_save_keeps_form_dirty() {
        let store = MockSalonStore::new(sample_salon());
        let mut settings = loaded(&store).await;
        let mut form = BusinessInfoForm::load(&settings).unwrap();
        store.0.fail_updates.store(true, Ordering::SeqCst);

        form.set_about("New text");
        assert!(form.save(&mut settings).await.is_err());
        assert!(form.state().is_dirty());
        assert!(!form.state().is_saving());
        assert!(form.state().can_save());
    }

    #[tokio::test]
    async fn clean_form_is_disabled() {
        let store = MockSalonStore::new(sample_salon());
        let mut settings = loaded(&store).await;
        let mut form = BusinessInfoForm::load(&settings).unwrap();
        assert_eq!(form.save(&mut settings).await.unwrap(), SaveOutcome::Disabled);
    }
}
