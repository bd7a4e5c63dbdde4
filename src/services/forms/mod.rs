// src/services/forms/mod.rs
//
// One module per settings card. Every form keeps a local draft plus its own
// dirty/saving flags and writes through `SalonSettingsService::update_field`.

pub mod amenities;
pub mod business_info;
pub mod calendar;
pub mod location;
pub mod media;
pub mod notifications;
pub mod payments;
pub mod services_editor;

use serde::Serialize;
use serde_json::Value;

use crate::{
    common::error::AppResult,
    services::{
        notifier::Notice,
        settings_service::{FieldValue, SalonSettingsService},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    // The draft already matched the server copy; nothing was sent.
    Unchanged,
    // Save button state: clean form or a save already running.
    Disabled,
}

#[derive(Debug, Clone)]
pub struct FormState<T> {
    draft: T,
    dirty: bool,
    saving: bool,
}

impl<T> FormState<T> {
    pub fn new(draft: T) -> Self {
        Self { draft, dirty: false, saving: false }
    }

    pub fn draft(&self) -> &T {
        &self.draft
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn can_save(&self) -> bool {
        self.dirty && !self.saving
    }

    /// Any local edit marks the form dirty.
    pub fn edit<R>(&mut self, change: impl FnOnce(&mut T) -> R) -> R {
        self.dirty = true;
        change(&mut self.draft)
    }

    /// Replaces the draft without touching the flags.
    pub(crate) fn draft_mut(&mut self) -> &mut T {
        &mut self.draft
    }

    pub(crate) fn begin_save(&mut self) -> bool {
        if !self.can_save() {
            return false;
        }
        self.saving = true;
        true
    }

    // Connect/disconnect buttons: blocked only by a running save.
    pub(crate) fn begin_action(&mut self) -> bool {
        if self.saving {
            return false;
        }
        self.saving = true;
        true
    }

    pub(crate) fn finish_action(&mut self) {
        self.saving = false;
    }

    // The saving flag is cleared on every path; dirty only after success.
    pub(crate) fn finish_save<R>(&mut self, result: &AppResult<R>) {
        self.saving = false;
        if result.is_ok() {
            self.dirty = false;
        }
    }
}

/// Sends the whole draft as one top-level field when it differs from the
/// server copy of that field.
pub(crate) async fn save_group<T: Serialize>(
    form: &mut FormState<T>,
    settings: &mut SalonSettingsService,
    field: &str,
    saved: Notice,
) -> AppResult<SaveOutcome> {
    if !form.begin_save() {
        return Ok(SaveOutcome::Disabled);
    }
    let result = send_if_changed(form.draft(), settings, field).await;
    form.finish_save(&result);
    if matches!(result, Ok(SaveOutcome::Saved)) {
        settings.notifier().notify(saved);
    }
    result
}

/// Writes `next` as the whole `field` group right away and adopts it as the
/// draft once the backend accepted it. Used by connect/disconnect actions.
pub(crate) async fn push_group<T: Serialize>(
    form: &mut FormState<T>,
    settings: &mut SalonSettingsService,
    field: &str,
    next: T,
) -> AppResult<SaveOutcome> {
    if !form.begin_action() {
        return Ok(SaveOutcome::Disabled);
    }
    let result = match serde_json::to_value(&next) {
        Ok(value) => settings.update_field(field, FieldValue::Json(value)).await,
        Err(e) => Err(e.into()),
    };
    form.finish_action();
    result?;
    *form.draft_mut() = next;
    Ok(SaveOutcome::Saved)
}

async fn send_if_changed<T: Serialize>(
    draft: &T,
    settings: &mut SalonSettingsService,
    field: &str,
) -> AppResult<SaveOutcome> {
    let value = serde_json::to_value(draft)?;
    let current = serde_json::to_value(settings.require_salon()?)?;
    if current.get(field).unwrap_or(&Value::Null) == &value {
        return Ok(SaveOutcome::Unchanged);
    }
    settings.update_field(field, FieldValue::Json(value)).await?;
    Ok(SaveOutcome::Saved)
}
