// src/services/forms/media.rs

use crate::{
    api::{MediaUpload, UploadFile},
    common::error::{AppError, AppResult},
    models::salon::{Media, MediaAsset},
    services::{
        forms::{FormState, SaveOutcome},
        notifier::Notice,
        settings_service::{FieldValue, SalonSettingsService},
    },
};

#[derive(Debug, Clone, PartialEq)]
pub enum GalleryItem {
    Stored(MediaAsset),
    // Picked locally, uploaded on the next save.
    Pending(UploadFile),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediaDraft {
    pub logo: Option<MediaAsset>,
    pub pending_logo: Option<UploadFile>,
    pub gallery: Vec<GalleryItem>,
}

impl MediaDraft {
    fn from_media(media: Option<&Media>) -> Self {
        let media = media.cloned().unwrap_or_default();
        Self {
            logo: media.logo,
            pending_logo: None,
            gallery: media.images.into_iter().map(GalleryItem::Stored).collect(),
        }
    }

    fn to_upload(&self) -> MediaUpload {
        let mut upload = MediaUpload { logo: self.pending_logo.clone(), ..MediaUpload::default() };
        for item in &self.gallery {
            match item {
                GalleryItem::Stored(asset) if asset.is_stored() => upload.existing_images.push(asset.clone()),
                GalleryItem::Stored(_) => {}
                GalleryItem::Pending(file) => upload.images.push(file.clone()),
            }
        }
        upload
    }
}

pub struct MediaForm {
    state: FormState<MediaDraft>,
}

impl MediaForm {
    pub fn load(settings: &SalonSettingsService) -> AppResult<Self> {
        let salon = settings.require_salon()?;
        Ok(Self { state: FormState::new(MediaDraft::from_media(salon.media.as_ref())) })
    }

    pub fn state(&self) -> &FormState<MediaDraft> {
        &self.state
    }

    pub fn set_logo(&mut self, file: UploadFile) {
        self.state.edit(|draft| draft.pending_logo = Some(file));
    }

    pub fn add_images(&mut self, files: impl IntoIterator<Item = UploadFile>) {
        self.state.edit(|draft| draft.gallery.extend(files.into_iter().map(GalleryItem::Pending)));
    }

    /// Unsaved images are dropped locally. Stored ones are deleted on the
    /// backend right away.
    pub async fn remove_image(&mut self, settings: &mut SalonSettingsService, index: usize) -> AppResult<()> {
        let item = self
            .state
            .draft()
            .gallery
            .get(index)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Image {index}")))?;

        match item {
            GalleryItem::Pending(_) => {
                self.state.edit(|draft| draft.gallery.remove(index));
                settings.notifier().notify(
                    Notice::info("Image removed").with_description("The unsaved image has been removed."),
                );
            }
            GalleryItem::Stored(asset) => {
                settings.delete_image(&asset.key).await?;
                self.state.draft_mut().gallery.remove(index);
            }
        }
        Ok(())
    }

    /// Uploads pending files and keeps the stored images listed in the draft.
    /// Pending files survive a failed save so it can be retried.
    pub async fn save(&mut self, settings: &mut SalonSettingsService) -> AppResult<SaveOutcome> {
        if !self.state.begin_save() {
            return Ok(SaveOutcome::Disabled);
        }
        let upload = self.state.draft().to_upload();
        let result = settings.update_field("media", FieldValue::Media(upload)).await;
        self.state.finish_save(&result);
        result?;

        let fresh = MediaDraft::from_media(settings.require_salon()?.media.as_ref());
        *self.state.draft_mut() = fresh;
        settings.notifier().notify(
            Notice::success("Media saved").with_description("Your salon media has been updated successfully."),
        );
        Ok(SaveOutcome::Saved)
    }
}
