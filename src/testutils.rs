// src/testutils.rs

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, AtomicU64, Ordering},
};

use async_trait::async_trait;
use reqwest::StatusCode;
use rust_decimal::Decimal;
use serde_json::{Value, json};

use crate::{
    api::{MediaUpload, SalonStore},
    common::error::{AppError, AppResult},
    models::salon::{
        Location, Media, MediaAsset, Price, SalonRecord, SalonService, SalonSummary, ServiceCategory,
        Socials,
    },
};

pub fn sample_salon() -> SalonRecord {
    let mut salon = SalonRecord::new("glowgirl", "Glow Girl Studio");
    salon.about = Some("Lashes and brows".into());
    salon.contact_email = Some("hello@glowgirl.com".into());
    salon.contact_phone = Some("5551234567".into());
    salon.location = Some(Location {
        street_number: "12".into(),
        street: "Main St".into(),
        city: "Dallas".into(),
        state: "TX".into(),
        zip: "75201".into(),
        ..Location::default()
    });
    salon.socials = Some(Socials {
        instagram: "https://instagram.com/glowgirl".into(),
        ..Socials::default()
    });
    salon.media = Some(Media {
        logo: Some(MediaAsset { url: "https://cdn.test/logo.png".into(), key: "logo.png".into() }),
        images: vec![
            MediaAsset { url: "https://cdn.test/front.jpg".into(), key: "images/front.jpg".into() },
            MediaAsset { url: "https://cdn.test/chair.jpg".into(), key: "images/chair.jpg".into() },
        ],
    });
    salon.services = Some(vec![
        ServiceCategory {
            id: 1,
            name: "Lashes".into(),
            services: vec![
                SalonService {
                    id: 101,
                    title: "Classic Set".into(),
                    description: "Full classic set".into(),
                    price: Price::Fixed(Decimal::from(120)),
                    duration_minutes: 90,
                },
                SalonService {
                    id: 102,
                    title: "Lash Fill".into(),
                    description: String::new(),
                    price: Price::Range { min: Decimal::from(45), max: Decimal::from(65) },
                    duration_minutes: 60,
                },
            ],
        },
        ServiceCategory {
            id: 2,
            name: "Brows".into(),
            services: vec![SalonService {
                id: 201,
                title: "Brow Tint".into(),
                description: String::new(),
                price: Price::Fixed(Decimal::from(25)),
                duration_minutes: 30,
            }],
        },
    ]);
    salon
}

pub struct MockSalonStoreInner {
    pub success: AtomicBool,
    // Only the write routes fail; fetches keep working.
    pub fail_updates: AtomicBool,
    pub calls_to_list_salons: AtomicU64,
    pub calls_to_fetch_salon: AtomicU64,
    pub calls_to_update_salon: AtomicU64,
    pub calls_to_upload_media: AtomicU64,
    pub calls_to_delete_image: AtomicU64,
    pub remote: Mutex<SalonRecord>,
    pub updates: Mutex<Vec<Value>>,
    pub uploads: Mutex<Vec<MediaUpload>>,
}

#[derive(Clone)]
pub struct MockSalonStore(pub Arc<MockSalonStoreInner>);

impl MockSalonStore {
    pub fn new(remote: SalonRecord) -> Self {
        Self(Arc::new(MockSalonStoreInner {
            success: AtomicBool::new(true),
            fail_updates: AtomicBool::new(false),
            calls_to_list_salons: AtomicU64::default(),
            calls_to_fetch_salon: AtomicU64::default(),
            calls_to_update_salon: AtomicU64::default(),
            calls_to_upload_media: AtomicU64::default(),
            calls_to_delete_image: AtomicU64::default(),
            remote: Mutex::new(remote),
            updates: Mutex::default(),
            uploads: Mutex::default(),
        }))
    }

    pub fn remote(&self) -> SalonRecord {
        self.0.remote.lock().unwrap().clone()
    }

    pub fn set_remote(&self, edit: impl FnOnce(&mut SalonRecord)) {
        edit(&mut self.0.remote.lock().unwrap());
    }

    pub fn updates(&self) -> Vec<Value> {
        self.0.updates.lock().unwrap().clone()
    }

    pub fn last_update(&self) -> Option<Value> {
        self.updates().last().cloned()
    }

    pub fn last_upload(&self) -> Option<MediaUpload> {
        self.0.uploads.lock().unwrap().last().cloned()
    }

    fn result(&self) -> AppResult<()> {
        match self.0.success.load(Ordering::SeqCst) {
            true => Ok(()),
            false => Err(AppError::Api {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: Some("Supposed to fail".into()),
            }),
        }
    }

    fn write_result(&self) -> AppResult<()> {
        self.result()?;
        match self.0.fail_updates.load(Ordering::SeqCst) {
            true => Err(AppError::Api { status: StatusCode::BAD_REQUEST, message: None }),
            false => Ok(()),
        }
    }
}

fn merge(target: &mut Value, patch: Value) {
    match (target, patch) {
        (Value::Object(target), Value::Object(patch)) => {
            for (key, value) in patch {
                merge(target.entry(key).or_insert(Value::Null), value);
            }
        }
        (target, patch) => *target = patch,
    }
}

#[async_trait]
impl SalonStore for MockSalonStore {
    async fn list_salons(&self) -> AppResult<Vec<SalonSummary>> {
        self.0.calls_to_list_salons.fetch_add(1, Ordering::SeqCst);
        self.result()?;
        let remote = self.remote();
        Ok(vec![SalonSummary {
            id: remote.username,
            name: remote.salon_name,
            location: None,
            coordinates: None,
            services: None,
            reviews: Vec::new(),
        }])
    }

    async fn fetch_salon(&self, _username: &str) -> AppResult<SalonRecord> {
        self.0.calls_to_fetch_salon.fetch_add(1, Ordering::SeqCst);
        self.result()?;
        Ok(self.remote())
    }

    async fn fetch_public_salon(&self, username: &str) -> AppResult<SalonRecord> {
        self.fetch_salon(username).await
    }

    async fn update_salon(&self, _username: &str, partial: &Value) -> AppResult<SalonRecord> {
        self.0.calls_to_update_salon.fetch_add(1, Ordering::SeqCst);
        self.0.updates.lock().unwrap().push(partial.clone());
        self.write_result()?;

        let mut remote = self.0.remote.lock().unwrap();
        let mut doc = serde_json::to_value(&*remote)?;
        merge(&mut doc, partial.clone());
        *remote = serde_json::from_value(doc)?;
        Ok(remote.clone())
    }

    async fn upload_media(&self, _username: &str, upload: &MediaUpload) -> AppResult<SalonRecord> {
        self.0.calls_to_upload_media.fetch_add(1, Ordering::SeqCst);
        self.0.uploads.lock().unwrap().push(upload.clone());
        self.write_result()?;

        let mut remote = self.0.remote.lock().unwrap();
        let media = remote.media.get_or_insert_with(Media::default);
        media.images = upload.existing_images.clone();
        for (i, image) in upload.images.iter().enumerate() {
            media.images.push(MediaAsset {
                url: format!("https://cdn.test/{}", image.file_name),
                key: format!("images/upload-{i}-{}", image.file_name),
            });
        }
        if let Some(logo) = &upload.logo {
            media.logo = Some(MediaAsset {
                url: format!("https://cdn.test/{}", logo.file_name),
                key: logo.file_name.clone(),
            });
        }
        Ok(remote.clone())
    }

    async fn delete_image(&self, _username: &str, key: &str) -> AppResult<SalonRecord> {
        self.0.calls_to_delete_image.fetch_add(1, Ordering::SeqCst);
        self.write_result()?;

        let mut remote = self.0.remote.lock().unwrap();
        if let Some(media) = remote.media.as_mut() {
            media.images.retain(|img| img.key != key);
        }
        Ok(remote.clone())
    }
}

#[test]
fn merge_keeps_untouched_siblings() {
    let mut doc = json!({ "location": { "city": "Dallas", "zip": "75201" } });
    merge(&mut doc, json!({ "location": { "city": "Austin" } }));
    assert_eq!(doc, json!({ "location": { "city": "Austin", "zip": "75201" } }));
}
