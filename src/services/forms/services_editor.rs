// src/services/forms/services_editor.rs

use crate::{
    common::error::{AppError, AppResult},
    models::salon::{Price, SalonService, ServiceCategory},
    services::{
        forms::{FormState, SaveOutcome, save_group},
        notifier::Notice,
        settings_service::SalonSettingsService,
    },
};

// What the add/edit dialog collects. The id is assigned by the editor.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceInput {
    pub title: String,
    pub description: String,
    pub price: Price,
    pub duration_minutes: u32,
}

impl ServiceInput {
    fn into_service(self, id: u64) -> SalonService {
        SalonService {
            id,
            title: self.title,
            description: self.description,
            price: self.price,
            duration_minutes: self.duration_minutes,
        }
    }
}

pub struct ServicesEditor {
    state: FormState<Vec<ServiceCategory>>,
}

impl ServicesEditor {
    pub fn load(settings: &SalonSettingsService) -> AppResult<Self> {
        let categories = settings.require_salon()?.services.clone().unwrap_or_default();
        Ok(Self { state: FormState::new(categories) })
    }

    pub fn state(&self) -> &FormState<Vec<ServiceCategory>> {
        &self.state
    }

    pub fn categories(&self) -> &[ServiceCategory] {
        self.state.draft()
    }

    pub fn add_category(&mut self, name: &str) -> u64 {
        let id = self.categories().iter().map(|c| c.id).max().unwrap_or(0) + 1;
        self.state.edit(|categories| {
            categories.push(ServiceCategory { id, name: name.trim().to_string(), services: Vec::new() })
        });
        id
    }

    /// Appends a service to a category and returns its new id.
    pub fn add_service(&mut self, category_id: u64, input: ServiceInput) -> AppResult<u64> {
        self.category_index(category_id)?;
        let id = self.next_service_id();
        self.state.edit(|categories| {
            if let Some(category) = categories.iter_mut().find(|c| c.id == category_id) {
                category.services.push(input.into_service(id));
            }
        });
        Ok(id)
    }

    /// Edits a service in place, or moves it to the end of `to_category` when
    /// the category changed. The id is kept either way.
    pub fn update_service(
        &mut self,
        from_category: u64,
        service_id: u64,
        to_category: u64,
        input: ServiceInput,
    ) -> AppResult<()> {
        let from = self.category_index(from_category)?;
        let to = self.category_index(to_category)?;
        let position = self.service_index(from, service_id)?;

        self.state.edit(|categories| {
            let service = input.into_service(service_id);
            if from == to {
                categories[from].services[position] = service;
            } else {
                categories[from].services.remove(position);
                categories[to].services.push(service);
            }
        });
        Ok(())
    }

    pub fn delete_service(&mut self, category_id: u64, service_id: u64) -> AppResult<()> {
        let category = self.category_index(category_id)?;
        let position = self.service_index(category, service_id)?;
        self.state.edit(|categories| {
            categories[category].services.remove(position);
        });
        Ok(())
    }

    pub async fn save(&mut self, settings: &mut SalonSettingsService) -> AppResult<SaveOutcome> {
        save_group(
            &mut self.state,
            settings,
            "services",
            Notice::success("Services saved")
                .with_description("Your salon services have been updated successfully."),
        )
        .await
    }

    fn next_service_id(&self) -> u64 {
        self.categories()
            .iter()
            .flat_map(|c| c.services.iter().map(|s| s.id))
            .max()
            .unwrap_or(0)
            + 1
    }

    fn category_index(&self, category_id: u64) -> AppResult<usize> {
        self.categories()
            .iter()
            .position(|c| c.id == category_id)
            .ok_or_else(|| AppError::NotFound(format!("Category {category_id}")))
    }

    fn service_index(&self, category: usize, service_id: u64) -> AppResult<usize> {
        self.categories()[category]
            .services
            .iter()
            .position(|s| s.id == service_id)
            .ok_or_else(|| AppError::NotFound(format!("Service {service_id}")))
    }
}
