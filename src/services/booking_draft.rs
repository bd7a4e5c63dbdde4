// src/services/booking_draft.rs
//
// Customer-side booking session on the public salon page. Nothing here is
// persisted; `submit` only produces the request a booking backend would take.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::{
    common::error::{AppError, AppResult},
    models::{
        booking::{BookableService, BookingRequest},
        salon::SalonRecord,
    },
};

pub const TIME_SLOTS: [&str; 20] = [
    "9:00 AM", "9:30 AM", "10:00 AM", "10:30 AM", "11:00 AM", "11:30 AM", "12:00 PM", "12:30 PM",
    "1:00 PM", "1:30 PM", "2:00 PM", "2:30 PM", "3:00 PM", "3:30 PM", "4:00 PM", "4:30 PM",
    "5:00 PM", "5:30 PM", "6:00 PM", "6:30 PM",
];

// 8%
pub const TAX_RATE: Decimal = Decimal::from_parts(8, 0, 0, false, 2);

/// Flattens the salon catalog into what the booking page lists.
/// Ids are `{category}_{index}` with the category name lowercased.
pub fn bookable_services(salon: &SalonRecord) -> Vec<BookableService> {
    salon
        .services
        .iter()
        .flatten()
        .flat_map(|category| {
            let prefix = category.name.to_lowercase();
            category.services.iter().enumerate().map(move |(index, service)| BookableService {
                id: format!("{prefix}_{index}"),
                name: service.title.clone(),
                category: category.name.clone(),
                description: service.description.clone(),
                duration_minutes: service.duration_minutes,
                price: service.price,
            })
        })
        .collect()
}

#[derive(Debug, Clone, Default)]
pub struct BookingDraft {
    date: Option<NaiveDate>,
    time_slot: Option<String>,
    services: Vec<BookableService>,
}

impl BookingDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn time_slot(&self) -> Option<&str> {
        self.time_slot.as_deref()
    }

    pub fn services(&self) -> &[BookableService] {
        &self.services
    }

    pub fn select_date(&mut self, date: NaiveDate) {
        self.date = Some(date);
    }

    pub fn select_time(&mut self, slot: &str) -> AppResult<()> {
        let slot = TIME_SLOTS
            .iter()
            .find(|s| **s == slot)
            .ok_or_else(|| AppError::NotFound(format!("Time slot '{slot}'")))?;
        self.time_slot = Some(slot.to_string());
        Ok(())
    }

    /// Selects the service, or deselects it when one with the same id is
    /// already in the draft. Returns whether it is selected afterwards.
    pub fn toggle_service(&mut self, service: &BookableService) -> bool {
        match self.services.iter().position(|s| s.id == service.id) {
            Some(index) => {
                self.services.remove(index);
                false
            }
            None => {
                self.services.push(service.clone());
                true
            }
        }
    }

    pub fn is_selected(&self, service_id: &str) -> bool {
        self.services.iter().any(|s| s.id == service_id)
    }

    /// Ranged prices count at their lower bound.
    pub fn subtotal(&self) -> Decimal {
        self.services.iter().map(|s| s.price.lower_bound()).sum()
    }

    pub fn tax(&self) -> Decimal {
        (self.subtotal() * TAX_RATE).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }

    pub fn total(&self) -> Decimal {
        self.subtotal() + self.tax()
    }

    pub fn can_submit(&self) -> bool {
        self.date.is_some() && self.time_slot.is_some() && !self.services.is_empty()
    }

    pub fn submit(&self) -> AppResult<BookingRequest> {
        let (Some(date), Some(time_slot)) = (self.date, self.time_slot.clone()) else {
            return Err(AppError::DraftIncomplete);
        };
        if self.services.is_empty() {
            return Err(AppError::DraftIncomplete);
        }
        Ok(BookingRequest {
            date,
            time_slot,
            service_ids: self.services.iter().map(|s| s.id.clone()).collect(),
            subtotal: self.subtotal(),
            tax: self.tax(),
            total: self.total(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{models::salon::Price, testutils::sample_salon};
    use std::str::FromStr;

    fn service(id: &str, price: &str) -> BookableService {
        BookableService {
            id: id.into(),
            name: id.into(),
            category: "Nails".into(),
            description: String::new(),
            duration_minutes: 30,
            price: price.parse().unwrap(),
        }
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn catalog_ids_use_lowercased_category_and_index() {
        let services = bookable_services(&sample_salon());
        let ids: Vec<&str> = services.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["lashes_0", "lashes_1", "brows_0"]);
        assert_eq!(services[1].price, Price::Range { min: Decimal::from(45), max: Decimal::from(65) });
    }

    #[test]
    fn toggling_twice_restores_selection() {
        let mut draft = BookingDraft::new();
        let a = service("a", "20");
        let b = service("b", "35");

        assert!(draft.toggle_service(&a));
        assert!(draft.toggle_service(&b));
        assert!(!draft.toggle_service(&a));
        assert!(draft.toggle_service(&a));

        let order: Vec<&str> = draft.services().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(order, vec!["b", "a"]);
    }

    #[test]
    fn ranges_count_at_lower_bound() {
        let mut draft = BookingDraft::new();
        draft.toggle_service(&service("fixed", "35"));
        draft.toggle_service(&service("range", "15-45"));

        assert_eq!(draft.subtotal(), dec("50"));
        assert_eq!(draft.tax(), dec("4.00"));
        assert_eq!(draft.total(), dec("54.00"));
    }

    #[test]
    fn tax_is_rounded_to_cents() {
        let mut draft = BookingDraft::new();
        draft.toggle_service(&service("odd", "12.99"));
        assert_eq!(draft.tax(), dec("1.04"));
        assert_eq!(draft.total(), dec("14.03"));
    }

    #[test]
    fn submit_requires_date_time_and_service() {
        let mut draft = BookingDraft::new();
        assert!(matches!(draft.submit(), Err(AppError::DraftIncomplete)));

        draft.select_date(NaiveDate::from_ymd_opt(2026, 11, 2).unwrap());
        draft.select_time("10:30 AM").unwrap();
        assert!(!draft.can_submit());

        draft.toggle_service(&service("a", "40"));
        assert!(draft.can_submit());

        let request = draft.submit().unwrap();
        assert_eq!(request.service_ids, vec!["a".to_string()]);
        assert_eq!(request.total, dec("43.20"));
    }

    #[test]
    fn unknown_time_slot_is_rejected() {
        let mut draft = BookingDraft::new();
        assert!(matches!(draft.select_time("7:00 PM"), Err(AppError::NotFound(_))));
        assert!(draft.time_slot().is_none());
    }
}
