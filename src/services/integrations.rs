// src/services/integrations.rs
//
// Seams for the external accounts a salon can link. Only the traits and the
// "not available" implementations live here; real OAuth flows are separate work.

use async_trait::async_trait;

use crate::common::error::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarConnection {
    pub calendar_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentConnection {
    pub account_id: String,
}

#[async_trait]
pub trait CalendarProvider: Send + Sync {
    async fn connect(&self, username: &str) -> AppResult<CalendarConnection>;
}

#[async_trait]
pub trait PaymentProvider: Send + Sync {
    async fn connect(&self, username: &str) -> AppResult<PaymentConnection>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableCalendar;

#[async_trait]
impl CalendarProvider for UnavailableCalendar {
    async fn connect(&self, _username: &str) -> AppResult<CalendarConnection> {
        Err(AppError::NotImplemented("Google Calendar connection"))
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailablePayments;

#[async_trait]
impl PaymentProvider for UnavailablePayments {
    async fn connect(&self, _username: &str) -> AppResult<PaymentConnection> {
        Err(AppError::NotImplemented("Stripe connection"))
    }
}
