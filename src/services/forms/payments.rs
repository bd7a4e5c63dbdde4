// src/services/forms/payments.rs

use crate::{
    common::error::AppResult,
    models::salon::{PaymentSettings, PayoutSchedule},
    services::{
        forms::{FormState, SaveOutcome, push_group, save_group},
        integrations::PaymentProvider,
        notifier::Notice,
        settings_service::SalonSettingsService,
    },
};

pub struct PaymentsForm {
    state: FormState<PaymentSettings>,
}

impl PaymentsForm {
    pub fn load(settings: &SalonSettingsService) -> AppResult<Self> {
        let payments = settings.require_salon()?.payments.clone().unwrap_or(PaymentSettings {
            auto_payouts: true,
            ..PaymentSettings::default()
        });
        Ok(Self { state: FormState::new(payments) })
    }

    pub fn state(&self) -> &FormState<PaymentSettings> {
        &self.state
    }

    pub fn set_auto_payouts(&mut self, enabled: bool) {
        self.state.edit(|draft| draft.auto_payouts = enabled);
    }

    pub fn set_payout_schedule(&mut self, schedule: PayoutSchedule) {
        self.state.edit(|draft| draft.payout_schedule = Some(schedule));
    }

    pub async fn connect(
        &mut self,
        settings: &mut SalonSettingsService,
        provider: &dyn PaymentProvider,
    ) -> AppResult<SaveOutcome> {
        if self.state.is_saving() {
            return Ok(SaveOutcome::Disabled);
        }
        let connection = match provider.connect(settings.username()).await {
            Ok(connection) => connection,
            Err(e) => {
                tracing::warn!(error = %e, "Payment account connection failed");
                settings.notifier().notify(
                    Notice::error("Failed to connect").with_description(e.user_message()),
                );
                return Err(e);
            }
        };

        let next = PaymentSettings {
            stripe_connected: true,
            stripe_account_id: Some(connection.account_id),
            ..self.state.draft().clone()
        };
        let outcome = push_group(&mut self.state, settings, "payments", next).await?;
        settings.notifier().notify(
            Notice::success("Stripe account connected")
                .with_description("Your salon is now connected to Stripe for payments."),
        );
        Ok(outcome)
    }

    /// Unlinks the account; payout preferences are kept.
    pub async fn disconnect(&mut self, settings: &mut SalonSettingsService) -> AppResult<SaveOutcome> {
        let next = PaymentSettings {
            stripe_connected: false,
            stripe_account_id: None,
            ..self.state.draft().clone()
        };
        let outcome = push_group(&mut self.state, settings, "payments", next).await?;
        if outcome == SaveOutcome::Saved {
            settings.notifier().notify(
                Notice::info("Stripe account disconnected")
                    .with_description("Your salon is no longer connected to Stripe."),
            );
        }
        Ok(outcome)
    }

    pub async fn save(&mut self, settings: &mut SalonSettingsService) -> AppResult<SaveOutcome> {
        save_group(
            &mut self.state,
            settings,
            "payments",
            Notice::success("Payment settings saved")
                .with_description("Your payment integration settings have been updated."),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        common::error::AppError,
        services::{integrations::UnavailablePayments, notifier::RecordingNotifier},
        testutils::{MockSalonStore, sample_salon},
    };
    use serde_json::json;
    use std::sync::Arc;

    async fn loaded(store: &MockSalonStore) -> SalonSettingsService {
        let mut settings =
            SalonSettingsService::new(Arc::new(store.clone()), Arc::new(RecordingNotifier::new()), "glowgirl");
        settings.load().await.unwrap();
        settings
    }

    #[tokio::test]
    async fn schedule_change_is_saved() {
        let store = MockSalonStore::new(sample_salon());
        let mut settings = loaded(&store).await;
        let mut form = PaymentsForm::load(&settings).unwrap();
        assert!(form.state().draft().auto_payouts);

        form.set_payout_schedule(PayoutSchedule::Weekly);
        form.save(&mut settings).await.unwrap();

        assert_eq!(store.last_update().unwrap()["payments"]["payoutSchedule"], json!("weekly"));
        assert_eq!(
            settings.salon().unwrap().payments.as_ref().unwrap().payout_schedule,
            Some(PayoutSchedule::Weekly)
        );
    }

    #[tokio::test]
    async fn connect_without_provider_is_not_implemented() {
        let store = MockSalonStore::new(sample_salon());
        let mut settings = loaded(&store).await;
        let mut form = PaymentsForm::load(&settings).unwrap();

        let err = form.connect(&mut settings, &UnavailablePayments).await.unwrap_err();
        assert!(matches!(err, AppError::NotImplemented(_)));
        assert_eq!(err.user_message(), "Stripe connection is not available yet");
    }
}
