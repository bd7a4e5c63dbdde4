pub mod booking_draft;
pub mod bookings_service;
pub mod forms;
pub mod integrations;
pub mod notifier;
pub mod settings_service;
