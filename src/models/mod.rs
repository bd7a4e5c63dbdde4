pub mod auth;
pub mod booking;
pub mod legacy;
pub mod salon;
