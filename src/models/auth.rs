// src/models/auth.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

// Body of POST /api/auth/login
#[derive(Debug, Serialize, Validate)]
pub struct LoginPayload {
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

// Body of POST /api/auth/signup
#[derive(Debug, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignupPayload {
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    #[validate(length(min = 1, message = "Missing identity provider uid"))]
    pub firebase_uid: String,
}

// Body of POST /api/auth/google-signin
#[derive(Debug, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GoogleSigninPayload {
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Missing identity provider uid"))]
    pub firebase_uid: String,
}

// The backend answer is opaque apart from its message.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
