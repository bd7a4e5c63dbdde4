// src/config.rs

use std::env;

use reqwest::Url;

use crate::common::error::{AppError, AppResult};

pub const API_URL_VAR: &str = "SALON_API_URL";
pub const API_TOKEN_VAR: &str = "SALON_API_TOKEN";

// Settings shared by every client built in the process.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base_url: String,
    // Bearer token for the salon routes, when the backend requires one.
    pub api_token: Option<String>,
}

impl AppConfig {
    /// Reads `.env` (if present) and then the process environment.
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    // Split out so tests don't have to touch the process environment.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = lookup(API_URL_VAR)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| AppError::Config(format!("{API_URL_VAR} must be set")))?;

        Url::parse(api_base_url.trim())
            .map_err(|e| AppError::Config(format!("{API_URL_VAR} is not a valid URL: {e}")))?;

        let api_token = lookup(API_TOKEN_VAR).filter(|v| !v.trim().is_empty());

        tracing::debug!(api_base_url = %api_base_url, token = api_token.is_some(), "Configuration loaded");

        Ok(Self {
            api_base_url: api_base_url.trim().to_string(),
            api_token,
        })
    }
}
