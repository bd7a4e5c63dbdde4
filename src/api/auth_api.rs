// src/api/auth_api.rs
//
// Links an identity-provider session to the backend. The ID token comes from
// the provider sign-in flow, which happens outside this crate.

use serde::Serialize;
use validator::Validate;

use crate::{
    api::client::ApiClient,
    common::error::{AppError, AppResult},
    config::AppConfig,
    models::auth::{AuthResponse, GoogleSigninPayload, LoginPayload, SignupPayload},
};

#[derive(Clone)]
pub struct AuthClient {
    api: ApiClient,
}

impl AuthClient {
    pub fn new(base_url: &str) -> AppResult<Self> {
        Ok(Self { api: ApiClient::new(base_url)? })
    }

    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        Self::new(&config.api_base_url)
    }

    // POST /api/auth/login
    pub async fn login(&self, id_token: &str, payload: &LoginPayload) -> AppResult<AuthResponse> {
        self.post("login", id_token, payload).await
    }

    // POST /api/auth/signup
    pub async fn signup(&self, id_token: &str, payload: &SignupPayload) -> AppResult<AuthResponse> {
        self.post("signup", id_token, payload).await
    }

    // POST /api/auth/google-signin
    pub async fn google_signin(
        &self,
        id_token: &str,
        payload: &GoogleSigninPayload,
    ) -> AppResult<AuthResponse> {
        self.post("google-signin", id_token, payload).await
    }

    async fn post<P>(&self, action: &str, id_token: &str, payload: &P) -> AppResult<AuthResponse>
    where
        P: Serialize + Validate + Sync,
    {
        payload.validate().map_err(AppError::ValidationError)?;

        let url = self.api.endpoint(&["api", "auth", action])?;
        let request = self
            .api
            .http()
            .post(url)
            .bearer_auth(id_token)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(payload);

        let response: AuthResponse = self.api.send_json(request).await?;
        tracing::info!(action, message = ?response.message, "Auth request accepted");
        Ok(response)
    }
}
