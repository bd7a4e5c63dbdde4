// src/api/client.rs

use reqwest::{RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;

use crate::common::error::{ApiErrorBody, AppError, AppResult};

// Base HTTP plumbing shared by the salon and auth clients.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(base_url: &str) -> AppResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| AppError::Config(format!("invalid API base URL {base_url:?}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::Config(format!("{base_url} cannot be used as a base URL")));
        }
        Ok(Self { http: reqwest::Client::new(), base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Appends `segments` to the base path. Each segment is percent-encoded,
    /// so storage keys with slashes stay a single segment.
    pub fn endpoint(&self, segments: &[&str]) -> AppResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::Config(format!("{} cannot be used as a base URL", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Sends the request and decodes a 2xx JSON body.
    pub async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> AppResult<T> {
        let response = check_response(request.send().await?).await?;
        Ok(response.json::<T>().await?)
    }
}

/// Turns a non-2xx answer into `AppError::Api`, keeping the backend `message` if any.
pub async fn check_response(response: Response) -> AppResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.json::<ApiErrorBody>().await.unwrap_or_default();
    tracing::warn!(%status, message = ?body.message, "Backend request failed");
    Err(AppError::Api { status, message: body.message })
}
