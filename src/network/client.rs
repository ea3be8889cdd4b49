//! HTTP client for the users collection

use std::future::Future;
use std::time::Duration;

use reqwest::Url;

use crate::config::Config;
use crate::constants::USERS_PATH;
use crate::error::ApiError;
use crate::models::{NewUser, User, UserId};

/// Typed client for `GET/POST /users` and `DELETE /users/{id}`.
///
/// GET and DELETE are retried with exponential backoff on transient
/// failures. POST is sent exactly once.
#[derive(Clone, Debug)]
pub struct UsersClient {
    http: reqwest::Client,
    collection: Url,
    max_retries: u32,
    backoff: Duration,
}

impl UsersClient {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(UsersClient {
            http,
            collection: collection_url(&config.base_url)?,
            max_retries: config.max_retries,
            backoff: config.retry_backoff(),
        })
    }

    /// Full URL of the collection endpoint
    pub fn collection_url(&self) -> &Url {
        &self.collection
    }

    /// URL of a single member of the collection
    pub fn member_url(&self, id: &UserId) -> Result<Url, ApiError> {
        let mut url = self.collection.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.collection.to_string()))?
            .pop_if_empty()
            .push(&id.to_string());
        Ok(url)
    }

    pub async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        self.with_retry("list", || self.list_once()).await
    }

    pub async fn create_user(&self, user: &NewUser) -> Result<User, ApiError> {
        let resp = self.http.post(self.collection.clone()).json(user).send().await?;
        let body = ensure_success(resp).await?.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Delete a user; the response body is ignored
    pub async fn delete_user(&self, id: &UserId) -> Result<(), ApiError> {
        let url = self.member_url(id)?;
        self.with_retry("delete", || self.delete_once(url.clone())).await
    }

    async fn list_once(&self) -> Result<Vec<User>, ApiError> {
        let resp = self.http.get(self.collection.clone()).send().await?;
        let body = ensure_success(resp).await?.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn delete_once(&self, url: Url) -> Result<(), ApiError> {
        let resp = self.http.delete(url).send().await?;
        ensure_success(resp).await?;
        Ok(())
    }

    async fn with_retry<T, F, Fut>(
        &self,
        operation: &'static str,
        mut call: F,
    ) -> Result<T, ApiError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let mut attempt: u32 = 0;
        loop {
            match call().await {
                Err(e) if e.is_transient() && attempt < self.max_retries => {
                    let delay = self.backoff.saturating_mul(1u32 << attempt.min(16));
                    attempt += 1;
                    tracing::warn!(
                        operation,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Transient failure, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                other => return other,
            }
        }
    }
}

/// Resolve the collection URL against a base URL.
///
/// A path on the base URL is kept, so `http://host/api` maps to
/// `http://host/api/users`.
pub fn collection_url(base_url: &str) -> Result<Url, ApiError> {
    let mut base = base_url.trim().to_string();
    if !base.ends_with('/') {
        base.push('/');
    }

    let base =
        Url::parse(&base).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", base_url, e)))?;
    if !matches!(base.scheme(), "http" | "https") {
        return Err(ApiError::InvalidUrl(format!("{}: unsupported scheme", base_url)));
    }

    base.join(USERS_PATH)
        .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", base_url, e)))
}

async fn ensure_success(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(ApiError::Status {
        status: status.as_u16(),
        body,
    })
}
