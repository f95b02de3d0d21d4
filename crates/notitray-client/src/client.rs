//! `reqwest` implementation of the notifications API capabilities.

use std::time::Duration;

use notitray_core::config::ApiConfig;
use notitray_core::{ApiResult, NotificationsReader, NotificationsWriter};
use notitray_types::{CountsPayload, ListPayload, NotificationId};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::endpoints::Endpoints;
use crate::error::{ClientError, Result};

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the notifications API
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: reqwest::Client,
    endpoints: Endpoints,
    token: Option<String>,
}

impl HttpApi {
    /// Client for `base_url` with the default timeout and no credentials.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client cannot be built.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::build(base_url, DEFAULT_TIMEOUT, None)
    }

    /// Client configured from the `api` section of the config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client cannot be built.
    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        Self::build(
            &config.base_url,
            Duration::from_secs(config.timeout_secs),
            config.token.clone(),
        )
    }

    fn build(base_url: &str, timeout: Duration, token: Option<String>) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoints: Endpoints::new(base_url)?,
            token,
        })
    }

    #[must_use]
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!("GET {url}");
        let response = self.authorize(self.client.get(url)).send().await?;
        let response = check_status(response).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn put(&self, url: Url) -> Result<()> {
        debug!("PUT {url}");
        let response = self.authorize(self.client.put(url)).send().await?;
        check_status(response).await?;
        Ok(())
    }
}

/// Turn non-2xx responses into `ClientError::Status` carrying the body
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ClientError::Status {
        code: status.as_u16(),
        body,
    })
}

impl NotificationsReader for HttpApi {
    async fn fetch_counts(&self) -> ApiResult<CountsPayload> {
        let url = self.endpoints.counts()?;
        Ok(self.get_json(url).await?)
    }

    async fn fetch_list(
        &self,
        app_name: &str,
        page: u32,
        page_size: u32,
    ) -> ApiResult<ListPayload> {
        let url = self.endpoints.list(app_name, page, page_size)?;
        Ok(self.get_json(url).await?)
    }
}

impl NotificationsWriter for HttpApi {
    async fn mark_seen(&self, app_name: &str) -> ApiResult<()> {
        let url = self.endpoints.mark_seen(app_name)?;
        Ok(self.put(url).await?)
    }

    async fn mark_all_read(&self, app_name: &str) -> ApiResult<()> {
        let url = self.endpoints.mark_all_read(app_name)?;
        Ok(self.put(url).await?)
    }

    async fn mark_one_read(
        &self,
        app_name: &str,
        notification_id: NotificationId,
    ) -> ApiResult<()> {
        let url = self.endpoints.mark_one_read(app_name, notification_id)?;
        Ok(self.put(url).await?)
    }
}
