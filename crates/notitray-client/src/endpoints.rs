//! URL builders for the notifications API.
//!
//! All endpoints hang off `{base}/api/notifications/`. App names are pushed as
//! path segments so they get percent-encoded.

use crate::error::{ClientError, Result};
use notitray_types::NotificationId;
use url::Url;

const NOTIFICATIONS_PATH: &str = "api/notifications/";

/// Endpoint builder bound to one LMS base URL
#[derive(Debug, Clone)]
pub struct Endpoints {
    base: Url,
}

impl Endpoints {
    /// # Errors
    ///
    /// Returns an error if `base_url` does not parse or cannot be a base.
    pub fn new(base_url: &str) -> Result<Self> {
        let mut base = Url::parse(base_url)?;
        if base.cannot_be_a_base() {
            return Err(ClientError::BaseUrl(base_url.to_string()));
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self { base })
    }

    #[must_use]
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// `GET /api/notifications/count/`
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be built.
    pub fn counts(&self) -> Result<Url> {
        self.build(&["count"])
    }

    /// `GET /api/notifications/?app_name=&page=&page_size=`
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be built.
    pub fn list(&self, app_name: &str, page: u32, page_size: u32) -> Result<Url> {
        let mut url = self.build(&[])?;
        url.query_pairs_mut()
            .append_pair("app_name", app_name)
            .append_pair("page", &page.to_string())
            .append_pair("page_size", &page_size.to_string());
        Ok(url)
    }

    /// `PUT /api/notifications/mark-seen/{app}/`
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be built.
    pub fn mark_seen(&self, app_name: &str) -> Result<Url> {
        self.build(&["mark-seen", app_name])
    }

    /// `PUT /api/notifications/read/{app}/`
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be built.
    pub fn mark_all_read(&self, app_name: &str) -> Result<Url> {
        self.build(&["read", app_name])
    }

    /// `PUT /api/notifications/read/{app}/{id}/`
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be built.
    pub fn mark_one_read(&self, app_name: &str, notification_id: NotificationId) -> Result<Url> {
        self.build(&["read", app_name, &notification_id.to_string()])
    }

    /// Join the notifications root and append `segments`, keeping a trailing slash
    fn build(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base.join(NOTIFICATIONS_PATH)?;
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|()| ClientError::BaseUrl(self.base.to_string()))?;
            path.pop_if_empty();
            path.extend(segments);
            path.push("");
        }
        Ok(url)
    }
}
