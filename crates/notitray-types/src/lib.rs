//! Shared types for notitray components.
//!
//! This crate provides the notification data model used by notitray-core,
//! notitray-client and the CLI. The payload types mirror the JSON shapes the
//! notifications API returns, the rest is the normalized form the store keeps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Identifier of a single notification as assigned by the server.
pub type NotificationId = u64;

/// Key under which the aggregate unread count lives in [`TabCounts`].
pub const TOTAL_COUNT_KEY: &str = "count";

/// App selected when nothing else has been chosen.
pub const DEFAULT_APP_NAME: &str = "discussions";

/// Page size used when the caller does not pick one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Deserialize a Vec that may be null or missing (both become empty vec)
fn deserialize_null_as_empty_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let opt: Option<Vec<T>> = Option::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}

/// Outcome of the most recently completed async operation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationStatus {
    #[default]
    Idle,
    Pending,
    Successful,
    Failed,
}

impl NotificationStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Pending => "pending",
            Self::Successful => "successful",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for NotificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single notification record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,

    /// Name of the app that produced the notification (e.g. "discussions")
    pub app_name: String,

    #[serde(default)]
    pub notification_type: String,

    /// Display payload, usually a short HTML snippet
    #[serde(default)]
    pub content: String,

    #[serde(default)]
    pub content_url: Option<String>,

    #[serde(default)]
    pub course_id: Option<String>,

    /// When the notification was read; `None` means unread
    #[serde(default)]
    pub last_read: Option<DateTime<Utc>>,

    /// When the notification was seen in the tray; `None` means unseen
    #[serde(default)]
    pub last_seen: Option<DateTime<Utc>>,

    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
}

impl Notification {
    #[must_use]
    pub fn is_read(&self) -> bool {
        self.last_read.is_some()
    }

    #[must_use]
    pub fn is_seen(&self) -> bool {
        self.last_seen.is_some()
    }
}

/// Unread counts per tab, keyed by category.
///
/// The aggregate total is stored under [`TOTAL_COUNT_KEY`], every other key is
/// an app name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabCounts(BTreeMap<String, u32>);

impl TabCounts {
    /// Build the full tab map from a counts payload
    #[must_use]
    pub fn from_payload(payload: &CountsPayload) -> Self {
        let mut counts = payload.count_by_app_name.clone();
        counts.insert(TOTAL_COUNT_KEY.to_string(), payload.count);
        Self(counts)
    }

    #[must_use]
    pub fn get(&self, category: &str) -> Option<u32> {
        self.0.get(category).copied()
    }

    /// Aggregate unread count, zero when counts were never fetched
    #[must_use]
    pub fn total(&self) -> u32 {
        self.get(TOTAL_COUNT_KEY).unwrap_or(0)
    }

    /// Whether any category has unread notifications
    #[must_use]
    pub fn any_unread(&self) -> bool {
        self.0.values().any(|&count| count > 0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.0.iter().map(|(name, &count)| (name.as_str(), count))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Pagination state for the currently listed app
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Total number of items the server reports
    pub count: u64,
    pub num_pages: u32,
    pub current_page: u32,
    /// Page to request next; `None` once the last page is loaded
    pub next_page: Option<u32>,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            count: u64::from(DEFAULT_PAGE_SIZE),
            num_pages: 1,
            current_page: 1,
            next_page: None,
        }
    }
}

impl Pagination {
    /// Derive pagination from server metadata. `num_pages` is taken verbatim.
    #[must_use]
    pub fn from_meta(meta: PaginationMeta) -> Self {
        let next_page = (meta.current_page < meta.num_pages).then(|| meta.current_page + 1);
        Self {
            count: meta.count,
            num_pages: meta.num_pages,
            current_page: meta.current_page,
            next_page,
        }
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.next_page.is_some()
    }
}

/// Response of the counts endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountsPayload {
    /// Aggregate unread count across all apps
    #[serde(default)]
    pub count: u32,

    #[serde(default)]
    pub count_by_app_name: BTreeMap<String, u32>,
}

impl CountsPayload {
    pub fn app_names(&self) -> impl Iterator<Item = &str> {
        self.count_by_app_name.keys().map(String::as_str)
    }
}

/// Pagination metadata carried by a list response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationMeta {
    pub count: u64,
    pub num_pages: u32,
    pub current_page: u32,
}

/// Response of the list endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListPayload {
    #[serde(default, deserialize_with = "deserialize_null_as_empty_vec")]
    pub results: Vec<Notification>,

    #[serde(default)]
    pub count: u64,

    #[serde(default)]
    pub num_pages: u32,

    #[serde(default)]
    pub current_page: u32,

    /// Absolute URL of the next page as the server renders it
    #[serde(default)]
    pub next: Option<String>,
}

/// A payload that parsed but does not describe a valid page
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid list payload: {0}")]
pub struct InvalidPayload(pub String);

impl ListPayload {
    #[must_use]
    pub fn meta(&self) -> PaginationMeta {
        PaginationMeta {
            count: self.count,
            num_pages: self.num_pages,
            current_page: self.current_page,
        }
    }

    /// Check the page numbers before the payload reaches the store.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPayload` if `current_page` is zero or lies past `num_pages`.
    pub fn validate(&self) -> Result<(), InvalidPayload> {
        if self.current_page == 0 {
            return Err(InvalidPayload("current_page must start at 1".to_string()));
        }
        if self.num_pages > 0 && self.current_page > self.num_pages {
            return Err(InvalidPayload(format!(
                "current_page {} exceeds num_pages {}",
                self.current_page, self.num_pages
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_snake_case() {
        let json = serde_json::to_string(&NotificationStatus::Successful).unwrap();
        assert_eq!(json, "\"successful\"");
        assert_eq!(NotificationStatus::default(), NotificationStatus::Idle);
        assert_eq!(NotificationStatus::Pending.to_string(), "pending");
    }

    #[test]
    fn test_notification_parses_nulls() {
        let json = r#"{
            "id": 7,
            "app_name": "discussions",
            "notification_type": "new_response",
            "content": "<p>New reply</p>",
            "content_url": null,
            "last_read": null,
            "last_seen": "2024-03-01T12:00:00Z"
        }"#;

        let notification: Notification = serde_json::from_str(json).unwrap();
        assert_eq!(notification.id, 7);
        assert!(!notification.is_read());
        assert!(notification.is_seen());
        assert!(notification.course_id.is_none());
    }

    #[test]
    fn test_tab_counts_from_payload() {
        let json = r#"{
            "count": 25,
            "count_by_app_name": {"reminders": 10, "discussions": 0, "grades": 10, "authoring": 5}
        }"#;
        let payload: CountsPayload = serde_json::from_str(json).unwrap();

        let counts = TabCounts::from_payload(&payload);
        assert_eq!(counts.len(), 5);
        assert_eq!(counts.total(), 25);
        assert_eq!(counts.get("reminders"), Some(10));
        assert_eq!(counts.get("discussions"), Some(0));
        assert!(counts.any_unread());
    }

    #[test]
    fn test_tab_counts_all_zero() {
        let payload = CountsPayload {
            count: 0,
            count_by_app_name: BTreeMap::from([("grades".to_string(), 0)]),
        };
        assert!(!TabCounts::from_payload(&payload).any_unread());
        assert!(!TabCounts::default().any_unread());
        assert_eq!(TabCounts::default().total(), 0);
    }

    #[test]
    fn test_pagination_default() {
        let pagination = Pagination::default();
        assert_eq!(pagination.count, 10);
        assert_eq!(pagination.num_pages, 1);
        assert_eq!(pagination.current_page, 1);
        assert!(pagination.next_page.is_none());
    }

    #[test]
    fn test_pagination_next_page() {
        let pagination = Pagination::from_meta(PaginationMeta {
            count: 10,
            num_pages: 2,
            current_page: 1,
        });
        assert_eq!(pagination.next_page, Some(2));

        let last = Pagination::from_meta(PaginationMeta {
            count: 10,
            num_pages: 2,
            current_page: 2,
        });
        assert!(!last.has_next());
    }

    #[test]
    fn test_pagination_no_pages() {
        let pagination = Pagination::from_meta(PaginationMeta {
            count: 0,
            num_pages: 0,
            current_page: 1,
        });
        assert!(pagination.next_page.is_none());
    }

    #[test]
    fn test_list_payload_null_results() {
        let json = r#"{"results": null, "count": 0, "num_pages": 1, "current_page": 1}"#;
        let payload: ListPayload = serde_json::from_str(json).unwrap();
        assert!(payload.results.is_empty());
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn test_list_payload_validate() {
        let json = r#"{"results": [], "count": 4, "num_pages": 2, "current_page": 0}"#;
        let mut payload: ListPayload = serde_json::from_str(json).unwrap();
        assert!(payload.validate().is_err());

        payload.current_page = 3;
        let err = payload.validate().unwrap_err();
        assert!(err.to_string().contains("exceeds num_pages 2"));

        payload.current_page = 2;
        assert!(payload.validate().is_ok());
    }
}
