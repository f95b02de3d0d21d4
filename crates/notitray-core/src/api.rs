//! Capabilities the coordinator needs from the notifications API.
//!
//! The HTTP implementation lives in notitray-client; tests use an in-memory
//! mock. Both sides only exchange the payload types from notitray-types.

use crate::error::ApiResult;
use notitray_types::{CountsPayload, ListPayload, NotificationId};
use std::future::Future;
use std::sync::Arc;

/// Read side: counts and paged lists
pub trait NotificationsReader: Send + Sync {
    fn fetch_counts(&self) -> impl Future<Output = ApiResult<CountsPayload>> + Send;

    fn fetch_list(
        &self,
        app_name: &str,
        page: u32,
        page_size: u32,
    ) -> impl Future<Output = ApiResult<ListPayload>> + Send;
}

/// Write side: read/seen markers. Every call resolves without a payload.
pub trait NotificationsWriter: Send + Sync {
    fn mark_seen(&self, app_name: &str) -> impl Future<Output = ApiResult<()>> + Send;

    fn mark_all_read(&self, app_name: &str) -> impl Future<Output = ApiResult<()>> + Send;

    fn mark_one_read(
        &self,
        app_name: &str,
        notification_id: NotificationId,
    ) -> impl Future<Output = ApiResult<()>> + Send;
}

/// Both capabilities together
pub trait NotificationsApi: NotificationsReader + NotificationsWriter {}

impl<T: NotificationsReader + NotificationsWriter> NotificationsApi for T {}

impl<T: NotificationsReader> NotificationsReader for Arc<T> {
    fn fetch_counts(&self) -> impl Future<Output = ApiResult<CountsPayload>> + Send {
        (**self).fetch_counts()
    }

    fn fetch_list(
        &self,
        app_name: &str,
        page: u32,
        page_size: u32,
    ) -> impl Future<Output = ApiResult<ListPayload>> + Send {
        (**self).fetch_list(app_name, page, page_size)
    }
}

impl<T: NotificationsWriter> NotificationsWriter for Arc<T> {
    fn mark_seen(&self, app_name: &str) -> impl Future<Output = ApiResult<()>> + Send {
        (**self).mark_seen(app_name)
    }

    fn mark_all_read(&self, app_name: &str) -> impl Future<Output = ApiResult<()>> + Send {
        (**self).mark_all_read(app_name)
    }

    fn mark_one_read(
        &self,
        app_name: &str,
        notification_id: NotificationId,
    ) -> impl Future<Output = ApiResult<()>> + Send {
        (**self).mark_one_read(app_name, notification_id)
    }
}
