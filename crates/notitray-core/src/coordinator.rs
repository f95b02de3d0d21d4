//! Fetch/mutation coordinator.
//!
//! Every operation follows the same lifecycle: dispatch `BeginFetch`, await the
//! API, then dispatch either the matching success action or `Failed`. Errors
//! are returned to the caller after the store has recorded the failure. There
//! are no retries here; callers retry by invoking the operation again.

use crate::api::NotificationsApi;
use crate::error::{ApiError, ApiResult, Error, Result};
use crate::store::{Action, NotificationState, Operation, Store};
use chrono::{DateTime, Utc};
use notitray_types::{DEFAULT_PAGE_SIZE, NotificationId};
use std::future::Future;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Parameters of a list fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub page: u32,
    pub page_size: u32,
    /// App to list; the currently selected app when `None`
    pub app_name: Option<String>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE)
    }
}

impl ListQuery {
    #[must_use]
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page,
            page_size,
            app_name: None,
        }
    }

    #[must_use]
    pub fn for_app(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }
}

/// Drives the notifications API and feeds outcomes into a [`Store`]
pub struct Coordinator<A> {
    api: A,
    store: Store,
    clock: fn() -> DateTime<Utc>,
}

impl<A: NotificationsApi> Coordinator<A> {
    pub fn new(api: A) -> Self {
        Self::with_store(api, Store::new())
    }

    pub fn with_store(api: A, store: Store) -> Self {
        Self {
            api,
            store,
            clock: Utc::now,
        }
    }

    /// Replace the clock used to stamp read/seen markers
    #[must_use]
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn snapshot(&self) -> NotificationState {
        self.store.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<NotificationState> {
        self.store.subscribe()
    }

    /// Return the store to its initial state
    pub fn reset(&self) {
        info!("Resetting notification state");
        self.store.reset();
    }

    /// Switch the selected app without touching the API
    pub fn select_app(&self, app_name: impl Into<String>) {
        self.store.dispatch(Action::SelectApp(app_name.into()));
    }

    /// Fetch unread counts for every tab.
    ///
    /// # Errors
    ///
    /// Returns `Error::NetworkFailure` if the API call fails.
    pub async fn fetch_counts(&self) -> Result<()> {
        let counts = self
            .run(Operation::FetchCounts, self.api.fetch_counts())
            .await?;
        debug!(
            "Fetched counts: total={}, {} apps",
            counts.count,
            counts.count_by_app_name.len()
        );
        self.store.dispatch(Action::FetchCountsSucceeded(counts));
        Ok(())
    }

    /// Fetch one page of notifications.
    ///
    /// # Errors
    ///
    /// Returns `Error::NetworkFailure` if the API call fails or the payload
    /// describes an impossible page.
    pub async fn fetch_list(&self, query: ListQuery) -> Result<()> {
        let ListQuery {
            page,
            page_size,
            app_name,
        } = query;
        let app_name = app_name.unwrap_or_else(|| self.store.selected_app());

        let payload = self
            .run(Operation::FetchList, async {
                let payload = self.api.fetch_list(&app_name, page, page_size).await?;
                payload.validate()?;
                Ok::<_, ApiError>(payload)
            })
            .await?;

        debug!(
            "Fetched page {}/{} of {app_name}: {} items",
            payload.current_page,
            payload.num_pages,
            payload.results.len()
        );
        let meta = payload.meta();
        self.store.dispatch(Action::FetchListSucceeded {
            app_name,
            items: payload.results,
            meta,
        });
        Ok(())
    }

    /// Mark every notification of `app_name` as seen.
    ///
    /// # Errors
    ///
    /// Returns `Error::NetworkFailure` if the API call fails.
    pub async fn mark_seen(&self, app_name: &str) -> Result<()> {
        self.run(Operation::MarkSeen, self.api.mark_seen(app_name))
            .await?;
        self.store.dispatch(Action::MarkSeenSucceeded {
            app_name: app_name.to_string(),
            timestamp: (self.clock)(),
        });
        Ok(())
    }

    /// Mark every listed notification of `app_name` as read.
    ///
    /// # Errors
    ///
    /// Returns `Error::NetworkFailure` if the API call fails.
    pub async fn mark_all_read(&self, app_name: &str) -> Result<()> {
        self.run(Operation::MarkAllRead, self.api.mark_all_read(app_name))
            .await?;
        self.store.dispatch(Action::MarkAllReadSucceeded {
            app_name: app_name.to_string(),
            timestamp: (self.clock)(),
        });
        Ok(())
    }

    /// Mark a single notification as read.
    ///
    /// # Errors
    ///
    /// Returns `Error::NetworkFailure` if the API call fails.
    pub async fn mark_one_read(
        &self,
        app_name: &str,
        notification_id: NotificationId,
    ) -> Result<()> {
        self.run(
            Operation::MarkOneRead,
            self.api.mark_one_read(app_name, notification_id),
        )
        .await?;
        self.store.dispatch(Action::MarkOneReadSucceeded {
            app_name: app_name.to_string(),
            notification_id,
            timestamp: (self.clock)(),
        });
        Ok(())
    }

    /// Mark the operation pending, await the call and record a failure.
    /// The call future is not polled before `BeginFetch` is dispatched.
    async fn run<T>(
        &self,
        operation: Operation,
        call: impl Future<Output = ApiResult<T>>,
    ) -> Result<T> {
        self.store.dispatch(Action::BeginFetch(operation));
        match call.await {
            Ok(value) => Ok(value),
            Err(source) => {
                warn!("{operation} failed: {source}");
                self.store.dispatch(Action::Failed(operation));
                Err(Error::NetworkFailure { operation, source })
            }
        }
    }
}
