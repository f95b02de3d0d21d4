//! Notification store: normalized state plus the handle that mutates it.
//!
//! State changes only through [`Action`]s. The [`Store`] handle wraps a
//! `tokio::sync::watch` channel so applying an action and waking subscribers
//! happen in one step. Dispatch is crate-private; outside code reads snapshots
//! and drives changes through the [`Coordinator`](crate::Coordinator).

mod action;
mod state;

pub use action::{Action, Operation};
pub use state::{NotificationState, reduce};

use notitray_types::DEFAULT_APP_NAME;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

/// Shared handle to the notification state
#[derive(Debug, Clone)]
pub struct Store {
    tx: Arc<watch::Sender<NotificationState>>,
    default_app: Arc<str>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    #[must_use]
    pub fn new() -> Self {
        Self::with_default_app(DEFAULT_APP_NAME)
    }

    /// Create a store whose initial (and post-reset) selected app is `app_name`
    #[must_use]
    pub fn with_default_app(app_name: &str) -> Self {
        let (tx, _rx) = watch::channel(NotificationState::new(app_name));
        Self {
            tx: Arc::new(tx),
            default_app: Arc::from(app_name),
        }
    }

    #[must_use]
    pub fn default_app(&self) -> &str {
        &self.default_app
    }

    /// Clone of the current state
    #[must_use]
    pub fn snapshot(&self) -> NotificationState {
        self.tx.borrow().clone()
    }

    #[must_use]
    pub fn selected_app(&self) -> String {
        self.tx.borrow().app_name.clone()
    }

    /// Receiver that is marked changed after every dispatched action
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<NotificationState> {
        self.tx.subscribe()
    }

    pub(crate) fn dispatch(&self, action: Action) {
        let name = action.name();
        self.tx.send_modify(|state| {
            state.apply(action);
            debug!(
                "Applied {name}: status={}, app={}, {} notifications",
                state.notification_status,
                state.app_name,
                state.notifications.len()
            );
        });
    }

    pub(crate) fn reset(&self) {
        self.dispatch(Action::Reset {
            default_app: self.default_app.to_string(),
        });
    }
}
