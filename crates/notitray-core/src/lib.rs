//! Core library for notitray.
//!
//! - [`store`]: the normalized notification state, its actions and the
//!   [`Store`] handle that applies them
//! - [`coordinator`]: async operations that talk to the notifications API and
//!   translate each outcome into store actions
//! - [`api`]: the read/write capabilities the coordinator consumes
//! - [`config`]: JSON configuration and XDG directories
//!
//! Operations resolve in whatever order their API calls finish, and the store
//! applies transitions in that order. When several operations run at once the
//! last one to resolve decides `notification_status` and `pagination`.

pub mod api;
pub mod config;
pub mod coordinator;
pub mod store;

mod error;

#[cfg(test)]
mod tests;

pub use api::{NotificationsApi, NotificationsReader, NotificationsWriter};
pub use coordinator::{Coordinator, ListQuery};
pub use error::{ApiError, ApiResult, Error, Result};
pub use store::{Action, NotificationState, Operation, Store, reduce};

pub use notitray_types::*;
