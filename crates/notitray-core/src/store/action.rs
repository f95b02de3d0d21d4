use chrono::{DateTime, Utc};
use notitray_types::{CountsPayload, Notification, NotificationId, PaginationMeta};
use std::fmt;

/// Async operations the coordinator runs against the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    FetchCounts,
    FetchList,
    MarkSeen,
    MarkAllRead,
    MarkOneRead,
}

impl Operation {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FetchCounts => "fetch counts",
            Self::FetchList => "fetch list",
            Self::MarkSeen => "mark as seen",
            Self::MarkAllRead => "mark all as read",
            Self::MarkOneRead => "mark one as read",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transitions accepted by [`NotificationState::apply`](super::NotificationState::apply)
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Drop everything and select `default_app`
    Reset { default_app: String },

    /// An operation was issued and is awaiting the API
    BeginFetch(Operation),

    FetchCountsSucceeded(CountsPayload),

    FetchListSucceeded {
        app_name: String,
        items: Vec<Notification>,
        meta: PaginationMeta,
    },

    MarkSeenSucceeded {
        app_name: String,
        timestamp: DateTime<Utc>,
    },

    MarkOneReadSucceeded {
        app_name: String,
        notification_id: NotificationId,
        timestamp: DateTime<Utc>,
    },

    MarkAllReadSucceeded {
        app_name: String,
        timestamp: DateTime<Utc>,
    },

    /// The API call for `Operation` failed; entities stay untouched
    Failed(Operation),

    /// Switch the selected app tab
    SelectApp(String),
}

impl Action {
    /// Short name for logs
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Reset { .. } => "reset",
            Self::BeginFetch(_) => "begin_fetch",
            Self::FetchCountsSucceeded(_) => "fetch_counts_succeeded",
            Self::FetchListSucceeded { .. } => "fetch_list_succeeded",
            Self::MarkSeenSucceeded { .. } => "mark_seen_succeeded",
            Self::MarkOneReadSucceeded { .. } => "mark_one_read_succeeded",
            Self::MarkAllReadSucceeded { .. } => "mark_all_read_succeeded",
            Self::Failed(_) => "failed",
            Self::SelectApp(_) => "select_app",
        }
    }
}
