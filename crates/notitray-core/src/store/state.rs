use super::Action;
use notitray_types::{
    CountsPayload, DEFAULT_APP_NAME, Notification, NotificationId, NotificationStatus, Pagination,
    PaginationMeta, TabCounts,
};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// Normalized notification session state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationState {
    /// Outcome of the most recently completed operation
    pub notification_status: NotificationStatus,

    /// Currently selected app
    pub app_name: String,

    /// App names known from the last counts fetch
    pub apps_id: Vec<String>,

    /// Ordered notification ids per app
    pub apps: BTreeMap<String, Vec<NotificationId>>,

    pub notifications: BTreeMap<NotificationId, Notification>,

    pub tabs_count: TabCounts,

    pub show_notification_tray: bool,

    pub pagination: Pagination,
}

impl Default for NotificationState {
    fn default() -> Self {
        Self::new(DEFAULT_APP_NAME)
    }
}

impl NotificationState {
    #[must_use]
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            notification_status: NotificationStatus::Idle,
            app_name: app_name.into(),
            apps_id: Vec::new(),
            apps: BTreeMap::new(),
            notifications: BTreeMap::new(),
            tabs_count: TabCounts::default(),
            show_notification_tray: false,
            pagination: Pagination::default(),
        }
    }

    /// Apply one transition in place
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Reset { default_app } => *self = Self::new(default_app),
            Action::BeginFetch(_) => self.notification_status = NotificationStatus::Pending,
            Action::FetchCountsSucceeded(payload) => self.counts_loaded(&payload),
            Action::FetchListSucceeded {
                app_name,
                items,
                meta,
            } => self.list_loaded(app_name, items, meta),
            Action::MarkSeenSucceeded {
                app_name,
                timestamp,
            } => {
                self.for_app_mut(&app_name, |notification| {
                    if notification.last_seen.is_none() {
                        notification.last_seen = Some(timestamp);
                    }
                });
                self.notification_status = NotificationStatus::Successful;
            }
            Action::MarkOneReadSucceeded {
                notification_id,
                timestamp,
                ..
            } => {
                if let Some(notification) = self.notifications.get_mut(&notification_id) {
                    notification.last_read = Some(timestamp);
                }
                self.notification_status = NotificationStatus::Successful;
            }
            Action::MarkAllReadSucceeded {
                app_name,
                timestamp,
            } => {
                self.for_app_mut(&app_name, |notification| {
                    notification.last_read = Some(timestamp);
                });
                self.notification_status = NotificationStatus::Successful;
            }
            Action::Failed(_) => self.notification_status = NotificationStatus::Failed,
            Action::SelectApp(app_name) => self.app_name = app_name,
        }
    }

    fn counts_loaded(&mut self, payload: &CountsPayload) {
        self.tabs_count = TabCounts::from_payload(payload);
        self.show_notification_tray = self.tabs_count.any_unread();
        self.apps_id = payload.app_names().map(str::to_string).collect();
        for app in &self.apps_id {
            self.apps.entry(app.clone()).or_default();
        }
        self.notification_status = NotificationStatus::Successful;
    }

    fn list_loaded(&mut self, app_name: String, items: Vec<Notification>, meta: PaginationMeta) {
        let ids = self.apps.entry(app_name.clone()).or_default();
        let mut known: HashSet<NotificationId> = ids.iter().copied().collect();

        for item in items {
            if known.insert(item.id) {
                ids.push(item.id);
            }
            self.notifications.insert(item.id, item);
        }

        self.app_name = app_name;
        self.pagination = Pagination::from_meta(meta);
        self.notification_status = NotificationStatus::Successful;
    }

    fn for_app_mut(&mut self, app_name: &str, mut f: impl FnMut(&mut Notification)) {
        let Some(ids) = self.apps.get(app_name) else {
            return;
        };
        for id in ids {
            if let Some(notification) = self.notifications.get_mut(id) {
                f(notification);
            }
        }
    }

    /// Notifications of one app, in list order
    pub fn app_notifications<'a>(
        &'a self,
        app_name: &str,
    ) -> impl Iterator<Item = &'a Notification> + use<'a> {
        self.apps
            .get(app_name)
            .into_iter()
            .flatten()
            .filter_map(|id| self.notifications.get(id))
    }

    /// Notifications of the selected app
    pub fn selected_notifications(&self) -> impl Iterator<Item = &Notification> {
        self.app_notifications(&self.app_name)
    }

    #[must_use]
    pub fn unread_count(&self, app_name: &str) -> usize {
        self.app_notifications(app_name)
            .filter(|n| !n.is_read())
            .count()
    }

    #[must_use]
    pub fn notification(&self, id: NotificationId) -> Option<&Notification> {
        self.notifications.get(&id)
    }
}

/// Pure transition: `(state, action) -> next state`
#[must_use]
pub fn reduce(mut state: NotificationState, action: Action) -> NotificationState {
    state.apply(action);
    state
}
