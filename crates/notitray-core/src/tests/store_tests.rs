//! Tests for the notification state transitions
//!
//! These drive `NotificationState::apply` / `reduce` directly, without a
//! coordinator or API in between.

use super::fixtures::{fixed_now, make_counts_payload, make_notification, make_notifications};
use crate::store::{Action, NotificationState, Operation, reduce};
use chrono::Duration;
use notitray_types::{CountsPayload, Notification, NotificationStatus, PaginationMeta};
use std::collections::BTreeMap;

fn meta(count: u64, num_pages: u32, current_page: u32) -> PaginationMeta {
    PaginationMeta {
        count,
        num_pages,
        current_page,
    }
}

fn list_loaded(state: &mut NotificationState, app_name: &str, count: u64) {
    state.apply(Action::FetchListSucceeded {
        app_name: app_name.to_string(),
        items: make_notifications(count, app_name),
        meta: meta(10, 2, 1),
    });
}

#[test]
fn test_initial_state() {
    let state = NotificationState::default();

    assert_eq!(state.notification_status, NotificationStatus::Idle);
    assert_eq!(state.app_name, "discussions");
    assert!(state.apps_id.is_empty());
    assert!(state.apps.is_empty());
    assert!(state.notifications.is_empty());
    assert!(state.tabs_count.is_empty());
    assert!(!state.show_notification_tray);
    assert_eq!(state.pagination.count, 10);
    assert_eq!(state.pagination.num_pages, 1);
    assert_eq!(state.pagination.current_page, 1);
    assert!(state.pagination.next_page.is_none());
}

#[test]
fn test_begin_fetch_only_sets_pending() {
    let mut state = NotificationState::default();
    list_loaded(&mut state, "discussions", 2);
    let before = state.clone();

    state.apply(Action::BeginFetch(Operation::FetchList));

    assert_eq!(state.notification_status, NotificationStatus::Pending);
    state.notification_status = before.notification_status;
    assert_eq!(state, before);
}

#[test]
fn test_counts_replace_tabs_wholesale() {
    let mut state = NotificationState::default();
    state.apply(Action::FetchCountsSucceeded(CountsPayload {
        count: 3,
        count_by_app_name: BTreeMap::from([("legacy".to_string(), 3)]),
    }));
    state.apply(Action::FetchCountsSucceeded(make_counts_payload()));

    assert_eq!(state.tabs_count.get("legacy"), None);
    assert_eq!(state.tabs_count.total(), 25);
    assert_eq!(state.tabs_count.get("reminders"), Some(10));
    assert_eq!(state.tabs_count.get("discussions"), Some(0));
    assert_eq!(state.tabs_count.get("grades"), Some(10));
    assert_eq!(state.tabs_count.get("authoring"), Some(5));
    assert_eq!(state.tabs_count.len(), 5);
    assert!(state.show_notification_tray);
    assert_eq!(state.notification_status, NotificationStatus::Successful);
}

#[test]
fn test_tray_hidden_when_all_counts_zero() {
    let mut state = NotificationState::default();
    state.apply(Action::FetchCountsSucceeded(make_counts_payload()));
    assert!(state.show_notification_tray);

    state.apply(Action::FetchCountsSucceeded(CountsPayload {
        count: 0,
        count_by_app_name: BTreeMap::from([
            ("discussions".to_string(), 0),
            ("grades".to_string(), 0),
        ]),
    }));
    assert!(!state.show_notification_tray);
}

#[test]
fn test_counts_seed_apps_and_keep_loaded_ids() {
    let mut state = NotificationState::default();
    list_loaded(&mut state, "discussions", 2);
    state.apply(Action::FetchCountsSucceeded(make_counts_payload()));

    assert_eq!(
        state.apps_id,
        vec!["authoring", "discussions", "grades", "reminders"]
    );
    assert_eq!(state.apps["discussions"], vec![1, 2]);
    assert!(state.apps["grades"].is_empty());
    assert_eq!(state.apps.len(), 4);
}

#[test]
fn test_list_success_populates_entities() {
    let mut state = NotificationState::default();
    state.apply(Action::SelectApp("grades".to_string()));
    list_loaded(&mut state, "discussions", 2);

    assert_eq!(state.notifications.len(), 2);
    assert_eq!(state.apps["discussions"].len(), 2);
    assert_eq!(state.app_name, "discussions");
    assert_eq!(state.pagination.count, 10);
    assert_eq!(state.pagination.current_page, 1);
    assert_eq!(state.pagination.num_pages, 2);
    assert_eq!(state.pagination.next_page, Some(2));
    assert_eq!(state.notification_status, NotificationStatus::Successful);
}

#[test]
fn test_list_pages_merge_without_duplicates() {
    let mut state = NotificationState::default();
    list_loaded(&mut state, "discussions", 3);

    let mut second_page = vec![make_notification(3, "discussions")];
    second_page.extend((4..=5).map(|id| make_notification(id, "discussions")));
    state.apply(Action::FetchListSucceeded {
        app_name: "discussions".to_string(),
        items: second_page,
        meta: meta(5, 2, 2),
    });

    assert_eq!(state.apps["discussions"], vec![1, 2, 3, 4, 5]);
    assert_eq!(state.notifications.len(), 5);
    assert_eq!(state.pagination.current_page, 2);
    assert!(state.pagination.next_page.is_none());
}

#[test]
fn test_list_overwrites_existing_entity() {
    let mut state = NotificationState::default();
    list_loaded(&mut state, "discussions", 1);

    let mut updated = make_notification(1, "discussions");
    updated.content = "<p>edited</p>".to_string();
    state.apply(Action::FetchListSucceeded {
        app_name: "discussions".to_string(),
        items: vec![updated],
        meta: meta(1, 1, 1),
    });

    assert_eq!(state.notifications[&1].content, "<p>edited</p>");
    assert_eq!(state.apps["discussions"], vec![1]);
}

#[test]
fn test_mark_one_read_targets_single_notification() {
    let mut state = NotificationState::default();
    list_loaded(&mut state, "discussions", 3);

    state.apply(Action::MarkOneReadSucceeded {
        app_name: "discussions".to_string(),
        notification_id: 2,
        timestamp: fixed_now(),
    });

    assert_eq!(state.notifications[&2].last_read, Some(fixed_now()));
    assert!(!state.notifications[&1].is_read());
    assert!(!state.notifications[&3].is_read());
    assert_eq!(state.unread_count("discussions"), 2);
    assert_eq!(state.notification_status, NotificationStatus::Successful);
}

#[test]
fn test_mark_one_read_unknown_id_is_noop() {
    let mut state = NotificationState::default();
    list_loaded(&mut state, "discussions", 2);
    let before = state.notifications.clone();

    state.apply(Action::MarkOneReadSucceeded {
        app_name: "discussions".to_string(),
        notification_id: 99,
        timestamp: fixed_now(),
    });

    assert_eq!(state.notifications, before);
    assert_eq!(state.notification_status, NotificationStatus::Successful);
}

#[test]
fn test_mark_all_read_only_touches_app() {
    let mut state = NotificationState::default();
    list_loaded(&mut state, "discussions", 2);
    state.apply(Action::FetchListSucceeded {
        app_name: "grades".to_string(),
        items: vec![make_notification(10, "grades")],
        meta: meta(1, 1, 1),
    });

    state.apply(Action::MarkAllReadSucceeded {
        app_name: "discussions".to_string(),
        timestamp: fixed_now(),
    });

    let mut discussions = state.app_notifications("discussions");
    assert!(discussions.all(Notification::is_read));
    assert!(!state.notifications[&10].is_read());
    assert_eq!(state.unread_count("grades"), 1);
}

#[test]
fn test_mark_all_read_twice_keeps_everything_read() {
    let mut state = NotificationState::default();
    list_loaded(&mut state, "discussions", 4);

    let once = reduce(
        state.clone(),
        Action::MarkAllReadSucceeded {
            app_name: "discussions".to_string(),
            timestamp: fixed_now(),
        },
    );
    let twice = reduce(
        once.clone(),
        Action::MarkAllReadSucceeded {
            app_name: "discussions".to_string(),
            timestamp: fixed_now() + Duration::seconds(5),
        },
    );

    assert_eq!(once.unread_count("discussions"), 0);
    assert_eq!(twice.unread_count("discussions"), 0);
    assert_eq!(once.apps, twice.apps);
    assert_eq!(once.notification_status, twice.notification_status);
    assert_eq!(
        twice.notifications[&1].last_read,
        Some(fixed_now() + Duration::seconds(5))
    );
}

#[test]
fn test_mark_seen_keeps_first_seen_time() {
    let mut state = NotificationState::default();
    list_loaded(&mut state, "discussions", 2);
    let earlier = fixed_now() - Duration::hours(1);
    state.notifications.get_mut(&1).unwrap().last_seen = Some(earlier);

    state.apply(Action::MarkSeenSucceeded {
        app_name: "discussions".to_string(),
        timestamp: fixed_now(),
    });

    assert_eq!(state.notifications[&1].last_seen, Some(earlier));
    assert_eq!(state.notifications[&2].last_seen, Some(fixed_now()));
    assert!(!state.notifications[&2].is_read());
    assert_eq!(state.notification_status, NotificationStatus::Successful);
}

#[test]
fn test_failed_only_changes_status() {
    let mut state = NotificationState::default();
    state.apply(Action::FetchCountsSucceeded(make_counts_payload()));
    list_loaded(&mut state, "discussions", 2);
    let before = state.clone();

    state.apply(Action::BeginFetch(Operation::MarkAllRead));
    state.apply(Action::Failed(Operation::MarkAllRead));

    assert_eq!(state.notification_status, NotificationStatus::Failed);
    state.notification_status = before.notification_status;
    assert_eq!(state, before);
}

#[test]
fn test_reset_clears_everything() {
    let mut state = NotificationState::default();
    state.apply(Action::FetchCountsSucceeded(make_counts_payload()));
    list_loaded(&mut state, "discussions", 2);
    state.apply(Action::SelectApp("grades".to_string()));

    let state = reduce(
        state,
        Action::Reset {
            default_app: "discussions".to_string(),
        },
    );

    assert_eq!(state, NotificationState::default());
}

#[test]
fn test_select_app_changes_only_selection() {
    let mut state = NotificationState::default();
    list_loaded(&mut state, "discussions", 2);
    let before = state.clone();

    state.apply(Action::SelectApp("reminders".to_string()));

    assert_eq!(state.app_name, "reminders");
    assert_eq!(state.notification_status, before.notification_status);
    assert_eq!(state.notifications, before.notifications);
    assert_eq!(state.pagination, before.pagination);
    assert_eq!(state.selected_notifications().count(), 0);
}

#[test]
fn test_apps_index_references_existing_notifications() {
    let mut state = NotificationState::default();
    state.apply(Action::FetchCountsSucceeded(make_counts_payload()));
    list_loaded(&mut state, "discussions", 3);
    state.apply(Action::MarkAllReadSucceeded {
        app_name: "discussions".to_string(),
        timestamp: fixed_now(),
    });

    for ids in state.apps.values() {
        for id in ids {
            assert!(state.notifications.contains_key(id));
        }
        let mut unique = ids.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), ids.len());
    }
}
