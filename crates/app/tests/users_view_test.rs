mod common;

use common::AppHarness;
use qwenht_app::views::users::{
    CONFIRM_DELETE, LOAD_FAILED, PASSWORD_TOO_SHORT, PASSWORDS_DIFFER, SELECT_TO_CHANGE_PASSWORD,
    SELECT_TO_EDIT, UPDATE_FAILED,
};
use qwenht_app::views::{UserForm, UsersView};
use qwenht_client::Method;
use qwenht_client::testing::InMemoryBackend;
use qwenht_core::UserId;

fn admin_view(users: usize) -> (AppHarness, UsersView) {
    let harness = AppHarness::signed_in(InMemoryBackend::new().with_users(users), &["Admin"]);
    let view = UsersView::new(harness.ctx.clone());
    (harness, view)
}

fn emails(view: &UsersView) -> Vec<String> {
    view.snapshot().users.into_iter().map(|u| u.email).collect()
}

#[tokio::test]
async fn second_page_of_twelve_holds_rows_six_to_ten() {
    let (harness, view) = admin_view(12);

    view.change_page(1, 5).await;

    let state = view.snapshot();
    assert_eq!(
        emails(&view),
        (6..=10).map(|n| format!("user{n:02}@example.com")).collect::<Vec<_>>()
    );
    assert_eq!(state.total_users, 12);
    assert_eq!(state.total_pages(), 3);
    assert_eq!(state.selected.unwrap().email, "user06@example.com");

    let url = harness.last_paginated_url().unwrap();
    assert!(url.contains("page=2"), "{url}");
    assert!(url.contains("pageSize=5"), "{url}");
    assert!(view.snapshot().is_admin);
}

#[tokio::test]
async fn sorting_one_column_cycles_through_three_states() {
    let (harness, view) = admin_view(7);
    view.change_page(1, 5).await;

    view.sort("email").await;
    let url = harness.last_paginated_url().unwrap();
    assert!(url.contains("sortField=email") && url.contains("sortDirection=asc"), "{url}");
    assert!(url.contains("page=1"), "sorting goes back to the first page: {url}");
    assert_eq!(emails(&view)[0], "user01@example.com");

    view.sort("email").await;
    let url = harness.last_paginated_url().unwrap();
    assert!(url.contains("sortDirection=desc"), "{url}");
    assert_eq!(emails(&view)[0], "user07@example.com");

    view.sort("email").await;
    let url = harness.last_paginated_url().unwrap();
    assert!(!url.contains("sortField") && !url.contains("sortDirection"), "{url}");
}

#[tokio::test]
async fn delete_reissues_page_query_and_drops_row() {
    let (harness, view) = admin_view(12);
    view.change_page(1, 5).await;
    let before = harness.backend.count_requests(Method::Get, "/users/paginated");

    view.select(1);
    let doomed = view.snapshot().selected.unwrap();
    view.delete().await;

    assert_eq!(harness.notifier.questions(), vec![CONFIRM_DELETE.to_string()]);
    assert_eq!(harness.backend.count_requests(Method::Delete, "/users/"), 1);
    assert_eq!(
        harness.backend.count_requests(Method::Get, "/users/paginated"),
        before + 1
    );
    let url = harness.last_paginated_url().unwrap();
    assert!(url.contains("page=2"), "{url}");

    let state = view.snapshot();
    assert!(!state.users.iter().any(|u| u.id == doomed.id));
    assert_eq!(state.total_users, 11);
    assert_eq!(emails(&view)[0], "user06@example.com");
    assert_eq!(emails(&view)[4], "user11@example.com");
}

#[tokio::test]
async fn declined_delete_sends_nothing() {
    let (harness, view) = admin_view(3);
    view.load().await;
    harness.notifier.answer_confirm(false);

    view.delete().await;

    assert_eq!(harness.backend.count_requests(Method::Delete, "/users/"), 0);
    assert_eq!(view.snapshot().users.len(), 3);
}

#[tokio::test]
async fn load_failure_empties_table_and_alerts() {
    let (harness, view) = admin_view(6);
    view.load().await;
    assert_eq!(view.snapshot().users.len(), 5);

    harness.backend.fail_requests_to("/users/paginated", 500);
    view.load().await;

    let state = view.snapshot();
    assert!(state.users.is_empty());
    assert_eq!(state.total_users, 0);
    assert!(state.selected.is_none());
    assert_eq!(harness.notifier.alerts(), vec![LOAD_FAILED.to_string()]);
    assert!(!harness.ctx.progress.is_loading());
}

#[tokio::test]
async fn try_load_hands_back_the_error_without_alerting() {
    let (harness, view) = admin_view(3);
    harness.backend.fail_requests_to("/users/paginated", 500);

    let err = view.try_load().await.unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert!(view.snapshot().users.is_empty());
    assert!(harness.notifier.alerts().is_empty());
}

#[tokio::test]
async fn unauthorized_load_signs_out() {
    let (harness, view) = admin_view(3);
    harness.backend.revoke_all_tokens();

    view.load().await;

    assert!(!harness.ctx.session.is_authenticated());
    assert_eq!(harness.navigator.last().as_deref(), Some("/auth/login"));
    assert_eq!(harness.notifier.last_alert().as_deref(), Some(LOAD_FAILED));
}

#[tokio::test]
async fn edit_and_save_updates_then_reloads() {
    let (harness, view) = admin_view(3);
    view.load().await;

    view.edit();
    view.update(|s| s.form.first_name = "Grace".into());
    assert!(!view.select(2), "selection is frozen while editing");
    view.save().await;

    let stored = harness
        .backend
        .users()
        .into_iter()
        .find(|u| u.id == Some(UserId::new("u-001")))
        .unwrap();
    assert_eq!(stored.first_name, "Grace");
    assert!(stored.is_active);

    let state = view.snapshot();
    assert!(!state.is_editing);
    assert_eq!(state.users[0].first_name, "Grace");
    assert_eq!(state.selected.unwrap().first_name, "Grace");
}

#[tokio::test]
async fn save_accepts_an_empty_success_response() {
    let harness = AppHarness::signed_in(
        InMemoryBackend::new().with_users(3).with_no_content_writes(),
        &["Admin"],
    );
    let view = UsersView::new(harness.ctx.clone());
    view.load().await;

    view.edit();
    view.update(|s| s.form.last_name = "Hopper".into());
    view.save().await;

    assert!(harness.notifier.alerts().is_empty(), "{:?}", harness.notifier.alerts());
    let state = view.snapshot();
    assert!(!state.is_editing);
    assert_eq!(state.users[0].last_name, "Hopper");

    view.add();
    view.update(|s| {
        s.form = UserForm {
            email: "grace@example.com".into(),
            first_name: "Grace".into(),
            last_name: "Hopper".into(),
            roles: vec!["User".into()],
        }
    });
    view.save().await;

    assert!(harness.notifier.alerts().is_empty());
    assert_eq!(view.snapshot().total_users, 4);
}

#[tokio::test]
async fn add_creates_a_user() {
    let (harness, view) = admin_view(2);
    view.load().await;

    view.add();
    view.update(|s| {
        s.form = UserForm {
            email: "grace@example.com".into(),
            first_name: "Grace".into(),
            last_name: "Hopper".into(),
            roles: vec!["Admin".into()],
        }
    });
    view.save().await;

    assert!(harness.backend.users().iter().any(|u| u.email == "grace@example.com"));
    assert_eq!(view.snapshot().total_users, 3);
    assert_eq!(harness.backend.count_requests(Method::Post, "/users"), 1);
}

#[tokio::test]
async fn invalid_form_is_not_sent() {
    let (harness, view) = admin_view(1);
    view.load().await;

    view.add();
    view.update(|s| s.form.email = "nope".into());
    view.save().await;

    assert_eq!(harness.backend.count_requests(Method::Post, "/users"), 0);
    assert!(view.snapshot().is_editing);
}

#[tokio::test]
async fn failed_update_alerts_and_keeps_form_open() {
    let (harness, view) = admin_view(2);
    view.load().await;
    view.edit();
    harness.backend.fail_requests_to("/users/u-001", 500);

    view.save().await;

    assert_eq!(harness.notifier.last_alert().as_deref(), Some(UPDATE_FAILED));
    assert!(view.snapshot().is_editing);
}

#[tokio::test]
async fn cancel_leaves_edit_mode_and_reloads() {
    let (harness, view) = admin_view(2);
    view.load().await;
    view.edit();
    let before = harness.backend.count_requests(Method::Get, "/users/paginated");

    view.cancel().await;

    assert!(!view.snapshot().is_editing);
    assert_eq!(
        harness.backend.count_requests(Method::Get, "/users/paginated"),
        before + 1
    );
}

#[tokio::test]
async fn actions_without_selection_alert() {
    let (harness, view) = admin_view(0);
    view.load().await;

    view.edit();
    view.change_password().await;

    assert_eq!(
        harness.notifier.alerts(),
        vec![SELECT_TO_EDIT.to_string(), SELECT_TO_CHANGE_PASSWORD.to_string()]
    );
}

#[tokio::test]
async fn change_password_checks_length_then_match() {
    let (harness, view) = admin_view(1);
    view.load().await;

    harness.notifier.answer_prompt(Some("12345"));
    view.change_password().await;
    assert_eq!(harness.notifier.last_alert().as_deref(), Some(PASSWORD_TOO_SHORT));

    harness.notifier.answer_prompt(Some("secret1"));
    harness.notifier.answer_prompt(Some("secret2"));
    view.change_password().await;
    assert_eq!(harness.notifier.last_alert().as_deref(), Some(PASSWORDS_DIFFER));

    assert_eq!(
        harness.backend.count_requests(Method::Post, "change-password"),
        0
    );
}

#[tokio::test]
async fn change_password_success() {
    let (harness, view) = admin_view(1);
    view.load().await;

    harness.notifier.answer_prompt(Some("secret1"));
    harness.notifier.answer_prompt(Some("secret1"));
    assert!(view.change_password().await);

    assert_eq!(
        harness.notifier.questions(),
        vec![
            "Enter new password for User 01:".to_string(),
            "Confirm new password:".to_string()
        ]
    );
    assert_eq!(
        harness.notifier.last_alert().as_deref(),
        Some("Password changed successfully for User 01")
    );
    assert_eq!(
        harness.backend.password_of(&UserId::new("u-001")).as_deref(),
        Some("secret1")
    );
}

#[tokio::test]
async fn cancelled_prompt_does_nothing() {
    let (harness, view) = admin_view(1);
    view.load().await;

    assert!(!view.change_password().await);

    assert!(harness.notifier.alerts().is_empty());
    assert_eq!(harness.notifier.questions().len(), 1);
}

#[tokio::test]
async fn search_filters_and_clear_restores() {
    let (harness, view) = admin_view(12);

    view.search("user1").await;
    assert_eq!(view.snapshot().total_users, 3);
    let url = harness.last_paginated_url().unwrap();
    assert!(url.contains("searchTerm=user1"), "{url}");

    view.clear_search().await;
    assert_eq!(view.snapshot().total_users, 12);
    assert!(!harness.last_paginated_url().unwrap().contains("searchTerm"));
}
