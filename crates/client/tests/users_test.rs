mod common;

use common::Harness;
use qwenht_client::testing::InMemoryBackend;
use qwenht_client::{ChangePasswordRequest, ClientError, Method};
use qwenht_core::{PageRequest, SortDirection, SortState, User, UserId};

fn new_user(email: &str) -> User {
    User {
        id: None,
        email: email.to_string(),
        first_name: "Dana".to_string(),
        last_name: "Scully".to_string(),
        roles: vec!["User".to_string()],
        is_active: true,
    }
}

#[tokio::test]
async fn second_page_of_twelve_users() {
    let h = Harness::signed_in(InMemoryBackend::new().with_users(12), &[]);

    let page = h.users().paginated(&PageRequest::new(2, 5)).await.unwrap();

    let emails: Vec<&str> = page.data.iter().map(|u| u.email.as_str()).collect();
    assert_eq!(
        emails,
        [
            "user06@example.com",
            "user07@example.com",
            "user08@example.com",
            "user09@example.com",
            "user10@example.com",
        ]
    );
    assert_eq!(page.total_count, 12);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.current_page, 2);
}

#[tokio::test]
async fn query_string_carries_sort_and_search() {
    let h = Harness::signed_in(InMemoryBackend::new().with_users(12), &[]);
    let request = PageRequest::new(1, 5)
        .sorted(SortState::by("lastName", SortDirection::Desc))
        .search("user1");

    let page = h.users().paginated(&request).await.unwrap();

    let url = &h.backend.requests()[0].url;
    assert!(url.contains("/users/paginated?"));
    assert!(url.contains("page=1&pageSize=5"));
    assert!(url.contains("sortField=lastName"));
    assert!(url.contains("sortDirection=desc"));
    assert!(url.contains("searchTerm=user1"));

    let last_names: Vec<&str> = page.data.iter().map(|u| u.last_name.as_str()).collect();
    assert_eq!(last_names, ["12", "11", "10"]);
}

#[tokio::test]
async fn crud_round_trip() {
    let h = Harness::signed_in(InMemoryBackend::new(), &["Admin"]);
    let users = h.users();

    let created = users.create(&new_user("dana@example.com")).await.unwrap().unwrap();
    let id = created.id.clone().unwrap();
    assert_eq!(users.get(&id).await.unwrap().email, "dana@example.com");

    let renamed = User {
        first_name: "Fox".to_string(),
        ..created
    };
    users.update(&id, &renamed).await.unwrap();
    assert_eq!(users.get(&id).await.unwrap().first_name, "Fox");

    users.delete(&id).await.unwrap();
    assert!(users.list().await.unwrap().is_empty());
    assert_eq!(users.get(&id).await.unwrap_err().status(), Some(404));
}

#[tokio::test]
async fn writes_answered_with_no_content_succeed() {
    let h = Harness::signed_in(
        InMemoryBackend::new().with_users(1).with_no_content_writes(),
        &["Admin"],
    );
    let users = h.users();
    let id = UserId::new("u-001");

    let mut user = users.get(&id).await.unwrap();
    user.first_name = "Walter".to_string();
    users.update(&id, &user).await.unwrap();
    assert_eq!(users.get(&id).await.unwrap().first_name, "Walter");

    let created = users.create(&new_user("dana@example.com")).await.unwrap();
    assert_eq!(created, None);
    assert_eq!(users.list().await.unwrap().len(), 2);
}

#[tokio::test]
async fn create_rejects_invalid_form_without_calling_api() {
    let h = Harness::signed_in(InMemoryBackend::new(), &[]);

    let err = h.users().create(&new_user("nope")).await.unwrap_err();

    assert!(matches!(err, ClientError::Validation(_)));
    assert_eq!(h.backend.count_requests(Method::Post, "/users"), 0);
}

#[tokio::test]
async fn change_password_posts_all_three_fields() {
    let h = Harness::signed_in(InMemoryBackend::new().with_users(1), &["Admin"]);
    let id = UserId::new("u-001");

    h.users()
        .change_password(
            &id,
            &ChangePasswordRequest {
                current_password: String::new(),
                new_password: "s3cret!".to_string(),
                confirm_new_password: "s3cret!".to_string(),
            },
        )
        .await
        .unwrap();

    let sent = h.backend.requests();
    assert!(sent[0].url.ends_with("/users/u-001/change-password"));
    let body = sent[0].body.clone().unwrap();
    assert_eq!(body["currentPassword"], "");
    assert_eq!(body["newPassword"], "s3cret!");
    assert_eq!(body["confirmNewPassword"], "s3cret!");
    assert_eq!(h.backend.password_of(&id).as_deref(), Some("s3cret!"));
}

#[tokio::test]
async fn change_password_surfaces_server_message() {
    let h = Harness::signed_in(InMemoryBackend::new().with_users(1), &[]);

    let err = h
        .users()
        .change_password(
            &UserId::new("u-001"),
            &ChangePasswordRequest {
                current_password: String::new(),
                new_password: "abcdef".to_string(),
                confirm_new_password: "abcdeg".to_string(),
            },
        )
        .await
        .unwrap_err();

    assert_eq!(err.user_message(), "Passwords do not match");
}
