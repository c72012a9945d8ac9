#![cfg(not(target_arch = "wasm32"))]

mod common;

use clap::Parser;

use common::AppHarness;
use qwenht_app::terminal::commands::execute;
use qwenht_app::terminal::Cli;
use qwenht_client::testing::InMemoryBackend;

async fn run(harness: &AppHarness, args: &[&str]) -> anyhow::Result<String> {
    let cli = Cli::try_parse_from(std::iter::once("qwenht").chain(args.iter().copied()))?;
    let mut out = Vec::new();
    execute(&harness.ctx, cli.command, &mut out).await?;
    Ok(String::from_utf8(out)?)
}

#[tokio::test]
async fn login_whoami_logout() {
    let harness = AppHarness::new(InMemoryBackend::new().with_account("alice", "wonderland", &["Admin"]));

    let out = run(&harness, &["login", "-u", "alice", "-p", "wonderland"]).await.unwrap();
    assert_eq!(out.trim(), "Signed in as alice");

    let out = run(&harness, &["whoami"]).await.unwrap();
    assert!(out.starts_with("alice\nroles: Admin\nexpires: "), "{out}");

    run(&harness, &["logout"]).await.unwrap();
    let out = run(&harness, &["whoami"]).await.unwrap();
    assert_eq!(out.trim(), "Not signed in");
}

#[tokio::test]
async fn users_list_prints_requested_page() {
    let harness = AppHarness::signed_in(InMemoryBackend::new().with_users(12), &["Admin"]);

    let out = run(&harness, &["users", "list", "--page", "3", "--sort", "email", "--desc"])
        .await
        .unwrap();

    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 4, "{out}");
    assert!(lines[0].contains("Email▼"), "{out}");
    assert!(lines[1].contains("user02@example.com"), "{out}");
    assert!(lines[2].contains("user01@example.com"), "{out}");
    assert_eq!(lines[3], "page 3 of 3 (12 users)");
}

#[tokio::test]
async fn users_create_get_delete() {
    let harness = AppHarness::signed_in(InMemoryBackend::new(), &["Admin"]);

    let out = run(
        &harness,
        &[
            "users", "create", "--email", "ada@example.com", "--first-name", "Ada",
            "--last-name", "Lovelace", "--role", "Admin", "--role", "User",
        ],
    )
    .await
    .unwrap();
    assert!(out.contains("id:     u-001"), "{out}");

    let out = run(&harness, &["users", "get", "u-001"]).await.unwrap();
    assert!(out.contains("name:   Ada Lovelace"), "{out}");
    assert!(out.contains("roles:  Admin, User"), "{out}");

    let out = run(&harness, &["users", "delete", "u-001"]).await.unwrap();
    assert_eq!(out.trim(), "Deleted u-001");
    assert!(harness.backend.users().is_empty());
}

#[tokio::test]
async fn nav_prints_default_menu_on_failure() {
    let harness = AppHarness::signed_in(InMemoryBackend::new(), &["User"]);
    harness.backend.fail_requests_to("/navigation", 503);

    let out = run(&harness, &["nav"]).await.unwrap();

    assert_eq!(out, "Dashboard /dashboard\nUsers /users\n");
}

#[tokio::test]
async fn route_shows_redirect_chain() {
    let harness = AppHarness::new(InMemoryBackend::new());

    let out = run(&harness, &["route", "/users"]).await.unwrap();

    assert_eq!(out, "/users -> /auth/login\nLogin (/auth/login)\n");
}

#[tokio::test]
async fn api_errors_surface_as_command_errors() {
    let harness = AppHarness::signed_in(InMemoryBackend::new(), &["Admin"]);

    let err = run(&harness, &["users", "get", "u-404"]).await.unwrap_err();

    assert!(err.to_string().contains("Not found"), "{err}");
}

#[tokio::test]
async fn users_list_fails_when_the_page_cannot_load() {
    let harness = AppHarness::signed_in(InMemoryBackend::new().with_users(3), &["Admin"]);
    harness.backend.disconnect_requests_to("/users/paginated");

    let err = run(&harness, &["users", "list"]).await.unwrap_err();

    assert!(err.to_string().contains("could not load users"), "{err}");
}

#[tokio::test]
async fn users_passwd_fails_when_the_server_refuses() {
    let harness = AppHarness::signed_in(InMemoryBackend::new().with_users(1), &["Admin"]);
    harness.backend.fail_requests_to("change-password", 500);
    harness.notifier.answer_prompt(Some("secret1"));
    harness.notifier.answer_prompt(Some("secret1"));

    let err = run(&harness, &["users", "passwd", "u-001"]).await.unwrap_err();

    assert!(err.to_string().contains("password was not changed"), "{err}");
}

#[tokio::test]
async fn users_passwd_succeeds() {
    let harness = AppHarness::signed_in(InMemoryBackend::new().with_users(1), &["Admin"]);
    harness.notifier.answer_prompt(Some("secret1"));
    harness.notifier.answer_prompt(Some("secret1"));

    run(&harness, &["users", "passwd", "u-001"]).await.unwrap();

    let id = qwenht_core::UserId::new("u-001");
    assert_eq!(harness.backend.password_of(&id).as_deref(), Some("secret1"));
}

#[tokio::test]
async fn users_create_without_echoed_body() {
    let harness = AppHarness::signed_in(InMemoryBackend::new().with_no_content_writes(), &["Admin"]);

    let out = run(
        &harness,
        &[
            "users", "create", "--email", "ada@example.com", "--first-name", "Ada",
            "--last-name", "Lovelace", "--role", "Admin",
        ],
    )
    .await
    .unwrap();

    assert_eq!(out.trim(), "Created ada@example.com");
}
