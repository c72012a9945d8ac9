mod common;

use chrono::Utc;

use common::AppHarness;
use qwenht_app::views::{DashboardView, LoginForm, LoginView, NavbarView, RegisterForm, SidebarView};
use qwenht_app::{Route, Router};
use qwenht_client::Method;
use qwenht_client::testing::InMemoryBackend;
use qwenht_core::NavigationItem;

#[tokio::test]
async fn after_a_401_guarded_routes_lead_to_login() {
    let harness = AppHarness::signed_in(InMemoryBackend::new().with_users(2), &["Admin"]);
    assert_eq!(
        Router::resolve("/users", &harness.ctx.session, Utc::now()).route,
        Route::Users
    );

    harness.backend.revoke_all_tokens();
    let result = harness.ctx.users.list().await;
    assert!(result.is_err());

    assert_eq!(harness.ctx.session.token(), None);
    let landed = Router::resolve("/users", &harness.ctx.session, Utc::now());
    assert_eq!(landed.route, Route::Login);
    assert_eq!(landed.path(), "/auth/login");
}

#[tokio::test]
async fn login_navigates_to_dashboard() {
    let harness = AppHarness::new(InMemoryBackend::new().with_account("alice", "wonderland", &["Admin"]));
    let login = LoginView::new(harness.ctx.clone());

    login
        .submit(&LoginForm::new("alice", "wonderland"))
        .await
        .unwrap();

    assert!(harness.ctx.session.is_authenticated());
    assert_eq!(harness.navigator.last().as_deref(), Some("/dashboard"));
    assert!(harness.notifier.alerts().is_empty());

    let dashboard = DashboardView::from_context(&harness.ctx);
    assert_eq!(dashboard.greeting(), "Welcome, alice");
    assert_eq!(dashboard.role_summary(), "Admin");
    assert!(dashboard.is_admin);
    assert_eq!(
        Router::resolve("/home", &harness.ctx.session, Utc::now()).route,
        Route::Dashboard
    );
}

#[tokio::test]
async fn bad_credentials_alert() {
    let harness = AppHarness::new(InMemoryBackend::new().with_account("alice", "wonderland", &[]));
    let login = LoginView::new(harness.ctx.clone());

    let result = login.submit(&LoginForm::new("alice", "guess")).await;

    assert!(result.is_err());
    assert!(!harness.ctx.session.is_authenticated());
    assert_eq!(
        harness.notifier.last_alert().as_deref(),
        Some("Login failed: Invalid username or password")
    );
}

#[tokio::test]
async fn empty_login_form_is_not_sent() {
    let harness = AppHarness::new(InMemoryBackend::new());
    let login = LoginView::new(harness.ctx.clone());

    assert!(login.submit(&LoginForm::new("", "x")).await.is_err());

    assert!(harness.backend.requests().is_empty());
    assert_eq!(harness.notifier.last_alert().as_deref(), Some("Username is required"));
}

#[tokio::test]
async fn registration_then_login() {
    let harness = AppHarness::new(InMemoryBackend::new());
    let login = LoginView::new(harness.ctx.clone());
    let form = RegisterForm {
        first_name: "Ada".into(),
        last_name: "Lovelace".into(),
        email: "ada@example.com".into(),
        password: "engine1".into(),
        confirm_password: "engine1".into(),
        role: None,
    };

    login.register(&form).await.unwrap();
    assert_eq!(harness.navigator.last().as_deref(), Some("/auth/login"));

    login
        .submit(&LoginForm::new("ada@example.com", "engine1"))
        .await
        .unwrap();
    assert_eq!(harness.ctx.session.user_name(), "ada@example.com");
}

#[tokio::test]
async fn sidebar_falls_back_to_two_entries() {
    let harness = AppHarness::signed_in(InMemoryBackend::new(), &["User"]);
    harness.backend.fail_requests_to("/navigation/user", 500);

    let mut sidebar = SidebarView::default();
    sidebar.load(&harness.ctx.navigation).await;

    let names: Vec<&str> = sidebar.items().iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, ["Dashboard", "Users"]);
    assert_eq!(sidebar.items()[0].icon.as_deref(), Some("fa fa-tachometer-alt"));
    assert_eq!(sidebar.items()[1].icon.as_deref(), Some("fa fa-users"));
}

#[tokio::test]
async fn sidebar_loads_server_menu_once() {
    let menu = vec![
        NavigationItem::root(10, "Reports", "/reports"),
        NavigationItem::root(11, "Users", "/users"),
    ];
    let harness = AppHarness::signed_in(InMemoryBackend::new().with_navigation(menu), &["Admin"]);

    let mut first = SidebarView::default();
    first.load(&harness.ctx.navigation).await;
    let mut second = SidebarView::default();
    second.load(&harness.ctx.navigation).await;

    assert_eq!(first.items().len(), 2);
    assert_eq!(first, second);
    assert_eq!(
        harness.backend.count_requests(Method::Get, "/navigation/user"),
        1
    );
}

#[tokio::test]
async fn navbar_logout_clears_session_and_menu() {
    let harness = AppHarness::signed_in(InMemoryBackend::new(), &["User"]);
    harness.ctx.navigation.user_navigation().await.unwrap();
    let navbar = NavbarView::new(harness.ctx.clone());
    assert_eq!(navbar.greeting().as_deref(), Some("Welcome, alice"));
    assert_eq!(navbar.login_link(), None);

    navbar.logout();

    assert!(!harness.ctx.session.is_authenticated());
    assert!(!harness.ctx.navigation.is_cached());
    assert_eq!(navbar.greeting(), None);
    assert_eq!(navbar.login_link(), Some("/auth/login"));
    assert_eq!(harness.navigator.last().as_deref(), Some("/auth/login"));
}
