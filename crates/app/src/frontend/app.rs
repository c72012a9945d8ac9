//! Leptos application shell: routing, guards and the private layout.

use chrono::Utc;
use leptos::*;
use leptos_router::*;

use qwenht_auth::LOGIN_ROUTE;
use qwenht_core::NavigationItem;

use crate::AppContext;
use crate::frontend::browser::{self, window_width};
use crate::frontend::pages::{DashboardPage, HomePage, LoginPage, UsersPage};
use crate::routes::{Resolution, Route as Screen};
use crate::views::{FOOTER, NavbarView, SidebarView, is_active, is_mobile};

/// Bumped on every login/logout so guards and greetings re-evaluate.
#[derive(Debug, Clone, Copy)]
pub struct SessionRevision(pub RwSignal<u64>);

/// Main application component.
#[component]
pub fn App() -> impl IntoView {
    let pending = create_rw_signal(None::<String>);
    match browser::context(pending) {
        Ok(ctx) => view! { <Shell ctx=ctx pending=pending/> }.into_view(),
        Err(err) => view! { <p class="fatal">{format!("Cannot start: {err}")}</p> }.into_view(),
    }
}

#[component]
fn Shell(ctx: AppContext, pending: RwSignal<Option<String>>) -> impl IntoView {
    let revision = SessionRevision(create_rw_signal(0));
    let mut changes = ctx.session.subscribe();
    spawn_local(async move {
        while changes.changed().await.is_ok() {
            revision.0.update(|n| *n += 1);
        }
    });

    provide_context(ctx);
    provide_context(revision);

    view! {
        <Router>
            <NavigationBridge pending=pending/>
            <ProgressIndicator/>
            <Routes>
                <Route path="/*any" view=ScreenOutlet/>
            </Routes>
        </Router>
    }
}

/// Performs navigations requested outside the router (the 401 interceptor).
#[component]
fn NavigationBridge(pending: RwSignal<Option<String>>) -> impl IntoView {
    let navigate = use_navigate();
    create_effect(move |_| {
        if let Some(path) = pending.get() {
            pending.set_untracked(None);
            navigate(&path, Default::default());
        }
    });
}

/// Resolves the location through the route table and its guards.
#[component]
fn ScreenOutlet() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let revision = expect_context::<SessionRevision>();
    let location = use_location();
    let navigate = use_navigate();

    let resolution = create_memo(move |_| {
        let _ = revision.0.get();
        crate::routes::Router::resolve(&location.pathname.get(), &ctx.session, Utc::now())
    });

    create_effect(move |_| {
        let landed: Resolution = resolution.get();
        if landed.was_redirected() {
            tracing::debug!(from = %landed.requested, to = landed.path(), "redirect");
            navigate(
                landed.path(),
                NavigateOptions {
                    replace: true,
                    ..Default::default()
                },
            );
        }
    });

    move || match resolution.with(|r| r.route) {
        Screen::Home => view! { <HomePage/> }.into_view(),
        Screen::Login => view! { <LoginPage/> }.into_view(),
        Screen::Dashboard => view! { <PrivateLayout><DashboardPage/></PrivateLayout> }.into_view(),
        Screen::Users => view! { <PrivateLayout><UsersPage/></PrivateLayout> }.into_view(),
    }
}

#[component]
fn ProgressIndicator() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let loading = create_rw_signal(ctx.progress.is_loading());
    let mut changes = ctx.progress.subscribe();
    spawn_local(async move {
        while changes.changed().await.is_ok() {
            let value = *changes.borrow_and_update();
            loading.set(value);
        }
    });

    view! {
        <Show when=move || loading.get() fallback=|| ()>
            <div class="progress-bar"></div>
        </Show>
    }
}

#[component]
fn PrivateLayout(children: Children) -> impl IntoView {
    let sidebar = create_rw_signal(SidebarView::default());
    let resize = window_event_listener(ev::resize, move |_| {
        sidebar.update(|s| s.on_resize(window_width()));
    });
    on_cleanup(move || resize.remove());

    view! {
        <div class="layout">
            <Sidebar sidebar=sidebar/>
            <div class="layout-main">
                <Navbar sidebar=sidebar/>
                <main class="layout-content">{children()}</main>
                <footer class="layout-footer">
                    <p>{FOOTER}</p>
                </footer>
            </div>
        </div>
    }
}

#[component]
fn Navbar(sidebar: RwSignal<SidebarView>) -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let revision = expect_context::<SessionRevision>();
    let navbar = store_value(NavbarView::new(ctx));
    let greeting = move || {
        let _ = revision.0.get();
        navbar.with_value(NavbarView::greeting)
    };

    view! {
        <header class="navbar">
            <Show when=move || is_mobile(window_width()) fallback=|| ()>
                <button class="menu-button" on:click=move |_| sidebar.update(SidebarView::toggle)>
                    "☰"
                </button>
            </Show>
            <span class="spacer"></span>
            {move || match greeting() {
                Some(text) => view! {
                    <span class="user-info">{text}</span>
                    <button on:click=move |_| navbar.with_value(NavbarView::logout)>"Logout"</button>
                }
                .into_view(),
                None => view! { <A href=LOGIN_ROUTE>"Login"</A> }.into_view(),
            }}
        </header>
    }
}

#[component]
fn Sidebar(sidebar: RwSignal<SidebarView>) -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let location = use_location();

    let navigation = ctx.navigation.clone();
    spawn_local(async move {
        let items = SidebarView::fetch(&navigation).await;
        sidebar.update(|s| s.set_items(items));
    });

    view! {
        <nav class="sidebar" class:open=move || sidebar.with(SidebarView::is_open)>
            <div class="sidebar-header">
                <h4>"Navigation"</h4>
            </div>
            <ul class="nav">
                {move || {
                    sidebar
                        .with(|s| s.items().to_vec())
                        .into_iter()
                        .map(|item| menu_entry(item, sidebar, location.pathname))
                        .collect_view()
                }}
            </ul>
        </nav>
    }
}

fn menu_entry(item: NavigationItem, sidebar: RwSignal<SidebarView>, path: Memo<String>) -> View {
    let route = item.route.clone();
    let link_class = {
        let route = route.clone();
        move || {
            if path.with(|p| is_active(p, &route)) {
                "nav-link active"
            } else {
                "nav-link"
            }
        }
    };
    let children = item.has_children().then(|| item.children.clone());
    let icon = item.icon.clone().unwrap_or_default();
    let name = item.name.clone();

    view! {
        <li class="nav-item">
            <a
                class=link_class
                href=route
                on:click=move |_| sidebar.update(|s| s.on_navigate(&item, window_width()))
            >
                <i class=format!("nav-icon {icon}")></i>
                <span>{name}</span>
            </a>
            {children
                .map(|children| {
                    view! {
                        <ul class="nav sub-menu">
                            {children
                                .into_iter()
                                .map(|child| menu_entry(child, sidebar, path))
                                .collect_view()}
                        </ul>
                    }
                })}
        </li>
    }
    .into_view()
}
