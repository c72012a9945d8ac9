//! One component per screen.

use std::rc::Rc;

use leptos::*;
use leptos_router::*;

use crate::AppContext;
use crate::views::users::COLUMNS;
use crate::views::{
    DashboardView, HomeView, LoginForm, LoginView, RegisterForm, UsersState, UsersView,
};

#[component]
pub fn HomePage() -> impl IntoView {
    let home = HomeView;
    view! {
        <div class="container home">
            <div class="hero">
                <h1>{home.title()}</h1>
                <p class="lead">{home.lead()}</p>
                <div class="actions">
                    {home
                        .actions()
                        .into_iter()
                        .map(|(label, href)| view! { <a href=href class="action-button">{label}</a> })
                        .collect_view()}
                </div>
            </div>
            <div class="features">
                {home
                    .features()
                    .iter()
                    .map(|f| {
                        view! {
                            <div class="feature">
                                <h3>{f.title}</h3>
                                <p>{f.text}</p>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let login = store_value(Rc::new(LoginView::new(ctx)));
    let username = create_rw_signal(String::new());
    let password = create_rw_signal(String::new());
    let submitting = create_rw_signal(false);
    let registering = create_rw_signal(false);

    let submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if submitting.get() {
            return;
        }
        submitting.set(true);
        let form = LoginForm::new(username.get(), password.get());
        let login = login.get_value();
        spawn_local(async move {
            let _ = login.submit(&form).await;
            submitting.set(false);
        });
    };

    view! {
        <div class="container login">
            <Show
                when=move || registering.get()
                fallback=move || {
                    view! {
                        <form class="card" on:submit=submit>
                            <h2>"Login"</h2>
                            <label for="username">"Username"</label>
                            <input
                                id="username"
                                type="text"
                                prop:value=move || username.get()
                                on:input=move |ev| username.set(event_target_value(&ev))
                            />
                            <label for="password">"Password"</label>
                            <input
                                id="password"
                                type="password"
                                prop:value=move || password.get()
                                on:input=move |ev| password.set(event_target_value(&ev))
                            />
                            <button type="submit" prop:disabled=move || submitting.get()>
                                "Login"
                            </button>
                            <a href="#" on:click=move |ev| {
                                ev.prevent_default();
                                registering.set(true);
                            }>"Create an account"</a>
                        </form>
                    }
                }
            >
                <RegisterCard login=login registering=registering/>
            </Show>
        </div>
    }
}

#[component]
fn RegisterCard(login: StoredValue<Rc<LoginView>>, registering: RwSignal<bool>) -> impl IntoView {
    let form = create_rw_signal(RegisterForm::default());

    let submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let request = form.get();
        let login = login.get_value();
        spawn_local(async move {
            if login.register(&request).await.is_ok() {
                registering.set(false);
            }
        });
    };

    let field = move |label: &'static str, kind: &'static str, get: fn(&RegisterForm) -> String, set: fn(&mut RegisterForm, String)| {
        view! {
            <label>{label}</label>
            <input
                type=kind
                prop:value=move || form.with(get)
                on:input=move |ev| form.update(|f| set(f, event_target_value(&ev)))
            />
        }
    };

    view! {
        <form class="card" on:submit=submit>
            <h2>"Register"</h2>
            {field("First name", "text", |f| f.first_name.clone(), |f, v| f.first_name = v)}
            {field("Last name", "text", |f| f.last_name.clone(), |f, v| f.last_name = v)}
            {field("Email", "email", |f| f.email.clone(), |f, v| f.email = v)}
            {field("Password", "password", |f| f.password.clone(), |f, v| f.password = v)}
            {field("Confirm password", "password", |f| f.confirm_password.clone(), |f, v| f.confirm_password = v)}
            <button type="submit">"Register"</button>
            <a href="#" on:click=move |ev| {
                ev.prevent_default();
                registering.set(false);
            }>"Back to login"</a>
        </form>
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let dashboard = DashboardView::from_context(&ctx);
    let greeting = dashboard.greeting();
    let roles = dashboard.role_summary();
    let is_admin = dashboard.is_admin;

    view! {
        <div class="dashboard">
            <h2>{greeting}</h2>
            <p>"Roles: " {roles}</p>
            <Show when=move || is_admin fallback=|| ()>
                <p>
                    "You can manage accounts on the " <A href="/users">"Users"</A> " page."
                </p>
            </Show>
        </div>
    }
}

#[derive(Debug, Clone)]
enum UsersAction {
    Load,
    Sort(&'static str),
    Page(u32),
    Search(String),
    ClearSearch,
    Save,
    Cancel,
    Delete,
    ChangePassword,
}

impl UsersAction {
    async fn apply(self, view: &UsersView) {
        match self {
            UsersAction::Load => view.load().await,
            UsersAction::Sort(field) => view.sort(field).await,
            UsersAction::Page(index) => {
                let size = view.snapshot().page_size;
                view.change_page(index, size).await
            }
            UsersAction::Search(term) => view.search(&term).await,
            UsersAction::ClearSearch => view.clear_search().await,
            UsersAction::Save => view.save().await,
            UsersAction::Cancel => view.cancel().await,
            UsersAction::Delete => view.delete().await,
            UsersAction::ChangePassword => {
                view.change_password().await;
            }
        }
    }
}

/// Apply a synchronous edit and publish the new state.
fn edit(
    view: StoredValue<Rc<UsersView>>,
    state: RwSignal<UsersState>,
    f: impl FnOnce(&mut UsersState),
) {
    let view = view.get_value();
    view.update(f);
    state.set(view.snapshot());
}

#[component]
pub fn UsersPage() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let view_model = Rc::new(UsersView::new(ctx));
    let state = create_rw_signal(view_model.snapshot());
    let vm = store_value(view_model);
    let search = create_rw_signal(String::new());

    let dispatch = move |action: UsersAction| {
        let view = vm.get_value();
        spawn_local(async move {
            action.apply(&view).await;
            state.set(view.snapshot());
        });
    };
    dispatch(UsersAction::Load);

    let editing = move || state.with(|s| s.is_editing);
    let is_admin = move || state.with(|s| s.is_admin);

    view! {
        <div class="users">
            <h2>"Users"</h2>

            <form class="search" on:submit=move |ev: ev::SubmitEvent| {
                ev.prevent_default();
                dispatch(UsersAction::Search(search.get()));
            }>
                <input
                    type="search"
                    placeholder="Search users"
                    prop:value=move || search.get()
                    on:input=move |ev| search.set(event_target_value(&ev))
                />
                <button type="submit">"Search"</button>
                <button type="button" on:click=move |_| {
                    search.set(String::new());
                    dispatch(UsersAction::ClearSearch);
                }>"Clear"</button>
            </form>

            <table class="users-table">
                <thead>
                    <tr>
                        {COLUMNS
                            .iter()
                            .map(|&(field, label)| {
                                view! {
                                    <th on:click=move |_| dispatch(UsersAction::Sort(field))>
                                        {label}
                                        {move || state.with(|s| s.sort_indicator(field))}
                                    </th>
                                }
                            })
                            .collect_view()}
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        state
                            .with(|s| s.users.clone())
                            .into_iter()
                            .enumerate()
                            .map(|(index, user)| {
                                let selected = state.with(|s| s.is_selected(&user));
                                view! {
                                    <tr
                                        class:selected=selected
                                        on:click=move |_| edit(vm, state, |s| {
                                            s.select(index);
                                        })
                                    >
                                        <td>{user.email.clone()}</td>
                                        <td>{user.first_name.clone()}</td>
                                        <td>{user.last_name.clone()}</td>
                                        <td>{user.roles.join(", ")}</td>
                                    </tr>
                                }
                            })
                            .collect_view()
                    }}
                </tbody>
            </table>

            <div class="paginator">
                <button
                    prop:disabled=move || state.with(|s| s.current_page == 0)
                    on:click=move |_| {
                        let page = state.with(|s| s.current_page);
                        dispatch(UsersAction::Page(page.saturating_sub(1)));
                    }
                >
                    "‹"
                </button>
                <span>
                    {move || state.with(|s| {
                        format!(
                            "Page {} of {} ({} users)",
                            s.current_page + 1,
                            s.total_pages().max(1),
                            s.total_users
                        )
                    })}
                </span>
                <button
                    prop:disabled=move || state.with(|s| s.current_page + 1 >= s.total_pages())
                    on:click=move |_| {
                        let page = state.with(|s| s.current_page);
                        dispatch(UsersAction::Page(page + 1));
                    }
                >
                    "›"
                </button>
            </div>

            <Show when=is_admin fallback=|| ()>
                <div class="toolbar">
                    <button on:click=move |_| edit(vm, state, UsersState::start_add)>"Add"</button>
                    <button on:click=move |_| {
                        let view = vm.get_value();
                        view.edit();
                        state.set(view.snapshot());
                    }>"Edit"</button>
                    <button on:click=move |_| dispatch(UsersAction::Delete)>"Delete"</button>
                    <button on:click=move |_| dispatch(UsersAction::ChangePassword)>
                        "Change password"
                    </button>
                </div>
            </Show>

            <form class="user-form" on:submit=move |ev: ev::SubmitEvent| {
                ev.prevent_default();
                dispatch(UsersAction::Save);
            }>
                <label>"Email"</label>
                <input
                    type="email"
                    prop:disabled=move || !editing()
                    prop:value=move || state.with(|s| s.form.email.clone())
                    on:input=move |ev| edit(vm, state, |s| s.form.email = event_target_value(&ev))
                />
                <label>"First name"</label>
                <input
                    type="text"
                    prop:disabled=move || !editing()
                    prop:value=move || state.with(|s| s.form.first_name.clone())
                    on:input=move |ev| edit(vm, state, |s| s.form.first_name = event_target_value(&ev))
                />
                <label>"Last name"</label>
                <input
                    type="text"
                    prop:disabled=move || !editing()
                    prop:value=move || state.with(|s| s.form.last_name.clone())
                    on:input=move |ev| edit(vm, state, |s| s.form.last_name = event_target_value(&ev))
                />
                <label>"Roles (comma separated)"</label>
                <input
                    type="text"
                    prop:disabled=move || !editing()
                    prop:value=move || state.with(|s| s.form.roles.join(", "))
                    on:change=move |ev| {
                        edit(vm, state, |s| s.form.set_roles_from_text(&event_target_value(&ev)))
                    }
                />
                <Show when=editing fallback=|| ()>
                    <button
                        type="submit"
                        prop:disabled=move || state.with(|s| s.form.validate().is_err())
                    >
                        "Save"
                    </button>
                    <button type="button" on:click=move |_| dispatch(UsersAction::Cancel)>
                        "Cancel"
                    </button>
                </Show>
            </form>
        </div>
    }
}
