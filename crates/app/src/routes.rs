//! Route table and guard resolution.
//!
//! ```text
//! /                -> /home
//! /home            public, anonymous only
//! /auth            login, anonymous only
//! /auth/login      login, anonymous only
//! /dashboard       private
//! /users           private
//! /signin-callback -> /dashboard
//! anything else    -> /home
//! ```

use chrono::{DateTime, Utc};

use qwenht_auth::{Guard, GuardOutcome, Session};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Login,
    Dashboard,
    Users,
}

impl Route {
    pub const ALL: [Route; 4] = [Route::Home, Route::Login, Route::Dashboard, Route::Users];

    /// Canonical path of the screen.
    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/home",
            Route::Login => "/auth/login",
            Route::Dashboard => "/dashboard",
            Route::Users => "/users",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Login => "Login",
            Route::Dashboard => "Dashboard",
            Route::Users => "Users",
        }
    }

    pub fn guard(&self) -> Guard {
        match self {
            Route::Home | Route::Login => Guard::RequireAnonymous,
            Route::Dashboard | Route::Users => Guard::RequireAuthenticated,
        }
    }

    /// Rendered inside the private layout (navbar + sidebar).
    pub fn is_private(&self) -> bool {
        self.guard() == Guard::RequireAuthenticated
    }
}

/// Static outcome of matching a path, before guards run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteMatch {
    Screen(Route),
    Redirect(&'static str),
}

/// Where a navigation finally landed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub route: Route,
    /// Path that was requested.
    pub requested: String,
    /// Every path visited, requested one first.
    pub hops: Vec<String>,
}

impl Resolution {
    pub fn path(&self) -> &str {
        self.route.path()
    }

    pub fn was_redirected(&self) -> bool {
        self.hops.len() > 1
    }
}

const MAX_HOPS: usize = 8;

pub struct Router;

impl Router {
    pub fn match_path(path: &str) -> RouteMatch {
        match normalize(path).as_str() {
            "" => RouteMatch::Redirect("/home"),
            "/home" => RouteMatch::Screen(Route::Home),
            "/auth" | "/auth/login" => RouteMatch::Screen(Route::Login),
            "/dashboard" => RouteMatch::Screen(Route::Dashboard),
            "/users" => RouteMatch::Screen(Route::Users),
            "/signin-callback" => RouteMatch::Redirect("/dashboard"),
            _ => RouteMatch::Redirect("/home"),
        }
    }

    /// Follow redirects and guards until a screen may be entered.
    pub fn resolve(path: &str, session: &Session, now: DateTime<Utc>) -> Resolution {
        let mut hops = vec![path.to_string()];
        let mut current = path.to_string();

        loop {
            let next = match Self::match_path(&current) {
                RouteMatch::Redirect(target) => target,
                RouteMatch::Screen(route) => match route.guard().check(session, now) {
                    GuardOutcome::Allow => {
                        return Resolution {
                            route,
                            requested: path.to_string(),
                            hops,
                        };
                    }
                    GuardOutcome::Redirect(target) => target,
                },
            };

            if hops.len() >= MAX_HOPS {
                // Guards disagree with each other; fall back to the public page.
                tracing::error!(path, ?hops, "route redirect loop");
                return Resolution {
                    route: Route::Home,
                    requested: path.to_string(),
                    hops,
                };
            }
            hops.push(next.to_string());
            current = next.to_string();
        }
    }
}

/// Strip query, fragment and trailing slashes.
fn normalize(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default().trim();
    let path = path.trim_end_matches('/');
    if path.is_empty() {
        return String::new();
    }
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}
