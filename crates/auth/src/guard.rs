//! Route guards consulted before a subtree is entered.
//!
//! Guards only shape navigation; the API still enforces access on every call.

use chrono::{DateTime, Utc};

use crate::Session;

/// Where unauthenticated visitors of private routes are sent.
pub const LOGIN_ROUTE: &str = "/auth/login";

/// Where signed-in visitors of the login screen are sent.
pub const DASHBOARD_ROUTE: &str = "/dashboard";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    /// Private area: requires a live session.
    RequireAuthenticated,
    /// Login screen: only for visitors without a live session.
    RequireAnonymous,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    Allow,
    Redirect(&'static str),
}

impl Guard {
    pub fn check(&self, session: &Session, now: DateTime<Utc>) -> GuardOutcome {
        let authenticated = session.is_authenticated_at(now);
        match (self, authenticated) {
            (Guard::RequireAuthenticated, true) | (Guard::RequireAnonymous, false) => {
                GuardOutcome::Allow
            }
            (Guard::RequireAuthenticated, false) => GuardOutcome::Redirect(LOGIN_ROUTE),
            (Guard::RequireAnonymous, true) => GuardOutcome::Redirect(DASHBOARD_ROUTE),
        }
    }
}
