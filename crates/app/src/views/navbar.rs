use qwenht_auth::LOGIN_ROUTE;

use crate::AppContext;

/// Top bar: greeting and logout when signed in, a login link otherwise.
pub struct NavbarView {
    ctx: AppContext,
}

impl NavbarView {
    pub fn new(ctx: AppContext) -> Self {
        Self { ctx }
    }

    pub fn is_authenticated(&self) -> bool {
        self.ctx.session.is_authenticated()
    }

    /// `None` when signed out.
    pub fn greeting(&self) -> Option<String> {
        self.is_authenticated()
            .then(|| format!("Welcome, {}", self.ctx.session.user_name()))
    }

    pub fn login_link(&self) -> Option<&'static str> {
        (!self.is_authenticated()).then_some(LOGIN_ROUTE)
    }

    pub fn logout(&self) {
        self.ctx.logout();
    }
}
