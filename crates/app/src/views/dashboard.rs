use qwenht_auth::Role;

use crate::AppContext;

/// Landing screen after login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    pub user_name: String,
    pub roles: Vec<Role>,
    pub is_admin: bool,
}

impl DashboardView {
    pub fn from_context(ctx: &AppContext) -> Self {
        Self {
            user_name: ctx.session.user_name(),
            roles: ctx.session.roles(),
            is_admin: ctx.is_admin(),
        }
    }

    pub fn greeting(&self) -> String {
        format!("Welcome, {}", self.user_name)
    }

    /// Roles joined for display; `"none"` when the token carries no role.
    pub fn role_summary(&self) -> String {
        if self.roles.is_empty() {
            return "none".to_string();
        }
        self.roles
            .iter()
            .map(Role::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}
