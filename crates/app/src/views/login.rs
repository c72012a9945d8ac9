//! Sign-in and registration forms.

use qwenht_auth::{DASHBOARD_ROUTE, LOGIN_ROUTE};
use qwenht_client::{ClientError, RegisterRequest};
use qwenht_core::user::is_valid_email;

use crate::AppContext;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Both fields are required; nothing else is checked client-side.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.username.trim().is_empty() {
            return Err("Username is required");
        }
        if self.password.is_empty() {
            return Err("Password is required");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub role: Option<String>,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.first_name.trim().is_empty() {
            return Err("First name is required");
        }
        if self.last_name.trim().is_empty() {
            return Err("Last name is required");
        }
        if !is_valid_email(self.email.trim()) {
            return Err("A valid email is required");
        }
        if self.password.chars().count() < crate::views::users::MIN_PASSWORD_LEN {
            return Err("Password must be at least 6 characters long");
        }
        if self.password != self.confirm_password {
            return Err("Passwords do not match");
        }
        Ok(())
    }

    pub fn to_request(&self) -> RegisterRequest {
        RegisterRequest {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            role: self
                .role
                .as_deref()
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .map(str::to_string),
        }
    }
}

/// Drives the login screen.
pub struct LoginView {
    ctx: AppContext,
}

impl LoginView {
    pub fn new(ctx: AppContext) -> Self {
        Self { ctx }
    }

    /// Sign in and go to the dashboard. Failures are alerted and returned.
    pub async fn submit(&self, form: &LoginForm) -> Result<(), ClientError> {
        if let Err(message) = form.validate() {
            self.ctx.notifier.alert(message);
            return Err(ClientError::Validation(message.to_string()));
        }

        self.ctx.progress.show();
        let result = self
            .ctx
            .accounts
            .login(form.username.trim(), &form.password)
            .await;
        self.ctx.progress.hide();

        match result {
            Ok(()) => {
                // A menu cached for a previous token is useless now.
                self.ctx.navigation.clear_cache();
                self.ctx.navigator.navigate(DASHBOARD_ROUTE);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(username = %form.username.trim(), "login failed: {err}");
                self.ctx
                    .notifier
                    .alert(&format!("Login failed: {}", login_failure_reason(&err)));
                Err(err)
            }
        }
    }

    /// Create an account, then send the user to the login form.
    pub async fn register(&self, form: &RegisterForm) -> Result<(), ClientError> {
        if let Err(message) = form.validate() {
            self.ctx.notifier.alert(message);
            return Err(ClientError::Validation(message.to_string()));
        }

        match self.ctx.accounts.register(&form.to_request()).await {
            Ok(()) => {
                self.ctx
                    .notifier
                    .alert("Registration successful. Please log in.");
                self.ctx.navigator.navigate(LOGIN_ROUTE);
                Ok(())
            }
            Err(err) => {
                tracing::error!("registration failed: {err}");
                self.ctx
                    .notifier
                    .alert(&format!("Registration failed: {}", err.user_message()));
                Err(err)
            }
        }
    }
}

fn login_failure_reason(err: &ClientError) -> String {
    match err {
        // The interceptor turns a rejected login into a 401.
        ClientError::Unauthorized => "Invalid username or password".to_string(),
        other => other.user_message(),
    }
}
