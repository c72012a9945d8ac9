//! View models for every screen.
//!
//! Each view owns only screen-local state and talks to the API through the
//! services in [`crate::AppContext`]. Rendering lives in the front-ends.

pub mod dashboard;
pub mod home;
pub mod login;
pub mod navbar;
pub mod sidebar;
pub mod users;

pub use dashboard::DashboardView;
pub use home::{FEATURES, Feature, HomeView};
pub use login::{LoginForm, LoginView, RegisterForm};
pub use navbar::NavbarView;
pub use sidebar::{MOBILE_BREAKPOINT, SidebarView, is_active, is_mobile};
pub use users::{SavePlan, UserForm, UsersState, UsersView};

pub const APP_TITLE: &str = "QwenHT Identity Management";

pub const FOOTER: &str = "© 2025 QwenHT Identity Management. All rights reserved.";
