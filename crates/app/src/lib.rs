//! `qwenht-app`
//!
//! **Responsibility:** the QwenHT administrative front-end.
//!
//! This crate provides:
//! - The route table and guard resolution
//! - View models for every screen (home, login, dashboard, users, navbar, sidebar)
//! - A Leptos front-end for the browser (`wasm32`)
//! - A terminal front-end (`qwenht` binary) for everything else
//!
//! All business rules live behind the identity API; the front-end renders
//! state, collects input and calls endpoints.

pub mod context;
pub mod notifier;
pub mod progress;
pub mod routes;
pub mod views;

#[cfg(target_arch = "wasm32")]
pub mod frontend;

#[cfg(not(target_arch = "wasm32"))]
pub mod terminal;

pub use context::AppContext;
pub use notifier::Notifier;
pub use progress::ProgressBar;
pub use routes::{Resolution, Route, RouteMatch, Router};
