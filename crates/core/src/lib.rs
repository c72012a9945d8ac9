//! `qwenht-core`: domain building blocks shared by every QwenHT crate.
//!
//! This crate contains **pure data** (no HTTP, no storage, no UI). The remote
//! identity API owns every record described here; the front-end only holds
//! working copies.

pub mod error;
pub mod id;
pub mod navigation;
pub mod page;
pub mod user;

pub use error::{DomainError, DomainResult};
pub use id::UserId;
pub use navigation::NavigationItem;
pub use page::{PageRequest, PaginatedResponse, SortDirection, SortState};
pub use user::User;
