//! `qwenht-auth`: client-side session gate.
//!
//! Holds the bearer token, derives identity facts from its claims and decides
//! whether a route may be entered. Nothing here talks to the network: the
//! identity API stays the authority and may reject a token this crate still
//! considers valid.

pub mod claims;
pub mod guard;
pub mod roles;
pub mod session;
pub mod store;

pub use claims::{TokenClaims, TokenError};
pub use guard::{DASHBOARD_ROUTE, Guard, GuardOutcome, LOGIN_ROUTE};
pub use roles::Role;
pub use session::Session;
pub use store::{MemoryTokenStore, StoreError, TOKEN_KEY, TokenStore};

#[cfg(not(target_arch = "wasm32"))]
pub use store::FileTokenStore;
#[cfg(target_arch = "wasm32")]
pub use store::LocalStorageTokenStore;
