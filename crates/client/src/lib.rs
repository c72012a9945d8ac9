//! `qwenht-client`: everything the front-end sends over the wire.
//!
//! Every service is a thin pass-through: one HTTP verb per method, routed
//! through [`AuthorizedClient`], which attaches the bearer token and turns a
//! 401 into a forced logout. Nothing is retried.

pub mod account;
pub mod config;
pub mod error;
pub mod interceptor;
pub mod navigation;
pub mod reqwest_transport;
pub mod testing;
pub mod transport;
pub mod users;

pub use account::{AccountService, LoginResponse, RegisterRequest};
pub use config::ClientConfig;
pub use error::ClientError;
pub use interceptor::{AuthorizedClient, Navigator};
pub use navigation::NavigationService;
pub use reqwest_transport::ReqwestTransport;
pub use transport::{HttpRequest, HttpResponse, Method, Transport};
pub use users::{ChangePasswordRequest, UserService};
