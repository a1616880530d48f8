//! Resource-server side of PropelAuth: verify access tokens issued by the
//! auth service, turn their claims into an [`AuthContext`], and answer
//! org / role / permission questions about the caller.
//!
//! The `user` module is the transport-free core; `services`, `middleware`
//! and `api` wire it into an axum application.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;
pub mod user;

pub use config::Config;
pub use error::AppError;
pub use services::auth::{AccessJwtError, AuthService, build_auth_service};
pub use state::AppState;
pub use user::{AuthContext, ClaimSet, ClaimsError, LoginMethod, OrgMembership};
