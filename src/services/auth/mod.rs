pub mod access_jwt;
pub mod factory;
pub mod metadata;

pub use access_jwt::{AccessJwtError, AuthService};
pub use factory::{AuthSetupError, build_auth_service};
