pub mod access_jwt;
pub mod factory;
pub mod jwt;
pub mod principal;
pub mod token;

pub use access_jwt::{AuthDecision, AuthService, InvalidCredential};
pub use factory::build_auth_service;
pub use jwt::JwtIssuer;
pub use principal::Principal;
