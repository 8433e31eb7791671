pub mod auth;
pub mod payment;
