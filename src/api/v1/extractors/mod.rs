pub mod auth_ctx;

pub use auth_ctx::{ADMIN_ROLE, AdminCtxExtractor, AuthCtx, AuthCtxExtractor};
