/*
 * Responsibility
 * - 管理画面 (back-office) 向け API
 * - 全 handler が AdminCtxExtractor を要求する
 */
pub mod handlers;
mod routes;

pub use routes::routes;
