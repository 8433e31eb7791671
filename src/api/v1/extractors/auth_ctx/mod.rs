/*!
 * Authentication context extractor
 *
 * Responsibility:
 * - 認証済みリクエストのコンテキスト（AuthCtx）を handler に提供する
 * - HTTP / axum 依存は core に閉じ込め、型定義は types に分離する
 *
 * Public API:
 * - AuthCtx
 * - AuthCtxExtractor (認証必須)
 * - AdminCtxExtractor (認証 + admin role 必須)
 */

mod core;
mod types;

pub use self::core::{ADMIN_ROLE, AdminCtxExtractor, AuthCtxExtractor};
pub use types::AuthCtx;
