use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::state::AppState;

use super::AuthCtx;

/// Role claim value that grants access to `/api/admin/*`.
pub const ADMIN_ROLE: &str = "admin";

/// Handler で、 AuthCtx を受け取るための extractor
/// middleware が AuthCtx を request.extensions() に insert 済みである前提
/// 見つからない場合は 401 を返す（token 無し・不正 token・ミドルウェア未設定を区別しない）
pub struct AuthCtxExtractor(pub AuthCtx);

impl FromRequestParts<AppState> for AuthCtxExtractor
where
    AppState: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthCtx>()
            .cloned()
            .map(AuthCtxExtractor)
            .ok_or(AppError::Unauthorized)
    }
}

/// AuthCtxExtractor + role == "admin"。role 不一致は 403。
pub struct AdminCtxExtractor(pub AuthCtx);

impl FromRequestParts<AppState> for AdminCtxExtractor
where
    AppState: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AuthCtxExtractor(ctx) = AuthCtxExtractor::from_request_parts(parts, state).await?;

        if ctx.role() != Some(ADMIN_ROLE) {
            tracing::debug!(
                user_id = %ctx.principal.id_display(),
                role = ?ctx.role(),
                "non-admin principal on admin route"
            );
            return Err(AppError::Forbidden("admin access required"));
        }

        Ok(AdminCtxExtractor(ctx))
    }
}
