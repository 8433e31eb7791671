//! session token（cookie または Bearer）検証 → AuthCtx を extensions に入れる
//!
//! - ここでは拒否しない。認証が必須かどうかは handler 側の extractor が決める
//!   (`AuthCtxExtractor` / `AdminCtxExtractor`)。
//! - token の無い request と検証に失敗した request は同じ扱い (extensions に何も入れない)。
//!   区別は AuthService 側のログにだけ残る。

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::api::v1::extractors::AuthCtx;
use crate::state::AppState;

/// `/api/*` に認証判定を掛けるための middleware を適用する。
///
/// 例：
/// ```ignore
/// let api = Router::new().nest("/api/v1", api::v1::routes());
/// let api = middleware::auth::access::apply(api, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に state を渡す
    router.layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(principal) = state.auth.authenticate(req.headers()) {
        // middleware → extractor への受け渡し
        req.extensions_mut().insert(AuthCtx::new(principal));
    }

    next.run(req).await
}
