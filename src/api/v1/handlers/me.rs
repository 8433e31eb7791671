/*
 * Responsibility
 * - GET /me: 認証済み主体 (Principal) をそのまま返す
 * - 未認証 / 不正 token は extractor が 401 `{ "error": ... }` にする
 */
use axum::Json;

use crate::api::v1::{dto::me::MeResponse, extractors::AuthCtxExtractor};

pub async fn me(AuthCtxExtractor(ctx): AuthCtxExtractor) -> Json<MeResponse> {
    Json(MeResponse {
        user: ctx.principal,
    })
}
