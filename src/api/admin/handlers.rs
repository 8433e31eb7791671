/*
 * Responsibility
 * - GET /api/admin/me: admin guard が mount 時に 1 回だけ叩く who-am-i
 * - 成功: 200 `{ "user": Principal }`
 * - 失敗: 401 / 403 `{ "error": string }` (guard はこの文言をそのまま表示する)
 */
use axum::Json;

use crate::api::v1::{dto::me::MeResponse, extractors::AdminCtxExtractor};

pub async fn who_am_i(AdminCtxExtractor(ctx): AdminCtxExtractor) -> Json<MeResponse> {
    tracing::debug!(user_id = %ctx.principal.id_display(), "admin who-am-i");
    Json(MeResponse {
        user: ctx.principal,
    })
}
