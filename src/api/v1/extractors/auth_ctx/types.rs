/*
 * Responsibility
 * - Handler から見える「認証済みコンテキスト」の型
 * - middleware が検証して request extensions に格納し、handler はこの型だけを受け取る
 *
 * Notes
 * - token の抽出・署名検証は middleware/services 側の責務
 * - request ごとに作り直す。request を跨いでキャッシュしない
 */

use crate::services::auth::Principal;

/// 認証済みのリクエストに付与されるコンテキスト
#[derive(Debug, Clone)]
pub struct AuthCtx {
    pub principal: Principal,
}

impl AuthCtx {
    pub fn new(principal: Principal) -> Self {
        Self { principal }
    }

    pub fn role(&self) -> Option<&str> {
        self.principal.role()
    }
}
