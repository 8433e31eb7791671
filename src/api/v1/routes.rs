/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - 認証判定は上位で middleware として掛かっている。必須かどうかは handler の extractor が決める
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use crate::api::v1::handlers::{health::health, me::me, payments::verify_payment};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/me", get(me))
        .route("/payments/verify", post(verify_payment))
}
