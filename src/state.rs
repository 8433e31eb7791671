/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - auth: AuthService, payments: PaymentVerifier (未設定なら None)
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::services::{auth::AuthService, payment::PaymentVerifier};

#[derive(Clone, Debug)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub payments: Option<Arc<PaymentVerifier>>,
}

impl AppState {
    pub fn new(auth: Arc<AuthService>, payments: Option<Arc<PaymentVerifier>>) -> Self {
        Self { auth, payments }
    }
}
