/*
 * Responsibility
 * - POST /payments/verify: gateway から返った署名の検証
 * - 結果は `{ success, message | error }` の envelope で返す (AppError は使わない)
 */
use axum::{Json, extract::State, http::StatusCode};

use crate::{
    api::v1::dto::payments::{VerifyPaymentRequest, VerifyPaymentResponse},
    services::payment::SignatureError,
    state::AppState,
};

pub async fn verify_payment(
    State(state): State<AppState>,
    Json(req): Json<VerifyPaymentRequest>,
) -> (StatusCode, Json<VerifyPaymentResponse>) {
    let Some(verifier) = state.payments.as_deref() else {
        tracing::error!("payment verification requested but PAYMENT_KEY_SECRET is not set");
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(VerifyPaymentResponse::failed(
                "Payment verification is not configured",
            )),
        );
    };

    let (order_id, payment_id, signature) = match req.fields() {
        Ok(fields) => fields,
        Err(missing) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(VerifyPaymentResponse::failed(format!("Missing {missing}"))),
            );
        }
    };

    match verifier.verify(order_id, payment_id, signature) {
        Ok(()) => {
            tracing::info!(order_id, payment_id, "payment signature verified");
            (
                StatusCode::OK,
                Json(VerifyPaymentResponse::ok("Payment verified successfully")),
            )
        }
        Err(SignatureError::InvalidKey) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(VerifyPaymentResponse::failed("Payment verification failed")),
        ),
        Err(err) => {
            tracing::warn!(order_id, payment_id, error = %err, "payment signature rejected");
            (
                StatusCode::BAD_REQUEST,
                Json(VerifyPaymentResponse::failed("Invalid payment signature")),
            )
        }
    }
}
