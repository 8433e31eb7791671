use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::error;

use crate::error::AppError;
use crate::services::auth::principal::USER_ID_CLAIM;

/// Signs HS256 session tokens with the shared secret.
///
/// Real sessions are minted by the login flow; this issuer backs the dev token tool
/// and tests, and signs exactly what [`AuthService`](super::AuthService) verifies.
#[derive(Clone)]
pub struct JwtIssuer {
    ttl_seconds: u64,
    encoding_key: EncodingKey,
}

impl JwtIssuer {
    pub fn new(secret: &str, ttl_seconds: u64) -> Self {
        Self {
            ttl_seconds,
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
        }
    }

    pub fn ttl_seconds(&self) -> u64 {
        self.ttl_seconds
    }

    /// Issue a token for `user_id` with `iat`/`exp` set from the TTL.
    ///
    /// `extra` claims are copied as-is; `userId`, `iat` and `exp` are always overwritten.
    pub fn issue(&self, user_id: Value, extra: Map<String, Value>) -> Result<String, AppError> {
        let mut claims = extra;
        claims.insert(USER_ID_CLAIM.to_string(), user_id);
        self.issue_raw(claims)
    }

    /// Like [`issue`](Self::issue) but without forcing a `userId` claim.
    pub fn issue_raw(&self, mut claims: Map<String, Value>) -> Result<String, AppError> {
        let now = chrono::Utc::now().timestamp();
        let exp = i64::try_from(self.ttl_seconds)
            .ok()
            .and_then(|ttl| now.checked_add(ttl))
            .ok_or_else(|| {
                error!(ttl_seconds = self.ttl_seconds, "token lifetime out of range");
                AppError::Internal
            })?;

        claims.insert("iat".to_string(), Value::from(now));
        claims.insert("exp".to_string(), Value::from(exp));

        self.sign(&claims)
    }

    pub fn sign<T: Serialize>(&self, claims: &T) -> Result<String, AppError> {
        let mut header = Header::new(Algorithm::HS256);
        header.typ = Some("JWT".to_string());
        jsonwebtoken::encode(&header, claims, &self.encoding_key).map_err(|e| {
            error!(error = %e, "failed to sign JWT");
            AppError::Internal
        })
    }
}
