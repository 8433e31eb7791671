use axum::http::HeaderMap;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde_json::{Map, Value};
use std::fmt;

use crate::services::auth::principal::Principal;
use crate::services::auth::token::{TokenSource, extract_token};

/// Why a presented credential was rejected.
///
/// Internal diagnostics only; callers of [`AuthService::authenticate`] never see it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidCredential {
    Expired,
    BadSignature,
    Malformed,
    MissingUserId,
}

impl fmt::Display for InvalidCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expired => write!(f, "token expired"),
            Self::BadSignature => write!(f, "signature mismatch"),
            Self::Malformed => write!(f, "malformed token"),
            Self::MissingUserId => write!(f, "missing 'userId' claim"),
        }
    }
}

impl std::error::Error for InvalidCredential {}

impl From<jsonwebtoken::errors::Error> for InvalidCredential {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        match e.kind() {
            ErrorKind::ExpiredSignature | ErrorKind::ImmatureSignature => Self::Expired,
            ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => Self::BadSignature,
            _ => Self::Malformed,
        }
    }
}

/// Outcome of authenticating one request.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthDecision {
    Authenticated(Principal),
    /// No credential was presented.
    Unauthenticated,
    /// A credential was presented and rejected.
    Invalid(InvalidCredential),
}

impl AuthDecision {
    /// Collapses both negative outcomes into `None`.
    pub fn into_principal(self) -> Option<Principal> {
        match self {
            Self::Authenticated(p) => Some(p),
            Self::Unauthenticated | Self::Invalid(_) => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }
}

/// HMAC shared-secret verifier for session tokens.
///
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct AuthService {
    decoding_key: DecodingKey,
    validation: Validation,
    cookie_name: String,
}

impl fmt::Debug for AuthService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print key material
        f.debug_struct("AuthService")
            .field("validation", &self.validation)
            .field("cookie_name", &self.cookie_name)
            .finish()
    }
}

impl AuthService {
    pub fn new(secret: &str, cookie_name: impl Into<String>, leeway_seconds: u64) -> Self {
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        // Tokens are not audience-scoped; `exp` stays required (jsonwebtoken default).
        validation.validate_aud = false;
        validation.leeway = leeway_seconds;

        Self {
            decoding_key,
            validation,
            cookie_name: cookie_name.into(),
        }
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    // Verify signature + exp and return the raw claims.
    pub fn verify(&self, token: &str) -> Result<Map<String, Value>, InvalidCredential> {
        let data = jsonwebtoken::decode::<Map<String, Value>>(
            token,
            &self.decoding_key,
            &self.validation,
        )?;

        Ok(data.claims)
    }

    /// Verify, then normalize claims into a [`Principal`].
    pub fn verify_principal(&self, token: &str) -> Result<Principal, InvalidCredential> {
        let claims = self.verify(token)?;
        Principal::from_claims(claims).ok_or(InvalidCredential::MissingUserId)
    }

    /// Full decision for a request: extract (cookie first, then bearer) and verify.
    pub fn decide(&self, headers: &HeaderMap) -> AuthDecision {
        let Some(extracted) = extract_token(headers, &self.cookie_name) else {
            tracing::debug!("no credential presented");
            return AuthDecision::Unauthenticated;
        };

        match self.verify_principal(extracted.token) {
            Ok(principal) => {
                tracing::debug!(
                    user_id = %principal.id_display(),
                    source = ?extracted.source,
                    claims = ?principal.claims.keys().collect::<Vec<_>>(),
                    "credential verified"
                );
                AuthDecision::Authenticated(principal)
            }
            Err(reason) => {
                tracing::warn!(
                    source = source_label(extracted.source),
                    reason = %reason,
                    "credential rejected"
                );
                AuthDecision::Invalid(reason)
            }
        }
    }

    /// The caller-facing form: a principal, or `None` for every failure path.
    pub fn authenticate(&self, headers: &HeaderMap) -> Option<Principal> {
        self.decide(headers).into_principal()
    }
}

fn source_label(source: TokenSource) -> &'static str {
    match source {
        TokenSource::Cookie => "cookie",
        TokenSource::AuthorizationHeader => "authorization_header",
    }
}
