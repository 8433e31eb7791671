//! Bearer credential extraction.
//!
//! Exactly one source is consulted per request: the auth cookie when it carries a
//! non-empty value, otherwise `Authorization: Bearer <token>`.

use axum::http::{HeaderMap, header};

const BEARER_PREFIX: &str = "Bearer ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    Cookie,
    AuthorizationHeader,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractedToken<'a> {
    pub source: TokenSource,
    pub token: &'a str,
}

pub fn extract_token<'a>(headers: &'a HeaderMap, cookie_name: &str) -> Option<ExtractedToken<'a>> {
    if let Some(token) = cookie_value(headers, cookie_name) {
        return Some(ExtractedToken {
            source: TokenSource::Cookie,
            token,
        });
    }

    bearer_token(headers).map(|token| ExtractedToken {
        source: TokenSource::AuthorizationHeader,
        token,
    })
}

/// First non-empty value of the named cookie across all `Cookie` headers.
///
/// Pairs are decoded one at a time, so a sibling cookie carrying raw non-ASCII
/// bytes only drops itself.
pub fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .flat_map(|v| v.as_bytes().split(|&b| b == b';'))
        .filter_map(|pair| std::str::from_utf8(pair).ok())
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(k, v)| k.trim() == name && !v.trim().is_empty())
        .map(|(_, v)| v.trim())
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix(BEARER_PREFIX))
        .filter(|t| !t.is_empty())
}
