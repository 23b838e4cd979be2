//! Bearer token extraction
//!
//! Parses `Authorization: Bearer <token>`. The scheme is matched
//! case-insensitively; anything else is treated as "no token".

use axum::http::{HeaderMap, header};

const SCHEME: &str = "bearer";

/// Token from the `Authorization` header, if one is present and well formed.
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case(SCHEME) {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}
