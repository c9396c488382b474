//! Session cookie helpers
//!
//! The session token travels in the `auth_session` cookie:
//!
//! ```text
//! auth_session=<token>; Path=/; Max-Age=86400; HttpOnly; SameSite=Lax[; Secure]
//! ```
//!
//! Clearing it sends the same attributes with `Max-Age=-1`.

use axum::http::{header, HeaderMap, HeaderValue, Uri};

use crate::backend::error::BackendError;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "auth_session";

const CLEARED: &str = "auth_session=; Path=/; Max-Age=-1; HttpOnly; SameSite=Lax";
const CLEARED_SECURE: &str = "auth_session=; Path=/; Max-Age=-1; HttpOnly; SameSite=Lax; Secure";

/// Read a cookie value from the request headers
///
/// All `Cookie` headers are searched; the first non-empty value for `name`
/// wins.
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| {
            let (key, value) = pair.trim().split_once('=')?;
            (key.trim() == name).then(|| value.trim().to_string())
        })
        .find(|value| !value.is_empty())
}

/// Read the session token, if any
pub fn read_session_token(headers: &HeaderMap) -> Option<String> {
    read_cookie(headers, SESSION_COOKIE)
}

/// Whether the request reached us over TLS
///
/// True when forced by configuration, when the request URI carries the
/// `https` scheme, or when a proxy reports `X-Forwarded-Proto: https`.
pub fn is_secure_request(force_secure: bool, uri: &Uri, headers: &HeaderMap) -> bool {
    if force_secure {
        return true;
    }
    if uri.scheme_str() == Some("https") {
        return true;
    }
    headers
        .get("x-forwarded-proto")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .is_some_and(|proto| proto.trim().eq_ignore_ascii_case("https"))
}

/// `Set-Cookie` value that installs a session token
pub fn session_cookie(token: &str, max_age_secs: u64, secure: bool) -> Result<HeaderValue, BackendError> {
    let mut cookie = format!(
        "{SESSION_COOKIE}={token}; Path=/; Max-Age={max_age_secs}; HttpOnly; SameSite=Lax"
    );
    if secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
        .map_err(|e| BackendError::internal(format!("invalid session cookie: {e}")))
}

/// `Set-Cookie` value that expires the session cookie immediately
pub fn cleared_session_cookie(secure: bool) -> HeaderValue {
    if secure {
        HeaderValue::from_static(CLEARED_SECURE)
    } else {
        HeaderValue::from_static(CLEARED)
    }
}
