/**
 * Authentication Middleware
 *
 * This module turns the `auth_session` cookie into a verified
 * `AuthenticatedUser` for protected routes.
 *
 * # Request States
 *
 * 1. No session cookie: 401.
 * 2. Cookie present but the session does not validate: clear the cookie, 401.
 * 3. Session value is not a user id: clear the cookie, revoke the session, 401.
 * 4. User id does not resolve to a user: clear the cookie, revoke the session, 401.
 * 5. Otherwise the user is attached to the request extensions and the
 *    wrapped handler runs.
 *
 * Every 401 has the same body. Which check failed is only visible in the
 * logs.
 */

use std::sync::Arc;

use axum::{
    extract::{FromRef, FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::backend::auth::cookie::{cleared_session_cookie, is_secure_request, read_session_token};
use crate::backend::auth::sessions::{SessionError, SessionManager};
use crate::backend::auth::users::{Credential, CredentialStore};
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

/// The verified caller of a protected request
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Credential> for AuthenticatedUser {
    fn from(credential: Credential) -> Self {
        Self {
            id: credential.id,
            name: credential.name,
            email: credential.email,
            created_at: credential.created_at,
            updated_at: credential.updated_at,
        }
    }
}

/// Collaborators the gate needs, extracted from the application state
#[derive(Clone)]
pub struct AuthenticationGate {
    sessions: SessionManager,
    credentials: Arc<dyn CredentialStore>,
    force_secure: bool,
}

impl AuthenticationGate {
    pub fn new(sessions: SessionManager, credentials: Arc<dyn CredentialStore>, force_secure: bool) -> Self {
        Self {
            sessions,
            credentials,
            force_secure,
        }
    }

    /// Resolve the request headers to a user
    async fn authenticate(&self, headers: &HeaderMap) -> Result<AuthenticatedUser, Rejection> {
        let token = read_session_token(headers).ok_or(Rejection::MissingCookie)?;

        let user_id = match self.sessions.validate(&token).await {
            Ok(user_id) => user_id,
            Err(SessionError::CorruptSession) => {
                tracing::warn!("Session value is not a user id");
                return Err(Rejection::SessionCorrupt(token));
            }
            Err(SessionError::SessionNotFound) => {
                tracing::debug!("Session not found or expired");
                return Err(Rejection::SessionInvalid);
            }
            Err(e) => {
                tracing::error!(error = %e, "Session validation failed");
                return Err(Rejection::SessionInvalid);
            }
        };

        match self.credentials.get_user_by_id(user_id).await {
            Ok(Some(credential)) => Ok(credential.into()),
            Ok(None) => {
                tracing::warn!(user_id, "Session refers to a user that does not exist");
                Err(Rejection::UserMissing(token))
            }
            Err(e) => {
                tracing::error!(user_id, error = %e, "User lookup failed");
                Err(Rejection::UserMissing(token))
            }
        }
    }

    /// Build the 401 for a rejection, cleaning up the session where needed
    async fn reject(&self, rejection: Rejection, secure: bool) -> Response {
        let mut response = BackendError::Unauthenticated.into_response();

        let token = match rejection {
            Rejection::MissingCookie => return response,
            Rejection::SessionInvalid => None,
            Rejection::SessionCorrupt(token) | Rejection::UserMissing(token) => Some(token),
        };

        if let Some(token) = token {
            if let Err(e) = self.sessions.revoke(&token).await {
                tracing::error!(error = %e, "Failed to revoke rejected session");
            }
        }

        response
            .headers_mut()
            .insert(header::SET_COOKIE, cleared_session_cookie(secure));
        response
    }
}

impl FromRef<AppState> for AuthenticationGate {
    fn from_ref(state: &AppState) -> Self {
        AuthenticationGate::new(
            state.sessions.clone(),
            state.credentials.clone(),
            state.config.cookie_secure,
        )
    }
}

/// Why a request was not authenticated
#[derive(Debug)]
enum Rejection {
    MissingCookie,
    SessionInvalid,
    SessionCorrupt(String),
    UserMissing(String),
}

/// Authentication middleware
///
/// Use with `axum::middleware::from_fn_with_state`:
///
/// ```rust,no_run
/// use axum::{middleware, routing::get, Router};
/// use workboard::backend::middleware::{require_auth, AuthenticationGate};
///
/// # fn example(gate: AuthenticationGate) -> Router {
/// Router::new()
///     .route("/private", get(|| async { "ok" }))
///     .route_layer(middleware::from_fn_with_state(gate, require_auth))
/// # }
/// ```
pub async fn require_auth(State(gate): State<AuthenticationGate>, mut request: Request, next: Next) -> Response {
    match gate.authenticate(request.headers()).await {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(rejection) => {
            let secure = is_secure_request(gate.force_secure, request.uri(), request.headers());
            gate.reject(rejection, secure).await
        }
    }
}

/// Axum extractor for the authenticated user
///
/// Only valid behind `require_auth`; without it every request is rejected
/// with 401.
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser not found in request extensions");
                BackendError::Unauthenticated
            })?;

        Ok(AuthUser(user))
    }
}
