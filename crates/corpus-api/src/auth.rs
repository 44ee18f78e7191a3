//! HTTP Basic authentication for the annotation pages and API.

use std::fmt;

use axum::extract::{Request, State};
use axum::http::header::{AUTHORIZATION, WWW_AUTHENTICATE};
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::{debug, warn};

use crate::state::AppState;

/// Challenge sent with every 401 response.
pub const BASIC_CHALLENGE: &str = "Basic realm=\"corpus-manager\"";

/// The single username/password pair allowed in.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthConfig {
    username: String,
    password: String,
}

impl AuthConfig {
    /// Create a credential pair.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// The configured username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns `true` if the submitted pair matches. Empty usernames or
    /// passwords never match.
    #[must_use]
    pub fn verify(&self, username: &str, password: &str) -> bool {
        !username.is_empty()
            && !password.is_empty()
            && username == self.username
            && password == self.password
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Credentials decoded from an `Authorization: Basic` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Submitted username.
    pub username: String,
    /// Submitted password.
    pub password: String,
}

/// Decodes Basic credentials from request headers. Returns `None` if the
/// header is absent, uses another scheme, or is malformed.
#[must_use]
pub fn basic_credentials(headers: &HeaderMap) -> Option<Credentials> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, encoded) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }
    let decoded = String::from_utf8(STANDARD.decode(encoded.trim()).ok()?).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some(Credentials {
        username: username.to_owned(),
        password: password.to_owned(),
    })
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        [(WWW_AUTHENTICATE, BASIC_CHALLENGE)],
        "Unauthorized Access",
    )
        .into_response()
}

/// Middleware rejecting requests without the configured Basic credentials.
pub async fn require_basic_auth(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    match basic_credentials(request.headers()) {
        Some(creds) if state.auth.verify(&creds.username, &creds.password) => {
            next.run(request).await
        }
        Some(creds) => {
            warn!(username = %creds.username, path = %request.uri().path(), "rejected credentials");
            unauthorized()
        }
        None => {
            debug!(path = %request.uri().path(), "missing credentials");
            unauthorized()
        }
    }
}
