//! HTTP Basic authentication for the exposition endpoint.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use subtle::ConstantTimeEq;

use crate::config::BasicAuthConfig;

const REALM_CHALLENGE: &str = "Basic realm=\"/\"";

/// Checks `Authorization` headers against one configured username/password pair.
#[derive(Clone)]
pub struct BasicAuthenticator {
    username: String,
    password: String,
}

impl BasicAuthenticator {
    pub fn new(config: &BasicAuthConfig) -> Self {
        Self {
            username: config.username.clone(),
            password: config.password.clone(),
        }
    }

    /// Whether `header_value` carries the configured credentials.
    ///
    /// Both fields are always compared, in constant time for equal lengths.
    pub fn is_authorized(&self, header_value: &str) -> bool {
        let Some((scheme, encoded)) = header_value.trim().split_once(' ') else {
            return false;
        };
        if !scheme.eq_ignore_ascii_case("basic") {
            return false;
        }

        let Ok(decoded) = STANDARD.decode(encoded.trim()) else {
            return false;
        };
        let Ok(credentials) = String::from_utf8(decoded) else {
            return false;
        };

        match credentials.split_once(':') {
            Some((username, password)) => {
                let username_ok = username.as_bytes().ct_eq(self.username.as_bytes());
                let password_ok = password.as_bytes().ct_eq(self.password.as_bytes());
                (username_ok & password_ok).into()
            }
            None => false,
        }
    }
}

/// Rejects requests without valid credentials with `401 Unauthorized`.
pub async fn basic_auth_middleware(
    State(authenticator): State<Arc<BasicAuthenticator>>,
    request: Request,
    next: Next,
) -> Response {
    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .is_some_and(|value| authenticator.is_authorized(value));

    if authorized {
        return next.run(request).await;
    }

    tracing::debug!(path = %request.uri().path(), "Rejected unauthenticated request");
    (
        StatusCode::UNAUTHORIZED,
        [(header::WWW_AUTHENTICATE, REALM_CHALLENGE)],
    )
        .into_response()
}
