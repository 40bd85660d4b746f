use std::io::Write;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{AppResult, HttpError, ShapeError};
use crate::http::models::LoginRequest;
use crate::http::{ApiClient, ApiResponse, BearerToken, Credentials, Endpoint};
use crate::shape::json_kind;

use super::report::Reporter;

const ACCESS_TOKEN_KEY: &str = "accessToken";
const REFRESH_TOKEN_KEY: &str = "refreshToken";

/// An authenticated identity for the remainder of one probe.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: BearerToken,
}

/// Why a login attempt produced no token.
#[derive(Debug)]
pub enum LoginFailure {
    Transport(HttpError),
    Rejected(ApiResponse),
    UnusableBody {
        response: ApiResponse,
        reason: ShapeError,
    },
}

impl LoginFailure {
    #[must_use]
    pub const fn response(&self) -> Option<&ApiResponse> {
        match self {
            LoginFailure::Transport(_) => None,
            LoginFailure::Rejected(response) | LoginFailure::UnusableBody { response, .. } => {
                Some(response)
            }
        }
    }
}

impl std::fmt::Display for LoginFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoginFailure::Transport(err) => write!(f, "{}", err),
            LoginFailure::Rejected(response) => {
                write!(f, "{} Error for url: {}", response.status, response.url)
            }
            LoginFailure::UnusableBody { reason, .. } => write!(f, "{}", reason),
        }
    }
}

/// Exchanges credentials for a bearer token.
///
/// # Errors
///
/// Returns a [`LoginFailure`] on transport errors, non-2xx statuses, or a
/// response without a usable `accessToken`.
pub async fn login(client: &ApiClient, credentials: &Credentials) -> Result<Session, LoginFailure> {
    let payload = LoginRequest {
        user_name_or_email: &credentials.username,
        password: &credentials.password,
    };
    let response = match client.send_json(&Endpoint::Login, None, &payload).await {
        Ok(response) => response,
        Err(err) => {
            tracing::warn!("Login request failed: {}", err);
            return Err(LoginFailure::Transport(err));
        }
    };
    if !response.is_success() {
        tracing::warn!("Login rejected with status {}", response.status);
        return Err(LoginFailure::Rejected(response));
    }

    let body = match response.json() {
        Ok(body) => body,
        Err(reason) => {
            tracing::warn!("Login response unusable: {}", reason);
            return Err(LoginFailure::UnusableBody { response, reason });
        }
    };
    let token = match access_token(&body) {
        Ok(token) => token,
        Err(reason) => {
            tracing::warn!("Login response unusable: {}", reason);
            return Err(LoginFailure::UnusableBody { response, reason });
        }
    };
    tracing::debug!(
        "Logged in as {} (refresh token present: {})",
        credentials.username,
        body.get(REFRESH_TOKEN_KEY).is_some()
    );

    Ok(Session { token })
}

/// Reads `accessToken` alone; other login fields vary between server versions
/// and are not decoded.
fn access_token(body: &Value) -> Result<BearerToken, ShapeError> {
    let Some(map) = body.as_object() else {
        return Err(ShapeError::NotAnObject {
            found: json_kind(body),
        });
    };
    let raw = match map.get(ACCESS_TOKEN_KEY) {
        None | Some(Value::Null) => return Err(ShapeError::MissingToken),
        Some(raw) => raw,
    };
    let text = String::deserialize(raw).map_err(|err| ShapeError::InvalidToken { source: err })?;
    BearerToken::new(&text).ok_or(ShapeError::MissingToken)
}

/// Prints a login failure and whatever body the server sent back.
///
/// # Errors
///
/// Returns an error when the report cannot be written.
pub fn report_login_failure<W: Write>(
    out: &mut Reporter<W>,
    failure: &LoginFailure,
) -> AppResult<()> {
    out.line(format!("Login failed: {}", failure))?;
    if let Some(response) = failure.response() {
        out.line(&response.body)?;
    }
    Ok(())
}
