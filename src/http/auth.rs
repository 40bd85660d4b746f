use reqwest::RequestBuilder;
use reqwest::header::AUTHORIZATION;

/// Login pair for one probe run. Never persisted.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    #[must_use]
    pub const fn new(username: String, password: String) -> Self {
        Self { username, password }
    }
}

/// Opaque access token returned by the login endpoint.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    /// Wraps a raw token exactly as issued, rejecting empty or whitespace-only values.
    #[must_use]
    pub fn new(raw: &str) -> Option<Self> {
        if raw.trim().is_empty() {
            None
        } else {
            Some(Self(raw.to_owned()))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// JWTs carry `header.payload.signature`; anything with fewer dots is suspect.
    #[must_use]
    pub fn looks_like_jwt(&self) -> bool {
        self.0.matches('.').count() >= 2
    }

    pub(super) fn apply(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.header(AUTHORIZATION, format!("Bearer {}", self.0))
    }
}

impl std::fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("BearerToken(..)")
    }
}

impl std::fmt::Display for BearerToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
