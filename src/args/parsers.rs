use url::Url;

use super::types::PositiveU64;
use crate::error::{AppError, AppResult, ValidationError};

/// Validates a base URL and strips any trailing slash so paths can be appended.
pub(crate) fn parse_base_url(s: &str) -> Result<String, ValidationError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty);
    }
    let url = Url::parse(trimmed).map_err(|err| ValidationError::InvalidUrl {
        url: trimmed.to_owned(),
        source: err,
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ValidationError::UnsupportedScheme {
            url: trimmed.to_owned(),
        });
    }
    if url.host_str().is_none() {
        return Err(ValidationError::UrlMissingHost);
    }
    Ok(trimmed.trim_end_matches('/').to_owned())
}

pub(super) fn parse_positive_u64(s: &str) -> AppResult<PositiveU64> {
    s.parse::<PositiveU64>().map_err(AppError::from)
}

pub(super) fn parse_non_empty(s: &str) -> Result<String, ValidationError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty);
    }
    Ok(trimmed.to_owned())
}

pub(crate) fn parse_bool_env(s: &str) -> AppResult<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" | "on" => Ok(true),
        "0" | "false" | "no" | "n" | "off" => Ok(false),
        _ => Err(AppError::validation(ValidationError::InvalidBoolean {
            value: s.to_owned(),
        })),
    }
}
