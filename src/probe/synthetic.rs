use rand::Rng;

use crate::error::ValidationError;
use crate::http::models::RegisterUserRequest;

/// Column width of the server's email/username storage.
pub const EMAIL_MAX_LEN: usize = 50;
/// Hex characters taken for the per-run suffix; a full UUID would overflow the budget.
pub const SUFFIX_LEN: usize = 8;

const EMAIL_PREFIX: &str = "user-";
const EMAIL_DOMAIN: &str = "test.com";
const FIRST_NAME: &str = "Test";
const LAST_NAME: &str = "Target";
const PASSWORD: &str = "Password123!";

/// Throwaway account registered by the user lifecycle probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntheticUser {
    email: String,
}

impl SyntheticUser {
    /// Builds a user from a fresh random suffix.
    ///
    /// # Errors
    ///
    /// Returns an error when the resulting email does not fit the budget.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Result<Self, ValidationError> {
        Self::from_suffix(&generate_suffix(rng))
    }

    /// Builds `user-<suffix>@test.com`.
    ///
    /// # Errors
    ///
    /// Returns an error when the suffix is not [`SUFFIX_LEN`] lowercase hex
    /// characters or the email is invalid or too long.
    pub fn from_suffix(suffix: &str) -> Result<Self, ValidationError> {
        let well_formed = suffix.len() == SUFFIX_LEN
            && suffix
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c));
        if !well_formed {
            return Err(ValidationError::InvalidEmailSuffix {
                suffix: suffix.to_owned(),
                expected: SUFFIX_LEN,
            });
        }
        let email = format!("{}{}@{}", EMAIL_PREFIX, suffix, EMAIL_DOMAIN);
        validate_email(&email)?;
        Ok(Self { email })
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Registration payload; the email doubles as the username.
    #[must_use]
    pub fn registration(&self) -> RegisterUserRequest {
        RegisterUserRequest {
            first_name: FIRST_NAME.to_owned(),
            last_name: LAST_NAME.to_owned(),
            user_name: self.email.clone(),
            email: self.email.clone(),
            password: PASSWORD.to_owned(),
            confirm_password: PASSWORD.to_owned(),
        }
    }
}

/// Eight lowercase hex characters.
pub fn generate_suffix<R: Rng + ?Sized>(rng: &mut R) -> String {
    std::iter::repeat_with(|| rng.gen_range(0..16_u32))
        .filter_map(|digit| char::from_digit(digit, 16))
        .take(SUFFIX_LEN)
        .collect()
}

/// Checks length budget and a conservative address syntax.
///
/// # Errors
///
/// Returns an error when the email is too long or malformed.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.len() > EMAIL_MAX_LEN {
        return Err(ValidationError::EmailTooLong {
            email: email.to_owned(),
            len: email.len(),
            max: EMAIL_MAX_LEN,
        });
    }
    let invalid = || ValidationError::InvalidEmail {
        email: email.to_owned(),
    };
    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    let local_ok = !local.is_empty()
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_' | '+'));
    let labels: Vec<&str> = domain.split('.').collect();
    let domain_ok = labels.len() >= 2
        && labels.iter().all(|label| {
            !label.is_empty()
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        });
    if local_ok && domain_ok {
        Ok(())
    } else {
        Err(invalid())
    }
}
