use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Value must be >= {min}.")]
    ValueTooSmall { min: u64 },
    #[error("Invalid value: {source}")]
    InvalidNumber {
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("URL '{url}' must use http or https.")]
    UnsupportedScheme { url: String },
    #[error("URL is missing host.")]
    UrlMissingHost,
    #[error("Invalid boolean '{value}'. Expected true/false, yes/no, on/off, or 1/0.")]
    InvalidBoolean { value: String },
    #[error("Value must not be empty.")]
    Empty,
    #[error("Email suffix '{suffix}' must be {expected} lowercase hex characters.")]
    InvalidEmailSuffix { suffix: String, expected: usize },
    #[error("Email '{email}' is {len} characters, over the {max} character budget.")]
    EmailTooLong {
        email: String,
        len: usize,
        max: usize,
    },
    #[error("Email '{email}' is not a valid address.")]
    InvalidEmail { email: String },
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[cfg(test)]
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}
