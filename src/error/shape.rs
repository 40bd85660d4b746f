use thiserror::Error;

/// Named failures of response-shape resolution.
#[derive(Debug, Error)]
pub enum ShapeError {
    #[error("Response body is not JSON: {source}")]
    NotJson {
        #[source]
        source: serde_json::Error,
    },
    #[error("Expected a JSON object, found {found}.")]
    NotAnObject { found: &'static str },
    #[error("Unrecognized list shape under '{field}' (top-level keys: {keys}).")]
    UnrecognizedListShape { field: String, keys: String },
    #[error("Record has no identifier under any of: {candidates}.")]
    MissingIdentifier { candidates: String },
    #[error("Login response has no accessToken.")]
    MissingToken,
    #[error("Login response accessToken is not a string: {source}")]
    InvalidToken {
        #[source]
        source: serde_json::Error,
    },
    #[error("No user id found at any of: {paths}.")]
    UserIdNotFound { paths: String },
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
