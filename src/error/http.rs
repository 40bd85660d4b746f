use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("Invalid base URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Base URL '{url}' cannot carry a path.")]
    BaseUrlCannotBeABase { url: String },
    #[error("Failed to build HTTP client: {source}")]
    BuildClientFailed {
        #[source]
        source: reqwest::Error,
    },
    #[error("Failed to encode request body: {source}")]
    EncodeBody {
        #[source]
        source: serde_json::Error,
    },
    #[error("{method} {url} failed: {source}")]
    RequestFailed {
        method: reqwest::Method,
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Failed to read response body from {url}: {source}")]
    ReadBodyFailed {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}
