use reqwest::header::{CONTENT_TYPE, HeaderValue};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::args::DEFAULT_USER_AGENT;
use crate::error::{AppError, AppResult, HttpError, ShapeError};

use super::auth::BearerToken;
use super::endpoints::Endpoint;

/// Client for the probed API. Issues one request at a time and never retries.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

/// Raw status and body of one exchange, kept verbatim for reporting.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub url: String,
    pub status: StatusCode,
    pub body: String,
}

impl ApiClient {
    /// Builds a client for the given base URL (including any version prefix).
    ///
    /// # Errors
    ///
    /// Returns an error when the base URL is invalid or the HTTP client cannot be built.
    pub fn new(base_url: &str) -> AppResult<Self> {
        let parsed = Url::parse(base_url).map_err(|err| {
            AppError::http(HttpError::InvalidBaseUrl {
                url: base_url.to_owned(),
                source: err,
            })
        })?;
        if parsed.cannot_be_a_base() {
            return Err(AppError::http(HttpError::BaseUrlCannotBeABase {
                url: base_url.to_owned(),
            }));
        }

        let client = Client::builder()
            .user_agent(DEFAULT_USER_AGENT)
            .build()
            .map_err(|err| AppError::http(HttpError::BuildClientFailed { source: err }))?;

        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves an endpoint against the base URL.
    ///
    /// # Errors
    ///
    /// Returns an error when the base URL cannot take path segments.
    pub fn url_for(&self, endpoint: &Endpoint) -> Result<Url, HttpError> {
        let mut url = self.base_url.clone();
        {
            let mut segments =
                url.path_segments_mut()
                    .map_err(|()| HttpError::BaseUrlCannotBeABase {
                        url: self.base_url.to_string(),
                    })?;
            segments.pop_if_empty();
            segments.extend(endpoint.segments());
        }
        let query = endpoint.query();
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    /// Sends a request without a body.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure; HTTP error statuses are not errors.
    pub async fn send(
        &self,
        endpoint: &Endpoint,
        token: Option<&BearerToken>,
    ) -> Result<ApiResponse, HttpError> {
        self.dispatch(endpoint, token, None).await
    }

    /// Sends a request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error when the body cannot be encoded or on transport failure.
    pub async fn send_json<T>(
        &self,
        endpoint: &Endpoint,
        token: Option<&BearerToken>,
        body: &T,
    ) -> Result<ApiResponse, HttpError>
    where
        T: Serialize + ?Sized,
    {
        let encoded =
            serde_json::to_vec(body).map_err(|err| HttpError::EncodeBody { source: err })?;
        self.dispatch(endpoint, token, Some(encoded)).await
    }

    async fn dispatch(
        &self,
        endpoint: &Endpoint,
        token: Option<&BearerToken>,
        body: Option<Vec<u8>>,
    ) -> Result<ApiResponse, HttpError> {
        let url = self.url_for(endpoint)?;
        let method = endpoint.method();
        tracing::debug!("{} {}", method, url);

        let mut builder = self.client.request(method.clone(), url.clone());
        if let Some(token) = token {
            builder = token.apply(builder);
        }
        if let Some(body) = body {
            builder = builder
                .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
                .body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|err| HttpError::RequestFailed {
                method: method.clone(),
                url: url.to_string(),
                source: err,
            })?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| HttpError::ReadBodyFailed {
                url: url.to_string(),
                source: err,
            })?;
        tracing::debug!("{} {} -> {} ({} bytes)", method, url, status, body.len());

        Ok(ApiResponse {
            url: url.to_string(),
            status,
            body,
        })
    }
}

impl ApiResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status == StatusCode::UNAUTHORIZED
    }

    #[must_use]
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// Parses the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::NotJson`] when the body is empty or not valid JSON.
    pub fn json(&self) -> Result<Value, ShapeError> {
        serde_json::from_str(&self.body).map_err(|err| ShapeError::NotJson { source: err })
    }
}
