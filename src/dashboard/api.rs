//! HTTP client for the users API. One GET per call: no retries, no timeout, no
//! caching. Failures are normalized into `AppError` so actions only deal with a
//! single error type.

use super::{config::AppConfig, errors::AppError};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::{header::ACCEPT, Client, Response};
use serde_json::Value;
use tracing::{debug, info_span, Instrument};
use url::Url;

/// Characters left as-is by `encodeURIComponent`; everything else is escaped.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Endpoints consumed from the backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Endpoint {
    /// `GET {base}/users`
    Users,
    /// `GET {base}/users/{id}`
    User(String),
}

#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    base: Url,
}

impl ApiClient {
    /// Builds a client bound to the configured base URL.
    ///
    /// # Errors
    /// Returns `AppError::Config` if the base URL cannot be resolved or the HTTP
    /// client cannot be built.
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        let base = config.resolve_base()?;
        let http = Client::builder()
            .user_agent(crate::APP_USER_AGENT)
            .build()
            .map_err(|err| AppError::Config(format!("failed to build HTTP client: {err}")))?;

        debug!("API base URL: {}", base);

        Ok(Self { http, base })
    }

    /// Absolute URL for an endpoint. The user id is escaped like a URI
    /// component, so path, query and sub-delimiter characters in it never change
    /// which endpoint is hit.
    ///
    /// # Errors
    /// Returns `AppError::InvalidId` for `.` and `..`: URL parsing collapses
    /// dot segments even when percent-encoded, which would turn a lookup into a
    /// request for the list endpoint.
    pub fn url_for(&self, endpoint: &Endpoint) -> Result<Url, AppError> {
        let prefix = self.base.path().trim_end_matches('/');
        let path = match endpoint {
            Endpoint::Users => format!("{prefix}/users"),
            Endpoint::User(id) => {
                if id == "." || id == ".." {
                    return Err(AppError::InvalidId(id.clone()));
                }
                format!("{prefix}/users/{}", utf8_percent_encode(id, URI_COMPONENT))
            }
        };

        let mut url = self.base.clone();
        url.set_path(&path);
        Ok(url)
    }

    /// Issues a GET accepting JSON and returns the parsed body.
    ///
    /// # Errors
    /// `AppError::Network` when the server cannot be reached,
    /// `AppError::Request` on a non-success status and `AppError::Parse` when
    /// the body is not JSON.
    pub async fn fetch_json(&self, url: Url) -> Result<Value, AppError> {
        let span = info_span!("users_api.get", http.method = "GET", url = %url);

        let response = self
            .http
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .instrument(span)
            .await
            .map_err(map_request_error)?;

        handle_json_response(response).await
    }

    /// Fetches an endpoint relative to the configured base.
    ///
    /// # Errors
    /// See [`ApiClient::fetch_json`].
    pub async fn get(&self, endpoint: &Endpoint) -> Result<Value, AppError> {
        let url = self.url_for(endpoint)?;
        self.fetch_json(url).await
    }
}

fn map_request_error(err: reqwest::Error) -> AppError {
    AppError::Network(err.to_string())
}

/// Parses JSON bodies and surfaces HTTP errors with the body text, or the
/// status text when the body is empty or unreadable.
async fn handle_json_response(response: Response) -> Result<Value, AppError> {
    let status = response.status();

    if status.is_success() {
        let bytes = response.bytes().await.map_err(map_request_error)?;
        serde_json::from_slice(&bytes)
            .map_err(|err| AppError::Parse(format!("failed to decode response: {err}")))
    } else {
        let body = response.text().await.unwrap_or_default();
        let message = if body.is_empty() {
            status.canonical_reason().unwrap_or_default().to_string()
        } else {
            body
        };

        debug!("request failed with status {}", status);

        Err(AppError::Request {
            status: status.as_u16(),
            message,
        })
    }
}
