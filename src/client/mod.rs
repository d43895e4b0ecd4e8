//! HTTP client for the admissions backend.
//!
//! Every call goes through [`ApiClient`], which:
//!
//! - prefixes the endpoint with the configured base URL;
//! - sends `Accept: application/json`, and a JSON body when one is given;
//! - attaches `Authorization: Bearer <token>` when `include_auth` is set and the
//!   session holds a token;
//! - turns every outcome into an [`Envelope`], never an error;
//! - on `401 Unauthorized` clears the session and, in an interactive context,
//!   navigates to the login page.
//!
//! Request URLs and statuses are logged at debug level. Tokens and request
//! bodies are never logged.

mod download;
mod envelope;
mod error;

pub use download::{DEFAULT_TEMPLATE_FILENAME, Download, SPREADSHEET_MIME, filename_from_disposition};
pub use envelope::{Envelope, FieldErrors, PageMeta, PagedEnvelope, ResponseEnvelope};
pub use error::{
    CONNECTIVITY_MESSAGE, ClientError, DEFAULT_FAILURE_MESSAGE, FailureKind,
    INVALID_RESPONSE_MESSAGE, UPLOAD_FAILURE_MESSAGE,
};

use crate::{
    config::ApiConfig,
    navigation::{Navigator, routes},
    session::Session,
};
use anyhow::{Context, Result};
use reqwest::{
    Client, Method, RequestBuilder, Response, StatusCode,
    header::{ACCEPT, HeaderValue},
    multipart::Form,
};
use secrecy::ExposeSecret;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use std::sync::Arc;
use tracing::{Instrument, debug, info_span, warn};

const JSON_MIME: &str = "application/json";

pub struct ApiClient {
    http: Client,
    base_url: String,
    session: Arc<Session>,
    navigator: Arc<dyn Navigator>,
}

impl ApiClient {
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &ApiConfig, session: Arc<Session>, navigator: Arc<dyn Navigator>) -> Result<Self> {
        let http = Client::builder()
            .user_agent(&config.user_agent)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            session,
            navigator,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    #[must_use]
    pub fn navigator(&self) -> &Arc<dyn Navigator> {
        &self.navigator
    }

    /// Full URL for `endpoint`, which must start with `/`.
    #[must_use]
    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.base_url)
    }

    /// Sends one request and normalizes the outcome.
    pub async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        method: Method,
        body: Option<Value>,
        include_auth: bool,
    ) -> Envelope<T> {
        self.send(endpoint, method, body, include_auth).await
    }

    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str, include_auth: bool) -> Envelope<T> {
        self.send(endpoint, Method::GET, None, include_auth).await
    }

    /// GET for list endpoints that include pagination metadata.
    pub async fn get_paged<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        include_auth: bool,
    ) -> PagedEnvelope<T> {
        self.send(endpoint, Method::GET, None, include_auth).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
        include_auth: bool,
    ) -> Envelope<T> {
        match encode(body) {
            Ok(body) => self.send(endpoint, Method::POST, Some(body), include_auth).await,
            Err(err) => Envelope::from_error(&err),
        }
    }

    /// POST without a body.
    pub async fn post_empty<T: DeserializeOwned>(&self, endpoint: &str, include_auth: bool) -> Envelope<T> {
        self.send(endpoint, Method::POST, None, include_auth).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
        include_auth: bool,
    ) -> Envelope<T> {
        match encode(body) {
            Ok(body) => self.send(endpoint, Method::PUT, Some(body), include_auth).await,
            Err(err) => Envelope::from_error(&err),
        }
    }

    pub async fn delete<T: DeserializeOwned>(&self, endpoint: &str, include_auth: bool) -> Envelope<T> {
        self.send(endpoint, Method::DELETE, None, include_auth).await
    }

    /// Multipart POST. The content type, boundary included, is left to the form
    /// encoder; the bearer token is always attached when present.
    pub async fn upload<T: DeserializeOwned>(&self, endpoint: &str, form: Form) -> Envelope<T> {
        let url = self.url(endpoint);
        let builder = self
            .authorize(self.http.post(&url))
            .header(ACCEPT, JSON_MIME)
            .multipart(form);

        let span = info_span!("api.upload", http.method = "POST", url = %url);
        let result = builder.send().instrument(span).await;
        self.normalize(result, UPLOAD_FAILURE_MESSAGE).await
    }

    async fn send<R: ResponseEnvelope>(
        &self,
        endpoint: &str,
        method: Method,
        body: Option<Value>,
        include_auth: bool,
    ) -> R {
        let url = self.url(endpoint);
        let mut builder = self
            .http
            .request(method.clone(), &url)
            .header(ACCEPT, JSON_MIME);

        if include_auth {
            builder = self.authorize(builder);
        }
        if let Some(body) = body {
            // Sets `Content-Type: application/json`.
            builder = builder.json(&body);
        }

        let span = info_span!("api.request", http.method = %method, url = %url);
        let result = builder.send().instrument(span).await;
        self.normalize(result, DEFAULT_FAILURE_MESSAGE).await
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.session.get_token() {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        }
    }

    async fn normalize<R: ResponseEnvelope>(
        &self,
        result: reqwest::Result<Response>,
        fallback: &str,
    ) -> R {
        let response = match result {
            Ok(response) => response,
            Err(err) => {
                warn!("request failed: {err}");
                return R::from_failure(&ClientError::Network(err));
            }
        };

        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url(), "response received");

        if status == StatusCode::UNAUTHORIZED {
            self.handle_unauthorized();
        }

        let body = match response.bytes().await {
            Ok(body) => body,
            Err(err) => {
                warn!("failed to read response body: {err}");
                return R::from_failure(&ClientError::Network(err));
            }
        };

        if !status.is_success() {
            return R::from_failure(&ClientError::from_status(status, &body, fallback));
        }

        match serde_json::from_slice::<R>(&body) {
            Ok(mut envelope) => {
                envelope.classify_failure();
                envelope
            }
            Err(err) => {
                warn!("failed to decode response envelope: {err}");
                R::from_failure(&ClientError::Decode(err))
            }
        }
    }

    /// Ends the session after the backend rejected its credentials.
    pub(crate) fn handle_unauthorized(&self) {
        debug!("unauthorized response, clearing session");
        self.session.remove_token();
        if self.session.context().is_interactive() {
            self.navigator.navigate_to(routes::LOGIN);
        }
    }

    /// GET for a binary body, used by file exports. Unlike the JSON helpers this
    /// returns an error instead of an envelope.
    ///
    /// # Errors
    /// Returns an error on transport failure or a non-2xx status.
    pub async fn download(
        &self,
        endpoint: &str,
        accept: &str,
        default_filename: &str,
    ) -> Result<Download, ClientError> {
        let url = self.url(endpoint);
        let accept = HeaderValue::from_str(accept).unwrap_or(HeaderValue::from_static("*/*"));
        let builder = self.authorize(self.http.get(&url)).header(ACCEPT, accept);

        let span = info_span!("api.download", http.method = "GET", url = %url);
        let response = builder
            .send()
            .instrument(span)
            .await
            .map_err(ClientError::Network)?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            self.handle_unauthorized();
        }
        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            return Err(ClientError::from_status(status, &body, DEFAULT_FAILURE_MESSAGE));
        }

        Download::from_response(response, default_filename).await
    }
}

fn encode<B: Serialize + ?Sized>(body: &B) -> Result<Value, ClientError> {
    serde_json::to_value(body).map_err(ClientError::Encode)
}
