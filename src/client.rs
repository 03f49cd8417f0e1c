//! HTTP client for the Publit Production API
//!
//! [`ApiClient`] owns a pooled `reqwest::Client` and knows how to build endpoint
//! URLs, attach authentication, and turn non-OK responses into [`Error::Api`].
//! Resource modules only call [`ApiClient::get`], [`ApiClient::post`],
//! [`ApiClient::put`] and [`ApiClient::delete`].

use crate::config::{Auth, Config};
use crate::error::{ApiErrorResponse, Error, Result};
use crate::query::Query;
use crate::types::Endpoint;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use url::Url;

/// API name segment of every endpoint URL
pub const API: &str = "production";
/// API version segment of every endpoint URL
pub const API_VERSION: &str = "v2.0";
/// Unauthenticated health check resource
pub const RESOURCE_STATUS_CHECK: &str = "status_check";

/// Client for the Production API
///
/// Cheap to clone; clones share the connection pool and configuration.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    config: Arc<Config>,
}

impl ApiClient {
    /// Create a client from a validated configuration
    ///
    /// # Errors
    /// Returns error if the configuration is invalid or the HTTP client cannot be built
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            http,
            config: Arc::new(config),
        })
    }

    /// The configuration this client was built with
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Full URL of a versioned endpoint, e.g. `{base}/production/v2.0/files/5`
    pub fn endpoint_url(&self, endpoint: &Endpoint) -> Result<Url> {
        let raw = format!(
            "{}/{}/{}/{}",
            self.config.trimmed_base_url(),
            API,
            API_VERSION,
            endpoint.path()
        );
        Ok(Url::parse(&raw)?)
    }

    fn status_check_url(&self) -> String {
        format!(
            "{}/{}/{}",
            self.config.trimmed_base_url(),
            API_VERSION,
            RESOURCE_STATUS_CHECK
        )
    }

    /// Check whether the service is up
    ///
    /// Sent without authentication. Any transport error or non-OK status counts as down.
    pub async fn status_check(&self) -> bool {
        let url = self.status_check_url();
        match self.http.get(&url).send().await {
            Ok(resp) if resp.status() == StatusCode::OK => true,
            Ok(resp) => {
                tracing::debug!(url = %url, status = %resp.status(), "status check not ok");
                false
            }
            Err(e) => {
                tracing::debug!(url = %url, error = %e, "status check failed");
                false
            }
        }
    }

    /// GET an endpoint and decode the JSON body
    pub async fn get<T: DeserializeOwned>(&self, endpoint: Endpoint, query: &Query) -> Result<T> {
        let mut url = self.endpoint_url(&endpoint)?;
        query.apply(&mut url);
        let request = self.request(Method::GET, url);
        self.send_json(request).await
    }

    /// POST a JSON payload and decode the JSON body
    pub async fn post<P, T>(&self, endpoint: Endpoint, payload: &P) -> Result<T>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint_url(&endpoint)?;
        let request = self.request(Method::POST, url).json(payload);
        self.send_json(request).await
    }

    /// PUT a JSON payload and decode the JSON body
    pub async fn put<P, T>(&self, endpoint: Endpoint, payload: &P) -> Result<T>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint_url(&endpoint)?;
        let request = self.request(Method::PUT, url).json(payload);
        self.send_json(request).await
    }

    /// DELETE an endpoint and decode the JSON body
    pub async fn delete<T: DeserializeOwned>(&self, endpoint: Endpoint) -> Result<T> {
        let url = self.endpoint_url(&endpoint)?;
        let request = self.request(Method::DELETE, url);
        self.send_json(request).await
    }

    /// Shared HTTP client, used without authentication for presigned downloads
    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        tracing::debug!(method = %method, url = %url, "api request");
        let request = self.http.request(method, url);
        match &self.config.auth {
            Auth::None => request,
            Auth::Basic { user, password } => request.basic_auth(user, Some(password)),
            Auth::Bearer { token } => request.bearer_auth(token),
        }
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await?;
        if response.status() != StatusCode::OK {
            return Err(response_error(response).await);
        }
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

/// Build the most informative error possible from a non-OK response
///
/// JSON error bodies with content are reported verbatim; anything else becomes a
/// generic message carrying the status code.
pub async fn response_error(response: Response) -> Error {
    let status = response.status();
    let is_json = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/json"));

    if is_json
        && let Ok(body) = response.json::<ApiErrorResponse>().await
        && body.has_information()
    {
        return body.into_error(status);
    }

    Error::Api {
        status: status.as_u16(),
        message: format!(
            "response not ok, no information given (code: {})",
            status.as_u16()
        ),
    }
}
